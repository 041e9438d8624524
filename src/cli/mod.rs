//! # CLI Module
//!
//! Command-line front-end for the `drf-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate serializers, views and urls for an app declared in the manifest:
//!
//! ```bash
//! drf-gen generate blog --format modelviewset
//! ```
//!
//! Options:
//! - `-f, --format <NAME>` - `viewset` (default), `modelviewset`, `apiview`, `function`
//! - `-d, --depth <N>` - serializer nesting depth (default: 0)
//! - `--serializers`, `--views`, `--urls` - generate only that module
//! - `--prefix <P>` - prefix for generated module names
//! - `--write` - write `<prefix><module>.py` into the app directory instead of printing
//! - `--force` - overwrite existing files in write mode
//!
//! ### `inspect`
//!
//! Show the runtime family and the apps and models the manifest declares:
//!
//! ```bash
//! drf-gen --manifest project.yaml inspect
//! ```
//!
//! ## Global options
//!
//! - `--manifest <FILE>` (env `DRFGEN_MANIFEST`, default `drf_project.yaml`)
//! - `--log-format <pretty|json>` (env `DRFGEN_LOG_FORMAT`)
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use drf_gen::cli::{run, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run(&cli, &mut std::io::stdout())?;
//! ```

mod commands;


pub use commands::{run, run_cli, Cli, Commands, GenerateArgs};
