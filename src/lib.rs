//! # drf-gen
//!
//! **drf-gen** scaffolds the API layer of a Django REST Framework project:
//! serializer classes, views and URL routing for one application at a time.
//!
//! ## Overview
//!
//! The target project is described by a manifest (YAML or JSON) that
//! declares the Python and Django versions and the apps with their models.
//! `drf-gen generate <app>` validates that description, picks one of four
//! output styles and prints the generated modules (or writes them into the
//! app directory with `--write`).
//!
//! ## Architecture
//!
//! - **[`app`]** - manifest loading and model metadata
//! - **[`runtime_config`]** - target runtime versions and framework families
//! - **[`command`]** - option normalization and the `generate` dispatcher
//! - **[`generator`]** - the four output styles, rendered with Askama
//! - **[`cli`]** - clap front-end
//! - **[`logging`]** - tracing subscriber set-up
//!
//! ### Generation Flow
//!
//! ```text
//! CLI flags ─┐
//!            ├─ RawOptions → Options (per framework family)
//! manifest ──┘                     │
//!     │                            ▼
//!     └─ AppConfig ─────→ Generator (viewset | modelviewset | apiview | function)
//!                                  │
//!                                  ▼
//!                 serializers + "\n" + views + "\n" + urls → stdout
//! ```
//!
//! ## Example
//!
//! ```bash
//! drf-gen --manifest drf_project.yaml generate blog --format modelviewset --depth 1
//! ```

pub mod app;
pub mod cli;
pub mod command;
pub mod generator;
pub mod logging;
pub mod runtime_config;

pub use app::{load_manifest, AppConfig, ProjectManifest};
pub use command::{CommandError, GenerateCommand, Options, RawOptions};
pub use generator::{build_generator, Generator, GeneratorSettings, ViewFormat};
