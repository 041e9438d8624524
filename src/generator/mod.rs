//! # Generator Module
//!
//! Renders Django REST Framework modules for one application.
//!
//! ## Overview
//!
//! Every output style implements [`Generator`], which produces three
//! modules:
//!
//! - **serializers** - one `ModelSerializer` per concrete model
//! - **views** - request handling in the chosen style
//! - **urls** - the routing table for those views
//!
//! ## Formats
//!
//! | format | views | urls |
//! |---|---|---|
//! | `viewset` | `ViewSet` with list/create/retrieve/update/destroy | `SimpleRouter` |
//! | `modelviewset` | `ModelViewSet` | `SimpleRouter` |
//! | `apiview` | `APIView` detail and list classes | explicit patterns |
//! | `function` | `@api_view` functions | explicit patterns |
//!
//! Explicit patterns use `url()` regexes for Django 1.x and `path()` for
//! Django 2.x.
//!
//! ## Architecture
//!
//! ```text
//! AppConfig → AppContext → Askama template → text (or a file in write mode)
//! ```
//!
//! Templates live in `templates/` at the crate root.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drf_gen::generator::{build_generator, GeneratorSettings, ViewFormat};
//!
//! let generator = build_generator(ViewFormat::ModelViewSet, &app, GeneratorSettings::default());
//! println!("{}", generator.generate_views()?);
//! ```

mod naming;
mod strategies;
mod templates;
mod write;

pub use naming::*;
pub use strategies::*;
pub use templates::*;
pub use write::*;

use crate::app::AppConfig;
use crate::command::CommandError;
use crate::runtime_config::FrameworkFamily;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// The four supported output styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewFormat {
    #[default]
    ViewSet,
    ModelViewSet,
    ApiView,
    Function,
}

impl ViewFormat {
    pub const ALL: [ViewFormat; 4] = [
        ViewFormat::ViewSet,
        ViewFormat::ModelViewSet,
        ViewFormat::ApiView,
        ViewFormat::Function,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewFormat::ViewSet => "viewset",
            ViewFormat::ModelViewSet => "modelviewset",
            ViewFormat::ApiView => "apiview",
            ViewFormat::Function => "function",
        }
    }
}

impl fmt::Display for ViewFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewFormat {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = ViewFormat::ALL.iter().map(|f| f.as_str()).collect();
                CommandError::Argument(format!(
                    "'{s}' is not a valid format. ({})",
                    valid.join(", ")
                ))
            })
    }
}

/// A strategy that renders the three API modules for one app.
///
/// In write mode each accessor writes its module and returns a status line
/// instead of the module text.
pub trait Generator {
    fn format(&self) -> ViewFormat;

    /// # Errors
    ///
    /// Returns an error if rendering or writing fails
    fn generate_serializers(&self, depth: u32) -> anyhow::Result<String>;

    /// # Errors
    ///
    /// Returns an error if rendering or writing fails
    fn generate_views(&self) -> anyhow::Result<String>;

    /// # Errors
    ///
    /// Returns an error if rendering or writing fails
    fn generate_urls(&self) -> anyhow::Result<String>;

    /// All three blocks joined as `serializers + "\n" + views + "\n" + urls`.
    ///
    /// In write mode nothing is written unless every module rendered.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails
    fn generate_all(&self, depth: u32) -> anyhow::Result<String> {
        let serializers = self.generate_serializers(depth)?;
        let views = self.generate_views()?;
        let urls = self.generate_urls()?;
        Ok([serializers, views, urls].join("\n"))
    }
}

/// Construction parameters shared by every strategy
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Replace existing files in write mode
    pub force: bool,
    /// Prefix for generated module names
    pub prefix: Option<String>,
    /// Target framework family; decides the URL syntax
    pub family: FrameworkFamily,
    /// Directory to write modules into; `None` returns the text instead
    pub output_dir: Option<PathBuf>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorSettings {
            force: false,
            prefix: None,
            family: FrameworkFamily::Django18,
            output_dir: None,
        }
    }
}

/// Construct the strategy for `format`.
pub fn build_generator(
    format: ViewFormat,
    app: &AppConfig,
    settings: GeneratorSettings,
) -> Box<dyn Generator> {
    let base = BaseGenerator::new(app, settings);
    match format {
        ViewFormat::ViewSet => Box::new(ViewSetGenerator::new(base)),
        ViewFormat::ModelViewSet => Box::new(ModelViewSetGenerator::new(base)),
        ViewFormat::ApiView => Box::new(ApiViewGenerator::new(base)),
        ViewFormat::Function => Box::new(FunctionViewGenerator::new(base)),
    }
}
