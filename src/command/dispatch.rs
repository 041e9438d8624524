use std::path::PathBuf;

use super::error::CommandError;
use super::options::{Options, OutputSelection, RawOptions};
use crate::app::AppConfig;
use crate::generator::{build_generator, Generator, GeneratorSettings, ViewFormat};
use crate::runtime_config::HostRuntime;

pub const NO_APP_MESSAGE: &str = "You must provide an app to generate an API";

/// One `generate` invocation against a single application.
#[derive(Debug, Clone)]
pub struct GenerateCommand<'a> {
    /// The target app; `None` when the caller could not resolve one
    pub app: Option<&'a AppConfig>,
    pub runtime: HostRuntime,
    /// Where write mode puts generated modules
    pub app_dir: PathBuf,
}

impl<'a> GenerateCommand<'a> {
    pub fn new(app: Option<&'a AppConfig>, runtime: HostRuntime, app_dir: PathBuf) -> Self {
        GenerateCommand {
            app,
            runtime,
            app_dir,
        }
    }

    /// Validate, pick the generator for the requested format and produce
    /// the requested text.
    ///
    /// # Errors
    ///
    /// A [`CommandError`] (inside the `anyhow::Error`) for usage, environment
    /// and argument problems; rendering or write failures otherwise.
    pub fn handle(&self, raw: &RawOptions) -> anyhow::Result<String> {
        self.handle_with(raw, build_generator)
    }

    /// [`handle`](Self::handle) with a custom generator constructor.
    ///
    /// # Errors
    ///
    /// See [`handle`](Self::handle).
    pub fn handle_with<F>(&self, raw: &RawOptions, make_generator: F) -> anyhow::Result<String>
    where
        F: FnOnce(ViewFormat, &AppConfig, GeneratorSettings) -> Box<dyn Generator>,
    {
        let app = self
            .app
            .filter(|a| a.models_module().is_some())
            .ok_or_else(|| CommandError::Usage(NO_APP_MESSAGE.to_string()))?;

        let python = self.runtime.check_python()?;
        let family = self.runtime.check_django()?;
        let options = Options::normalize(raw, family)?;
        tracing::debug!(
            app = %app.label,
            %python,
            %family,
            format = %options.format,
            depth = options.depth,
            "dispatching generate"
        );

        let settings = GeneratorSettings {
            force: options.force,
            prefix: options.prefix.clone(),
            family,
            output_dir: options.write.then(|| self.app_dir.clone()),
        };
        let generator = make_generator(options.format, app, settings);
        render_selection(generator.as_ref(), &options)
    }
}

/// Produce the blocks `options` selects, in the order serializers, views, urls.
///
/// # Errors
///
/// Propagates generator failures
pub fn render_selection(generator: &dyn Generator, options: &Options) -> anyhow::Result<String> {
    let selection = options.selection();
    tracing::info!(format = %generator.format(), ?selection, "generating");
    match selection {
        OutputSelection::Serializers => generator.generate_serializers(options.depth),
        OutputSelection::Views => generator.generate_views(),
        OutputSelection::Urls => generator.generate_urls(),
        OutputSelection::All => generator.generate_all(options.depth),
    }
}
