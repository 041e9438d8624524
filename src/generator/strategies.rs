use std::path::PathBuf;

use super::templates::{
    render_apiview_urls, render_function_urls, render_router_urls, render_serializers,
    render_views, ApiViewViewsTemplate, AppContext, FunctionViewsTemplate,
    ModelViewSetViewsTemplate, ViewSetViewsTemplate,
};
use super::write::{status_line, write_modules};
use super::{Generator, GeneratorSettings, ViewFormat};
use crate::app::AppConfig;

/// Rendering and output handling common to every format
#[derive(Debug, Clone)]
pub struct BaseGenerator {
    ctx: AppContext,
    force: bool,
    prefix: String,
    path_routing: bool,
    output_dir: Option<PathBuf>,
}

impl BaseGenerator {
    pub fn new(app: &AppConfig, settings: GeneratorSettings) -> Self {
        let prefix = settings.prefix.unwrap_or_default();
        BaseGenerator {
            ctx: AppContext::new(app, &prefix),
            force: settings.force,
            path_routing: settings.family.uses_path_routing(),
            prefix,
            output_dir: settings.output_dir,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn path_routing(&self) -> bool {
        self.path_routing
    }

    /// File name of a generated module, e.g. `api_views.py`.
    pub fn file_name(&self, module: &str) -> String {
        format!("{}{module}.py", self.prefix)
    }

    /// Return the text, or write it and return a status line in write mode.
    fn emit(&self, module: &str, text: String) -> anyhow::Result<String> {
        self.emit_all(vec![(module, text)])
    }

    /// Join the texts with newlines, or write every module together and
    /// join their status lines in write mode.
    fn emit_all(&self, modules: Vec<(&str, String)>) -> anyhow::Result<String> {
        let Some(dir) = &self.output_dir else {
            let texts: Vec<String> = modules.into_iter().map(|(_, text)| text).collect();
            return Ok(texts.join("\n"));
        };
        let files: Vec<(String, String)> = modules
            .into_iter()
            .map(|(module, text)| (self.file_name(module), text))
            .collect();
        let outcomes = write_modules(dir, &files, self.force)?;
        let lines: Vec<String> = files
            .iter()
            .zip(outcomes)
            .map(|((file_name, _), outcome)| status_line(file_name, outcome))
            .collect();
        Ok(lines.join("\n"))
    }
}

/// The per-format half of a strategy: how views and urls are rendered.
///
/// Serializers are shared, and every type implementing this trait is a
/// [`Generator`].
pub trait RenderModules {
    const FORMAT: ViewFormat;

    fn base(&self) -> &BaseGenerator;

    /// # Errors
    ///
    /// Returns an error if the template fails to render
    fn render_views(&self) -> anyhow::Result<String>;

    /// # Errors
    ///
    /// Returns an error if the template fails to render
    fn render_urls(&self) -> anyhow::Result<String>;
}

impl<T: RenderModules> Generator for T {
    fn format(&self) -> ViewFormat {
        T::FORMAT
    }

    fn generate_serializers(&self, depth: u32) -> anyhow::Result<String> {
        let text = render_serializers(self.base().context(), depth)?;
        self.base().emit("serializers", text)
    }

    fn generate_views(&self) -> anyhow::Result<String> {
        self.base().emit("views", self.render_views()?)
    }

    fn generate_urls(&self) -> anyhow::Result<String> {
        self.base().emit("urls", self.render_urls()?)
    }

    fn generate_all(&self, depth: u32) -> anyhow::Result<String> {
        let serializers = render_serializers(self.base().context(), depth)?;
        let views = self.render_views()?;
        let urls = self.render_urls()?;
        self.base()
            .emit_all(vec![("serializers", serializers), ("views", views), ("urls", urls)])
    }
}

/// `ViewSet` classes routed through a `SimpleRouter`
pub struct ViewSetGenerator {
    base: BaseGenerator,
}

impl ViewSetGenerator {
    pub fn new(base: BaseGenerator) -> Self {
        ViewSetGenerator { base }
    }
}

impl RenderModules for ViewSetGenerator {
    const FORMAT: ViewFormat = ViewFormat::ViewSet;

    fn base(&self) -> &BaseGenerator {
        &self.base
    }

    fn render_views(&self) -> anyhow::Result<String> {
        render_views::<ViewSetViewsTemplate>(self.base.context())
    }

    fn render_urls(&self) -> anyhow::Result<String> {
        render_router_urls(self.base.context())
    }
}

/// `ModelViewSet` classes routed through a `SimpleRouter`
pub struct ModelViewSetGenerator {
    base: BaseGenerator,
}

impl ModelViewSetGenerator {
    pub fn new(base: BaseGenerator) -> Self {
        ModelViewSetGenerator { base }
    }
}

impl RenderModules for ModelViewSetGenerator {
    const FORMAT: ViewFormat = ViewFormat::ModelViewSet;

    fn base(&self) -> &BaseGenerator {
        &self.base
    }

    fn render_views(&self) -> anyhow::Result<String> {
        render_views::<ModelViewSetViewsTemplate>(self.base.context())
    }

    fn render_urls(&self) -> anyhow::Result<String> {
        render_router_urls(self.base.context())
    }
}

/// Detail and list `APIView` classes with explicit URL patterns
pub struct ApiViewGenerator {
    base: BaseGenerator,
}

impl ApiViewGenerator {
    pub fn new(base: BaseGenerator) -> Self {
        ApiViewGenerator { base }
    }
}

impl RenderModules for ApiViewGenerator {
    const FORMAT: ViewFormat = ViewFormat::ApiView;

    fn base(&self) -> &BaseGenerator {
        &self.base
    }

    fn render_views(&self) -> anyhow::Result<String> {
        render_views::<ApiViewViewsTemplate>(self.base.context())
    }

    fn render_urls(&self) -> anyhow::Result<String> {
        render_apiview_urls(self.base.context(), self.base.path_routing())
    }
}

/// `@api_view` functions with explicit URL patterns
pub struct FunctionViewGenerator {
    base: BaseGenerator,
}

impl FunctionViewGenerator {
    pub fn new(base: BaseGenerator) -> Self {
        FunctionViewGenerator { base }
    }
}

impl RenderModules for FunctionViewGenerator {
    const FORMAT: ViewFormat = ViewFormat::Function;

    fn base(&self) -> &BaseGenerator {
        &self.base
    }

    fn render_views(&self) -> anyhow::Result<String> {
        render_views::<FunctionViewsTemplate>(self.base.context())
    }

    fn render_urls(&self) -> anyhow::Result<String> {
        render_function_urls(self.base.context(), self.base.path_routing())
    }
}
