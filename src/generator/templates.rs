use askama::Template;

use super::naming::{fields_literal, route_segment, to_snake_case};
use crate::app::{AppConfig, ModelMeta};

/// One model as the templates see it
#[derive(Debug, Clone)]
pub struct ModelEntry {
    /// Model class name (e.g. `BlogPost`)
    pub name: String,
    /// Serializer class name (e.g. `BlogPostSerializer`)
    pub serializer: String,
    /// URL segment (e.g. `blogpost`)
    pub route: String,
    /// snake_case stem for function views (e.g. `blog_post`)
    pub snake: String,
    /// Python literal for `Meta.fields`
    pub fields: String,
}

impl ModelEntry {
    pub fn from_model(model: &ModelMeta) -> Self {
        ModelEntry {
            name: model.name.clone(),
            serializer: format!("{}Serializer", model.name),
            route: route_segment(&model.name),
            snake: to_snake_case(&model.name),
            fields: fields_literal(&model.field_names()),
        }
    }
}

/// Everything a template needs to know about the app, computed once per
/// generator.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Python package of the app (e.g. `blog` or `acme.shop`)
    pub app_module: String,
    pub serializers_module: String,
    pub views_module: String,
    pub models: Vec<ModelEntry>,
}

impl AppContext {
    pub fn new(app: &AppConfig, prefix: &str) -> Self {
        AppContext {
            app_module: app.module_name().to_string(),
            serializers_module: format!("{prefix}serializers"),
            views_module: format!("{prefix}views"),
            models: app
                .concrete_models()
                .into_iter()
                .map(ModelEntry::from_model)
                .collect(),
        }
    }

    fn model_names(&self) -> String {
        self.join(|m| &m.name)
    }

    fn serializer_names(&self) -> String {
        self.join(|m| &m.serializer)
    }

    fn join<F>(&self, f: F) -> String
    where
        F: Fn(&ModelEntry) -> &String,
    {
        self.models
            .iter()
            .map(|m| f(m).as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Template data for `serializers.py`
#[derive(Template)]
#[template(path = "serializers.py.txt", escape = "none")]
pub struct SerializersTemplateData {
    pub app_module: String,
    pub model_names: String,
    pub has_models: bool,
    pub models: Vec<ModelEntry>,
    pub depth: u32,
}

/// Template data shared by every `views.py` flavour
pub struct ViewsData {
    pub app_module: String,
    pub serializers_module: String,
    pub model_names: String,
    pub serializer_names: String,
    pub has_models: bool,
    pub models: Vec<ModelEntry>,
}

#[derive(Template)]
#[template(path = "viewset_views.py.txt", escape = "none")]
pub struct ViewSetViewsTemplate {
    pub app_module: String,
    pub serializers_module: String,
    pub model_names: String,
    pub serializer_names: String,
    pub has_models: bool,
    pub models: Vec<ModelEntry>,
}

#[derive(Template)]
#[template(path = "modelviewset_views.py.txt", escape = "none")]
pub struct ModelViewSetViewsTemplate {
    pub app_module: String,
    pub serializers_module: String,
    pub model_names: String,
    pub serializer_names: String,
    pub has_models: bool,
    pub models: Vec<ModelEntry>,
}

#[derive(Template)]
#[template(path = "apiview_views.py.txt", escape = "none")]
pub struct ApiViewViewsTemplate {
    pub app_module: String,
    pub serializers_module: String,
    pub model_names: String,
    pub serializer_names: String,
    pub has_models: bool,
    pub models: Vec<ModelEntry>,
}

#[derive(Template)]
#[template(path = "function_views.py.txt", escape = "none")]
pub struct FunctionViewsTemplate {
    pub app_module: String,
    pub serializers_module: String,
    pub model_names: String,
    pub serializer_names: String,
    pub has_models: bool,
    pub models: Vec<ModelEntry>,
}

/// Router-based `urls.py` for the two viewset formats
#[derive(Template)]
#[template(path = "router_urls.py.txt", escape = "none")]
pub struct RouterUrlsTemplate {
    pub app_module: String,
    pub views_module: String,
    pub models: Vec<ModelEntry>,
}

#[derive(Template)]
#[template(path = "apiview_urls.py.txt", escape = "none")]
pub struct ApiViewUrlsTemplate {
    pub app_module: String,
    pub views_module: String,
    pub models: Vec<ModelEntry>,
    /// `path()` for Django 2.x, `url()` regexes before that
    pub path_routing: bool,
}

#[derive(Template)]
#[template(path = "function_urls.py.txt", escape = "none")]
pub struct FunctionUrlsTemplate {
    pub app_module: String,
    pub views_module: String,
    pub models: Vec<ModelEntry>,
    pub path_routing: bool,
}

/// Render `serializers.py`.
///
/// # Errors
///
/// Returns an error if template rendering fails
pub fn render_serializers(ctx: &AppContext, depth: u32) -> anyhow::Result<String> {
    let rendered = SerializersTemplateData {
        app_module: ctx.app_module.clone(),
        model_names: ctx.model_names(),
        has_models: !ctx.models.is_empty(),
        models: ctx.models.clone(),
        depth,
    }
    .render()?;
    Ok(rendered)
}

/// Collect the data every views template shares.
pub fn views_data(ctx: &AppContext) -> ViewsData {
    ViewsData {
        app_module: ctx.app_module.clone(),
        serializers_module: ctx.serializers_module.clone(),
        model_names: ctx.model_names(),
        serializer_names: ctx.serializer_names(),
        has_models: !ctx.models.is_empty(),
        models: ctx.models.clone(),
    }
}

macro_rules! views_template_from {
    ($($ty:ident),+) => {
        $(
            impl From<ViewsData> for $ty {
                fn from(d: ViewsData) -> Self {
                    $ty {
                        app_module: d.app_module,
                        serializers_module: d.serializers_module,
                        model_names: d.model_names,
                        serializer_names: d.serializer_names,
                        has_models: d.has_models,
                        models: d.models,
                    }
                }
            }
        )+
    };
}

views_template_from!(
    ViewSetViewsTemplate,
    ModelViewSetViewsTemplate,
    ApiViewViewsTemplate,
    FunctionViewsTemplate
);

/// Render a views module with template `T`.
///
/// # Errors
///
/// Returns an error if template rendering fails
pub fn render_views<T>(ctx: &AppContext) -> anyhow::Result<String>
where
    T: Template + From<ViewsData>,
{
    Ok(T::from(views_data(ctx)).render()?)
}

/// Render router-based `urls.py`.
///
/// # Errors
///
/// Returns an error if template rendering fails
pub fn render_router_urls(ctx: &AppContext) -> anyhow::Result<String> {
    let rendered = RouterUrlsTemplate {
        app_module: ctx.app_module.clone(),
        views_module: ctx.views_module.clone(),
        models: ctx.models.clone(),
    }
    .render()?;
    Ok(rendered)
}

/// Render `urls.py` with explicit patterns for API views.
///
/// # Errors
///
/// Returns an error if template rendering fails
pub fn render_apiview_urls(ctx: &AppContext, path_routing: bool) -> anyhow::Result<String> {
    let rendered = ApiViewUrlsTemplate {
        app_module: ctx.app_module.clone(),
        views_module: ctx.views_module.clone(),
        models: ctx.models.clone(),
        path_routing,
    }
    .render()?;
    Ok(rendered)
}

/// Render `urls.py` with explicit patterns for function views.
///
/// # Errors
///
/// Returns an error if template rendering fails
pub fn render_function_urls(ctx: &AppContext, path_routing: bool) -> anyhow::Result<String> {
    let rendered = FunctionUrlsTemplate {
        app_module: ctx.app_module.clone(),
        views_module: ctx.views_module.clone(),
        models: ctx.models.clone(),
        path_routing,
    }
    .render()?;
    Ok(rendered)
}
