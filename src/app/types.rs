use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A parsed project manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectManifest {
    /// Declared target runtime versions
    #[serde(default)]
    pub runtime: RuntimeDecl,
    /// Project-level defaults for `generate` options, in whatever convention
    /// the project's Django version uses
    #[serde(default)]
    pub options: BTreeMap<String, Value>,
    /// Applications in declaration order
    #[serde(default)]
    pub apps: Vec<AppConfig>,
    /// Directory the manifest was read from; relative app paths resolve here
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl ProjectManifest {
    /// Look up an application by its label.
    pub fn app(&self, label: &str) -> Option<&AppConfig> {
        self.apps.iter().find(|a| a.label == label)
    }

    /// Directory generated files for `app` are written into.
    pub fn app_dir(&self, app: &AppConfig) -> PathBuf {
        self.base_dir.join(app.dir())
    }
}

/// Runtime versions as written in the manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeDecl {
    pub python: Option<String>,
    pub django: Option<String>,
}

/// One application and its models.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Short label used on the command line (e.g. `blog`)
    pub label: String,
    /// Dotted Python package the app lives in; defaults to the label
    #[serde(default)]
    pub name: Option<String>,
    /// Directory of the app relative to the manifest; defaults to the label
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// `None` when the app has no models module at all
    #[serde(default)]
    pub models: Option<Vec<ModelMeta>>,
}

impl AppConfig {
    /// Python package name used in generated imports.
    pub fn module_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.label)
    }

    pub fn dir(&self) -> &Path {
        self.path
            .as_deref()
            .unwrap_or_else(|| Path::new(self.label.as_str()))
    }

    /// The models module, if the app declares one.
    pub fn models_module(&self) -> Option<&[ModelMeta]> {
        self.models.as_deref()
    }

    /// Concrete models in declaration order. Abstract models never get
    /// serializers or views.
    pub fn concrete_models(&self) -> Vec<&ModelMeta> {
        self.models
            .iter()
            .flatten()
            .filter(|m| !m.is_abstract)
            .collect()
    }
}

/// A single model declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelMeta {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldMeta>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
}

impl ModelMeta {
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Fields that point at another model.
    pub fn relations(&self) -> impl Iterator<Item = &FieldMeta> {
        self.fields.iter().filter(|f| f.is_relation())
    }
}

/// A model field. `to` is set for relation fields.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldMeta {
    pub name: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub ty: String,
    #[serde(default)]
    pub to: Option<String>,
}

fn default_field_type() -> String {
    "CharField".to_string()
}

impl FieldMeta {
    pub fn is_relation(&self) -> bool {
        self.to.is_some()
            || matches!(
                self.ty.as_str(),
                "ForeignKey" | "OneToOneField" | "ManyToManyField"
            )
    }
}
