use super::error::CommandError;
use crate::generator::{is_module_fragment, ViewFormat};
use crate::runtime_config::FrameworkFamily;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

pub const OPT_FORMAT: &str = "format";
pub const OPT_DEPTH: &str = "depth";
pub const OPT_FORCE: &str = "force";
pub const OPT_SERIALIZERS: &str = "serializers";
pub const OPT_VIEWS: &str = "views";
pub const OPT_URLS: &str = "urls";
pub const OPT_PREFIX: &str = "prefix";
pub const OPT_WRITE: &str = "write";

const KNOWN_OPTIONS: [&str; 8] = [
    OPT_FORMAT,
    OPT_DEPTH,
    OPT_FORCE,
    OPT_SERIALIZERS,
    OPT_VIEWS,
    OPT_URLS,
    OPT_PREFIX,
    OPT_WRITE,
];

/// Option values as handed over by a parser or read from a manifest.
///
/// Keys may be missing and values may not have their final type yet; see
/// [`Options::normalize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOptions(BTreeMap<String, Value>);

impl RawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merged(mut self, other: RawOptions) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<BTreeMap<String, Value>> for RawOptions {
    fn from(map: BTreeMap<String, Value>) -> Self {
        RawOptions(map)
    }
}

impl<const N: usize> From<[(&str, Value); N]> for RawOptions {
    fn from(pairs: [(&str, Value); N]) -> Self {
        RawOptions(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }
}

/// The canonical, fully-populated option set for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub format: ViewFormat,
    /// Serializer nesting depth
    pub depth: u32,
    /// Overwrite existing files in write mode
    pub force: bool,
    pub serializers: bool,
    pub views: bool,
    pub urls: bool,
    /// Prefix for generated module names
    pub prefix: Option<String>,
    /// Write files into the app directory instead of printing them
    pub write: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            format: ViewFormat::ViewSet,
            depth: 0,
            force: false,
            serializers: false,
            views: false,
            urls: false,
            prefix: None,
            write: false,
        }
    }
}

/// Which blocks an invocation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSelection {
    Serializers,
    Views,
    Urls,
    All,
}

impl Options {
    /// Build the canonical options from a raw mapping.
    ///
    /// Missing keys take their defaults under every family. The Django 1.7
    /// family additionally accepts string-encoded booleans (`"True"`,
    /// `"1"`, `"yes"`), since optparse hands values over untyped. `depth`
    /// may be a number or a numeric string for all families.
    ///
    /// # Errors
    ///
    /// [`CommandError::Argument`] when a value has the wrong shape or the
    /// format is not one of the four known ones.
    pub fn normalize(raw: &RawOptions, family: FrameworkFamily) -> Result<Self, CommandError> {
        for key in raw.keys().filter(|k| !KNOWN_OPTIONS.contains(k)) {
            tracing::debug!(option = key, "ignoring unknown option");
        }
        Ok(Options {
            format: format_option(raw)?,
            depth: depth_option(raw)?,
            force: flag(raw, OPT_FORCE, family)?,
            serializers: flag(raw, OPT_SERIALIZERS, family)?,
            views: flag(raw, OPT_VIEWS, family)?,
            urls: flag(raw, OPT_URLS, family)?,
            prefix: prefix_option(raw)?,
            write: flag(raw, OPT_WRITE, family)?,
        })
    }

    /// First set flag in the order serializers, views, urls; all three when
    /// none is set.
    pub fn selection(&self) -> OutputSelection {
        if self.serializers {
            OutputSelection::Serializers
        } else if self.views {
            OutputSelection::Views
        } else if self.urls {
            OutputSelection::Urls
        } else {
            OutputSelection::All
        }
    }
}

fn format_option(raw: &RawOptions) -> Result<ViewFormat, CommandError> {
    match raw.get(OPT_FORMAT) {
        None => Ok(ViewFormat::default()),
        Some(Value::String(s)) => ViewFormat::from_str(s),
        Some(other) => ViewFormat::from_str(&other.to_string()),
    }
}

fn depth_option(raw: &RawOptions) -> Result<u32, CommandError> {
    let invalid = |v: &Value| {
        CommandError::Argument(format!(
            "'{}' is not a valid depth; expected a non-negative integer",
            display_value(v)
        ))
    };
    match raw.get(OPT_DEPTH) {
        None => Ok(0),
        Some(v @ Value::Number(n)) => n
            .as_u64()
            .and_then(|d| u32::try_from(d).ok())
            .ok_or_else(|| invalid(v)),
        Some(v @ Value::String(s)) => s.trim().parse().map_err(|_| invalid(v)),
        Some(v) => Err(invalid(v)),
    }
}

fn prefix_option(raw: &RawOptions) -> Result<Option<String>, CommandError> {
    match raw.get(OPT_PREFIX) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) if is_module_fragment(s) => Ok(Some(s.clone())),
        Some(Value::String(s)) => Err(CommandError::Argument(format!(
            "'{s}' is not a valid prefix; use letters, digits and underscores, not starting with a digit"
        ))),
        Some(v) => Err(CommandError::Argument(format!(
            "option '{OPT_PREFIX}' expects a string, got {v}"
        ))),
    }
}

fn flag(raw: &RawOptions, key: &str, family: FrameworkFamily) -> Result<bool, CommandError> {
    let parsed = match raw.get(key) {
        None => Some(false),
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::String(s)) if family.is_legacy() => legacy_bool(s),
        Some(Value::Number(n)) if family.is_legacy() => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Some(_) => None,
    };
    parsed.ok_or_else(|| {
        let got = raw.get(key).map(display_value).unwrap_or_default();
        CommandError::Argument(format!(
            "option '{key}' expects a boolean under {family}, got '{got}'"
        ))
    })
}

fn legacy_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
