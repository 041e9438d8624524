//! # Runtime Configuration Module
//!
//! Resolves the Python runtime and Django framework versions of the project
//! being scaffolded.
//!
//! ## Sources
//!
//! Versions come from the manifest's `runtime` table. Two environment
//! variables take precedence over it:
//!
//! ### `DRFGEN_PYTHON_VERSION`
//!
//! Target Python version, e.g. `3.6`. Must be at least 3.4.
//!
//! ### `DRFGEN_DJANGO_VERSION`
//!
//! Target Django version, e.g. `1.11` or `2.2.4`. Must belong to one of the
//! supported [`FrameworkFamily`] values.
//!
//! ## Example
//!
//! ```bash
//! DRFGEN_DJANGO_VERSION=2.2 drf-gen generate blog
//! ```

use crate::app::RuntimeDecl;
use crate::command::CommandError;
use std::env;
use std::fmt;

pub const PYTHON_VERSION_ENV: &str = "DRFGEN_PYTHON_VERSION";
pub const DJANGO_VERSION_ENV: &str = "DRFGEN_DJANGO_VERSION";

/// Oldest supported Python runtime.
pub const MIN_PYTHON: Version = Version { major: 3, minor: 4 };

/// A `major.minor` version. Any further components are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32) -> Self {
        Version { major, minor }
    }

    /// Parse `"3"`, `"3.6"` or `"2.2.4"`. A missing minor reads as 0.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = match parts.next() {
            Some(p) => p.parse().ok()?,
            None => 0,
        };
        Some(Version { major, minor })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Groups of Django versions that share an option-passing convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkFamily {
    /// Django 1.7: optparse; unset options are absent and values may be strings
    Django17,
    /// Django 1.8 to 1.11: argparse; every option present with real types
    Django18,
    /// Django 2.x: argparse, and `path()` routing
    Django2,
}

impl FrameworkFamily {
    /// Classify a Django version.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Environment`] for any unsupported version.
    pub fn from_version(v: Version) -> Result<Self, CommandError> {
        match (v.major, v.minor) {
            (1, 7) => Ok(FrameworkFamily::Django17),
            (1, 8..=11) => Ok(FrameworkFamily::Django18),
            (2, _) => Ok(FrameworkFamily::Django2),
            _ => Err(CommandError::Environment(format!(
                "Django {v} is not supported. You must be using Django 1.7, 1.8 to 1.11, or 2.x"
            ))),
        }
    }

    /// Whether unset options may be missing and values may be string-encoded.
    pub fn is_legacy(self) -> bool {
        matches!(self, FrameworkFamily::Django17)
    }

    /// Whether generated URL patterns use `path()` instead of `url()` regexes.
    pub fn uses_path_routing(self) -> bool {
        matches!(self, FrameworkFamily::Django2)
    }
}

impl fmt::Display for FrameworkFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FrameworkFamily::Django17 => "Django 1.7",
            FrameworkFamily::Django18 => "Django 1.8-1.11",
            FrameworkFamily::Django2 => "Django 2.x",
        };
        f.write_str(s)
    }
}

/// The target project's declared runtime versions, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRuntime {
    pub python: Option<String>,
    pub django: Option<String>,
}

impl HostRuntime {
    /// Manifest values with environment overrides applied. Unset or blank
    /// variables leave the manifest value in place.
    pub fn from_env(decl: &RuntimeDecl) -> Self {
        Self::with_overrides(
            decl,
            env::var(PYTHON_VERSION_ENV).ok(),
            env::var(DJANGO_VERSION_ENV).ok(),
        )
    }

    pub fn with_overrides(
        decl: &RuntimeDecl,
        python: Option<String>,
        django: Option<String>,
    ) -> Self {
        let given = |v: Option<String>| v.filter(|v| !v.trim().is_empty());
        HostRuntime {
            python: given(python).or_else(|| decl.python.clone()),
            django: given(django).or_else(|| decl.django.clone()),
        }
    }

    /// Check the Python version.
    ///
    /// # Errors
    ///
    /// [`CommandError::Environment`] when undeclared, unparsable or older than 3.4.
    pub fn check_python(&self) -> Result<Version, CommandError> {
        let raw = self.python.as_deref().ok_or_else(|| {
            CommandError::Environment(format!(
                "Python version not declared; set runtime.python in the manifest or {PYTHON_VERSION_ENV}"
            ))
        })?;
        let v = Version::parse(raw).ok_or_else(|| {
            CommandError::Environment(format!("'{raw}' is not a valid Python version"))
        })?;
        if v < MIN_PYTHON {
            return Err(CommandError::Environment(format!(
                "Python {MIN_PYTHON} or newer is required (found {v})"
            )));
        }
        Ok(v)
    }

    /// Check the Django version and classify it.
    ///
    /// # Errors
    ///
    /// [`CommandError::Environment`] when undeclared, unparsable or unsupported.
    pub fn check_django(&self) -> Result<FrameworkFamily, CommandError> {
        let raw = self.django.as_deref().ok_or_else(|| {
            CommandError::Environment(format!(
                "Django version not declared; set runtime.django in the manifest or {DJANGO_VERSION_ENV}"
            ))
        })?;
        let v = Version::parse(raw).ok_or_else(|| {
            CommandError::Environment(format!("'{raw}' is not a valid Django version"))
        })?;
        FrameworkFamily::from_version(v)
    }
}
