#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::app::{parse_manifest, AppConfig};
use crate::generator::{Generator, GeneratorSettings, ViewFormat};
use crate::runtime_config::{FrameworkFamily, HostRuntime};
use serde_json::json;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Records every accessor call; returns fixed block text.
struct RecordingGenerator {
    format: ViewFormat,
    calls: Rc<RefCell<Vec<String>>>,
}

impl Generator for RecordingGenerator {
    fn format(&self) -> ViewFormat {
        self.format
    }

    fn generate_serializers(&self, depth: u32) -> anyhow::Result<String> {
        self.calls.borrow_mut().push(format!("serializers:{depth}"));
        Ok("SER".to_string())
    }

    fn generate_views(&self) -> anyhow::Result<String> {
        self.calls.borrow_mut().push("views".to_string());
        Ok("VIEWS".to_string())
    }

    fn generate_urls(&self) -> anyhow::Result<String> {
        self.calls.borrow_mut().push("urls".to_string());
        Ok("URLS".to_string())
    }
}

const MANIFEST: &str = r#"
apps:
  - label: blog
    models:
      - name: Post
        fields: [{ name: id }]
  - label: plain
"#;

fn app(label: &str) -> AppConfig {
    parse_manifest(MANIFEST, true).unwrap().app(label).cloned().unwrap()
}

fn runtime(django: &str) -> HostRuntime {
    HostRuntime {
        python: Some("3.6".to_string()),
        django: Some(django.to_string()),
    }
}

struct Harness {
    calls: Rc<RefCell<Vec<String>>>,
    built: Rc<RefCell<Vec<(ViewFormat, GeneratorSettings)>>>,
}

impl Harness {
    fn new() -> Self {
        Harness {
            calls: Rc::new(RefCell::new(Vec::new())),
            built: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn run(&self, app: Option<&AppConfig>, django: &str, raw: &RawOptions) -> anyhow::Result<String> {
        let cmd = GenerateCommand::new(app, runtime(django), PathBuf::from("blog"));
        let calls = Rc::clone(&self.calls);
        let built = Rc::clone(&self.built);
        cmd.handle_with(raw, move |format, _app, settings| {
            built.borrow_mut().push((format, settings));
            Box::new(RecordingGenerator { format, calls })
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn built_formats(&self) -> Vec<ViewFormat> {
        self.built.borrow().iter().map(|(f, _)| *f).collect()
    }
}

fn command_error(err: &anyhow::Error) -> &CommandError {
    err.downcast_ref::<CommandError>().expect("CommandError")
}

#[test]
fn test_all_blocks_in_fixed_order() {
    let h = Harness::new();
    let out = h.run(Some(&app("blog")), "1.8", &RawOptions::new()).unwrap();
    assert_eq!(out, "SER\nVIEWS\nURLS");
    assert_eq!(h.calls(), vec!["serializers:0", "views", "urls"]);
}

#[test]
fn test_single_block_flags() {
    for (flag, expected) in [(OPT_SERIALIZERS, "SER"), (OPT_VIEWS, "VIEWS"), (OPT_URLS, "URLS")] {
        let h = Harness::new();
        let raw = RawOptions::from([(flag, json!(true))]);
        let out = h.run(Some(&app("blog")), "2.0", &raw).unwrap();
        assert_eq!(out, expected);
        assert_eq!(h.calls().len(), 1);
    }
}

#[test]
fn test_flag_priority_serializers_views_urls() {
    let h = Harness::new();
    let raw = RawOptions::from([(OPT_URLS, json!(true)), (OPT_VIEWS, json!(true))]);
    assert_eq!(h.run(Some(&app("blog")), "1.9", &raw).unwrap(), "VIEWS");

    let h = Harness::new();
    let raw = RawOptions::from([
        (OPT_URLS, json!(true)),
        (OPT_VIEWS, json!(true)),
        (OPT_SERIALIZERS, json!(true)),
    ]);
    assert_eq!(h.run(Some(&app("blog")), "1.9", &raw).unwrap(), "SER");
}

#[test]
fn test_each_format_selects_its_strategy() {
    for format in ViewFormat::ALL {
        let h = Harness::new();
        let raw = RawOptions::from([(OPT_FORMAT, json!(format.as_str()))]);
        h.run(Some(&app("blog")), "1.11", &raw).unwrap();
        assert_eq!(h.built_formats(), vec![format]);
    }
}

#[test]
fn test_invalid_format_aborts_before_output() {
    let h = Harness::new();
    let raw = RawOptions::from([(OPT_FORMAT, json!("bogus"))]);
    let err = h.run(Some(&app("blog")), "1.8", &raw).unwrap_err();
    let cmd_err = command_error(&err);
    assert!(matches!(cmd_err, CommandError::Argument(_)));
    assert_eq!(
        cmd_err.message(),
        "'bogus' is not a valid format. (viewset, modelviewset, apiview, function)"
    );
    assert!(h.built_formats().is_empty());
    assert!(h.calls().is_empty());
}

#[test]
fn test_missing_app_is_usage_error() {
    let h = Harness::new();
    let err = h.run(None, "1.8", &RawOptions::new()).unwrap_err();
    assert_eq!(command_error(&err), &CommandError::Usage(NO_APP_MESSAGE.to_string()));
    assert!(h.built_formats().is_empty());
}

#[test]
fn test_app_without_models_is_usage_error() {
    let h = Harness::new();
    let err = h.run(Some(&app("plain")), "1.8", &RawOptions::new()).unwrap_err();
    assert!(matches!(command_error(&err), CommandError::Usage(_)));
    assert!(h.built_formats().is_empty());
}

#[test]
fn test_usage_checked_before_environment() {
    let h = Harness::new();
    let err = h.run(Some(&app("plain")), "3.0", &RawOptions::new()).unwrap_err();
    assert!(matches!(command_error(&err), CommandError::Usage(_)));
}

#[test]
fn test_environment_errors() {
    let h = Harness::new();
    let err = h.run(Some(&app("blog")), "1.6", &RawOptions::new()).unwrap_err();
    assert!(matches!(command_error(&err), CommandError::Environment(_)));

    let blog = app("blog");
    let cmd = GenerateCommand::new(
        Some(&blog),
        HostRuntime {
            python: Some("2.7".to_string()),
            django: Some("1.8".to_string()),
        },
        PathBuf::new(),
    );
    let err = cmd.handle(&RawOptions::new()).unwrap_err();
    assert!(command_error(&err).message().contains("3.4"));
}

#[test]
fn test_python_checked_before_format() {
    let blog = app("blog");
    let cmd = GenerateCommand::new(
        Some(&blog),
        HostRuntime {
            python: Some("3.3".to_string()),
            django: Some("1.8".to_string()),
        },
        PathBuf::new(),
    );
    let raw = RawOptions::from([(OPT_FORMAT, json!("bogus"))]);
    let err = cmd.handle(&raw).unwrap_err();
    assert!(matches!(command_error(&err), CommandError::Environment(_)));
}

#[test]
fn test_depth_default_and_passthrough() {
    let h = Harness::new();
    let raw = RawOptions::from([(OPT_SERIALIZERS, json!(true))]);
    h.run(Some(&app("blog")), "1.8", &raw).unwrap();
    assert_eq!(h.calls(), vec!["serializers:0"]);

    let h = Harness::new();
    let raw = RawOptions::from([(OPT_SERIALIZERS, json!(true)), (OPT_DEPTH, json!(2))]);
    h.run(Some(&app("blog")), "1.8", &raw).unwrap();
    assert_eq!(h.calls(), vec!["serializers:2"]);

    // argparse without a declared type hands depth over as a string
    let h = Harness::new();
    let raw = RawOptions::from([(OPT_DEPTH, json!("3"))]);
    h.run(Some(&app("blog")), "2.1", &raw).unwrap();
    assert_eq!(h.calls()[0], "serializers:3");
}

#[test]
fn test_settings_reach_generator() {
    let h = Harness::new();
    let raw = RawOptions::from([
        (OPT_FORCE, json!(true)),
        (OPT_PREFIX, json!("api_")),
        (OPT_WRITE, json!(true)),
    ]);
    h.run(Some(&app("blog")), "2.2", &raw).unwrap();
    let built = h.built.borrow();
    let (_, settings) = &built[0];
    assert!(settings.force);
    assert_eq!(settings.prefix.as_deref(), Some("api_"));
    assert_eq!(settings.family, FrameworkFamily::Django2);
    assert_eq!(settings.output_dir, Some(PathBuf::from("blog")));
}

#[test]
fn test_missing_keys_yield_defaults_for_every_family() {
    for family in [
        FrameworkFamily::Django17,
        FrameworkFamily::Django18,
        FrameworkFamily::Django2,
    ] {
        let opts = Options::normalize(&RawOptions::new(), family).unwrap();
        assert_eq!(opts, Options::default(), "{family}");
        assert_eq!(opts.selection(), OutputSelection::All);
    }
}

#[test]
fn test_null_values_are_missing() {
    let raw = RawOptions::from([(OPT_PREFIX, json!(null)), (OPT_FORCE, json!(null))]);
    let opts = Options::normalize(&raw, FrameworkFamily::Django18).unwrap();
    assert_eq!(opts.prefix, None);
    assert!(!opts.force);
}

#[test]
fn test_legacy_string_booleans() {
    let raw = RawOptions::from([
        (OPT_FORCE, json!("True")),
        (OPT_VIEWS, json!("1")),
        (OPT_URLS, json!("no")),
        (OPT_DEPTH, json!("2")),
    ]);
    let opts = Options::normalize(&raw, FrameworkFamily::Django17).unwrap();
    assert!(opts.force);
    assert!(opts.views);
    assert!(!opts.urls);
    assert_eq!(opts.depth, 2);
    assert_eq!(opts.selection(), OutputSelection::Views);
}

#[test]
fn test_argparse_families_reject_string_booleans() {
    let raw = RawOptions::from([(OPT_FORCE, json!("True"))]);
    for family in [FrameworkFamily::Django18, FrameworkFamily::Django2] {
        let err = Options::normalize(&raw, family).unwrap_err();
        assert!(matches!(err, CommandError::Argument(_)));
        assert!(err.message().contains("'force'"));
    }
}

#[test]
fn test_invalid_depth_and_prefix() {
    for bad in [json!(-1), json!("deep"), json!(1.5), json!(true)] {
        let raw = RawOptions::from([(OPT_DEPTH, bad)]);
        assert!(matches!(
            Options::normalize(&raw, FrameworkFamily::Django18),
            Err(CommandError::Argument(_))
        ));
    }
    let raw = RawOptions::from([(OPT_PREFIX, json!("api-v1"))]);
    assert!(Options::normalize(&raw, FrameworkFamily::Django18).is_err());
    let raw = RawOptions::from([(OPT_PREFIX, json!("1api_"))]);
    let err = Options::normalize(&raw, FrameworkFamily::Django18).unwrap_err();
    assert!(matches!(err, CommandError::Argument(_)));
    assert!(err.message().contains("'1api_'"));
    let raw = RawOptions::from([(OPT_PREFIX, json!(""))]);
    assert_eq!(
        Options::normalize(&raw, FrameworkFamily::Django18).unwrap().prefix,
        None
    );
}

#[test]
fn test_merged_prefers_overlay() {
    let defaults = RawOptions::from([(OPT_FORMAT, json!("apiview")), (OPT_DEPTH, json!(1))]);
    let flags = RawOptions::from([(OPT_DEPTH, json!(3))]);
    let merged = defaults.merged(flags);
    let opts = Options::normalize(&merged, FrameworkFamily::Django18).unwrap();
    assert_eq!(opts.format, ViewFormat::ApiView);
    assert_eq!(opts.depth, 3);
}
