use crate::app::{load_manifest, ProjectManifest};
use crate::command::{
    CommandError, GenerateCommand, RawOptions, OPT_DEPTH, OPT_FORCE, OPT_FORMAT, OPT_PREFIX,
    OPT_SERIALIZERS, OPT_URLS, OPT_VIEWS, OPT_WRITE,
};
use crate::logging::{init_logging, LogConfig, LOG_FORMAT_ENV};
use crate::runtime_config::HostRuntime;
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// Command-line interface for drf-gen
#[derive(Parser, Debug)]
#[command(name = "drf-gen", version)]
#[command(
    about = "Generate Django REST Framework serializers, views and urls",
    long_about = None
)]
pub struct Cli {
    /// Project manifest declaring runtime versions and apps (YAML or JSON)
    #[arg(
        long,
        global = true,
        env = "DRFGEN_MANIFEST",
        default_value = "drf_project.yaml"
    )]
    pub manifest: PathBuf,

    /// Log output format: pretty or json
    #[arg(long, global = true, env = LOG_FORMAT_ENV, default_value = "pretty")]
    pub log_format: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate DRF API views and serializers for an app
    Generate(GenerateArgs),
    /// List the runtime and the apps declared in the manifest
    Inspect,
}

/// Arguments of `generate`
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// App label(s); only the first one is processed
    #[arg(required = true, num_args = 1..)]
    pub apps: Vec<String>,

    /// View format: viewset, modelviewset, apiview or function (default: viewset)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Serialization depth (default: 0)
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Force overwrite of existing files
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// Generate serializers only
    #[arg(long, default_value_t = false)]
    pub serializers: bool,

    /// Generate views only
    #[arg(long, default_value_t = false)]
    pub views: bool,

    /// Generate urls only
    #[arg(long, default_value_t = false)]
    pub urls: bool,

    /// A prefix to add to generated module names
    #[arg(long)]
    pub prefix: Option<String>,

    /// Write the modules into the app directory instead of printing them
    #[arg(long, default_value_t = false)]
    pub write: bool,
}

impl GenerateArgs {
    /// Options given on the command line. Unset flags are left out so the
    /// manifest's defaults can apply.
    pub fn to_raw(&self) -> RawOptions {
        let mut raw = RawOptions::new();
        if let Some(format) = &self.format {
            raw.insert(OPT_FORMAT, format.as_str());
        }
        if let Some(depth) = self.depth {
            raw.insert(OPT_DEPTH, depth);
        }
        if let Some(prefix) = &self.prefix {
            raw.insert(OPT_PREFIX, prefix.as_str());
        }
        for (key, set) in [
            (OPT_FORCE, self.force),
            (OPT_SERIALIZERS, self.serializers),
            (OPT_VIEWS, self.views),
            (OPT_URLS, self.urls),
            (OPT_WRITE, self.write),
        ] {
            if set {
                raw.insert(key, true);
            }
        }
        raw
    }
}

/// Parse the command line, set up logging and run.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded, a precondition fails,
/// or generation fails
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::with_format(&cli.log_format))?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}

/// Run an already-parsed command, writing results to `out`.
///
/// # Errors
///
/// See [`run_cli`].
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    let manifest = load_manifest(&cli.manifest)?;
    match &cli.command {
        Commands::Generate(args) => {
            let text = generate(&manifest, args)?;
            writeln!(out, "{text}")?;
        }
        Commands::Inspect => inspect(&manifest, out)?,
    }
    Ok(())
}

fn generate(manifest: &ProjectManifest, args: &GenerateArgs) -> anyhow::Result<String> {
    let Some((label, rest)) = args.apps.split_first() else {
        return Err(CommandError::Usage(crate::command::NO_APP_MESSAGE.to_string()).into());
    };
    if !rest.is_empty() {
        tracing::warn!(ignored = ?rest, "only the first app label is processed");
    }
    let app = manifest.app(label).ok_or_else(|| {
        CommandError::Usage(format!(
            "App with label '{label}' could not be found. Is it declared in the manifest?"
        ))
    })?;

    let runtime = HostRuntime::from_env(&manifest.runtime);
    let raw = RawOptions::from(manifest.options.clone()).merged(args.to_raw());
    GenerateCommand::new(Some(app), runtime, manifest.app_dir(app)).handle(&raw)
}

fn inspect<W: Write>(manifest: &ProjectManifest, out: &mut W) -> anyhow::Result<()> {
    let runtime = HostRuntime::from_env(&manifest.runtime);
    let family = runtime
        .check_django()
        .map_or_else(|e| format!("unsupported: {e}"), |f| f.to_string());
    writeln!(
        out,
        "runtime: python {}, django {} ({family})",
        runtime.python.as_deref().unwrap_or("?"),
        runtime.django.as_deref().unwrap_or("?"),
    )?;
    for app in &manifest.apps {
        match app.models_module() {
            None => writeln!(out, "{} ({}): no models module", app.label, app.module_name())?,
            Some(_) => {
                let models = app.concrete_models();
                writeln!(
                    out,
                    "{} ({}): {} model(s)",
                    app.label,
                    app.module_name(),
                    models.len()
                )?;
                for model in models {
                    writeln!(
                        out,
                        "  - {} ({} fields, {} relations)",
                        model.name,
                        model.fields.len(),
                        model.relations().count()
                    )?;
                }
            }
        }
    }
    Ok(())
}
