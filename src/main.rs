//! CLI entry point for the snapshot listener.
//!
//! Runs single project evaluations through the listener pipeline, inspects
//! written snapshots and manages settings.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use razorsnap::engine::DefaultProjectEngineFactory;
use razorsnap::tag_helpers::{EmptyTagHelperResolver, StaticTagHelperResolver};
use razorsnap::workspace::{InMemoryProjectModelStore, ProjectModel};
use razorsnap::{
    ConfigurationSelector, EventOutcome, ProjectId, ProjectInstance, ProjectLoadListener,
    ProjectLoadedEvent, Settings, SnapshotError, SnapshotWriter, TagHelperResolver,
};
use std::path::PathBuf;
use std::sync::Arc;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

#[derive(Parser)]
#[command(
    name = "razorsnap",
    version,
    about = "Persist Razor project configuration snapshots",
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Set up .razorsnap directory with default configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Run one evaluated project through the listener
    Snapshot {
        /// JSON project description ({"properties": {..}, "items": {..}})
        project: PathBuf,

        /// JSON array of tag helper descriptors to report for the project
        #[arg(long)]
        tag_helpers: Option<PathBuf>,

        /// Register a workspace project model for the event, with this assembly name
        #[arg(long, value_name = "ASSEMBLY_NAME")]
        model: Option<String>,
    },

    /// Summarize a written project.razor.json
    Show {
        /// Path to the snapshot document
        path: PathBuf,
    },

    /// Display active settings
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path).map_err(|e| {
            anyhow::anyhow!("Configuration error loading from {}: {e}", path.display())
        })?,
        None => Settings::load().unwrap_or_else(|e| {
            eprintln!("Configuration error: {e}");
            Settings::default()
        }),
    };

    setup_tracing(&settings, cli.verbose);
    install_panic_hook();

    match cli.command {
        Commands::Init { force } => {
            let cwd = std::env::current_dir()?;
            let path = Settings::init_config_file(&cwd, force)
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            println!("Created default configuration at: {}", path.display());
        }
        Commands::Snapshot {
            project,
            tag_helpers,
            model,
        } => {
            let outcome = run_snapshot(&settings, project, tag_helpers, model).await?;
            match outcome {
                EventOutcome::Written(path) => println!("Wrote {}", path.display()),
                EventOutcome::Skipped(reason) => println!("Skipped: {reason}"),
                EventOutcome::WriteFailed(path) => {
                    println!("Could not write {}", path.display());
                    std::process::exit(1);
                }
                EventOutcome::Failed => {
                    println!("Snapshot failed, see log output");
                    std::process::exit(1);
                }
            }
        }
        Commands::Show { path } => {
            let snapshot = match SnapshotWriter::load(&path) {
                Ok(snapshot) => snapshot,
                Err(e) => exit_with_error(&e),
            };
            println!("Project:          {}", snapshot.project_file_path);
            println!("Target framework: {}", snapshot.target_framework);
            match &snapshot.configuration {
                Some(configuration) => {
                    let extensions: Vec<_> = configuration
                        .extensions
                        .iter()
                        .map(|e| e.extension_name.as_str())
                        .collect();
                    println!(
                        "Configuration:    {} (language {}, extensions: {})",
                        configuration.configuration_name,
                        configuration.language_version,
                        extensions.join(", ")
                    );
                }
                None => println!("Configuration:    unknown"),
            }
            println!("Tag helpers:      {}", snapshot.tag_helpers.len());
        }
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}

async fn run_snapshot(
    settings: &Settings,
    project_path: PathBuf,
    tag_helpers: Option<PathBuf>,
    model: Option<String>,
) -> anyhow::Result<EventOutcome> {
    let instance = match ProjectInstance::load(&project_path) {
        Ok(instance) => instance,
        Err(e) => exit_with_error(&e),
    };
    let id = ProjectId::new(project_path.display().to_string());

    let resolver: Arc<dyn TagHelperResolver> = match tag_helpers {
        Some(path) => match StaticTagHelperResolver::from_file(&path) {
            Ok(resolver) => Arc::new(resolver),
            Err(e) => exit_with_error(&e),
        },
        None => Arc::new(EmptyTagHelperResolver),
    };

    let models = Arc::new(InMemoryProjectModelStore::new());
    if let Some(assembly_name) = model {
        models.insert(ProjectModel::new(id.clone(), assembly_name));
    }

    let listener = Arc::new(ProjectLoadListener::new(
        settings,
        Arc::new(ConfigurationSelector::default()),
        Arc::new(DefaultProjectEngineFactory),
        resolver,
        models,
    ));

    let outcome = listener
        .on_project_loaded(ProjectLoadedEvent::new(id, instance))
        .await?;
    Ok(outcome)
}

/// Print the error with its recovery suggestions and exit
fn exit_with_error(error: &SnapshotError) -> ! {
    eprintln!("Error: {error}");
    for suggestion in error.recovery_suggestions() {
        eprintln!("  Suggestion: {suggestion}");
    }
    std::process::exit(1);
}

/// Route panics through tracing instead of the default stderr report.
///
/// Panics on event tasks are already reported once by the listener, so they
/// are only echoed at debug level here.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        if std::thread::current().name() == Some("main") {
            tracing::error!(panic = %info, "razorsnap panicked");
        } else {
            tracing::debug!(panic = %info, "Event task panicked");
        }
    }));
}

fn setup_tracing(settings: &Settings, verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("razorsnap=debug,info")
        } else {
            EnvFilter::new(format!("razorsnap={},warn", settings.logging.level))
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
