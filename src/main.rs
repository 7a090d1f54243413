//! Studio Dashboard - CLI entry point
//!
//! Hosts the layout engine: an interactive terminal editor plus a few
//! non-interactive commands for inspecting and resetting an organization's
//! stored layout.

use clap::{Parser, Subcommand};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use studio_dashboard::config::{default, xdg, Config, ConfigLoader};
use studio_dashboard::grid::GridRenderer;
use studio_dashboard::logging::{self, LogTarget};
use studio_dashboard::notify::LogNotifier;
use studio_dashboard::settings::{validate_org_id, FileSettings};
use studio_dashboard::store::LayoutStore;
use studio_dashboard::tui::app::App;

/// File name of the editor log inside the data directory.
const EDITOR_LOG_FILE: &str = "sdash.log";

/// Studio Dashboard layout editor
#[derive(Parser)]
#[command(name = "sdash")]
#[command(version, about = "Dashboard widget layout editor")]
struct Cli {
    /// Configuration file (defaults to the XDG location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the per-organization settings files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the sdash CLI
#[derive(Subcommand)]
enum Commands {
    /// Open the interactive layout editor
    Edit {
        /// Organization whose layout is edited
        #[arg(long)]
        org: Option<String>,
    },

    /// Print the widgets in render order
    Show {
        /// Organization whose layout is shown
        #[arg(long)]
        org: Option<String>,
    },

    /// Print the stored layout as JSON
    Export {
        /// Organization whose layout is exported
        #[arg(long)]
        org: Option<String>,
    },

    /// Replace the stored layout with the default one
    Reset {
        /// Organization whose layout is reset
        #[arg(long)]
        org: Option<String>,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

/// Settings shared by every layout command once config and flags are merged.
struct Session {
    org: String,
    data_dir: PathBuf,
    config: Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (org, interactive) = match &cli.command {
        Commands::Config { action } => {
            init_logging(&Config::default(), LogTarget::Stderr);
            return run_config_command(action, cli.config.as_deref());
        }
        Commands::Edit { org } => (org.clone(), true),
        Commands::Show { org } | Commands::Export { org } | Commands::Reset { org } => {
            (org.clone(), false)
        }
    };

    let session = match resolve_session(&cli, org) {
        Ok(session) => session,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::FAILURE;
        }
    };

    let target = log_target(&session, interactive);
    init_logging(&session.config, target);

    match cli.command {
        Commands::Edit { .. } => run_edit_command(&session),
        Commands::Show { .. } => run_show_command(&session),
        Commands::Export { .. } => run_export_command(&session),
        Commands::Reset { .. } => run_reset_command(&session),
        Commands::Config { .. } => ExitCode::SUCCESS,
    }
}

/// Loads the config file and merges it with the command-line flags.
fn resolve_session(cli: &Cli, org: Option<String>) -> Result<Session, String> {
    let config = ConfigLoader::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;

    let org = org.unwrap_or_else(|| config.dashboard.organization.clone());
    validate_org_id(&org).map_err(|e| e.to_string())?;

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.storage.data_dir());

    Ok(Session {
        org,
        data_dir,
        config,
    })
}

/// The editor owns the screen, so it always logs to a file.
fn log_target(session: &Session, interactive: bool) -> LogTarget {
    let file = &session.config.logging.file;
    if !file.is_empty() {
        LogTarget::File(xdg::expand_tilde(file))
    } else if interactive {
        LogTarget::File(session.data_dir.join(EDITOR_LOG_FILE))
    } else {
        LogTarget::Stderr
    }
}

fn init_logging(config: &Config, target: LogTarget) {
    if let Err(e) = logging::init(config.logging.level, &target) {
        eprintln!("Warning: failed to open log file: {}", e);
    }
}

/// Runs `future` on a fresh multi-thread runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output, std::io::Error> {
    let rt = tokio::runtime::Runtime::new()?;
    Ok(rt.block_on(future))
}

fn open_store(session: &Session) -> LayoutStore<FileSettings, LogNotifier> {
    LayoutStore::new(
        session.org.clone(),
        Arc::new(FileSettings::new(&session.data_dir)),
        Arc::new(LogNotifier),
    )
}

fn run_edit_command(session: &Session) -> ExitCode {
    let tick_rate = match session.config.dashboard.tick_rate() {
        Ok(rate) => rate,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        "opening layout editor for {} ({})",
        session.org,
        session.data_dir.display()
    );

    let result = block_on(async {
        let settings = Arc::new(FileSettings::new(&session.data_dir));
        let mut app = App::new(session.org.clone(), settings, tick_rate);
        app.run().await
    });
    match result {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) | Err(e) => {
            eprintln!("TUI error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Prints one line per rendered widget: `id type x,y w×h`.
fn run_show_command(session: &Session) -> ExitCode {
    let result = block_on(async {
        let mut store = open_store(session);
        store.load().await;
        store
    });
    let store = match result {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for item in GridRenderer::default().items(store.layout()) {
        let g = item.geometry;
        println!(
            "{} {} {},{} {}×{}",
            item.widget.id, item.widget.widget_type, g.x, g.y, g.w, g.h
        );
    }
    ExitCode::SUCCESS
}

fn run_export_command(session: &Session) -> ExitCode {
    let result = block_on(async {
        let mut store = open_store(session);
        store.load().await;
        serde_json::to_string_pretty(store.layout())
    });
    match result {
        Ok(Ok(json)) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            eprintln!("Error: failed to encode layout: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_reset_command(session: &Session) -> ExitCode {
    let result = block_on(async {
        let mut store = open_store(session);
        store.reset_to_default();
        store.save_layout().await
    });
    match result {
        Ok(Ok(())) => {
            println!("Reset dashboard layout for {}", session.org);
            ExitCode::SUCCESS
        }
        Ok(Err(e)) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: failed to start runtime: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_config_command(action: &ConfigAction, config_path: Option<&Path>) -> ExitCode {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(xdg::config_path);
    let result = match action {
        ConfigAction::Init { force } => {
            default::create_default_config(&path, *force).map(|()| {
                println!("Created configuration at {}", path.display());
            })
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Validate => ConfigLoader::load(config_path).and_then(|config| {
            config.validate()?;
            println!("Configuration is valid");
            println!("{config:#?}");
            Ok(())
        }),
    };
    if let Err(e) = result {
        eprintln!("Config error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
