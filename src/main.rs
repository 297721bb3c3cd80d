//! ufwtui - terminal front-end for ufw
//!
//! # Usage
//!
//! ```bash
//! sudo ufwtui                      # Use <data dir>/config.json
//! sudo ufwtui --config ./ufwtui.json
//! ```
//!
//! # Bootstrap
//!
//! The program must run as root and the configured tool must answer
//! `<tool> status` before the terminal is taken over. Either failure prints a
//! message on stderr and exits with status 1.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use ufwtui::app::handlers::effects::Backend;
use ufwtui::audit::AuditLog;
use ufwtui::config::{self, AppConfig};
use ufwtui::core::ufw::{ShellRunner, Ufw, check_available};
use ufwtui::{tui, utils};

#[derive(Parser)]
#[command(name = "ufwtui", version)]
#[command(about = "Terminal front-end for ufw rules, profiles and default policies", long_about = None)]
struct Cli {
    /// Configuration file (default: <data dir>/config.json)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !nix::unistd::geteuid().is_root() {
        eprintln!("ufwtui must be run as root (try: sudo ufwtui)");
        return ExitCode::FAILURE;
    }

    let _ = utils::ensure_dirs();
    init_logging();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    runtime.block_on(run(cli))
}

/// Logs go to a file; the terminal belongs to the interface
fn init_logging() {
    let Some(mut log_path) = utils::get_state_dir() else {
        return;
    };
    log_path.push("ufwtui.log");
    if let Ok(file) = std::fs::File::create(log_path) {
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .init();
    }
}

async fn run(cli: Cli) -> ExitCode {
    let config = load_config(cli.config).await;

    let ufw = Ufw::new(config.tool.clone());
    if let Err(e) = check_available(&ufw) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let export_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut backend = Backend::new(ShellRunner, config.clone(), export_dir);
    if config.audit_log_enabled {
        match AuditLog::new() {
            Ok(audit) => backend = backend.with_audit(audit),
            Err(e) => tracing::warn!("Audit log disabled: {e}"),
        }
    }

    tracing::info!("Starting with tool '{}'", config.tool);
    match tui::run(&config, backend).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads `path` or the default location. A missing default file is created
/// with the defaults so there is something to edit.
async fn load_config(path: Option<PathBuf>) -> AppConfig {
    if let Some(path) = path {
        return config::load_config(&path).await;
    }

    let Some(path) = config::default_config_path() else {
        return AppConfig::default();
    };

    if tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return config::load_config(&path).await;
    }

    let config = AppConfig::default();
    if let Err(e) = config::save_config(&config, &path).await {
        tracing::warn!("Failed to write default config to {}: {e}", path.display());
    }
    config
}
