use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spacebook_core::config::Config;
use spacebook_core::logging::{init_logging_with_config, LogLevel};
use spacebook_core::metrics::init_metrics;
use spacebook_core::SpaceManagerImpl;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::{debug, info};

mod batch;
mod session;

use session::Session;

#[derive(Parser, Debug)]
#[command(name = "spacebook")]
#[command(author, version, about = "Manage users, bookable spaces and bookings", long_about = None)]
struct Args {
    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable JSON formatted logging
    #[arg(long)]
    json_logs: bool,

    /// Read settings from a TOML file instead of the environment
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to execute; interactive mode when omitted
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a backup and export one user's bookings
    Export {
        /// Backup file to load the data from
        #[arg(short = 'b', long)]
        backup_file: PathBuf,

        /// File to write the bookings report to
        #[arg(short = 'e', long)]
        export_file: PathBuf,

        /// User whose bookings are exported
        #[arg(short = 'u', long)]
        username: String,
    },

    /// Menu-driven session
    Interactive,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::from_env().context("loading configuration from environment")?,
    };

    if let Some(level) = &args.log_level {
        let level = LogLevel::parse(level).unwrap_or_else(|| {
            eprintln!("Invalid log level '{}', using 'warn'", level);
            LogLevel::Warn
        });
        config.logging.level = level.to_string();
    }
    if args.json_logs {
        config.logging.json_format = true;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    init_logging_with_config(config.logging.to_log_config()?)?;
    init_metrics();
    debug!(?config, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Some(Command::Export {
            backup_file,
            export_file,
            username,
        }) => {
            info!(user = %username, "batch export started");
            batch::run_export(&mut out, &backup_file, &export_file, &username)?;
        }
        Some(Command::Interactive) | None => {
            let stdin = io::stdin();
            let input: Box<dyn BufRead> = Box::new(stdin.lock());
            let mut session = Session::new(SpaceManagerImpl::new(), input, &mut out, config.store);
            session.run()?;
        }
    }

    Ok(())
}
