//! Landon CLI: export anchor snapshots to geometry files.
//!
//! Usage:
//!   landon capture <SNAPSHOT>          Export a saved anchor snapshot
//!   landon formats                     List export formats
//!   landon destination select <DIR>    Choose where exports are written
//!   landon destination show            Show the export destination
//!   landon destination clear           Forget the selected destination
//!   landon check                       Check export directories

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use landon_capture_engine::ExportFormat;
use landon_common::config::{AppConfig, ExportMode, LoggingConfig};

mod commands;
mod context;

#[derive(Parser)]
#[command(
    name = "landon",
    about = "Capture tracked AR anchors as portable geometry files",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every anchor group of a saved snapshot
    Capture {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Export format: drc|obj
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Export mode: batch|largest-mesh
        #[arg(short, long, value_parser = parse_mode)]
        mode: Option<ExportMode>,

        /// Print capture events as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// List supported export formats
    Formats,

    /// Manage the export destination
    Destination {
        #[command(subcommand)]
        action: DestinationAction,
    },

    /// Check that export directories are usable
    Check,
}

#[derive(Subcommand)]
enum DestinationAction {
    /// Select a directory for future exports
    Select {
        /// Directory to export into
        path: PathBuf,
    },

    /// Show the current export destination
    Show,

    /// Forget the selected destination and use the default directory
    Clear,
}

fn parse_mode(value: &str) -> Result<ExportMode, String> {
    match value.to_ascii_lowercase().as_str() {
        "batch" => Ok(ExportMode::Batch),
        "largest-mesh" | "largest_mesh" => Ok(ExportMode::LargestMesh),
        other => Err(format!(
            "unknown export mode '{other}' (expected batch or largest-mesh)"
        )),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging = LoggingConfig {
            level: "debug".to_string(),
            ..logging
        };
    }
    landon_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Capture {
            snapshot,
            format,
            mode,
            json,
        } => commands::capture::run(&config, snapshot, format, mode, json).await,
        Commands::Formats => commands::formats::run(&config),
        Commands::Destination { action } => match action {
            DestinationAction::Select { path } => commands::destination::select(&config, path),
            DestinationAction::Show => commands::destination::show(&config),
            DestinationAction::Clear => commands::destination::clear(&config),
        },
        Commands::Check => commands::check::run(&config),
    }
}
