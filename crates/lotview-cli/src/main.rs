mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lotview_client::ClientConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lotview", about = "Parking monitor operator tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Client config file
    #[arg(long, global = true, default_value = "lotview.toml")]
    config: PathBuf,

    /// Override the backend base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override the CSRF token
    #[arg(long, global = true)]
    csrf_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a camera and print the id to calibrate
    AddCamera(commands::add_camera::AddCameraArgs),
    /// Submit a calibration (region list JSON + reference frame)
    Submit(commands::submit::SubmitArgs),
    /// Show slot occupancy for a camera
    Status(commands::status::StatusArgs),
    /// Save one frame from a camera feed
    Snapshot(commands::snapshot::SnapshotArgs),
    /// Remove a camera
    DeleteCamera(commands::delete_camera::DeleteCameraArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = ClientConfig::load_or_default(&cli.config)?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(token) = cli.csrf_token {
        config.csrf_token = token;
    }

    match &cli.command {
        Commands::AddCamera(args) => commands::add_camera::run(&config, args),
        Commands::Submit(args) => commands::submit::run(&config, args),
        Commands::Status(args) => commands::status::run(&config, args),
        Commands::Snapshot(args) => commands::snapshot::run(&config, args),
        Commands::DeleteCamera(args) => commands::delete_camera::run(&config, args),
    }
}
