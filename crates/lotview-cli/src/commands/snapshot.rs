use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lotview_client::{ApiClient, ClientConfig};

#[derive(Args)]
pub struct SnapshotArgs {
    /// Camera id to grab a frame from
    pub camera_id: u64,

    /// Output JPEG path
    #[arg(short, long, default_value = "snapshot.jpg")]
    pub output: PathBuf,
}

pub fn run(config: &ClientConfig, args: &SnapshotArgs) -> Result<()> {
    let client = ApiClient::new(config)?;
    let frame = client.snapshot(args.camera_id)?;

    std::fs::write(&args.output, &frame)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Wrote {} ({} bytes)", args.output.display(), frame.len());
    Ok(())
}
