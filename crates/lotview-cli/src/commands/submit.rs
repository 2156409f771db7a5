use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::style;
use lotview_client::encode::jpeg_data_url;
use lotview_client::{ApiClient, ClientConfig};
use lotview_core::api::CalibrationUpload;
use lotview_core::session::Region;

#[derive(Args)]
pub struct SubmitArgs {
    /// Target camera id
    pub camera_id: u64,

    /// Region list JSON: an array of { number, x, y, w, h } in native pixels
    pub regions: PathBuf,

    /// Reference frame JPEG captured from the same camera
    #[arg(long)]
    pub reference: PathBuf,
}

pub fn run(config: &ClientConfig, args: &SubmitArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.regions)
        .with_context(|| format!("reading {}", args.regions.display()))?;
    let spaces: Vec<Region> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.regions.display()))?;
    if spaces.is_empty() {
        bail!("region list is empty; nothing to submit");
    }

    let jpeg = std::fs::read(&args.reference)
        .with_context(|| format!("reading {}", args.reference.display()))?;

    let upload = CalibrationUpload {
        spaces,
        reference_frame: jpeg_data_url(&jpeg),
    };

    let client = ApiClient::new(config)?;
    client.save_calibration(args.camera_id, &upload)?;

    println!(
        "{} {} regions for camera {}",
        style("Saved").green().bold(),
        upload.spaces.len(),
        args.camera_id
    );
    Ok(())
}
