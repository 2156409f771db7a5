use anyhow::Result;
use clap::Args;
use console::style;
use lotview_client::{ApiClient, ClientConfig};
use lotview_core::api::{CameraType, NewCamera};

#[derive(Args)]
pub struct AddCameraArgs {
    /// Display name for the camera
    #[arg(long)]
    pub name: String,

    /// Camera type: "video" or "ip"
    #[arg(long = "type", default_value = "video")]
    pub kind: CameraType,

    /// Stream URL (required for ip cameras)
    #[arg(long, default_value = "")]
    pub url: String,
}

pub fn run(config: &ClientConfig, args: &AddCameraArgs) -> Result<()> {
    let client = ApiClient::new(config)?;
    let created = client.create_camera(&NewCamera {
        name: args.name.clone(),
        kind: args.kind,
        url: args.url.clone(),
    })?;

    println!(
        "Created camera {} ({})",
        style(created.camera_id).green().bold(),
        args.name
    );
    println!("Calibrate it with: lotview submit {} <regions.json> --reference <frame.jpg>", created.camera_id);
    Ok(())
}
