use anyhow::Result;
use clap::Args;
use lotview_client::{ApiClient, ClientConfig};

#[derive(Args)]
pub struct DeleteCameraArgs {
    /// Camera id to remove
    pub camera_id: u64,
}

pub fn run(config: &ClientConfig, args: &DeleteCameraArgs) -> Result<()> {
    let client = ApiClient::new(config)?;
    client.delete_camera(args.camera_id)?;
    println!("Deleted camera {}", args.camera_id);
    Ok(())
}
