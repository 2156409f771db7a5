use std::time::Duration;

use anyhow::Result;
use clap::Args;
use console::style;
use lotview_client::{ApiClient, ClientConfig};
use lotview_core::api::SpacesStatus;

#[derive(Args)]
pub struct StatusArgs {
    /// Camera id to query
    pub camera_id: u64,

    /// Poll continuously at the configured interval
    #[arg(long)]
    pub watch: bool,
}

pub fn run(config: &ClientConfig, args: &StatusArgs) -> Result<()> {
    let client = ApiClient::new(config)?;

    if !args.watch {
        let status = client.spaces_status(args.camera_id)?;
        print_status(&status);
        return Ok(());
    }

    watch(&client, args.camera_id, config.poll_interval())
}

fn watch(client: &ApiClient, camera_id: u64, interval: Duration) -> Result<()> {
    let mut tick: u64 = 0;
    loop {
        tick += 1;
        match client.spaces_status(camera_id) {
            Ok(status) => {
                println!("{}", style(format!("-- poll #{tick} --")).dim());
                print_status(&status);
            }
            Err(err) => {
                // A failed poll only affects this tick; keep going.
                eprintln!("{} {err}", style("poll failed:").red());
            }
        }
        std::thread::sleep(interval);
    }
}

fn print_status(status: &SpacesStatus) {
    if status.spaces.is_empty() {
        println!("No calibrated spaces reported.");
        return;
    }
    for space in &status.spaces {
        let state = if space.occupied {
            style("occupied").red()
        } else {
            style("available").green()
        };
        println!("Slot {:>3}  {state}", space.number);
    }
}
