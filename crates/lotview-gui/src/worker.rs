//! Network worker thread.
//!
//! All HTTP happens here so the UI never blocks; commands arrive over an
//! mpsc channel and every result triggers a repaint. When idle, the loop
//! wakes on the configured interval to poll occupancy for the watched
//! camera; each poll is stamped with a monotonic sequence number so the UI
//! can discard responses that arrive out of send order.

use std::sync::mpsc;

use lotview_client::encode::jpeg_data_url;
use lotview_client::poll::PollSequencer;
use lotview_client::{ApiClient, ClientConfig};

use crate::convert::jpeg_to_color_image;
use crate::messages::{NetCommand, NetEvent};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    event_tx: mpsc::Sender<NetEvent>,
    ctx: egui::Context,
    config: ClientConfig,
) -> mpsc::Sender<NetCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<NetCommand>();

    std::thread::Builder::new()
        .name("lotview-net".into())
        .spawn(move || {
            worker_loop(cmd_rx, event_tx, ctx, config);
        })
        .expect("Failed to spawn network worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<NetEvent>, ctx: &egui::Context, event: NetEvent) {
    let _ = tx.send(event);
    ctx.request_repaint();
}

fn send_error(tx: &mpsc::Sender<NetEvent>, ctx: &egui::Context, message: impl Into<String>) {
    send(tx, ctx, NetEvent::Error { message: message.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<NetCommand>,
    tx: mpsc::Sender<NetEvent>,
    ctx: egui::Context,
    config: ClientConfig,
) {
    let client = match ApiClient::new(&config) {
        Ok(client) => client,
        Err(err) => {
            send_error(&tx, &ctx, format!("cannot reach backend: {err}"));
            return;
        }
    };

    let interval = config.poll_interval();
    let mut watched: Option<u64> = None;
    let mut sequencer = PollSequencer::new();
    let mut poll_failing = false;

    loop {
        match cmd_rx.recv_timeout(interval) {
            Ok(cmd) => handle_command(cmd, &client, &mut watched, &tx, &ctx),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if let Some(camera_id) = watched {
                    poll_once(
                        &client,
                        camera_id,
                        &mut sequencer,
                        &mut poll_failing,
                        &tx,
                        &ctx,
                    );
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn handle_command(
    cmd: NetCommand,
    client: &ApiClient,
    watched: &mut Option<u64>,
    tx: &mpsc::Sender<NetEvent>,
    ctx: &egui::Context,
) {
    match cmd {
        NetCommand::CreateCamera { camera } => match client.create_camera(&camera) {
            Ok(created) => send(
                tx,
                ctx,
                NetEvent::CameraCreated {
                    camera_id: created.camera_id,
                    name: camera.name,
                },
            ),
            Err(err) => send_error(tx, ctx, format!("camera creation failed: {err}")),
        },

        NetCommand::SaveCalibration { camera_id, upload } => {
            match client.save_calibration(camera_id, &upload) {
                Ok(()) => send(tx, ctx, NetEvent::CalibrationSaved { camera_id }),
                Err(err) => send_error(tx, ctx, format!("calibration save failed: {err}")),
            }
        }

        NetCommand::DeleteCamera { camera_id } => match client.delete_camera(camera_id) {
            Ok(()) => send(tx, ctx, NetEvent::CameraDeleted { camera_id }),
            Err(err) => send_error(tx, ctx, format!("camera deletion failed: {err}")),
        },

        NetCommand::FetchSnapshot { camera_id } => match fetch_snapshot(client, camera_id) {
            Ok((image, data_url)) => send(
                tx,
                ctx,
                NetEvent::Snapshot {
                    camera_id,
                    image,
                    data_url,
                },
            ),
            Err(err) => send_error(tx, ctx, format!("snapshot failed: {err}")),
        },

        NetCommand::WatchCamera { camera_id } => {
            *watched = camera_id;
        }
    }
}

fn fetch_snapshot(
    client: &ApiClient,
    camera_id: u64,
) -> anyhow::Result<(egui::ColorImage, String)> {
    let jpeg = client.snapshot(camera_id)?;
    let image = jpeg_to_color_image(&jpeg)?;
    Ok((image, jpeg_data_url(&jpeg)))
}

fn poll_once(
    client: &ApiClient,
    camera_id: u64,
    sequencer: &mut PollSequencer,
    poll_failing: &mut bool,
    tx: &mpsc::Sender<NetEvent>,
    ctx: &egui::Context,
) {
    let seq = sequencer.issue();
    match client.spaces_status(camera_id) {
        Ok(status) => {
            if *poll_failing {
                tracing::info!(camera_id, "occupancy poll recovered");
                *poll_failing = false;
            }
            send(
                tx,
                ctx,
                NetEvent::Status {
                    camera_id,
                    seq,
                    status,
                },
            );
        }
        Err(err) => {
            // Report the first failure of a streak, then stay quiet until
            // the poll recovers.
            if !*poll_failing {
                *poll_failing = true;
                send_error(tx, ctx, format!("occupancy poll failed: {err}"));
            } else {
                tracing::debug!(camera_id, %err, "occupancy poll still failing");
            }
        }
    }
}
