use std::sync::mpsc;

use lotview_client::ClientConfig;

use crate::messages::{NetCommand, NetEvent};
use crate::panels;
use crate::state::{CalibrationState, CameraEntry, DashboardState, Screen};
use crate::worker;

/// Keep the log bounded; old lines scroll away for good.
const MAX_LOG_LINES: usize = 200;

pub fn push_log(log: &mut Vec<String>, message: String) {
    log.push(message);
    if log.len() > MAX_LOG_LINES {
        let excess = log.len() - MAX_LOG_LINES;
        log.drain(..excess);
    }
}

/// Top-level controller: owns all view state and the channels to the
/// network worker. Constructed once; nothing here is ambient or global.
pub struct LotviewApp {
    pub cmd_tx: mpsc::Sender<NetCommand>,
    pub event_rx: mpsc::Receiver<NetEvent>,
    pub config: ClientConfig,
    pub screen: Screen,
    pub dashboard: DashboardState,
    pub calibration: Option<CalibrationState>,
    pub log_messages: Vec<String>,
}

impl LotviewApp {
    pub fn new(ctx: &egui::Context, config: ClientConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(event_tx, ctx.clone(), config.clone());

        let dashboard = DashboardState::from_config(&config);
        let app = Self {
            cmd_tx,
            event_rx,
            config,
            screen: Screen::Dashboard,
            dashboard,
            calibration: None,
            log_messages: Vec::new(),
        };

        if let Some(camera) = app.dashboard.current_camera() {
            let id = camera.id;
            app.send(NetCommand::WatchCamera { camera_id: Some(id) });
            app.send(NetCommand::FetchSnapshot { camera_id: id });
        }
        app
    }

    pub fn send(&self, cmd: NetCommand) {
        let _ = self.cmd_tx.send(cmd);
    }

    pub fn add_log(&mut self, message: String) {
        push_log(&mut self.log_messages, message);
    }

    /// Switch to the calibration view for one camera; occupancy polling
    /// pauses while calibrating.
    pub fn open_calibration(&mut self, camera_id: u64, camera_name: String) {
        self.send(NetCommand::WatchCamera { camera_id: None });
        self.send(NetCommand::FetchSnapshot { camera_id });
        self.calibration = Some(CalibrationState::new(camera_id, camera_name));
        self.screen = Screen::Calibration;
    }

    /// Back to the dashboard; resume polling the current camera.
    pub fn close_calibration(&mut self) {
        self.calibration = None;
        self.screen = Screen::Dashboard;
        let current = self.dashboard.current_camera().map(|c| c.id);
        self.send(NetCommand::WatchCamera { camera_id: current });
        if let Some(camera_id) = current {
            self.send(NetCommand::FetchSnapshot { camera_id });
        }
    }

    /// Called after the carousel moves: re-point polling and the preview.
    pub fn on_camera_switched(&mut self) {
        let current = self.dashboard.current_camera().map(|c| c.id);
        self.send(NetCommand::WatchCamera { camera_id: current });
        if let Some(camera_id) = current {
            self.send(NetCommand::FetchSnapshot { camera_id });
        }
    }

    /// Drain all pending worker events.
    fn poll_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                NetEvent::CameraCreated { camera_id, name } => {
                    self.add_log(format!("Camera \"{name}\" created (id {camera_id})"));
                    self.dashboard.cameras.push(CameraEntry {
                        id: camera_id,
                        name: name.clone(),
                    });
                    self.dashboard.current_index = self.dashboard.cameras.len() - 1;
                    self.dashboard.add_modal.reset();
                    // The original flow navigates straight to calibration.
                    self.open_calibration(camera_id, name);
                }

                NetEvent::CalibrationSaved { camera_id } => {
                    self.add_log(format!("Calibration saved for camera {camera_id}"));
                    self.close_calibration();
                }

                NetEvent::CameraDeleted { camera_id } => {
                    self.add_log(format!("Camera {camera_id} deleted"));
                    self.dashboard.remove_camera(camera_id);
                    self.on_camera_switched();
                }

                NetEvent::Snapshot {
                    camera_id,
                    image,
                    data_url,
                } => self.apply_snapshot(ctx, camera_id, image, data_url),

                NetEvent::Status {
                    camera_id,
                    seq,
                    status,
                } => {
                    let is_current = self
                        .dashboard
                        .current_camera()
                        .is_some_and(|c| c.id == camera_id);
                    // Last admitted response wins; stale sequences are dropped.
                    if is_current && self.dashboard.gate.admit(seq) {
                        self.dashboard.slots = status.spaces;
                    }
                }

                NetEvent::Error { message } => {
                    if let Some(cal) = self.calibration.as_mut() {
                        cal.saving = false;
                    }
                    self.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }

    fn apply_snapshot(
        &mut self,
        ctx: &egui::Context,
        camera_id: u64,
        image: egui::ColorImage,
        data_url: String,
    ) {
        let size = image.size;

        if let Some(cal) = self.calibration.as_mut() {
            if cal.camera_id == camera_id {
                cal.texture = Some(ctx.load_texture(
                    "calibration-frame",
                    image,
                    egui::TextureOptions::LINEAR,
                ));
                cal.native_size = Some(lotview_core::geometry::NativeSize::new(
                    size[0] as f64,
                    size[1] as f64,
                ));
                cal.frame_data_url = Some(data_url);
                return;
            }
        }

        if self
            .dashboard
            .current_camera()
            .is_some_and(|c| c.id == camera_id)
        {
            self.dashboard.preview = Some(ctx.load_texture(
                "dashboard-preview",
                image,
                egui::TextureOptions::LINEAR,
            ));
            self.dashboard.preview_camera = Some(camera_id);
        }
    }
}

impl eframe::App for LotviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events(ctx);

        panels::status::show(ctx, self);
        match self.screen {
            Screen::Dashboard => panels::dashboard::show(ctx, self),
            Screen::Calibration => panels::calibration::show(ctx, self),
        }
        panels::modals::show(ctx, self);
    }
}
