use lotview_client::poll::StatusGate;
use lotview_client::ClientConfig;
use lotview_core::api::{CameraType, SpaceStatus};
use lotview_core::geometry::NativeSize;
use lotview_core::session::CalibrationSession;

/// Which view the app is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Calibration,
}

/// One camera in the carousel.
#[derive(Clone, Debug)]
pub struct CameraEntry {
    pub id: u64,
    pub name: String,
}

/// Fields of the add-camera modal dialog.
#[derive(Default)]
pub struct AddCameraModal {
    pub open: bool,
    pub name: String,
    pub kind: CameraType,
    pub url: String,
}

impl AddCameraModal {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Mirrors the original form guard: a name is required, and ip cameras
    /// need a URL.
    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
            && (self.kind != CameraType::Ip || !self.url.trim().is_empty())
    }
}

/// Dashboard view state: carousel position, slot cards, modals.
pub struct DashboardState {
    pub cameras: Vec<CameraEntry>,
    pub current_index: usize,
    /// Latest admitted occupancy snapshot; overwritten wholesale.
    pub slots: Vec<SpaceStatus>,
    pub gate: StatusGate,
    pub add_modal: AddCameraModal,
    pub show_settings: bool,
    pub preview: Option<egui::TextureHandle>,
    /// Camera the preview texture belongs to.
    pub preview_camera: Option<u64>,
}

impl DashboardState {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            cameras: config
                .cameras
                .iter()
                .map(|c| CameraEntry {
                    id: c.id,
                    name: c.name.clone(),
                })
                .collect(),
            current_index: 0,
            slots: Vec::new(),
            gate: StatusGate::new(),
            add_modal: AddCameraModal::default(),
            show_settings: false,
            preview: None,
            preview_camera: None,
        }
    }

    pub fn current_camera(&self) -> Option<&CameraEntry> {
        self.cameras.get(self.current_index)
    }

    /// Wraparound carousel step; a single camera is a no-op.
    pub fn select_previous(&mut self) -> bool {
        if self.cameras.len() <= 1 {
            return false;
        }
        self.current_index = (self.current_index + self.cameras.len() - 1) % self.cameras.len();
        self.on_camera_switched();
        true
    }

    pub fn select_next(&mut self) -> bool {
        if self.cameras.len() <= 1 {
            return false;
        }
        self.current_index = (self.current_index + 1) % self.cameras.len();
        self.on_camera_switched();
        true
    }

    pub fn remove_camera(&mut self, camera_id: u64) {
        self.cameras.retain(|c| c.id != camera_id);
        if self.current_index >= self.cameras.len() {
            self.current_index = self.cameras.len().saturating_sub(1);
        }
        self.on_camera_switched();
    }

    fn on_camera_switched(&mut self) {
        self.slots.clear();
        self.preview = None;
        self.preview_camera = None;
    }
}

/// Calibration view state for one camera.
pub struct CalibrationState {
    pub camera_id: u64,
    pub camera_name: String,
    pub texture: Option<egui::TextureHandle>,
    pub native_size: Option<NativeSize>,
    /// Data-URL form of the displayed frame, kept for reference capture.
    pub frame_data_url: Option<String>,
    pub session: CalibrationSession,
    /// Display-space drag origin, relative to the viewport rect.
    pub drag_start: Option<egui::Pos2>,
    pub saving: bool,
}

impl CalibrationState {
    pub fn new(camera_id: u64, camera_name: String) -> Self {
        Self {
            camera_id,
            camera_name,
            texture: None,
            native_size: None,
            frame_data_url: None,
            session: CalibrationSession::new(),
            drag_start: None,
            saving: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard(n: usize) -> DashboardState {
        let config = ClientConfig {
            cameras: (1..=n as u64)
                .map(|id| lotview_client::config::CameraRef {
                    id,
                    name: format!("cam {id}"),
                })
                .collect(),
            ..Default::default()
        };
        DashboardState::from_config(&config)
    }

    #[test]
    fn carousel_wraps_both_directions() {
        let mut dash = dashboard(3);
        assert_eq!(dash.current_camera().unwrap().id, 1);

        assert!(dash.select_previous());
        assert_eq!(dash.current_camera().unwrap().id, 3);

        assert!(dash.select_next());
        assert!(dash.select_next());
        assert_eq!(dash.current_camera().unwrap().id, 2);
    }

    #[test]
    fn single_camera_carousel_is_inert() {
        let mut dash = dashboard(1);
        assert!(!dash.select_next());
        assert!(!dash.select_previous());
        assert_eq!(dash.current_index, 0);
    }

    #[test]
    fn removing_last_camera_clamps_index() {
        let mut dash = dashboard(2);
        dash.select_next();
        dash.remove_camera(2);
        assert_eq!(dash.current_index, 0);
        assert_eq!(dash.current_camera().unwrap().id, 1);

        dash.remove_camera(1);
        assert!(dash.current_camera().is_none());
    }

    #[test]
    fn add_modal_guard_matches_form_rules() {
        let mut modal = AddCameraModal::default();
        assert!(!modal.can_submit());

        modal.name = "North lot".into();
        assert!(modal.can_submit());

        modal.kind = CameraType::Ip;
        assert!(!modal.can_submit());
        modal.url = "rtsp://cam/1".into();
        assert!(modal.can_submit());
    }
}
