//! Wire types for the parking backend's HTTP endpoints.
//!
//! Field names and casing match the server exactly; these types are shared
//! by the client, the GUI, and the CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LotviewError, Result};
use crate::session::Region;

/// Camera source kind, lowercase on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraType {
    /// Server-side demo video file.
    #[default]
    Video,
    /// Network camera; requires a stream URL.
    Ip,
}

impl fmt::Display for CameraType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Ip => write!(f, "ip"),
        }
    }
}

impl FromStr for CameraType {
    type Err = LotviewError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "video" => Ok(Self::Video),
            "ip" => Ok(Self::Ip),
            other => Err(LotviewError::UnknownCameraType(other.to_string())),
        }
    }
}

/// Request body for camera creation (form-encoded).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewCamera {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CameraType,
    /// Stream URL; required iff `kind` is [`CameraType::Ip`]. The server
    /// substitutes its own source for video cameras.
    pub url: String,
}

impl NewCamera {
    pub fn validate(&self) -> Result<()> {
        if self.kind == CameraType::Ip && self.url.trim().is_empty() {
            return Err(LotviewError::MissingCameraUrl);
        }
        Ok(())
    }
}

/// Response from camera creation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CreatedCamera {
    pub camera_id: u64,
}

/// Full calibration payload: every region of the session plus the reference
/// frame as an embedded `data:image/jpeg;base64,` string.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalibrationUpload {
    pub spaces: Vec<Region>,
    pub reference_frame: String,
}

/// Response from the calibration save endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One slot's occupancy, matched against rendered cards by `number`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceStatus {
    pub number: u32,
    pub occupied: bool,
}

/// Occupancy poll response.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SpacesStatus {
    pub spaces: Vec<SpaceStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_type_round_trips_lowercase() {
        assert_eq!(serde_json::to_string(&CameraType::Ip).unwrap(), "\"ip\"");
        assert_eq!(
            serde_json::from_str::<CameraType>("\"video\"").unwrap(),
            CameraType::Video
        );
        assert_eq!("ip".parse::<CameraType>().unwrap(), CameraType::Ip);
        assert!("usb".parse::<CameraType>().is_err());
    }

    #[test]
    fn new_camera_requires_url_only_for_ip() {
        let video = NewCamera {
            name: "Lot A".into(),
            kind: CameraType::Video,
            url: String::new(),
        };
        assert!(video.validate().is_ok());

        let ip = NewCamera {
            name: "Gate".into(),
            kind: CameraType::Ip,
            url: "  ".into(),
        };
        assert!(ip.validate().is_err());
    }

    #[test]
    fn new_camera_serializes_type_field() {
        let cam = NewCamera {
            name: "Gate".into(),
            kind: CameraType::Ip,
            url: "rtsp://cam/1".into(),
        };
        let json = serde_json::to_value(&cam).unwrap();
        assert_eq!(json["type"], "ip");
    }

    #[test]
    fn spaces_status_parses_backend_shape() {
        let raw = r#"{"spaces": [{"number": 1, "occupied": true}, {"number": 2, "occupied": false}]}"#;
        let status: SpacesStatus = serde_json::from_str(raw).unwrap();
        assert_eq!(status.spaces.len(), 2);
        assert!(status.spaces[0].occupied);
        assert_eq!(status.spaces[1].number, 2);
    }

    #[test]
    fn save_outcome_error_field_is_optional() {
        let ok: SaveOutcome = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ok.success);
        assert!(ok.error.is_none());

        let failed: SaveOutcome =
            serde_json::from_str(r#"{"success": false, "error": "boom"}"#).unwrap();
        assert_eq!(failed.error.as_deref(), Some("boom"));
    }
}
