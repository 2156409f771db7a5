//! Client configuration, loaded from a `lotview.toml` file.
//!
//! The original web frontend received its base URLs, CSRF token, and camera
//! list injected by the hosting page; here they come from the config file
//! (with CLI flags overriding individual values).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default poll cadence, matching the original dashboard's 1000 ms interval.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// A camera known to this client, as the hosting page would list it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraRef {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Opaque CSRF credential sent with every mutating call.
    pub csrf_token: String,
    /// Occupancy poll cadence in milliseconds.
    pub poll_interval_ms: u64,
    /// Known cameras, shown in the dashboard carousel.
    pub cameras: Vec<CameraRef>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            csrf_token: String::new(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            cameras: Vec::new(),
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        tracing::debug!(path = %path.display(), cameras = config.cameras.len(), "config loaded");
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_config() {
        let raw = r#"
            base_url = "http://lot.example:8000"
            csrf_token = "abc123"
            poll_interval_ms = 500

            [[cameras]]
            id = 1
            name = "North lot"

            [[cameras]]
            id = 4
            name = "Gate"
        "#;
        let config: ClientConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.base_url, "http://lot.example:8000");
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.cameras.len(), 2);
        assert_eq!(config.cameras[1].name, "Gate");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ClientConfig = toml::from_str("csrf_token = \"t\"").unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        assert!(config.cameras.is_empty());
    }

    #[test]
    fn load_or_default_handles_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let config = ClientConfig::load_or_default(&missing).unwrap();
        assert_eq!(config, ClientConfig::default());

        let path = dir.path().join("lotview.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "base_url = \"http://10.0.0.2\"").unwrap();
        let config = ClientConfig::load_or_default(&path).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2");
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = ClientConfig {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }
}
