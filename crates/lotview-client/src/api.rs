//! Typed client for the parking backend's HTTP endpoints.

use std::io::Read;
use std::time::Duration;

use lotview_core::api::{
    CalibrationUpload, CreatedCamera, NewCamera, SaveOutcome, SpacesStatus,
};

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::mjpeg::{boundary_from_content_type, FrameExtractor};

/// CSRF header name expected by the backend.
const CSRF_HEADER: &str = "X-CSRFToken";

/// Request timeout for the JSON endpoints.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Give up on a snapshot if this much of the feed arrives without a
/// complete frame.
const MAX_FEED_BYTES: usize = 8 * 1024 * 1024;

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Blocking HTTP client for the backend API. Cheap to clone per thread is
/// not needed; the GUI keeps one instance on its network worker.
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    csrf_token: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            csrf_token: config.csrf_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Create a camera; the server responds with the id to calibrate next.
    pub fn create_camera(&self, camera: &NewCamera) -> Result<CreatedCamera> {
        camera.validate()?;

        let endpoint = self.url("/camera/create/");
        tracing::debug!(%endpoint, name = %camera.name, kind = %camera.kind, "creating camera");

        let kind = camera.kind.to_string();
        let resp = self
            .http
            .post(&endpoint)
            .header(CSRF_HEADER, &self.csrf_token)
            .form(&[
                ("name", camera.name.as_str()),
                ("type", kind.as_str()),
                ("url", camera.url.as_str()),
                ("csrfmiddlewaretoken", self.csrf_token.as_str()),
            ])
            .send()?;

        if !resp.status().is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: resp.status().as_u16(),
            });
        }

        let created: CreatedCamera = resp.json()?;
        tracing::info!(camera_id = created.camera_id, "camera created");
        Ok(created)
    }

    /// Submit the full region sequence plus the reference frame.
    ///
    /// A `success: false` body becomes a typed error so callers can show
    /// the message instead of silently staying on the current view.
    pub fn save_calibration(&self, camera_id: u64, upload: &CalibrationUpload) -> Result<()> {
        let endpoint = self.url(&format!("/camera/{camera_id}/calibrate/save/"));
        tracing::debug!(%endpoint, regions = upload.spaces.len(), "saving calibration");

        let resp = self
            .http
            .post(&endpoint)
            .header(CSRF_HEADER, &self.csrf_token)
            .json(upload)
            .send()?;

        let status = resp.status();
        // The backend answers rejected saves with 400 plus a JSON body.
        if !status.is_success() && status.as_u16() != 400 {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let outcome: SaveOutcome = resp.json()?;
        if outcome.success {
            tracing::info!(camera_id, regions = upload.spaces.len(), "calibration saved");
            Ok(())
        } else {
            Err(ApiError::Backend {
                message: outcome
                    .error
                    .unwrap_or_else(|| "calibration rejected".to_string()),
            })
        }
    }

    pub fn delete_camera(&self, camera_id: u64) -> Result<()> {
        let endpoint = self.url(&format!("/camera/{camera_id}/delete/"));
        let resp = self
            .http
            .get(&endpoint)
            .header(CSRF_HEADER, &self.csrf_token)
            .send()?;

        if !resp.status().is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: resp.status().as_u16(),
            });
        }
        tracing::info!(camera_id, "camera deleted");
        Ok(())
    }

    /// One occupancy poll for the given camera.
    pub fn spaces_status(&self, camera_id: u64) -> Result<SpacesStatus> {
        let endpoint = self.url(&format!("/detection/spaces-status/{camera_id}/"));
        let resp = self.http.get(&endpoint).send()?;

        if !resp.status().is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.json()?)
    }

    /// Grab a single JPEG frame from the camera's MJPEG feed.
    pub fn snapshot(&self, camera_id: u64) -> Result<Vec<u8>> {
        let endpoint = self.url(&format!("/camera/{camera_id}/"));
        let mut resp = self.http.get(&endpoint).send()?;

        if !resp.status().is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: resp.status().as_u16(),
            });
        }

        let boundary = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(boundary_from_content_type)
            .unwrap_or("frame")
            .to_string();

        let mut extractor = FrameExtractor::new(&boundary);
        let mut chunk = [0u8; 8192];
        loop {
            let n = resp.read(&mut chunk)?;
            if n == 0 {
                return Err(ApiError::NoFrame);
            }
            if let Some(frame) = extractor.push(&chunk[..n]) {
                tracing::debug!(camera_id, bytes = frame.len(), "snapshot frame extracted");
                return Ok(frame);
            }
            if extractor.buffered() > MAX_FEED_BYTES {
                return Err(ApiError::NoFrame);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(
            join_url("http://host:8000/", "/camera/create/"),
            "http://host:8000/camera/create/"
        );
        assert_eq!(
            join_url("http://host:8000", "detection/spaces-status/3/"),
            "http://host:8000/detection/spaces-status/3/"
        );
    }

    #[test]
    fn client_builds_from_config() {
        let config = ClientConfig {
            base_url: "http://host:8000/".into(),
            ..Default::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.url("/camera/7/"), "http://host:8000/camera/7/");
    }
}
