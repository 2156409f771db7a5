use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned status {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    #[error("Backend rejected the request: {message}")]
    Backend { message: String },

    #[error("No complete frame found in camera feed")]
    NoFrame,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Core(#[from] lotview_core::error::LotviewError),
}

pub type Result<T> = std::result::Result<T, ApiError>;
