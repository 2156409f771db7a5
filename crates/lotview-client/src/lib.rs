pub mod api;
pub mod config;
pub mod encode;
pub mod error;
pub mod mjpeg;
pub mod poll;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
