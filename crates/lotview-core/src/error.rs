use thiserror::Error;

#[derive(Error, Debug)]
pub enum LotviewError {
    #[error("Invalid viewport dimensions: {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("Invalid native image dimensions: {width}x{height}")]
    InvalidNativeSize { width: f64, height: f64 },

    #[error("Calibration has no regions")]
    EmptyCalibration,

    #[error("Reference frame has not been captured")]
    MissingReference,

    #[error("IP cameras require a source URL")]
    MissingCameraUrl,

    #[error("Unknown camera type: {0}")]
    UnknownCameraType(String),
}

pub type Result<T> = std::result::Result<T, LotviewError>;
