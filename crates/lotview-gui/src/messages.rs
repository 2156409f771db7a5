use lotview_core::api::{CalibrationUpload, NewCamera, SpacesStatus};

/// Commands sent from the UI thread to the network worker.
pub enum NetCommand {
    /// Register a camera; the worker echoes the name back on success.
    CreateCamera { camera: NewCamera },

    /// Submit the full region sequence plus reference frame.
    SaveCalibration {
        camera_id: u64,
        upload: CalibrationUpload,
    },

    DeleteCamera { camera_id: u64 },

    /// Grab one decoded frame from the camera's MJPEG feed.
    FetchSnapshot { camera_id: u64 },

    /// Start (or stop, with `None`) the fixed-interval occupancy poll.
    WatchCamera { camera_id: Option<u64> },
}

/// Results sent from the network worker back to the UI thread.
pub enum NetEvent {
    CameraCreated { camera_id: u64, name: String },

    CalibrationSaved { camera_id: u64 },

    CameraDeleted { camera_id: u64 },

    /// A decoded snapshot frame, plus its data-URL form for the
    /// calibration reference payload.
    Snapshot {
        camera_id: u64,
        image: egui::ColorImage,
        data_url: String,
    },

    /// One occupancy poll result. `seq` is the monotonic request stamp;
    /// the UI drops responses older than what it already rendered.
    Status {
        camera_id: u64,
        seq: u64,
        status: SpacesStatus,
    },

    Error { message: String },
}
