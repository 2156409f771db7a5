pub mod add_camera;
pub mod delete_camera;
pub mod snapshot;
pub mod status;
pub mod submit;
