pub mod api;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod session;
