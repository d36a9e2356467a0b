pub mod camera;
pub mod config;
pub mod error;
pub mod frustum;
pub mod meshlet;
