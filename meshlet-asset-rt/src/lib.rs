//! Loads mesh files into device buffers.

pub mod meshlet;
pub mod uploader;
