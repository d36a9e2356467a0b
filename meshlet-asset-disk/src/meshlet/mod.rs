pub mod builder;
pub mod error;
pub mod file;
pub mod format;
pub mod stats;
