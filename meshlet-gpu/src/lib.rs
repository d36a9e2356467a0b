//! Device capabilities required to upload meshlet meshes and record meshlet draws.
//!
//! The traits in [`device`], [`command`] and [`pipeline`] are the only surface the loader and renderer talk to. The
//! [`headless`] backend implements them without any GPU by recording every call and emulating the meshlet stage on
//! the CPU.

pub mod buffer;
pub mod command;
pub mod device;
pub mod headless;
pub mod pipeline;
pub mod vertex;
