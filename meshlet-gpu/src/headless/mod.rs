//! Headless backend without any GPU.
//!
//! Buffers live in host memory and are accounted against an optional memory budget. Encoders record every command
//! and emulate the meshlet stage by resolving the triangles of each drawn meshlet, which is what tests and the
//! command line tool inspect.

pub mod device;
pub mod queue;

#[cfg(test)]
mod tests;
