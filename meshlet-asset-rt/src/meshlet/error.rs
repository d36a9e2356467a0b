use meshlet_asset_disk::meshlet::error::FormatError;
use meshlet_gpu::device::DeviceError;
use meshlet_gpu::vertex::VertexLayoutError;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("failed to read mesh file: {0}")]
	Io(#[from] io::Error),
	#[error("malformed mesh file: {0}")]
	Format(#[from] FormatError),
	#[error("failed to create mesh buffers: {0}")]
	Device(#[from] DeviceError),
	#[error("invalid vertex layout: {0}")]
	Layout(#[from] VertexLayoutError),
	#[error("background load terminated without a result")]
	WorkerLost,
}
