use meshlet_gpu::device::DeviceError;
use meshlet_gpu::vertex::{VertexLayout, VertexLayoutError};

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid pipeline vertex layout: {0}")]
	InvalidVertexLayout(#[from] VertexLayoutError),
	#[error("mesh {mesh:?} has vertex layout {mesh_layout:?} but the pipeline expects {pipeline_layout:?}")]
	IncompatibleMesh {
		mesh: String,
		mesh_layout: VertexLayout,
		pipeline_layout: VertexLayout,
	},
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum RendererError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error("failed to create renderer resources: {0}")]
	Device(#[from] DeviceError),
}
