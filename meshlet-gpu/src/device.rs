use crate::buffer::BufferDescriptor;
use crate::command::CommandQueue;
use crate::pipeline::{PipelineState, RenderPipelineDescriptor};
use core::fmt::Debug;

/// A device able to hold meshlet meshes and run the meshlet pipeline.
///
/// Resources are released when the last handle to them is dropped.
pub trait GraphicsDevice: Sized + Send + Sync + 'static {
	type Buffer: Debug + Send + Sync + 'static;
	type Pipeline: PipelineState + Debug + Send + Sync + 'static;
	type Queue: CommandQueue<Self>;

	fn name(&self) -> &str;

	/// Allocates a buffer of `desc.size` bytes initialized with `contents`, which must be exactly `desc.size` long.
	fn create_buffer(&self, desc: &BufferDescriptor, contents: &[u8]) -> Result<Self::Buffer, DeviceError>;

	fn create_render_pipeline(&self, desc: &RenderPipelineDescriptor) -> Result<Self::Pipeline, DeviceError>;

	fn create_command_queue(&self) -> Result<Self::Queue, DeviceError>;
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum DeviceError {
	#[error("out of device memory: requested {requested} bytes with {available} bytes available")]
	OutOfMemory { requested: u64, available: u64 },
	#[error("resource creation failed: {0}")]
	ResourceCreation(String),
	#[error("invalid parameter: {0}")]
	InvalidParameter(String),
	#[error("device lost")]
	DeviceLost,
}
