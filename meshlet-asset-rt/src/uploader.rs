use bytemuck::Pod;
use meshlet_gpu::buffer::{BufferDescriptor, BufferUsage};
use meshlet_gpu::device::{DeviceError, GraphicsDevice};

/// Uploads data of a single asset, prefixing every buffer name with the asset's label.
pub struct Uploader<'a, D: GraphicsDevice> {
	pub device: &'a D,
	pub label: &'a str,
}

impl<'a, D: GraphicsDevice> Uploader<'a, D> {
	pub fn new(device: &'a D, label: &'a str) -> Self {
		Self { device, label }
	}

	// TODO eventually these should use a staging buffer to upload to non-host accessible memory, if required
	pub fn upload_buffer_bytes(&self, name: &str, usage: BufferUsage, bytes: &[u8]) -> Result<D::Buffer, DeviceError> {
		let name = format!("{} {}", self.label, name);
		self.device.create_buffer(
			&BufferDescriptor {
				label: &name,
				size: bytes.len() as u64,
				usage: usage | BufferUsage::COPY_DST,
			},
			bytes,
		)
	}

	pub fn upload_buffer_slice<T: Pod>(&self, name: &str, usage: BufferUsage, data: &[T]) -> Result<D::Buffer, DeviceError> {
		self.upload_buffer_bytes(name, usage, bytemuck::cast_slice(data))
	}
}
