use crate::buffer::{BufferDescriptor, BufferUsage};
use crate::device::{DeviceError, GraphicsDevice};
use crate::headless::queue::HeadlessQueue;
use crate::pipeline::{PipelineState, RenderPipelineDescriptor};
use crate::vertex::VertexLayout;
use core::fmt::{Debug, Formatter};
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
struct Allocations {
	bytes: u64,
	buffers: usize,
}

#[derive(Debug, Default)]
struct MemoryTracker {
	budget: Option<u64>,
	allocations: Mutex<Allocations>,
	next_id: AtomicU64,
	lost: AtomicBool,
}

impl MemoryTracker {
	fn next_id(&self) -> u64 {
		self.next_id.fetch_add(1, Ordering::Relaxed)
	}

	fn alloc(&self, size: u64) -> Result<(), DeviceError> {
		let mut allocations = self.allocations.lock();
		if let Some(budget) = self.budget {
			let available = budget - allocations.bytes;
			if size > available {
				return Err(DeviceError::OutOfMemory {
					requested: size,
					available,
				});
			}
		}
		allocations.bytes += size;
		allocations.buffers += 1;
		Ok(())
	}

	fn free(&self, size: u64) {
		let mut allocations = self.allocations.lock();
		allocations.bytes -= size;
		allocations.buffers -= 1;
	}
}

/// A [`GraphicsDevice`] keeping all resources in host memory.
///
/// Cloning is cheap and yields a handle to the same device.
#[derive(Clone, Debug)]
pub struct HeadlessDevice {
	tracker: Arc<MemoryTracker>,
}

impl Default for HeadlessDevice {
	fn default() -> Self {
		Self::new()
	}
}

impl HeadlessDevice {
	pub fn new() -> Self {
		Self {
			tracker: Arc::new(MemoryTracker::default()),
		}
	}

	/// Buffer allocations fail with [`DeviceError::OutOfMemory`] once more than `budget` bytes are live.
	pub fn with_memory_budget(budget: u64) -> Self {
		Self {
			tracker: Arc::new(MemoryTracker {
				budget: Some(budget),
				..MemoryTracker::default()
			}),
		}
	}

	pub fn memory_budget(&self) -> Option<u64> {
		self.tracker.budget
	}

	/// Bytes held by live buffers.
	pub fn allocated_bytes(&self) -> u64 {
		self.tracker.allocations.lock().bytes
	}

	pub fn live_buffers(&self) -> usize {
		self.tracker.allocations.lock().buffers
	}

	/// Simulates losing the device, all subsequent resource creation fails with [`DeviceError::DeviceLost`].
	pub fn lose(&self) {
		log::warn!("HeadlessDevice: device lost");
		self.tracker.lost.store(true, Ordering::Relaxed);
	}

	pub fn is_lost(&self) -> bool {
		self.tracker.lost.load(Ordering::Relaxed)
	}

	fn check_lost(&self) -> Result<(), DeviceError> {
		if self.is_lost() {
			Err(DeviceError::DeviceLost)
		} else {
			Ok(())
		}
	}
}

impl GraphicsDevice for HeadlessDevice {
	type Buffer = HeadlessBuffer;
	type Pipeline = HeadlessPipeline;
	type Queue = HeadlessQueue;

	fn name(&self) -> &str {
		"Headless"
	}

	fn create_buffer(&self, desc: &BufferDescriptor, contents: &[u8]) -> Result<Self::Buffer, DeviceError> {
		self.check_lost()?;
		if desc.usage.is_empty() {
			return Err(DeviceError::ResourceCreation(format!("buffer {:?} has no usage", desc.label)));
		}
		if contents.len() as u64 != desc.size {
			return Err(DeviceError::InvalidParameter(format!(
				"buffer {:?} has size {} but was given {} bytes of contents",
				desc.label,
				desc.size,
				contents.len()
			)));
		}
		self.tracker.alloc(desc.size)?;
		let id = self.tracker.next_id();
		log::trace!(
			"HeadlessDevice: creating buffer {} {:?} (size: {}, usage: {:?})",
			id,
			desc.label,
			desc.size,
			desc.usage
		);
		Ok(HeadlessBuffer(Arc::new(BufferInner {
			id,
			label: desc.label.to_string(),
			usage: desc.usage,
			contents: contents.into(),
			tracker: self.tracker.clone(),
		})))
	}

	fn create_render_pipeline(&self, desc: &RenderPipelineDescriptor) -> Result<Self::Pipeline, DeviceError> {
		self.check_lost()?;
		desc.vertex_layout
			.validate()
			.map_err(|e| DeviceError::InvalidParameter(format!("pipeline {:?}: {e}", desc.label)))?;
		let id = self.tracker.next_id();
		log::debug!("HeadlessDevice: creating pipeline {} {:?}", id, desc.label);
		Ok(HeadlessPipeline(Arc::new(PipelineInner {
			id,
			label: desc.label.clone(),
			vertex_layout: desc.vertex_layout.clone(),
		})))
	}

	fn create_command_queue(&self) -> Result<Self::Queue, DeviceError> {
		self.check_lost()?;
		Ok(HeadlessQueue::new())
	}
}

struct BufferInner {
	id: u64,
	label: String,
	usage: BufferUsage,
	contents: Box<[u8]>,
	tracker: Arc<MemoryTracker>,
}

impl Drop for BufferInner {
	fn drop(&mut self) {
		log::trace!("HeadlessDevice: freeing buffer {} {:?}", self.id, self.label);
		self.tracker.free(self.contents.len() as u64);
	}
}

/// Host memory buffer, freed when the last clone is dropped.
#[derive(Clone)]
pub struct HeadlessBuffer(Arc<BufferInner>);

impl HeadlessBuffer {
	/// Unique per device, shared by clones.
	pub fn id(&self) -> u64 {
		self.0.id
	}

	pub fn label(&self) -> &str {
		&self.0.label
	}

	pub fn usage(&self) -> BufferUsage {
		self.0.usage
	}

	pub fn size(&self) -> u64 {
		self.0.contents.len() as u64
	}

	pub fn contents(&self) -> &[u8] {
		&self.0.contents
	}
}

impl Debug for HeadlessBuffer {
	fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("HeadlessBuffer")
			.field("id", &self.0.id)
			.field("label", &self.0.label)
			.field("size", &self.size())
			.field("usage", &self.0.usage)
			.finish()
	}
}

#[derive(Debug)]
struct PipelineInner {
	id: u64,
	label: String,
	vertex_layout: VertexLayout,
}

#[derive(Clone, Debug)]
pub struct HeadlessPipeline(Arc<PipelineInner>);

impl HeadlessPipeline {
	pub fn id(&self) -> u64 {
		self.0.id
	}
}

impl PipelineState for HeadlessPipeline {
	fn label(&self) -> &str {
		&self.0.label
	}

	fn vertex_layout(&self) -> &VertexLayout {
		&self.0.vertex_layout
	}
}
