use crate::command::{CommandEncoder, CommandQueue, MeshletDraw, Viewport};
use crate::headless::device::{HeadlessBuffer, HeadlessDevice, HeadlessPipeline};
use meshlet_asset_disk::meshlet::format::{INDICES_PER_TRIANGLE, MeshFileMeshlet};
use parking_lot::Mutex;

/// A command as it was recorded, resources referenced by their id.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedCommand {
	SetPipeline {
		pipeline: u64,
	},
	SetViewport(Viewport),
	SetVertexBuffer {
		slot: u32,
		buffer: u64,
		offset: u64,
	},
	SetMeshletBuffers {
		meshlets: u64,
		meshlets_offset: u64,
		triangles: u64,
		triangles_offset: u64,
	},
	DrawMeshlets(MeshletDraw),
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct EmulationStats {
	pub draw_calls: u64,
	pub meshlets: u64,
	pub triangles: u64,
	/// meshlets that could not be read from the bound buffers, always 0 for well-formed draws
	pub invalid_meshlets: u64,
}

/// Everything recorded by a [`HeadlessEncoder`], plus the output of the emulated meshlet stage.
#[derive(Clone, Debug, Default)]
pub struct CommandList {
	pub label: String,
	pub commands: Vec<RecordedCommand>,
	/// index of every drawn meshlet within its meshlet buffer, in draw order
	pub drawn_meshlets: Vec<u32>,
	/// triangles of all drawn meshlets with global vertex indices, in draw order
	pub triangles: Vec<[u32; 3]>,
	pub stats: EmulationStats,
}

struct MeshletBinding {
	meshlets: HeadlessBuffer,
	meshlets_offset: u64,
	triangles: HeadlessBuffer,
	triangles_offset: u64,
}

impl MeshletBinding {
	/// Reads meshlet `index` of the bound view and appends its resolved triangles. Returns the absolute meshlet index
	/// and its triangle count, or `None` if any read is out of bounds.
	fn emulate_meshlet(&self, index: u64, out: &mut Vec<[u32; 3]>) -> Option<(u32, u32)> {
		let size = size_of::<MeshFileMeshlet>() as u64;
		let start = self.meshlets_offset.checked_add(index.checked_mul(size)?)?;
		let bytes = self
			.meshlets
			.contents()
			.get(usize::try_from(start).ok()?..usize::try_from(start + size).ok()?)?;
		let meshlet: MeshFileMeshlet = bytemuck::pod_read_unaligned(bytes);

		let range = meshlet.triangle_index_range();
		let indices = self.triangles.contents().get(
			usize::try_from(self.triangles_offset + range.start).ok()?
				..usize::try_from(self.triangles_offset + range.end).ok()?,
		)?;
		if indices.iter().any(|&i| i as u32 >= meshlet.vertex_count) {
			return None;
		}
		let base = meshlet.vertex_offset;
		out.extend(
			indices
				.chunks_exact(INDICES_PER_TRIANGLE)
				.map(|t| [base + t[0] as u32, base + t[1] as u32, base + t[2] as u32]),
		);
		Some(((start / size) as u32, meshlet.triangle_count))
	}
}

pub struct HeadlessEncoder {
	list: CommandList,
	meshlet_binding: Option<MeshletBinding>,
}

impl HeadlessEncoder {
	pub fn new(label: &str) -> Self {
		Self {
			list: CommandList {
				label: label.to_string(),
				..CommandList::default()
			},
			meshlet_binding: None,
		}
	}

	pub fn commands(&self) -> &[RecordedCommand] {
		&self.list.commands
	}

	pub fn stats(&self) -> EmulationStats {
		self.list.stats
	}

	pub fn finish(self) -> CommandList {
		self.list
	}
}

impl CommandEncoder<HeadlessDevice> for HeadlessEncoder {
	fn set_pipeline(&mut self, pipeline: &HeadlessPipeline) {
		self.list.commands.push(RecordedCommand::SetPipeline {
			pipeline: pipeline.id(),
		});
	}

	fn set_viewport(&mut self, viewport: &Viewport) {
		self.list.commands.push(RecordedCommand::SetViewport(*viewport));
	}

	fn set_vertex_buffer(&mut self, slot: u32, buffer: &HeadlessBuffer, offset: u64) {
		self.list.commands.push(RecordedCommand::SetVertexBuffer {
			slot,
			buffer: buffer.id(),
			offset,
		});
	}

	fn set_meshlet_buffers(
		&mut self,
		meshlets: &HeadlessBuffer,
		meshlets_offset: u64,
		triangles: &HeadlessBuffer,
		triangles_offset: u64,
	) {
		self.list.commands.push(RecordedCommand::SetMeshletBuffers {
			meshlets: meshlets.id(),
			meshlets_offset,
			triangles: triangles.id(),
			triangles_offset,
		});
		self.meshlet_binding = Some(MeshletBinding {
			meshlets: meshlets.clone(),
			meshlets_offset,
			triangles: triangles.clone(),
			triangles_offset,
		});
	}

	fn draw_meshlets(&mut self, draw: MeshletDraw) {
		self.list.commands.push(RecordedCommand::DrawMeshlets(draw));
		let stats = &mut self.list.stats;
		stats.draw_calls += 1;
		let Some(binding) = &self.meshlet_binding else {
			log::error!("HeadlessEncoder {:?}: draw without bound meshlet buffers", self.list.label);
			stats.invalid_meshlets += draw.meshlet_count as u64;
			return;
		};
		for i in 0..draw.meshlet_count as u64 {
			match binding.emulate_meshlet(draw.first_meshlet as u64 + i, &mut self.list.triangles) {
				Some((meshlet, triangles)) => {
					self.list.drawn_meshlets.push(meshlet);
					stats.meshlets += 1;
					stats.triangles += triangles as u64;
				}
				None => {
					log::error!(
						"HeadlessEncoder {:?}: meshlet {} of {:?} is out of bounds",
						self.list.label,
						draw.first_meshlet as u64 + i,
						draw
					);
					stats.invalid_meshlets += 1;
				}
			}
		}
	}
}

/// Keeps every submitted [`CommandList`] until taken.
#[derive(Debug, Default)]
pub struct HeadlessQueue {
	submissions: Mutex<Vec<CommandList>>,
}

impl HeadlessQueue {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn submission_count(&self) -> usize {
		self.submissions.lock().len()
	}

	pub fn last_submission(&self) -> Option<CommandList> {
		self.submissions.lock().last().cloned()
	}

	pub fn take_submissions(&self) -> Vec<CommandList> {
		core::mem::take(&mut *self.submissions.lock())
	}
}

impl CommandQueue<HeadlessDevice> for HeadlessQueue {
	type Encoder = HeadlessEncoder;

	fn create_encoder(&self, label: &str) -> Self::Encoder {
		HeadlessEncoder::new(label)
	}

	fn submit(&self, encoder: Self::Encoder) {
		let list = encoder.finish();
		log::trace!(
			"HeadlessQueue: submitting {:?} with {} commands",
			list.label,
			list.commands.len()
		);
		self.submissions.lock().push(list);
	}
}
