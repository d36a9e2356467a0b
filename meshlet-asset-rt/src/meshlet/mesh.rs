use core::fmt::{Debug, Formatter};
use core::ops::Range;
use meshlet_asset_disk::meshlet::format::MeshFileMeshlet;
use meshlet_asset_disk::meshlet::stats::MeshStats;
use meshlet_gpu::device::GraphicsDevice;
use meshlet_gpu::vertex::VertexLayout;
use smallvec::SmallVec;

/// One of the three buffers every [`Mesh`] owns.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BufferId {
	VertexData,
	Meshlets,
	MeshletTriangles,
}

impl BufferId {
	pub const ALL: [BufferId; 3] = [BufferId::VertexData, BufferId::Meshlets, BufferId::MeshletTriangles];

	const fn index(self) -> usize {
		match self {
			BufferId::VertexData => 0,
			BufferId::Meshlets => 1,
			BufferId::MeshletTriangles => 2,
		}
	}
}

/// A view into one of the buffers of a [`Mesh`], starting at `offset` bytes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MeshBuffer {
	pub buffer: BufferId,
	pub offset: u64,
}

impl MeshBuffer {
	pub const fn new(buffer: BufferId, offset: u64) -> Self {
		Self { buffer, offset }
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Submesh {
	/// index of the first meshlet within the meshlet table of the mesh
	pub meshlet_start: u32,
	pub meshlet_count: u32,
	/// the meshlet table starting at this submesh's first meshlet
	pub meshlet_buffer: MeshBuffer,
	/// the whole triangle blob, shared by all submeshes
	pub meshlet_triangle_buffer: MeshBuffer,
}

impl Submesh {
	pub fn meshlet_range(&self) -> Range<usize> {
		let start = self.meshlet_start as usize;
		start..start + self.meshlet_count as usize
	}
}

/// A mesh uploaded to a device. Immutable, share it with an `Arc`.
///
/// Owns exactly three buffers: vertex data, meshlet table and meshlet triangles. Vertex buffer views and submeshes
/// only reference them by [`BufferId`]. Dropping the mesh releases all three.
pub struct Mesh<D: GraphicsDevice> {
	pub(crate) label: String,
	pub(crate) vertex_layout: VertexLayout,
	pub(crate) buffers: [D::Buffer; 3],
	pub(crate) vertex_buffers: SmallVec<[MeshBuffer; 2]>,
	pub(crate) submeshes: Vec<Submesh>,
	pub(crate) meshlets: Vec<MeshFileMeshlet>,
	pub(crate) vertex_count: u32,
	pub(crate) stats: MeshStats,
}

impl<D: GraphicsDevice> Mesh<D> {
	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn vertex_layout(&self) -> &VertexLayout {
		&self.vertex_layout
	}

	pub fn buffer(&self, id: BufferId) -> &D::Buffer {
		&self.buffers[id.index()]
	}

	pub fn resolve(&self, view: MeshBuffer) -> (&D::Buffer, u64) {
		(self.buffer(view.buffer), view.offset)
	}

	/// One view per buffer of the [`VertexLayout`], in order.
	pub fn vertex_buffers(&self) -> &[MeshBuffer] {
		&self.vertex_buffers
	}

	pub fn submeshes(&self) -> &[Submesh] {
		&self.submeshes
	}

	/// CPU copy of the meshlet table.
	pub fn meshlets(&self) -> &[MeshFileMeshlet] {
		&self.meshlets
	}

	pub fn submesh_meshlets(&self, submesh: &Submesh) -> &[MeshFileMeshlet] {
		&self.meshlets[submesh.meshlet_range()]
	}

	pub fn vertex_count(&self) -> u32 {
		self.vertex_count
	}

	pub fn stats(&self) -> &MeshStats {
		&self.stats
	}
}

impl<D: GraphicsDevice> Debug for Mesh<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Mesh")
			.field("label", &self.label)
			.field("device", &core::any::type_name::<D>())
			.field("buffers", &self.buffers)
			.field("vertex_buffers", &self.vertex_buffers)
			.field("submeshes", &self.submeshes.len())
			.field("meshlets", &self.meshlets.len())
			.field("vertex_count", &self.vertex_count)
			.finish()
	}
}
