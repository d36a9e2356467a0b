use crate::device::GraphicsDevice;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
	pub x: f32,
	pub y: f32,
	pub width: f32,
	pub height: f32,
	pub min_depth: f32,
	pub max_depth: f32,
}

impl Viewport {
	/// Viewport covering `width` x `height` pixels with the full depth range.
	pub fn new(width: f32, height: f32) -> Self {
		Self {
			x: 0.,
			y: 0.,
			width,
			height,
			min_depth: 0.,
			max_depth: 1.,
		}
	}

	pub fn aspect_ratio(&self) -> f32 {
		self.width / self.height
	}
}

/// Draws `meshlet_count` meshlets starting at `first_meshlet`, relative to the meshlet buffer view bound by
/// [`CommandEncoder::set_meshlet_buffers`]. One invocation of the meshlet stage per meshlet.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MeshletDraw {
	pub first_meshlet: u32,
	pub meshlet_count: u32,
}

pub trait CommandQueue<D: GraphicsDevice>: Send + Sync {
	type Encoder: CommandEncoder<D>;

	fn create_encoder(&self, label: &str) -> Self::Encoder;

	fn submit(&self, encoder: Self::Encoder);
}

/// Records commands of a single frame. Commands are executed in recording order once submitted.
pub trait CommandEncoder<D: GraphicsDevice> {
	fn set_pipeline(&mut self, pipeline: &D::Pipeline);

	fn set_viewport(&mut self, viewport: &Viewport);

	fn set_vertex_buffer(&mut self, slot: u32, buffer: &D::Buffer, offset: u64);

	/// Binds the meshlet table and triangle blob read by subsequent [`Self::draw_meshlets`].
	fn set_meshlet_buffers(
		&mut self,
		meshlets: &D::Buffer,
		meshlets_offset: u64,
		triangles: &D::Buffer,
		triangles_offset: u64,
	);

	fn draw_meshlets(&mut self, draw: MeshletDraw);
}
