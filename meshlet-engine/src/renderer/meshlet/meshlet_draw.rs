use crate::renderer::error::{ConfigError, RendererError};
use crate::renderer::meshlet::meshlet_select::VisibleSet;
use meshlet_asset_rt::meshlet::mesh::Mesh;
use meshlet_gpu::command::{CommandEncoder, MeshletDraw, Viewport};
use meshlet_gpu::device::GraphicsDevice;
use meshlet_gpu::pipeline::{PipelineState, RenderPipelineDescriptor};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct FrameStats {
	pub meshlets_total: u32,
	pub meshlets_visible: u32,
	pub draw_units: u32,
	pub triangles: u64,
}

pub struct MeshletDrawPass<D: GraphicsDevice> {
	pipeline: D::Pipeline,
}

impl<D: GraphicsDevice> MeshletDrawPass<D> {
	pub fn new(device: &D, desc: &RenderPipelineDescriptor) -> Result<Self, RendererError> {
		desc.vertex_layout.validate().map_err(ConfigError::from)?;
		let pipeline = device.create_render_pipeline(desc)?;
		log::debug!("created meshlet pipeline {:?} on {}", pipeline.label(), device.name());
		Ok(Self { pipeline })
	}

	pub fn pipeline(&self) -> &D::Pipeline {
		&self.pipeline
	}

	/// Binds pipeline, viewport and vertex buffers, then for every submesh with visible meshlets its meshlet buffers
	/// followed by one draw per [`DrawUnit`](crate::renderer::meshlet::meshlet_select::DrawUnit).
	pub fn draw(
		&self,
		cmd: &mut impl CommandEncoder<D>,
		viewport: &Viewport,
		mesh: &Mesh<D>,
		visible: &VisibleSet,
	) -> FrameStats {
		profiling::function_scope!();
		cmd.set_pipeline(&self.pipeline);
		cmd.set_viewport(viewport);
		for (slot, view) in mesh.vertex_buffers().iter().enumerate() {
			let (buffer, offset) = mesh.resolve(*view);
			cmd.set_vertex_buffer(slot as u32, buffer, offset);
		}

		let mut bound_submesh = None;
		for unit in &visible.units {
			let submesh = &mesh.submeshes()[unit.submesh as usize];
			debug_assert!(unit.first_meshlet + unit.meshlet_count <= submesh.meshlet_count);
			if bound_submesh != Some(unit.submesh) {
				debug_assert!(bound_submesh.is_none_or(|bound| bound < unit.submesh));
				let (meshlets, meshlets_offset) = mesh.resolve(submesh.meshlet_buffer);
				let (triangles, triangles_offset) = mesh.resolve(submesh.meshlet_triangle_buffer);
				cmd.set_meshlet_buffers(meshlets, meshlets_offset, triangles, triangles_offset);
				bound_submesh = Some(unit.submesh);
			}
			cmd.draw_meshlets(MeshletDraw {
				first_meshlet: unit.first_meshlet,
				meshlet_count: unit.meshlet_count,
			});
		}

		FrameStats {
			meshlets_total: visible.meshlets_total,
			meshlets_visible: visible.meshlets_visible,
			draw_units: visible.units.len() as u32,
			triangles: visible.triangles,
		}
	}
}
