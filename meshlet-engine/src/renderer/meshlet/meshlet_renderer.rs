use crate::renderer::camera::Camera;
use crate::renderer::config::RendererConfig;
use crate::renderer::error::{ConfigError, RendererError};
use crate::renderer::frustum::Frustum;
use crate::renderer::meshlet::meshlet_draw::{FrameStats, MeshletDrawPass};
use crate::renderer::meshlet::meshlet_select::{VisibleSet, select_meshlets};
use glam::Affine3A;
use meshlet_asset_rt::meshlet::mesh::Mesh;
use meshlet_gpu::command::{CommandEncoder, CommandQueue, Viewport};
use meshlet_gpu::device::GraphicsDevice;
use meshlet_gpu::pipeline::{PipelineState, RenderPipelineDescriptor};
use std::sync::Arc;

/// Draws the meshlets of a single [`Mesh`] that survive frustum culling.
///
/// The mesh is shared and never modified, any number of renderers may draw the same mesh.
pub struct MeshletRenderer<D: GraphicsDevice> {
	config: RendererConfig,
	queue: D::Queue,
	draw_pass: MeshletDrawPass<D>,
	mesh: Option<Arc<Mesh<D>>>,
	viewport: Viewport,
	camera: Option<Camera>,
	model_transform: Affine3A,
	frame: u64,
}

impl<D: GraphicsDevice> MeshletRenderer<D> {
	pub fn new(
		device: &D,
		queue: D::Queue,
		pipeline: &RenderPipelineDescriptor,
		config: RendererConfig,
	) -> Result<Self, RendererError> {
		let draw_pass = MeshletDrawPass::new(device, pipeline)?;
		log::debug!("created {:?} with {:?}", config.label, config);
		Ok(Self {
			config,
			queue,
			draw_pass,
			mesh: None,
			viewport: Viewport::new(1., 1.),
			camera: None,
			model_transform: Affine3A::IDENTITY,
			frame: 0,
		})
	}

	pub fn config(&self) -> &RendererConfig {
		&self.config
	}

	pub fn queue(&self) -> &D::Queue {
		&self.queue
	}

	pub fn pipeline(&self) -> &D::Pipeline {
		self.draw_pass.pipeline()
	}

	/// Fails if the vertex layout of `mesh` differs from the pipeline's, keeping the current mesh.
	pub fn set_mesh(&mut self, mesh: Arc<Mesh<D>>) -> Result<(), ConfigError> {
		let pipeline_layout = self.pipeline().vertex_layout();
		if mesh.vertex_layout() != pipeline_layout {
			return Err(ConfigError::IncompatibleMesh {
				mesh: mesh.label().to_string(),
				mesh_layout: mesh.vertex_layout().clone(),
				pipeline_layout: pipeline_layout.clone(),
			});
		}
		log::debug!("{:?}: drawing mesh {:?}", self.config.label, mesh.label());
		self.mesh = Some(mesh);
		Ok(())
	}

	pub fn clear_mesh(&mut self) -> Option<Arc<Mesh<D>>> {
		self.mesh.take()
	}

	pub fn mesh(&self) -> Option<&Arc<Mesh<D>>> {
		self.mesh.as_ref()
	}

	pub fn set_viewport(&mut self, viewport: Viewport) {
		self.viewport = viewport;
	}

	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	pub fn set_camera(&mut self, camera: Camera) {
		self.camera = Some(camera);
	}

	pub fn camera(&self) -> Option<&Camera> {
		self.camera.as_ref()
	}

	pub fn set_model_transform(&mut self, model_transform: Affine3A) {
		self.model_transform = model_transform;
	}

	pub fn model_transform(&self) -> Affine3A {
		self.model_transform
	}

	/// The frustum meshlets are culled against, containing everything if culling is disabled or there is no camera.
	pub fn frustum(&self) -> Frustum {
		match self.camera {
			Some(camera) if self.config.frustum_culling => Frustum::from_view_proj(camera.view_projection()),
			_ => Frustum::everything(),
		}
	}

	pub fn cull(&self) -> VisibleSet {
		match &self.mesh {
			Some(mesh) => select_meshlets(mesh, &self.frustum(), self.model_transform, self.config.batching),
			None => VisibleSet::default(),
		}
	}

	/// Culls and records the draws of the current mesh into `cmd`. Records nothing without a mesh.
	pub fn draw(&self, cmd: &mut impl CommandEncoder<D>) -> FrameStats {
		profiling::function_scope!();
		let Some(mesh) = &self.mesh else {
			return FrameStats::default();
		};
		let visible = self.cull();
		let stats = self.draw_pass.draw(cmd, &self.viewport, mesh, &visible);
		log::trace!("{:?}: {:?}", self.config.label, stats);
		stats
	}

	/// Records a frame into a new encoder of the renderer's queue and submits it.
	pub fn render_frame(&mut self) -> FrameStats {
		profiling::function_scope!();
		let mut cmd = self
			.queue
			.create_encoder(&format!("{} frame {}", self.config.label, self.frame));
		let stats = self.draw(&mut cmd);
		self.queue.submit(cmd);
		self.frame += 1;
		stats
	}

	/// Number of frames rendered by [`Self::render_frame`].
	pub fn frame(&self) -> u64 {
		self.frame
	}
}
