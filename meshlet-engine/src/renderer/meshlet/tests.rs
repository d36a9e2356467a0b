use crate::renderer::camera::Camera;
use crate::renderer::config::{DrawBatching, RendererConfig};
use crate::renderer::error::{ConfigError, RendererError};
use crate::renderer::meshlet::meshlet_renderer::MeshletRenderer;
use crate::renderer::meshlet::meshlet_select::DrawUnit;
use glam::{Affine3A, Vec3};
use meshlet_asset_disk::meshlet::builder::MeshFileBuilder;
use meshlet_asset_disk::meshlet::format::MeshFileMeshlet;
use meshlet_asset_disk::shape::sphere::Sphere;
use meshlet_asset_rt::meshlet::load::load_mesh_from_bytes;
use meshlet_asset_rt::meshlet::mesh::{BufferId, Mesh};
use meshlet_gpu::command::{MeshletDraw, Viewport};
use meshlet_gpu::device::{DeviceError, GraphicsDevice};
use meshlet_gpu::headless::device::HeadlessDevice;
use meshlet_gpu::headless::queue::RecordedCommand;
use meshlet_gpu::pipeline::RenderPipelineDescriptor;
use meshlet_gpu::vertex::{VertexLayout, VertexLayoutError};
use std::sync::Arc;

fn quad(vertex_offset: u32, triangle_offset: u32, center: Vec3) -> MeshFileMeshlet {
	MeshFileMeshlet {
		vertex_offset,
		vertex_count: 4,
		triangle_offset,
		triangle_count: 2,
		bounds: Sphere::new(center, 1.),
	}
}

/// A mesh file with one quad meshlet per center, split into submeshes of `submesh_sizes` meshlets.
fn mesh_file(centers: &[Vec3], submesh_sizes: &[usize]) -> Vec<u8> {
	let mut builder = MeshFileBuilder::new();
	let t = builder.push_triangles(&[0, 1, 2, 2, 1, 3]);
	let mut meshlets = centers.iter().enumerate().map(|(i, c)| quad(i as u32 * 4, t, *c));
	for &size in submesh_sizes {
		builder.push_submesh(meshlets.by_ref().take(size));
	}
	builder.push_vertex_data(&vec![0; centers.len() * 4 * 12]);
	builder.to_bytes().unwrap()
}

fn load(device: &HeadlessDevice, bytes: &[u8]) -> Arc<Mesh<HeadlessDevice>> {
	Arc::new(load_mesh_from_bytes("test", bytes, device, &VertexLayout::position_only()).unwrap())
}

fn renderer(device: &HeadlessDevice, config: RendererConfig) -> MeshletRenderer<HeadlessDevice> {
	MeshletRenderer::new(
		device,
		device.create_command_queue().unwrap(),
		&RenderPipelineDescriptor::new("meshlet", VertexLayout::position_only()),
		config,
	)
	.unwrap()
}

/// At the origin looking along -Z, 90 degree fov and far plane at 10.
fn camera() -> Camera {
	Camera::new_perspective(90f32.to_radians(), 1., 0.1, 10., Affine3A::IDENTITY)
}

#[test]
fn only_meshlet_in_frustum_is_drawn() {
	let device = HeadlessDevice::new();
	let bytes = mesh_file(&[Vec3::ZERO, Vec3::new(100., 0., 0.)], &[2]);
	assert_eq!(bytes.len(), 212);
	let mesh = load(&device, &bytes);
	let mut renderer = renderer(&device, RendererConfig::default());
	renderer.set_mesh(mesh.clone()).unwrap();
	renderer.set_camera(camera());
	renderer.set_viewport(Viewport::new(800., 800.));

	let visible = renderer.cull();
	assert_eq!(visible.meshlet_indices(&mesh).collect::<Vec<_>>(), [0]);
	assert_eq!(visible.meshlets_total, 2);

	let stats = renderer.render_frame();
	assert_eq!(stats.meshlets_visible, 1);
	assert_eq!(stats.draw_units, 1);
	assert_eq!(stats.triangles, 2);

	let list = renderer.queue().last_submission().unwrap();
	assert_eq!(
		list.commands,
		[
			RecordedCommand::SetPipeline {
				pipeline: renderer.pipeline().id()
			},
			RecordedCommand::SetViewport(Viewport::new(800., 800.)),
			RecordedCommand::SetVertexBuffer {
				slot: 0,
				buffer: mesh.buffer(BufferId::VertexData).id(),
				offset: 0,
			},
			RecordedCommand::SetMeshletBuffers {
				meshlets: mesh.buffer(BufferId::Meshlets).id(),
				meshlets_offset: 0,
				triangles: mesh.buffer(BufferId::MeshletTriangles).id(),
				triangles_offset: 0,
			},
			RecordedCommand::DrawMeshlets(MeshletDraw {
				first_meshlet: 0,
				meshlet_count: 1
			}),
		]
	);
	assert_eq!(list.drawn_meshlets, [0]);
	assert_eq!(list.triangles, [[0, 1, 2], [2, 1, 3]]);
	assert_eq!(list.stats.invalid_meshlets, 0);
}

#[test]
fn everything_is_visible_without_camera_or_culling() {
	let device = HeadlessDevice::new();
	let mesh = load(&device, &mesh_file(&[Vec3::ZERO, Vec3::new(100., 0., 0.)], &[2]));

	let mut renderer = renderer(&device, RendererConfig::default());
	renderer.set_mesh(mesh.clone()).unwrap();
	assert_eq!(renderer.cull().meshlets_visible, 2);

	let mut renderer = renderer_without_culling(&device);
	renderer.set_mesh(mesh.clone()).unwrap();
	renderer.set_camera(camera().look_at(Vec3::ZERO, Vec3::Z, Vec3::Y));
	assert_eq!(renderer.cull().meshlet_indices(&mesh).collect::<Vec<_>>(), [0, 1]);
}

fn renderer_without_culling(device: &HeadlessDevice) -> MeshletRenderer<HeadlessDevice> {
	renderer(
		device,
		RendererConfig {
			frustum_culling: false,
			..RendererConfig::default()
		},
	)
}

#[test]
fn batching() {
	let device = HeadlessDevice::new();
	let in_view = Vec3::new(0., 0., -5.);
	let out_of_view = Vec3::new(0., 0., 5.);
	let mesh = load(
		&device,
		&mesh_file(&[in_view, in_view, out_of_view, in_view, in_view, in_view], &[4, 2]),
	);

	let mut per_meshlet = renderer(&device, RendererConfig::default());
	per_meshlet.set_mesh(mesh.clone()).unwrap();
	per_meshlet.set_camera(camera());
	let unit = |submesh, first_meshlet, meshlet_count| DrawUnit {
		submesh,
		first_meshlet,
		meshlet_count,
	};
	assert_eq!(
		per_meshlet.cull().units,
		[unit(0, 0, 1), unit(0, 1, 1), unit(0, 3, 1), unit(1, 0, 1), unit(1, 1, 1)]
	);

	let mut contiguous = renderer(
		&device,
		RendererConfig {
			batching: DrawBatching::Contiguous,
			..RendererConfig::default()
		},
	);
	contiguous.set_mesh(mesh.clone()).unwrap();
	contiguous.set_camera(camera());
	let visible = contiguous.cull();
	// runs never span submeshes
	assert_eq!(visible.units, [unit(0, 0, 2), unit(0, 3, 1), unit(1, 0, 2)]);
	assert_eq!(visible.meshlet_indices(&mesh).collect::<Vec<_>>(), [0, 1, 3, 4, 5]);

	// both draw the same meshlets
	per_meshlet.render_frame();
	contiguous.render_frame();
	let a = per_meshlet.queue().last_submission().unwrap();
	let b = contiguous.queue().last_submission().unwrap();
	assert_eq!(a.drawn_meshlets, b.drawn_meshlets);
	assert_eq!(a.triangles, b.triangles);
	assert_eq!(a.stats.draw_calls, 5);
	assert_eq!(b.stats.draw_calls, 3);
}

#[test]
fn submeshes_bind_their_meshlet_view() {
	let device = HeadlessDevice::new();
	let in_view = Vec3::new(0., 0., -5.);
	let out_of_view = Vec3::new(0., 0., 5.);
	let mesh = load(&device, &mesh_file(&[in_view, out_of_view, out_of_view, in_view], &[1, 2, 1]));
	let mut renderer = renderer(&device, RendererConfig::default());
	renderer.set_mesh(mesh.clone()).unwrap();
	renderer.set_camera(camera());
	renderer.render_frame();

	let list = renderer.queue().last_submission().unwrap();
	let bindings: Vec<u64> = list
		.commands
		.iter()
		.filter_map(|c| match c {
			RecordedCommand::SetMeshletBuffers { meshlets_offset, .. } => Some(*meshlets_offset),
			_ => None,
		})
		.collect();
	// the second submesh has no visible meshlet and is never bound
	assert_eq!(bindings, [0, 3 * 32]);
	assert_eq!(list.drawn_meshlets, [0, 3]);
	assert_eq!(list.triangles[2..], [[12, 13, 14], [14, 13, 15]]);
}

#[test]
fn model_transform_moves_bounds() {
	let device = HeadlessDevice::new();
	let mesh = load(&device, &mesh_file(&[Vec3::new(100., 0., 0.)], &[1]));
	let mut renderer = renderer(&device, RendererConfig::default());
	renderer.set_mesh(mesh).unwrap();
	renderer.set_camera(camera());
	assert_eq!(renderer.cull().meshlets_visible, 0);

	renderer.set_model_transform(Affine3A::from_translation(Vec3::new(-100., 0., -5.)));
	assert_eq!(renderer.cull().meshlets_visible, 1);
}

#[test]
fn model_scale_grows_bounds() {
	let device = HeadlessDevice::new();
	// center 2 units right of the right plane x = -z at z = -5, radius 1
	let mesh = load(&device, &mesh_file(&[Vec3::new(7.83, 0., -5.)], &[1]));
	let mut renderer = renderer(&device, RendererConfig::default());
	renderer.set_mesh(mesh).unwrap();
	renderer.set_camera(camera());
	assert_eq!(renderer.cull().meshlets_visible, 0);

	// scaling about the center of the sphere only grows its radius
	let center = Vec3::new(7.83, 0., -5.);
	renderer.set_model_transform(
		Affine3A::from_translation(center) * Affine3A::from_scale(Vec3::new(1., 1., 3.)) * Affine3A::from_translation(-center),
	);
	assert_eq!(renderer.cull().meshlets_visible, 1);
}

#[test]
fn rendering_is_deterministic() {
	let device = HeadlessDevice::new();
	let centers: Vec<Vec3> = (0..32).map(|i| Vec3::new(i as f32 - 16., 0., -5.)).collect();
	let mesh = load(&device, &mesh_file(&centers, &[10, 20, 2]));
	let mut renderer = renderer(&device, RendererConfig::default());
	renderer.set_mesh(mesh).unwrap();
	renderer.set_camera(camera());

	let first = renderer.render_frame();
	let second = renderer.render_frame();
	assert_eq!(first, second);
	let lists = renderer.queue().take_submissions();
	assert_eq!(lists.len(), 2);
	assert_eq!(lists[0].commands, lists[1].commands);
	assert_eq!(lists[0].triangles, lists[1].triangles);
	assert_ne!(lists[0].label, lists[1].label);
	assert_eq!(renderer.frame(), 2);
}

#[test]
fn empty_mesh_draws_nothing() {
	let device = HeadlessDevice::new();
	let mesh = load(&device, &MeshFileBuilder::new().to_bytes().unwrap());
	let mut renderer = renderer(&device, RendererConfig::default());
	renderer.set_mesh(mesh).unwrap();
	for viewport in [Viewport::new(1., 1.), Viewport::new(1920., 1080.)] {
		renderer.set_viewport(viewport);
		renderer.set_camera(camera());
		let stats = renderer.render_frame();
		assert_eq!(stats.draw_units, 0);
		assert_eq!(stats.meshlets_total, 0);
	}
	for list in renderer.queue().take_submissions() {
		assert!(
			!list
				.commands
				.iter()
				.any(|c| matches!(c, RecordedCommand::DrawMeshlets(_) | RecordedCommand::SetMeshletBuffers { .. }))
		);
	}
}

#[test]
fn no_mesh_records_nothing() {
	let device = HeadlessDevice::new();
	let mut renderer = renderer(&device, RendererConfig::default());
	assert!(renderer.cull().is_empty());
	assert_eq!(renderer.render_frame().draw_units, 0);
	let list = renderer.queue().last_submission().unwrap();
	assert!(list.commands.is_empty());

	let mesh = load(&device, &mesh_file(&[Vec3::ZERO], &[1]));
	renderer.set_mesh(mesh.clone()).unwrap();
	assert_eq!(renderer.clear_mesh().map(|m| Arc::ptr_eq(&m, &mesh)), Some(true));
	assert!(renderer.mesh().is_none());
}

#[test]
fn incompatible_mesh_is_rejected() {
	let device = HeadlessDevice::new();
	let mut builder = MeshFileBuilder::new();
	let t = builder.push_triangles(&[0, 1, 2, 2, 1, 3]);
	builder.push_submesh([quad(0, t, Vec3::ZERO)]);
	builder.push_vertex_data(&[0; 4 * 24]);
	let bytes = builder.to_bytes().unwrap();
	let mesh = Arc::new(load_mesh_from_bytes("normals", &bytes, &device, &VertexLayout::position_normal()).unwrap());

	let mut renderer = renderer(&device, RendererConfig::default());
	assert_eq!(
		renderer.set_mesh(mesh),
		Err(ConfigError::IncompatibleMesh {
			mesh: "normals".to_string(),
			mesh_layout: VertexLayout::position_normal(),
			pipeline_layout: VertexLayout::position_only(),
		})
	);
	assert!(renderer.mesh().is_none());
}

#[test]
fn renderer_creation_errors() {
	let device = HeadlessDevice::new();
	let result = MeshletRenderer::new(
		&device,
		device.create_command_queue().unwrap(),
		&RenderPipelineDescriptor::new("invalid", VertexLayout::default()),
		RendererConfig::default(),
	);
	assert!(matches!(
		result,
		Err(RendererError::Config(ConfigError::InvalidVertexLayout(VertexLayoutError::Empty)))
	));

	let queue = device.create_command_queue().unwrap();
	device.lose();
	let result = MeshletRenderer::new(
		&device,
		queue,
		&RenderPipelineDescriptor::new("meshlet", VertexLayout::position_only()),
		RendererConfig::default(),
	);
	assert!(matches!(result, Err(RendererError::Device(DeviceError::DeviceLost))));
}

#[test]
fn renderers_share_a_mesh() {
	let device = HeadlessDevice::new();
	let mesh = load(&device, &mesh_file(&[Vec3::ZERO, Vec3::new(0., 0., 5.)], &[2]));
	let mut front = renderer(&device, RendererConfig::default());
	let mut back = renderer(&device, RendererConfig::default());
	front.set_mesh(mesh.clone()).unwrap();
	back.set_mesh(mesh.clone()).unwrap();
	front.set_camera(camera().look_at(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y));
	back.set_camera(camera().look_at(Vec3::ZERO, Vec3::Z, Vec3::Y));
	assert_eq!(front.cull().meshlet_indices(&mesh).collect::<Vec<_>>(), [0]);
	assert_eq!(back.cull().meshlet_indices(&mesh).collect::<Vec<_>>(), [0, 1]);

	drop(front);
	drop(back);
	assert_eq!(device.live_buffers(), 3);
	drop(mesh);
	assert_eq!(device.live_buffers(), 0);
}
