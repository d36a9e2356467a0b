use crate::buffer::{BufferDescriptor, BufferUsage};
use crate::command::{CommandEncoder, CommandQueue, MeshletDraw, Viewport};
use crate::device::{DeviceError, GraphicsDevice};
use crate::headless::device::HeadlessDevice;
use crate::headless::queue::{HeadlessEncoder, RecordedCommand};
use crate::pipeline::{PipelineState, RenderPipelineDescriptor};
use crate::vertex::VertexLayout;
use glam::Vec3;
use meshlet_asset_disk::meshlet::format::MeshFileMeshlet;
use meshlet_asset_disk::shape::sphere::Sphere;

fn storage(label: &str, size: u64) -> BufferDescriptor<'_> {
	BufferDescriptor::new(label, size, BufferUsage::STORAGE)
}

#[test]
fn buffer_accounting() -> Result<(), DeviceError> {
	let device = HeadlessDevice::new();
	let a = device.create_buffer(&storage("a", 4), &[1, 2, 3, 4])?;
	let b = device.create_buffer(&storage("b", 0), &[])?;
	assert_eq!(device.live_buffers(), 2);
	assert_eq!(device.allocated_bytes(), 4);
	assert_ne!(a.id(), b.id());
	assert_eq!(a.contents(), &[1, 2, 3, 4]);

	let a2 = a.clone();
	drop(a);
	assert_eq!(device.live_buffers(), 2);
	drop(a2);
	drop(b);
	assert_eq!(device.live_buffers(), 0);
	assert_eq!(device.allocated_bytes(), 0);
	Ok(())
}

#[test]
fn memory_budget() -> Result<(), DeviceError> {
	let device = HeadlessDevice::with_memory_budget(10);
	let a = device.create_buffer(&storage("a", 8), &[0; 8])?;
	assert_eq!(
		device.create_buffer(&storage("b", 4), &[0; 4]).unwrap_err(),
		DeviceError::OutOfMemory {
			requested: 4,
			available: 2
		}
	);
	assert_eq!(device.live_buffers(), 1);
	drop(a);
	device.create_buffer(&storage("c", 10), &[0; 10])?;
	Ok(())
}

#[test]
fn contents_must_match_size() {
	let device = HeadlessDevice::new();
	assert!(matches!(
		device.create_buffer(&storage("a", 8), &[0; 4]),
		Err(DeviceError::InvalidParameter(_))
	));
	assert_eq!(device.live_buffers(), 0);
}

#[test]
fn buffers_need_usage() {
	let device = HeadlessDevice::new();
	assert!(matches!(
		device.create_buffer(&BufferDescriptor::new("a", 4, BufferUsage::empty()), &[0; 4]),
		Err(DeviceError::ResourceCreation(_))
	));
	assert_eq!(device.live_buffers(), 0);
}

#[test]
fn lost_device() {
	let device = HeadlessDevice::new();
	device.lose();
	assert_eq!(
		device.create_buffer(&storage("a", 0), &[]).unwrap_err(),
		DeviceError::DeviceLost
	);
	assert!(device.create_command_queue().is_err());
}

#[test]
fn pipeline_validates_layout() -> Result<(), DeviceError> {
	let device = HeadlessDevice::new();
	let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor::new(
		"meshlet",
		VertexLayout::position_normal(),
	))?;
	assert_eq!(pipeline.label(), "meshlet");
	assert_eq!(pipeline.vertex_layout(), &VertexLayout::position_normal());

	let invalid = RenderPipelineDescriptor::new("invalid", VertexLayout::default());
	assert!(matches!(
		device.create_render_pipeline(&invalid),
		Err(DeviceError::InvalidParameter(_))
	));
	Ok(())
}

#[test]
fn emulates_meshlet_stage() -> Result<(), DeviceError> {
	let device = HeadlessDevice::new();
	let meshlets = [
		MeshFileMeshlet {
			vertex_offset: 0,
			vertex_count: 3,
			triangle_offset: 0,
			triangle_count: 1,
			bounds: Sphere::new(Vec3::ZERO, 1.),
		},
		MeshFileMeshlet {
			vertex_offset: 10,
			vertex_count: 4,
			triangle_offset: 3,
			triangle_count: 2,
			bounds: Sphere::new(Vec3::ZERO, 1.),
		},
	];
	let meshlet_bytes: &[u8] = bytemuck::cast_slice(&meshlets);
	let meshlet_buffer = device.create_buffer(&storage("meshlets", meshlet_bytes.len() as u64), meshlet_bytes)?;
	let triangles = [2, 1, 0, 0, 1, 2, 1, 3, 2];
	let triangle_buffer = device.create_buffer(&storage("triangles", triangles.len() as u64), &triangles)?;

	let queue = device.create_command_queue()?;
	let mut encoder = queue.create_encoder("frame");
	encoder.set_viewport(&Viewport::new(640., 480.));
	encoder.set_meshlet_buffers(&meshlet_buffer, 32, &triangle_buffer, 0);
	encoder.draw_meshlets(MeshletDraw {
		first_meshlet: 0,
		meshlet_count: 1,
	});
	encoder.set_meshlet_buffers(&meshlet_buffer, 0, &triangle_buffer, 0);
	encoder.draw_meshlets(MeshletDraw {
		first_meshlet: 0,
		meshlet_count: 2,
	});
	assert_eq!(encoder.commands().len(), 5);
	assert_eq!(
		encoder.commands()[1],
		RecordedCommand::SetMeshletBuffers {
			meshlets: meshlet_buffer.id(),
			meshlets_offset: 32,
			triangles: triangle_buffer.id(),
			triangles_offset: 0,
		}
	);
	queue.submit(encoder);

	let list = queue.last_submission().unwrap();
	assert_eq!(list.label, "frame");
	assert_eq!(list.drawn_meshlets, [1, 0, 1]);
	assert_eq!(
		list.triangles,
		[[10, 11, 12], [11, 13, 12], [2, 1, 0], [10, 11, 12], [11, 13, 12]]
	);
	assert_eq!(list.stats.draw_calls, 2);
	assert_eq!(list.stats.meshlets, 3);
	assert_eq!(list.stats.triangles, 5);
	assert_eq!(list.stats.invalid_meshlets, 0);
	assert_eq!(queue.take_submissions().len(), 1);
	assert_eq!(queue.submission_count(), 0);
	Ok(())
}

#[test]
fn out_of_bounds_draws_are_counted() -> Result<(), DeviceError> {
	let device = HeadlessDevice::new();
	let meshlet = MeshFileMeshlet {
		vertex_count: 3,
		triangle_count: 1,
		..MeshFileMeshlet::default()
	};
	let meshlet_buffer = device.create_buffer(&storage("meshlets", 32), bytemuck::bytes_of(&meshlet))?;
	let triangle_buffer = device.create_buffer(&storage("triangles", 3), &[0, 1, 2])?;

	let mut encoder = HeadlessEncoder::new("frame");
	encoder.draw_meshlets(MeshletDraw {
		first_meshlet: 0,
		meshlet_count: 1,
	});
	encoder.set_meshlet_buffers(&meshlet_buffer, 0, &triangle_buffer, 0);
	encoder.draw_meshlets(MeshletDraw {
		first_meshlet: 0,
		meshlet_count: 2,
	});
	let stats = encoder.stats();
	assert_eq!(stats.meshlets, 1);
	assert_eq!(stats.invalid_meshlets, 2);
	Ok(())
}

#[test]
fn viewport_aspect_ratio() {
	assert_eq!(Viewport::new(1920., 1080.).aspect_ratio(), 1920. / 1080.);
}
