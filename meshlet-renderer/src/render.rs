use crate::cli_args::RenderArgs;
use crate::frame_timer::FrameTimer;
use anyhow::{Context, ensure};
use glam::{Affine3A, Quat, Vec3};
use meshlet_asset_rt::meshlet::load::load_mesh_background;
use meshlet_engine::renderer::camera::Camera;
use meshlet_engine::renderer::config::{DrawBatching, RendererConfig};
use meshlet_engine::renderer::meshlet::meshlet_renderer::MeshletRenderer;
use meshlet_gpu::command::Viewport;
use meshlet_gpu::device::GraphicsDevice;
use meshlet_gpu::headless::device::HeadlessDevice;
use meshlet_gpu::pipeline::RenderPipelineDescriptor;
use std::sync::Arc;

pub fn render(args: &RenderArgs) -> anyhow::Result<()> {
	ensure!(args.width > 0 && args.height > 0, "viewport must not be empty");
	ensure!(
		0. < args.near && args.near < args.far,
		"near plane {} must be positive and before the far plane {}",
		args.near,
		args.far
	);
	ensure!(args.eye != args.target, "camera eye and target must differ");

	rayon::ThreadPoolBuilder::new()
		.thread_name(|i| format!("rayon worker {i}"))
		.build_global()?;

	let device = Arc::new(match args.memory_budget {
		Some(budget) => HeadlessDevice::with_memory_budget(budget),
		None => HeadlessDevice::new(),
	});
	let layout = args.layout.vertex_layout();

	let mesh = pollster::block_on(load_mesh_background(
		args.path.clone(),
		device.clone(),
		layout.clone(),
	))
	.with_context(|| format!("failed to load {}", args.path.display()))?;
	log::info!(
		"loaded {}: {} meshlets, {} triangles, {} bytes on device",
		mesh.label(),
		mesh.stats().meshlets,
		mesh.stats().triangles,
		device.allocated_bytes()
	);

	let config = RendererConfig {
		frustum_culling: !args.no_cull,
		batching: if args.contiguous {
			DrawBatching::Contiguous
		} else {
			DrawBatching::PerMeshlet
		},
		..RendererConfig::default()
	};
	let mut renderer = MeshletRenderer::new(
		&*device,
		device.create_command_queue()?,
		&RenderPipelineDescriptor::new("meshlet", layout),
		config,
	)?;
	renderer.set_mesh(mesh)?;
	let viewport = Viewport::new(args.width as f32, args.height as f32);
	renderer.set_viewport(viewport);
	let camera = Camera::new_perspective(
		args.fov.to_radians(),
		viewport.aspect_ratio(),
		args.near,
		args.far,
		Affine3A::IDENTITY,
	);

	let mut timer = FrameTimer::new();
	for frame in 0..args.frames {
		let rotation = Quat::from_rotation_y((args.orbit * frame as f32).to_radians());
		let eye = args.target + rotation * (args.eye - args.target);
		renderer.set_camera(camera.look_at(eye, args.target, Vec3::Y));

		let stats = renderer.render_frame();
		for list in renderer.queue().take_submissions() {
			if list.stats.invalid_meshlets > 0 {
				log::warn!("{}: {} meshlets failed to draw", list.label, list.stats.invalid_meshlets);
			}
		}
		let time = timer.next();
		println!(
			"frame {frame}: {}/{} meshlets visible, {} draws, {} triangles, {:.3} ms",
			stats.meshlets_visible,
			stats.meshlets_total,
			stats.draw_units,
			stats.triangles,
			time.as_secs_f64() * 1000.
		);
		profiling::finish_frame!();
	}

	let summary = timer.summary();
	println!(
		"{} frames: min {:.3} ms, avg {:.3} ms, max {:.3} ms",
		summary.frames,
		summary.min.as_secs_f64() * 1000.,
		summary.avg.as_secs_f64() * 1000.,
		summary.max.as_secs_f64() * 1000.
	);
	Ok(())
}
