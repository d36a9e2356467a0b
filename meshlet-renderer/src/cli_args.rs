use clap::{Args, Parser, Subcommand, ValueEnum};
use glam::Vec3;
use meshlet_gpu::vertex::VertexLayout;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
	#[clap(subcommand)]
	pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
	/// Print the header, tables and statistics of a mesh file
	Inspect(InspectArgs),
	/// Load a mesh file and render frames on the headless device
	Render(RenderArgs),
}

#[derive(Args)]
pub struct InspectArgs {
	pub path: PathBuf,
	/// vertex layout used to derive the vertex count
	#[clap(long, value_enum, default_value_t)]
	pub layout: LayoutPreset,
	/// list every meshlet
	#[clap(long, action)]
	pub meshlets: bool,
}

#[derive(Args)]
pub struct RenderArgs {
	pub path: PathBuf,
	#[clap(long, value_enum, default_value_t)]
	pub layout: LayoutPreset,
	/// camera position as `x,y,z`
	#[clap(long, value_parser = parse_vec3, default_value = "0,0,5", allow_hyphen_values = true)]
	pub eye: Vec3,
	/// point the camera looks at as `x,y,z`
	#[clap(long, value_parser = parse_vec3, default_value = "0,0,0", allow_hyphen_values = true)]
	pub target: Vec3,
	/// vertical field of view in degrees
	#[clap(long, default_value_t = 60.)]
	pub fov: f32,
	#[clap(long, default_value_t = 0.1)]
	pub near: f32,
	#[clap(long, default_value_t = 1000.)]
	pub far: f32,
	#[clap(long, default_value_t = 1920)]
	pub width: u32,
	#[clap(long, default_value_t = 1080)]
	pub height: u32,
	#[clap(long, default_value_t = 1)]
	pub frames: u32,
	/// degrees the camera orbits around the target each frame
	#[clap(long, default_value_t = 0., allow_hyphen_values = true)]
	pub orbit: f32,
	/// merge consecutive visible meshlets into a single draw
	#[clap(long, action)]
	pub contiguous: bool,
	/// disable frustum culling
	#[clap(long, action)]
	pub no_cull: bool,
	/// limit device memory to this many bytes
	#[clap(long)]
	pub memory_budget: Option<u64>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LayoutPreset {
	#[default]
	Position,
	PositionNormal,
	PositionNormalTexCoord,
	SplitPosition,
}

impl LayoutPreset {
	pub fn vertex_layout(self) -> VertexLayout {
		match self {
			LayoutPreset::Position => VertexLayout::position_only(),
			LayoutPreset::PositionNormal => VertexLayout::position_normal(),
			LayoutPreset::PositionNormalTexCoord => VertexLayout::position_normal_tex_coord(),
			LayoutPreset::SplitPosition => VertexLayout::split_position(),
		}
	}
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
	let components = s
		.split(',')
		.map(|c| c.trim().parse::<f32>().map_err(|e| format!("{c:?}: {e}")))
		.collect::<Result<Vec<_>, _>>()?;
	match components[..] {
		[x, y, z] => Ok(Vec3::new(x, y, z)),
		_ => Err(format!("expected 3 components as `x,y,z` but got {}", components.len())),
	}
}
