use crate::cli_args::InspectArgs;
use anyhow::Context;
use meshlet_asset_disk::meshlet::error::MeshFileRegion;
use meshlet_asset_disk::meshlet::file::MeshFile;
use meshlet_asset_rt::meshlet::load::vertex_count;

pub fn inspect(args: &InspectArgs) -> anyhow::Result<()> {
	profiling::function_scope!();
	let bytes = std::fs::read(&args.path).with_context(|| format!("failed to read {}", args.path.display()))?;
	let file = MeshFile::parse(&bytes).with_context(|| format!("malformed mesh file {}", args.path.display()))?;

	println!("{}: {} bytes, {:?}", args.path.display(), file.file_length(), file.tag());
	for region in MeshFileRegion::ALL {
		let (offset, length) = file.region(region);
		println!("  {region:<18} offset {offset:>10} length {length:>10}");
	}

	let layout = args.layout.vertex_layout();
	let vertices = match vertex_count(file.header().vertex_data_length, &layout) {
		Ok(vertices) => vertices,
		Err(e) => {
			log::warn!("{e}, counting vertices as 0");
			0
		}
	};
	if let Err(e) = file.validate_vertex_ranges(vertices) {
		log::warn!("{e}");
	}

	let stats = file.stats(vertices);
	println!(
		"{} submeshes, {} meshlets, {} triangles, {} vertices ({} referenced by meshlets)",
		stats.submeshes, stats.meshlets, stats.triangles, stats.vertices, stats.meshlet_vertices
	);
	if let Some(bounds) = stats.bounds {
		println!("bounds: center {} radius {}", bounds.center, bounds.radius);
	}

	for (i, submesh) in file.submeshes().enumerate() {
		println!(
			"submesh {i}: meshlets {}..{}",
			submesh.meshlets_start_index,
			submesh.meshlets_start_index + submesh.meshlets_count
		);
	}
	if args.meshlets {
		for (i, m) in file.meshlets().enumerate() {
			println!(
				"meshlet {i}: vertices {}+{}, triangles {}+{}, bounds {} radius {}",
				m.vertex_offset, m.vertex_count, m.triangle_offset, m.triangle_count, m.bounds.center, m.bounds.radius
			);
		}
	}
	Ok(())
}
