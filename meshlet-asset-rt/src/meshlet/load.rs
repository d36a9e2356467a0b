use crate::meshlet::error::LoadError;
use crate::meshlet::mesh::{BufferId, Mesh, MeshBuffer, Submesh};
use crate::uploader::Uploader;
use futures::channel::oneshot;
use meshlet_asset_disk::meshlet::error::FormatError;
use meshlet_asset_disk::meshlet::file::MeshFile;
use meshlet_asset_disk::meshlet::format::MeshFileMeshlet;
use meshlet_gpu::buffer::BufferUsage;
use meshlet_gpu::device::GraphicsDevice;
use meshlet_gpu::vertex::VertexLayout;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Reads and uploads the mesh file at `path`, interpreting its vertex data with `layout`.
///
/// Either the whole mesh is created or nothing: on any error all buffers created so far are released again.
pub fn load_mesh<D: GraphicsDevice>(
	path: impl AsRef<Path>,
	device: &D,
	layout: &VertexLayout,
) -> Result<Mesh<D>, LoadError> {
	profiling::function_scope!();
	let path = path.as_ref();
	layout.validate()?;
	let bytes = {
		profiling::scope!("fs::read");
		fs::read(path)?
	};
	load_mesh_from_bytes(&path.display().to_string(), &bytes, device, layout)
}

/// Like [`load_mesh`] on a file already in memory, `label` names the created buffers.
pub fn load_mesh_from_bytes<D: GraphicsDevice>(
	label: &str,
	bytes: &[u8],
	device: &D,
	layout: &VertexLayout,
) -> Result<Mesh<D>, LoadError> {
	profiling::function_scope!();
	layout.validate()?;
	let file = MeshFile::parse(bytes)?;
	let vertex_count = vertex_count(file.header().vertex_data_length, layout)?;
	file.validate_vertex_ranges(vertex_count)?;
	let meshlets: Vec<MeshFileMeshlet> = file.meshlets().collect();

	let uploader = Uploader::new(device, label);
	let buffers = [
		uploader.upload_buffer_bytes("vertex data", BufferUsage::VERTEX, file.vertex_data())?,
		uploader.upload_buffer_slice("meshlets", BufferUsage::STORAGE, &meshlets)?,
		uploader.upload_buffer_bytes("meshlet triangles", BufferUsage::STORAGE, file.meshlet_triangles())?,
	];

	let vertex_buffers = layout
		.stream_offsets(vertex_count)
		.map(|offset| MeshBuffer::new(BufferId::VertexData, offset))
		.collect();
	let submeshes = file
		.submeshes()
		.map(|s| Submesh {
			meshlet_start: s.meshlets_start_index,
			meshlet_count: s.meshlets_count,
			meshlet_buffer: MeshBuffer::new(
				BufferId::Meshlets,
				s.meshlets_start_index as u64 * size_of::<MeshFileMeshlet>() as u64,
			),
			meshlet_triangle_buffer: MeshBuffer::new(BufferId::MeshletTriangles, 0),
		})
		.collect();
	let stats = file.stats(vertex_count);
	log::debug!(
		"loaded mesh {:?} on {}: {} submeshes, {} meshlets, {} triangles, {} vertices",
		label,
		device.name(),
		stats.submeshes,
		stats.meshlets,
		stats.triangles,
		stats.vertices
	);

	Ok(Mesh {
		label: label.to_string(),
		vertex_layout: layout.clone(),
		buffers,
		vertex_buffers,
		submeshes,
		meshlets,
		vertex_count,
		stats,
	})
}

/// Number of vertices in a vertex blob of `length` bytes.
pub fn vertex_count(length: u32, layout: &VertexLayout) -> Result<u32, FormatError> {
	let stride = layout.total_stride();
	if stride == 0 || length as u64 % stride != 0 {
		return Err(FormatError::VertexDataLength { length, stride });
	}
	Ok((length as u64 / stride) as u32)
}

/// Loads the mesh at `path` on the rayon thread pool.
///
/// The returned future resolves once the mesh is fully uploaded. Dropping the future abandons the load: a load that
/// has not started yet is skipped, a finished mesh is discarded without ever being handed out.
pub fn load_mesh_background<D: GraphicsDevice>(
	path: impl Into<PathBuf>,
	device: Arc<D>,
	layout: VertexLayout,
) -> impl Future<Output = Result<Arc<Mesh<D>>, LoadError>> + Send + 'static {
	let path = path.into();
	let (sender, receiver) = oneshot::channel();
	rayon::spawn(move || {
		if sender.is_canceled() {
			log::debug!("load of {} abandoned before it started", path.display());
			return;
		}
		let result = load_mesh(&path, &*device, &layout).map(Arc::new);
		if sender.send(result).is_err() {
			log::warn!("load of {} abandoned, discarding the loaded mesh", path.display());
		}
	});
	async move { receiver.await.unwrap_or(Err(LoadError::WorkerLost)) }
}
