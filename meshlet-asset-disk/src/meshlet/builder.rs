use crate::meshlet::error::FormatError;
use crate::meshlet::format::{
	MESH_FILE_TAG, MESH_FILE_TAG_SIZE, MESH_FILE_VERSION, MeshFileHeader, MeshFileMeshlet, MeshFileSubmesh,
};
use std::io;
use std::io::Write;

/// Writes mesh files. Tables are packed back to back in the order
/// `[tag] header, submeshes, meshlets, vertex data, meshlet triangles`.
///
/// The builder does not validate meshlets, feed the result through [`MeshFile::parse`](crate::meshlet::file::MeshFile::parse)
/// if the input is untrusted.
#[derive(Clone, Debug, Default)]
pub struct MeshFileBuilder {
	tagged: bool,
	submeshes: Vec<MeshFileSubmesh>,
	meshlets: Vec<MeshFileMeshlet>,
	vertex_data: Vec<u8>,
	meshlet_triangles: Vec<u8>,
}

impl MeshFileBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Prefix the file with tag and version.
	pub fn tagged(mut self, tagged: bool) -> Self {
		self.tagged = tagged;
		self
	}

	/// Appends `meshlets` to the meshlet table as a new submesh and returns the submesh index.
	pub fn push_submesh(&mut self, meshlets: impl IntoIterator<Item = MeshFileMeshlet>) -> u32 {
		let start = self.meshlets.len() as u32;
		self.meshlets.extend(meshlets);
		self.submeshes.push(MeshFileSubmesh {
			meshlets_start_index: start,
			meshlets_count: self.meshlets.len() as u32 - start,
		});
		self.submeshes.len() as u32 - 1
	}

	/// Appends a raw submesh record, allowing submeshes to share or skip meshlets.
	pub fn push_submesh_record(&mut self, submesh: MeshFileSubmesh) -> &mut Self {
		self.submeshes.push(submesh);
		self
	}

	/// Appends raw vertex bytes and returns the byte offset they were written at within the vertex data.
	pub fn push_vertex_data(&mut self, bytes: &[u8]) -> u32 {
		let offset = self.vertex_data.len() as u32;
		self.vertex_data.extend_from_slice(bytes);
		offset
	}

	/// Appends local triangle indices and returns the index to use as [`MeshFileMeshlet::triangle_offset`].
	pub fn push_triangles(&mut self, indices: &[u8]) -> u32 {
		let offset = self.meshlet_triangles.len() as u32;
		self.meshlet_triangles.extend_from_slice(indices);
		offset
	}

	pub fn header(&self) -> Result<MeshFileHeader, FormatError> {
		let start = if self.tagged { MESH_FILE_TAG_SIZE as u64 } else { 0 };
		let submesh_offset = start + size_of::<MeshFileHeader>() as u64;
		let meshlets_offset = submesh_offset + size_of_val(self.submeshes.as_slice()) as u64;
		let vertex_data_offset = meshlets_offset + size_of_val(self.meshlets.as_slice()) as u64;
		let meshlet_triangles_offset = vertex_data_offset + self.vertex_data.len() as u64;
		let size = meshlet_triangles_offset + self.meshlet_triangles.len() as u64;
		if size > u32::MAX as u64 {
			return Err(FormatError::TooLarge { size });
		}
		Ok(MeshFileHeader {
			submesh_offset: submesh_offset as u32,
			submesh_count: self.submeshes.len() as u32,
			meshlets_offset: meshlets_offset as u32,
			meshlet_count: self.meshlets.len() as u32,
			vertex_data_offset: vertex_data_offset as u32,
			vertex_data_length: self.vertex_data.len() as u32,
			meshlet_triangles_offset: meshlet_triangles_offset as u32,
			meshlet_triangles_length: self.meshlet_triangles.len() as u32,
		})
	}

	pub fn to_bytes(&self) -> Result<Vec<u8>, FormatError> {
		let header = self.header()?;
		let mut out = Vec::with_capacity((header.meshlet_triangles_offset + header.meshlet_triangles_length) as usize);
		if self.tagged {
			out.extend_from_slice(&MESH_FILE_TAG);
			out.extend_from_slice(&MESH_FILE_VERSION.to_le_bytes());
		}
		out.extend_from_slice(bytemuck::bytes_of(&header));
		out.extend_from_slice(bytemuck::cast_slice(&self.submeshes));
		out.extend_from_slice(bytemuck::cast_slice(&self.meshlets));
		out.extend_from_slice(&self.vertex_data);
		out.extend_from_slice(&self.meshlet_triangles);
		Ok(out)
	}

	pub fn write_to(&self, mut write: impl Write) -> io::Result<()> {
		profiling::function_scope!();
		let bytes = self.to_bytes().map_err(io::Error::other)?;
		write.write_all(&bytes)
	}
}
