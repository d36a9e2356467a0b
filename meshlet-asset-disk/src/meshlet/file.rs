use crate::meshlet::error::{FormatError, MeshFileRegion};
use crate::meshlet::format::{
	INDICES_PER_TRIANGLE, MESH_FILE_TAG, MESH_FILE_TAG_SIZE, MESH_FILE_VERSION, MeshFileHeader, MeshFileMeshlet,
	MeshFileSubmesh, MeshFileTag,
};
use crate::meshlet::stats::MeshStats;
use crate::shape::sphere::Sphere;
use bytemuck::Pod;
use core::ops::Range;

/// A validated, zero-copy view of a mesh file.
///
/// Can only be constructed by [`MeshFile::parse`], which bounds-checks every table and every meshlet before use. All
/// accessors may therefore slice the underlying bytes without further checks.
#[derive(Copy, Clone, Debug)]
pub struct MeshFile<'a> {
	bytes: &'a [u8],
	tag: MeshFileTag,
	header: MeshFileHeader,
}

impl<'a> MeshFile<'a> {
	#[profiling::function]
	pub fn parse(bytes: &'a [u8]) -> Result<Self, FormatError> {
		let tag = detect_tag(bytes)?;
		let header_start = tag.header_offset();
		let header_end = header_start + size_of::<MeshFileHeader>();
		if bytes.len() < header_end {
			return Err(FormatError::TooShort {
				len: bytes.len(),
				required: header_end,
			});
		}
		let header: MeshFileHeader = bytemuck::pod_read_unaligned(&bytes[header_start..header_end]);
		let file = Self { bytes, tag, header };
		file.check_regions()?;
		file.check_submeshes()?;
		file.check_meshlets()?;
		log::trace!(
			"parsed mesh file of {} bytes: {} submeshes, {} meshlets",
			bytes.len(),
			header.submesh_count,
			header.meshlet_count
		);
		Ok(file)
	}

	pub fn tag(&self) -> MeshFileTag {
		self.tag
	}

	pub fn header(&self) -> &MeshFileHeader {
		&self.header
	}

	pub fn file_length(&self) -> usize {
		self.bytes.len()
	}

	/// Byte offset and length of a region as declared by the header.
	pub fn region(&self, region: MeshFileRegion) -> (u64, u64) {
		let h = &self.header;
		match region {
			MeshFileRegion::Submeshes => (
				h.submesh_offset as u64,
				h.submesh_count as u64 * size_of::<MeshFileSubmesh>() as u64,
			),
			MeshFileRegion::Meshlets => (
				h.meshlets_offset as u64,
				h.meshlet_count as u64 * size_of::<MeshFileMeshlet>() as u64,
			),
			MeshFileRegion::VertexData => (h.vertex_data_offset as u64, h.vertex_data_length as u64),
			MeshFileRegion::MeshletTriangles => (h.meshlet_triangles_offset as u64, h.meshlet_triangles_length as u64),
		}
	}

	pub fn region_bytes(&self, region: MeshFileRegion) -> &'a [u8] {
		let (offset, length) = self.region(region);
		&self.bytes[offset as usize..(offset + length) as usize]
	}

	pub fn submeshes(&self) -> impl ExactSizeIterator<Item = MeshFileSubmesh> + use<'a> {
		records(self.region_bytes(MeshFileRegion::Submeshes))
	}

	pub fn meshlets(&self) -> impl ExactSizeIterator<Item = MeshFileMeshlet> + use<'a> {
		records(self.region_bytes(MeshFileRegion::Meshlets))
	}

	pub fn meshlet(&self, index: usize) -> Option<MeshFileMeshlet> {
		let size = size_of::<MeshFileMeshlet>();
		let start = index.checked_mul(size)?;
		let bytes = self.meshlet_table_bytes().get(start..start + size)?;
		Some(bytemuck::pod_read_unaligned(bytes))
	}

	/// The meshlet table exactly as it is laid out in the file and on the GPU.
	pub fn meshlet_table_bytes(&self) -> &'a [u8] {
		self.region_bytes(MeshFileRegion::Meshlets)
	}

	pub fn vertex_data(&self) -> &'a [u8] {
		self.region_bytes(MeshFileRegion::VertexData)
	}

	pub fn meshlet_triangles(&self) -> &'a [u8] {
		self.region_bytes(MeshFileRegion::MeshletTriangles)
	}

	/// Local triangle indices of `meshlet`, 3 per triangle. Empty if `meshlet` does not belong to this file.
	pub fn meshlet_triangle_indices(&self, meshlet: &MeshFileMeshlet) -> &'a [u8] {
		let range = meshlet.triangle_index_range();
		self.meshlet_triangles()
			.get(range.start as usize..range.end as usize)
			.unwrap_or_default()
	}

	/// Triangles of `meshlet` with their local indices resolved against the meshlet's vertex range.
	pub fn resolve_triangles(&self, meshlet: &MeshFileMeshlet) -> impl Iterator<Item = [u32; 3]> + use<'a> {
		let base = meshlet.vertex_offset;
		self.meshlet_triangle_indices(meshlet)
			.chunks_exact(INDICES_PER_TRIANGLE)
			.map(move |t| [base + t[0] as u32, base + t[1] as u32, base + t[2] as u32])
	}

	/// Checks that every meshlet addresses only vertices below `vertex_count`. The vertex count depends on the vertex
	/// layout, which is not part of the file, so this can't happen in [`Self::parse`].
	pub fn validate_vertex_ranges(&self, vertex_count: u32) -> Result<(), FormatError> {
		for (meshlet, m) in self.meshlets().enumerate() {
			let Range { start, end } = m.vertex_range();
			if end > vertex_count as u64 {
				return Err(FormatError::VertexRange {
					meshlet,
					start,
					end,
					vertex_count,
				});
			}
		}
		Ok(())
	}

	pub fn stats(&self, vertex_count: u32) -> MeshStats {
		let bounds: Vec<Sphere> = self.meshlets().map(|m| m.bounds).collect();
		MeshStats {
			submeshes: self.header.submesh_count as u64,
			meshlets: self.header.meshlet_count as u64,
			triangles: self.meshlets().map(|m| m.triangle_count as u64).sum(),
			vertices: vertex_count as u64,
			meshlet_vertices: self.meshlets().map(|m| m.vertex_count as u64).sum(),
			bounds: Sphere::merge_spheres_approx(&bounds),
		}
	}

	fn check_regions(&self) -> Result<(), FormatError> {
		let file_length = self.bytes.len() as u64;
		for region in MeshFileRegion::ALL {
			let (offset, length) = self.region(region);
			// both operands are below 2^37, no overflow possible
			if offset + length > file_length {
				return Err(FormatError::OutOfBounds {
					region,
					offset,
					length,
					file_length,
				});
			}
		}
		Ok(())
	}

	fn check_submeshes(&self) -> Result<(), FormatError> {
		let meshlet_count = self.header.meshlet_count;
		for (submesh, s) in self.submeshes().enumerate() {
			if s.meshlets_start_index as u64 + s.meshlets_count as u64 > meshlet_count as u64 {
				return Err(FormatError::SubmeshRange {
					submesh,
					start: s.meshlets_start_index,
					count: s.meshlets_count,
					meshlet_count,
				});
			}
		}
		Ok(())
	}

	fn check_meshlets(&self) -> Result<(), FormatError> {
		let triangles = self.meshlet_triangles();
		for (meshlet, m) in self.meshlets().enumerate() {
			if m.vertex_count == 0 || m.triangle_count == 0 {
				return Err(FormatError::DegenerateMeshlet {
					meshlet,
					vertex_count: m.vertex_count,
					triangle_count: m.triangle_count,
				});
			}
			if !m.bounds.is_valid() {
				return Err(FormatError::InvalidBounds {
					meshlet,
					radius: m.bounds.radius,
				});
			}
			let range = m.triangle_index_range();
			if range.end > triangles.len() as u64 {
				return Err(FormatError::TriangleRange {
					meshlet,
					offset: m.triangle_offset,
					count: m.triangle_count,
					length: self.header.meshlet_triangles_length,
				});
			}
			let indices = &triangles[range.start as usize..range.end as usize];
			if let Some(&index) = indices.iter().find(|&&i| i as u32 >= m.vertex_count) {
				return Err(FormatError::TriangleIndex {
					meshlet,
					index,
					vertex_count: m.vertex_count,
				});
			}
		}
		Ok(())
	}
}

fn detect_tag(bytes: &[u8]) -> Result<MeshFileTag, FormatError> {
	if bytes.len() >= MESH_FILE_TAG_SIZE && bytes[..MESH_FILE_TAG.len()] == MESH_FILE_TAG {
		let version: u32 = bytemuck::pod_read_unaligned(&bytes[MESH_FILE_TAG.len()..MESH_FILE_TAG_SIZE]);
		if version != MESH_FILE_VERSION {
			return Err(FormatError::UnsupportedVersion {
				found: version,
				supported: MESH_FILE_VERSION,
			});
		}
		Ok(MeshFileTag::Tagged { version })
	} else {
		Ok(MeshFileTag::Untagged)
	}
}

fn records<T: Pod>(bytes: &[u8]) -> impl ExactSizeIterator<Item = T> + '_ {
	bytes.chunks_exact(size_of::<T>()).map(bytemuck::pod_read_unaligned::<T>)
}
