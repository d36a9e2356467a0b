use crate::shape::sphere::Sphere;
use bytemuck_derive::{Pod, Zeroable};
use core::ops::Range;
use static_assertions::{const_assert, const_assert_eq};

// the tables are uploaded as-is, so the host layout must match the little-endian file layout
const_assert!(cfg!(target_endian = "little"));

/// Tag at the very start of a tagged mesh file, followed by a little-endian u32 [`MESH_FILE_VERSION`].
pub const MESH_FILE_TAG: [u8; 4] = *b"MSHL";
pub const MESH_FILE_VERSION: u32 = 1;
/// Size of tag plus version preceding the header of a tagged file.
pub const MESH_FILE_TAG_SIZE: usize = 8;

/// Indices per meshlet triangle in the triangle blob, each index is a single byte local to its meshlet.
pub const INDICES_PER_TRIANGLE: usize = 3;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Pod, Zeroable)]
pub struct MeshFileHeader {
	/// offset in bytes from the start of the file to submesh entries
	pub submesh_offset: u32,
	pub submesh_count: u32,
	/// offset in bytes from the start of the file to meshlet entries
	pub meshlets_offset: u32,
	pub meshlet_count: u32,
	/// offset in bytes from the start of the file to the vertex data
	pub vertex_data_offset: u32,
	pub vertex_data_length: u32,
	/// offset in bytes from the start of the file to the meshlet triangle data
	pub meshlet_triangles_offset: u32,
	pub meshlet_triangles_length: u32,
}
const_assert_eq!(size_of::<MeshFileHeader>(), 8 * 4);

/// A contiguous run of the global meshlet table.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Pod, Zeroable)]
pub struct MeshFileSubmesh {
	pub meshlets_start_index: u32,
	pub meshlets_count: u32,
}
const_assert_eq!(size_of::<MeshFileSubmesh>(), 2 * 4);

impl MeshFileSubmesh {
	pub fn meshlet_range(&self) -> Range<usize> {
		let start = self.meshlets_start_index as usize;
		start..start + self.meshlets_count as usize
	}
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshFileMeshlet {
	/// first vertex of this meshlet, local triangle indices are relative to it
	pub vertex_offset: u32,
	pub vertex_count: u32,
	/// first index of this meshlet within the triangle blob, 3 indices per triangle
	pub triangle_offset: u32,
	pub triangle_count: u32,
	pub bounds: Sphere,
}
const_assert_eq!(size_of::<MeshFileMeshlet>(), 8 * 4);

impl MeshFileMeshlet {
	pub fn vertex_range(&self) -> Range<u64> {
		let start = self.vertex_offset as u64;
		start..start + self.vertex_count as u64
	}

	/// Range of byte indices within the triangle blob.
	pub fn triangle_index_range(&self) -> Range<u64> {
		let start = self.triangle_offset as u64;
		start..start + self.triangle_count as u64 * INDICES_PER_TRIANGLE as u64
	}
}

/// Whether the file was prefixed by [`MESH_FILE_TAG`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MeshFileTag {
	Untagged,
	Tagged { version: u32 },
}

impl MeshFileTag {
	/// Byte offset of the header.
	pub fn header_offset(&self) -> usize {
		match self {
			MeshFileTag::Untagged => 0,
			MeshFileTag::Tagged { .. } => MESH_FILE_TAG_SIZE,
		}
	}
}
