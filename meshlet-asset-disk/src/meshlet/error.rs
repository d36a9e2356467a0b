use core::fmt::{Display, Formatter};

/// The tables and blobs of a mesh file.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MeshFileRegion {
	Submeshes,
	Meshlets,
	VertexData,
	MeshletTriangles,
}

impl MeshFileRegion {
	pub const ALL: [MeshFileRegion; 4] = [
		MeshFileRegion::Submeshes,
		MeshFileRegion::Meshlets,
		MeshFileRegion::VertexData,
		MeshFileRegion::MeshletTriangles,
	];
}

impl Display for MeshFileRegion {
	fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
		match self {
			MeshFileRegion::Submeshes => f.pad("submesh table"),
			MeshFileRegion::Meshlets => f.pad("meshlet table"),
			MeshFileRegion::VertexData => f.pad("vertex data"),
			MeshFileRegion::MeshletTriangles => f.pad("meshlet triangles"),
		}
	}
}

/// A mesh file is corrupt, truncated or addresses data outside of itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
	#[error("file is {len} bytes long but the header requires at least {required} bytes")]
	TooShort { len: usize, required: usize },
	#[error("unsupported mesh file version {found}, expected {supported}")]
	UnsupportedVersion { found: u32, supported: u32 },
	#[error("{region} at offset {offset} with length {length} exceeds the file length of {file_length} bytes")]
	OutOfBounds {
		region: MeshFileRegion,
		offset: u64,
		length: u64,
		file_length: u64,
	},
	#[error("submesh {submesh} covers meshlets {start}..{start}+{count} but there are only {meshlet_count} meshlets")]
	SubmeshRange {
		submesh: usize,
		start: u32,
		count: u32,
		meshlet_count: u32,
	},
	#[error("meshlet {meshlet} is degenerate with {vertex_count} vertices and {triangle_count} triangles")]
	DegenerateMeshlet {
		meshlet: usize,
		vertex_count: u32,
		triangle_count: u32,
	},
	#[error("meshlet {meshlet} has invalid bounds with radius {radius}")]
	InvalidBounds { meshlet: usize, radius: f32 },
	#[error("meshlet {meshlet} reads {count} triangles at index {offset} beyond the {length} triangle indices")]
	TriangleRange {
		meshlet: usize,
		offset: u32,
		count: u32,
		length: u32,
	},
	#[error("meshlet {meshlet} references local vertex {index} but only has {vertex_count} vertices")]
	TriangleIndex {
		meshlet: usize,
		index: u8,
		vertex_count: u32,
	},
	#[error("vertex data length {length} is not a multiple of the vertex stride {stride}")]
	VertexDataLength { length: u32, stride: u64 },
	#[error("meshlet {meshlet} covers vertices {start}..{end} but the mesh only has {vertex_count} vertices")]
	VertexRange {
		meshlet: usize,
		start: u64,
		end: u64,
		vertex_count: u32,
	},
	#[error("mesh file would be {size} bytes, offsets are limited to 32 bits")]
	TooLarge { size: u64 },
}
