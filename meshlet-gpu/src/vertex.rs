use smallvec::{SmallVec, smallvec};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VertexSemantic {
	Position,
	Normal,
	Tangent,
	TexCoord(u8),
	Color(u8),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VertexFormat {
	Float32,
	Float32x2,
	Float32x3,
	Float32x4,
	Unorm8x4,
	Uint32,
}

impl VertexFormat {
	/// Size in bytes.
	pub const fn size(self) -> u32 {
		match self {
			VertexFormat::Float32 => 4,
			VertexFormat::Float32x2 => 8,
			VertexFormat::Float32x3 => 12,
			VertexFormat::Float32x4 => 16,
			VertexFormat::Unorm8x4 => 4,
			VertexFormat::Uint32 => 4,
		}
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct VertexAttribute {
	pub semantic: VertexSemantic,
	pub format: VertexFormat,
	/// byte offset within a single vertex of its buffer
	pub offset: u32,
}

impl VertexAttribute {
	pub const fn new(semantic: VertexSemantic, format: VertexFormat, offset: u32) -> Self {
		Self {
			semantic,
			format,
			offset,
		}
	}
}

/// A single vertex stream.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct VertexBufferLayout {
	pub stride: u32,
	pub attributes: SmallVec<[VertexAttribute; 4]>,
}

impl VertexBufferLayout {
	pub fn new(stride: u32, attributes: impl IntoIterator<Item = VertexAttribute>) -> Self {
		Self {
			stride,
			attributes: attributes.into_iter().collect(),
		}
	}

	/// Attributes packed back to back, the stride being the sum of their sizes.
	pub fn packed(attributes: impl IntoIterator<Item = (VertexSemantic, VertexFormat)>) -> Self {
		let mut stride = 0;
		let attributes = attributes
			.into_iter()
			.map(|(semantic, format)| {
				let attribute = VertexAttribute::new(semantic, format, stride);
				stride += format.size();
				attribute
			})
			.collect();
		Self { stride, attributes }
	}
}

/// Describes how the vertex blob of a mesh file is interpreted.
///
/// The blob is the concatenation of one stream per buffer layout, each holding `vertex_count` vertices of its
/// stride. A mesh with `n` vertices therefore has `n * total_stride()` bytes of vertex data.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct VertexLayout {
	pub buffers: SmallVec<[VertexBufferLayout; 2]>,
}

impl VertexLayout {
	pub fn new(buffers: impl IntoIterator<Item = VertexBufferLayout>) -> Self {
		Self {
			buffers: buffers.into_iter().collect(),
		}
	}

	pub fn position_only() -> Self {
		Self::new([VertexBufferLayout::packed([(
			VertexSemantic::Position,
			VertexFormat::Float32x3,
		)])])
	}

	pub fn position_normal() -> Self {
		Self::new([VertexBufferLayout::packed([
			(VertexSemantic::Position, VertexFormat::Float32x3),
			(VertexSemantic::Normal, VertexFormat::Float32x3),
		])])
	}

	pub fn position_normal_tex_coord() -> Self {
		Self::new([VertexBufferLayout::packed([
			(VertexSemantic::Position, VertexFormat::Float32x3),
			(VertexSemantic::Normal, VertexFormat::Float32x3),
			(VertexSemantic::TexCoord(0), VertexFormat::Float32x2),
		])])
	}

	/// Positions in their own stream, followed by a stream of normals and texture coordinates.
	pub fn split_position() -> Self {
		Self {
			buffers: smallvec![
				VertexBufferLayout::packed([(VertexSemantic::Position, VertexFormat::Float32x3)]),
				VertexBufferLayout::packed([
					(VertexSemantic::Normal, VertexFormat::Float32x3),
					(VertexSemantic::TexCoord(0), VertexFormat::Float32x2),
				]),
			],
		}
	}

	/// Bytes per vertex summed over all streams.
	pub fn total_stride(&self) -> u64 {
		self.buffers.iter().map(|b| b.stride as u64).sum()
	}

	/// Byte offset of each stream within a vertex blob holding `vertex_count` vertices.
	pub fn stream_offsets(&self, vertex_count: u32) -> impl Iterator<Item = u64> + '_ {
		self.buffers.iter().scan(0u64, move |offset, buffer| {
			let start = *offset;
			*offset += buffer.stride as u64 * vertex_count as u64;
			Some(start)
		})
	}

	pub fn validate(&self) -> Result<(), VertexLayoutError> {
		if self.buffers.is_empty() {
			return Err(VertexLayoutError::Empty);
		}
		let mut semantics = SmallVec::<[VertexSemantic; 8]>::new();
		for (buffer, layout) in self.buffers.iter().enumerate() {
			if layout.stride == 0 {
				return Err(VertexLayoutError::ZeroStride { buffer });
			}
			for attribute in &layout.attributes {
				if attribute.offset as u64 + attribute.format.size() as u64 > layout.stride as u64 {
					return Err(VertexLayoutError::AttributeOutOfStride {
						buffer,
						semantic: attribute.semantic,
						offset: attribute.offset,
						size: attribute.format.size(),
						stride: layout.stride,
					});
				}
				if semantics.contains(&attribute.semantic) {
					return Err(VertexLayoutError::DuplicateSemantic {
						semantic: attribute.semantic,
					});
				}
				semantics.push(attribute.semantic);
			}
		}
		if !semantics.contains(&VertexSemantic::Position) {
			return Err(VertexLayoutError::MissingPosition);
		}
		Ok(())
	}
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum VertexLayoutError {
	#[error("vertex layout has no buffers")]
	Empty,
	#[error("vertex buffer {buffer} has a stride of 0")]
	ZeroStride { buffer: usize },
	#[error(
		"attribute {semantic:?} of vertex buffer {buffer} at offset {offset} with size {size} exceeds the stride of {stride}"
	)]
	AttributeOutOfStride {
		buffer: usize,
		semantic: VertexSemantic,
		offset: u32,
		size: u32,
		stride: u32,
	},
	#[error("attribute {semantic:?} appears more than once")]
	DuplicateSemantic { semantic: VertexSemantic },
	#[error("vertex layout has no position attribute")]
	MissingPosition,
}
