use crate::vertex::VertexLayout;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RenderPipelineDescriptor {
	pub label: String,
	/// vertex layout every mesh drawn with this pipeline must have
	pub vertex_layout: VertexLayout,
}

impl RenderPipelineDescriptor {
	pub fn new(label: impl Into<String>, vertex_layout: VertexLayout) -> Self {
		Self {
			label: label.into(),
			vertex_layout,
		}
	}
}

/// A compiled meshlet pipeline.
pub trait PipelineState {
	fn label(&self) -> &str;

	fn vertex_layout(&self) -> &VertexLayout;
}
