/// How visible meshlets of a submesh are grouped into [`MeshletDraw`](meshlet_gpu::command::MeshletDraw)s.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum DrawBatching {
	/// one draw per visible meshlet
	#[default]
	PerMeshlet,
	/// one draw per run of consecutive visible meshlets
	Contiguous,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RendererConfig {
	pub frustum_culling: bool,
	pub batching: DrawBatching,
	/// prefix of encoder labels
	pub label: String,
}

impl Default for RendererConfig {
	fn default() -> Self {
		Self {
			frustum_culling: true,
			batching: DrawBatching::default(),
			label: "meshlet renderer".to_string(),
		}
	}
}
