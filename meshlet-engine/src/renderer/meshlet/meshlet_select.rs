use crate::renderer::config::DrawBatching;
use crate::renderer::frustum::Frustum;
use glam::Affine3A;
use meshlet_asset_rt::meshlet::mesh::Mesh;
use meshlet_gpu::device::GraphicsDevice;

/// A run of meshlets of a single submesh to draw with one call.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DrawUnit {
	pub submesh: u32,
	/// relative to the first meshlet of the submesh
	pub first_meshlet: u32,
	pub meshlet_count: u32,
}

/// Result of culling a mesh. Units are ordered by submesh, then by meshlet.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VisibleSet {
	pub units: Vec<DrawUnit>,
	pub meshlets_total: u32,
	pub meshlets_visible: u32,
	pub triangles: u64,
}

impl VisibleSet {
	pub fn is_empty(&self) -> bool {
		self.units.is_empty()
	}

	/// Indices of all visible meshlets within the meshlet table of `mesh`, in draw order.
	pub fn meshlet_indices<'a, D: GraphicsDevice>(&'a self, mesh: &'a Mesh<D>) -> impl Iterator<Item = u32> + 'a {
		self.units.iter().flat_map(|unit| {
			let start = mesh.submeshes()[unit.submesh as usize].meshlet_start + unit.first_meshlet;
			start..start + unit.meshlet_count
		})
	}
}

/// Tests the bounds of every meshlet, transformed by `model`, against `frustum`.
pub fn select_meshlets<D: GraphicsDevice>(
	mesh: &Mesh<D>,
	frustum: &Frustum,
	model: Affine3A,
	batching: DrawBatching,
) -> VisibleSet {
	profiling::function_scope!();
	let mut set = VisibleSet::default();
	for (submesh_id, submesh) in mesh.submeshes().iter().enumerate() {
		let submesh_id = submesh_id as u32;
		for (meshlet_id, meshlet) in mesh.submesh_meshlets(submesh).iter().enumerate() {
			let meshlet_id = meshlet_id as u32;
			set.meshlets_total += 1;
			if !frustum.intersects_sphere(&meshlet.bounds.transform(model)) {
				continue;
			}
			set.meshlets_visible += 1;
			set.triangles += meshlet.triangle_count as u64;

			if batching == DrawBatching::Contiguous
				&& let Some(last) = set.units.last_mut()
				&& last.submesh == submesh_id
				&& last.first_meshlet + last.meshlet_count == meshlet_id
			{
				last.meshlet_count += 1;
				continue;
			}
			set.units.push(DrawUnit {
				submesh: submesh_id,
				first_meshlet: meshlet_id,
				meshlet_count: 1,
			});
		}
	}
	set
}
