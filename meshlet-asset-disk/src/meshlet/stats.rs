use crate::shape::sphere::Sphere;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MeshStats {
	pub submeshes: u64,
	pub meshlets: u64,
	/// meshlets may share triangles, so this may exceed the triangles stored in the file
	pub triangles: u64,
	/// unique vertices in the vertex data
	pub vertices: u64,
	/// vertices may be referenced by multiple meshlets
	pub meshlet_vertices: u64,
	/// approximate sphere enclosing all meshlet bounds, `None` if there are no meshlets
	pub bounds: Option<Sphere>,
}

impl Add for MeshStats {
	type Output = MeshStats;

	fn add(self, rhs: Self) -> Self::Output {
		let bounds = match (self.bounds, rhs.bounds) {
			(Some(a), Some(b)) => Sphere::merge_spheres_approx(&[a, b]),
			(a, b) => a.or(b),
		};
		Self {
			submeshes: self.submeshes + rhs.submeshes,
			meshlets: self.meshlets + rhs.meshlets,
			triangles: self.triangles + rhs.triangles,
			vertices: self.vertices + rhs.vertices,
			meshlet_vertices: self.meshlet_vertices + rhs.meshlet_vertices,
			bounds,
		}
	}
}

impl AddAssign for MeshStats {
	fn add_assign(&mut self, rhs: Self) {
		*self = *self + rhs;
	}
}

impl Sum for MeshStats {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::default(), |acc, x| acc + x)
	}
}
