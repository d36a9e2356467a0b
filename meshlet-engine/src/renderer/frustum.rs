use glam::{Mat4, Vec4, Vec4Swizzles};
use meshlet_asset_disk::shape::sphere::Sphere;

/// Six clip planes stored as `Vec4(nx, ny, nz, d)`, a point `p` is inside a plane if `dot(n, p) + d >= 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frustum {
	planes: [Vec4; 6],
}

impl Frustum {
	/// Extracts the planes from `view_proj` using the Gribb-Hartmann method, assuming a `[0, 1]` depth range.
	pub fn from_view_proj(view_proj: Mat4) -> Self {
		let r0 = view_proj.row(0);
		let r1 = view_proj.row(1);
		let r2 = view_proj.row(2);
		let r3 = view_proj.row(3);

		// left, right, bottom, top, near, far
		let mut planes = [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r2, r3 - r2];
		for p in &mut planes {
			let len = p.xyz().length();
			if len > 1e-6 {
				*p /= len;
			}
		}
		Self { planes }
	}

	/// A frustum containing all of space, nothing is ever culled.
	pub fn everything() -> Self {
		Self { planes: [Vec4::W; 6] }
	}

	pub fn planes(&self) -> &[Vec4; 6] {
		&self.planes
	}

	/// Conservative, `false` only if the sphere lies entirely outside of at least one plane.
	pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
		self.planes
			.iter()
			.all(|plane| plane.xyz().dot(sphere.center) + plane.w >= -sphere.radius)
	}
}
