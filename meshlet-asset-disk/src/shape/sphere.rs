use bytemuck_derive::{Pod, Zeroable};
use glam::{Affine3A, Vec3};
use static_assertions::const_assert_eq;

/// Bounding sphere as stored on disk: center `xyz` followed by the radius.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Sphere {
	pub center: Vec3,
	pub radius: f32,
}
const_assert_eq!(size_of::<Sphere>(), 4 * 4);

impl Sphere {
	pub const fn new(center: Vec3, radius: f32) -> Self {
		Self { center, radius }
	}

	pub fn center(&self) -> Vec3 {
		self.center
	}

	pub fn radius(&self) -> f32 {
		self.radius
	}

	/// A sphere is valid if all components are finite and the radius is not negative.
	pub fn is_valid(&self) -> bool {
		self.center.is_finite() && self.radius.is_finite() && self.radius >= 0.
	}

	/// Transforms the center by `affine` and scales the radius by the largest axis scale, so the result still
	/// encloses everything the original sphere did, even under non-uniform scaling.
	pub fn transform(&self, affine: Affine3A) -> Self {
		Self::new(affine.transform_point3(self.center), self.radius * max_axis_scale(affine))
	}

	/// Quite crude approximation, weights centers by their radius. Returns `None` for an empty slice.
	pub fn merge_spheres_approx(spheres: &[Sphere]) -> Option<Sphere> {
		if spheres.is_empty() {
			return None;
		}

		let mut center = Vec3::ZERO;
		let mut weight_accum = 0.;
		for sphere in spheres {
			let weight = sphere.radius;
			center += sphere.center * weight;
			weight_accum += weight;
		}
		if weight_accum > 0. {
			center /= weight_accum;
		} else {
			// all points, no radius to weight by
			center = spheres.iter().map(|s| s.center).sum::<Vec3>() / spheres.len() as f32;
		}

		let radius = spheres
			.iter()
			.map(|s| s.center.distance(center) + s.radius)
			.fold(0., f32::max);
		Some(Self::new(center, radius))
	}
}

/// Length of the longest basis vector of `affine`.
pub fn max_axis_scale(affine: Affine3A) -> f32 {
	let m = affine.matrix3;
	m.x_axis.length().max(m.y_axis.length()).max(m.z_axis.length())
}
