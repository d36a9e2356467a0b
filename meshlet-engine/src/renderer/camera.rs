use glam::{Affine3A, Mat4, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
	pub perspective: Mat4,
	/// camera to world space, the camera looks along its local -Z
	pub transform: Affine3A,
}

impl Camera {
	pub fn new(perspective: Mat4, transform: Affine3A) -> Self {
		Self { perspective, transform }
	}

	/// Right-handed perspective with a `[0, 1]` depth range.
	pub fn new_perspective(fov_y_radians: f32, aspect_ratio: f32, z_near: f32, z_far: f32, transform: Affine3A) -> Self {
		Self::new(Mat4::perspective_rh(fov_y_radians, aspect_ratio, z_near, z_far), transform)
	}

	/// Moves and rotates the camera to sit at `eye` looking at `target`. If looking along `up`, any up vector
	/// perpendicular to the view direction is used instead.
	pub fn look_at(self, eye: Vec3, target: Vec3, up: Vec3) -> Self {
		let dir = (target - eye).normalize_or_zero();
		let up = if dir != Vec3::ZERO && dir.cross(up.normalize_or_zero()).length_squared() < 1e-6 {
			dir.any_orthonormal_vector()
		} else {
			up
		};
		Self {
			transform: Affine3A::look_at_rh(eye, target, up).inverse(),
			..self
		}
	}

	/// World to camera space.
	pub fn view(&self) -> Affine3A {
		self.transform.inverse()
	}

	pub fn view_projection(&self) -> Mat4 {
		self.perspective * Mat4::from(self.view())
	}

	pub fn position(&self) -> Vec3 {
		self.transform.translation.into()
	}
}
