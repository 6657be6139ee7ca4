//! Affine 4×4 transforms and body orientation.
//!
//! Matrices act on column vectors: translation lives in the last column and
//! `compose(&[a, b, c])` applied to a point is `a·b·c·p`, so the rightmost matrix is
//! applied first.

use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};

use crate::geometry::Vec3;
use crate::utils::Radians;

/// Homogeneous affine transform in internal length units.
pub type Mat = Matrix4<f64>;

pub fn identity() -> Mat {
    Mat::identity()
}

pub fn translate(v: Vec3) -> Mat {
    Translation3::new(v.x.0, v.y.0, v.z.0).to_homogeneous()
}

pub fn scale(x: f64, y: f64, z: f64) -> Mat {
    Mat::new_nonuniform_scaling(&Vector3::new(x, y, z))
}

/// Counter-clockwise rotation about +X (Y towards Z).
pub fn rotate_x(angle: Radians) -> Mat {
    Rotation3::from_axis_angle(&Vector3::x_axis(), angle).to_homogeneous()
}

/// Counter-clockwise rotation about +Y (Z towards X). Turns +X towards the left (-Z).
pub fn rotate_y(angle: Radians) -> Mat {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle).to_homogeneous()
}

/// Counter-clockwise rotation about +Z (X towards Y).
pub fn rotate_z(angle: Radians) -> Mat {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle).to_homogeneous()
}

/// Multiplies the matrices left to right.
pub fn compose(mats: &[Mat]) -> Mat {
    mats.iter().fold(identity(), |acc, m| acc * m)
}

/// Applies the transform to a point (translation included).
pub fn transform_point(m: &Mat, v: Vec3) -> Vec3 {
    Vec3::from_point(&m.transform_point(&v.to_point()))
}

/// Composes the matrices left to right and applies the result to the point.
pub fn transform(mats: &[Mat], v: Vec3) -> Vec3 {
    transform_point(&compose(mats), v)
}

/// Body orientation. Yaw turns about the vertical axis, pitch about the lateral
/// axis and roll about the forward axis, applied in this order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orient {
    /// rotation around Y
    pub yaw: Radians,
    /// rotation around Z
    pub pitch: Radians,
    /// rotation around X
    pub roll: Radians,
}

impl Orient {
    pub fn new(yaw: Radians, pitch: Radians, roll: Radians) -> Self {
        Orient { yaw, pitch, roll }
    }

    pub fn matrix(&self) -> Mat {
        rotate_y(self.yaw) * rotate_z(self.pitch) * rotate_x(self.roll)
    }

    /// Exact inverse of [`Orient::matrix`]: reversed order, negated angles.
    pub fn inverse_matrix(&self) -> Mat {
        rotate_x(-self.roll) * rotate_z(-self.pitch) * rotate_y(-self.yaw)
    }
}
