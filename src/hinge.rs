//! Rotational joints and their limits.

use crate::geometry::Length;
use crate::transform::{rotate_x, rotate_y, rotate_z, Mat};
use crate::utils::Radians;

/// Body-relative rotation axis of a hinge.
///
/// Hinge angles follow the leg convention rather than the right-hand rule where it matters:
/// `Y` is a heading, positive angles turn the link from +X towards +Z (clockwise seen from
/// above); `Z` is the pitch axis of a leg, positive angles lower the link towards -Y, so a
/// leg pointing at a target below the hinge has a positive angle. `X` rotates
/// counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn rotation(self, angle: Radians) -> Mat {
        match self {
            Axis::X => rotate_x(angle),
            Axis::Y => rotate_y(-angle),
            Axis::Z => rotate_z(-angle),
        }
    }
}

/// Inclusive angle limits. The bounds may be given in either order: a reversed pair
/// describes a mechanically mirrored joint, the allowed interval is the same.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HingeRange {
    pub min: Radians,
    pub max: Radians,
}

impl HingeRange {
    pub fn new(min: Radians, max: Radians) -> Self {
        HingeRange { min, max }
    }

    /// Bounds sorted as (low, high).
    pub fn low_high(&self) -> (Radians, Radians) {
        if self.min < self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }

    pub fn contains(&self, angle: Radians) -> bool {
        let (low, high) = self.low_high();
        low <= angle && angle <= high
    }
}

/// One rotational joint of a leg together with the rigid link it drives.
#[derive(Debug, Clone, PartialEq)]
pub struct Hinge {
    // const
    pub axis: Axis,
    /// Angle offset mapping joint angle 0 to the physical rest pose.
    pub zero: Radians,
    /// Length of the link driven by this joint.
    pub length: Length,
    pub range: HingeRange,
    /// Maximal angular velocity, rad/s. Advisory only, the solver does not enforce it.
    pub speed: Option<f64>,

    // runtime
    pub angle: Radians,
}

impl Hinge {
    pub fn new(axis: Axis, length: Length, range: HingeRange) -> Self {
        Hinge {
            axis,
            zero: 0.0,
            length,
            range,
            speed: None,
            angle: 0.0,
        }
    }

    pub fn low_high(&self) -> (Radians, Radians) {
        self.range.low_high()
    }

    pub fn in_bounds(&self) -> bool {
        self.range.contains(self.angle)
    }

    /// Clamps the angle into the range. Returns true if the angle was changed.
    pub fn clamp(&mut self) -> bool {
        let (low, high) = self.low_high();
        if self.angle < low {
            self.angle = low;
            true
        } else if self.angle > high {
            self.angle = high;
            true
        } else {
            false
        }
    }

    /// Rotation of this hinge at its current angle, zero offset included.
    pub fn rotation(&self) -> Mat {
        self.axis.rotation(self.zero + self.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MM;
    use std::f64::consts::PI;

    fn hinge(min: Radians, max: Radians) -> Hinge {
        Hinge::new(Axis::Z, 38.0 * MM, HingeRange::new(min, max))
    }

    #[test]
    fn test_in_bounds() {
        let mut h = hinge(-PI / 2.0, PI / 2.0);
        h.angle = 0.3;
        assert!(h.in_bounds());
        h.angle = PI / 2.0;
        assert!(h.in_bounds());
        h.angle = PI / 2.0 + 1e-9;
        assert!(!h.in_bounds());
    }

    #[test]
    fn test_reversed_range() {
        let mut h = hinge(PI / 2.0, -PI / 2.0);
        assert_eq!(h.low_high(), (-PI / 2.0, PI / 2.0));
        h.angle = -0.5;
        assert!(h.in_bounds());
        assert!(!h.clamp());
        assert_eq!(h.angle, -0.5);
    }

    #[test]
    fn test_clamp() {
        let mut h = hinge(-PI / 4.0, PI / 3.0);

        h.angle = 2.0;
        assert!(h.clamp());
        assert_eq!(h.angle, PI / 3.0);

        h.angle = -2.0;
        assert!(h.clamp());
        assert_eq!(h.angle, -PI / 4.0);

        h.angle = 0.1;
        assert!(!h.clamp());
        assert_eq!(h.angle, 0.1);
        assert!(h.in_bounds());
    }

    #[test]
    fn test_clamp_then_in_bounds() {
        let mut h = hinge(1.0, -1.0);
        for a in [-3.0, -1.0, -0.2, 0.0, 0.7, 1.0, 5.0] {
            h.angle = a;
            h.clamp();
            assert!(h.in_bounds(), "angle {} not in bounds after clamp", h.angle);
        }
    }
}
