//! Helper functions

use std::f64::consts::PI;

use crate::body::{Body, Leg};
use crate::geometry::Length;
use crate::kinematic_traits::LegJoints;

/// Angles are always radians.
pub type Radians = f64;

pub const TAU: Radians = 2.0 * PI;
pub const RAD_TO_DEG: f64 = 360.0 / TAU;
pub const DEG_TO_RAD: f64 = TAU / 360.0;

pub fn sin(v: Radians) -> f64 {
    v.sin()
}

pub fn cos(v: Radians) -> f64 {
    v.cos()
}

pub fn sincos(v: Radians) -> (f64, f64) {
    v.sin_cos()
}

pub fn atan2(y: Length, x: Length) -> Radians {
    y.0.atan2(x.0)
}

/// Arcsine with the argument clamped into [-1, 1]. Rounding can push a ratio that is
/// geometrically exactly 1 slightly above it.
pub fn asin(v: f64) -> Radians {
    v.clamp(-1.0, 1.0).asin()
}

/// Arccosine with the argument clamped into [-1, 1].
pub fn acos(v: f64) -> Radians {
    v.clamp(-1.0, 1.0).acos()
}

/// Maps any angle into (-π, π].
pub fn wrap_angle(angle: Radians) -> Radians {
    PI - (PI - angle).rem_euclid(TAU)
}

/// Allows to specify angles in degrees (converts to radians)
pub fn as_radians(degrees: [f64; 3]) -> LegJoints {
    degrees.map(|d| d.to_radians())
}

/// Hinge angles of the leg in degrees, coxa first.
pub fn leg_degrees(leg: &Leg) -> LegJoints {
    leg.joints().map(f64::to_degrees)
}

/// One line per leg: name, angles in degrees and the solver flags.
pub fn format_leg(leg: &Leg) -> String {
    let [c, f, t] = leg_degrees(leg);
    format!(
        "{:<2} coxa {:7.2} femur {:7.2} tibia {:7.2} {}{} {}",
        leg.name,
        c,
        f,
        t,
        if leg.ik.solved { "S" } else { "-" },
        if leg.ik.planted { "P" } else { "-" },
        leg.ik.debug
    )
}

/// Print joint values of all legs, converting radians to degrees.
pub fn dump_body(body: &Body) {
    let [x, y, z] = body.origin.millimeters();
    println!(
        "origin ({:.1}, {:.1}, {:.1})mm yaw {:.1} pitch {:.1} roll {:.1}",
        x,
        y,
        z,
        body.orient.yaw.to_degrees(),
        body.orient.pitch.to_degrees(),
        body.orient.roll.to_degrees()
    );
    for leg in body.legs() {
        println!("  {}", format_leg(leg));
    }
}

/// formatting for YAML output
pub(crate) fn deg(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    format!("{:.4}", x.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(0.0)).abs() < 1e-12);
        assert!((wrap_angle(PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-12);
        assert!((wrap_angle(1.5 * PI) + 0.5 * PI).abs() < 1e-12);
        assert!((wrap_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-12);
        assert!((wrap_angle(5.0 * TAU + 0.25) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_trig_is_clamped() {
        assert_eq!(acos(1.0 + 1e-12), 0.0);
        assert!((acos(-1.0 - 1e-12) - PI).abs() < 1e-12);
        assert!((asin(2.0) - PI / 2.0).abs() < 1e-12);
        assert!(asin(-1.0000001).is_finite());
    }

    #[test]
    fn test_deg_formatting() {
        assert_eq!(deg(0.0), "0");
        assert_eq!(deg(PI / 2.0), "90.0000");
    }
}
