//! Analytic inverse kinematics of a yaw-pitch-pitch leg.
//!
//! Assumes:
//!   1. The coxa link is horizontal in the leg frame (its hinge is the body's vertical axis).
//!   2. Femur and tibia pitch about the same axis, so the foot stays in the vertical plane
//!      through the coxa direction.

use std::f64::consts::PI;

use tracing::{debug, trace};

use crate::body::{planted_within, Body, BodyPose, Leg, PLANTED_TOLERANCE};
use crate::geometry::{Length, Vec3};
use crate::kinematic_traits::{LegKinematics, LegPositions};
use crate::transform::{rotate_y, transform, transform_point, translate};
use crate::utils::{acos, asin, atan2, wrap_angle, Radians, TAU};

/// Tuning of the leg solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    /// When a target on the ground cannot be reached (too far, or the knee had to be
    /// clamped), aim the femur so that the foot still touches the ground instead of
    /// pointing straight at the target.
    pub plant_unreachable: bool,

    /// Targets closer to the ground than this count as planted.
    pub planted_tolerance: Length,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            plant_unreachable: false,
            planted_tolerance: PLANTED_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HexapodKinematics {
    pub options: SolverOptions,
}

impl HexapodKinematics {
    /// Creates a new `HexapodKinematics` instance with the default options.
    pub fn new() -> Self {
        HexapodKinematics::default()
    }

    pub fn with_options(options: SolverOptions) -> Self {
        HexapodKinematics { options }
    }

    /// Depression angle that puts a straight segment of `foot_length` starting at the coxa
    /// height onto the ground.
    fn ground_angle(coxa_height: Length, foot_length: Length) -> Radians {
        if foot_length > coxa_height.abs() {
            asin(coxa_height / foot_length)
        } else {
            TAU / 4.0
        }
    }
}

impl LegKinematics for HexapodKinematics {
    fn solve_leg(&self, pose: &BodyPose, leg: &mut Leg, world_target: Vec3) -> bool {
        // Only the target height counts here, `ik.planted` is written by `solve`
        let plant = self.options.plant_unreachable
            && planted_within(world_target, self.options.planted_tolerance);
        let mut notes: Vec<String> = Vec::new();
        let mut solved = true;

        // Coxa: look at the target top-down, in the frame of the leg mount
        let local = transform(
            &[translate(-leg.offset), pose.orient.inverse_matrix(), translate(-pose.origin)],
            world_target,
        );
        let coxa_angle_relative_to_forward = -atan2(local.x, local.z);
        leg.coxa.angle = wrap_angle(coxa_angle_relative_to_forward + TAU / 4.0 - leg.coxa.zero);
        if leg.coxa.clamp() {
            solved = false;
            notes.push("coxa clamped".to_string());
        }
        // Femur and tibia follow where the coxa actually is
        let yaw = leg.coxa.zero + leg.coxa.angle;

        // Undo the coxa heading. The leg then points along +X, femur and tibia pitch in the
        // x-y plane and the femur hinge sits one coxa length out.
        let planar = transform_point(&rotate_y(yaw), local);
        let u = planar.x - leg.coxa.length;
        let v = planar.y;

        let lf = leg.femur.length.0;
        let lt = leg.tibia.length.0;
        let distance2 = u.0 * u.0 + v.0 * v.0;
        let distance = distance2.sqrt();

        // Positive when the target is below the femur hinge
        let femur_to_target = atan2(-v, u);

        if distance > lf + lt || distance == 0.0 {
            // Straight leg pointed at the target
            leg.femur.angle = femur_to_target - leg.femur.zero;
            leg.tibia.angle = -leg.tibia.zero;
            notes.push(format!("out of reach {}", Length(distance)));

            if plant {
                let coxa_height = leg.coxa_origin(pose).y;
                leg.femur.angle = Self::ground_angle(coxa_height, leg.reach()) - leg.femur.zero;
                notes.push("planted".to_string());
            }

            leg.tibia.clamp();
            if leg.femur.clamp() {
                notes.push("femur clamped".to_string());
            }
            debug!(leg = %leg.name, distance = %Length(distance), "target out of reach");
            leg.ik.debug = notes.join(", ");
            return false;
        }

        if distance < (lf - lt).abs() {
            // Inside the inner workspace boundary, the leg cannot fold that tight
            solved = false;
            notes.push(format!("too close {}", Length(distance)));
        }

        let femur_internal_angle = acos((lf * lf + distance2 - lt * lt) / (2.0 * lf * distance));
        leg.femur.angle = femur_to_target - femur_internal_angle - leg.femur.zero;

        let tibia_internal_angle = acos((lf * lf + lt * lt - distance2) / (2.0 * lf * lt));
        leg.tibia.angle = PI - tibia_internal_angle - leg.tibia.zero;

        if leg.tibia.clamp() {
            solved = false;
            notes.push("tibia clamped".to_string());

            if plant {
                // Foot distance with the clamped knee, then aim that distance at the ground
                let knee = leg.tibia.zero + leg.tibia.angle;
                let foot_length2 = lf * lf + lt * lt + 2.0 * lf * lt * knee.cos();
                let foot_length = foot_length2.sqrt();
                if foot_length > 0.0 {
                    let foot_internal_angle = acos((lf * lf + foot_length2 - lt * lt) / (2.0 * lf * foot_length));
                    let coxa_height = leg.coxa_origin(pose).y;
                    let foot_angle = Self::ground_angle(coxa_height, Length(foot_length));
                    leg.femur.angle = foot_angle - foot_internal_angle - leg.femur.zero;
                    notes.push("planted".to_string());
                }
            }
        }

        if leg.femur.clamp() {
            solved = false;
            notes.push("femur clamped".to_string());
        }

        if solved {
            trace!(
                leg = %leg.name,
                coxa = leg.coxa.angle.to_degrees(),
                femur = leg.femur.angle.to_degrees(),
                tibia = leg.tibia.angle.to_degrees(),
                "leg solved"
            );
            leg.ik.debug.clear();
        } else {
            debug!(leg = %leg.name, notes = %notes.join(", "), "leg not solved exactly");
            leg.ik.debug = notes.join(", ");
        }
        solved
    }

    fn solve(&self, body: &mut Body) {
        let (pose, legs) = body.pose_and_legs_mut();
        for leg in legs.iter_mut() {
            let target = leg.ik.target;
            let solved = self.solve_leg(&pose, leg, target);
            leg.ik.solved = solved;
            leg.ik.planted = planted_within(target, self.options.planted_tolerance);
        }
    }

    fn forward_with_joint_positions(&self, pose: &BodyPose, leg: &Leg) -> LegPositions {
        let mut positions = [Vec3::ZERO; 4];
        let mut m = pose.matrix() * translate(leg.offset);
        for (i, hinge) in leg.hinges().into_iter().enumerate() {
            positions[i] = transform_point(&m, Vec3::ZERO);
            m = m * hinge.rotation() * translate(Vec3::new(hinge.length, Length::ZERO, Length::ZERO));
        }
        positions[3] = transform_point(&m, Vec3::ZERO);
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MM;
    use crate::hinge::{Axis, Hinge, HingeRange};
    use crate::body::{LegIK, LegId};

    fn test_leg() -> Leg {
        let quarter = TAU / 4.0;
        Leg {
            id: LegId::RM,
            name: "RM".to_string(),
            phase: 0.0,
            offset: Vec3::mm(0.0, 0.0, 77.0),
            coxa: Hinge {
                zero: quarter,
                ..Hinge::new(Axis::Y, 12.0 * MM, HingeRange::new(-quarter, quarter))
            },
            femur: Hinge::new(Axis::Z, 38.0 * MM, HingeRange::new(quarter, -quarter)),
            tibia: Hinge::new(Axis::Z, 50.0 * MM, HingeRange::new(0.0, TAU / 2.0)),
            ik: LegIK::default(),
        }
    }

    #[test]
    fn test_coxa_straight_out() {
        let ik = HexapodKinematics::new();
        let mut leg = test_leg();
        let pose = BodyPose::default();
        // Straight out of the right side, 30mm below the femur hinge and 40mm beyond it
        let target = leg.offset + Vec3::mm(0.0, -30.0, 12.0 + 40.0);
        assert!(ik.solve_leg(&pose, &mut leg, target));
        assert!(leg.coxa.angle.abs() < 1e-9);
        assert!(leg.ik.debug.is_empty());
    }

    #[test]
    fn test_forward_chain_at_zero() {
        let ik = HexapodKinematics::new();
        let mut leg = test_leg();
        for hinge in leg.hinges_mut() {
            hinge.angle = 0.0;
        }
        let pose = BodyPose::default();
        let positions = ik.forward_with_joint_positions(&pose, &leg);
        // Coxa zero turns the chain to +Z (right)
        let expected = [
            Vec3::mm(0.0, 0.0, 77.0),
            Vec3::mm(0.0, 0.0, 89.0),
            Vec3::mm(0.0, 0.0, 127.0),
            Vec3::mm(0.0, 0.0, 177.0),
        ];
        for (p, e) in positions.iter().zip(expected) {
            assert!((*p - e).length() < 0.001 * MM, "got {} expected {}", p, e);
        }
    }

    #[test]
    fn test_pitch_down_is_positive() {
        let ik = HexapodKinematics::new();
        let mut leg = test_leg();
        leg.coxa.angle = 0.0;
        leg.femur.angle = TAU / 4.0;
        leg.tibia.angle = 0.0;
        let foot = ik.forward(&BodyPose::default(), &leg);
        assert!((foot - Vec3::mm(0.0, -88.0, 89.0)).length() < 0.001 * MM, "got {}", foot);
    }

    #[test]
    fn test_ground_angle() {
        assert!((HexapodKinematics::ground_angle(44.0 * MM, 88.0 * MM) - PI / 6.0).abs() < 1e-12);
        assert_eq!(HexapodKinematics::ground_angle(100.0 * MM, 88.0 * MM), TAU / 4.0);
    }
}
