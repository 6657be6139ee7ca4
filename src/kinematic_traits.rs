use crate::body::{Body, BodyPose, Leg};
use crate::geometry::Vec3;

/// Hinge angles of one leg, coxa first, in radians from each joint's zero.
pub type LegJoints = [f64; 3];

/// World positions of the coxa, femur and tibia hinges followed by the foot.
pub type LegPositions = [Vec3; 4];

pub trait LegKinematics {
    /// Solves one leg for a world space target under the given body pose. Writes the
    /// three hinge angles and the leg's debug text. Returns true if the target is
    /// reached exactly with every hinge inside its range.
    fn solve_leg(&self, pose: &BodyPose, leg: &mut Leg, world_target: Vec3) -> bool;

    /// Solves all six legs for their own `ik.target`, updating `ik.solved` and
    /// `ik.planted` as well as the angles.
    fn solve(&self, body: &mut Body);

    /// World position of the foot for the leg's current hinge angles.
    fn forward(&self, pose: &BodyPose, leg: &Leg) -> Vec3 {
        self.forward_with_joint_positions(pose, leg)[3]
    }

    /// World positions of every hinge of the leg and of the foot.
    fn forward_with_joint_positions(&self, pose: &BodyPose, leg: &Leg) -> LegPositions;
}
