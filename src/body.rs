//! Static description and runtime state of the robot body and its six legs.
//!
//! The control layer owns the [`Body`]: every tick it writes `origin`, `orient` and each
//! leg's `ik.target`, then hands the body to the solver, which writes the hinge angles and
//! the `solved`/`planted`/`debug` fields of every leg.

use bitflags::bitflags;

use crate::geometry::{Length, Vec3, MM};
use crate::hinge::Hinge;
use crate::kinematic_traits::LegJoints;
use crate::transform::{translate, Mat, Orient};
use crate::utils::Radians;

/// Targets closer to the ground than this are considered planted.
pub const PLANTED_TOLERANCE: Length = MM;

/// Anatomical leg name: left/right × front/middle/back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegId {
    LF,
    RF,
    LM,
    RM,
    LB,
    RB,
}

impl LegId {
    /// All legs in the order they are stored and solved.
    pub const ALL: [LegId; 6] = [LegId::LF, LegId::RF, LegId::LM, LegId::RM, LegId::LB, LegId::RB];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            LegId::LF => "LF",
            LegId::RF => "RF",
            LegId::LM => "LM",
            LegId::RM => "RM",
            LegId::LB => "LB",
            LegId::RB => "RB",
        }
    }

    pub fn from_name(name: &str) -> Option<LegId> {
        LegId::ALL.into_iter().find(|id| id.name().eq_ignore_ascii_case(name))
    }

    /// -1 for the left side (-Z), +1 for the right side.
    pub fn side(self) -> f64 {
        match self {
            LegId::LF | LegId::LM | LegId::LB => -1.0,
            LegId::RF | LegId::RM | LegId::RB => 1.0,
        }
    }

    /// The same position on the other side of the body.
    pub fn mirrored(self) -> LegId {
        match self {
            LegId::LF => LegId::RF,
            LegId::RF => LegId::LF,
            LegId::LM => LegId::RM,
            LegId::RM => LegId::LM,
            LegId::LB => LegId::RB,
            LegId::RB => LegId::LB,
        }
    }

    pub fn flag(self) -> LegSet {
        LegSet::from_bits_truncate(1 << self.index())
    }
}

bitflags! {
    /// Set of legs, used to group legs that move together.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LegSet: u8 {
        const LF = 1 << 0;
        const RF = 1 << 1;
        const LM = 1 << 2;
        const RM = 1 << 3;
        const LB = 1 << 4;
        const RB = 1 << 5;

        /// Front and back of the left side with the middle of the right side.
        const TRIPOD_A = Self::LF.bits() | Self::RM.bits() | Self::LB.bits();
        /// The complementary tripod.
        const TRIPOD_B = Self::RF.bits() | Self::LM.bits() | Self::RB.bits();
    }
}

impl LegSet {
    pub fn has(&self, id: LegId) -> bool {
        self.contains(id.flag())
    }
}

/// Solver state of one leg.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegIK {
    /// Desired foot position, world space.
    pub target: Vec3,
    /// The last solve reached the target exactly with all hinges in range.
    pub solved: bool,
    /// The target is at ground height. The control layer may write it as a hint for
    /// its own bookkeeping; the solver overwrites it from the target height.
    pub planted: bool,
    /// Diagnostic text of the last solve.
    pub debug: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub id: LegId,
    pub name: String,
    /// Time offset used by gaits, radians of the gait cycle.
    pub phase: Radians,
    /// Coxa mount relative to the body origin, body space.
    pub offset: Vec3,
    /// Yaw joint at the body.
    pub coxa: Hinge,
    /// First pitch joint.
    pub femur: Hinge,
    /// Second pitch joint, the knee.
    pub tibia: Hinge,

    pub ik: LegIK,
}

impl Leg {
    /// Hinges from the body outwards.
    pub fn hinges(&self) -> [&Hinge; 3] {
        [&self.coxa, &self.femur, &self.tibia]
    }

    pub fn hinges_mut(&mut self) -> [&mut Hinge; 3] {
        [&mut self.coxa, &mut self.femur, &mut self.tibia]
    }

    pub fn joints(&self) -> LegJoints {
        [self.coxa.angle, self.femur.angle, self.tibia.angle]
    }

    /// Sets the hinge angles as given, without checking the ranges.
    pub fn set_joints(&mut self, joints: &LegJoints) {
        for (hinge, angle) in self.hinges_mut().into_iter().zip(joints) {
            hinge.angle = *angle;
        }
    }

    /// Total length of femur and tibia.
    pub fn reach(&self) -> Length {
        self.femur.length + self.tibia.length
    }

    /// World position of the coxa joint.
    pub fn coxa_origin(&self, pose: &BodyPose) -> Vec3 {
        crate::transform::transform_point(&pose.matrix(), self.offset)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Head {
    pub offset: Vec3,
}

/// World placement of the body, the only part of the body the solver reads
/// besides the leg it solves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyPose {
    pub origin: Vec3,
    pub orient: Orient,
}

impl BodyPose {
    /// Body space to world space.
    pub fn matrix(&self) -> Mat {
        translate(self.origin) * self.orient.matrix()
    }

    /// World space to body space.
    pub fn inverse_matrix(&self) -> Mat {
        self.orient.inverse_matrix() * translate(-self.origin)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Bounding box of the body.
    pub size: Vec3,
    /// World position of the body center.
    pub origin: Vec3,
    pub orient: Orient,
    pub head: Head,
    legs: [Leg; 6],
}

impl Body {
    /// Legs must be given in [`LegId::ALL`] order.
    pub fn new(size: Vec3, origin: Vec3, head: Head, legs: [Leg; 6]) -> Self {
        debug_assert!(legs.iter().zip(LegId::ALL).all(|(leg, id)| leg.id == id));
        Body {
            size,
            origin,
            orient: Orient::default(),
            head,
            legs,
        }
    }

    pub fn pose(&self) -> BodyPose {
        BodyPose {
            origin: self.origin,
            orient: self.orient,
        }
    }

    pub fn leg(&self, id: LegId) -> &Leg {
        &self.legs[id.index()]
    }

    pub fn leg_mut(&mut self, id: LegId) -> &mut Leg {
        &mut self.legs[id.index()]
    }

    pub fn legs(&self) -> impl Iterator<Item = &Leg> {
        self.legs.iter()
    }

    pub fn legs_mut(&mut self) -> impl Iterator<Item = &mut Leg> {
        self.legs.iter_mut()
    }

    /// Splits the body into its pose and the legs, so legs can be updated
    /// while the pose is read.
    pub fn pose_and_legs_mut(&mut self) -> (BodyPose, &mut [Leg; 6]) {
        (self.pose(), &mut self.legs)
    }
}

/// True when the point is within [`PLANTED_TOLERANCE`] of the ground.
pub fn vector_planted(v: Vec3) -> bool {
    planted_within(v, PLANTED_TOLERANCE)
}

pub fn planted_within(v: Vec3, tolerance: Length) -> bool {
    v.y.abs() < tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leg_sets() {
        assert!(LegSet::TRIPOD_A.has(LegId::LF));
        assert!(LegSet::TRIPOD_A.has(LegId::RM));
        assert!(LegSet::TRIPOD_A.has(LegId::LB));
        assert!(!LegSet::TRIPOD_A.has(LegId::RF));
        assert_eq!(LegSet::TRIPOD_A | LegSet::TRIPOD_B, LegSet::all());
        assert!((LegSet::TRIPOD_A & LegSet::TRIPOD_B).is_empty());
    }

    #[test]
    fn test_leg_names() {
        for id in LegId::ALL {
            assert_eq!(LegId::from_name(id.name()), Some(id));
            assert_eq!(id.mirrored().mirrored(), id);
            assert_eq!(id.mirrored().side(), -id.side());
        }
        assert_eq!(LegId::from_name("rm"), Some(LegId::RM));
        assert_eq!(LegId::from_name("XX"), None);
    }

    #[test]
    fn test_vector_planted() {
        assert!(vector_planted(Vec3::mm(10.0, 0.5, 3.0)));
        assert!(vector_planted(Vec3::mm(10.0, -0.9, 3.0)));
        assert!(!vector_planted(Vec3::mm(10.0, 1.0, 3.0)));
        assert!(!vector_planted(Vec3::mm(0.0, 20.0, 0.0)));
    }

    #[test]
    fn test_pose_inverse() {
        let pose = BodyPose {
            origin: Vec3::mm(10.0, 22.0, -5.0),
            orient: Orient::new(0.3, -0.1, 0.2),
        };
        let p = Vec3::mm(63.0, 5.5, 57.0);
        let world = crate::transform::transform_point(&pose.matrix(), p);
        let back = crate::transform::transform_point(&pose.inverse_matrix(), world);
        assert!((back - p).length() < 0.001 * MM);
    }
}
