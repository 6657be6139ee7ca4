//! Hardcoded parameters for known robots

use crate::body::LegId;
use crate::gait::GaitParameters;
use crate::geometry::{Vec3, MM};
use crate::hinge::HingeRange;
use crate::parameters::{LegMount, RobotParameters};
use crate::utils::{DEG_TO_RAD, TAU};

impl RobotParameters {
    /// Adeept hexapod kit with SG92R servos. Coxa 12 mm, femur 38 mm, tibia 50 mm,
    /// legs mounted on a hexagon around a 105 × 45 × 105 mm body.
    pub fn adeept() -> Self {
        // Diagonal legs are turned by an eighth of a turn
        let leg_rot = TAU / 8.0;
        // Mount height relative to the body center
        let leg_y = 28.0 - 45.0 / 2.0;

        // 0.1 s per 60 degrees
        let servo_sg92r_speed = 60.0 * DEG_TO_RAD / 0.1;

        let mount = |id: LegId, x: f64, z: f64, coxa_zero: f64, phase: f64| LegMount {
            id,
            offset: Vec3::mm(x, leg_y, z),
            coxa_zero,
            side: id.side(),
            phase: -phase,
        };

        RobotParameters {
            size: Vec3::mm(105.0, 45.0, 105.0),
            origin: Vec3::mm(0.0, 22.0, 0.0),
            head_offset: Vec3::mm(63.0, 20.0, 0.0),
            coxa_length: 12.0 * MM,
            femur_length: 38.0 * MM,
            tibia_length: 50.0 * MM,
            coxa_range: HingeRange::new(-TAU / 4.0, TAU / 4.0),
            femur_range: HingeRange::new(TAU / 4.0, -TAU / 4.0),
            tibia_range: HingeRange::new(TAU / 4.0, -TAU / 4.0),
            femur_zero: 0.0,
            tibia_zero: 0.0,
            servo_speed: Some(servo_sg92r_speed),
            legs: [
                mount(LegId::LF, 63.0, -57.0, -leg_rot, 0.0 * TAU / 6.0),
                mount(LegId::RF, 63.0, 57.0, leg_rot, 3.0 * TAU / 6.0),
                mount(LegId::LM, 0.0, -77.0, -TAU / 4.0, 4.0 * TAU / 6.0),
                mount(LegId::RM, 0.0, 77.0, TAU / 4.0, 1.0 * TAU / 6.0),
                mount(LegId::LB, -63.0, -57.0, -TAU / 2.0 + leg_rot, 2.0 * TAU / 6.0),
                mount(LegId::RB, -63.0, 57.0, TAU / 2.0 - leg_rot, 5.0 * TAU / 6.0),
            ],
            gait: GaitParameters::default(),
        }
    }
}
