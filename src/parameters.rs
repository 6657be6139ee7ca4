//! Defines the robot description from which the [`Body`] is built.

use crate::body::{Body, Head, Leg, LegIK, LegId};
use crate::gait::GaitParameters;
use crate::geometry::{Length, Vec3};
use crate::hinge::{Axis, Hinge, HingeRange};
use crate::parameter_error::ParameterError;
use crate::utils::{deg, Radians};

/// Where and how one leg is mounted on the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegMount {
    pub id: LegId,
    /// Coxa hinge relative to the body origin.
    pub offset: Vec3,
    /// Heading of the coxa at joint angle 0, measured from forward towards the right.
    pub coxa_zero: Radians,
    /// -1 for legs on the left, +1 on the right. Mirrors the coxa range.
    pub side: f64,
    /// Offset of the leg in the gait cycle.
    pub phase: Radians,
}

/// Dimensions and joint configuration of a hexapod. See [parameters_robots.rs](parameters_robots.rs)
/// for a concrete robot.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotParameters {
    /// Bounding box of the body.
    pub size: Vec3,
    /// Body origin when standing.
    pub origin: Vec3,
    pub head_offset: Vec3,

    pub coxa_length: Length,
    pub femur_length: Length,
    pub tibia_length: Length,

    /// Coxa range of a right side leg, mirrored for the left side.
    pub coxa_range: HingeRange,
    pub femur_range: HingeRange,
    pub tibia_range: HingeRange,

    pub femur_zero: Radians,
    pub tibia_zero: Radians,

    /// Servo speed, rad/s.
    pub servo_speed: Option<f64>,

    /// Mounts in [`LegId::ALL`] order.
    pub legs: [LegMount; 6],

    pub gait: GaitParameters,
}

impl RobotParameters {
    /// Checks the dimensions for values the solver cannot work with.
    pub fn validate(&self) -> Result<(), ParameterError> {
        for (name, length) in [
            ("coxa", self.coxa_length),
            ("femur", self.femur_length),
            ("tibia", self.tibia_length),
        ] {
            if !length.is_finite() || length.0 <= 0.0 {
                return Err(ParameterError::KinematicsConfigurationError(format!(
                    "{} length must be positive and finite (got {})",
                    name, length
                )));
            }
        }

        for (mount, id) in self.legs.iter().zip(LegId::ALL) {
            if mount.id != id {
                return Err(ParameterError::KinematicsConfigurationError(format!(
                    "leg {} found where {} is expected",
                    mount.id.name(),
                    id.name()
                )));
            }
            if !mount.offset.is_finite() || mount.offset.horizontal().normalized_to(Length(1.0)).is_none() {
                return Err(ParameterError::KinematicsConfigurationError(format!(
                    "leg {} must be mounted away from the body origin",
                    id.name()
                )));
            }
            if mount.side != 1.0 && mount.side != -1.0 {
                return Err(ParameterError::KinematicsConfigurationError(format!(
                    "leg {} side must be -1 or 1 (got {})",
                    id.name(),
                    mount.side
                )));
            }
        }
        Ok(())
    }

    /// Builds the body in its zero pose: all hinges at 0, every foot target right
    /// below its coxa mount on the ground.
    pub fn body(&self) -> Result<Body, ParameterError> {
        self.validate()?;
        let legs = self.legs.map(|mount| self.leg(&mount));
        Ok(Body::new(self.size, self.origin, Head { offset: self.head_offset }, legs))
    }

    fn leg(&self, mount: &LegMount) -> Leg {
        let mut target = mount.offset;
        target.y = Length::ZERO;

        Leg {
            id: mount.id,
            name: mount.id.name().to_string(),
            phase: mount.phase,
            offset: mount.offset,
            coxa: Hinge {
                zero: mount.coxa_zero,
                speed: self.servo_speed,
                ..Hinge::new(
                    Axis::Y,
                    self.coxa_length,
                    HingeRange::new(mount.side * self.coxa_range.min, mount.side * self.coxa_range.max),
                )
            },
            femur: Hinge {
                zero: self.femur_zero,
                speed: self.servo_speed,
                ..Hinge::new(Axis::Z, self.femur_length, self.femur_range)
            },
            tibia: Hinge {
                zero: self.tibia_zero,
                speed: self.servo_speed,
                ..Hinge::new(Axis::Z, self.tibia_length, self.tibia_range)
            },
            ik: LegIK {
                target,
                planted: true,
                ..LegIK::default()
            },
        }
    }

    /// Convert to string yaml representation (quick viewing, saving, etc).
    /// Lengths are in millimeters, angles in degrees.
    pub fn to_yaml(&self) -> String {
        fn mm3(v: &Vec3) -> String {
            let [x, y, z] = v.millimeters();
            format!("[{}, {}, {}]", x, y, z)
        }
        fn range(r: &HingeRange) -> String {
            format!("[{}, {}]", deg(r.min), deg(r.max))
        }

        let mut yaml = format!(
            "body:\n  \
               size: {}\n  \
               origin: {}\n  \
               head_offset: {}\n\
             links:\n  \
               coxa: {}\n  \
               femur: {}\n  \
               tibia: {}\n\
             ranges:\n  \
               coxa: {}\n  \
               femur: {}\n  \
               tibia: {}\n\
             zeros:\n  \
               femur: {}\n  \
               tibia: {}\n",
            mm3(&self.size),
            mm3(&self.origin),
            mm3(&self.head_offset),
            self.coxa_length.millimeters(),
            self.femur_length.millimeters(),
            self.tibia_length.millimeters(),
            range(&self.coxa_range),
            range(&self.femur_range),
            range(&self.tibia_range),
            deg(self.femur_zero),
            deg(self.tibia_zero),
        );
        if let Some(speed) = self.servo_speed {
            yaml.push_str(&format!("servo_speed: {}\n", deg(speed)));
        }
        yaml.push_str("legs:\n");
        for mount in &self.legs {
            yaml.push_str(&format!(
                "  - name: {}\n    offset: {}\n    coxa_zero: {}\n    side: {}\n    phase: {}\n",
                mount.id.name(),
                mm3(&mount.offset),
                deg(mount.coxa_zero),
                mount.side,
                deg(mount.phase)
            ));
        }
        yaml.push_str(&self.gait.to_yaml());
        yaml
    }
}

#[cfg(test)]
mod tests {
    use crate::body::LegId;
    use crate::geometry::{Vec3, MM};
    use crate::parameter_error::ParameterError;
    use crate::parameters::RobotParameters;

    #[test]
    fn test_body_from_preset() {
        let parameters = RobotParameters::adeept();
        let body = parameters.body().expect("preset is valid");

        for (leg, id) in body.legs().zip(LegId::ALL) {
            assert_eq!(leg.id, id);
            assert_eq!(leg.name, id.name());
            assert_eq!(leg.coxa.length, 12.0 * MM);
            assert_eq!(leg.femur.length, 38.0 * MM);
            assert_eq!(leg.tibia.length, 50.0 * MM);
            assert_eq!(leg.ik.target.y, crate::geometry::Length::ZERO);
            assert!(leg.ik.planted);
        }

        // Left coxa ranges are stored mirrored
        let lf = body.leg(LegId::LF);
        let rf = body.leg(LegId::RF);
        assert_eq!(lf.coxa.range.min, -rf.coxa.range.min);
        assert_eq!(lf.coxa.low_high(), rf.coxa.low_high());
    }

    #[test]
    fn test_rejects_bad_lengths() {
        let mut parameters = RobotParameters::adeept();
        parameters.tibia_length = -1.0 * MM;
        assert!(matches!(
            parameters.body(),
            Err(ParameterError::KinematicsConfigurationError(_))
        ));
    }

    #[test]
    fn test_rejects_leg_at_origin() {
        let mut parameters = RobotParameters::adeept();
        parameters.legs[2].offset = Vec3::mm(0.0, 5.5, 0.0);
        assert!(parameters.body().is_err());
    }

    #[test]
    fn test_rejects_wrong_order() {
        let mut parameters = RobotParameters::adeept();
        parameters.legs.swap(0, 1);
        assert!(parameters.validate().is_err());
    }
}
