//! Supports reading the robot description from YAML file (optional)

use std::path::Path;

use yaml_rust2::{Yaml, YamlLoader};

use crate::body::LegId;
use crate::gait::GaitParameters;
use crate::geometry::{Length, Vec3};
use crate::hinge::HingeRange;
use crate::parameter_error::ParameterError;
use crate::parameters::{LegMount, RobotParameters};
use crate::utils::Radians;

impl RobotParameters {
    /// Read the robot description from YAML file. Lengths are in millimeters and angles
    /// in degrees, the layout is the one written by [`RobotParameters::to_yaml`]:
    /// ```yaml
    /// body:
    ///   size: [105, 45, 105]
    ///   origin: [0, 22, 0]
    ///   head_offset: [63, 20, 0]
    /// links:
    ///   coxa: 12
    ///   femur: 38
    ///   tibia: 50
    /// ranges:
    ///   coxa: [-90, 90]
    ///   femur: [90, -90]
    ///   tibia: [90, -90]
    /// zeros:           # optional
    ///   femur: 0
    ///   tibia: 0
    /// servo_speed: 600 # optional, degrees per second
    /// legs:
    ///   - name: LF
    ///     offset: [63, 5.5, -57]
    ///     coxa_zero: -45
    ///     side: -1     # optional, derived from the name
    ///     phase: 0     # optional
    ///   # ... all six legs, any order
    /// gait:            # optional, every field optional
    ///   stride: 20
    /// ```
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let docs = YamlLoader::load_from_str(contents)
            .map_err(|e| ParameterError::ParseError(format!("{}", e)))?;
        let doc = docs
            .first()
            .ok_or_else(|| ParameterError::ParseError("empty document".to_string()))?;

        let body = section(doc, "body")?;
        let links = section(doc, "links")?;
        let ranges = section(doc, "ranges")?;
        let zeros = &doc["zeros"];

        let servo_speed = match optional_number(doc, "servo_speed")? {
            Some(speed) => Some(speed.to_radians()),
            None => None,
        };

        let parameters = RobotParameters {
            size: read_vec3(body, "body.size", "size")?,
            origin: read_vec3(body, "body.origin", "origin")?,
            head_offset: match optional(body, "head_offset") {
                Some(_) => read_vec3(body, "body.head_offset", "head_offset")?,
                None => Vec3::ZERO,
            },
            coxa_length: read_length(links, "links.coxa", "coxa")?,
            femur_length: read_length(links, "links.femur", "femur")?,
            tibia_length: read_length(links, "links.tibia", "tibia")?,
            coxa_range: read_range(ranges, "ranges.coxa", "coxa")?,
            femur_range: read_range(ranges, "ranges.femur", "femur")?,
            tibia_range: read_range(ranges, "ranges.tibia", "tibia")?,
            femur_zero: read_angle_or(zeros, "zeros.femur", "femur", 0.0)?,
            tibia_zero: read_angle_or(zeros, "zeros.tibia", "tibia", 0.0)?,
            servo_speed,
            legs: read_legs(doc)?,
            gait: read_gait(&doc["gait"])?,
        };
        parameters.validate()?;
        Ok(parameters)
    }
}

fn optional<'a>(yaml: &'a Yaml, key: &str) -> Option<&'a Yaml> {
    match &yaml[key] {
        Yaml::BadValue | Yaml::Null => None,
        value => Some(value),
    }
}

fn section<'a>(yaml: &'a Yaml, key: &str) -> Result<&'a Yaml, ParameterError> {
    optional(yaml, key).ok_or_else(|| ParameterError::MissingField(key.to_string()))
}

/// YAML distinguishes integers from reals, robot files use both.
fn as_number(yaml: &Yaml, label: &str) -> Result<f64, ParameterError> {
    let value = match yaml {
        Yaml::Real(_) => yaml.as_f64(),
        Yaml::Integer(i) => Some(*i as f64),
        _ => None,
    };
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(ParameterError::ParseError(format!("{} must be finite (got {})", label, v))),
        None => Err(ParameterError::ParseError(format!("{} must be a number", label))),
    }
}

fn optional_number(yaml: &Yaml, key: &str) -> Result<Option<f64>, ParameterError> {
    optional(yaml, key).map(|value| as_number(value, key)).transpose()
}

fn numbers(yaml: &Yaml, label: &str, expected: usize) -> Result<Vec<f64>, ParameterError> {
    let list = yaml
        .as_vec()
        .ok_or_else(|| ParameterError::ParseError(format!("{} must be a list", label)))?;
    if list.len() != expected {
        return Err(ParameterError::InvalidLength { expected, found: list.len() });
    }
    list.iter().map(|v| as_number(v, label)).collect()
}

fn read_vec3(yaml: &Yaml, label: &str, key: &str) -> Result<Vec3, ParameterError> {
    let value = optional(yaml, key).ok_or_else(|| ParameterError::MissingField(label.to_string()))?;
    let v = numbers(value, label, 3)?;
    Ok(Vec3::mm(v[0], v[1], v[2]))
}

fn read_length(yaml: &Yaml, label: &str, key: &str) -> Result<Length, ParameterError> {
    let value = optional(yaml, key).ok_or_else(|| ParameterError::MissingField(label.to_string()))?;
    Ok(Length::from_millimeters(as_number(value, label)?))
}

fn read_range(yaml: &Yaml, label: &str, key: &str) -> Result<HingeRange, ParameterError> {
    let value = optional(yaml, key).ok_or_else(|| ParameterError::MissingField(label.to_string()))?;
    let list = value
        .as_vec()
        .ok_or_else(|| ParameterError::WrongAngle(format!("{} must be a [min, max] pair", label)))?;
    if list.len() != 2 {
        return Err(ParameterError::InvalidLength { expected: 2, found: list.len() });
    }
    let min = as_number(&list[0], label).map_err(|e| ParameterError::WrongAngle(e.to_string()))?;
    let max = as_number(&list[1], label).map_err(|e| ParameterError::WrongAngle(e.to_string()))?;
    Ok(HingeRange::new(min.to_radians(), max.to_radians()))
}

fn read_angle_or(yaml: &Yaml, label: &str, key: &str, default: Radians) -> Result<Radians, ParameterError> {
    match optional(yaml, key) {
        Some(value) => as_number(value, label)
            .map(f64::to_radians)
            .map_err(|e| ParameterError::WrongAngle(e.to_string())),
        None => Ok(default),
    }
}

fn read_leg(yaml: &Yaml, index: usize) -> Result<LegMount, ParameterError> {
    let label = format!("legs[{}]", index);
    let name = section(yaml, "name")
        .map_err(|_| ParameterError::MissingField(format!("{}.name", label)))?
        .as_str()
        .ok_or_else(|| ParameterError::ParseError(format!("{}.name must be a string", label)))?;
    let id = LegId::from_name(name)
        .ok_or_else(|| ParameterError::ParseError(format!("{}: unknown leg name '{}'", label, name)))?;

    let side = match optional_number(yaml, "side")? {
        Some(side) => side,
        None => id.side(),
    };

    Ok(LegMount {
        id,
        offset: read_vec3(yaml, &format!("{}.offset", label), "offset")?,
        coxa_zero: match optional(yaml, "coxa_zero") {
            Some(_) => read_angle_or(yaml, &format!("{}.coxa_zero", label), "coxa_zero", 0.0)?,
            None => return Err(ParameterError::MissingField(format!("{}.coxa_zero", label))),
        },
        side,
        phase: read_angle_or(yaml, &format!("{}.phase", label), "phase", 0.0)?,
    })
}

/// Legs may be listed in any order, each exactly once. They are stored in [`LegId::ALL`] order.
fn read_legs(doc: &Yaml) -> Result<[LegMount; 6], ParameterError> {
    let list = section(doc, "legs")?
        .as_vec()
        .ok_or_else(|| ParameterError::ParseError("legs must be a list".to_string()))?;
    if list.len() != LegId::ALL.len() {
        return Err(ParameterError::InvalidLength { expected: LegId::ALL.len(), found: list.len() });
    }

    let mut slots: [Option<LegMount>; 6] = [None; 6];
    for (index, yaml) in list.iter().enumerate() {
        let mount = read_leg(yaml, index)?;
        let slot = &mut slots[mount.id.index()];
        if slot.is_some() {
            return Err(ParameterError::ParseError(format!("leg {} listed twice", mount.id.name())));
        }
        *slot = Some(mount);
    }

    let mut legs = Vec::with_capacity(6);
    for (slot, id) in slots.into_iter().zip(LegId::ALL) {
        legs.push(slot.ok_or_else(|| ParameterError::MissingField(format!("legs: {}", id.name())))?);
    }
    legs.try_into()
        .map_err(|v: Vec<LegMount>| ParameterError::InvalidLength { expected: 6, found: v.len() })
}

fn read_gait(yaml: &Yaml) -> Result<GaitParameters, ParameterError> {
    let mut gait = GaitParameters::default();
    if matches!(yaml, Yaml::BadValue | Yaml::Null) {
        return Ok(gait);
    }

    let mm = |key: &str, target: &mut Length| -> Result<(), ParameterError> {
        if let Some(v) = optional_number(yaml, key)? {
            *target = Length::from_millimeters(v);
        }
        Ok(())
    };
    mm("stand_reach", &mut gait.stand_reach)?;
    mm("bob_amplitude", &mut gait.bob_amplitude)?;
    mm("stride", &mut gait.stride)?;
    mm("step_height", &mut gait.step_height)?;
    mm("tap_height", &mut gait.tap_height)?;

    if let Some(v) = optional_number(yaml, "bob_rate")? {
        gait.bob_rate = v;
    }
    if let Some(v) = optional_number(yaml, "tap_rate")? {
        gait.tap_rate = v;
    }
    if let Some(v) = optional_number(yaml, "period")? {
        if v <= 0.0 {
            return Err(ParameterError::ParseError(format!("gait.period must be positive (got {})", v)));
        }
        gait.period = v;
    }
    Ok(gait)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "
body:
  size: [105, 45, 105]
  origin: [0, 22, 0]
links:
  coxa: 12
  femur: 38.0
  tibia: 50
ranges:
  coxa: [-90, 90]
  femur: [90, -90]
  tibia: [90, -90]
legs:
  - { name: RB, offset: [-63, 5.5, 57], coxa_zero: 135 }
  - { name: LF, offset: [63, 5.5, -57], coxa_zero: -45 }
  - { name: RF, offset: [63, 5.5, 57], coxa_zero: 45 }
  - { name: LM, offset: [0, 5.5, -77], coxa_zero: -90 }
  - { name: RM, offset: [0, 5.5, 77], coxa_zero: 90 }
  - { name: LB, offset: [-63, 5.5, -57], coxa_zero: -135 }
";

    #[test]
    fn test_minimal_file() {
        let parameters = RobotParameters::from_yaml_str(MINIMAL).expect("minimal description");
        assert_eq!(parameters.femur_length, Length::from_millimeters(38.0));
        assert_eq!(parameters.head_offset, Vec3::ZERO);
        assert_eq!(parameters.servo_speed, None);
        assert_eq!(parameters.gait, GaitParameters::default());

        // Sorted into canonical order, sides derived from names
        for (mount, id) in parameters.legs.iter().zip(LegId::ALL) {
            assert_eq!(mount.id, id);
            assert_eq!(mount.side, id.side());
        }
        assert!((parameters.legs[LegId::RB.index()].coxa_zero - 135f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_missing_leg() {
        let yaml = MINIMAL.replace("  - { name: RM, offset: [0, 5.5, 77], coxa_zero: 90 }\n", "");
        assert!(matches!(
            RobotParameters::from_yaml_str(&yaml),
            Err(ParameterError::InvalidLength { expected: 6, found: 5 })
        ));
    }

    #[test]
    fn test_duplicate_leg() {
        let yaml = MINIMAL.replace("name: RM", "name: LM");
        assert!(matches!(RobotParameters::from_yaml_str(&yaml), Err(ParameterError::ParseError(_))));
    }

    #[test]
    fn test_unknown_leg() {
        let yaml = MINIMAL.replace("name: RM", "name: XM");
        assert!(matches!(RobotParameters::from_yaml_str(&yaml), Err(ParameterError::ParseError(_))));
    }

    #[test]
    fn test_missing_section() {
        let yaml = MINIMAL.replace("links:", "linkz:");
        assert!(matches!(RobotParameters::from_yaml_str(&yaml), Err(ParameterError::MissingField(_))));
    }

    #[test]
    fn test_bad_range() {
        let yaml = MINIMAL.replace("coxa: [-90, 90]", "coxa: [-90, ninety]");
        assert!(matches!(RobotParameters::from_yaml_str(&yaml), Err(ParameterError::WrongAngle(_))));

        let yaml = MINIMAL.replace("coxa: [-90, 90]", "coxa: [-90]");
        assert!(matches!(
            RobotParameters::from_yaml_str(&yaml),
            Err(ParameterError::InvalidLength { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_gait_section() {
        let yaml = format!("{}gait:\n  stride: 30\n  period: 2\n", MINIMAL);
        let parameters = RobotParameters::from_yaml_str(&yaml).expect("gait section");
        assert_eq!(parameters.gait.stride, Length::from_millimeters(30.0));
        assert_eq!(parameters.gait.period, 2.0);
        assert_eq!(parameters.gait.step_height, GaitParameters::default().step_height);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            RobotParameters::from_yaml_file("src/tests/data/no_such_robot.yaml"),
            Err(ParameterError::IoError(_))
        ));
    }
}
