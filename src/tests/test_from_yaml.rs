use crate::body::LegId;
use crate::parameters::RobotParameters;

const READ_ERROR: &str = "Failed to load parameters from file";

/// Angles may lose precision when written with four decimals in degrees.
fn assert_same_robot(expected: &RobotParameters, loaded: &RobotParameters) {
    const ANGLE: f64 = 1e-6;

    assert_eq!(expected.size, loaded.size);
    assert_eq!(expected.origin, loaded.origin);
    assert_eq!(expected.head_offset, loaded.head_offset);
    assert_eq!(expected.coxa_length, loaded.coxa_length);
    assert_eq!(expected.femur_length, loaded.femur_length);
    assert_eq!(expected.tibia_length, loaded.tibia_length);

    for (e, l) in [
        (expected.coxa_range, loaded.coxa_range),
        (expected.femur_range, loaded.femur_range),
        (expected.tibia_range, loaded.tibia_range),
    ] {
        assert!((e.min - l.min).abs() < ANGLE && (e.max - l.max).abs() < ANGLE, "{:?} vs {:?}", e, l);
    }
    assert!((expected.femur_zero - loaded.femur_zero).abs() < ANGLE);
    assert!((expected.tibia_zero - loaded.tibia_zero).abs() < ANGLE);

    match (expected.servo_speed, loaded.servo_speed) {
        (Some(e), Some(l)) => assert!((e - l).abs() < ANGLE),
        (e, l) => assert_eq!(e, l),
    }

    for (e, l) in expected.legs.iter().zip(loaded.legs.iter()) {
        assert_eq!(e.id, l.id);
        assert_eq!(e.offset, l.offset, "{}", e.id.name());
        assert_eq!(e.side, l.side);
        assert!((e.coxa_zero - l.coxa_zero).abs() < ANGLE, "{}", e.id.name());
        assert!((e.phase - l.phase).abs() < ANGLE, "{}", e.id.name());
    }
}

#[test]
fn test_adeept_from_yaml() {
    let loaded = RobotParameters::from_yaml_file("src/tests/data/adeept.yaml").expect(READ_ERROR);
    assert_same_robot(&RobotParameters::adeept(), &loaded);
    assert_eq!(loaded.legs[LegId::LM.index()].side, -1.0);
}

#[test]
fn test_yaml_round_trip() {
    let parameters = RobotParameters::adeept();
    let yaml = parameters.to_yaml();
    let loaded = RobotParameters::from_yaml_str(&yaml).expect(READ_ERROR);
    assert_same_robot(&parameters, &loaded);
    assert_eq!(parameters.gait, loaded.gait);
}

#[test]
fn test_loaded_robot_builds_body() {
    let loaded = RobotParameters::from_yaml_file("src/tests/data/adeept.yaml").expect(READ_ERROR);
    let body = loaded.body().expect("valid body");
    assert_eq!(body.leg(LegId::RB).name, "RB");
    assert_eq!(body.leg(LegId::RB).offset, loaded.legs[LegId::RB.index()].offset);
}
