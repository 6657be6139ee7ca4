//! Control modes that pose the body and place the feet, one tick at a time.
//!
//! Every mode is a pure function of the elapsed time: it writes the body origin and
//! orientation, a world space target for every foot and the planted hint. The
//! [`Controller`] switches between modes and runs the leg solver after each update.

use tracing::info;

use crate::body::{Body, Leg, LegSet};
use crate::geometry::{Length, Vec3, MM};
use crate::kinematic_traits::LegKinematics;
use crate::kinematics_impl::HexapodKinematics;
use crate::transform::Orient;

/// Tunables shared by the control modes. Lengths are in robot units, rates in rad/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaitParameters {
    /// Horizontal distance from the coxa mount to the neutral foot position.
    pub stand_reach: Length,
    /// Amplitude of the vertical body bob while standing.
    pub bob_amplitude: Length,
    pub bob_rate: f64,
    /// Distance a foot travels along the ground in one stance phase.
    pub stride: Length,
    /// Highest foot lift during swing.
    pub step_height: Length,
    /// Duration of a full tripod cycle, seconds.
    pub period: f64,
    pub tap_height: Length,
    pub tap_rate: f64,
}

impl Default for GaitParameters {
    fn default() -> Self {
        GaitParameters {
            stand_reach: 80.0 * MM,
            bob_amplitude: 5.0 * MM,
            bob_rate: 0.3,
            stride: 20.0 * MM,
            step_height: 15.0 * MM,
            period: 1.2,
            tap_height: 20.0 * MM,
            tap_rate: 4.0,
        }
    }
}

impl GaitParameters {
    /// The optional `gait:` section of the robot YAML.
    pub fn to_yaml(&self) -> String {
        format!(
            "gait:\n  \
               stand_reach: {}\n  \
               bob_amplitude: {}\n  \
               bob_rate: {}\n  \
               stride: {}\n  \
               step_height: {}\n  \
               period: {}\n  \
               tap_height: {}\n  \
               tap_rate: {}\n",
            self.stand_reach.millimeters(),
            self.bob_amplitude.millimeters(),
            self.bob_rate,
            self.stride.millimeters(),
            self.step_height.millimeters(),
            self.period,
            self.tap_height.millimeters(),
            self.tap_rate,
        )
    }

    /// Foot position the leg returns to when standing, body space, on the ground plane
    /// of a body whose origin is at ground level.
    pub fn neutral(&self, leg: &Leg) -> Vec3 {
        let outward = leg
            .offset
            .horizontal()
            .normalized_to(self.stand_reach)
            .unwrap_or(Vec3::FORWARD * self.stand_reach.0);
        let mut neutral = leg.offset + outward;
        neutral.y = Length::ZERO;
        neutral
    }
}

/// Interchangeable control modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaitMode {
    /// Feet at their neutral positions, the body slowly bobbing up and down.
    Stand,
    /// Alternating tripods, walking forward.
    TripodWalk,
    /// Standing still, each leg tapping in turn.
    IdleTaps,
}

impl GaitMode {
    pub const ALL: [GaitMode; 3] = [GaitMode::Stand, GaitMode::TripodWalk, GaitMode::IdleTaps];

    pub fn name(self) -> &'static str {
        match self {
            GaitMode::Stand => "Stand",
            GaitMode::TripodWalk => "Tripod Walk",
            GaitMode::IdleTaps => "Idle Taps",
        }
    }

    /// Short name as used on the command line.
    pub fn key(self) -> &'static str {
        match self {
            GaitMode::Stand => "stand",
            GaitMode::TripodWalk => "tripod",
            GaitMode::IdleTaps => "taps",
        }
    }

    pub fn from_key(key: &str) -> Option<GaitMode> {
        GaitMode::ALL.into_iter().find(|mode| mode.key().eq_ignore_ascii_case(key))
    }

    /// Poses the body and sets all foot targets for the given time since the mode
    /// started. `home` is the origin of the standing body.
    pub fn apply(self, params: &GaitParameters, home: Vec3, time: f64, body: &mut Body) {
        match self {
            GaitMode::Stand => stand(params, home, time, body),
            GaitMode::TripodWalk => tripod_walk(params, home, time, body),
            GaitMode::IdleTaps => idle_taps(params, home, time, body),
        }
    }
}

/// Ground position of the foot lifted by `lift`. Lifts at or below zero are clamped to
/// the ground and mark the target as planted.
fn place(leg: &mut Leg, ground: Vec3, lift: Length) {
    let planted = lift.0 <= 0.0;
    leg.ik.target = Vec3 {
        y: if planted { Length::ZERO } else { lift },
        ..ground
    };
    leg.ik.planted = planted;
}

fn stand(params: &GaitParameters, home: Vec3, time: f64, body: &mut Body) {
    let bob = params.bob_amplitude * (time * params.bob_rate).sin();
    body.origin = home + Vec3::new(Length::ZERO, bob, Length::ZERO);
    body.orient = Orient::default();

    let base = home.horizontal();
    for leg in body.legs_mut() {
        let neutral = params.neutral(leg);
        place(leg, base + neutral, Length::ZERO);
    }
}

fn tripod_walk(params: &GaitParameters, home: Vec3, time: f64, body: &mut Body) {
    // Stance feet move back by one stride while half a cycle passes
    let speed = params.stride.0 / (params.period / 2.0);
    let advance = Length(speed * time);
    body.origin = home + Vec3::new(advance, Length::ZERO, Length::ZERO);
    body.orient = Orient::default();

    let base = body.origin.horizontal();
    let half_stride = params.stride / 2.0;
    for leg in body.legs_mut() {
        let group_offset = if LegSet::TRIPOD_A.has(leg.id) { 0.0 } else { 0.5 };
        let cycle = (time / params.period + group_offset).rem_euclid(1.0);

        let (along, lift) = if cycle < 0.5 {
            let p = cycle / 0.5;
            (half_stride - params.stride * p, Length::ZERO)
        } else {
            let p = (cycle - 0.5) / 0.5;
            (-half_stride + params.stride * p, params.step_height * (4.0 * p * (1.0 - p)))
        };

        let neutral = params.neutral(leg);
        place(leg, base + neutral + Vec3::new(along, Length::ZERO, Length::ZERO), lift);
    }
}

fn idle_taps(params: &GaitParameters, home: Vec3, time: f64, body: &mut Body) {
    // Only the top of each wave lifts a foot, so at most two legs are up at once
    const THRESHOLD: f64 = 0.7;

    body.origin = home;
    body.orient = Orient::default();

    let base = home.horizontal();
    for leg in body.legs_mut() {
        let wave = (time * params.tap_rate + leg.phase).sin();
        let lift = params.tap_height * ((wave - THRESHOLD) / (1.0 - THRESHOLD));
        let neutral = params.neutral(leg);
        place(leg, base + neutral, lift);
    }
}

/// Runs the current mode and the leg solver every tick.
pub struct Controller {
    /// Never empty.
    modes: Vec<GaitMode>,
    pub params: GaitParameters,
    pub kinematics: HexapodKinematics,
    current: usize,
    elapsed: f64,
    home: Vec3,
}

impl Controller {
    /// The body's current origin becomes the standing origin.
    pub fn new(body: &Body, params: GaitParameters, kinematics: HexapodKinematics) -> Self {
        Controller {
            modes: GaitMode::ALL.to_vec(),
            params,
            kinematics,
            current: 0,
            elapsed: 0.0,
            home: body.origin,
        }
    }

    /// Controller cycling through the given modes only, starting with the first.
    /// Returns `None` if no mode is given.
    pub fn with_modes(
        body: &Body,
        params: GaitParameters,
        kinematics: HexapodKinematics,
        modes: Vec<GaitMode>,
    ) -> Option<Self> {
        if modes.is_empty() {
            return None;
        }
        Some(Controller {
            modes,
            ..Controller::new(body, params, kinematics)
        })
    }

    pub fn modes(&self) -> &[GaitMode] {
        &self.modes
    }

    pub fn mode(&self) -> GaitMode {
        self.modes[self.current]
    }

    pub fn mode_name(&self) -> &'static str {
        self.mode().name()
    }

    /// Time since the current mode was selected, seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Steps through the modes, wrapping around at both ends.
    pub fn toggle(&mut self, delta: i32) {
        let count = self.modes.len() as i64;
        self.current = (self.current as i64 + delta as i64).rem_euclid(count) as usize;
        self.elapsed = 0.0;
        info!(mode = self.mode_name(), "gait mode switched");
    }

    pub fn set_mode(&mut self, mode: GaitMode) {
        if let Some(index) = self.modes.iter().position(|m| *m == mode) {
            self.current = index;
            self.elapsed = 0.0;
            info!(mode = self.mode_name(), "gait mode switched");
        }
    }

    /// Advances time by `dt` seconds, poses the body and solves all legs.
    pub fn update(&mut self, dt: f64, body: &mut Body) {
        self.elapsed += dt;
        self.mode().apply(&self.params, self.home, self.elapsed, body);
        self.kinematics.solve(body);
    }
}
