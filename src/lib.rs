//! Rust implementation of analytic inverse and forward kinematics for six-legged walking robots
//! with three-joint legs (coxa, femur, tibia).
//!
//! Every leg is solved on its own and in closed form: the coxa yaw is taken from the
//! horizontal direction of the target, the femur and tibia pitches from the law of cosines
//! in the plane of the leg, without iteration.
//!
//! # Features
//!
//! - Targets are given in world space; the body may be translated and rotated freely.
//! - Joint ranges are enforced. A leg whose target can not be reached within range is
//!   clamped into range and reported as not solved, with a diagnostic note.
//! - Out of reach targets produce a fully extended leg pointing at the target. Optionally,
//!   the foot is planted on the ground instead.
//! - Forward kinematics with the positions of all joints, useful for drawing and checking.
//! - Robot descriptions in code ([`parameters_robots`]) or loaded from YAML.
//! - A small gait layer: standing, tripod walk and idle taps, driven by [`gait::Controller`].
//!
//! # Frame
//!
//! Y is up, X points forward and Z to the right of the robot. All lengths share one
//! internal unit, see [`geometry`].
//!
//! # Example
//!
//! ```
//! use hexapod_kinematics::kinematic_traits::LegKinematics;
//! use hexapod_kinematics::kinematics_impl::HexapodKinematics;
//! use hexapod_kinematics::parameters::RobotParameters;
//!
//! let mut body = RobotParameters::adeept().body().unwrap();
//! let solver = HexapodKinematics::new();
//! solver.solve(&mut body);
//! for leg in body.legs() {
//!     println!("{}: {}", leg.name, leg.ik.debug);
//! }
//! ```

pub mod geometry;
pub mod transform;

#[path = "utils/utils.rs"]
pub mod utils;

pub mod hinge;
pub mod body;

pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod parameters;
pub mod parameters_robots;
pub mod parameter_error;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;

pub mod gait;

#[cfg(test)]
mod tests;
