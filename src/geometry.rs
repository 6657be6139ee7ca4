//! Lengths and vectors in robot space.
//!
//! All geometric quantities share one linear unit: a hundredth of a millimeter, the scale
//! the robot dimensions are specified in. Conversions to millimeters or meters are plain
//! scaling and are only meant for display and file formats.
//!
//! The frame is Y up, X forward and Z to the right of the robot.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use nalgebra::{Point3, Vector3};

/// Scalar distance in internal units (1 unit = 0.01 mm).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Length(pub f64);

/// One millimeter.
pub const MM: Length = Length(100.0);

/// One meter.
pub const M: Length = Length(100_000.0);

impl Length {
    pub const ZERO: Length = Length(0.0);

    pub fn meters(self) -> f64 {
        self.0 / M.0
    }

    pub fn millimeters(self) -> f64 {
        self.0 / MM.0
    }

    pub fn from_millimeters(mm: f64) -> Self {
        Length(mm * MM.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn sqrt(self) -> Length {
        Length(self.0.sqrt())
    }

    pub fn abs(self) -> Length {
        Length(self.0.abs())
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.1}mm", self.millimeters())
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Mul<Length> for f64 {
    type Output = Length;
    fn mul(self, rhs: Length) -> Length {
        Length(self * rhs.0)
    }
}

impl Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Ratio of two lengths.
impl Div for Length {
    type Output = f64;
    fn div(self, rhs: Length) -> f64 {
        self.0 / rhs.0
    }
}

/// Point or offset in robot space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: Length,
    pub y: Length,
    pub z: Length,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::raw(0.0, 0.0, 0.0);

    pub const FORWARD: Vec3 = Vec3::raw(1.0, 0.0, 0.0);
    pub const BACK: Vec3 = Vec3::raw(-1.0, 0.0, 0.0);
    pub const LEFT: Vec3 = Vec3::raw(0.0, 0.0, -1.0);
    pub const RIGHT: Vec3 = Vec3::raw(0.0, 0.0, 1.0);
    pub const UP: Vec3 = Vec3::raw(0.0, 1.0, 0.0);
    pub const DOWN: Vec3 = Vec3::raw(0.0, -1.0, 0.0);

    pub fn new(x: Length, y: Length, z: Length) -> Self {
        Vec3 { x, y, z }
    }

    /// Vector from raw internal units.
    pub const fn raw(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x: Length(x), y: Length(y), z: Length(z) }
    }

    /// Vector from millimeters.
    pub fn mm(x: f64, y: f64, z: f64) -> Self {
        Vec3::new(x * MM, y * MM, z * MM)
    }

    /// Component-wise product.
    pub fn mul(self, b: Vec3) -> Vec3 {
        Vec3::raw(self.x.0 * b.x.0, self.y.0 * b.y.0, self.z.0 * b.z.0)
    }

    pub fn scale(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    /// Dot product, in squared internal units.
    pub fn dot(self, b: Vec3) -> f64 {
        self.x.0 * b.x.0 + self.y.0 * b.y.0 + self.z.0 * b.z.0
    }

    pub fn length2(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> Length {
        Length(self.length2().sqrt())
    }

    pub fn distance(self, b: Vec3) -> Length {
        (self - b).length()
    }

    /// Rescales the vector to the given length. A zero vector has no direction,
    /// so `None` is returned for it.
    pub fn normalized_to(self, target_length: Length) -> Option<Vec3> {
        let length = self.length();
        if length.0 == 0.0 || !length.is_finite() {
            return None;
        }
        Some(self.scale(target_length / length))
    }

    /// The same vector with the vertical component dropped.
    pub fn horizontal(self) -> Vec3 {
        Vec3 { y: Length::ZERO, ..self }
    }

    pub fn millimeters(self) -> [f64; 3] {
        [self.x.millimeters(), self.y.millimeters(), self.z.millimeters()]
    }

    pub fn meters(self) -> [f64; 3] {
        [self.x.meters(), self.y.meters(), self.z.meters()]
    }

    pub fn to_point(self) -> Point3<f64> {
        Point3::new(self.x.0, self.y.0, self.z.0)
    }

    pub fn from_point(p: &Point3<f64>) -> Self {
        Vec3::raw(p.x, p.y, p.z)
    }

    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x.0, self.y.0, self.z.0)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [x, y, z] = self.millimeters();
        write!(f, "({:.1}, {:.1}, {:.1})mm", x, y, z)
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, b: Vec3) -> Vec3 {
        Vec3::new(self.x + b.x, self.y + b.y, self.z + b.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, b: Vec3) -> Vec3 {
        Vec3::new(self.x - b.x, self.y - b.y, self.z - b.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, b: Vec3) {
        *self = *self + b;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f64) -> Vec3 {
        self.scale(s)
    }
}
