//! Vector and quaternion math over f64.
//!
//! All orbital and rotational geometry in this crate uses f64; ratios
//! between planet radii, orbital distances, and Hill-sphere radii span many
//! orders of magnitude but never enough (< 1e15) to need arbitrary-precision
//! arithmetic in practice once lengths are expressed in metres rather than,
//! say, nested unit systems — see `DESIGN.md` for the Open Question
//! resolution on spec.md §9's arbitrary-precision design note.

use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const Y: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Self {
        let len = self.length();
        if len < 1e-300 {
            return Vec3::Y;
        }
        self * (1.0 / len)
    }

    /// Geographic latitude/longitude (radians) of this point on the unit
    /// sphere, measured about the canonical Y axis.
    pub fn to_lat_lon(self) -> (f64, f64) {
        let n = self.normalize();
        let lat = n.y.clamp(-1.0, 1.0).asin();
        let lon = n.z.atan2(n.x);
        (lat, lon)
    }

    pub fn from_lat_lon(lat: f64, lon: f64) -> Self {
        let clat = lat.cos();
        Self {
            x: clat * lon.cos(),
            y: lat.sin(),
            z: clat * lon.sin(),
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Unit quaternion, Hamilton convention (w, x, y, z).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    /// Rotation of `angle` radians about `axis` (need not be pre-normalized).
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let a = axis.normalize();
        let half = angle * 0.5;
        let s = half.sin();
        Self { w: half.cos(), x: a.x * s, y: a.y * s, z: a.z * s }
    }

    /// Hamilton product `self * other`.
    pub fn mul(self, other: Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }

    /// The conjugate (inverse for a unit quaternion).
    pub fn conjugate(self) -> Quaternion {
        Quaternion { w: self.w, x: -self.x, y: -self.y, z: -self.z }
    }

    /// Rotate a vector by this unit quaternion.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let qv = Quaternion { w: 0.0, x: v.x, y: v.y, z: v.z };
        let r = self.mul(qv).mul(self.conjugate());
        Vec3::new(r.x, r.y, r.z)
    }
}
