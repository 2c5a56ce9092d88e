//! Geometric primitives used by the material model and ring generator.

use std::f64::consts::PI;

/// A shape used to describe a material layer or a planetoid's overall
/// envelope. All dimensions are in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f64 },
    HollowSphere { inner_radius: f64, outer_radius: f64 },
    /// Oblate spheroid: equatorial radius `a`, polar radius `c = a * (1 - flattening)`.
    Ellipsoid { equatorial_radius: f64, flattening: f64 },
    Torus { major_radius: f64, minor_radius: f64 },
}

impl Shape {
    pub fn volume(&self) -> f64 {
        match *self {
            Shape::Sphere { radius } => 4.0 / 3.0 * PI * radius.powi(3),
            Shape::HollowSphere { inner_radius, outer_radius } => {
                4.0 / 3.0 * PI * (outer_radius.powi(3) - inner_radius.powi(3))
            }
            Shape::Ellipsoid { equatorial_radius, flattening } => {
                let polar = equatorial_radius * (1.0 - flattening);
                4.0 / 3.0 * PI * equatorial_radius * equatorial_radius * polar
            }
            Shape::Torus { major_radius, minor_radius } => {
                2.0 * PI * PI * major_radius * minor_radius * minor_radius
            }
        }
    }

    /// The radius to use for surface-area/gravity purposes: the mean of the
    /// equatorial and polar radii for an ellipsoid, the outer radius for a
    /// hollow sphere, `radius` for a sphere.
    pub fn effective_radius(&self) -> f64 {
        match *self {
            Shape::Sphere { radius } => radius,
            Shape::HollowSphere { outer_radius, .. } => outer_radius,
            Shape::Ellipsoid { equatorial_radius, flattening } => {
                let polar = equatorial_radius * (1.0 - flattening);
                (2.0 * equatorial_radius + polar) / 3.0
            }
            Shape::Torus { major_radius, minor_radius } => major_radius + minor_radius,
        }
    }
}

/// An oblate spheroid positioned in a parent reference frame.
///
/// Flattening `f = (a - c) / a` where `a` is the equatorial radius and `c`
/// the polar radius. `f = 0` is a perfect sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    pub equatorial_radius: f64,
    pub flattening: f64,
}

impl Ellipsoid {
    pub fn new(equatorial_radius: f64, flattening: f64) -> Self {
        Self { equatorial_radius, flattening: flattening.clamp(0.0, 0.5) }
    }

    pub fn polar_radius(&self) -> f64 {
        self.equatorial_radius * (1.0 - self.flattening)
    }

    pub fn mean_radius(&self) -> f64 {
        (2.0 * self.equatorial_radius + self.polar_radius()) / 3.0
    }

    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.equatorial_radius * self.equatorial_radius * self.polar_radius()
    }

    /// Radial distance from centre to the surface at geodetic latitude
    /// `lat` (radians), ignoring longitude dependence (rotational symmetry).
    pub fn radius_at_latitude(&self, lat: f64) -> f64 {
        let a = self.equatorial_radius;
        let c = self.polar_radius();
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let denom = ((c * cos_lat).powi(2) + (a * sin_lat).powi(2)).sqrt();
        if denom < 1e-12 {
            return a;
        }
        a * c / denom
    }
}
