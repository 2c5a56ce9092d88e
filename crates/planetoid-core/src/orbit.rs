//! Keplerian orbit assignment and axial/rotational state (spec §4.2 stages
//! 2, 4, 5, 6).
//!
//! Orbits are Keplerian only (spec §1 Non-goals: no N-body integration).
//! Cyclic references to the orbited body are avoided per spec §9's design
//! note — `orbited_mass`/`orbited_position` are plain values snapshotted at
//! generation time, not a live handle back to the primary.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::vector::{Quaternion, Vec3};

pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Orbit {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub argument_of_periapsis: f64,
    pub longitude_of_ascending_node: f64,
    pub true_anomaly: f64,
    /// Epoch in seconds since an arbitrary but fixed reference.
    pub epoch: f64,
    pub orbited_mass: f64,
    pub orbited_position: Vec3,
}

impl Orbit {
    pub fn periapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn apoapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Orbital period via Kepler's third law, for the reduced two-body
    /// problem with the given secondary mass.
    pub fn period(&self, secondary_mass: f64) -> f64 {
        let mu = GRAVITATIONAL_CONSTANT * (self.orbited_mass + secondary_mass);
        2.0 * PI * (self.semi_major_axis.powi(3) / mu).sqrt()
    }

    /// Semi-major axis that yields the given orbital period (inverse of
    /// [`period`]), used by the §4.7 correction loop when adjusting orbit to
    /// hit a target temperature via distance.
    pub fn semi_major_axis_for_period(period: f64, total_mass: f64) -> f64 {
        let mu = GRAVITATIONAL_CONSTANT * total_mass;
        (mu * (period / (2.0 * PI)).powi(2)).cbrt()
    }

    /// Current scalar distance to the orbited body at the orbit's current
    /// true anomaly.
    pub fn distance(&self) -> f64 {
        let e = self.eccentricity;
        self.semi_major_axis * (1.0 - e * e) / (1.0 + e * self.true_anomaly.cos())
    }

    /// Distance at an arbitrary true anomaly (used by the temperature
    /// interpolation in `surface::temperature_at`).
    pub fn distance_at(&self, true_anomaly: f64) -> f64 {
        let e = self.eccentricity;
        self.semi_major_axis * (1.0 - e * e) / (1.0 + e * true_anomaly.cos())
    }
}

/// Stern-Levison-ish tidal locking test (spec §4.2 stage 4):
/// `(age * M * M_o^2 / (R * rigidity))^(1/6) >= a` locks rotation to the
/// orbital period.
#[allow(clippy::too_many_arguments)]
pub fn is_tidally_locked(
    age_seconds: f64,
    mass: f64,
    orbited_mass: f64,
    radius: f64,
    rigidity: f64,
    semi_major_axis: f64,
) -> bool {
    if radius <= 0.0 || rigidity <= 0.0 {
        return false;
    }
    let inner = age_seconds * mass * orbited_mass * orbited_mass / (radius * rigidity);
    if inner <= 0.0 {
        return false;
    }
    inner.powf(1.0 / 6.0) >= semi_major_axis
}

/// Rotational period (seconds) of a tidally locked body: equal to its
/// orbital period.
pub fn locked_rotational_period(semi_major_axis: f64, total_mass: f64) -> f64 {
    let mu = GRAVITATIONAL_CONSTANT * total_mass;
    2.0 * PI * (semi_major_axis.powi(3) / mu).sqrt()
}

/// Axial orientation: a unit spin axis plus the quaternion that rotates the
/// canonical (Y-up) frame onto it, and the conjugate used to rotate surface
/// points back into the canonical frame for noise sampling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Axis {
    /// Angle between the spin axis and the orbital-plane normal, in
    /// `[0, pi]`; values in `(pi/2, pi]` denote retrograde rotation.
    pub angle_of_rotation: f64,
    /// Precession (yaw) of the spin axis about the orbital normal.
    pub precession: f64,
    pub axis_vector: Vec3,
    pub axis_rotation_quaternion: Quaternion,
}

impl Axis {
    /// Compose the axis vector and quaternion from angle-of-rotation and
    /// precession (spec §4.2 stage 6): start from +Y, yaw by `precession`
    /// about Y, then tilt by `angle_of_rotation` about the yawed vector's
    /// perpendicular. The axis-rotation quaternion stored on the body is the
    /// conjugate of the composition, per spec.
    pub fn compose(angle_of_rotation: f64, precession: f64) -> Self {
        let yaw = Quaternion::from_axis_angle(Vec3::Y, precession);
        let precession_vector = yaw.rotate(Vec3::new(1.0, 0.0, 0.0));
        let tilt = Quaternion::from_axis_angle(precession_vector, angle_of_rotation);
        let composed = tilt.mul(yaw);
        let axis_vector = composed.rotate(Vec3::Y);
        Self {
            angle_of_rotation,
            precession,
            axis_vector,
            axis_rotation_quaternion: composed.conjugate(),
        }
    }

    pub fn is_retrograde(&self) -> bool {
        self.angle_of_rotation > PI / 2.0
    }
}

/// Angular velocity (rad/s) for a given rotational period; zero when the
/// period is zero (spec §7 numerical degeneracy: "AngularVelocity = 0 when
/// period = 0").
pub fn angular_velocity(rotational_period: f64) -> f64 {
    if rotational_period.abs() < 1e-12 {
        0.0
    } else {
        2.0 * PI / rotational_period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_orbit() -> Orbit {
        Orbit {
            semi_major_axis: 1.496e11,
            eccentricity: 0.0167,
            inclination: 0.0,
            argument_of_periapsis: 0.0,
            longitude_of_ascending_node: 0.0,
            true_anomaly: 0.0,
            epoch: 0.0,
            orbited_mass: 1.989e30,
            orbited_position: Vec3::ZERO,
        }
    }

    #[test]
    fn earth_like_period_is_about_one_year() {
        let orbit = sample_orbit();
        let period = orbit.period(5.972e24);
        let days = period / 86400.0;
        assert!((days - 365.25).abs() < 2.0, "period = {days} days");
    }

    #[test]
    fn semi_major_axis_inversion_round_trips() {
        let orbit = sample_orbit();
        let period = orbit.period(5.972e24);
        let a = Orbit::semi_major_axis_for_period(period, orbit.orbited_mass + 5.972e24);
        assert_relative_eq!(a, orbit.semi_major_axis, epsilon = orbit.semi_major_axis * 1e-6);
    }

    #[test]
    fn periapsis_less_than_apoapsis_for_eccentric_orbit() {
        let orbit = sample_orbit();
        assert!(orbit.periapsis() < orbit.apoapsis());
    }

    #[test]
    fn tidal_lock_triggers_for_very_close_moon() {
        let locked = is_tidally_locked(4.6e9 * 365.25 * 86400.0, 7.35e22, 5.972e24, 1.737e6, 3.0e10, 3.84e8);
        assert!(locked, "Earth's actual Moon should register as locked");
    }

    #[test]
    fn tidal_lock_does_not_trigger_for_a_distant_body() {
        let locked = is_tidally_locked(4.6e9 * 365.25 * 86400.0, 7.35e22, 5.972e24, 1.737e6, 3.0e10, 5.0e9);
        assert!(!locked);
    }

    #[test]
    fn angular_velocity_is_zero_for_zero_period() {
        assert_eq!(angular_velocity(0.0), 0.0);
    }

    #[test]
    fn axis_angle_in_range_is_not_retrograde() {
        let axis = Axis::compose(0.3, 0.0);
        assert!(!axis.is_retrograde());
        let retro = Axis::compose(3.0, 0.0);
        assert!(retro.is_retrograde());
    }

    #[test]
    fn axis_vector_is_unit_length() {
        let axis = Axis::compose(0.7, 1.1);
        assert_relative_eq!(axis.axis_vector.length(), 1.0, epsilon = 1e-9);
    }
}
