//! Pure surface query layer (spec §4.10).
//!
//! Every function here takes a [`Planetoid`] by shared reference and a
//! location (and, where time matters, a true anomaly) and returns a value
//! directly — no `Result`. A missing collaborator (no orbit on a rogue body,
//! no overlay for a layer) degrades to a defined fallback rather than an
//! error, per the contract in `error.rs`.

use std::f64::consts::PI;

use crate::hadley;
use crate::orbit::Orbit;
use crate::planetoid::Planetoid;
use crate::temperature::blackbody_temperature;
use crate::vector::Vec3;

const ATMOSPHERIC_SCALE_HEIGHT_M: f64 = 8_000.0;
const SLOPE_SAMPLE_EPSILON: f64 = 1e-4;

fn equirectangular_uv(lat: f64, lon: f64) -> (f64, f64) {
    let u = (lon + PI) / (2.0 * PI);
    let v = (lat + PI / 2.0) / PI;
    (u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
}

/// Direction from the planet toward its star, in the orbital frame, at the
/// given true anomaly. The orbital plane is the canonical X-Z plane (normal
/// `Vec3::Y`), matching the frame `Axis::compose` builds from.
fn star_direction_world(orbit: &Orbit, true_anomaly: f64) -> Vec3 {
    let theta = orbit.argument_of_periapsis + true_anomaly;
    Vec3::new(-theta.cos(), 0.0, -theta.sin())
}

/// The sub-solar point, in the planet's body-fixed frame, at `true_anomaly`.
fn subsolar_point(planetoid: &Planetoid, true_anomaly: f64) -> Option<Vec3> {
    let orbit = planetoid.orbit.as_ref()?;
    let world_direction = star_direction_world(orbit, true_anomaly);
    Some(planetoid.axis.axis_rotation_quaternion.rotate(world_direction))
}

/// Elevation in metres above mean sea level at `(lat, lon)` (radians). Reads
/// through an `"elevation"` overlay if one is attached, falling back to
/// procedural noise scaled by `max_elevation`.
pub fn elevation_at(planetoid: &Planetoid, lat: f64, lon: f64) -> f64 {
    let point = Vec3::from_lat_lon(lat, lon);
    let fallback = |_u: f64, _v: f64| planetoid.noise.elevation(point) * planetoid.max_elevation;

    match planetoid.overlays.iter().find(|o| o.name == "elevation") {
        Some(overlay) => {
            let (u, v) = equirectangular_uv(lat, lon);
            overlay.sample(u, v, fallback)
        }
        None => fallback(0.0, 0.0),
    }
}

/// Instantaneous surface temperature at `(lat, lon)` and `true_anomaly`:
/// blackbody temperature at the current orbital distance, weighted by Hadley
/// circulation and corrected for elevation via the dry lapse rate.
pub fn temperature_at(planetoid: &Planetoid, lat: f64, lon: f64, true_anomaly: f64) -> f64 {
    let Some(orbit) = planetoid.orbit.as_ref() else {
        return planetoid.temperature.average;
    };
    let distance = orbit.distance_at(true_anomaly);
    let base = blackbody_temperature(planetoid.star_luminosity, planetoid.atmosphere.bond_albedo, distance);
    let hadley_weight = hadley::hadley_factor(lat);
    let elevation = elevation_at(planetoid, lat, lon);
    let lapse_correction = elevation.max(0.0) * 0.0098;
    base * (0.7 + 0.6 * hadley_weight) - lapse_correction
}

/// Precipitation index at `(lat, lon)`, combining the macro/micro
/// precipitation noise channels and humidity with Hadley weighting. Not
/// calibrated to a physical unit; larger means wetter.
pub fn precipitation_at(planetoid: &Planetoid, lat: f64, lon: f64) -> f64 {
    let point = Vec3::from_lat_lon(lat, lon);
    let macro_term = planetoid.noise.precip_macro(point);
    let micro_term = planetoid.noise.precip_micro(point);
    let humidity = planetoid.noise.humidity(point);
    let hadley_weight = hadley::hadley_factor(lat);
    let water_bonus = if planetoid.hydrosphere.is_present() { 1.3 } else { 0.4 };

    (((macro_term * 0.6 + micro_term * 0.2 + humidity * 0.2) * 0.5 + 0.5) * hadley_weight * water_bonus).max(0.0)
}

/// Cosine-weighted illumination at `(lat, lon)` and `true_anomaly`, in
/// `[0, 1]`: `0` at night, `1` at the sub-solar point. `0` for a rogue body
/// with no orbit.
pub fn illumination_at(planetoid: &Planetoid, lat: f64, lon: f64, true_anomaly: f64) -> f64 {
    let Some(subsolar) = subsolar_point(planetoid, true_anomaly) else {
        return 0.0;
    };
    let surface_point = Vec3::from_lat_lon(lat, lon).normalize();
    surface_point.dot(subsolar.normalize()).max(0.0)
}

/// Sunrise/sunset as fractions of the rotational period (`0.5` is local
/// solar noon), solving `cos(H) = -tan(lat)*tan(declination)`. Sunrise and
/// sunset are reported independently: polar night yields `(None, Some(_))`
/// (the sun never rises, but "sunset" — the moment the disc last dipped
/// below the horizon — is still defined as local midnight), midnight sun
/// yields `(Some(_), None)`, and a rogue body with no orbit yields
/// `(None, None)`.
pub fn sunrise_sunset(planetoid: &Planetoid, lat: f64, true_anomaly: f64) -> (Option<f64>, Option<f64>) {
    let Some(subsolar) = subsolar_point(planetoid, true_anomaly) else {
        return (None, None);
    };
    let (declination, _) = subsolar.normalize().to_lat_lon();
    let cos_hour_angle = -(lat.tan()) * declination.tan();

    if !cos_hour_angle.is_finite() {
        return (None, None);
    }
    if cos_hour_angle > 1.0 {
        // Polar night: the sun never crosses the horizon.
        return (None, Some(0.0));
    }
    if cos_hour_angle < -1.0 {
        // Midnight sun: the sun never sets.
        return (Some(0.0), None);
    }

    let hour_angle = cos_hour_angle.acos();
    let half_day_fraction = hour_angle / (2.0 * PI);
    (Some(0.5 - half_day_fraction), Some(0.5 + half_day_fraction))
}

/// Elevation-gradient magnitude at `(lat, lon)` (metres of rise per metre of
/// horizontal distance), via central-difference sampling of `elevation_at`.
pub fn slope_at(planetoid: &Planetoid, lat: f64, lon: f64) -> f64 {
    let base = elevation_at(planetoid, lat, lon);
    let d_lat = elevation_at(planetoid, lat + SLOPE_SAMPLE_EPSILON, lon) - base;
    let d_lon = elevation_at(planetoid, lat, lon + SLOPE_SAMPLE_EPSILON) - base;

    let meridional_distance = SLOPE_SAMPLE_EPSILON * planetoid.radius;
    let zonal_distance = SLOPE_SAMPLE_EPSILON * planetoid.radius * lat.cos().abs().max(1e-6);

    let grad_lat = d_lat / meridional_distance.max(1e-9);
    let grad_lon = d_lon / zonal_distance.max(1e-9);
    (grad_lat * grad_lat + grad_lon * grad_lon).sqrt()
}

/// Atmospheric pressure (kPa) at `(lat, lon)`'s local elevation, via the
/// barometric formula against the planet's surface pressure.
pub fn atmospheric_pressure_at(planetoid: &Planetoid, lat: f64, lon: f64) -> f64 {
    let elevation = elevation_at(planetoid, lat, lon);
    planetoid.atmosphere.surface_pressure_kpa * (-elevation / ATMOSPHERIC_SCALE_HEIGHT_M).exp()
}

/// Local resource richness at `(lat, lon)`: the planet's aggregate resource
/// mass spread over its surface area, modulated by a noise-driven local
/// enrichment factor so deposits aren't perfectly uniform.
pub fn resource_richness_at(planetoid: &Planetoid, lat: f64, lon: f64) -> f64 {
    let point = Vec3::from_lat_lon(lat, lon);
    let local_factor = (planetoid.noise.elevation(point) * 0.5 + 0.5).clamp(0.0, 1.0);
    let resources = &planetoid.resources;
    let total = resources.gemstone_mass
        + resources.metal_ore_mass
        + resources.hydrocarbon_mass
        + resources.halite_mass
        + resources.elemental_sulfur_mass;
    let surface_area = 4.0 * PI * planetoid.radius * planetoid.radius;
    (total / surface_area.max(1.0)) * local_factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planetoid::GenerationParams;
    use crate::planet_type::PlanetType;

    fn sample() -> Planetoid {
        let params = GenerationParams { planet_type: Some(PlanetType::Terrestrial), ..Default::default() };
        Planetoid::generate(1, 42, &params).unwrap()
    }

    #[test]
    fn elevation_is_deterministic_and_bounded() {
        let p = sample();
        let a = elevation_at(&p, 0.4, 1.2);
        let b = elevation_at(&p, 0.4, 1.2);
        assert_eq!(a, b);
        assert!(a.abs() <= p.max_elevation);
    }

    #[test]
    fn sub_solar_point_has_full_illumination() {
        let p = sample();
        let Some(subsolar) = subsolar_point(&p, 0.0) else {
            panic!("expected an orbit for this planetoid");
        };
        let (lat, lon) = subsolar.to_lat_lon();
        let illumination = illumination_at(&p, lat, lon, 0.0);
        assert!(illumination > 0.99, "illumination = {illumination}");
    }

    #[test]
    fn antipode_of_subsolar_point_is_dark() {
        let p = sample();
        let subsolar = subsolar_point(&p, 0.0).unwrap();
        let (lat, lon) = subsolar.to_lat_lon();
        let illumination = illumination_at(&p, -lat, lon + PI, 0.0);
        assert!(illumination < 1e-6, "illumination = {illumination}");
    }

    #[test]
    fn pressure_decreases_with_elevation() {
        let p = sample();
        let sea_level_pressure = p.atmosphere.surface_pressure_kpa;
        let mountain_pressure = p.atmosphere.surface_pressure_kpa * (-5000.0 / ATMOSPHERIC_SCALE_HEIGHT_M).exp();
        assert!(mountain_pressure < sea_level_pressure);
    }

    #[test]
    fn equator_always_has_both_a_sunrise_and_a_sunset() {
        let p = sample();
        let (sunrise, sunset) = sunrise_sunset(&p, 0.0, 0.3);
        assert!(sunrise.is_some() && sunset.is_some());
    }

    #[test]
    fn opposite_poles_split_between_polar_night_and_midnight_sun() {
        let mut p = sample();
        p.set_axis(crate::orbit::Axis::compose(0.4, 0.0));
        let (sunrise_north, sunset_north) = sunrise_sunset(&p, 1.5, PI / 2.0);
        let (sunrise_south, sunset_south) = sunrise_sunset(&p, -1.5, PI / 2.0);
        // One pole is in polar night (None, Some(_)), the other in midnight
        // sun (Some(_), None); which is which depends on the season.
        assert_ne!(sunrise_north.is_some(), sunrise_south.is_some());
        assert_ne!(sunset_north.is_some(), sunset_south.is_some());
        assert!(sunrise_north.is_none() || sunset_north.is_none());
        assert!(sunrise_south.is_none() || sunset_south.is_none());
    }

    #[test]
    fn resource_richness_is_never_negative() {
        let p = sample();
        for i in 0..8 {
            let lat = -1.0 + i as f64 * 0.25;
            let richness = resource_richness_at(&p, lat, 0.3);
            assert!(richness >= 0.0);
        }
    }
}
