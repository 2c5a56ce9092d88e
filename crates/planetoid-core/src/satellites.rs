//! Satellite generation (spec §4.8).
//!
//! Fills the parent's Hill sphere outward from a minimum periapsis, drawing
//! periapsis/eccentricity per candidate, capping mass so the satellite's
//! barycenter with its parent stays inside the parent (coarse approximation:
//! `m_max = M * R / (periapsis - R)`), and biasing type selection toward
//! rocky debris inside the Roche limit. Each satellite may recurse into its
//! own (much smaller) satellite system, bounded by [`MAX_SATELLITE_DEPTH`] to
//! keep the recursion from running away.

use std::f64::consts::PI;

use crate::orbit::Orbit;
use crate::planet_type::PlanetType;
use crate::rng::{channel_for, idx, ChannelIndex, Reconstitution};
use crate::vector::Vec3;

/// Recursion depth cap for moons-of-moons (spec §4.8: "recursive satellite
/// generation"). Two levels covers the observed case (an irregular moon
/// capturing its own tiny companion) without unbounded nesting.
pub const MAX_SATELLITE_DEPTH: u32 = 2;

/// Nominal density (kg/m^3) used only to evaluate the Roche limit against a
/// candidate's periapsis, not the candidate's own assigned density.
const ROCHE_REFERENCE_DENSITY: f64 = 2000.0;

#[derive(Debug, Clone)]
pub struct Satellite {
    pub id: u32,
    pub planet_type: PlanetType,
    pub mass: f64,
    pub radius: f64,
    pub density: f64,
    pub orbit: Orbit,
    /// True when the satellite formed inside the parent's Roche limit —
    /// physically this would disrupt into a ring, but it is retained here as
    /// a short-lived/ring-progenitor body rather than folded into the ring
    /// generator, which draws its own independent band geometry.
    pub is_ring_progenitor: bool,
    pub satellites: Vec<Satellite>,
}

fn roche_limit(primary_radius: f64, primary_density: f64, candidate_density: f64) -> f64 {
    primary_radius * (2.0 * primary_density / candidate_density.max(1.0)).cbrt()
}

/// Weighted choice over planet/dwarf/asteroid candidates, biased by
/// proximity to the parent's Roche limit (spec §4.8 step 4): a periapsis
/// well inside the limit melts the body into a lava-dwarf, just inside or
/// barely clear of it produces a lava moon, and anything farther out draws
/// from the standard dwarf/asteroid mix.
fn draw_satellite_type(periapsis: f64, roche: f64, reconstitution: &Reconstitution, channel: ChannelIndex) -> PlanetType {
    if periapsis < roche * 0.5 {
        PlanetType::LavaDwarf
    } else if periapsis < roche * 1.05 {
        PlanetType::Lava
    } else {
        const CANDIDATES: &[PlanetType] = &[
            PlanetType::Dwarf, PlanetType::RockyDwarf, PlanetType::AsteroidC, PlanetType::AsteroidM, PlanetType::AsteroidS,
        ];
        const WEIGHTS: &[f64] = &[3.0, 2.0, 2.0, 1.0, 2.0];
        let choice = reconstitution.weighted_choice(channel, WEIGHTS);
        CANDIDATES[choice]
    }
}

fn max_mass_for_barycenter_containment(parent_mass: f64, parent_radius: f64, periapsis: f64) -> f64 {
    if periapsis <= parent_radius {
        return 0.0;
    }
    parent_mass * parent_radius / (periapsis - parent_radius)
}

#[allow(clippy::too_many_arguments)]
fn generate_level(
    parent_mass: f64,
    parent_radius: f64,
    parent_density: f64,
    orbited_mass: f64,
    host_semi_major_axis: f64,
    host_eccentricity: f64,
    max_count: u32,
    depth: u32,
    reconstitution: &Reconstitution,
) -> Vec<Satellite> {
    if depth > MAX_SATELLITE_DEPTH || max_count == 0 || parent_mass <= 0.0 || orbited_mass <= 0.0 {
        return Vec::new();
    }

    let hill_radius =
        host_semi_major_axis * (1.0 - host_eccentricity) * (parent_mass / (3.0 * orbited_mass)).cbrt();
    if !hill_radius.is_finite() || hill_radius <= parent_radius {
        return Vec::new();
    }

    let base: ChannelIndex = idx::SATELLITE_BASE + depth * 4_000;
    let mut satellites = Vec::new();
    let mut min_periapsis = parent_radius * 3.0;
    let mut ordinal = 0usize;

    while satellites.len() < max_count as usize && min_periapsis < hill_radius {
        let periapsis = reconstitution.uniform(channel_for(base, ordinal, 0), min_periapsis, hill_radius);
        let eccentricity = reconstitution.half_normal(channel_for(base, ordinal, 1), 0.08, 0.0, 0.6);
        let apoapsis = periapsis * (1.0 + eccentricity) / (1.0 - eccentricity).max(1e-6);
        if !apoapsis.is_finite() || apoapsis > hill_radius {
            break;
        }

        let roche = roche_limit(parent_radius, parent_density, ROCHE_REFERENCE_DENSITY);
        let is_ring_progenitor = periapsis < roche;
        let planet_type = draw_satellite_type(periapsis, roche, reconstitution, channel_for(base, ordinal, 2));
        let density = planet_type.base_density();

        let max_mass = max_mass_for_barycenter_containment(parent_mass, parent_radius, periapsis)
            .min(parent_mass * 0.05);
        let mass = if max_mass > 0.0 {
            reconstitution
                .log_normal(channel_for(base, ordinal, 3), (max_mass * 0.02).max(1.0), 1.0)
                .clamp(1.0, max_mass)
        } else {
            0.0
        };
        if mass <= 0.0 {
            min_periapsis = apoapsis * 1.5;
            ordinal += 1;
            continue;
        }

        let radius = (mass / (density * 4.0 / 3.0 * PI)).cbrt();
        let inclination = reconstitution.half_normal(channel_for(base, ordinal, 4), 0.15, 0.0, 0.6);
        let semi_major_axis = (periapsis + apoapsis) / 2.0;

        let orbit = Orbit {
            semi_major_axis,
            eccentricity,
            inclination,
            argument_of_periapsis: reconstitution.uniform(channel_for(base, ordinal, 5), 0.0, 2.0 * PI),
            longitude_of_ascending_node: reconstitution.uniform(channel_for(base, ordinal, 6), 0.0, 2.0 * PI),
            true_anomaly: reconstitution.uniform(channel_for(base, ordinal, 7), 0.0, 2.0 * PI),
            epoch: 0.0,
            orbited_mass: parent_mass,
            orbited_position: Vec3::ZERO,
        };

        let sub_satellites = generate_level(
            mass,
            radius,
            density,
            parent_mass,
            semi_major_axis,
            eccentricity,
            1,
            depth + 1,
            reconstitution,
        );

        satellites.push(Satellite {
            id: ordinal as u32,
            planet_type,
            mass,
            radius,
            density,
            orbit,
            is_ring_progenitor,
            satellites: sub_satellites,
        });

        min_periapsis = apoapsis * 1.5;
        ordinal += 1;
    }

    satellites
}

/// Entry point: generate the top-level satellite system of a planet orbiting
/// `orbited_mass` (its star) at `host_semi_major_axis`/`host_eccentricity`.
#[allow(clippy::too_many_arguments)]
pub fn generate_satellite_system(
    parent_mass: f64,
    parent_radius: f64,
    parent_density: f64,
    orbited_mass: f64,
    host_semi_major_axis: f64,
    host_eccentricity: f64,
    max_count: u32,
    reconstitution: &Reconstitution,
) -> Vec<Satellite> {
    generate_level(
        parent_mass,
        parent_radius,
        parent_density,
        orbited_mass,
        host_semi_major_axis,
        host_eccentricity,
        max_count,
        0,
        reconstitution,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_produces_no_satellites() {
        let r = Reconstitution::new(1);
        let sats = generate_satellite_system(5.972e24, 6.371e6, 5500.0, 1.989e30, 1.496e11, 0.0167, 0, &r);
        assert!(sats.is_empty());
    }

    #[test]
    fn earth_like_parameters_can_produce_satellites() {
        let r = Reconstitution::new(7);
        let sats = generate_satellite_system(5.972e24, 6.371e6, 5500.0, 1.989e30, 1.496e11, 0.0167, 5, &r);
        for s in &sats {
            assert!(s.orbit.periapsis() > 6.371e6 * 2.0);
            assert!(s.mass > 0.0 && s.mass.is_finite());
        }
    }

    #[test]
    fn satellites_never_exceed_the_requested_cap() {
        let r = Reconstitution::new(11);
        let sats = generate_satellite_system(1.898e27, 7.15e7, 1300.0, 1.989e30, 7.78e11, 0.048, 3, &r);
        assert!(sats.len() <= 3);
    }

    #[test]
    fn recursion_never_exceeds_the_configured_depth() {
        fn max_depth(sats: &[Satellite], depth: u32) -> u32 {
            sats.iter()
                .map(|s| max_depth(&s.satellites, depth + 1))
                .max()
                .unwrap_or(depth)
        }
        let r = Reconstitution::new(3);
        let sats = generate_satellite_system(1.898e27, 7.15e7, 1300.0, 1.989e30, 7.78e11, 0.048, 5, &r);
        assert!(max_depth(&sats, 0) <= MAX_SATELLITE_DEPTH + 1);
    }

    #[test]
    fn roche_proximity_biases_toward_lava_types() {
        let r = Reconstitution::new(5);
        let roche = 6000.0;
        let channel = channel_for(idx::SATELLITE_BASE, 0, 2);
        // Just inside the 1.05x Roche margin: lava, not lava-dwarf.
        assert_eq!(draw_satellite_type(roche * 1.0, roche, &r, channel), PlanetType::Lava);
        // Well inside the limit: lava-dwarf.
        assert_eq!(draw_satellite_type(roche * 0.3, roche, &r, channel), PlanetType::LavaDwarf);
    }

    #[test]
    fn tiny_hill_sphere_yields_no_satellites() {
        let r = Reconstitution::new(9);
        // semi_major_axis tiny relative to parent radius collapses the Hill sphere.
        let sats = generate_satellite_system(5.972e24, 6.371e6, 5500.0, 1.989e30, 1.0e7, 0.0, 5, &r);
        assert!(sats.is_empty());
    }
}
