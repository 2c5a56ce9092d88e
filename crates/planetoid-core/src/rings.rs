//! Ring system generation (spec §4.9).
//!
//! Whether a planet gets rings at all is a single `chance` roll against
//! [`PlanetType::ring_probability`]. If it does, the candidate annulus
//! between 1.2 planet radii and the farther of the icy/rocky Roche limits is
//! split into a half-normal-distributed band count, each band separated from
//! its neighbors by a gap (the "band-subtraction loop").

use crate::planet_type::PlanetType;
use crate::rng::{channel_for, idx, Reconstitution};
use crate::substance::{ids, SubstanceId};

const ICY_RING_DENSITY: f64 = 950.0;
const ROCKY_RING_DENSITY: f64 = 3000.0;

#[derive(Debug, Clone, Copy)]
pub struct RingBand {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub composition: SubstanceId,
}

#[derive(Debug, Clone)]
pub struct RingSystem {
    pub bands: Vec<RingBand>,
}

impl RingSystem {
    pub fn outer_radius(&self) -> f64 {
        self.bands.iter().map(|b| b.outer_radius).fold(0.0, f64::max)
    }
}

fn roche_limit(planet_radius: f64, planet_density: f64, particle_density: f64) -> f64 {
    planet_radius * (2.0 * planet_density / particle_density.max(1.0)).cbrt()
}

/// Generate a ring system, or `None` if the type/roll doesn't produce one.
pub fn generate_rings(
    planet_type: PlanetType,
    planet_radius: f64,
    planet_density: f64,
    reconstitution: &Reconstitution,
) -> Option<RingSystem> {
    let probability = planet_type.ring_probability();
    if probability <= 0.0 {
        return None;
    }
    if !reconstitution.chance(idx::RING_BASE, probability) {
        return None;
    }

    let icy_limit = roche_limit(planet_radius, planet_density, ICY_RING_DENSITY);
    let rocky_limit = roche_limit(planet_radius, planet_density, ROCKY_RING_DENSITY);
    let outer_limit = icy_limit.max(rocky_limit);
    let inner_limit = planet_radius * 1.2;
    if outer_limit <= inner_limit {
        return None;
    }

    let sigma = if planet_type.is_giant() { 1.0 } else { 1.0 / 6.0 };
    let count = reconstitution
        .half_normal(idx::RING_BASE + 1, sigma, 1.0, 6.0)
        .round()
        .max(1.0) as usize;

    let span = outer_limit - inner_limit;
    let band_width = span / count as f64;
    let mut bands = Vec::with_capacity(count);

    for i in 0..count {
        let band_start = inner_limit + band_width * i as f64;
        // Subtract a gap from each band edge so adjacent bands don't touch,
        // matching the division structure real ring systems show (e.g. the
        // Cassini Division between Saturn's A and B rings).
        let gap_fraction = reconstitution.uniform(channel_for(idx::RING_BASE, i, 0), 0.05, 0.3);
        let band_inner = band_start + band_width * gap_fraction * 0.5;
        let band_outer = band_start + band_width * (1.0 - gap_fraction * 0.5);
        if band_outer <= band_inner {
            continue;
        }
        let is_icy = band_outer < icy_limit
            || reconstitution.chance(channel_for(idx::RING_BASE, i, 1), 0.6);
        let composition = if is_icy { ids::WATER_ICE } else { ids::ROCKY_DUST };
        bands.push(RingBand { inner_radius: band_inner, outer_radius: band_outer, composition });
    }

    if bands.is_empty() {
        None
    } else {
        Some(RingSystem { bands })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_bodies_never_get_rings() {
        let r = Reconstitution::new(1);
        assert!(generate_rings(PlanetType::AsteroidC, 500.0, 1400.0, &r).is_none());
        assert!(generate_rings(PlanetType::Comet, 2000.0, 500.0, &r).is_none());
    }

    #[test]
    fn bands_stay_within_the_candidate_annulus_and_dont_overlap() {
        // Sweep seeds until we land a giant with rings (0.9 probability, should hit quickly).
        for seed in 0..20u32 {
            let r = Reconstitution::new(seed);
            if let Some(system) = generate_rings(PlanetType::GasGiant, 7.15e7, 1300.0, &r) {
                let mut previous_outer = 0.0;
                for band in &system.bands {
                    assert!(band.inner_radius < band.outer_radius);
                    assert!(band.inner_radius >= previous_outer);
                    previous_outer = band.outer_radius;
                }
                return;
            }
        }
        panic!("expected at least one seed to produce rings for a 0.9-probability type");
    }

    #[test]
    fn ring_count_never_exceeds_six_bands() {
        for seed in 0..20u32 {
            let r = Reconstitution::new(seed);
            if let Some(system) = generate_rings(PlanetType::IceGiant, 2.5e7, 1600.0, &r) {
                assert!(system.bands.len() <= 6);
            }
        }
    }
}
