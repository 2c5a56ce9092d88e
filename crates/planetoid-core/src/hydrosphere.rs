//! Hydrosphere generation (spec §4.5).
//!
//! Applies only to types that can hold water (`PlanetType::can_hold_water`).
//! The candidate sea level is the elevation value separating the ordered,
//! equal-area-sampled surface tiles at rank `floor(N * ratio)`, matching the
//! "integrate the tiled surface below a candidate sea level" description in
//! spec §4.5 without needing a full raster: points are drawn from a Fibonacci
//! sphere lattice, which is equal-area by construction, so no latitude
//! weighting is needed afterward.

use rand_distr::{Distribution, Normal};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::material::{Constituent, Layer, LayeredComposite, Material};
use crate::noise::PlanetNoise;
use crate::planet_type::PlanetType;
use crate::rng::{idx, Reconstitution};
use crate::shape::Shape;
use crate::substance::{ids, SubstanceRegistry};
use crate::vector::Vec3;

/// Number of equal-area sample points used to rank elevation for the sea
/// level search. Large enough for a stable rank estimate, small enough to
/// stay cheap at generation time.
const SEA_LEVEL_SAMPLE_COUNT: usize = 2048;

#[derive(Debug, Clone)]
pub struct Hydrosphere {
    pub material: LayeredComposite,
    /// Meters above mean surface; may be negative.
    pub sea_level: f64,
    pub max_elevation: f64,
    /// Sea level normalized to `[-1.1, 1]`.
    pub normalized_sea_level: f64,
}

impl Hydrosphere {
    pub fn is_present(&self) -> bool {
        self.sea_level > -1.1 * self.max_elevation + 1e-6
    }

    pub fn total_mass(&self) -> f64 {
        self.material.total_mass()
    }
}

/// Fibonacci-lattice points on the unit sphere: equal area per point, no
/// latitude weighting required when ranking by elevation.
fn fibonacci_sphere_points(n: usize) -> Vec<Vec3> {
    let golden_angle = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    (0..n)
        .map(|i| {
            let y = 1.0 - (i as f64 / (n.max(1) - 1).max(1) as f64) * 2.0;
            let radius = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * i as f64;
            Vec3::new(theta.cos() * radius, y, theta.sin() * radius)
        })
        .collect()
}

/// Per-type water mass ratio draw when not supplied by params. Terrestrial-
/// like worlds draw near Earth's ~0.023%; ocean worlds draw much higher;
/// dwarfs draw from their icy-crust budget.
fn drawn_water_ratio(planet_type: PlanetType, reconstitution: &Reconstitution) -> f64 {
    match planet_type {
        PlanetType::Ocean => reconstitution.uniform(idx::WATER_RATIO, 0.01, 0.1),
        PlanetType::Terrestrial => reconstitution.log_normal(idx::WATER_RATIO, 0.0003, 1.2).min(0.05),
        t if t.is_dwarf_variant() => reconstitution.uniform(idx::WATER_RATIO, 0.0, 0.3),
        _ => 0.0,
    }
}

/// Generate the hydrosphere for a planet, or the "no hydrosphere" sentinel
/// state (sea level = `-1.1 * max_elevation`) when the type can't hold water
/// or the drawn/params ratio is non-positive.
#[allow(clippy::too_many_arguments)]
pub fn generate_hydrosphere(
    planet_type: PlanetType,
    mass: f64,
    max_elevation: f64,
    params_water_ratio: Option<f64>,
    surface_temperature: f64,
    noise: &PlanetNoise,
    registry: &dyn SubstanceRegistry,
    reconstitution: &Reconstitution,
) -> Hydrosphere {
    let none = Hydrosphere {
        material: LayeredComposite::new(),
        sea_level: -1.1 * max_elevation,
        max_elevation,
        normalized_sea_level: -1.1,
    };

    if !planet_type.can_hold_water() {
        return none;
    }

    let ratio = params_water_ratio.unwrap_or_else(|| drawn_water_ratio(planet_type, reconstitution));
    if ratio <= 0.0 {
        return none;
    }

    let points = fibonacci_sphere_points(SEA_LEVEL_SAMPLE_COUNT);
    let mut elevations: Vec<f64> = points.iter().map(|&p| noise.elevation(p) * max_elevation).collect();
    elevations.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let rank = ((elevations.len() as f64) * ratio).floor() as usize;
    let rank = rank.min(elevations.len().saturating_sub(1));
    let sea_level = elevations[rank];

    let water_mass = ratio * mass;

    // Surface split: 94.5% seawater, 5.5% freshwater, with the freshwater
    // share sampled from a normal distribution around that mean (spec §4.5).
    let mut fresh_rng = StdRng::seed_from_u64(reconstitution.seed() as u64 ^ 0xF5E5_7A7E);
    let fresh_dist = Normal::new(0.055, 0.01).expect("finite sigma");
    let fresh_fraction: f64 = fresh_dist.sample(&mut fresh_rng).clamp(0.0, 0.2);
    let sea_fraction = 1.0 - fresh_fraction;

    let mut composite = LayeredComposite::new();
    let radius = max_elevation.max(1.0) * 10.0; // nominal shape radius for volume bookkeeping only

    let freezing_point = registry.melting_point(ids::WATER);
    let deep_ocean_persists = surface_temperature < freezing_point && ratio > 0.001;

    if deep_ocean_persists {
        // Split into an ice shell above ~1000m depth and a liquid deep ocean
        // below it, which sits near 277K regardless of surface temperature
        // (spec §4.5).
        let ice_fraction = 0.3;
        let ocean_fraction = 0.7;
        composite.layers.push(Layer {
            name: "ice_shell",
            material: Material::new(
                vec![
                    Constituent { substance: ids::SEAWATER, mass_fraction: sea_fraction },
                    Constituent { substance: ids::FRESHWATER, mass_fraction: fresh_fraction },
                ],
                water_mass * ice_fraction,
                Shape::HollowSphere { inner_radius: radius * 0.97, outer_radius: radius },
                surface_temperature,
            ),
            mass_fraction: ice_fraction,
        });
        composite.layers.push(Layer {
            name: "deep_ocean",
            material: Material::new(
                vec![
                    Constituent { substance: ids::SEAWATER, mass_fraction: sea_fraction },
                    Constituent { substance: ids::FRESHWATER, mass_fraction: fresh_fraction },
                ],
                water_mass * ocean_fraction,
                Shape::HollowSphere { inner_radius: radius * 0.9, outer_radius: radius * 0.97 },
                277.0,
            ),
            mass_fraction: ocean_fraction,
        });
    } else {
        composite.layers.push(Layer {
            name: "ocean",
            material: Material::new(
                vec![
                    Constituent { substance: ids::SEAWATER, mass_fraction: sea_fraction },
                    Constituent { substance: ids::FRESHWATER, mass_fraction: fresh_fraction },
                ],
                water_mass,
                Shape::HollowSphere { inner_radius: radius * 0.97, outer_radius: radius },
                surface_temperature,
            ),
            mass_fraction: 1.0,
        });
    }

    Hydrosphere {
        material: composite,
        sea_level,
        max_elevation,
        normalized_sea_level: (sea_level / max_elevation.max(1e-9)).clamp(-1.1, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substance::DefaultSubstanceRegistry;

    fn noise() -> PlanetNoise {
        PlanetNoise::new([1, 2, 3, 4, 5, 6])
    }

    #[test]
    fn carbon_planet_never_gets_a_hydrosphere() {
        let r = Reconstitution::new(1);
        let reg = DefaultSubstanceRegistry::new();
        let h = generate_hydrosphere(
            PlanetType::Carbon, 5e24, 5000.0, Some(0.5), 280.0, &noise(), &reg, &r,
        );
        assert!(!h.is_present());
        assert_eq!(h.normalized_sea_level, -1.1);
    }

    #[test]
    fn zero_ratio_means_no_hydrosphere() {
        let r = Reconstitution::new(1);
        let reg = DefaultSubstanceRegistry::new();
        let h = generate_hydrosphere(
            PlanetType::Terrestrial, 5e24, 5000.0, Some(0.0), 280.0, &noise(), &reg, &r,
        );
        assert!(!h.is_present());
    }

    #[test]
    fn positive_ratio_produces_a_present_hydrosphere_with_bounded_sea_level() {
        let r = Reconstitution::new(1);
        let reg = DefaultSubstanceRegistry::new();
        let h = generate_hydrosphere(
            PlanetType::Terrestrial, 5.97e24, 8800.0, Some(0.3), 288.0, &noise(), &reg, &r,
        );
        assert!(h.is_present());
        assert!(h.normalized_sea_level >= -1.1 && h.normalized_sea_level <= 1.0);
        assert!((h.total_mass() - 0.3 * 5.97e24).abs() / (0.3 * 5.97e24) < 1e-6);
    }

    #[test]
    fn cold_surface_splits_into_ice_and_deep_ocean_shells() {
        let r = Reconstitution::new(1);
        let reg = DefaultSubstanceRegistry::new();
        let h = generate_hydrosphere(
            PlanetType::Terrestrial, 5.97e24, 8800.0, Some(0.3), 250.0, &noise(), &reg, &r,
        );
        assert!(h.material.layer("ice_shell").is_some());
        assert!(h.material.layer("deep_ocean").is_some());
    }

    #[test]
    fn warm_surface_is_a_single_ocean_layer() {
        let r = Reconstitution::new(1);
        let reg = DefaultSubstanceRegistry::new();
        let h = generate_hydrosphere(
            PlanetType::Terrestrial, 5.97e24, 8800.0, Some(0.3), 288.0, &noise(), &reg, &r,
        );
        assert!(h.material.layer("ocean").is_some());
        assert!(h.material.layer("ice_shell").is_none());
    }
}
