//! Layered composition builder (spec §4.3).
//!
//! Maps a [`PlanetType`] plus drawn mass/radius to a core/mantle/crust (or
//! crust-only, for small bodies) [`LayeredComposite`].

use crate::material::{Constituent, Layer, LayeredComposite, Material};
use crate::planet_type::PlanetType;
use crate::rng::{idx, Reconstitution};
use crate::shape::Shape;
use crate::substance::ids;

/// Crust mass fraction before capping: `400000 / radius^1.6` (spec §4.3).
pub fn raw_crust_fraction(radius_m: f64) -> f64 {
    if radius_m <= 0.0 {
        return 1.0;
    }
    400_000.0 / radius_m.powf(1.6)
}

fn layer_material(
    constituents: Vec<(crate::substance::SubstanceId, f64)>,
    mass: f64,
    outer_radius: f64,
    inner_radius: f64,
    temperature: f64,
) -> Material {
    let shape = if inner_radius > 0.0 {
        Shape::HollowSphere { inner_radius, outer_radius }
    } else {
        Shape::Sphere { radius: outer_radius }
    };
    let mut m = Material::new(
        constituents
            .into_iter()
            .map(|(substance, mass_fraction)| Constituent { substance, mass_fraction })
            .collect(),
        mass,
        shape,
        temperature,
    );
    m.normalize_fractions();
    m
}

/// Build the layered composite for `planet_type` given the planet's total
/// mass and (mean) radius. `reconstitution` supplies the per-type variation
/// draws (e.g. the giant's puffy-core fraction, a dwarf's core fraction).
pub fn build_composition(
    planet_type: PlanetType,
    mass: f64,
    radius: f64,
    surface_temperature: f64,
    reconstitution: &Reconstitution,
) -> LayeredComposite {
    let mut composite = LayeredComposite::new();

    if planet_type.is_small_body() {
        build_small_body_crust(planet_type, mass, radius, surface_temperature, &mut composite);
        return composite;
    }

    let core_fraction = planet_type.core_fraction().unwrap_or_else(|| {
        reconstitution.uniform(idx::DENSITY_VARIATION, 0.2, 0.55)
    });

    let desired_crust = if planet_type.is_giant() {
        0.0
    } else {
        raw_crust_fraction(radius).min(1.0 - core_fraction).max(0.0)
    };
    let (mantle_fraction, crust_fraction) =
        crate::material::redistribute_mantle_crust(core_fraction, desired_crust);

    let core_outer = radius * core_fraction.cbrt().min(1.0);
    let mantle_outer = radius * (core_fraction + mantle_fraction).cbrt().min(1.0);
    let crust_outer = radius;

    let core_constituents = match planet_type {
        PlanetType::Carbon => vec![(ids::IRON, 0.7), (ids::STEEL, 0.2), (ids::NICKEL, 0.1)],
        PlanetType::GasGiant | PlanetType::IceGiant => {
            let puffy = reconstitution.chance(idx::GIANT_PUFFY_ROLL, 0.2);
            let inner_fraction = reconstitution.uniform(idx::DENSITY_VARIATION, 0.02, 0.2);
            if puffy {
                vec![(ids::CHONDRITIC_OUTER_CORE, 1.0 - inner_fraction), (ids::IRON, inner_fraction)]
            } else {
                vec![(ids::IRON, inner_fraction), (ids::CHONDRITIC_OUTER_CORE, 1.0 - inner_fraction)]
            }
        }
        _ => vec![(ids::IRON, 0.85), (ids::NICKEL, 0.15)],
    };
    composite.push(
        "core",
        layer_material(core_constituents, mass * core_fraction, core_outer, 0.0, surface_temperature * 3.0),
        core_fraction,
    );

    if mantle_fraction > 0.0 {
        let mantle_constituents = match planet_type {
            PlanetType::Carbon => vec![(ids::SILICON_CARBIDE, 0.6), (ids::DIAMOND, 0.4)],
            PlanetType::GasGiant => vec![(ids::METALLIC_HYDROGEN, 0.55), (ids::HELIUM, 0.2), (ids::METHANE, 0.1), (ids::AMMONIA, 0.1), (ids::WATER, 0.05)],
            PlanetType::IceGiant => vec![(ids::LIQUID_DIAMOND, 0.4), (ids::WATER, 0.4), (ids::AMMONIA, 0.1), (ids::METHANE, 0.1)],
            t if t.is_dwarf_variant() => vec![(ids::WATER_ICE, 1.0)],
            _ => vec![(ids::PERIDOTITE, 1.0)],
        };
        composite.push(
            "mantle",
            layer_material(mantle_constituents, mass * mantle_fraction, mantle_outer, core_outer, surface_temperature * 1.5),
            mantle_fraction,
        );
    }

    if crust_fraction > 0.0 && !planet_type.is_giant() {
        let crust_constituents = match planet_type {
            PlanetType::Carbon => vec![
                (ids::GRAPHITE, 0.25), (ids::COAL, 0.2), (ids::OIL, 0.15),
                (ids::NATURAL_GAS, 0.1), (ids::DIAMOND, 0.05), (ids::BAUXITE, 0.1),
                (ids::HEMATITE, 0.05), (ids::MAGNETITE, 0.05), (ids::ILMENITE, 0.05),
            ],
            t if t.is_dwarf_variant() => vec![(ids::WATER_ICE, 0.5), (ids::ROCKY_DUST, 0.5)],
            _ => vec![(ids::DRY_CRUST, 0.95), (ids::HEMATITE, 0.03), (ids::MAGNETITE, 0.02)],
        };
        composite.push(
            "crust",
            layer_material(crust_constituents, mass * crust_fraction, crust_outer, mantle_outer, surface_temperature),
            crust_fraction,
        );
    }

    composite
}

fn build_small_body_crust(
    planet_type: PlanetType,
    mass: f64,
    radius: f64,
    surface_temperature: f64,
    composite: &mut LayeredComposite,
) {
    let constituents = match planet_type {
        PlanetType::AsteroidM => vec![(ids::IRON, 0.7), (ids::GOLD, 0.02), (ids::PLATINUM, 0.03), (ids::CHONDRITE, 0.25)],
        PlanetType::AsteroidS => vec![(ids::IRON, 0.568), (ids::CHONDRITE, 0.427), (ids::GOLD, 0.0025), (ids::PLATINUM, 0.0025)],
        PlanetType::AsteroidC => vec![(ids::CHONDRITE, 0.7), (ids::CLAY, 0.15), (ids::WATER_ICE, 0.15)],
        PlanetType::Comet => vec![
            (ids::WATER_ICE, 0.5), (ids::COMETARY_ICE, 0.2), (ids::CARBON_MONOXIDE, 0.1),
            (ids::CARBON_DIOXIDE, 0.1), (ids::AMMONIA, 0.05), (ids::METHANE, 0.05),
        ],
        _ => vec![(ids::DRY_CRUST, 1.0)],
    };
    let layer = layer_material(constituents, mass, radius, 0.0, surface_temperature);
    composite.layers.push(Layer { name: "crust", material: layer, mass_fraction: 1.0 });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crust_fraction_shrinks_with_radius() {
        let small = raw_crust_fraction(1_000_000.0);
        let large = raw_crust_fraction(6_371_000.0);
        assert!(small > large);
    }

    #[test]
    fn terrestrial_composition_closes_mass_and_fractions() {
        let r = Reconstitution::new(42);
        let mass = 5.972e24;
        let radius = 6.371e6;
        let composite = build_composition(PlanetType::Terrestrial, mass, radius, 288.0, &r);
        assert!(composite.mass_closed(mass, 1e-9));
        assert!(composite.fractions_closed(1e-9));
        assert!(composite.layer("core").is_some());
        assert!(composite.layer("mantle").is_some());
        assert!(composite.layer("crust").is_some());
    }

    #[test]
    fn gas_giant_has_no_crust_layer() {
        let r = Reconstitution::new(1);
        let composite = build_composition(PlanetType::GasGiant, 1.9e27, 7.0e7, 165.0, &r);
        assert!(composite.layer("crust").is_none());
        assert!(composite.mass_closed(1.9e27, 1e-9));
    }

    #[test]
    fn comet_is_a_single_crust_layer() {
        let r = Reconstitution::new(7);
        let composite = build_composition(PlanetType::Comet, 1.0e13, 2000.0, 150.0, &r);
        assert_eq!(composite.layers.len(), 1);
        assert_eq!(composite.layers[0].name, "crust");
        assert!(composite.mass_closed(1.0e13, 1e-9));
    }

    #[test]
    fn dwarf_core_fraction_is_drawn_within_spec_range() {
        let r = Reconstitution::new(3);
        let composite = build_composition(PlanetType::Dwarf, 1.3e22, 6.0e5, 100.0, &r);
        let core = composite.layer("core").unwrap();
        assert!(core.mass_fraction >= 0.2 && core.mass_fraction <= 0.55);
    }
}
