//! Resource extraction (spec §4.2 stage 10).
//!
//! Reads gemstone/ore proportions out of the crust layer via the injected
//! [`SubstanceRegistry`], and adds life-and-magnetosphere-conditioned bonus
//! deposits (halite and hydrocarbons when life is present, elemental sulfur
//! when a magnetosphere has let volcanic sulfur accumulate instead of being
//! stripped away).

use crate::material::LayeredComposite;
use crate::substance::SubstanceRegistry;

#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceProfile {
    pub gemstone_mass: f64,
    pub metal_ore_mass: f64,
    pub hydrocarbon_mass: f64,
    pub halite_mass: f64,
    pub elemental_sulfur_mass: f64,
}

pub fn extract_resources(
    composite: &LayeredComposite,
    registry: &dyn SubstanceRegistry,
    has_life: bool,
    has_magnetosphere: bool,
) -> ResourceProfile {
    let mut profile = ResourceProfile::default();

    let Some(crust) = composite.layer("crust") else {
        return profile;
    };

    for constituent in &crust.material.constituents {
        let mass = constituent.mass_fraction * crust.material.mass;
        if registry.is_gemstone(constituent.substance) {
            profile.gemstone_mass += mass;
        }
        if registry.is_metal_ore(constituent.substance) {
            profile.metal_ore_mass += mass;
        }
        if registry.is_hydrocarbon(constituent.substance) {
            profile.hydrocarbon_mass += mass;
        }
    }

    if has_life {
        // Biologically mediated evaporite and hydrocarbon deposits; small
        // relative to the crust but absent entirely without life.
        profile.halite_mass += crust.material.mass * 0.001;
        profile.hydrocarbon_mass += crust.material.mass * 0.002;
    }

    if has_magnetosphere {
        profile.elemental_sulfur_mass += crust.material.mass * 0.0005;
    }

    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::build_composition;
    use crate::planet_type::PlanetType;
    use crate::rng::Reconstitution;
    use crate::substance::DefaultSubstanceRegistry;

    #[test]
    fn carbon_crust_yields_gemstones_and_hydrocarbons() {
        let r = Reconstitution::new(5);
        let reg = DefaultSubstanceRegistry::new();
        let composite = build_composition(PlanetType::Carbon, 5e24, 6.0e6, 500.0, &r);
        let profile = extract_resources(&composite, &reg, false, false);
        assert!(profile.gemstone_mass > 0.0);
        assert!(profile.hydrocarbon_mass > 0.0);
    }

    #[test]
    fn gas_giants_have_no_crust_and_no_resources() {
        let r = Reconstitution::new(1);
        let reg = DefaultSubstanceRegistry::new();
        let composite = build_composition(PlanetType::GasGiant, 1.9e27, 7.0e7, 165.0, &r);
        let profile = extract_resources(&composite, &reg, true, true);
        assert_eq!(profile.gemstone_mass, 0.0);
        assert_eq!(profile.halite_mass, 0.0);
    }

    #[test]
    fn life_adds_halite_and_bonus_hydrocarbons() {
        let r = Reconstitution::new(5);
        let reg = DefaultSubstanceRegistry::new();
        let composite = build_composition(PlanetType::Terrestrial, 5.972e24, 6.371e6, 288.0, &r);
        let without_life = extract_resources(&composite, &reg, false, false);
        let with_life = extract_resources(&composite, &reg, true, false);
        assert!(with_life.halite_mass > without_life.halite_mass);
        assert!(with_life.hydrocarbon_mass > without_life.hydrocarbon_mass);
    }

    #[test]
    fn magnetosphere_adds_elemental_sulfur() {
        let r = Reconstitution::new(5);
        let reg = DefaultSubstanceRegistry::new();
        let composite = build_composition(PlanetType::Terrestrial, 5.972e24, 6.371e6, 288.0, &r);
        let without = extract_resources(&composite, &reg, false, false);
        let with = extract_resources(&composite, &reg, false, true);
        assert!(with.elemental_sulfur_mass > without.elemental_sulfur_mass);
    }
}
