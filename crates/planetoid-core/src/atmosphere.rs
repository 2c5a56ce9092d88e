//! Atmosphere generation (spec §4.6).
//!
//! Four generation paths by planet type, then a bounded condensation /
//! evaporation coupling loop that lets surface volatiles and atmospheric
//! partial pressure settle against each other, with an albedo-cloud feedback
//! riding along on the same bounded budget used by the temperature
//! correction loop (spec §4.7).

use log::debug;

use crate::material::Constituent;
use crate::planet_type::PlanetType;
use crate::rng::{idx, Reconstitution};
use crate::substance::{ids, SubstanceId, SubstanceRegistry};
use crate::temperature::MAX_CORRECTION_PASSES;

pub const BOLTZMANN_CONSTANT: f64 = 1.380_649e-23;
pub const PROTON_MASS: f64 = 1.672_622e-27;
const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

/// Jeans escape parameter threshold above which a gas is considered bound
/// for geologic time. Values below this leak away; this is the "spec's
/// Jeans-limit comparison" boundary, expressed as the escape parameter
/// `lambda = G*M*m/(R*k_B*T)` rather than as a bare temperature, since
/// `lambda` captures both planet mass/radius and molecular mass in one
/// dimensionless number.
pub const JEANS_RETENTION_THRESHOLD: f64 = 6.0;

/// Small-body / giant / dwarf boundary pressures (kPa), spec §4.6.
const SMALL_BODY_PRESSURE_KPA: f64 = 1e-8;
const GIANT_BOUNDARY_PRESSURE_KPA: f64 = 1000.0;
const DWARF_MAX_PRESSURE_KPA: f64 = 2.5;

#[derive(Debug, Clone)]
pub struct Atmosphere {
    pub constituents: Vec<Constituent>,
    pub surface_pressure_kpa: f64,
    pub bond_albedo: f64,
}

impl Atmosphere {
    pub fn is_negligible(&self) -> bool {
        self.surface_pressure_kpa < 1e-6
    }

    pub fn partial_pressure(&self, substance: SubstanceId) -> f64 {
        self.constituents
            .iter()
            .filter(|c| c.substance == substance)
            .map(|c| c.mass_fraction * self.surface_pressure_kpa)
            .sum()
    }

    fn renormalize(&mut self) {
        let total: f64 = self.constituents.iter().map(|c| c.mass_fraction).sum();
        if total > 1e-12 {
            for c in &mut self.constituents {
                c.mass_fraction /= total;
            }
        }
    }
}

/// Jeans escape parameter for a gas of molar mass `molecular_mass` (kg) at
/// the planet's surface.
fn jeans_parameter(mass: f64, radius: f64, temperature: f64, molecular_mass: f64) -> f64 {
    if radius <= 0.0 || temperature <= 0.0 {
        return 0.0;
    }
    GRAVITATIONAL_CONSTANT * mass * molecular_mass / (radius * BOLTZMANN_CONSTANT * temperature)
}

fn retains_gas(mass: f64, radius: f64, temperature: f64, molecular_mass_amu: f64) -> bool {
    jeans_parameter(mass, radius, temperature, molecular_mass_amu * PROTON_MASS)
        >= JEANS_RETENTION_THRESHOLD
}

fn small_body_atmosphere(reconstitution: &Reconstitution) -> Atmosphere {
    let scale = reconstitution.uniform(idx::RESOURCE_SEED, 0.1, 5.0);
    Atmosphere {
        constituents: vec![
            Constituent { substance: ids::NITROGEN, mass_fraction: 0.6 },
            Constituent { substance: ids::CARBON_DIOXIDE, mass_fraction: 0.3 },
            Constituent { substance: ids::DUST, mass_fraction: 0.1 },
        ],
        surface_pressure_kpa: SMALL_BODY_PRESSURE_KPA * scale,
        bond_albedo: 0.1,
    }
}

fn giant_atmosphere(planet_type: PlanetType, reconstitution: &Reconstitution) -> Atmosphere {
    let trace = reconstitution.uniform(idx::GIANT_PUFFY_ROLL, 0.0, 0.03);
    let (methane, ammonia) = if planet_type == PlanetType::IceGiant {
        (0.02, 0.01)
    } else {
        (0.002, 0.001)
    };
    let helium = 0.15 - trace * 0.5;
    Atmosphere {
        constituents: vec![
            Constituent { substance: ids::HYDROGEN, mass_fraction: 0.85 - trace },
            Constituent { substance: ids::HELIUM, mass_fraction: helium },
            Constituent { substance: ids::METHANE, mass_fraction: methane },
            Constituent { substance: ids::AMMONIA, mass_fraction: ammonia },
        ],
        surface_pressure_kpa: GIANT_BOUNDARY_PRESSURE_KPA,
        bond_albedo: if planet_type == PlanetType::IceGiant { 0.35 } else { 0.5 },
    }
}

fn dwarf_atmosphere(
    surface_temperature: f64,
    registry: &dyn SubstanceRegistry,
    reconstitution: &Reconstitution,
) -> Atmosphere {
    let sublimation = registry
        .vapor_pressure(ids::CARBON_DIOXIDE, surface_temperature)
        .min(DWARF_MAX_PRESSURE_KPA);
    let pressure = sublimation.max(reconstitution.uniform(idx::DENSITY_VARIATION, 0.0, 0.01));
    Atmosphere {
        constituents: vec![
            Constituent { substance: ids::CARBON_DIOXIDE, mass_fraction: 0.6 },
            Constituent { substance: ids::NITROGEN, mass_fraction: 0.3 },
            Constituent { substance: ids::METHANE, mass_fraction: 0.1 },
        ],
        surface_pressure_kpa: pressure.min(DWARF_MAX_PRESSURE_KPA),
        bond_albedo: 0.6,
    }
}

/// Thick-vs-trace terrestrial path: compares each candidate gas's Jeans
/// escape parameter against [`JEANS_RETENTION_THRESHOLD`] at the estimated
/// pre-atmosphere surface temperature. A thick atmosphere starts CO2-dominated
/// by default (spec §4.6); `earthlike` selects the Earth-like N2/O2/CO2/Ar
/// mixture instead, for callers that explicitly opt into that parameter set.
fn terrestrial_atmosphere(
    mass: f64,
    radius: f64,
    surface_temperature: f64,
    hydrosphere_present: bool,
    earthlike: bool,
    reconstitution: &Reconstitution,
) -> Atmosphere {
    const EARTHLIKE_CANDIDATES: &[(SubstanceId, f64, f64)] = &[
        (ids::NITROGEN, 28.0, 0.72),
        (ids::OXYGEN, 32.0, 0.20),
        (ids::CARBON_DIOXIDE, 44.0, 0.04),
        (ids::ARGON, 40.0, 0.01),
    ];
    const CO2_DOMINATED_CANDIDATES: &[(SubstanceId, f64, f64)] = &[
        (ids::CARBON_DIOXIDE, 44.0, 0.95),
        (ids::NITROGEN, 28.0, 0.035),
        (ids::ARGON, 40.0, 0.015),
    ];
    let candidates: &[(SubstanceId, f64, f64)] =
        if earthlike { EARTHLIKE_CANDIDATES } else { CO2_DOMINATED_CANDIDATES };

    let mut retained: Vec<Constituent> = candidates
        .iter()
        .filter(|&&(_, molar_mass, _)| retains_gas(mass, radius, surface_temperature, molar_mass))
        .map(|&(substance, _, share)| Constituent { substance, mass_fraction: share })
        .collect();

    if retained.is_empty() {
        debug!("no candidate gas cleared the Jeans retention threshold; assigning a trace atmosphere");
        return Atmosphere {
            constituents: vec![Constituent { substance: ids::ARGON, mass_fraction: 1.0 }],
            surface_pressure_kpa: reconstitution.uniform(idx::DENSITY_VARIATION, 1e-6, 1e-3),
            bond_albedo: 0.25,
        };
    }

    if hydrosphere_present {
        retained.push(Constituent { substance: ids::WATER, mass_fraction: 0.01 });
    }

    let base_pressure = reconstitution.log_normal(idx::DENSITY_VARIATION, 101.325, 0.6);
    Atmosphere {
        constituents: retained,
        surface_pressure_kpa: base_pressure.clamp(0.1, GIANT_BOUNDARY_PRESSURE_KPA),
        bond_albedo: 0.3,
    }
}

/// Generate the atmosphere for a planet of the given type (spec §4.6). One
/// of four disjoint generation paths fires depending on `planet_type`.
#[allow(clippy::too_many_arguments)]
pub fn generate_atmosphere(
    planet_type: PlanetType,
    mass: f64,
    radius: f64,
    surface_temperature: f64,
    hydrosphere_present: bool,
    earthlike: bool,
    has_life: bool,
    has_magnetosphere: bool,
    registry: &dyn SubstanceRegistry,
    reconstitution: &Reconstitution,
) -> Atmosphere {
    let mut atmosphere = if planet_type.is_small_body() {
        small_body_atmosphere(reconstitution)
    } else if planet_type.is_giant() {
        giant_atmosphere(planet_type, reconstitution)
    } else if planet_type.is_dwarf_variant() {
        dwarf_atmosphere(surface_temperature, registry, reconstitution)
    } else {
        terrestrial_atmosphere(mass, radius, surface_temperature, hydrosphere_present, earthlike, reconstitution)
    };

    apply_o2_evaporation_bump(&mut atmosphere, has_life);
    apply_carbon_silicate_cycle(&mut atmosphere, surface_temperature, hydrosphere_present);
    run_condensation_feedback_loop(&mut atmosphere, surface_temperature, registry);

    if has_magnetosphere {
        // A magnetosphere shields against solar-wind stripping; without one,
        // the thin trace path above already reflects the escaped state.
        debug!("magnetosphere present, skipping additional atmospheric erosion");
    }

    atmosphere
}

/// Photosynthetic life raises atmospheric O2 well above the abiotic trace
/// level (spec §4.6: "the O2 evaporation bump").
fn apply_o2_evaporation_bump(atmosphere: &mut Atmosphere, has_life: bool) {
    if !has_life {
        return;
    }
    let has_o2 = atmosphere.constituents.iter().any(|c| c.substance == ids::OXYGEN);
    if has_o2 {
        for c in &mut atmosphere.constituents {
            if c.substance == ids::OXYGEN {
                c.mass_fraction *= 1.4;
            }
        }
    } else {
        atmosphere.constituents.push(Constituent { substance: ids::OXYGEN, mass_fraction: 0.05 });
    }
    atmosphere.renormalize();
}

/// A hydrosphere in the liquid-water band draws down CO2 via weathering
/// (spec §4.6: "carbon-silicate-cycle CO2 reduction rule").
fn apply_carbon_silicate_cycle(atmosphere: &mut Atmosphere, surface_temperature: f64, hydrosphere_present: bool) {
    let in_liquid_water_band = (260.0..=320.0).contains(&surface_temperature);
    if !hydrosphere_present || !in_liquid_water_band {
        return;
    }
    let mut reduced = false;
    for c in &mut atmosphere.constituents {
        if c.substance == ids::CARBON_DIOXIDE {
            c.mass_fraction *= 0.3;
            reduced = true;
        }
    }
    if reduced {
        atmosphere.renormalize();
    }
}

/// Bounded condensation/evaporation coupling loop: raises or lowers the
/// atmosphere's effective albedo toward a value consistent with the water
/// vapor pressure implied by the current surface temperature, damping
/// oscillation the same way the §4.7 temperature loop does. Exits early once
/// the albedo step is negligible, else logs and exits at the pass budget.
fn run_condensation_feedback_loop(atmosphere: &mut Atmosphere, surface_temperature: f64, registry: &dyn SubstanceRegistry) {
    let has_water = atmosphere.constituents.iter().any(|c| c.substance == ids::WATER);
    if !has_water {
        return;
    }

    let mut damping = 1.0;
    let mut previous_delta: Option<f64> = None;

    for _pass in 0..MAX_CORRECTION_PASSES {
        let equilibrium_pressure = registry.vapor_pressure(ids::WATER, surface_temperature);
        let current_partial = atmosphere.partial_pressure(ids::WATER);
        let delta = equilibrium_pressure - current_partial;

        if delta.abs() < 1e-6 {
            return;
        }

        if let Some(prev) = previous_delta {
            if prev.signum() != delta.signum() && prev != 0.0 {
                damping *= 0.5;
            }
        }
        previous_delta = Some(delta);

        let cloud_fraction = (current_partial / equilibrium_pressure.max(1e-9)).clamp(0.0, 1.0);
        atmosphere.bond_albedo = (atmosphere.bond_albedo + 0.1 * cloud_fraction * damping).clamp(0.05, 0.9);

        for c in &mut atmosphere.constituents {
            if c.substance == ids::WATER {
                let target_fraction = (equilibrium_pressure / atmosphere.surface_pressure_kpa.max(1e-9))
                    .clamp(0.0, 0.1);
                c.mass_fraction += (target_fraction - c.mass_fraction) * 0.5 * damping;
                c.mass_fraction = c.mass_fraction.max(0.0);
            }
        }
        atmosphere.renormalize();
    }

    debug!("atmosphere condensation/evaporation loop exhausted {} passes without converging", MAX_CORRECTION_PASSES);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substance::DefaultSubstanceRegistry;

    #[test]
    fn small_bodies_get_near_vacuum_pressure() {
        let r = Reconstitution::new(1);
        let a = small_body_atmosphere(&r);
        assert!(a.surface_pressure_kpa < 1e-6);
    }

    #[test]
    fn gas_giant_atmosphere_is_hydrogen_dominant() {
        let r = Reconstitution::new(1);
        let a = giant_atmosphere(PlanetType::GasGiant, &r);
        let h2 = a.constituents.iter().find(|c| c.substance == ids::HYDROGEN).unwrap();
        assert!(h2.mass_fraction > 0.8);
        assert_eq!(a.surface_pressure_kpa, GIANT_BOUNDARY_PRESSURE_KPA);
    }

    #[test]
    fn dwarf_atmosphere_never_exceeds_2_5_kpa() {
        let r = Reconstitution::new(1);
        let reg = DefaultSubstanceRegistry::new();
        let a = dwarf_atmosphere(250.0, &reg, &r);
        assert!(a.surface_pressure_kpa <= DWARF_MAX_PRESSURE_KPA);
    }

    #[test]
    fn small_hot_body_loses_its_atmosphere_to_jeans_escape() {
        assert!(!retains_gas(1e22, 1e6, 2000.0, 28.0));
    }

    #[test]
    fn earth_like_body_retains_nitrogen() {
        assert!(retains_gas(5.972e24, 6.371e6, 288.0, 28.0));
    }

    #[test]
    fn terrestrial_path_falls_back_to_trace_when_nothing_is_retained() {
        let r = Reconstitution::new(2);
        // Tiny body, hot: nothing should clear the Jeans threshold.
        let a = terrestrial_atmosphere(1e20, 2e5, 900.0, false, true, &r);
        assert_eq!(a.constituents.len(), 1);
        assert!(a.surface_pressure_kpa < 1.0);
    }

    #[test]
    fn non_earthlike_thick_atmosphere_is_co2_dominated() {
        let r = Reconstitution::new(3);
        let a = terrestrial_atmosphere(5.972e24, 6.371e6, 288.0, true, false, &r);
        let co2 = a.constituents.iter().find(|c| c.substance == ids::CARBON_DIOXIDE).unwrap();
        assert!(co2.mass_fraction > 0.5, "fraction = {}", co2.mass_fraction);
        assert!(a.constituents.iter().all(|c| c.substance != ids::OXYGEN));
    }

    #[test]
    fn life_boosts_oxygen_fraction() {
        let r = Reconstitution::new(3);
        let reg = DefaultSubstanceRegistry::new();
        let mut a = terrestrial_atmosphere(5.972e24, 6.371e6, 288.0, true, true, &r);
        let before = a.constituents.iter().find(|c| c.substance == ids::OXYGEN).map(|c| c.mass_fraction);
        apply_o2_evaporation_bump(&mut a, true);
        let after = a.constituents.iter().find(|c| c.substance == ids::OXYGEN).map(|c| c.mass_fraction);
        assert!(after.unwrap() > before.unwrap());
        let _ = reg;
    }

    #[test]
    fn carbon_silicate_cycle_draws_down_co2_in_liquid_water_band() {
        let r = Reconstitution::new(4);
        let mut a = terrestrial_atmosphere(5.972e24, 6.371e6, 288.0, true, true, &r);
        let before = a.constituents.iter().find(|c| c.substance == ids::CARBON_DIOXIDE).map(|c| c.mass_fraction);
        apply_carbon_silicate_cycle(&mut a, 288.0, true);
        let after = a.constituents.iter().find(|c| c.substance == ids::CARBON_DIOXIDE).map(|c| c.mass_fraction);
        if let (Some(b), Some(af)) = (before, after) {
            assert!(af <= b);
        }
    }
}
