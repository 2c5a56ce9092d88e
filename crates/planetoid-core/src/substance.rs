//! Substance registry (external collaborator, spec §6).
//!
//! The core never bakes in a chemistry table; it consumes one through the
//! [`SubstanceRegistry`] trait by stable [`SubstanceId`] reference. A small
//! in-memory registry covering the substances named throughout spec §4.3/4.6
//! is provided for tests and for `planetoid-cli`, but production callers are
//! expected to inject their own (e.g. backed by a game's item database).

use std::collections::HashMap;

/// Stable reference to a substance. Opaque outside this module; use
/// `SubstanceId::new` with a name that the registry recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubstanceId(pub &'static str);

impl SubstanceId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

// Substances referenced by name throughout the composition and atmosphere
// tables (spec §4.3, §4.6). Declaring them here keeps call sites from
// stringly-typing substance names at every reference.
pub mod ids {
    use super::SubstanceId;

    pub const IRON: SubstanceId = SubstanceId::new("iron");
    pub const NICKEL: SubstanceId = SubstanceId::new("nickel");
    pub const STEEL: SubstanceId = SubstanceId::new("steel");
    pub const PERIDOTITE: SubstanceId = SubstanceId::new("peridotite");
    pub const DRY_CRUST: SubstanceId = SubstanceId::new("dry_crust");
    pub const SILICON_CARBIDE: SubstanceId = SubstanceId::new("silicon_carbide");
    pub const DIAMOND: SubstanceId = SubstanceId::new("diamond");
    pub const GRAPHITE: SubstanceId = SubstanceId::new("graphite");
    pub const COAL: SubstanceId = SubstanceId::new("coal");
    pub const OIL: SubstanceId = SubstanceId::new("oil");
    pub const NATURAL_GAS: SubstanceId = SubstanceId::new("natural_gas");
    pub const BAUXITE: SubstanceId = SubstanceId::new("bauxite");
    pub const HEMATITE: SubstanceId = SubstanceId::new("hematite");
    pub const MAGNETITE: SubstanceId = SubstanceId::new("magnetite");
    pub const ILMENITE: SubstanceId = SubstanceId::new("ilmenite");
    pub const GOLD: SubstanceId = SubstanceId::new("gold");
    pub const PLATINUM: SubstanceId = SubstanceId::new("platinum");
    pub const CHONDRITE: SubstanceId = SubstanceId::new("chondrite");
    pub const CLAY: SubstanceId = SubstanceId::new("clay");
    pub const WATER_ICE: SubstanceId = SubstanceId::new("water_ice");
    pub const WATER: SubstanceId = SubstanceId::new("water");
    pub const SEAWATER: SubstanceId = SubstanceId::new("seawater");
    pub const FRESHWATER: SubstanceId = SubstanceId::new("freshwater");
    pub const CARBON_DIOXIDE: SubstanceId = SubstanceId::new("co2");
    pub const CARBON_MONOXIDE: SubstanceId = SubstanceId::new("co");
    pub const NITROGEN: SubstanceId = SubstanceId::new("n2");
    pub const OXYGEN: SubstanceId = SubstanceId::new("o2");
    pub const METHANE: SubstanceId = SubstanceId::new("ch4");
    pub const AMMONIA: SubstanceId = SubstanceId::new("nh3");
    pub const AMMONIUM_HYDROSULFIDE: SubstanceId = SubstanceId::new("nh4sh");
    pub const HYDROGEN: SubstanceId = SubstanceId::new("h2");
    pub const HELIUM: SubstanceId = SubstanceId::new("he");
    pub const NEON: SubstanceId = SubstanceId::new("ne");
    pub const ETHANE: SubstanceId = SubstanceId::new("c2h6");
    pub const HYDROGEN_SULFIDE: SubstanceId = SubstanceId::new("h2s");
    pub const SULFUR_DIOXIDE: SubstanceId = SubstanceId::new("so2");
    pub const ELEMENTAL_SULFUR: SubstanceId = SubstanceId::new("sulfur");
    pub const DUST: SubstanceId = SubstanceId::new("dust");
    pub const ARGON: SubstanceId = SubstanceId::new("ar");
    pub const KRYPTON: SubstanceId = SubstanceId::new("kr");
    pub const XENON: SubstanceId = SubstanceId::new("xe");
    pub const HALITE: SubstanceId = SubstanceId::new("halite");
    pub const LIQUID_DIAMOND: SubstanceId = SubstanceId::new("liquid_diamond");
    pub const METALLIC_HYDROGEN: SubstanceId = SubstanceId::new("metallic_hydrogen");
    pub const CHONDRITIC_OUTER_CORE: SubstanceId = SubstanceId::new("chondritic_outer_core");
    pub const COMETARY_ICE: SubstanceId = SubstanceId::new("cometary_ice");
    pub const ROCKY_DUST: SubstanceId = SubstanceId::new("rocky_dust");
}

/// Thermodynamic properties queried from a substance reference.
pub trait SubstanceRegistry {
    fn name(&self, id: SubstanceId) -> &str;
    fn melting_point(&self, id: SubstanceId) -> f64;
    fn boiling_point(&self, id: SubstanceId) -> f64;
    /// Antoine-equation vapor pressure (kPa) at temperature `t_kelvin`.
    fn vapor_pressure(&self, id: SubstanceId, t_kelvin: f64) -> f64;
    fn density_liquid(&self, id: SubstanceId) -> f64;
    fn density_solid(&self, id: SubstanceId) -> f64;
    /// Relative greenhouse potency, CO2 = 1.0.
    fn greenhouse_potential(&self, id: SubstanceId) -> f64;
    fn antoine_min_t(&self, id: SubstanceId) -> f64;
    fn antoine_max_t(&self, id: SubstanceId) -> f64;
    fn is_gemstone(&self, id: SubstanceId) -> bool;
    fn is_metal_ore(&self, id: SubstanceId) -> bool;
    fn is_hydrocarbon(&self, id: SubstanceId) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct SubstanceProperties {
    melting_point: f64,
    boiling_point: f64,
    /// Antoine coefficients (A, B, C) for `log10(P_kPa) = A - B / (T + C)`.
    antoine: (f64, f64, f64),
    antoine_min_t: f64,
    antoine_max_t: f64,
    density_liquid: f64,
    density_solid: f64,
    greenhouse_potential: f64,
    is_gemstone: bool,
    is_metal_ore: bool,
    is_hydrocarbon: bool,
}

impl Default for SubstanceProperties {
    fn default() -> Self {
        Self {
            melting_point: 0.0,
            boiling_point: f64::INFINITY,
            antoine: (5.0, 1700.0, -40.0),
            antoine_min_t: 0.0,
            antoine_max_t: f64::INFINITY,
            density_liquid: 1000.0,
            density_solid: 3000.0,
            greenhouse_potential: 0.0,
            is_gemstone: false,
            is_metal_ore: false,
            is_hydrocarbon: false,
        }
    }
}

/// A small built-in registry covering every substance named in spec §4.3/4.6.
/// Intended for tests and `planetoid-cli`; production integrations should
/// inject their own `SubstanceRegistry` backed by a real chemistry table.
pub struct DefaultSubstanceRegistry {
    table: HashMap<SubstanceId, SubstanceProperties>,
}

impl DefaultSubstanceRegistry {
    pub fn new() -> Self {
        use ids::*;
        let mut table = HashMap::new();
        let mut put = |id: SubstanceId, p: SubstanceProperties| {
            table.insert(id, p);
        };

        put(WATER, SubstanceProperties {
            melting_point: 273.15,
            boiling_point: 373.15,
            antoine: (8.07131, 1730.63, -39.724 + 273.15),
            antoine_min_t: 255.9,
            antoine_max_t: 373.0,
            density_liquid: 1000.0,
            density_solid: 917.0,
            greenhouse_potential: 0.1,
            ..Default::default()
        });
        put(CARBON_DIOXIDE, SubstanceProperties {
            melting_point: 216.6,
            boiling_point: 194.7,
            antoine: (6.81228, 1301.679, -3.494 + 273.15),
            antoine_min_t: 153.0,
            antoine_max_t: 303.0,
            density_liquid: 1101.0,
            density_solid: 1562.0,
            greenhouse_potential: 1.0,
            ..Default::default()
        });
        put(CARBON_MONOXIDE, SubstanceProperties {
            melting_point: 68.1,
            boiling_point: 81.6,
            antoine: (6.69, 391.0, -14.0 + 273.15),
            antoine_min_t: 68.0,
            antoine_max_t: 132.0,
            density_liquid: 789.0,
            density_solid: 950.0,
            greenhouse_potential: 0.01,
            ..Default::default()
        });
        put(NITROGEN, SubstanceProperties {
            melting_point: 63.2,
            boiling_point: 77.4,
            antoine: (6.72, 285.0, -6.6 + 273.15),
            antoine_min_t: 63.0,
            antoine_max_t: 126.0,
            density_liquid: 808.0,
            density_solid: 1026.0,
            greenhouse_potential: 0.0,
            ..Default::default()
        });
        put(OXYGEN, SubstanceProperties {
            melting_point: 54.4,
            boiling_point: 90.2,
            antoine: (6.69, 319.0, -6.4 + 273.15),
            antoine_min_t: 54.0,
            antoine_max_t: 155.0,
            density_liquid: 1141.0,
            density_solid: 1460.0,
            greenhouse_potential: 0.0,
            ..Default::default()
        });
        put(METHANE, SubstanceProperties {
            melting_point: 90.7,
            boiling_point: 111.7,
            antoine: (6.84, 435.6, -5.0 + 273.15),
            antoine_min_t: 90.0,
            antoine_max_t: 190.0,
            density_liquid: 423.0,
            density_solid: 500.0,
            greenhouse_potential: 25.0,
            is_hydrocarbon: true,
            ..Default::default()
        });
        put(AMMONIA, SubstanceProperties {
            melting_point: 195.4,
            boiling_point: 239.8,
            antoine: (7.55, 1002.7, -35.0 + 273.15),
            antoine_min_t: 195.0,
            antoine_max_t: 280.0,
            density_liquid: 682.0,
            density_solid: 817.0,
            greenhouse_potential: 0.3,
            ..Default::default()
        });
        put(SULFUR_DIOXIDE, SubstanceProperties {
            melting_point: 200.0,
            boiling_point: 263.0,
            antoine: (7.28, 1170.0, -31.0 + 273.15),
            antoine_min_t: 200.0,
            antoine_max_t: 320.0,
            density_liquid: 1460.0,
            density_solid: 1900.0,
            greenhouse_potential: 0.05,
            ..Default::default()
        });
        put(HYDROGEN_SULFIDE, SubstanceProperties {
            melting_point: 187.6,
            boiling_point: 213.5,
            antoine: (7.76, 860.0, -32.0 + 273.15),
            antoine_min_t: 187.0,
            antoine_max_t: 250.0,
            density_liquid: 993.0,
            density_solid: 1120.0,
            greenhouse_potential: 0.01,
            ..Default::default()
        });
        put(AMMONIUM_HYDROSULFIDE, SubstanceProperties {
            melting_point: 291.0,
            boiling_point: 350.0,
            density_liquid: 1170.0,
            density_solid: 1170.0,
            greenhouse_potential: 0.0,
            ..Default::default()
        });
        for gas in [HYDROGEN, HELIUM, NEON, ETHANE, ARGON, KRYPTON, XENON, DUST] {
            put(gas, SubstanceProperties {
                melting_point: 10.0,
                boiling_point: 30.0,
                density_liquid: 70.0,
                density_solid: 90.0,
                greenhouse_potential: if gas == ETHANE { 0.02 } else { 0.0 },
                ..Default::default()
            });
        }
        for rock in [
            IRON, NICKEL, STEEL, PERIDOTITE, DRY_CRUST, SILICON_CARBIDE, DIAMOND,
            GRAPHITE, BAUXITE, HEMATITE, MAGNETITE, ILMENITE, CHONDRITE, CLAY,
            LIQUID_DIAMOND, METALLIC_HYDROGEN, CHONDRITIC_OUTER_CORE, ROCKY_DUST,
        ] {
            put(rock, SubstanceProperties {
                melting_point: 1500.0,
                boiling_point: 3000.0,
                density_liquid: 6000.0,
                density_solid: if rock == IRON || rock == NICKEL || rock == STEEL {
                    7800.0
                } else {
                    3200.0
                },
                is_gemstone: rock == DIAMOND,
                is_metal_ore: matches!(rock, IRON | NICKEL | HEMATITE | MAGNETITE | ILMENITE | BAUXITE),
                ..Default::default()
            });
        }
        for hc in [COAL, OIL, NATURAL_GAS] {
            put(hc, SubstanceProperties {
                melting_point: 250.0,
                boiling_point: 600.0,
                density_liquid: 850.0,
                density_solid: 1300.0,
                is_hydrocarbon: true,
                ..Default::default()
            });
        }
        for metal in [GOLD, PLATINUM] {
            put(metal, SubstanceProperties {
                melting_point: 1300.0,
                boiling_point: 3100.0,
                density_liquid: 17000.0,
                density_solid: 19000.0,
                is_metal_ore: true,
                ..Default::default()
            });
        }
        put(WATER_ICE, SubstanceProperties {
            melting_point: 273.15,
            boiling_point: 373.15,
            density_liquid: 1000.0,
            density_solid: 917.0,
            ..Default::default()
        });
        put(COMETARY_ICE, SubstanceProperties {
            melting_point: 150.0,
            boiling_point: 250.0,
            density_liquid: 950.0,
            density_solid: 600.0,
            ..Default::default()
        });
        put(SEAWATER, SubstanceProperties {
            melting_point: 271.3,
            boiling_point: 373.7,
            density_liquid: 1025.0,
            density_solid: 920.0,
            ..Default::default()
        });
        put(FRESHWATER, SubstanceProperties {
            melting_point: 273.15,
            boiling_point: 373.15,
            density_liquid: 1000.0,
            density_solid: 917.0,
            ..Default::default()
        });
        put(HALITE, SubstanceProperties {
            melting_point: 1074.0,
            boiling_point: 1738.0,
            density_liquid: 1549.0,
            density_solid: 2170.0,
            ..Default::default()
        });
        put(ELEMENTAL_SULFUR, SubstanceProperties {
            melting_point: 388.4,
            boiling_point: 717.8,
            density_liquid: 1819.0,
            density_solid: 2070.0,
            ..Default::default()
        });

        Self { table }
    }

    fn props(&self, id: SubstanceId) -> SubstanceProperties {
        self.table.get(&id).copied().unwrap_or_default()
    }
}

impl Default for DefaultSubstanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SubstanceRegistry for DefaultSubstanceRegistry {
    fn name(&self, id: SubstanceId) -> &str {
        id.name()
    }

    fn melting_point(&self, id: SubstanceId) -> f64 {
        self.props(id).melting_point
    }

    fn boiling_point(&self, id: SubstanceId) -> f64 {
        self.props(id).boiling_point
    }

    fn vapor_pressure(&self, id: SubstanceId, t_kelvin: f64) -> f64 {
        let p = self.props(id);
        let (a, b, c) = p.antoine;
        let log10_p = a - b / (t_kelvin + c);
        10f64.powf(log10_p)
    }

    fn density_liquid(&self, id: SubstanceId) -> f64 {
        self.props(id).density_liquid
    }

    fn density_solid(&self, id: SubstanceId) -> f64 {
        self.props(id).density_solid
    }

    fn greenhouse_potential(&self, id: SubstanceId) -> f64 {
        self.props(id).greenhouse_potential
    }

    fn antoine_min_t(&self, id: SubstanceId) -> f64 {
        self.props(id).antoine_min_t
    }

    fn antoine_max_t(&self, id: SubstanceId) -> f64 {
        self.props(id).antoine_max_t
    }

    fn is_gemstone(&self, id: SubstanceId) -> bool {
        self.props(id).is_gemstone
    }

    fn is_metal_ore(&self, id: SubstanceId) -> bool {
        self.props(id).is_metal_ore
    }

    fn is_hydrocarbon(&self, id: SubstanceId) -> bool {
        self.props(id).is_hydrocarbon
    }
}
