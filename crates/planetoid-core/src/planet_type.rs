//! The planetoid type tag and its table-driven per-type behavior (spec §9
//! design note: "polymorphic planet behavior via virtual dispatch" becomes a
//! tagged variant with match-based dispatch).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetType {
    AsteroidC,
    AsteroidM,
    AsteroidS,
    Comet,
    Dwarf,
    LavaDwarf,
    RockyDwarf,
    Terrestrial,
    Carbon,
    Iron,
    Lava,
    Ocean,
    GasGiant,
    IceGiant,
}

impl PlanetType {
    pub fn is_giant(self) -> bool {
        matches!(self, PlanetType::GasGiant | PlanetType::IceGiant)
    }

    pub fn is_asteroid(self) -> bool {
        matches!(self, PlanetType::AsteroidC | PlanetType::AsteroidM | PlanetType::AsteroidS)
    }

    pub fn is_dwarf_variant(self) -> bool {
        matches!(self, PlanetType::Dwarf | PlanetType::LavaDwarf | PlanetType::RockyDwarf)
    }

    pub fn is_small_body(self) -> bool {
        self.is_asteroid() || matches!(self, PlanetType::Comet)
    }

    /// Whether this type's crust/mantle can host a hydrosphere (spec §4.5
    /// excludes carbon/iron/lava).
    pub fn can_hold_water(self) -> bool {
        !matches!(self, PlanetType::Carbon | PlanetType::Iron | PlanetType::Lava)
            && !self.is_giant()
    }

    /// Mean bulk density target (kg/m^3) before the per-type variation draw.
    pub fn base_density(self) -> f64 {
        match self {
            PlanetType::Terrestrial | PlanetType::Ocean => 5500.0,
            PlanetType::Carbon => 3500.0,
            PlanetType::Iron => 7800.0,
            PlanetType::Lava => 5800.0,
            PlanetType::Dwarf | PlanetType::RockyDwarf => 2000.0,
            PlanetType::LavaDwarf => 3200.0,
            PlanetType::GasGiant => 1300.0,
            PlanetType::IceGiant => 1600.0,
            PlanetType::AsteroidC => 1400.0,
            PlanetType::AsteroidM => 5300.0,
            PlanetType::AsteroidS => 2700.0,
            PlanetType::Comet => 500.0,
        }
    }

    /// Core mass fraction for layered types; `None` for undifferentiated
    /// small bodies (asteroids, comets — spec §4.3 table has no core row).
    pub fn core_fraction(self) -> Option<f64> {
        match self {
            PlanetType::Terrestrial | PlanetType::Ocean | PlanetType::Lava => Some(0.15),
            PlanetType::Carbon => Some(0.4),
            PlanetType::Iron => Some(0.4),
            PlanetType::GasGiant | PlanetType::IceGiant => Some(0.15),
            PlanetType::Dwarf | PlanetType::LavaDwarf | PlanetType::RockyDwarf => None, // drawn
            _ => None,
        }
    }

    /// Budget for `max_satellites` (spec §4.8).
    pub fn max_satellites(self) -> u32 {
        match self {
            PlanetType::GasGiant => 75,
            PlanetType::IceGiant => 40,
            PlanetType::Lava => 0,
            PlanetType::Comet => 0,
            _ if self.is_asteroid() => 1,
            _ => 5,
        }
    }

    /// Ring probability (spec §4.9).
    pub fn ring_probability(self) -> f64 {
        if self.is_asteroid() || matches!(self, PlanetType::Comet) || self.is_dwarf_variant() {
            0.0
        } else if self.is_giant() {
            0.9
        } else {
            0.1
        }
    }

    /// Tidal-locking rigidity parameter used in spec §4.2 stage 4
    /// (`3e10`, `4e9` for comets).
    pub fn rigidity(self) -> f64 {
        if matches!(self, PlanetType::Comet) { 4.0e9 } else { 3.0e10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn giants_have_no_hydrosphere_capacity() {
        assert!(!PlanetType::GasGiant.can_hold_water());
        assert!(!PlanetType::IceGiant.can_hold_water());
    }

    #[test]
    fn carbon_iron_lava_excluded_from_hydrosphere() {
        assert!(!PlanetType::Carbon.can_hold_water());
        assert!(!PlanetType::Iron.can_hold_water());
        assert!(!PlanetType::Lava.can_hold_water());
        assert!(PlanetType::Terrestrial.can_hold_water());
    }

    #[test]
    fn satellite_budgets_match_spec_table() {
        assert_eq!(PlanetType::GasGiant.max_satellites(), 75);
        assert_eq!(PlanetType::IceGiant.max_satellites(), 40);
        assert_eq!(PlanetType::Lava.max_satellites(), 0);
        assert_eq!(PlanetType::Comet.max_satellites(), 0);
        assert_eq!(PlanetType::AsteroidC.max_satellites(), 1);
        assert_eq!(PlanetType::Terrestrial.max_satellites(), 5);
    }

    #[test]
    fn ring_probability_matches_spec() {
        assert_eq!(PlanetType::GasGiant.ring_probability(), 0.9);
        assert_eq!(PlanetType::Terrestrial.ring_probability(), 0.1);
        assert_eq!(PlanetType::AsteroidC.ring_probability(), 0.0);
        assert_eq!(PlanetType::Comet.ring_probability(), 0.0);
        assert_eq!(PlanetType::Dwarf.ring_probability(), 0.0);
    }
}
