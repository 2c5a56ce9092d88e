//! Serializable snapshot of a generated planetoid (spec §6).
//!
//! [`PlanetoidRecord`] is the exact persisted shape: every field a caller
//! needs to reconstruct a planetoid's observable state without rerunning
//! generation, plus the fields needed to regenerate deterministically
//! (`master_seed`) should a caller want to. Optional fields (`?` in spec §6)
//! are `Option` here; everything else is required.

use serde::{Deserialize, Serialize};

use crate::habitability::HabitabilityRequirements;
use crate::orbit::Orbit;
use crate::planet_type::PlanetType;
use crate::vector::Vec3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RingBandRecord {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub composition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OverlayRecord {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetoidRecord {
    pub id: u64,
    pub master_seed: u32,
    #[serde(rename = "type")]
    pub planet_type: PlanetType,
    pub parent_id: Option<u64>,
    pub absolute_position: Vec3,
    pub name: Option<String>,
    pub velocity: Vec3,
    pub orbit: Option<Orbit>,
    pub position: Vec3,
    pub temperature: Option<f64>,
    pub angle_of_rotation: f64,
    pub rotational_period: f64,
    pub satellite_ids: Vec<u64>,
    pub rings: Vec<RingBandRecord>,
    pub blackbody_temperature: f64,
    pub surface_temperature_apoapsis: f64,
    pub surface_temperature_periapsis: f64,
    pub inhospitable: bool,
    pub earthlike: bool,
    pub planet_params: Option<serde_json::Value>,
    pub habitability_requirements: Option<HabitabilityRequirements>,
    pub surface_regions: Vec<String>,
    pub overlays: Vec<OverlayRecord>,
    pub max_flow: Option<f64>,
}

impl PlanetoidRecord {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PlanetoidRecord {
        PlanetoidRecord {
            id: 1,
            master_seed: 42,
            planet_type: PlanetType::Terrestrial,
            parent_id: Some(0),
            absolute_position: Vec3::new(1.0, 2.0, 3.0),
            name: Some("Aranthis".into()),
            velocity: Vec3::ZERO,
            orbit: None,
            position: Vec3::ZERO,
            temperature: Some(288.0),
            angle_of_rotation: 0.41,
            rotational_period: 86_400.0,
            satellite_ids: vec![2, 3],
            rings: vec![],
            blackbody_temperature: 255.0,
            surface_temperature_apoapsis: 260.0,
            surface_temperature_periapsis: 295.0,
            inhospitable: false,
            earthlike: true,
            planet_params: None,
            habitability_requirements: None,
            surface_regions: vec![],
            overlays: vec![],
            max_flow: None,
        }
    }

    #[test]
    fn round_trips_through_json() {
        let record = sample_record();
        let json = record.to_json().unwrap();
        let restored = PlanetoidRecord::from_json(&json).unwrap();
        assert_eq!(restored.id, record.id);
        assert_eq!(restored.master_seed, record.master_seed);
        assert_eq!(restored.name, record.name);
        assert_eq!(restored.satellite_ids, record.satellite_ids);
        assert_eq!(restored.earthlike, record.earthlike);
    }

    #[test]
    fn type_field_is_serialized_under_the_reserved_name() {
        let record = sample_record();
        let json = record.to_json().unwrap();
        assert!(json.contains("\"type\""));
    }
}
