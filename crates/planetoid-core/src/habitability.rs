//! Habitability requirements and the generation-retry evaluator.
//!
//! A caller may attach [`HabitabilityRequirements`] to [`crate::GenerationParams`]
//! to ask the generator to keep re-rolling a body until it satisfies them, up
//! to [`MAX_HABITABILITY_RETRIES`] attempts, after which generation fails
//! with `GenerationError::Infeasible` rather than looping forever.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};

pub const MAX_HABITABILITY_RETRIES: u32 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HabitabilityRequirements {
    pub min_surface_temperature: f64,
    pub max_surface_temperature: f64,
    pub requires_liquid_water: bool,
    pub min_atmospheric_pressure_kpa: f64,
    pub max_atmospheric_pressure_kpa: f64,
}

impl Default for HabitabilityRequirements {
    fn default() -> Self {
        Self {
            min_surface_temperature: 260.0,
            max_surface_temperature: 320.0,
            requires_liquid_water: true,
            min_atmospheric_pressure_kpa: 20.0,
            max_atmospheric_pressure_kpa: 400.0,
        }
    }
}

/// A snapshot of the properties the evaluator checks against requirements.
#[derive(Debug, Clone, Copy)]
pub struct HabitabilityCandidate {
    pub surface_temperature: f64,
    pub hydrosphere_present: bool,
    pub surface_pressure_kpa: f64,
}

pub fn satisfies(requirements: &HabitabilityRequirements, candidate: HabitabilityCandidate) -> bool {
    candidate.surface_temperature >= requirements.min_surface_temperature
        && candidate.surface_temperature <= requirements.max_surface_temperature
        && (!requirements.requires_liquid_water || candidate.hydrosphere_present)
        && candidate.surface_pressure_kpa >= requirements.min_atmospheric_pressure_kpa
        && candidate.surface_pressure_kpa <= requirements.max_atmospheric_pressure_kpa
}

/// Repeatedly invoke `attempt` (which should draw a fresh candidate body,
/// typically by varying the generation seed or re-running the orbit
/// correction loop) until it produces one satisfying `requirements`, or the
/// retry budget is exhausted.
pub fn retry_until_habitable<T>(
    requirements: &HabitabilityRequirements,
    mut attempt: impl FnMut(u32) -> (T, HabitabilityCandidate),
) -> Result<T> {
    for attempt_index in 0..MAX_HABITABILITY_RETRIES {
        let (candidate, snapshot) = attempt(attempt_index);
        if satisfies(requirements, snapshot) {
            return Ok(candidate);
        }
    }
    warn!(
        "habitability retry budget exhausted after {} attempts",
        MAX_HABITABILITY_RETRIES
    );
    Err(GenerationError::Infeasible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_within_bounds_satisfies_requirements() {
        let reqs = HabitabilityRequirements::default();
        let candidate = HabitabilityCandidate {
            surface_temperature: 288.0,
            hydrosphere_present: true,
            surface_pressure_kpa: 101.3,
        };
        assert!(satisfies(&reqs, candidate));
    }

    #[test]
    fn missing_hydrosphere_fails_when_required() {
        let reqs = HabitabilityRequirements::default();
        let candidate = HabitabilityCandidate {
            surface_temperature: 288.0,
            hydrosphere_present: false,
            surface_pressure_kpa: 101.3,
        };
        assert!(!satisfies(&reqs, candidate));
    }

    #[test]
    fn retry_loop_returns_first_satisfying_attempt() {
        let reqs = HabitabilityRequirements::default();
        let result = retry_until_habitable(&reqs, |attempt_index| {
            let temperature = 200.0 + attempt_index as f64 * 5.0;
            (
                temperature,
                HabitabilityCandidate {
                    surface_temperature: temperature,
                    hydrosphere_present: true,
                    surface_pressure_kpa: 101.3,
                },
            )
        });
        assert!(result.is_ok());
        assert!(result.unwrap() >= 260.0);
    }

    #[test]
    fn retry_loop_gives_up_and_returns_infeasible() {
        let reqs = HabitabilityRequirements::default();
        let result: Result<()> = retry_until_habitable(&reqs, |_| {
            (
                (),
                HabitabilityCandidate {
                    surface_temperature: 10.0,
                    hydrosphere_present: false,
                    surface_pressure_kpa: 0.0,
                },
            )
        });
        assert!(matches!(result, Err(GenerationError::Infeasible)));
    }
}
