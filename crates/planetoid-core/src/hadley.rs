//! Process-wide Hadley-cell latitude weighting cache.
//!
//! The three-cell atmospheric circulation weighting used by temperature and
//! precipitation queries depends only on latitude, not on any per-planet
//! state, so it is memoized once per process behind a quantized latitude key
//! rather than per `Planetoid`. Latitude is quantized to 0.001 rad buckets,
//! which is finer than any surface query needs and keeps the cache small.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::{OnceLock, RwLock};

const QUANTIZATION: f64 = 0.001;

static HADLEY_CACHE: OnceLock<RwLock<HashMap<i64, f64>>> = OnceLock::new();

fn quantize(lat: f64) -> i64 {
    (lat / QUANTIZATION).round() as i64
}

/// Hadley-cell weighting factor at `lat` radians, in `[0, 1]`: peaks at the
/// equator, dips in the subtropical high-pressure band around 30 degrees,
/// and rises again moving into the polar cell.
pub fn hadley_factor(lat: f64) -> f64 {
    let key = quantize(lat);
    let cache = HADLEY_CACHE.get_or_init(|| RwLock::new(HashMap::new()));

    if let Some(value) = cache.read().unwrap().get(&key) {
        return *value;
    }

    let computed = compute_hadley_factor(lat);
    cache.write().unwrap().insert(key, computed);
    computed
}

fn compute_hadley_factor(lat: f64) -> f64 {
    let l = lat.abs();
    let equatorial = (1.0 - (l / (PI / 6.0)).min(1.0)).max(0.0);
    let subtropical_low = -0.3 * (-((l - PI / 6.0).powi(2)) / 0.05).exp();
    let polar_rise = 0.2 * (l / (PI / 2.0)).powi(2);
    (0.5 + equatorial * 0.5 + subtropical_low + polar_rise).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equator_outweighs_subtropical_band() {
        let equator = hadley_factor(0.0);
        let subtropical = hadley_factor(PI / 6.0);
        assert!(equator > subtropical);
    }

    #[test]
    fn repeated_lookups_are_stable() {
        let a = hadley_factor(0.37);
        let b = hadley_factor(0.37);
        assert_eq!(a, b);
    }

    #[test]
    fn result_always_stays_in_unit_range() {
        for i in -20..=20 {
            let lat = i as f64 * PI / 40.0;
            let v = hadley_factor(lat);
            assert!((0.0..=1.0).contains(&v), "lat={lat} v={v}");
        }
    }
}
