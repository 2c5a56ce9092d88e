//! Deterministic, indexed, typed draw service ("Reconstitution", spec §4.1).
//!
//! A `Reconstitution` holds one deterministic stream per channel index. The
//! first access to index `i` draws a value according to the distribution
//! fixed for that index by [`draw_spec`] and caches it; every later access to
//! the same index returns the cached value, so draws are idempotent and
//! identical `(master_seed, index)` pairs always produce identical values —
//! independent of the order in which indices happen to be queried during
//! generation.
//!
//! Per-channel streams are independent `StdRng` instances seeded from a hash
//! of `(master_seed, index)` rather than one shared advancing stream, which
//! is what lets composite indices (one channel index per loop iteration, see
//! `channel_for`) exist without perturbing any other channel's value.
//! `StdRng` (ChaCha12 in the `rand` 0.8 line) has no platform-dependent
//! behavior, satisfying the "arithmetic-identical PRNG" requirement.
//!
//! Index stability is the central determinism contract: reordering the
//! constants in [`idx`] invalidates every previously generated world.

use std::cell::RefCell;
use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

pub type ChannelIndex = u32;

/// Stride reserved per loop iteration when a generation stage needs a block
/// of channels (e.g. one satellite's periapsis/eccentricity/type-roll/age
/// draws). Keeps composite indices from colliding with the next iteration's
/// block even if a stage's per-item draw count grows later.
pub const ITER_STRIDE: ChannelIndex = 16;

/// Derive a composite channel index for the `sub`-th draw of the `ordinal`-th
/// item in a repeated stage rooted at `base`.
pub fn channel_for(base: ChannelIndex, ordinal: usize, sub: ChannelIndex) -> ChannelIndex {
    base + (ordinal as ChannelIndex) * ITER_STRIDE + sub
}

/// Fixed, named channel indices. Every random quantity referenced in spec §4
/// draws from one of these (or a composite derived from one via
/// `channel_for`). Grouped by generation stage; do not renumber.
pub mod idx {
    use super::ChannelIndex;

    pub const ECCENTRICITY: ChannelIndex = 0;
    pub const ROTATION_AGE: ChannelIndex = 1;
    pub const ROTATION_PERIOD: ChannelIndex = 2;
    pub const ROTATION_EXTREME_ROLL: ChannelIndex = 3;
    pub const ROTATION_EXTREME_VALUE: ChannelIndex = 4;
    pub const AXIS_ANGLE_EXTREME_ROLL: ChannelIndex = 5;
    pub const AXIS_ANGLE_EXTREME_VALUE: ChannelIndex = 6;
    pub const AXIS_ANGLE_NORMAL: ChannelIndex = 7;
    pub const AXIS_PRECESSION: ChannelIndex = 8;
    pub const GIANT_PUFFY_ROLL: ChannelIndex = 9;
    pub const DENSITY_VARIATION: ChannelIndex = 10;
    pub const WATER_RATIO: ChannelIndex = 11;
    pub const FRESHWATER_FRACTION: ChannelIndex = 12;
    pub const MASS: ChannelIndex = 13;
    pub const GRAVITY: ChannelIndex = 14;
    pub const PLANET_FLATTENING: ChannelIndex = 15;
    pub const RESOURCE_SEED: ChannelIndex = 16;
    pub const PLANET_TYPE_CHOICE: ChannelIndex = 17;
    pub const SEMI_MAJOR_AXIS: ChannelIndex = 18;
    pub const ORBIT_INCLINATION: ChannelIndex = 19;
    pub const ORBIT_ARGUMENT_OF_PERIAPSIS: ChannelIndex = 20;
    pub const ORBIT_LONGITUDE_OF_ASCENDING_NODE: ChannelIndex = 21;
    pub const ORBIT_TRUE_ANOMALY: ChannelIndex = 22;

    pub const SATELLITE_COUNT_CAP_ROLL: ChannelIndex = 100;
    pub const SATELLITE_BASE: ChannelIndex = 200; // + channel_for(.., ordinal, sub)
    pub const RING_BASE: ChannelIndex = 1_000; // + channel_for(.., ordinal, sub)
    pub const NOISE_SEED_BASE: ChannelIndex = 2_000; // + channel (0..=5)
}

#[derive(Debug, Clone, Copy)]
pub enum DrawSpec {
    Uniform { min: f64, max: f64 },
    Normal { mean: f64, sigma: f64 },
    LogNormal { mean: f64, sigma: f64 },
    /// `|Normal(0, sigma)|`, clamped to `[clamp_min, clamp_max]`.
    HalfNormal { sigma: f64, clamp_min: f64, clamp_max: f64 },
    Bool { probability_true: f64 },
}

/// Deterministic typed draw service over a master seed.
pub struct Reconstitution {
    seed: u32,
    cache: RefCell<HashMap<ChannelIndex, f64>>,
}

impl Reconstitution {
    pub fn new(seed: u32) -> Self {
        Self { seed, cache: RefCell::new(HashMap::new()) }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    fn stream_for(&self, index: ChannelIndex) -> StdRng {
        // Splitmix-style mixing of (seed, index) into a single u64 seed.
        let mut z = (self.seed as u64) ^ ((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        StdRng::seed_from_u64(z)
    }

    fn draw_raw(&self, index: ChannelIndex, spec: DrawSpec) -> f64 {
        if let Some(v) = self.cache.borrow().get(&index) {
            return *v;
        }
        let mut rng = self.stream_for(index);
        let value = match spec {
            DrawSpec::Uniform { min, max } => {
                if max > min { rng.gen_range(min..max) } else { min }
            }
            DrawSpec::Normal { mean, sigma } => {
                let n = Normal::new(mean, sigma.max(1e-12)).expect("finite sigma");
                n.sample(&mut rng)
            }
            DrawSpec::LogNormal { mean, sigma } => {
                let ln_mean = mean.max(1e-300).ln();
                let n = Normal::new(ln_mean, sigma.max(1e-12)).expect("finite sigma");
                n.sample(&mut rng).exp()
            }
            DrawSpec::HalfNormal { sigma, clamp_min, clamp_max } => {
                let n = Normal::new(0.0, sigma.max(1e-12)).expect("finite sigma");
                let v: f64 = n.sample(&mut rng).abs();
                v.clamp(clamp_min, clamp_max)
            }
            DrawSpec::Bool { probability_true } => {
                if rng.gen::<f64>() < probability_true { 1.0 } else { 0.0 }
            }
        };
        self.cache.borrow_mut().insert(index, value);
        value
    }

    /// Draw (or fetch the cached draw for) `index` under `spec`, as `f64`.
    /// This is the crate-internal workhorse behind `get_double`/`get_decimal`;
    /// callers that need a specific distribution at a specific index go
    /// through this rather than the four spec-named getters, since the
    /// distribution for a bespoke channel is supplied by the generation
    /// stage rather than looked up in a blanket table (spec §9 notes the
    /// table is the determinism contract — stability comes from the channel
    /// index being fixed per call site, not from a single global switch
    /// statement enumerating every index that will ever be used).
    pub fn draw(&self, index: ChannelIndex, spec: DrawSpec) -> f64 {
        self.draw_raw(index, spec)
    }

    /// `get_int(i)`: a uniformly distributed integer in `[min, max]`.
    pub fn get_int(&self, index: ChannelIndex, min: i64, max: i64) -> i64 {
        let v = self.draw_raw(
            index,
            DrawSpec::Uniform { min: min as f64, max: (max as f64) + 1.0 },
        );
        (v.floor() as i64).clamp(min, max)
    }

    /// `get_decimal(i)`: a uniform value in `[0, 1)`, single-precision range.
    pub fn get_decimal(&self, index: ChannelIndex) -> f32 {
        self.draw_raw(index, DrawSpec::Uniform { min: 0.0, max: 1.0 }) as f32
    }

    /// `get_double(i)`: a uniform value in `[0, 1)`, double precision.
    pub fn get_double(&self, index: ChannelIndex) -> f64 {
        self.draw_raw(index, DrawSpec::Uniform { min: 0.0, max: 1.0 })
    }

    /// `get_number(i)`: same contract as `get_double`, kept as a distinct
    /// name because spec §9's arbitrary-precision design note targets this
    /// channel specifically for quantities whose ratios span 20+ orders of
    /// magnitude (mass, radius, Hill-sphere distance). In metres/kilograms
    /// those ratios stay within f64's ~15-17 significant digits for every
    /// body this crate generates, so `get_number` is f64 here; see
    /// `DESIGN.md` for the resolution.
    pub fn get_number(&self, index: ChannelIndex) -> f64 {
        self.get_double(index)
    }

    pub fn uniform(&self, index: ChannelIndex, min: f64, max: f64) -> f64 {
        self.draw_raw(index, DrawSpec::Uniform { min, max })
    }

    pub fn normal(&self, index: ChannelIndex, mean: f64, sigma: f64) -> f64 {
        self.draw_raw(index, DrawSpec::Normal { mean, sigma })
    }

    pub fn log_normal(&self, index: ChannelIndex, mean: f64, sigma: f64) -> f64 {
        self.draw_raw(index, DrawSpec::LogNormal { mean, sigma })
    }

    pub fn half_normal(&self, index: ChannelIndex, sigma: f64, clamp_min: f64, clamp_max: f64) -> f64 {
        self.draw_raw(index, DrawSpec::HalfNormal { sigma, clamp_min, clamp_max })
    }

    pub fn chance(&self, index: ChannelIndex, probability_true: f64) -> bool {
        self.draw_raw(index, DrawSpec::Bool { probability_true }) >= 1.0
    }

    /// Weighted choice over `n` buckets using the given weights (need not
    /// sum to 1). Returns the chosen bucket index.
    pub fn weighted_choice(&self, index: ChannelIndex, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 || weights.is_empty() {
            return 0;
        }
        let roll = self.uniform(index, 0.0, total);
        let mut acc = 0.0;
        for (i, w) in weights.iter().enumerate() {
            acc += w;
            if roll < acc {
                return i;
            }
        }
        weights.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_index_is_deterministic() {
        let a = Reconstitution::new(42);
        let b = Reconstitution::new(42);
        assert_eq!(a.get_double(idx::ECCENTRICITY), b.get_double(idx::ECCENTRICITY));
        assert_eq!(a.uniform(idx::MASS, 0.0, 100.0), b.uniform(idx::MASS, 0.0, 100.0));
    }

    #[test]
    fn different_seeds_diverge() {
        let a = Reconstitution::new(1);
        let b = Reconstitution::new(2);
        assert_ne!(a.get_double(idx::ECCENTRICITY), b.get_double(idx::ECCENTRICITY));
    }

    #[test]
    fn repeated_queries_are_idempotent() {
        let r = Reconstitution::new(7);
        let first = r.uniform(idx::GRAVITY, 0.0, 1.0);
        let second = r.uniform(idx::GRAVITY, 0.0, 1.0);
        assert_eq!(first, second);
    }

    #[test]
    fn different_indices_are_independent() {
        let r = Reconstitution::new(7);
        let a = r.get_double(idx::ECCENTRICITY);
        let b = r.get_double(idx::ROTATION_AGE);
        assert_ne!(a, b);
    }

    #[test]
    fn half_normal_respects_clamp() {
        let r = Reconstitution::new(99);
        for i in 0..64 {
            let v = r.half_normal(1_000_000 + i, 0.2, 0.0, 0.4);
            assert!((0.0..=0.4).contains(&v), "v={v}");
        }
    }

    #[test]
    fn channel_for_avoids_collisions_across_ordinals() {
        let a = channel_for(idx::SATELLITE_BASE, 0, 2);
        let b = channel_for(idx::SATELLITE_BASE, 1, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn weighted_choice_respects_zero_weight_buckets() {
        let r = Reconstitution::new(5);
        for i in 0..200 {
            let choice = r.weighted_choice(2_000_000 + i, &[1.0, 0.0, 1.0]);
            assert_ne!(choice, 1, "bucket 1 has zero weight and should never be chosen");
        }
    }
}
