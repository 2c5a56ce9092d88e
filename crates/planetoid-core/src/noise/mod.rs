//! Six-channel simplex fractal noise (spec §4.4).
//!
//! Channel roles, frequency, octaves, and kind are fixed by the table in
//! spec §4.4; only the seeds vary per planet, each derived deterministically
//! from the master seed via the [`Reconstitution`] service so regenerating a
//! planet from its saved seed reproduces identical terrain.

mod channel;

pub use channel::{ChannelKind, NoiseChannel};

use crate::rng::{idx, Reconstitution};
use crate::vector::Vec3;

/// Derive the six per-planet noise seeds from the master seed (spec §3: "the
/// six noise seeds are a deterministic function of the master seed").
pub fn derive_noise_seeds(reconstitution: &Reconstitution) -> [u32; 6] {
    let mut seeds = [0u32; 6];
    for (i, seed) in seeds.iter_mut().enumerate() {
        *seed = reconstitution.get_int(idx::NOISE_SEED_BASE + i as u32, 0, u32::MAX as i64) as u32;
    }
    seeds
}

pub struct PlanetNoise {
    base_elevation: NoiseChannel,
    mountain_ridges: NoiseChannel,
    mountain_mask: NoiseChannel,
    precip_macro: NoiseChannel,
    precip_micro: NoiseChannel,
    humidity: NoiseChannel,
}

impl PlanetNoise {
    pub fn new(seeds: [u32; 6]) -> Self {
        Self {
            base_elevation: NoiseChannel::new(seeds[0], ChannelKind::Fractal, 0.8, 6),
            mountain_ridges: NoiseChannel::new(seeds[1], ChannelKind::Billow, 0.6, 6),
            mountain_mask: NoiseChannel::new(seeds[2], ChannelKind::Simple, 1.2, 1),
            precip_macro: NoiseChannel::new(seeds[3], ChannelKind::Simple, 1.0, 1),
            precip_micro: NoiseChannel::new(seeds[4], ChannelKind::Fractal, 3.0, 3),
            humidity: NoiseChannel::new(seeds[5], ChannelKind::Simple, 1.0, 1),
        }
    }

    /// Normalized elevation in roughly `[-1, 1]` at a point on the unit
    /// sphere. Callers scale by `MaxElevation` (spec §4.10).
    ///
    /// Combines the base continental term with a square-magnified, mask-
    /// gated mountain-ridge term, then applies the plateau-skewing transform
    /// `n <- 0.5 n (n^2 + 1)` (spec §4.4).
    pub fn elevation(&self, p: Vec3) -> f64 {
        let base = self.base_elevation.sample(p.x, p.y, p.z);
        let ridge = self.mountain_ridges.sample(p.x, p.y, p.z);
        let mask = (self.mountain_mask.sample(p.x, p.y, p.z) * 0.5 + 0.5).clamp(0.0, 1.0);
        let mountain_term = ridge * ridge.abs() * mask;
        let n = (base + mountain_term).clamp(-2.0, 2.0);
        0.5 * n * (n * n + 1.0)
    }

    /// Macro precipitation noise channel (channel 4 in spec §4.4).
    pub fn precip_macro(&self, p: Vec3) -> f64 {
        self.precip_macro.sample(p.x, p.y, p.z)
    }

    /// Micro precipitation noise channel (channel 5).
    pub fn precip_micro(&self, p: Vec3) -> f64 {
        self.precip_micro.sample(p.x, p.y, p.z)
    }

    /// Humidity channel (channel 6).
    pub fn humidity(&self, p: Vec3) -> f64 {
        self.humidity.sample(p.x, p.y, p.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seeds_give_identical_elevation() {
        let a = PlanetNoise::new([1, 2, 3, 4, 5, 6]);
        let b = PlanetNoise::new([1, 2, 3, 4, 5, 6]);
        let p = Vec3::from_lat_lon(0.4, 1.1);
        assert_eq!(a.elevation(p), b.elevation(p));
    }

    #[test]
    fn derive_noise_seeds_is_deterministic_per_master_seed() {
        let r1 = Reconstitution::new(77);
        let r2 = Reconstitution::new(77);
        assert_eq!(derive_noise_seeds(&r1), derive_noise_seeds(&r2));
    }

    #[test]
    fn different_master_seeds_give_different_noise_seeds() {
        let r1 = Reconstitution::new(1);
        let r2 = Reconstitution::new(2);
        assert_ne!(derive_noise_seeds(&r1), derive_noise_seeds(&r2));
    }

    #[test]
    fn elevation_varies_across_the_sphere() {
        let noise = PlanetNoise::new(derive_noise_seeds(&Reconstitution::new(42)));
        let a = noise.elevation(Vec3::from_lat_lon(0.0, 0.0));
        let b = noise.elevation(Vec3::from_lat_lon(1.0, 2.0));
        assert_ne!(a, b);
    }
}
