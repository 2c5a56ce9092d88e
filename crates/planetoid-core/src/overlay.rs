//! Surface overlays: opaque raster byte blobs sampled through an injected
//! decode adapter (spec §4.10's surface queries may be overridden by an
//! overlay where one is present). The core never parses image formats
//! itself; a caller supplies a [`OverlayDecoder`] for whatever raster format
//! it uses. Decode failures fall back to the procedural value rather than
//! propagating an error, since a corrupt or unsupported overlay should
//! degrade gracefully, not abort generation or a query.

use std::sync::Arc;

/// Decodes a `(u, v)` sample (equirectangular fraction, each in `[0, 1)`)
/// out of an overlay's raw bytes. Returns `None` on decode failure or an
/// out-of-range sample, which tells the caller to fall back to noise.
pub trait OverlayDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8], u: f64, v: f64) -> Option<f64>;
}

#[derive(Clone)]
pub struct Overlay {
    pub name: String,
    pub bytes: Vec<u8>,
    pub decoder: Option<Arc<dyn OverlayDecoder>>,
}

impl Overlay {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, decoder: Arc<dyn OverlayDecoder>) -> Self {
        Self { name: name.into(), bytes, decoder: Some(decoder) }
    }

    /// An overlay with bytes but no decoder attached (e.g. deserialized from
    /// persistence without its format-specific adapter reinjected yet).
    pub fn undecodable(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes, decoder: None }
    }

    /// Sample the overlay at `(u, v)`, falling back to `fallback(u, v)` when
    /// there's no decoder or the decoder can't produce a value here.
    pub fn sample(&self, u: f64, v: f64, fallback: impl FnOnce(f64, f64) -> f64) -> f64 {
        match &self.decoder {
            Some(decoder) => decoder.decode(&self.bytes, u, v).unwrap_or_else(|| fallback(u, v)),
            None => fallback(u, v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDecoder(f64);
    impl OverlayDecoder for FixedDecoder {
        fn decode(&self, _bytes: &[u8], _u: f64, _v: f64) -> Option<f64> {
            Some(self.0)
        }
    }

    struct AlwaysFailsDecoder;
    impl OverlayDecoder for AlwaysFailsDecoder {
        fn decode(&self, _bytes: &[u8], _u: f64, _v: f64) -> Option<f64> {
            None
        }
    }

    #[test]
    fn decoded_value_wins_over_fallback() {
        let overlay = Overlay::new("test", vec![1, 2, 3], Arc::new(FixedDecoder(42.0)));
        assert_eq!(overlay.sample(0.5, 0.5, |_, _| 0.0), 42.0);
    }

    #[test]
    fn decode_failure_falls_back() {
        let overlay = Overlay::new("test", vec![1, 2, 3], Arc::new(AlwaysFailsDecoder));
        assert_eq!(overlay.sample(0.5, 0.5, |_, _| 7.0), 7.0);
    }

    #[test]
    fn missing_decoder_falls_back() {
        let overlay = Overlay::undecodable("test", vec![1, 2, 3]);
        assert_eq!(overlay.sample(0.5, 0.5, |_, _| 9.0), 9.0);
    }
}
