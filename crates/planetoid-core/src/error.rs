//! Error taxonomy for the generation boundary.
//!
//! Surface queries never return `Result` — missing collaborators and
//! numerical degeneracies degrade to defined fallback values instead (see
//! `surface` and `habitability`). Only the generation entry point and the
//! explicit mutators listed in the lifecycle contract can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Non-finite seed, negative mass, contradictory params (e.g.
    /// `min_temperature > max_temperature`). Detected at entry, before any
    /// draw happens.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The habitability correction loop exhausted its retry budget (100
    /// attempts) without producing a body that satisfies the requirements.
    #[error("no feasible planetoid found within the habitability retry budget")]
    Infeasible,

    /// A debug-only invariant check (§3) failed. Compiled in only under
    /// `cfg!(debug_assertions)`; release builds never produce this variant.
    #[error("numerical degeneracy: {reason}")]
    NumericalDegeneracy { reason: String },
}

pub type Result<T> = std::result::Result<T, GenerationError>;

/// Check a §3 invariant in debug builds only; no-op in release.
///
/// Used at the end of generation stages to assert things like mass closure
/// or atmosphere closure without paying for the check in release builds.
#[inline]
pub fn debug_invariant(condition: bool, reason: impl FnOnce() -> String) -> Result<()> {
    if cfg!(debug_assertions) && !condition {
        return Err(GenerationError::NumericalDegeneracy {
            reason: reason(),
        });
    }
    Ok(())
}
