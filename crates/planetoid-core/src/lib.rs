//! Deterministic procedural planetoid generation.
//!
//! Given a master seed and a small set of generation parameters, this crate
//! produces a fully specified planetary body — composition, hydrosphere,
//! atmosphere, satellites, rings, resources — and exposes a pure query layer
//! over its surface. Every derived quantity is a deterministic function of
//! the seed; regenerating from the same seed always reproduces the same
//! world (see [`rng::Reconstitution`]).

pub mod atmosphere;
pub mod composition;
pub mod datastore;
pub mod error;
pub mod habitability;
pub mod hadley;
pub mod hydrosphere;
pub mod material;
pub mod noise;
pub mod orbit;
pub mod overlay;
pub mod persistence;
pub mod planet_type;
pub mod planetoid;
pub mod resources;
pub mod rings;
pub mod rng;
pub mod satellites;
pub mod shape;
pub mod substance;
pub mod surface;
pub mod temperature;
pub mod vector;

pub use error::{GenerationError, Result};
pub use planet_type::PlanetType;
pub use planetoid::{GenerationParams, Planetoid};
pub use rng::Reconstitution;
