//! Noise: the seeded scalar field every piece of terrain is derived from.
//!
//! # Invariants
//! - Same seed, same permutation, same samples, for the lifetime of a session.
//! - Sampling is pure: `NoiseField` is immutable after construction and `Sync`.

mod height;
mod lcg;
mod perlin;

pub use height::HeightProfile;
pub use lcg::{Lcg, mix_seed, unit_f64};
pub use perlin::NoiseField;
