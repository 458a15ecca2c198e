//! Shared types for the terradrive workspace: tile coordinates and the
//! validated terrain configuration every other crate is built from.

pub mod config;
pub mod types;

pub use config::{ConfigError, Octave, TerrainConfig};
pub use types::TileCoord;
