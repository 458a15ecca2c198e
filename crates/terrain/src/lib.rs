//! Terrain tiles: one square chunk of heightfield mesh plus its props.
//!
//! # Invariants
//! - `TileFactory::build` is a pure function of `(coord, seed, config)`.
//! - A `Tile` is immutable after construction.
//! - Every graphics resource is owned by exactly one tile and released
//!   exactly once, when that tile is dropped or explicitly released.

mod mesh;
mod props;
mod resource;
mod tile;

pub use mesh::{TerrainMesh, TerrainVertex};
pub use props::{PROP_SEGMENTS, Prop, place_props, tile_stream_seed};
pub use resource::{ResourceHandle, ResourceId, ResourceKind, ResourcePool};
pub use tile::{PropResources, Tile, TileFactory, TileResources};
