use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Integer position of a terrain tile on the infinite XZ grid.
///
/// Ordered by `(x, z)` so sets and maps of coordinates iterate the same way
/// on every platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct TileCoord {
    pub x: i32,
    pub z: i32,
}

impl TileCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Tile containing the world-space point, using floor division so that
    /// negative coordinates map to negative tiles.
    pub fn containing(point: Vec2, chunk_size: f32) -> Self {
        Self {
            x: (point.x / chunk_size).floor() as i32,
            z: (point.y / chunk_size).floor() as i32,
        }
    }

    /// World-space XZ of the tile's minimum corner.
    pub fn origin(self, chunk_size: f32) -> Vec2 {
        Vec2::new(self.x as f32 * chunk_size, self.z as f32 * chunk_size)
    }

    /// Chebyshev distance in tiles. Exact across the whole `i32` range.
    pub fn chebyshev(self, other: TileCoord) -> u32 {
        self.x.abs_diff(other.x).max(self.z.abs_diff(other.z))
    }

    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}
