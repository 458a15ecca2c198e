use glam::Vec3;
use terradrive_common::{TerrainConfig, TileCoord};
use terradrive_noise::{HeightProfile, Lcg, NoiseField, mix_seed, unit_f64};

/// Radial segments of the cone a renderer draws for each prop.
pub const PROP_SEGMENTS: u32 = 6;

/// A decorative cone (rock) standing on the terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prop {
    /// World-space position of the cone's base center.
    pub position: Vec3,
    pub radius: f32,
    pub height: f32,
}

/// Seed of a tile's prop stream: `ix * 3749 + iz * 127 + seed`, wrapping.
///
/// Depends only on the tile and session seed, never on generation order.
pub fn tile_stream_seed(coord: TileCoord, seed: u32) -> u32 {
    (coord.x as u32)
        .wrapping_mul(3749)
        .wrapping_add((coord.z as u32).wrapping_mul(127))
        .wrapping_add(seed)
}

/// Place the props of one tile.
///
/// Each slot takes exactly one draw from the tile stream whether or not it
/// is skipped. A kept slot seeds its own sub-stream from that draw for
/// position and size, so one slot's outcome never shifts another's.
pub fn place_props(
    coord: TileCoord,
    config: &TerrainConfig,
    noise: &NoiseField,
    profile: &HeightProfile,
) -> Vec<Prop> {
    let chunk = config.chunk_size as f64;
    let origin = coord.origin(config.chunk_size);
    let center_x = origin.x as f64 + chunk / 2.0;
    let center_z = origin.y as f64 + chunk / 2.0;

    let mut stream = Lcg::new(tile_stream_seed(coord, noise.seed()));
    (0..config.prop_slots)
        .filter_map(|_| {
            let draw = stream.next_u32();
            if unit_f64(draw) < config.prop_skip_chance {
                return None;
            }
            let mut slot = Lcg::new(mix_seed(draw));
            let x = center_x + (slot.next_f64() - 0.5) * chunk;
            let z = center_z + (slot.next_f64() - 0.5) * chunk;
            let radius = 0.4 + slot.next_f64() * 0.6;
            let height = 0.8 + slot.next_f64() * 0.8;
            let ground = profile.ground_height(noise, x, z) as f32;
            Some(Prop {
                position: Vec3::new(x as f32, ground + config.prop_lift, z as f32),
                radius: radius as f32,
                height: height as f32,
            })
        })
        .collect()
}
