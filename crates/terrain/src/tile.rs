use terradrive_common::{ConfigError, TerrainConfig, TileCoord};
use terradrive_noise::{HeightProfile, NoiseField};

use crate::mesh::TerrainMesh;
use crate::props::{Prop, place_props};
use crate::resource::{ResourceHandle, ResourceKind, ResourcePool};

/// Mesh buffer and material of one prop.
#[derive(Debug)]
pub struct PropResources {
    pub mesh: ResourceHandle,
    pub material: ResourceHandle,
}

/// Every graphics resource a tile owns.
#[derive(Debug)]
pub struct TileResources {
    pub terrain_mesh: ResourceHandle,
    pub terrain_material: ResourceHandle,
    pub props: Vec<PropResources>,
}

impl TileResources {
    fn allocate(pool: &ResourcePool, prop_count: usize) -> Self {
        Self {
            terrain_mesh: pool.allocate(ResourceKind::MeshBuffer),
            terrain_material: pool.allocate(ResourceKind::Material),
            props: (0..prop_count)
                .map(|_| PropResources {
                    mesh: pool.allocate(ResourceKind::MeshBuffer),
                    material: pool.allocate(ResourceKind::Material),
                })
                .collect(),
        }
    }

    pub fn handle_count(&self) -> usize {
        2 + 2 * self.props.len()
    }
}

/// One generated terrain chunk: heightfield mesh, props, and the resources
/// backing them. Immutable once built.
#[derive(Debug)]
pub struct Tile {
    coord: TileCoord,
    mesh: TerrainMesh,
    props: Vec<Prop>,
    resources: TileResources,
}

impl Tile {
    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    pub fn resources(&self) -> &TileResources {
        &self.resources
    }

    /// Release every resource this tile owns. Returns how many were freed.
    pub fn release(self) -> usize {
        let count = self.resources.handle_count();
        tracing::debug!(coord = %self.coord, resources = count, "releasing tile");
        count
    }

    /// FNV-1a over the generated geometry; equal fingerprints mean equal
    /// meshes and props, independent of which resources back them.
    pub fn fingerprint(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.coord.x.to_le_bytes());
        mix(&mut h, &self.coord.z.to_le_bytes());
        mix(&mut h, self.mesh.vertex_bytes());
        mix(&mut h, self.mesh.index_bytes());
        for p in &self.props {
            for v in [p.position.x, p.position.y, p.position.z, p.radius, p.height] {
                mix(&mut h, &v.to_le_bytes());
            }
        }
        h
    }
}

/// Builds tiles from the session's noise field.
#[derive(Debug, Clone)]
pub struct TileFactory {
    config: TerrainConfig,
    profile: HeightProfile,
    pool: ResourcePool,
}

impl TileFactory {
    pub fn new(config: TerrainConfig, pool: ResourcePool) -> Result<Self, ConfigError> {
        config.validate()?;
        let profile = HeightProfile::from_config(&config);
        Ok(Self {
            config,
            profile,
            pool,
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn profile(&self) -> &HeightProfile {
        &self.profile
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// Generate the tile at `coord`. Same coord and seed, same geometry.
    pub fn build(&self, coord: TileCoord, noise: &NoiseField) -> Tile {
        let origin = coord.origin(self.config.chunk_size);
        let mesh = TerrainMesh::from_heights(
            origin,
            self.config.chunk_size,
            self.config.resolution,
            |x, z| self.profile.height(noise, x, z),
        );
        let props = place_props(coord, &self.config, noise, &self.profile);
        let resources = TileResources::allocate(&self.pool, props.len());
        tracing::trace!(
            coord = %coord,
            vertices = mesh.vertex_count(),
            props = props.len(),
            "built tile"
        );
        Tile {
            coord,
            mesh,
            props,
            resources,
        }
    }
}
