use serde::{Deserialize, Serialize};

/// One frequency/weight term of the terrain height sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Octave {
    pub frequency: f64,
    pub weight: f64,
}

impl Octave {
    pub const fn new(frequency: f64, weight: f64) -> Self {
        Self { frequency, weight }
    }
}

/// Rejected terrain configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("chunk size must be finite and positive, got {0}")]
    ChunkSize(f32),
    #[error("mesh resolution must be at least 1")]
    Resolution,
    #[error("streaming radius must not be negative, got {0}")]
    Radius(i32),
    #[error("at least one noise octave is required")]
    NoOctaves,
    #[error("octave {index} is not finite: frequency={frequency}, weight={weight}")]
    Octave {
        index: usize,
        frequency: f64,
        weight: f64,
    },
    #[error("ground octave count must be in 1..={available}, got {requested}")]
    GroundOctaves { requested: usize, available: usize },
    #[error("prop skip chance must be within [0, 1], got {0}")]
    PropSkipChance(f64),
    #[error("height baseline must be finite, got {0}")]
    Baseline(f64),
}

/// Terrain generation and streaming constants.
///
/// `Default` is the shipped configuration. Every constructor that takes a
/// config validates it once; downstream code assumes it is well formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Tile edge length in world units.
    pub chunk_size: f32,
    /// Mesh subdivisions per tile edge (vertices per edge = resolution + 1).
    pub resolution: u32,
    /// Streaming radius in tiles, measured as Chebyshev distance.
    pub radius: i32,
    /// Height octaves, coarse to fine.
    pub octaves: Vec<Octave>,
    /// Subtracted from every height sum.
    pub baseline: f64,
    /// Leading octaves used for vehicle ground and prop placement.
    pub ground_octaves: usize,
    /// Candidate prop slots per tile.
    pub prop_slots: u32,
    /// Probability that a prop slot stays empty.
    pub prop_skip_chance: f64,
    /// Vertical offset of props above the sampled ground.
    pub prop_lift: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            chunk_size: 40.0,
            resolution: 32,
            radius: 2,
            octaves: vec![
                Octave::new(0.005, 6.0),
                Octave::new(0.02, 2.0),
                Octave::new(0.08, 0.7),
            ],
            baseline: 1.6,
            ground_octaves: 2,
            prop_slots: 6,
            prop_skip_chance: 0.6,
            prop_lift: 0.2,
        }
    }
}

impl TerrainConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.chunk_size.is_finite() || self.chunk_size <= 0.0 {
            return Err(ConfigError::ChunkSize(self.chunk_size));
        }
        if self.resolution == 0 {
            return Err(ConfigError::Resolution);
        }
        if self.radius < 0 {
            return Err(ConfigError::Radius(self.radius));
        }
        if self.octaves.is_empty() {
            return Err(ConfigError::NoOctaves);
        }
        for (index, o) in self.octaves.iter().enumerate() {
            if !o.frequency.is_finite() || !o.weight.is_finite() {
                return Err(ConfigError::Octave {
                    index,
                    frequency: o.frequency,
                    weight: o.weight,
                });
            }
        }
        if self.ground_octaves == 0 || self.ground_octaves > self.octaves.len() {
            return Err(ConfigError::GroundOctaves {
                requested: self.ground_octaves,
                available: self.octaves.len(),
            });
        }
        if !(0.0..=1.0).contains(&self.prop_skip_chance) {
            return Err(ConfigError::PropSkipChance(self.prop_skip_chance));
        }
        if !self.baseline.is_finite() {
            return Err(ConfigError::Baseline(self.baseline));
        }
        Ok(())
    }

    /// Vertices along one tile edge.
    pub fn vertices_per_edge(&self) -> usize {
        self.resolution as usize + 1
    }

    /// Number of tiles resident around a viewpoint: `(2 * radius + 1)^2`.
    pub fn resident_tile_count(&self) -> usize {
        let side = (2 * self.radius + 1) as usize;
        side * side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_constants() {
        let c = TerrainConfig::default();
        assert_eq!(c.chunk_size, 40.0);
        assert_eq!(c.resolution, 32);
        assert_eq!(c.radius, 2);
        assert_eq!(c.octaves.len(), 3);
        assert_eq!(c.octaves[0], Octave::new(0.005, 6.0));
        assert_eq!(c.octaves[2], Octave::new(0.08, 0.7));
        assert_eq!(c.baseline, 1.6);
        assert_eq!(c.vertices_per_edge(), 33);
        assert_eq!(c.resident_tile_count(), 25);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_chunk() {
        let mut c = TerrainConfig {
            chunk_size: 0.0,
            ..TerrainConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ChunkSize(0.0)));
        c.chunk_size = -5.0;
        assert!(matches!(c.validate(), Err(ConfigError::ChunkSize(_))));
        c.chunk_size = f32::NAN;
        assert!(matches!(c.validate(), Err(ConfigError::ChunkSize(_))));
    }

    #[test]
    fn rejects_negative_radius() {
        let c = TerrainConfig {
            radius: -1,
            ..TerrainConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::Radius(-1)));
    }

    #[test]
    fn zero_radius_is_allowed() {
        let c = TerrainConfig {
            radius: 0,
            ..TerrainConfig::default()
        };
        assert!(c.validate().is_ok());
        assert_eq!(c.resident_tile_count(), 1);
    }

    #[test]
    fn rejects_zero_resolution() {
        let c = TerrainConfig {
            resolution: 0,
            ..TerrainConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::Resolution));
    }

    #[test]
    fn rejects_bad_octaves() {
        let c = TerrainConfig {
            octaves: Vec::new(),
            ..TerrainConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::NoOctaves));

        let mut c = TerrainConfig::default();
        c.octaves[1].weight = f64::INFINITY;
        assert!(matches!(c.validate(), Err(ConfigError::Octave { index: 1, .. })));

        let c = TerrainConfig {
            ground_octaves: 4,
            ..TerrainConfig::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::GroundOctaves {
                requested: 4,
                available: 3
            })
        );
    }

    #[test]
    fn rejects_out_of_range_skip_chance() {
        let c = TerrainConfig {
            prop_skip_chance: 1.5,
            ..TerrainConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::PropSkipChance(1.5)));
    }

    #[test]
    fn serializes_to_json() {
        let c = TerrainConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"chunk_size\":40.0"));
        let back: TerrainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
