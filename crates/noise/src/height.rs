use terradrive_common::{Octave, TerrainConfig};

use crate::perlin::NoiseField;

/// Weighted octave sum that turns noise samples into world heights.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightProfile {
    octaves: Vec<Octave>,
    baseline: f64,
    ground_octaves: usize,
}

impl HeightProfile {
    /// Takes a validated config: `ground_octaves` must be within the octave count.
    pub fn from_config(config: &TerrainConfig) -> Self {
        Self {
            octaves: config.octaves.clone(),
            baseline: config.baseline,
            ground_octaves: config.ground_octaves.min(config.octaves.len()),
        }
    }

    /// Full-detail height used for mesh vertices.
    pub fn height(&self, noise: &NoiseField, x: f64, z: f64) -> f64 {
        self.sum(noise, x, z, self.octaves.len())
    }

    /// Coarse height from the leading octaves, used for vehicle ground
    /// following and prop placement.
    pub fn ground_height(&self, noise: &NoiseField, x: f64, z: f64) -> f64 {
        self.sum(noise, x, z, self.ground_octaves)
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    fn sum(&self, noise: &NoiseField, x: f64, z: f64, count: usize) -> f64 {
        let total = self.octaves[..count].iter().fold(0.0, |acc, o| {
            acc + noise.sample(x * o.frequency, z * o.frequency) * o.weight
        });
        total - self.baseline
    }
}

impl Default for HeightProfile {
    fn default() -> Self {
        Self::from_config(&TerrainConfig::default())
    }
}
