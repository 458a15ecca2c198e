use std::collections::{BTreeMap, VecDeque};
use std::time::{Duration, Instant};

use glam::Vec2;
use terradrive_common::{ConfigError, TerrainConfig, TileCoord};
use terradrive_noise::NoiseField;
use terradrive_terrain::{Tile, TileFactory};

use crate::window::StreamWindow;

/// Changes made by one streaming update, in `(x, z)` order.
///
/// Evicted tiles are already released by the time the diff is returned; a
/// scene sink only has to drop its references to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileDiff {
    pub created: Vec<TileCoord>,
    pub retained: Vec<TileCoord>,
    pub evicted: Vec<TileCoord>,
}

impl TileDiff {
    /// True when nothing was created or evicted.
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.evicted.is_empty()
    }
}

/// Per-update streaming statistics for instrumentation.
#[derive(Debug, Clone, Default)]
pub struct StreamStats {
    pub tiles_created: usize,
    pub tiles_evicted: usize,
    pub resources_released: usize,
    pub total_resident: usize,
    pub update_time: Duration,
}

/// Owns the resident tile set and keeps it equal to the window around the
/// viewpoint.
///
/// The only place tiles are created or destroyed. Eviction removes a tile
/// from the set and releases its resources in the same step, so a resource
/// is never freed while its tile is required and never outlives eviction.
pub struct TileStreamer {
    chunk_size: f32,
    radius: i32,
    resident: BTreeMap<TileCoord, Tile>,
    center: Option<TileCoord>,
    stats: StreamStats,
}

impl std::fmt::Debug for TileStreamer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileStreamer")
            .field("chunk_size", &self.chunk_size)
            .field("radius", &self.radius)
            .field("resident", &self.resident.len())
            .field("center", &self.center)
            .finish()
    }
}

impl TileStreamer {
    pub fn new(config: &TerrainConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            chunk_size: config.chunk_size,
            radius: config.radius,
            resident: BTreeMap::new(),
            center: None,
            stats: StreamStats::default(),
        })
    }

    /// Bring the resident set in line with the window around `viewpoint`.
    ///
    /// Required and resident sets are both computed before any mutation.
    /// Calling again from the same tile changes nothing.
    pub fn update(
        &mut self,
        viewpoint: Vec2,
        factory: &TileFactory,
        noise: &NoiseField,
    ) -> TileDiff {
        let _span = tracing::info_span!("stream_update").entered();
        debug_assert_eq!(
            factory.config().chunk_size,
            self.chunk_size,
            "factory chunk size differs from the streaming grid"
        );
        let start = Instant::now();

        let window = StreamWindow::around(viewpoint, self.chunk_size, self.radius);

        let mut diff = TileDiff::default();
        for coord in window.coords() {
            if self.resident.contains_key(&coord) {
                diff.retained.push(coord);
            } else {
                diff.created.push(coord);
            }
        }
        diff.evicted = self
            .resident
            .keys()
            .filter(|c| !window.contains(**c))
            .copied()
            .collect();

        let mut released = 0;
        for coord in &diff.evicted {
            if let Some(tile) = self.resident.remove(coord) {
                released += tile.release();
            }
        }
        for &coord in &diff.created {
            tracing::debug!(%coord, "creating tile");
            self.resident.insert(coord, factory.build(coord, noise));
        }

        if self.center != Some(window.center) {
            tracing::debug!(center = %window.center, "viewpoint entered tile");
        }
        self.center = Some(window.center);
        self.stats = StreamStats {
            tiles_created: diff.created.len(),
            tiles_evicted: diff.evicted.len(),
            resources_released: released,
            total_resident: self.resident.len(),
            update_time: start.elapsed(),
        };

        tracing::trace!(
            created = diff.created.len(),
            evicted = diff.evicted.len(),
            resident = self.resident.len(),
            "stream update complete"
        );

        diff
    }

    /// Evict every resident tile.
    pub fn clear(&mut self) -> TileDiff {
        let resident = std::mem::take(&mut self.resident);
        let mut diff = TileDiff::default();
        let mut released = 0;
        for (coord, tile) in resident {
            released += tile.release();
            diff.evicted.push(coord);
        }
        self.center = None;
        self.stats = StreamStats {
            tiles_evicted: diff.evicted.len(),
            resources_released: released,
            ..StreamStats::default()
        };
        diff
    }

    pub fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        self.resident.get(&coord)
    }

    pub fn is_resident(&self, coord: TileCoord) -> bool {
        self.resident.contains_key(&coord)
    }

    /// Resident coordinates in `(x, z)` order.
    pub fn resident_coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.resident.keys().copied()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.resident.values()
    }

    pub fn len(&self) -> usize {
        self.resident.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resident.is_empty()
    }

    /// Tile the viewpoint was in at the last update.
    pub fn center(&self) -> Option<TileCoord> {
        self.center
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Statistics from the last update.
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }
}

/// Rolling window of recent update durations.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    samples: VecDeque<Duration>,
    capacity: usize,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(dt);
    }

    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.samples.iter().sum::<Duration>() / self.samples.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.samples.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.samples.iter().copied().min().unwrap_or(Duration::ZERO)
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }
}
