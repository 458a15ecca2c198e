use serde::Serialize;
use terradrive_common::{ConfigError, TerrainConfig};
use terradrive_input::DriveInput;
use terradrive_noise::NoiseField;
use terradrive_render::{ChaseCamera, SceneSink, apply_diff};
use terradrive_stream::{FrameTimer, TileDiff, TileStreamer};
use terradrive_terrain::{ResourcePool, TileFactory};

use crate::vehicle::{VehicleParams, VehicleState};

/// Longest simulated step; slower frames are treated as this long.
pub const MAX_FRAME_DT: f32 = 0.05;

/// Clamp a raw frame delta into `[0, MAX_FRAME_DT]`.
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_FRAME_DT)
}

/// Outcome of one frame.
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// Delta actually simulated, after clamping.
    pub dt: f32,
    pub diff: TileDiff,
}

/// Everything one driving session owns: the seed and noise field, the
/// tile factory and resident tiles, the vehicle and the camera.
///
/// Single-threaded: `frame` runs to completion before the next one starts,
/// and it is the only path that mutates the resident tiles.
#[derive(Debug)]
pub struct Session {
    noise: NoiseField,
    factory: TileFactory,
    streamer: TileStreamer,
    params: VehicleParams,
    vehicle: VehicleState,
    camera: ChaseCamera,
    frame: u64,
    timer: FrameTimer,
}

impl Session {
    pub fn new(seed: u32, config: TerrainConfig) -> Result<Self, ConfigError> {
        Self::with_pool(seed, config, ResourcePool::new())
    }

    /// Session allocating from a caller-supplied pool, so the caller can
    /// watch live resource counts.
    pub fn with_pool(
        seed: u32,
        config: TerrainConfig,
        pool: ResourcePool,
    ) -> Result<Self, ConfigError> {
        let streamer = TileStreamer::new(&config)?;
        let factory = TileFactory::new(config, pool)?;
        tracing::info!(seed, "session started");
        Ok(Self {
            noise: NoiseField::new(seed),
            factory,
            streamer,
            params: VehicleParams::default(),
            vehicle: VehicleState::default(),
            camera: ChaseCamera::default(),
            frame: 0,
            timer: FrameTimer::new(120),
        })
    }

    pub fn with_params(mut self, params: VehicleParams) -> Self {
        self.params = params;
        self
    }

    /// Run one frame: simulate, stream tiles around the vehicle, push the
    /// tile diff to `sink`, then move the camera.
    pub fn frame<S: SceneSink + ?Sized>(
        &mut self,
        input: DriveInput,
        raw_dt: f32,
        sink: &mut S,
    ) -> FrameReport {
        let dt = clamp_dt(raw_dt);

        let mut next = self.vehicle.step(input, dt, &self.params);
        let ground = self.ground_height(next.x, next.z);
        next.settle(ground, &self.params);
        self.vehicle = next;

        let diff = self
            .streamer
            .update(self.vehicle.viewpoint(), &self.factory, &self.noise);
        apply_diff(sink, &diff, &self.streamer);
        self.timer.record(self.streamer.stats().update_time);

        self.camera
            .follow(self.vehicle.position(), self.vehicle.heading);

        self.frame += 1;
        FrameReport { dt, diff }
    }

    /// Put the vehicle back at the origin and drop every resident tile.
    /// The camera is left where it is and eases back over the next frames.
    pub fn reset<S: SceneSink + ?Sized>(&mut self, sink: &mut S) -> TileDiff {
        self.vehicle = VehicleState::default();
        let diff = self.streamer.clear();
        for &coord in &diff.evicted {
            sink.detach(coord);
        }
        tracing::debug!(evicted = diff.evicted.len(), "session reset");
        diff
    }

    /// Ground height the vehicle follows, from the coarse octaves.
    pub fn ground_height(&self, x: f32, z: f32) -> f32 {
        self.factory
            .profile()
            .ground_height(&self.noise, x as f64, z as f64) as f32
    }

    pub fn seed(&self) -> u32 {
        self.noise.seed()
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn config(&self) -> &TerrainConfig {
        self.factory.config()
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn camera(&self) -> &ChaseCamera {
        &self.camera
    }

    pub fn streamer(&self) -> &TileStreamer {
        &self.streamer
    }

    pub fn pool(&self) -> &ResourcePool {
        self.factory.pool()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn stream_timer(&self) -> &FrameTimer {
        &self.timer
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.seed(),
            frame: self.frame,
            speed: self.vehicle.speed_readout(),
            x: self.vehicle.x.round() as i32,
            z: self.vehicle.z.round() as i32,
            heading: self.vehicle.heading,
            resident_tiles: self.streamer.len(),
            live_resources: self.pool().live(),
        }
    }
}

/// HUD-level view of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub seed: u32,
    pub frame: u64,
    pub speed: i32,
    pub x: i32,
    pub z: i32,
    pub heading: f32,
    pub resident_tiles: usize,
    pub live_resources: usize,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "seed={} frame={} speed={} x:{} z:{} tiles={} resources={}",
            self.seed, self.frame, self.speed, self.x, self.z, self.resident_tiles, self.live_resources
        )
    }
}
