use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec2;
use rand::Rng;
use terradrive_common::{TerrainConfig, TileCoord};
use terradrive_input::InputState;
use terradrive_kernel::{MAX_FRAME_DT, Session, VehicleParams};
use terradrive_noise::{HeightProfile, NoiseField};
use terradrive_render::{SceneGraph, apply_diff};
use terradrive_stream::TileStreamer;
use terradrive_terrain::{ResourcePool, TileFactory};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "terradrive-cli", about = "Headless driver for the terrain streamer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the default terrain layout
    Info,
    /// Print the default terrain and vehicle configuration as JSON
    Config,
    /// Sample the noise and height fields at a world point
    Noise {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        z: f64,
        #[arg(short, long, default_value = "0")]
        seed: u32,
    },
    /// Stream the tile window around a world point and list it
    Tiles {
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        x: f32,
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        z: f32,
        #[arg(short, long, default_value = "0")]
        seed: u32,
    },
    /// Drive a session for a number of frames
    Drive {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// Frame delta in seconds; clamped to the simulation maximum
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// World seed; random when omitted
        #[arg(short, long)]
        seed: Option<u32>,
        /// Hold the throttle for the whole run
        #[arg(long)]
        throttle: bool,
        #[arg(long, value_enum, default_value = "none")]
        steer: Steer,
        /// Emit the final summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Steer {
    None,
    Left,
    Right,
}

impl Steer {
    fn key(self) -> Option<&'static str> {
        match self {
            Steer::None => None,
            Steer::Left => Some("ArrowLeft"),
            Steer::Right => Some("ArrowRight"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let config = TerrainConfig::default();
            println!("terradrive-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "tiles: {}m, {}x{} quads, radius {} ({} resident)",
                config.chunk_size,
                config.resolution,
                config.resolution,
                config.radius,
                config.resident_tile_count()
            );
            println!(
                "props: {} slots per tile, skip chance {}",
                config.prop_slots, config.prop_skip_chance
            );
            println!("max frame dt: {MAX_FRAME_DT}s");
        }
        Commands::Config => {
            let config = TerrainConfig::default();
            config.validate()?;
            let doc = serde_json::json!({
                "terrain": config,
                "vehicle": VehicleParams::default(),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Commands::Noise { x, z, seed } => {
            let noise = NoiseField::new(seed);
            let profile = HeightProfile::from_config(&TerrainConfig::default());
            println!("seed={seed} point=({x}, {z})");
            println!("noise:  {}", noise.sample(x, z));
            println!("height: {}", profile.height(&noise, x, z));
            println!("ground: {}", profile.ground_height(&noise, x, z));
        }
        Commands::Tiles { x, z, seed } => {
            let config = TerrainConfig::default();
            let pool = ResourcePool::new();
            let mut streamer = TileStreamer::new(&config)?;
            let factory = TileFactory::new(config, pool.clone())?;
            let noise = NoiseField::new(seed);

            let viewpoint = Vec2::new(x, z);
            let diff = streamer.update(viewpoint, &factory, &noise);
            let mut scene = SceneGraph::new();
            apply_diff(&mut scene, &diff, &streamer);

            println!(
                "viewpoint ({x}, {z}) in tile {}",
                TileCoord::containing(viewpoint, factory.config().chunk_size)
            );
            print!("{}", scene.describe());
            println!(
                "resources: {} live, {} allocated, built in {:?}",
                pool.live(),
                pool.allocated(),
                streamer.stats().update_time
            );
        }
        Commands::Drive {
            frames,
            dt,
            seed,
            throttle,
            steer,
            json,
        } => {
            let seed = seed.unwrap_or_else(|| rand::thread_rng().gen_range(0..1_000_000));
            let mut session =
                Session::new(seed, TerrainConfig::default()).context("building session")?;
            let mut scene = SceneGraph::new();

            let mut input = InputState::new();
            if throttle {
                input.handle_key("w", true);
            }
            if let Some(key) = steer.key() {
                input.handle_key(key, true);
            }

            let mut created = 0;
            let mut evicted = 0;
            for frame in 0..frames {
                let report = session.frame(input.current(), dt, &mut scene);
                created += report.diff.created.len();
                evicted += report.diff.evicted.len();
                if !report.diff.is_noop() {
                    tracing::debug!(
                        frame,
                        created = report.diff.created.len(),
                        evicted = report.diff.evicted.len(),
                        "tiles streamed"
                    );
                }
                if frame > 0 && frame % 300 == 0 {
                    tracing::info!("{}", session.summary());
                }
            }

            if scene.len() != session.streamer().len() {
                anyhow::bail!(
                    "scene has {} tiles but {} are resident",
                    scene.len(),
                    session.streamer().len()
                );
            }

            let summary = session.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
                println!("tiles created={created} evicted={evicted}");
                let timer = session.stream_timer();
                println!(
                    "stream update: avg={:?} max={:?} over last {} frames",
                    timer.average(),
                    timer.max(),
                    timer.count()
                );
            }
        }
    }

    Ok(())
}
