//! Kernel: vehicle simulation and the session that drives each frame.
//!
//! # Invariants
//! - Frame order is fixed: simulate, stream and register tiles, place the
//!   camera. Drawing is left to the caller.
//! - All session state lives in `Session`; there are no globals.
//! - Frame delta is clamped before it reaches the simulator.

pub mod session;
pub mod vehicle;

pub use session::{FrameReport, MAX_FRAME_DT, Session, SessionSummary, clamp_dt};
pub use vehicle::{VehicleParams, VehicleState};
