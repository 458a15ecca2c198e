//! Streaming: keeps exactly the tiles around the viewpoint resident.
//!
//! # Invariants
//! - After every update the resident set equals the window around the
//!   viewpoint's tile, no more and no fewer.
//! - An update from an unchanged tile creates and evicts nothing.
//! - Evicted tiles release their resources during the update that evicts them.

mod streamer;
mod window;

pub use streamer::{FrameTimer, StreamStats, TileDiff, TileStreamer};
pub use window::StreamWindow;
