//! Rendering seam: where streamed tiles meet whatever draws them.
//!
//! # Invariants
//! - A sink mirrors tile membership; it never owns tile resources.
//! - The camera reads vehicle state and never feeds back into simulation.
//!
//! `SceneGraph` is an in-memory sink used by the CLI and tests. A GPU
//! backend implements `SceneSink` without changing the streaming code.

mod camera;
mod scene;

pub use camera::ChaseCamera;
pub use scene::{SceneGraph, SceneNode, SceneSink, apply_diff};
