//! Driving input: raw keys map to actions, actions fold into held state.
//!
//! # Invariants
//! - The simulator consumes `DriveInput`, never raw key events.

pub mod action;

pub use action::{DriveAction, DriveInput, InputState};
