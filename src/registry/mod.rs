//! Registry module orchestrator.
//!
//! Placement tracking and the layout signature live in the private `core`
//! module; consumers import them from here.

mod core;

pub use core::{TileRegistry, TileState, layout_signature};
