//! Catalog module orchestrator.
//!
//! The tile type, the built-in default catalog, and catalog validation live
//! in the private `core` module; consumers import them from here.

mod core;

pub use core::{Brand, Tile, TileId, default_catalog, from_json_str, validate};
