//! Layout module orchestrator.
//!
//! Two position-computation paths live here on purpose. The `packer` solves
//! actual occupancy with a first-fit scan over a scratch grid; the `flow`
//! walk re-derives row/column from declared sequence order alone and backs
//! the drop-zone math. The two are not proven equivalent for every sequence
//! and must stay separate named functions rather than being merged.

pub mod flow;
mod packer;

pub use flow::{InsertRule, flow_position, insertion_index};
pub use packer::{COLS, Packed, compact};
