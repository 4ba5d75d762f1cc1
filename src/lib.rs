//! Interactive tile-grid layout engine.
//!
//! Packs an ordered sequence of tiles into a six-column virtual grid with a
//! deterministic first-fit pass, and layers a drag-and-drop reorder protocol
//! plus a live-resize interaction on top. The [`Board`] owns the sequence;
//! every mutating operation re-derives a valid packed layout before anyone
//! else can observe it.

pub mod board;
pub mod catalog;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod registry;

pub use board::{
    Board, BoardConfig, DropEdge, DropTarget, EDGE_THRESHOLD, EventOutcome, LayoutObserver,
    LayoutSnapshot, MAX_HEIGHT, MAX_WIDTH, MIN_SPAN, PointerEvent, RESIZE_STEP_PX, ResizeHandle,
    classify_edge,
};
pub use catalog::{Brand, Tile, TileId, default_catalog};
pub use error::{GridError, Result};
pub use geometry::{CellRect, GridPos};
pub use layout::{COLS, InsertRule, Packed, compact, flow_position, insertion_index};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{BoardMetrics, MetricSnapshot};
pub use registry::{TileRegistry, layout_signature};
