//! The board: exclusive owner of the tile sequence and the single
//! in-flight interaction.
//!
//! All operations run to completion on the caller's thread; observers only
//! ever see a snapshot taken after a mutation has finished. Pointer events
//! that make no sense in the current state (dropping onto yourself, resizing
//! mid-drag) are ignored rather than raised, since they reflect normal
//! pointer imprecision.

mod drag;
mod resize;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::json;

use crate::catalog::{self, Tile, TileId};
use crate::error::Result;
use crate::geometry::CellRect;
use crate::layout::compact;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::BoardMetrics;
use crate::registry::{TileRegistry, layout_signature};

pub use drag::{DropEdge, DropTarget, EDGE_THRESHOLD, classify_edge};
pub use resize::{MAX_HEIGHT, MAX_WIDTH, MIN_SPAN, RESIZE_STEP_PX, ResizeHandle};

use drag::reorder_on_drop;
use resize::ResizeState;

const LOG_TARGET: &str = "tilegrid::board";

/// Configuration knobs for a board.
#[derive(Clone, Default)]
pub struct BoardConfig {
    /// Optional structured logger.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with the embedding application.
    pub metrics: Option<Arc<Mutex<BoardMetrics>>>,
}

impl BoardConfig {
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(BoardMetrics::new())));
        }
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<BoardMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Pointer/drag events delivered by the host UI layer.
#[derive(Debug, Clone)]
pub enum PointerEvent {
    DragStart {
        tile: TileId,
    },
    /// Pointer entered a tile's box; `x`/`y` are relative to that box.
    DragEnter {
        tile: TileId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Pointer left the hovered tile's box; coordinates relative to it.
    DragLeave {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Drop {
        tile: TileId,
    },
    DragEnd,
    ResizeStart {
        tile: TileId,
        handle: ResizeHandle,
        x: f64,
        y: f64,
    },
    ResizeMove {
        x: f64,
        y: f64,
    },
    ResizeEnd,
    Reset,
}

/// Whether an event changed board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Applied,
    Ignored,
}

/// The single in-flight interaction.
#[derive(Debug, Clone)]
enum Interaction {
    Idle,
    Dragging {
        tile: TileId,
        target: Option<DropTarget>,
    },
    Resizing(ResizeState),
}

/// Read-only view of the layout after a mutation, handed to observers and
/// the render boundary.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutSnapshot {
    pub tiles: Vec<Tile>,
    /// Solved footprints in sequence order; unplaced overflow tiles are
    /// absent.
    pub placements: Vec<(TileId, CellRect)>,
}

/// Callback surface for collaborators that render or mirror the layout.
/// Notifications carry whole snapshots; most recent state wins, nothing is
/// queued or replayed.
pub trait LayoutObserver: Send {
    fn layout_changed(&mut self, snapshot: &LayoutSnapshot);
}

pub struct Board {
    tiles: Vec<Tile>,
    catalog: Vec<Tile>,
    placements: HashMap<TileId, CellRect>,
    registry: TileRegistry,
    interaction: Interaction,
    observers: Vec<Box<dyn LayoutObserver>>,
    last_signature: Option<blake3::Hash>,
    config: BoardConfig,
}

impl Board {
    /// Build a board from a validated catalog and pack it once.
    pub fn new(catalog: Vec<Tile>) -> Result<Self> {
        Self::with_config(catalog, BoardConfig::default())
    }

    pub fn with_config(catalog: Vec<Tile>, config: BoardConfig) -> Result<Self> {
        catalog::validate(&catalog)?;

        let mut board = Self {
            tiles: catalog.clone(),
            catalog,
            placements: HashMap::new(),
            registry: TileRegistry::new(),
            interaction: Interaction::Idle,
            observers: Vec::new(),
            last_signature: None,
            config,
        };
        board.compact_in_place();
        board.last_signature = Some(layout_signature(&board.tiles, &board.placements));
        board.log(
            LogLevel::Info,
            "board_initialized",
            [json_kv("tiles", json!(board.tiles.len()))],
        );
        Ok(board)
    }

    /// Board seeded with the built-in tech-stack catalog.
    pub fn with_default_catalog() -> Result<Self> {
        Self::new(catalog::default_catalog())
    }

    pub fn config_mut(&mut self) -> &mut BoardConfig {
        &mut self.config
    }

    pub fn register_observer<O>(&mut self, observer: O)
    where
        O: LayoutObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Current layout order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Solved footprint for a tile, if it was placed by the last compaction.
    pub fn placement(&self, tile_id: &str) -> Option<CellRect> {
        self.placements.get(tile_id).copied()
    }

    /// Tiles whose footprint changed since the last drain, for incremental
    /// repaints.
    pub fn take_dirty(&mut self) -> Vec<(TileId, CellRect)> {
        self.registry.take_dirty()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.interaction, Interaction::Idle)
    }

    /// The active drop candidate while a drag is in flight.
    pub fn drop_target(&self) -> Option<&DropTarget> {
        match &self.interaction {
            Interaction::Dragging { target, .. } => target.as_ref(),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            tiles: self.tiles.clone(),
            placements: self
                .tiles
                .iter()
                .filter_map(|tile| {
                    self.placements
                        .get(&tile.id)
                        .map(|rect| (tile.id.clone(), *rect))
                })
                .collect(),
        }
    }

    /// Dispatch one pointer event.
    pub fn apply(&mut self, event: PointerEvent) -> EventOutcome {
        self.record_metric(BoardMetrics::record_event);
        let outcome = match event {
            PointerEvent::DragStart { tile } => self.drag_start(&tile),
            PointerEvent::DragEnter {
                tile,
                x,
                y,
                width,
                height,
            } => self.drag_enter(&tile, x, y, width, height),
            PointerEvent::DragLeave {
                x,
                y,
                width,
                height,
            } => self.drag_leave(x, y, width, height),
            PointerEvent::Drop { tile } => self.drop_on(&tile),
            PointerEvent::DragEnd => self.drag_end(),
            PointerEvent::ResizeStart { tile, handle, x, y } => {
                self.resize_start(&tile, handle, x, y)
            }
            PointerEvent::ResizeMove { x, y } => self.resize_move(x, y),
            PointerEvent::ResizeEnd => self.resize_end(),
            PointerEvent::Reset => self.reset(),
        };
        if outcome == EventOutcome::Ignored {
            self.record_metric(BoardMetrics::record_rejected);
        }
        outcome
    }

    /// Drive a scripted event sequence, for tests and benches.
    pub fn run_script<I>(&mut self, events: I)
    where
        I: IntoIterator<Item = PointerEvent>,
    {
        for event in events {
            self.apply(event);
        }
    }

    /// Begin dragging a tile. Rejected unless the board is idle.
    pub fn drag_start(&mut self, tile_id: &str) -> EventOutcome {
        if !self.is_idle() {
            self.log_rejected("drag_start", tile_id);
            return EventOutcome::Ignored;
        }
        if self.index_of(tile_id).is_none() {
            return EventOutcome::Ignored;
        }
        self.interaction = Interaction::Dragging {
            tile: tile_id.to_string(),
            target: None,
        };
        self.log(
            LogLevel::Debug,
            "drag_started",
            [json_kv("tile", json!(tile_id))],
        );
        EventOutcome::Applied
    }

    /// Recompute the drop target from the hovered tile and pointer offset.
    /// No hysteresis: every enter/move event reclassifies from scratch.
    pub fn drag_enter(
        &mut self,
        tile_id: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> EventOutcome {
        let Interaction::Dragging { tile, target } = &mut self.interaction else {
            return EventOutcome::Ignored;
        };
        if tile.as_str() == tile_id {
            return EventOutcome::Ignored;
        }
        if !self.tiles.iter().any(|t| t.id == tile_id) {
            return EventOutcome::Ignored;
        }

        let edge = classify_edge(x, y, width, height);
        *target = Some(DropTarget {
            tile: tile_id.to_string(),
            edge,
        });
        EventOutcome::Applied
    }

    /// Clear the drop target when the pointer leaves the hovered tile's box.
    pub fn drag_leave(&mut self, x: f64, y: f64, width: f64, height: f64) -> EventOutcome {
        let Interaction::Dragging { target, .. } = &mut self.interaction else {
            return EventOutcome::Ignored;
        };
        let outside = x < 0.0 || y < 0.0 || x > width || y > height;
        if outside && target.is_some() {
            *target = None;
            return EventOutcome::Applied;
        }
        EventOutcome::Ignored
    }

    /// Commit the drag onto `tile_id` using the recorded drop edge, then
    /// recompact. Any invalid combination falls back to idle untouched.
    pub fn drop_on(&mut self, tile_id: &str) -> EventOutcome {
        let Interaction::Dragging { tile, target } = &self.interaction else {
            return EventOutcome::Ignored;
        };

        let dragged_id = tile.clone();
        let edge = target.as_ref().map(|t| t.edge);

        // Self-drop, missing drop target, or unknown ids: back to idle, no
        // mutation.
        let commit = match edge {
            Some(edge) if dragged_id != tile_id => {
                match (self.index_of(&dragged_id), self.index_of(tile_id)) {
                    (Some(dragged), Some(target)) => Some((dragged, target, edge)),
                    _ => None,
                }
            }
            _ => None,
        };

        self.interaction = Interaction::Idle;

        let Some((dragged, target, edge)) = commit else {
            self.log_rejected("drop", tile_id);
            return EventOutcome::Ignored;
        };

        self.tiles = reorder_on_drop(&self.tiles, dragged, target, edge);
        self.compact_in_place();
        self.record_metric(BoardMetrics::record_drop);
        self.log(
            LogLevel::Info,
            "tile_dropped",
            [
                json_kv("tile", json!(dragged_id)),
                json_kv("onto", json!(tile_id)),
                json_kv("edge", json!(edge.as_str())),
            ],
        );
        self.notify_observers();
        EventOutcome::Applied
    }

    /// Abandon a drag with no drop. No mutation.
    pub fn drag_end(&mut self) -> EventOutcome {
        if !matches!(self.interaction, Interaction::Dragging { .. }) {
            return EventOutcome::Ignored;
        }
        self.interaction = Interaction::Idle;
        EventOutcome::Applied
    }

    /// Begin resizing a tile by one of its handles. Rejected unless idle.
    pub fn resize_start(
        &mut self,
        tile_id: &str,
        handle: ResizeHandle,
        x: f64,
        y: f64,
    ) -> EventOutcome {
        if !self.is_idle() {
            self.log_rejected("resize_start", tile_id);
            return EventOutcome::Ignored;
        }
        let Some(index) = self.index_of(tile_id) else {
            return EventOutcome::Ignored;
        };

        let tile = &self.tiles[index];
        self.interaction = Interaction::Resizing(ResizeState {
            tile: tile.id.clone(),
            handle,
            origin_x: x,
            origin_y: y,
            start_width: tile.width,
            start_height: tile.height,
        });
        self.log(
            LogLevel::Debug,
            "resize_started",
            [
                json_kv("tile", json!(tile_id)),
                json_kv("handle", json!(handle.as_str())),
            ],
        );
        EventOutcome::Applied
    }

    /// Recompute the live spans from the captured origin. Purely a
    /// recomputation; no compaction happens until the resize ends.
    pub fn resize_move(&mut self, x: f64, y: f64) -> EventOutcome {
        let Interaction::Resizing(state) = &self.interaction else {
            return EventOutcome::Ignored;
        };

        let (width, height) = state.spans_for(x, y);
        let tile_id = state.tile.clone();
        let Some(index) = self.index_of(&tile_id) else {
            return EventOutcome::Ignored;
        };

        let tile = &mut self.tiles[index];
        if tile.width == width && tile.height == height {
            return EventOutcome::Ignored;
        }
        tile.width = width;
        tile.height = height;
        self.notify_observers();
        EventOutcome::Applied
    }

    /// Finish the resize and recompact the full sequence.
    pub fn resize_end(&mut self) -> EventOutcome {
        let Interaction::Resizing(state) = &self.interaction else {
            return EventOutcome::Ignored;
        };
        let tile_id = state.tile.clone();
        self.interaction = Interaction::Idle;

        self.compact_in_place();
        self.record_metric(BoardMetrics::record_resize);
        self.log(
            LogLevel::Info,
            "resize_committed",
            [json_kv("tile", json!(tile_id))],
        );
        self.notify_observers();
        EventOutcome::Applied
    }

    /// Restore the original catalog order. The catalog is authored
    /// pre-packed, but recompacting is harmless and keeps placements
    /// authoritative.
    pub fn reset(&mut self) -> EventOutcome {
        self.interaction = Interaction::Idle;
        self.tiles = self.catalog.clone();
        self.compact_in_place();
        self.log(LogLevel::Info, "layout_reset", std::iter::empty());
        self.notify_observers();
        EventOutcome::Applied
    }

    fn index_of(&self, tile_id: &str) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.id == tile_id)
    }

    fn compact_in_place(&mut self) {
        let packed = compact(&self.tiles);
        if !packed.overflow.is_empty() {
            self.log(
                LogLevel::Warn,
                "tiles_overflowed",
                [json_kv("tiles", json!(packed.overflow.clone()))],
            );
        }
        self.tiles = packed.tiles;
        self.placements = packed.placements;
        self.registry.sync_placements(&self.placements);
        self.record_metric(BoardMetrics::record_compaction);
    }

    fn notify_observers(&mut self) {
        let signature = layout_signature(&self.tiles, &self.placements);
        if self.last_signature == Some(signature) {
            return;
        }
        self.last_signature = Some(signature);

        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.layout_changed(&snapshot);
        }
    }

    fn record_metric(&self, record: impl FnOnce(&mut BoardMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut guard);
            }
        }
    }

    fn log_rejected(&self, operation: &str, tile_id: &str) {
        self.log(
            LogLevel::Debug,
            "interaction_rejected",
            [
                json_kv("operation", json!(operation)),
                json_kv("tile", json!(tile_id)),
            ],
        );
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}
