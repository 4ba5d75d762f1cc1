//! Live-resize math for the drag handles.

use crate::catalog::TileId;

/// Pixels of pointer travel per grid unit.
pub const RESIZE_STEP_PX: f64 = 80.0;

pub const MIN_SPAN: u16 = 1;
pub const MAX_WIDTH: u16 = 4;
pub const MAX_HEIGHT: u16 = 3;

/// Which handle the resize was grabbed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    /// Corner handle: adjusts both axes.
    SouthEast,
    /// Right edge: width only.
    East,
    /// Bottom edge: height only.
    South,
}

impl ResizeHandle {
    pub fn affects_width(&self) -> bool {
        matches!(self, ResizeHandle::SouthEast | ResizeHandle::East)
    }

    pub fn affects_height(&self) -> bool {
        matches!(self, ResizeHandle::SouthEast | ResizeHandle::South)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeHandle::SouthEast => "se",
            ResizeHandle::East => "e",
            ResizeHandle::South => "s",
        }
    }
}

/// In-flight resize: pointer origin and starting spans, captured at
/// `resize_start` and never mutated. Moves recompute from here, so event
/// order within a resize cannot drift the result.
#[derive(Debug, Clone)]
pub(crate) struct ResizeState {
    pub tile: TileId,
    pub handle: ResizeHandle,
    pub origin_x: f64,
    pub origin_y: f64,
    pub start_width: u16,
    pub start_height: u16,
}

impl ResizeState {
    pub fn spans_for(&self, pointer_x: f64, pointer_y: f64) -> (u16, u16) {
        let mut width = self.start_width;
        let mut height = self.start_height;

        if self.handle.affects_width() {
            width = resized_span(self.start_width, pointer_x - self.origin_x, MAX_WIDTH);
        }
        if self.handle.affects_height() {
            height = resized_span(self.start_height, pointer_y - self.origin_y, MAX_HEIGHT);
        }

        (width, height)
    }
}

// Halves round toward positive infinity, so dragging exactly half a step
// backwards does not yet shrink the tile.
fn steps(delta: f64) -> i64 {
    (delta / RESIZE_STEP_PX + 0.5).floor() as i64
}

pub(crate) fn resized_span(start: u16, delta: f64, max: u16) -> u16 {
    let span = i64::from(start) + steps(delta);
    span.clamp(i64::from(MIN_SPAN), i64::from(max)) as u16
}
