use serde::{Deserialize, Serialize};

/// A position on the virtual grid, in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: u16,
    pub col: u16,
}

impl GridPos {
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

/// A placed tile footprint: top-left cell plus span, all in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    pub row: u16,
    pub col: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    pub fn new(row: u16, col: u16, width: u16, height: u16) -> Self {
        Self {
            row,
            col,
            width,
            height,
        }
    }

    /// First column past the right edge.
    pub fn right(&self) -> u16 {
        self.col.saturating_add(self.width)
    }

    /// First row past the bottom edge.
    pub fn bottom(&self) -> u16 {
        self.row.saturating_add(self.height)
    }

    pub fn origin(&self) -> GridPos {
        GridPos::new(self.row, self.col)
    }

    pub fn intersects(&self, other: &CellRect) -> bool {
        self.col < other.right()
            && other.col < self.right()
            && self.row < other.bottom()
            && other.row < self.bottom()
    }
}
