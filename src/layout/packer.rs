use std::collections::HashMap;

use crate::catalog::{Tile, TileId};
use crate::geometry::{CellRect, GridPos};

/// Fixed column count of the virtual grid.
pub const COLS: u16 = 6;

/// Result of a compaction pass.
///
/// `tiles` is the output sequence (same multiset as the input; order equals
/// input order). `placements` maps each placed tile to its solved footprint.
/// Tiles that could not be placed are listed in `overflow` and carry no
/// placement; that is a degraded-layout fallback, never an error.
#[derive(Debug, Clone)]
pub struct Packed {
    pub tiles: Vec<Tile>,
    pub placements: HashMap<TileId, CellRect>,
    pub overflow: Vec<TileId>,
}

/// Scratch occupancy matrix: `COLS` columns, rows grown on demand.
/// Cells hold the sequence index of the occupying tile. Not retained
/// between compaction runs.
struct Occupancy {
    rows: Vec<[Option<usize>; COLS as usize]>,
}

impl Occupancy {
    fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Rows at or beyond the current height count as empty.
    fn fits(&self, row: u16, col: u16, width: u16, height: u16) -> bool {
        if col + width > COLS {
            return false;
        }
        for r in row..row + height {
            let Some(cells) = self.rows.get(r as usize) else {
                break;
            };
            for c in col..col + width {
                if cells[c as usize].is_some() {
                    return false;
                }
            }
        }
        true
    }

    fn mark(&mut self, index: usize, row: u16, col: u16, width: u16, height: u16) {
        for r in row..row + height {
            while self.rows.len() <= r as usize {
                self.rows.push([None; COLS as usize]);
            }
            for c in col..col + width {
                self.rows[r as usize][c as usize] = Some(index);
            }
        }
    }

    /// First valid candidate in row-major scan order, or `None` when the
    /// tile cannot fit on any row (only possible for widths past `COLS`).
    fn place(&mut self, index: usize, width: u16, height: u16) -> Option<GridPos> {
        if width == 0 || width > COLS || height == 0 {
            return None;
        }
        // A fully empty row always exists at rows.len(), so the scan is bounded.
        for row in 0..=self.rows.len() as u16 {
            for col in 0..=COLS - width {
                if self.fits(row, col, width, height) {
                    self.mark(index, row, col, width, height);
                    return Some(GridPos::new(row, col));
                }
            }
        }
        None
    }
}

/// First-fit top-left compaction over the tile sequence.
///
/// Tiles are offered to the grid in sequence order; order is the tie-break
/// and is preserved, never re-sorted. The first valid candidate cell in
/// row-major scan order wins, which makes the pass deterministic and
/// idempotent: compacting an already-compacted sequence changes nothing.
/// This is a shelf-packing heuristic, not optimal bin packing; it trades
/// density for reproducibility.
pub fn compact(tiles: &[Tile]) -> Packed {
    let mut grid = Occupancy::new();
    let mut out = Vec::with_capacity(tiles.len());
    let mut placements = HashMap::with_capacity(tiles.len());
    let mut overflow = Vec::new();

    for (index, tile) in tiles.iter().enumerate() {
        match grid.place(index, tile.width, tile.height) {
            Some(pos) => {
                placements.insert(
                    tile.id.clone(),
                    CellRect::new(pos.row, pos.col, tile.width, tile.height),
                );
            }
            None => overflow.push(tile.id.clone()),
        }
        out.push(tile.clone());
    }

    Packed {
        tiles: out,
        placements,
        overflow,
    }
}
