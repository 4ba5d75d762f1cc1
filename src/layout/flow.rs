//! Declared-order position walk.
//!
//! Re-derives a tile's row/column from the sequence alone by accumulating
//! column usage and wrapping past `COLS`. This is the authoritative "where
//! is this tile visually" function for drop-zone math. It is independent of
//! the packer's occupancy grid and can disagree with it for pathological
//! sequences (e.g. a prefix that fills a row exactly leaves the walk at
//! column `COLS` instead of wrapping); that divergence is a documented
//! property of the protocol, not something to silently repair here.

use crate::catalog::Tile;
use crate::geometry::GridPos;
use crate::layout::COLS;

/// Where the walk places the tile at `index` in the current sequence.
///
/// Wrapping advances the row by the *previous* tile's height (1 when the
/// wrap happens at the front of the sequence).
pub fn flow_position(tiles: &[Tile], index: usize) -> GridPos {
    let mut row: u16 = 0;
    let mut col: u16 = 0;

    for i in 0..index.min(tiles.len()) {
        col += tiles[i].width;
        if col > COLS {
            row += if i > 0 { tiles[i - 1].height } else { 1 };
            col = tiles[i].width;
        }
    }

    GridPos::new(row, col)
}

/// How an insertion scan decides it has reached the target position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertRule {
    /// Stop at the first tile whose accumulated row is at or past the
    /// target row.
    Before,
    /// Stop at the first tile whose accumulated row and column have both
    /// reached the target cell.
    Replace,
}

/// Index at which a tile should be spliced into `tiles` to land at `target`.
///
/// Walks the sequence with the same column-accumulation scheme as
/// [`flow_position`], except the row advances by the *current* tile's height
/// on wrap. The asymmetry between the two walks is intentional and load
/// bearing for drop placement.
pub fn insertion_index(tiles: &[Tile], rule: InsertRule, target: GridPos) -> usize {
    let mut index = 0;
    let mut row: u16 = 0;
    let mut col: u16 = 0;

    for (i, tile) in tiles.iter().enumerate() {
        let reached = match rule {
            InsertRule::Before => row >= target.row,
            InsertRule::Replace => row >= target.row && col >= target.col,
        };
        if reached {
            break;
        }

        col += tile.width;
        if col > COLS {
            row += tile.height;
            col = tile.width;
        }

        index = i + 1;
    }

    index
}
