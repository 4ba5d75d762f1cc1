//! Drop-edge classification and reorder commit for the drag protocol.

use crate::catalog::{Tile, TileId};
use crate::layout::{InsertRule, flow_position, insertion_index};

/// Fraction of the hovered tile's box that counts as an edge zone.
pub const EDGE_THRESHOLD: f64 = 0.25;

/// Where within the hovered tile the pointer sits, disambiguating reorder
/// intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEdge {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

impl DropEdge {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropEdge::Top => "top",
            DropEdge::Bottom => "bottom",
            DropEdge::Left => "left",
            DropEdge::Right => "right",
            DropEdge::Center => "center",
        }
    }
}

/// The currently hovered drop candidate, recomputed on every enter event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub tile: TileId,
    pub edge: DropEdge,
}

/// Classify the pointer position within a tile's bounding box.
///
/// Comparisons are strict: a pointer exactly on a threshold falls through
/// to the next zone. Vertical zones are checked before horizontal ones, so
/// the corners of the box resolve to top/bottom; that asymmetry is part of
/// the protocol.
pub fn classify_edge(x: f64, y: f64, width: f64, height: f64) -> DropEdge {
    if y < height * EDGE_THRESHOLD {
        DropEdge::Top
    } else if y > height * (1.0 - EDGE_THRESHOLD) {
        DropEdge::Bottom
    } else if x < width * EDGE_THRESHOLD {
        DropEdge::Left
    } else if x > width * (1.0 - EDGE_THRESHOLD) {
        DropEdge::Right
    } else {
        DropEdge::Center
    }
}

/// Reorder `tiles` for a drop of the tile at `dragged` onto the tile at
/// `target` with edge `edge`. Returns the intended order only; the caller
/// re-runs compaction to resolve actual occupancy.
///
/// Indices must be valid and distinct; the board guarantees that before
/// committing.
pub(crate) fn reorder_on_drop(
    tiles: &[Tile],
    dragged: usize,
    target: usize,
    edge: DropEdge,
) -> Vec<Tile> {
    let dragged_tile = tiles[dragged].clone();
    let target_tile = &tiles[target];
    let target_pos = flow_position(tiles, target);

    if edge == DropEdge::Center {
        // Plain positional move, no row/column reasoning.
        let mut out = tiles.to_vec();
        out.remove(dragged);
        let adjusted = if target > dragged { target - 1 } else { target };
        out.insert(adjusted, dragged_tile);
        return out;
    }

    let (rule, row, col) = match edge {
        DropEdge::Top => (InsertRule::Before, target_pos.row, 0),
        DropEdge::Bottom => (
            InsertRule::Before,
            target_pos.row + target_tile.height,
            0,
        ),
        DropEdge::Left => (
            InsertRule::Replace,
            target_pos.row,
            target_pos.col.saturating_sub(dragged_tile.width),
        ),
        DropEdge::Right => (
            InsertRule::Replace,
            target_pos.row,
            target_pos.col + target_tile.width,
        ),
        DropEdge::Center => unreachable!("handled above"),
    };

    let mut out: Vec<Tile> = tiles
        .iter()
        .filter(|tile| tile.id != dragged_tile.id)
        .cloned()
        .collect();
    let index = insertion_index(&out, rule, crate::geometry::GridPos::new(row, col));
    out.insert(index, dragged_tile);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Brand;

    fn tile(id: &str, width: u16, height: u16) -> Tile {
        Tile::new(id, id, Brand::new("#000", "#000", "#fff"), id, width, height)
    }

    fn ids(tiles: &[Tile]) -> Vec<&str> {
        tiles.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn vertical_zones_win_over_horizontal() {
        // Corner pointer: inside both the top and left bands.
        assert_eq!(classify_edge(10.0, 10.0, 100.0, 100.0), DropEdge::Top);
        assert_eq!(classify_edge(10.0, 90.0, 100.0, 100.0), DropEdge::Bottom);
    }

    #[test]
    fn thresholds_are_strict_on_both_sides() {
        let (w, h) = (100.0, 100.0);

        assert_eq!(classify_edge(50.0, 24.0, w, h), DropEdge::Top);
        assert_eq!(classify_edge(50.0, 25.0, w, h), DropEdge::Center);

        assert_eq!(classify_edge(50.0, 76.0, w, h), DropEdge::Bottom);
        assert_eq!(classify_edge(50.0, 75.0, w, h), DropEdge::Center);

        assert_eq!(classify_edge(24.0, 50.0, w, h), DropEdge::Left);
        assert_eq!(classify_edge(25.0, 50.0, w, h), DropEdge::Center);

        assert_eq!(classify_edge(76.0, 50.0, w, h), DropEdge::Right);
        assert_eq!(classify_edge(75.0, 50.0, w, h), DropEdge::Center);
    }

    #[test]
    fn drop_top_moves_dragged_before_target_row() {
        let tiles = vec![tile("a", 2, 2), tile("b", 2, 1), tile("c", 2, 1)];
        let out = reorder_on_drop(&tiles, 2, 0, DropEdge::Top);
        assert_eq!(ids(&out), vec!["c", "a", "b"]);
    }

    #[test]
    fn drop_bottom_moves_dragged_past_target_footprint() {
        let tiles = vec![tile("a", 4, 1), tile("b", 4, 1), tile("c", 4, 1)];
        // The flow walk puts b at (0, 4), so bottom targets row 1; replaying
        // the remaining [b, c] never reaches row 1 before the walk runs out,
        // so a lands at the end.
        let out = reorder_on_drop(&tiles, 0, 1, DropEdge::Bottom);
        assert_eq!(ids(&out), vec!["b", "c", "a"]);
    }

    #[test]
    fn drop_left_inserts_at_shifted_column() {
        let tiles = vec![tile("a", 2, 1), tile("b", 2, 1), tile("c", 2, 1)];
        // c (width 2) dropped left of b (col 2) targets col 0.
        let out = reorder_on_drop(&tiles, 2, 1, DropEdge::Left);
        assert_eq!(ids(&out), vec!["c", "a", "b"]);
    }

    #[test]
    fn drop_right_inserts_past_target() {
        let tiles = vec![tile("a", 2, 1), tile("b", 2, 1), tile("c", 2, 1)];
        // a dropped right of b targets col 4. With a removed, the walk over
        // [b, c] only reaches col 4 after accumulating c, so a goes last.
        let out = reorder_on_drop(&tiles, 0, 1, DropEdge::Right);
        assert_eq!(ids(&out), vec!["b", "c", "a"]);
    }

    #[test]
    fn drop_center_is_a_plain_list_move() {
        let tiles = vec![tile("a", 1, 1), tile("b", 1, 1), tile("c", 1, 1)];

        // Dragging forward shifts the target index down by one.
        let forward = reorder_on_drop(&tiles, 0, 2, DropEdge::Center);
        assert_eq!(ids(&forward), vec!["b", "a", "c"]);

        let backward = reorder_on_drop(&tiles, 2, 0, DropEdge::Center);
        assert_eq!(ids(&backward), vec!["c", "a", "b"]);
    }

    #[test]
    fn reorder_preserves_tile_set() {
        let tiles = vec![tile("a", 2, 2), tile("b", 2, 1), tile("c", 1, 1)];
        for edge in [
            DropEdge::Top,
            DropEdge::Bottom,
            DropEdge::Left,
            DropEdge::Right,
            DropEdge::Center,
        ] {
            let out = reorder_on_drop(&tiles, 1, 2, edge);
            let mut sorted = ids(&out);
            sorted.sort();
            assert_eq!(sorted, vec!["a", "b", "c"], "edge {edge:?}");
        }
    }
}
