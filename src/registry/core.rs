use std::collections::{HashMap, HashSet};

use blake3::Hash;

use crate::catalog::{Tile, TileId};
use crate::geometry::CellRect;

/// Last known placement for a tile.
#[derive(Debug, Clone)]
pub struct TileState {
    pub rect: CellRect,
    pub is_dirty: bool,
}

impl TileState {
    fn new(rect: CellRect) -> Self {
        Self {
            rect,
            is_dirty: true,
        }
    }
}

/// Registry mapping tiles to their last solved footprints.
///
/// After each compaction the board syncs the solved placements in; the
/// render boundary drains `take_dirty` to repaint only the tiles that moved.
#[derive(Debug, Default)]
pub struct TileRegistry {
    entries: HashMap<TileId, TileState>,
    dirty: HashSet<TileId>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync_placements(&mut self, placements: &HashMap<TileId, CellRect>) {
        use std::collections::hash_map::Entry;

        let mut newly_dirty = Vec::new();

        for (id, rect) in placements {
            match self.entries.entry(id.clone()) {
                Entry::Occupied(mut entry) => {
                    let state = entry.get_mut();
                    if state.rect != *rect {
                        state.rect = *rect;
                        state.is_dirty = true;
                        newly_dirty.push(id.clone());
                    }
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(TileState::new(*rect));
                    newly_dirty.push(id.clone());
                }
            }
        }

        // Drop tiles that fell out of the placement map (overflow fallback
        // or a wholesale catalog replacement).
        let to_remove: Vec<_> = self
            .entries
            .keys()
            .filter(|id| !placements.contains_key(*id))
            .cloned()
            .collect();
        for id in to_remove {
            self.entries.remove(&id);
            self.dirty.remove(&id);
        }

        for id in newly_dirty {
            self.dirty.insert(id);
        }
    }

    pub fn take_dirty(&mut self) -> Vec<(TileId, CellRect)> {
        let ids: Vec<_> = self.dirty.drain().collect();
        ids.into_iter()
            .filter_map(|id| {
                self.entries.get_mut(&id).map(|state| {
                    state.is_dirty = false;
                    (id.clone(), state.rect)
                })
            })
            .collect()
    }

    pub fn rect_of(&self, tile_id: &str) -> Option<CellRect> {
        self.entries.get(tile_id).map(|state| state.rect)
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Content hash of a layout: sequence order, tile dimensions, and solved
/// placements. Two layouts with the same signature render identically, so
/// the board uses this to skip redundant observer notifications.
pub fn layout_signature(tiles: &[Tile], placements: &HashMap<TileId, CellRect>) -> Hash {
    let mut hasher = blake3::Hasher::new();
    for tile in tiles {
        hasher.update(tile.id.as_bytes());
        hasher.update(&tile.width.to_le_bytes());
        hasher.update(&tile.height.to_le_bytes());
        match placements.get(&tile.id) {
            Some(rect) => {
                hasher.update(&[1]);
                hasher.update(&rect.row.to_le_bytes());
                hasher.update(&rect.col.to_le_bytes());
            }
            // Unplaced overflow tiles still contribute to the signature.
            None => {
                hasher.update(&[0]);
            }
        }
    }
    hasher.finalize()
}
