//! Property/fuzz-style invariants for the tile-grid engine.
//!
//! Random pointer-event streams run against the public Board API, asserting
//! the packing invariants (no overlap, column bounds, multiset preservation,
//! idempotent compaction) after every mutation. A second group probes the
//! two independent position derivations (packed occupancy vs. the
//! declared-order flow walk) and pins down where they are known to agree.

use proptest::prelude::*;
use tilegrid::{
    Board, Brand, COLS, DropEdge, PointerEvent, ResizeHandle, Tile, classify_edge, compact,
    flow_position,
};

#[derive(Debug, Clone)]
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    fn next_range(&mut self, min: u64, max: u64) -> u64 {
        debug_assert!(min <= max);
        if min == max {
            return min;
        }
        min + self.next_u64() % (max - min + 1)
    }

    fn choose_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        (self.next_u64() % len as u64) as usize
    }
}

fn random_catalog(rng: &mut Lcg) -> Vec<Tile> {
    let count = rng.next_range(2, 12) as usize;
    (0..count)
        .map(|i| {
            Tile::new(
                &format!("tile-{i}"),
                &format!("Tile {i}"),
                Brand::new("#000000", "#111111", "#ffffff"),
                "icon",
                rng.next_range(1, 4) as u16,
                rng.next_range(1, 3) as u16,
            )
        })
        .collect()
}

fn random_handle(rng: &mut Lcg) -> ResizeHandle {
    match rng.next_u64() % 3 {
        0 => ResizeHandle::SouthEast,
        1 => ResizeHandle::East,
        _ => ResizeHandle::South,
    }
}

fn random_events(board: &Board, rng: &mut Lcg) -> Vec<PointerEvent> {
    let ids: Vec<String> = board.tiles().iter().map(|t| t.id.clone()).collect();
    let dragged = ids[rng.choose_index(ids.len())].clone();
    let target = ids[rng.choose_index(ids.len())].clone();

    match rng.next_u64() % 4 {
        0 => vec![
            PointerEvent::DragStart { tile: dragged },
            PointerEvent::DragEnter {
                tile: target.clone(),
                x: rng.next_range(0, 100) as f64,
                y: rng.next_range(0, 100) as f64,
                width: 100.0,
                height: 100.0,
            },
            PointerEvent::Drop { tile: target },
        ],
        1 => vec![
            PointerEvent::ResizeStart {
                tile: dragged,
                handle: random_handle(rng),
                x: 0.0,
                y: 0.0,
            },
            PointerEvent::ResizeMove {
                x: rng.next_range(0, 500) as f64 - 250.0,
                y: rng.next_range(0, 500) as f64 - 250.0,
            },
            PointerEvent::ResizeEnd,
        ],
        2 => vec![
            PointerEvent::DragStart { tile: dragged },
            PointerEvent::DragEnter {
                tile: target,
                x: 50.0,
                y: 50.0,
                width: 100.0,
                height: 100.0,
            },
            PointerEvent::DragEnd,
        ],
        _ => vec![PointerEvent::Reset],
    }
}

fn assert_board_invariants(board: &Board, expected_ids: &[String]) {
    let tiles = board.tiles();

    let mut actual: Vec<_> = tiles.iter().map(|t| t.id.clone()).collect();
    actual.sort();
    let mut expected = expected_ids.to_vec();
    expected.sort();
    assert_eq!(actual, expected, "tile set must be preserved");

    let placed: Vec<_> = tiles
        .iter()
        .filter_map(|t| board.placement(&t.id).map(|rect| (t.id.clone(), rect)))
        .collect();
    for (i, (id_a, a)) in placed.iter().enumerate() {
        assert!(a.right() <= COLS, "tile {id_a} exceeds the column bound");
        for (id_b, b) in placed.iter().skip(i + 1) {
            assert!(!a.intersects(b), "tiles {id_a} and {id_b} overlap");
        }
    }

    let once = compact(tiles);
    let twice = compact(&once.tiles);
    assert_eq!(once.tiles, twice.tiles, "compaction must be idempotent");
    assert_eq!(once.placements, twice.placements);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_event_streams_preserve_invariants(
        seed in any::<u64>(),
        rounds in 5usize..40,
    ) {
        let mut rng = Lcg::new(seed);
        let catalog = random_catalog(&mut rng);
        let ids: Vec<String> = catalog.iter().map(|t| t.id.clone()).collect();

        let mut board = Board::new(catalog).expect("random catalog is valid");
        assert_board_invariants(&board, &ids);

        for round in 0..rounds {
            let events = random_events(&board, &mut rng);
            board.run_script(events);
            assert!(board.is_idle(), "round {round} left an interaction open");
            assert_board_invariants(&board, &ids);
        }
    }

    #[test]
    fn edge_classification_is_total_and_strict(
        x in 0.0f64..100.0,
        y in 0.0f64..100.0,
    ) {
        let edge = classify_edge(x, y, 100.0, 100.0);
        // Re-derive from the definition.
        let expected = if y < 25.0 {
            DropEdge::Top
        } else if y > 75.0 {
            DropEdge::Bottom
        } else if x < 25.0 {
            DropEdge::Left
        } else if x > 75.0 {
            DropEdge::Right
        } else {
            DropEdge::Center
        };
        prop_assert_eq!(edge, expected);
    }

    // The packer and the flow walk are separate derivations by design and
    // are not equivalent for every sequence. They do agree on a leading
    // run of tiles that share one height and fill rows without overhang,
    // which is exactly the regime drop-zone math relies on.
    #[test]
    fn flow_walk_matches_packer_on_uniform_rows(
        seed in any::<u64>(),
    ) {
        let mut rng = Lcg::new(seed);
        let height = rng.next_range(1, 3) as u16;
        let count = rng.next_range(1, 12) as usize;

        let mut tiles = Vec::new();
        let mut col = 0u16;
        for i in 0..count {
            let remaining = COLS - col;
            let width = rng.next_range(1, remaining.min(4) as u64) as u16;
            tiles.push(Tile::new(
                &format!("t{i}"),
                "t",
                Brand::new("#000000", "#111111", "#ffffff"),
                "icon",
                width,
                height,
            ));
            col += width;
            if col == COLS {
                col = 0;
            }
        }
        // Drop a trailing partial row so every row is exactly full.
        while col != 0 {
            let tile = tiles.pop().expect("partial row implies a tile");
            col = (col + COLS - tile.width) % COLS;
        }
        prop_assume!(!tiles.is_empty());

        let packed = compact(&tiles);
        for index in 0..tiles.len() {
            let flow = flow_position(&tiles, index);
            let rect = packed.placements[&tiles[index].id];
            // The walk reports column COLS at an exact row boundary where
            // the packer wraps; every other position agrees.
            if flow.col < COLS {
                prop_assert_eq!((flow.row, flow.col), (rect.row, rect.col));
            } else {
                prop_assert_eq!(rect.col, 0);
            }
        }
    }

    #[test]
    fn flow_walk_stays_in_bounds_and_monotonic(
        seed in any::<u64>(),
    ) {
        let mut rng = Lcg::new(seed);
        let tiles = random_catalog(&mut rng);

        let mut last_row = 0u16;
        for index in 0..tiles.len() {
            let pos = flow_position(&tiles, index);
            prop_assert!(pos.col <= COLS);
            prop_assert!(pos.row >= last_row, "rows must never decrease");
            last_row = pos.row;
        }
    }
}
