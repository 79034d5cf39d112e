//! Property tests for the rotation indexer, placement and collapse

use proptest::prelude::*;

use blockfall::core::pieces::{self, ActivePiece};
use blockfall::core::{Field, Session};
use blockfall::types::{Cell, InputSignals, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    (0usize..7).prop_map(|i| PieceKind::ALL[i])
}

proptest! {
    #[test]
    fn rotation_is_periodic(col in 0usize..4, row in 0usize..4, steps in 0u32..1_000) {
        prop_assert_eq!(
            pieces::rotated_index(col, row, Rotation::from_steps(steps)),
            pieces::rotated_index(col, row, Rotation::from_steps(steps + 4))
        );
    }

    #[test]
    fn rotated_index_stays_in_box(col in 0usize..4, row in 0usize..4, steps in 0u32..4) {
        prop_assert!(pieces::rotated_index(col, row, Rotation::from_steps(steps)) < 16);
    }

    #[test]
    fn fits_matches_cell_by_cell_check(
        kind in kind_strategy(),
        steps in 0u32..4,
        x in -4i8..14,
        y in -4i8..20,
        blocks in prop::collection::vec((1i8..11, 0i8..17), 0..30),
    ) {
        let mut field = Field::new();
        for &(bx, by) in &blocks {
            field.set(bx, by, Cell::Block(PieceKind::O));
        }
        let rotation = Rotation::from_steps(steps);
        let expected = pieces::cells(kind, rotation).all(|(dx, dy)| {
            let (fx, fy) = (x + dx, y + dy);
            fx >= 0
                && fy >= 0
                && fx < FIELD_WIDTH as i8
                && fy < FIELD_HEIGHT as i8
                && !blocks.contains(&(fx, fy))
                && fx != 0
                && fx != FIELD_WIDTH as i8 - 1
                && fy != FIELD_HEIGHT as i8 - 1
        });
        prop_assert_eq!(field.fits(kind, rotation, x, y), expected);
    }

    #[test]
    fn lock_changes_only_piece_cells(
        kind in kind_strategy(),
        steps in 0u32..4,
        x in -2i8..10,
        y in -2i8..16,
    ) {
        let mut field = Field::new();
        let piece = ActivePiece { kind, rotation: Rotation::from_steps(steps), x, y };
        let before = field.clone();
        let fits = field.fits_piece(&piece);
        prop_assert_eq!(field.lock(&piece), fits);

        let changed = field
            .cells()
            .iter()
            .zip(before.cells())
            .filter(|(a, b)| a != b)
            .count();
        prop_assert_eq!(changed, if fits { 4 } else { 0 });
    }

    #[test]
    fn collapse_removes_exactly_the_marked_rows(
        full in prop::collection::btree_set(0i8..17, 1..5),
        noise in prop::collection::vec((1i8..11, 0i8..17), 0..40),
    ) {
        let mut field = Field::new();
        for &(nx, ny) in &noise {
            if !full.contains(&ny) {
                field.set(nx, ny, Cell::Block(PieceKind::T));
            }
        }
        // Keep every other row incomplete.
        for y in 0..17i8 {
            if !full.contains(&y) {
                field.set(1, y, Cell::Empty);
            }
        }
        for &y in &full {
            for fx in 1..11 {
                field.set(fx, y, Cell::Block(PieceKind::I));
            }
        }

        let survivors: Vec<Vec<Cell>> = (0..17usize)
            .filter(|y| !full.contains(&(*y as i8)))
            .map(|y| field.row(y).unwrap().to_vec())
            .collect();

        let mut marked = Vec::new();
        let lo = *full.iter().next().unwrap();
        let hi = *full.iter().next_back().unwrap();
        // A single piece spans at most four rows; mark in bands like a lock would.
        let mut origin = lo;
        while origin <= hi {
            marked.extend(field.mark_complete_rows(origin));
            origin += 4;
        }
        let expected: Vec<usize> = full.iter().map(|&y| y as usize).collect();
        prop_assert_eq!(&marked, &expected);

        field.collapse_rows(&marked);

        let n = full.len();
        for y in 0..n {
            let row = field.row(y).unwrap();
            prop_assert!(row[1..11].iter().all(|c| *c == Cell::Empty));
        }
        for (i, row) in survivors.iter().enumerate() {
            prop_assert_eq!(field.row(n + i), Some(row.as_slice()));
        }
    }

    #[test]
    fn seed_reproduces_session(
        seed in any::<u32>(),
        script in prop::collection::vec(0u8..64, 1..300),
    ) {
        let mut a = Session::new(seed);
        let mut b = Session::new(seed);
        for bits in script {
            let input = InputSignals {
                left: bits & 1 != 0,
                right: bits & 2 != 0,
                down: bits & 4 != 0,
                rotate: bits & 8 != 0,
                hold: bits & 16 != 0,
                quit: false,
            };
            prop_assert_eq!(a.tick(&input), b.tick(&input));
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
    }
}
