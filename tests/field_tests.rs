//! Field tests - placement, locking, line marking and collapse

use blockfall::core::{ActivePiece, Field};
use blockfall::types::{Cell, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};

fn fill_interior_row(field: &mut Field, y: i8) {
    for x in 1..FIELD_WIDTH as i8 - 1 {
        field.set(x, y, Cell::Block(PieceKind::L));
    }
}

fn piece(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> ActivePiece {
    ActivePiece {
        kind,
        rotation,
        x,
        y,
    }
}

#[test]
fn test_field_dimensions() {
    let field = Field::new();
    assert_eq!(field.width(), FIELD_WIDTH);
    assert_eq!(field.height(), FIELD_HEIGHT);
    assert_eq!(field.cells().len(), 12 * 18);
}

#[test]
fn test_field_get_out_of_bounds() {
    let field = Field::new();
    assert_eq!(field.get(-1, 0), None);
    assert_eq!(field.get(0, -1), None);
    assert_eq!(field.get(FIELD_WIDTH as i8, 0), None);
    assert_eq!(field.get(0, FIELD_HEIGHT as i8), None);
}

#[test]
fn test_fits_rejects_overlap() {
    let mut field = Field::new();
    field.set(7, 1, Cell::Block(PieceKind::Z));
    assert!(!field.fits(PieceKind::O, Rotation::North, 6, 0));
    assert!(field.fits(PieceKind::O, Rotation::North, 6, 1));
}

#[test]
fn test_every_spawn_fits_on_empty_field() {
    let field = Field::new();
    for kind in PieceKind::ALL {
        assert!(field.fits_piece(&ActivePiece::spawn(kind)), "{kind:?}");
    }
}

#[test]
fn test_lock_writes_exactly_the_piece_cells() {
    let mut field = Field::new();
    let before = field.clone();
    let t = piece(PieceKind::T, Rotation::East, 4, 8);
    assert!(field.lock(&t));

    let cells: Vec<(i8, i8)> = t.field_cells().collect();
    assert_eq!(cells.len(), 4);
    for y in 0..FIELD_HEIGHT as i8 {
        for x in 0..FIELD_WIDTH as i8 {
            if cells.contains(&(x, y)) {
                assert_eq!(field.get(x, y), Some(Cell::Block(PieceKind::T)));
            } else {
                assert_eq!(field.get(x, y), before.get(x, y), "({x}, {y}) changed");
            }
        }
    }
}

#[test]
fn test_lock_marks_rows_in_piece_band_only() {
    let mut field = Field::new();
    fill_interior_row(&mut field, 4);
    // Row 4 is full but far above the band of a piece at y = 12.
    let rows = field.mark_complete_rows(12);
    assert!(rows.is_empty());
    let rows = field.mark_complete_rows(2);
    assert_eq!(rows.as_slice(), &[4]);
}

#[test]
fn test_collapse_non_adjacent_rows() {
    let mut field = Field::new();
    fill_interior_row(&mut field, 13);
    fill_interior_row(&mut field, 15);
    field.set(3, 14, Cell::Block(PieceKind::S));
    field.set(4, 16, Cell::Block(PieceKind::Z));
    field.set(6, 12, Cell::Block(PieceKind::J));

    let rows = field.mark_complete_rows(13);
    assert_eq!(rows.as_slice(), &[13, 15]);
    field.collapse_rows(&rows);

    // Below both cleared rows: untouched.
    assert_eq!(field.get(4, 16), Some(Cell::Block(PieceKind::Z)));
    // Between them: down by one.
    assert_eq!(field.get(3, 15), Some(Cell::Block(PieceKind::S)));
    // Above both: down by two.
    assert_eq!(field.get(6, 14), Some(Cell::Block(PieceKind::J)));
    assert_eq!(field.get(6, 12), Some(Cell::Empty));

    let line_cells = field.cells().iter().filter(|&&c| c == Cell::Line).count();
    assert_eq!(line_cells, 0);
}

#[test]
fn test_collapse_keeps_border() {
    let mut field = Field::new();
    fill_interior_row(&mut field, 16);
    field.mark_complete_rows(13);
    field.collapse_rows(&[16]);
    assert_eq!(field, Field::new());
}

#[test]
fn test_clear_restores_new_field() {
    let mut field = Field::new();
    field.set(5, 5, Cell::Block(PieceKind::I));
    field.clear();
    assert_eq!(field, Field::new());
}
