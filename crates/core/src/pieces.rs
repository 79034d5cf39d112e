//! Pieces module - piece catalog and rotation indexer
//!
//! Every piece is stored once, unrotated, as a 4x4 occupancy pattern. Rotated
//! orientations are never stored: [`rotated_index`] maps a cell of the rotated
//! 4x4 box back to the index of the stored pattern.

use crate::types::{PieceKind, Rotation, FIELD_WIDTH};

/// Side length of a piece bounding box
pub const PIECE_SIZE: usize = 4;

/// Origin of a freshly spawned piece (x, y)
pub const SPAWN_POSITION: (i8, i8) = ((FIELD_WIDTH / 2) as i8, 0);

/// 4x4 occupancy pattern, `pattern[row][col]`
pub type Pattern = [[bool; PIECE_SIZE]; PIECE_SIZE];

const X: bool = true;
const O: bool = false;

/// Patterns in catalog order (I, T, O, Z, S, L, J)
const PATTERNS: [Pattern; 7] = [
    // I
    [[O, O, X, O], [O, O, X, O], [O, O, X, O], [O, O, X, O]],
    // T
    [[O, O, X, O], [O, X, X, O], [O, O, X, O], [O, O, O, O]],
    // O
    [[O, O, O, O], [O, X, X, O], [O, X, X, O], [O, O, O, O]],
    // Z
    [[O, O, X, O], [O, X, X, O], [O, X, O, O], [O, O, O, O]],
    // S
    [[O, X, O, O], [O, X, X, O], [O, O, X, O], [O, O, O, O]],
    // L
    [[O, X, O, O], [O, X, O, O], [O, X, X, O], [O, O, O, O]],
    // J
    [[O, O, X, O], [O, O, X, O], [O, X, X, O], [O, O, O, O]],
];

/// Unrotated occupancy pattern of a piece
pub fn pattern(kind: PieceKind) -> &'static Pattern {
    &PATTERNS[kind.index()]
}

/// Color index a locked piece leaves in the field (1..=7)
pub fn color_index(kind: PieceKind) -> u8 {
    kind.color_index()
}

/// Map a cell of the rotated 4x4 box to the stored pattern's flat index
///
/// | rotation | index |
/// |----------|-------|
/// | North | `row * 4 + col` |
/// | East | `12 + row - col * 4` |
/// | South | `15 - row * 4 - col` |
/// | West | `3 - row + col * 4` |
///
/// `col` and `row` must be in `0..4`.
#[inline]
pub fn rotated_index(col: usize, row: usize, rotation: Rotation) -> usize {
    debug_assert!(
        col < PIECE_SIZE && row < PIECE_SIZE,
        "({col}, {row}) outside 4x4 box"
    );
    match rotation {
        Rotation::North => row * 4 + col,
        Rotation::East => 12 + row - col * 4,
        Rotation::South => 15 - row * 4 - col,
        Rotation::West => 3 - row + col * 4,
    }
}

/// Whether the rotated piece covers `(col, row)` of its bounding box
#[inline]
pub fn occupies(kind: PieceKind, col: usize, row: usize, rotation: Rotation) -> bool {
    let i = rotated_index(col, row, rotation);
    pattern(kind)[i / PIECE_SIZE][i % PIECE_SIZE]
}

/// Occupied `(col, row)` offsets of a rotated piece, row-major
pub fn cells(kind: PieceKind, rotation: Rotation) -> impl Iterator<Item = (i8, i8)> {
    (0..PIECE_SIZE).flat_map(move |row| {
        (0..PIECE_SIZE)
            .filter(move |&col| occupies(kind, col, row, rotation))
            .map(move |col| (col as i8, row as i8))
    })
}

/// The falling piece: kind, orientation and bounding-box origin on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A piece at the spawn origin in spawn orientation
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Same piece shifted by `(dx, dy)`
    pub fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Same piece one quarter turn clockwise, origin unchanged
    pub fn rotated(self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..self
        }
    }

    /// Absolute field coordinates of the occupied cells
    pub fn field_cells(self) -> impl Iterator<Item = (i8, i8)> {
        cells(self.kind, self.rotation).map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[test]
    fn every_piece_has_four_cells_in_every_rotation() {
        for kind in PieceKind::ALL {
            for rotation in ROTATIONS {
                assert_eq!(cells(kind, rotation).count(), 4, "{kind:?} {rotation:?}");
            }
        }
    }

    #[test]
    fn rotated_index_is_a_permutation() {
        for rotation in ROTATIONS {
            let mut seen = [false; 16];
            for row in 0..4 {
                for col in 0..4 {
                    let i = rotated_index(col, row, rotation);
                    assert!(i < 16);
                    assert!(!seen[i], "{rotation:?} maps twice onto {i}");
                    seen[i] = true;
                }
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn rotation_is_periodic() {
        for steps in 0..12u32 {
            let a = Rotation::from_steps(steps);
            let b = Rotation::from_steps(steps + 4);
            for row in 0..4 {
                for col in 0..4 {
                    assert_eq!(rotated_index(col, row, a), rotated_index(col, row, b));
                }
            }
        }
    }

    #[test]
    fn east_turns_vertical_i_horizontal() {
        let east: Vec<_> = cells(PieceKind::I, Rotation::East).collect();
        assert_eq!(east, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn o_piece_is_rotation_invariant() {
        let north: Vec<_> = cells(PieceKind::O, Rotation::North).collect();
        for rotation in ROTATIONS {
            let other: Vec<_> = cells(PieceKind::O, rotation).collect();
            assert_eq!(other, north);
        }
    }

    #[test]
    fn color_indices_follow_catalog_order() {
        let colors: Vec<u8> = PieceKind::ALL.iter().map(|&k| color_index(k)).collect();
        assert_eq!(colors, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn spawn_uses_center_column_and_top_row() {
        let piece = ActivePiece::spawn(PieceKind::T);
        assert_eq!((piece.x, piece.y), (6, 0));
        assert_eq!(piece.rotation, Rotation::North);
    }

    #[test]
    fn field_cells_are_offset_by_origin() {
        let piece = ActivePiece::spawn(PieceKind::I).shifted(-2, 3);
        let cells: Vec<_> = piece.field_cells().collect();
        assert_eq!(cells, vec![(6, 3), (6, 4), (6, 5), (6, 6)]);
    }
}
