//! Field module - the playing grid, placement checks and line clearing
//!
//! The field is a 12x18 grid stored as a flat, row-major array.
//! Coordinates: (x, y) where x ranges 0..11 (left to right), y ranges 0..17
//! (top to bottom). Column 0, column 11 and row 17 are permanent border cells,
//! so the playable interior is x in 1..=10, y in 0..=16.
//!
//! Line clearing is two-phase: [`Field::mark_complete_rows`] replaces full rows
//! with [`Cell::Line`] right after a lock, and [`Field::collapse_rows`] removes
//! them later so renderers can show the marked rows for a moment.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::pieces::{self, ActivePiece, PIECE_SIZE};
use crate::types::{Cell, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};

/// Total number of cells in the field
const FIELD_SIZE: usize = (FIELD_WIDTH as usize) * (FIELD_HEIGHT as usize);

const WIDTH: usize = FIELD_WIDTH as usize;
const HEIGHT: usize = FIELD_HEIGHT as usize;

/// Rows completed by a single lock (a piece spans at most four rows)
pub type ClearedRows = ArrayVec<usize, PIECE_SIZE>;

/// The playing field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; FIELD_SIZE],
}

impl Field {
    /// Create an empty field surrounded by its border
    pub fn new() -> Self {
        let mut cells = [Cell::Empty; FIELD_SIZE];
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if Self::is_border(x, y) {
                    cells[y * WIDTH + x] = Cell::Border;
                }
            }
        }
        Self { cells }
    }

    #[inline(always)]
    fn is_border(x: usize, y: usize) -> bool {
        x == 0 || x == WIDTH - 1 || y == HEIGHT - 1
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= FIELD_WIDTH as i8 || y < 0 || y >= FIELD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        FIELD_WIDTH
    }

    pub fn height(&self) -> u8 {
        FIELD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set an interior cell
    ///
    /// Returns false, leaving the field unchanged, when (x, y) is out of bounds
    /// or a border cell.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) if !Self::is_border(x as usize, y as usize) => {
                self.cells[idx] = cell;
                true
            }
            _ => false,
        }
    }

    /// Check if (x, y) is inside the field and empty
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Empty))
    }

    /// Check whether a piece fits at the given orientation and origin
    ///
    /// Every occupied cell of the rotated pattern must land inside the field
    /// rectangle on an empty cell. Border cells are never empty, so walls and
    /// floor are enforced by the same test.
    pub fn fits(&self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
        pieces::cells(kind, rotation).all(|(dx, dy)| self.is_free(x + dx, y + dy))
    }

    /// [`Field::fits`] for an [`ActivePiece`]
    pub fn fits_piece(&self, piece: &ActivePiece) -> bool {
        self.fits(piece.kind, piece.rotation, piece.x, piece.y)
    }

    /// Lock a piece into the field
    ///
    /// The placement is validated first; a piece that does not fit is rejected
    /// and the field is left untouched. Returns true if the piece was written.
    pub fn lock(&mut self, piece: &ActivePiece) -> bool {
        if !self.fits_piece(piece) {
            return false;
        }

        let cell = Cell::Block(piece.kind);
        for (x, y) in piece.field_cells() {
            self.set(x, y, cell);
        }

        debug!(kind = ?piece.kind, x = piece.x, y = piece.y, "piece locked");
        true
    }

    /// Check if every interior cell of row y is non-empty
    ///
    /// The bottom border row is never complete.
    pub fn is_row_complete(&self, y: usize) -> bool {
        if y >= HEIGHT - 1 {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start + 1..start + WIDTH - 1]
            .iter()
            .all(|cell| !cell.is_empty())
    }

    /// Mark completed rows in the 4-row band starting at `origin_y`
    ///
    /// Every complete row's interior is overwritten with [`Cell::Line`].
    /// Returns the marked row indices in ascending order.
    pub fn mark_complete_rows(&mut self, origin_y: i8) -> ClearedRows {
        let mut rows = ClearedRows::new();

        for dy in 0..PIECE_SIZE as i8 {
            let y = origin_y + dy;
            if y < 0 {
                continue;
            }
            let y = y as usize;
            if !self.is_row_complete(y) {
                continue;
            }

            let start = y * WIDTH;
            self.cells[start + 1..start + WIDTH - 1].fill(Cell::Line);
            rows.push(y);
        }

        if !rows.is_empty() {
            debug!(rows = ?rows.as_slice(), "rows marked");
        }
        rows
    }

    /// Remove one row: every interior cell above it moves down by one and the
    /// top interior cell becomes empty
    pub fn collapse_row(&mut self, y: usize) {
        if y >= HEIGHT - 1 {
            return;
        }

        for row in (1..=y).rev() {
            let src = (row - 1) * WIDTH;
            let dst = row * WIDTH;
            // Interior only: border columns keep their value.
            self.cells.copy_within(src + 1..src + WIDTH - 1, dst + 1);
        }
        self.cells[1..WIDTH - 1].fill(Cell::Empty);
    }

    /// Collapse previously marked rows, in the order given
    ///
    /// `rows` must be ascending (as returned by [`Field::mark_complete_rows`]).
    /// Collapsing row r only moves rows above r, so later (lower) indices stay
    /// valid without adjustment.
    pub fn collapse_rows(&mut self, rows: &[usize]) {
        debug_assert!(rows.windows(2).all(|w| w[0] < w[1]), "rows not ascending");
        for &y in rows {
            self.collapse_row(y);
        }
        if !rows.is_empty() {
            debug!(count = rows.len(), "rows collapsed");
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row y as a slice, border cells included
    /// Returns None if y is out of bounds
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= HEIGHT {
            return None;
        }
        let start = y * WIDTH;
        Some(&self.cells[start..start + WIDTH])
    }

    /// Write the numeric cell codes into a fixed 2D grid
    pub fn write_code_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, code) in row.iter_mut().enumerate() {
                *code = self.cells[y * WIDTH + x].code();
            }
        }
    }

    /// Reset every interior cell to empty
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}
