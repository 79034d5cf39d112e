//! Core types module - shared data structures and constants
//!
//! This module defines the value types passed between the game core and its
//! collaborators (input mapping, terminal rendering, the tick driver). All types
//! are plain data with no external dependencies.
//!
//! # Field Dimensions
//!
//! - **Width**: 12 columns (indexed 0-11), columns 0 and 11 are border
//! - **Height**: 18 rows (indexed 0-17), row 17 is border
//! - **Spawn position**: (`FIELD_WIDTH / 2`, 0)
//!
//! # Timing Constants
//!
//! The core counts ticks, not milliseconds. The driver runs one tick every
//! `TICK_MS`.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Fixed tick interval |
//! | `INITIAL_SPEED` | 20 | Ticks per gravity step at the start |
//! | `PIECES_PER_SPEED_STEP` | 10 | Locked pieces per speed increase |
//! | `LINE_CLEAR_DELAY_MS` | 400 | Time marked lines stay visible |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, PieceKind, Rotation};
//!
//! assert_eq!(PieceKind::I.color_index(), 1);
//! assert_eq!(Rotation::from_steps(5), Rotation::East);
//! assert_eq!(Cell::Block(PieceKind::T).code(), 2);
//! assert_eq!(Cell::Border.code(), 9);
//! ```

/// Field width in cells, border columns included
pub const FIELD_WIDTH: u8 = 12;

/// Field height in cells, bottom border row included
pub const FIELD_HEIGHT: u8 = 18;

/// Fixed tick interval in milliseconds
pub const TICK_MS: u32 = 50;

/// Ticks per gravity step when a session starts
pub const INITIAL_SPEED: u32 = 20;

/// Every this many locked pieces the speed value drops by one
pub const PIECES_PER_SPEED_STEP: u32 = 10;

/// Slowest-to-fastest floor for the speed value
pub const MIN_SPEED: u32 = 1;

/// How long completed lines stay marked before they collapse
pub const LINE_CLEAR_DELAY_MS: u32 = 400;

/// `LINE_CLEAR_DELAY_MS` expressed in driver ticks
pub const LINE_CLEAR_DELAY_TICKS: u32 = LINE_CLEAR_DELAY_MS / TICK_MS;

/// Flat score awarded for every locked piece
pub const LOCK_SCORE: u32 = 25;

/// Line bonus is `LINE_BONUS_BASE * 2^lines`
pub const LINE_BONUS_BASE: u32 = 100;

/// The seven piece kinds, in catalog order
///
/// The catalog order fixes each kind's color index (`index + 1`):
/// I=1, T=2, O=3, Z=4, S=5, L=6, J=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    T,
    O,
    Z,
    S,
    L,
    J,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Position in the catalog (0..=6)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind at a catalog position, `None` past the seventh entry
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Color index used by renderers (1..=7)
    pub fn color_index(self) -> u8 {
        self as u8 + 1
    }

    /// Single-letter label
    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::T => "T",
            PieceKind::O => "O",
            PieceKind::Z => "Z",
            PieceKind::S => "S",
            PieceKind::L => "L",
            PieceKind::J => "J",
        }
    }
}

/// One of four 90° orientations
///
/// `North` is the spawn orientation and each `rotate_cw` advances one state:
/// North → East → South → West → North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Build a rotation from a step count, taken modulo 4
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_steps(0), Rotation::North);
    /// assert_eq!(Rotation::from_steps(3), Rotation::West);
    /// assert_eq!(Rotation::from_steps(4), Rotation::North);
    /// ```
    pub fn from_steps(steps: u32) -> Self {
        match steps % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Number of clockwise quarter turns from `North` (0..=3)
    pub fn steps(self) -> u32 {
        self as u32
    }

    /// Rotate clockwise (90°)
    pub fn rotate_cw(self) -> Self {
        Self::from_steps(self.steps() + 1)
    }
}

/// State of one field cell
///
/// `code()` gives the numeric form used in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Fixed wall: left/right columns and bottom row
    Border,
    /// Row completed and waiting to collapse
    Line,
    /// Locked block of a piece
    Block(PieceKind),
}

impl Cell {
    /// Numeric cell code: empty 0, piece colors 1..=7, line 8, border 9
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Block(kind) => kind.color_index(),
            Cell::Line => 8,
            Cell::Border => 9,
        }
    }

    /// Inverse of [`Cell::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            1..=7 => PieceKind::from_index(code as usize - 1).map(Cell::Block),
            8 => Some(Cell::Line),
            9 => Some(Cell::Border),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Discrete input signals sampled once per tick
///
/// Every flag is level-triggered: it is true for as long as the key is held.
/// The session turns `rotate` and `hold` into edge-triggered actions itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSignals {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub rotate: bool,
    pub hold: bool,
    pub quit: bool,
}

impl InputSignals {
    /// No signal asserted
    pub const NONE: InputSignals = InputSignals {
        left: false,
        right: false,
        down: false,
        rotate: false,
        hold: false,
        quit: false,
    };
}
