use crate::field::ClearedRows;
use crate::pieces::ActivePiece;
use crate::types::{PieceKind, FIELD_HEIGHT, FIELD_WIDTH};

/// Render-facing copy of a session
///
/// `field` holds cell codes (0 empty, 1..=7 piece colors, 8 marked line,
/// 9 border). The active piece is not merged into the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot {
    pub field: [[u8; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize],
    pub active: Option<ActivePiece>,
    pub hold: Option<PieceKind>,
    pub score: u32,
    pub speed: u32,
    pub level: u32,
    pub piece_count: u32,
    pub pending_lines: ClearedRows,
    /// Ticks until marked lines collapse (0 outside a line clear)
    pub line_clear_remaining: u32,
    pub game_over: bool,
}

impl Snapshot {
    pub fn clear(&mut self) {
        self.field = [[0u8; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize];
        self.active = None;
        self.hold = None;
        self.score = 0;
        self.speed = 0;
        self.level = 0;
        self.piece_count = 0;
        self.pending_lines.clear();
        self.line_clear_remaining = 0;
        self.game_over = false;
    }

    /// Marked lines are on the field waiting to collapse
    pub fn line_clearing(&self) -> bool {
        !self.pending_lines.is_empty()
    }

    /// Input currently has an effect
    pub fn playable(&self) -> bool {
        !self.game_over && !self.line_clearing()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            field: [[0u8; FIELD_WIDTH as usize]; FIELD_HEIGHT as usize],
            active: None,
            hold: None,
            score: 0,
            speed: 0,
            level: 0,
            piece_count: 0,
            pending_lines: ClearedRows::new(),
            line_clear_remaining: 0,
            game_over: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Session;

    #[test]
    fn test_snapshot_into_reuses_buffer() {
        let session = Session::new(4);
        let mut snap = Snapshot::default();
        snap.score = 999;
        snap.game_over = true;
        session.snapshot_into(&mut snap);
        assert_eq!(snap.score, 0);
        assert!(!snap.game_over);
        assert!(snap.playable());
        assert_eq!(snap, session.snapshot());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut snap = Session::new(4).snapshot();
        snap.pending_lines.push(16);
        assert!(snap.line_clearing());
        snap.clear();
        assert_eq!(snap, Snapshot::default());
    }
}
