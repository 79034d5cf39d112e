//! Session module - the per-tick game state machine
//!
//! A [`Session`] owns the field, the active piece, the hold slot, the piece
//! generator and the score/speed counters. The driver calls [`Session::tick`]
//! once per fixed interval with the input signals sampled for that tick.
//!
//! Phases:
//!
//! - **Active**: input moves the piece, gravity pulls it down every `speed`
//!   ticks, and a piece that cannot descend locks.
//! - **LineClear**: completed rows are marked and stay on the field for
//!   `line_clear_delay_ticks`; input and gravity are suspended. When the delay
//!   runs out the rows collapse and the next piece spawns.
//! - **GameOver**: terminal. Reached when a freshly spawned piece overlaps the
//!   stack or cannot move one row down. Further ticks change nothing.
//!
//! Invalid moves, rotations and holds are silently ignored.

use tracing::{debug, info, warn};

use crate::config::{ConfigError, SessionConfig};
use crate::field::{ClearedRows, Field};
use crate::pieces::ActivePiece;
use crate::rng::PieceRandomizer;
use crate::scoring::{level, lock_score, next_speed};
use crate::snapshot::Snapshot;
use crate::types::{InputSignals, PieceKind};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    /// Marked lines are waiting to collapse; `remaining` ticks to go
    LineClear { remaining: u32 },
    GameOver,
}

/// Turns a level-triggered signal into a single event per press
///
/// Fires on the tick the signal goes from released to asserted, and not again
/// until the signal has been released for at least one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeLatch {
    held: bool,
}

impl EdgeLatch {
    /// Record this tick's level; returns true on a rising edge
    pub fn rising(&mut self, asserted: bool) -> bool {
        let fired = asserted && !self.held;
        self.held = asserted;
        fired
    }
}

/// Result of locking a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines: usize,
    pub score: u32,
}

/// What happened during one tick (for drivers, logs and tests)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub moved: bool,
    pub rotated: bool,
    pub held: bool,
    /// Gravity moved the piece down one row
    pub fell: bool,
    pub locked: Option<LockEvent>,
    /// Rows removed by a collapse this tick
    pub collapsed: usize,
    pub spawned: Option<PieceKind>,
    pub game_over: bool,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    field: Field,
    active: Option<ActivePiece>,
    hold: Option<PieceKind>,
    pieces: PieceRandomizer,
    phase: Phase,
    pending_lines: ClearedRows,
    score: u32,
    /// Ticks per gravity step
    speed: u32,
    /// Ticks since the last gravity step
    gravity_ticks: u32,
    piece_count: u32,
    ticks: u64,
    rotate_latch: EdgeLatch,
    hold_latch: EdgeLatch,
}

impl Session {
    /// Create a session with default tuning and the given seed
    pub fn new(seed: u32) -> Self {
        Self::build(SessionConfig::default().with_seed(seed), Field::new())
    }

    /// Create a session from a validated configuration
    pub fn with_config(config: SessionConfig) -> Result<Self, ConfigError> {
        Self::with_field(config, Field::new())
    }

    /// Create a session on a prepared field
    pub fn with_field(config: SessionConfig, field: Field) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, field))
    }

    fn build(config: SessionConfig, field: Field) -> Self {
        let mut session = Self {
            config,
            field,
            active: None,
            hold: None,
            pieces: PieceRandomizer::new(config.seed),
            phase: Phase::Active,
            pending_lines: ClearedRows::new(),
            score: 0,
            speed: config.initial_speed,
            gravity_ticks: 0,
            piece_count: 0,
            ticks: 0,
            rotate_latch: EdgeLatch::default(),
            hold_latch: EdgeLatch::default(),
        };
        let mut report = TickReport::default();
        session.spawn_piece(&mut report);
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn level(&self) -> u32 {
        level(self.config.initial_speed, self.speed)
    }

    pub fn piece_count(&self) -> u32 {
        self.piece_count
    }

    pub fn pending_lines(&self) -> &[usize] {
        &self.pending_lines
    }

    /// Number of ticks processed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance the session by one tick
    pub fn tick(&mut self, input: &InputSignals) -> TickReport {
        let mut report = TickReport::default();
        if self.phase == Phase::GameOver {
            return report;
        }

        // Latches see every live tick so a key held through a line clear does
        // not fire when play resumes.
        let rotate_pressed = self.rotate_latch.rising(input.rotate);
        let hold_pressed = self.hold_latch.rising(input.hold);

        match self.phase {
            Phase::LineClear { remaining } => {
                self.ticks += 1;
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.finish_line_clear(&mut report);
                } else {
                    self.phase = Phase::LineClear { remaining };
                }
                return report;
            }
            Phase::Active | Phase::GameOver => {}
        }

        self.ticks += 1;

        if input.left && self.try_move(-1, 0) {
            report.moved = true;
        }
        if input.right && self.try_move(1, 0) {
            report.moved = true;
        }
        if input.down && self.try_move(0, 1) {
            report.moved = true;
        }

        if rotate_pressed && self.try_rotate() {
            report.rotated = true;
        }

        if hold_pressed && self.hold() {
            report.held = true;
        }

        self.gravity_ticks += 1;
        if self.gravity_ticks >= self.speed {
            self.gravity_ticks = 0;
            if self.try_move(0, 1) {
                report.fell = true;
            } else {
                self.lock_active(&mut report);
            }
        }

        report
    }

    /// Move the active piece if the destination fits
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if self.field.fits_piece(&moved) {
            self.active = Some(moved);
            return true;
        }
        false
    }

    /// Rotate the active piece a quarter turn clockwise if it fits
    fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.rotated();
        if self.field.fits_piece(&rotated) {
            self.active = Some(rotated);
            return true;
        }
        false
    }

    /// Swap the active piece with the hold slot
    ///
    /// An empty slot takes the active piece and a new random piece becomes
    /// active. The incoming piece always starts from the spawn origin; if it
    /// does not fit there the hold is ignored.
    fn hold(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let incoming = match self.hold {
            Some(kind) => kind,
            None => self.pieces.draw(),
        };
        let candidate = ActivePiece::spawn(incoming);
        if !self.field.fits_piece(&candidate) {
            return false;
        }

        debug!(held = ?active.kind, active = ?incoming, "hold");
        self.hold = Some(active.kind);
        self.active = Some(candidate);
        true
    }

    /// Lock the active piece, score it and either spawn or start a line clear
    fn lock_active(&mut self, report: &mut TickReport) {
        let Some(piece) = self.active.take() else {
            return;
        };

        if !self.field.lock(&piece) {
            warn!(?piece, "active piece did not fit at lock time");
        }

        self.piece_count += 1;
        let speed = next_speed(
            self.speed,
            self.piece_count,
            self.config.pieces_per_speed_step,
        );
        if speed != self.speed {
            info!(speed, pieces = self.piece_count, "speed increased");
            self.speed = speed;
        }

        let rows = self.field.mark_complete_rows(piece.y);
        let gained = lock_score(rows.len());
        self.score = self.score.saturating_add(gained);
        report.locked = Some(LockEvent {
            kind: piece.kind,
            lines: rows.len(),
            score: gained,
        });
        self.pending_lines = rows;

        if self.pending_lines.is_empty() {
            self.spawn_piece(report);
        } else if self.config.line_clear_delay_ticks == 0 {
            self.finish_line_clear(report);
        } else {
            self.phase = Phase::LineClear {
                remaining: self.config.line_clear_delay_ticks,
            };
        }
    }

    /// Collapse the pending rows and bring in the next piece
    fn finish_line_clear(&mut self, report: &mut TickReport) {
        self.field.collapse_rows(&self.pending_lines);
        report.collapsed = self.pending_lines.len();
        self.pending_lines.clear();
        self.phase = Phase::Active;
        self.spawn_piece(report);
    }

    /// Spawn a random piece; ends the game if it overlaps the stack or
    /// cannot move one row down
    fn spawn_piece(&mut self, report: &mut TickReport) {
        let kind = self.pieces.draw();
        let piece = ActivePiece::spawn(kind);
        self.active = Some(piece);
        report.spawned = Some(kind);

        let blocked =
            !self.field.fits_piece(&piece) || !self.field.fits_piece(&piece.shifted(0, 1));
        if blocked {
            self.phase = Phase::GameOver;
            report.game_over = true;
            info!(score = self.score, pieces = self.piece_count, "game over");
        } else {
            debug!(?kind, "piece spawned");
        }
    }

    /// Copy the render-facing state into an existing snapshot
    pub fn snapshot_into(&self, out: &mut Snapshot) {
        self.field.write_code_grid(&mut out.field);
        out.active = self.active;
        out.hold = self.hold;
        out.score = self.score;
        out.speed = self.speed;
        out.level = self.level();
        out.piece_count = self.piece_count;
        out.pending_lines = self.pending_lines.clone();
        out.line_clear_remaining = match self.phase {
            Phase::LineClear { remaining } => remaining,
            _ => 0,
        };
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut s = Snapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}
