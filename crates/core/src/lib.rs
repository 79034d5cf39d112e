//! Core game logic - pure, deterministic, and testable
//!
//! Everything here is driven by [`Session::tick`]; there is no clock, no I/O
//! and no terminal code. The same seed and the same input sequence always
//! produce the same game.
//!
//! # Module Structure
//!
//! - [`field`]: 12x18 bordered grid, placement checks, line marking and collapse
//! - [`pieces`]: the seven 4x4 patterns and the rotation indexer
//! - [`rng`]: uniform seeded piece generator
//! - [`scoring`]: lock score, line bonus and speed progression
//! - [`config`]: session tunables and their validation
//! - [`session`]: the per-tick state machine
//! - [`snapshot`]: render-facing copy of a session
//!
//! # Game Rules
//!
//! | Rule | Behavior |
//! |------|----------|
//! | Gravity | one row every `speed` ticks (starts at 20) |
//! | Movement | left/right/down every tick the signal is held |
//! | Rotation | one clockwise quarter turn per press, no wall kicks |
//! | Hold | swap with the hold slot, incoming piece restarts at spawn |
//! | Lock | a piece that cannot descend on a gravity step locks in place |
//! | Score | 25 per lock, plus `100 * 2^lines` when lines clear |
//! | Speed | every 10th lock lowers `speed` by one, never below 1 |
//! | Game over | a new piece cannot move one row down from spawn |
//!
//! # Example
//!
//! ```
//! use blockfall_core::Session;
//! use blockfall_types::InputSignals;
//!
//! let mut session = Session::new(12345);
//! let down = InputSignals { down: true, ..InputSignals::NONE };
//! for _ in 0..40 {
//!     session.tick(&down);
//! }
//! assert!(session.score() >= 25);
//! ```

pub mod config;
pub mod field;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

pub use config::{ConfigError, SessionConfig};
pub use field::{ClearedRows, Field};
pub use pieces::ActivePiece;
pub use rng::{PieceRandomizer, SimpleRng};
pub use session::{EdgeLatch, LockEvent, Phase, Session, TickReport};
pub use snapshot::Snapshot;
