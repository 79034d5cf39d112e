//! Terminal input.
//!
//! Maps `crossterm` key events to [`Action`]s and turns the stream of presses
//! into level-triggered [`InputSignals`](crate::types::InputSignals) sampled
//! once per tick. Works in terminals without key-release events by expiring
//! held keys after a timeout.

pub mod key_state;
pub mod map;

pub use blockfall_types as types;

pub use key_state::KeyState;
pub use map::{map_key, should_quit, Action};
