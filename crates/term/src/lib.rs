//! Terminal rendering.
//!
//! A small game-oriented rendering layer: a [`GameView`] paints a session
//! snapshot into a [`FrameBuffer`], and the [`TerminalRenderer`] flushes
//! framebuffers to the terminal through crossterm, redrawing only what changed.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
