//! Terminal rendering for the game.
//!
//! Rendering is split in two steps:
//!
//! - [`GameView`] draws a read-only [`core::GameSnapshot`] into a
//!   [`FrameBuffer`] (pure, unit-testable)
//! - [`TerminalRenderer`] flushes a framebuffer to the terminal, sending only
//!   what changed since the previous frame
//!
//! Board cells are two terminal columns wide so blocks look square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris_session_core as core;
pub use tetris_session_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use game_view::{status_text, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
