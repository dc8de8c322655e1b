//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s with explicit
//! press/release edges and provides an [`InputHandler`] that papers over
//! terminals which never report key releases. Lateral auto-repeat is not
//! produced here; the engine runs its own repeat timer while a direction is held.

pub mod handler;
pub mod map;

pub use tetris_session_types as types;

pub use handler::{HeldKey, InputHandler};
pub use map::{map_key_event, should_quit};
