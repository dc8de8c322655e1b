//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and session state. It has **no**
//! dependencies on timers, terminals, or I/O:
//!
//! - **Deterministic**: every transition is synchronous; the only randomness is
//!   the piece source, which is injected (and seedable)
//! - **Atomic**: a transition either fully applies or leaves state untouched
//! - **Portable**: drive it from a terminal loop, a test, or a benchmark
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with the collision predicate and line clearing
//! - [`shape`]: square piece matrices, canonical shapes, clockwise rotation
//! - [`board_state`]: the board state machine (`BoardState::reduce`)
//! - [`game_state`]: the orchestrator (tick/commit lifecycle, scoring, commands)
//! - [`upcoming`]: fixed-depth preview queue
//! - [`rng`]: piece sources (uniform LCG, fixed sequences)
//! - [`scoring`]: line-clear score table
//! - [`snapshot`]: read-only render view
//!
//! # Example
//!
//! ```
//! use tetris_session_core::{GameState, SimpleRng, TickOutcome};
//! use tetris_session_types::{Cadence, Command, KeyState};
//!
//! let mut game = GameState::new(SimpleRng::new(12345));
//! assert!(game.start());
//! assert_eq!(game.cadence(), Some(Cadence::Normal));
//!
//! game.handle_command(Command::MoveLeft(KeyState::Pressed));
//! game.handle_command(Command::MoveLeft(KeyState::Released));
//!
//! assert_eq!(game.tick().unwrap(), TickOutcome::Dropped);
//! assert_eq!(game.upcoming().len(), 3);
//! ```
//!
//! # Lifecycle
//!
//! The caller owns time. Call [`GameState::tick`] once per
//! [`GameState::cadence`] interval; a landed piece first switches the cadence to
//! `Sliding`, and the following tick either resumes the fall (the player slid
//! it over a gap) or commits it.

pub mod board;
pub mod board_state;
pub mod error;
pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;
pub mod upcoming;

pub use tetris_session_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use board_state::{BoardAction, BoardState, Tetromino};
pub use error::CoreError;
pub use game_state::{GameState, Lateral, TickOutcome};
pub use rng::{FixedSequence, PieceSource, SimpleRng};
pub use scoring::line_clear_points;
pub use shape::Shape;
pub use snapshot::GameSnapshot;
pub use upcoming::Upcoming;
