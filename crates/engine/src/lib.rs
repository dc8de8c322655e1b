//! Engine module - drives the core over time
//!
//! The core is synchronous and owns no clock. This crate supplies one:
//!
//! - [`timer`]: a periodic task that posts events into a channel and is
//!   cancelled when its handle is dropped
//! - [`scheduler`]: the tick timer keyed by cadence and the lateral-repeat
//!   timer, each replaced in a single step when its parameters change
//! - [`session`]: the single sequential event stream that serializes ticks,
//!   repeats and input commands into the game
//! - [`config`]: environment-driven timing, seed and log settings
//!
//! # Environment Variables
//!
//! - `TETRIS_NORMAL_MS`: regular fall interval (default: 800)
//! - `TETRIS_FAST_MS`: soft drop interval (default: 50)
//! - `TETRIS_SLIDING_MS`: landing grace interval (default: 100)
//! - `TETRIS_REPEAT_MS`: held left/right repeat interval (default: 150)
//! - `TETRIS_SEED`: piece generator seed (default: derived from the clock)
//! - `TETRIS_LOG_PATH`: log file (default: "tetris-session.log", empty disables)
//!
//! All timers run on tokio and must be created inside a runtime.

pub mod config;
pub mod scheduler;
pub mod session;
pub mod timer;

pub use tetris_session_core as core;
pub use tetris_session_types as types;

pub use config::{EngineConfig, Timing};
pub use scheduler::Scheduler;
pub use session::{Event, Flow, Session};
pub use timer::Timer;
