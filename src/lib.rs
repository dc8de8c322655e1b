//! Falling-block puzzle session (workspace facade crate).
//!
//! Re-exports the member crates under one name so the binary, integration
//! tests and benchmarks can use `tetris_session::{core, engine, input, term, types}`.

pub use tetris_session_core as core;
pub use tetris_session_engine as engine;
pub use tetris_session_input as input;
pub use tetris_session_term as term;
pub use tetris_session_types as types;
