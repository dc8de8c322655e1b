//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be
//! shared by the game rules, the timing engine, input capture and rendering.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top spawn area)
//! - **Spawn position**: row 0, column 3 (top-left of the piece bounding box)
//!
//! # Tick Cadences
//!
//! Timing values are in milliseconds:
//!
//! | Cadence | Default | Description |
//! |---------|---------|-------------|
//! | `Normal` | 800 | Regular fall speed |
//! | `Fast` | 50 | Soft drop, active while the drop key is held |
//! | `Sliding` | 100 | Landing grace window before a piece locks |
//!
//! Held lateral movement repeats every `MOVE_REPEAT_MS` (150ms), independent of
//! the tick cadence.
//!
//! # Examples
//!
//! ```
//! use tetris_session_types::{Cadence, Command, KeyState, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Cadence::Sliding.interval_ms(), 100);
//! assert_eq!(Command::MoveLeft(KeyState::Pressed).key_state(), Some(KeyState::Pressed));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Row offset of a freshly spawned piece
pub const SPAWN_ROW: i8 = 0;

/// Column offset of a freshly spawned piece
pub const SPAWN_COLUMN: i8 = 3;

/// Number of pieces shown in the upcoming preview
pub const UPCOMING_LEN: usize = 3;

/// Regular fall interval
pub const NORMAL_TICK_MS: u32 = 800;

/// Soft drop interval
pub const FAST_TICK_MS: u32 = 50;

/// Landing grace interval
pub const SLIDING_TICK_MS: u32 = 100;

/// Repeat interval for a held left/right key
pub const MOVE_REPEAT_MS: u32 = 150;

/// Points for clearing N rows in a single commit, indexed by N (0-4).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];


/// The seven piece kinds
///
/// Each kind is also the tag stored in an occupied board cell:
/// - **I**: 4-long bar
/// - **O**: 2x2 square
/// - **T**, **S**, **Z**, **J**, **L**: 3x3 bounding boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in a stable order (used for uniform random picks)
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_session_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell occupied by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Tick interval regime
///
/// A session that is not ticking at all (not started, paused, game over) has
/// no cadence, modelled as `Option<Cadence>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
    /// Regular fall speed
    Normal,
    /// Soft drop while the drop key is held
    Fast,
    /// One-interval grace window after landing, before commit
    Sliding,
}

impl Cadence {
    /// Default interval for this cadence in milliseconds
    pub fn interval_ms(&self) -> u32 {
        match self {
            Cadence::Normal => NORMAL_TICK_MS,
            Cadence::Fast => FAST_TICK_MS,
            Cadence::Sliding => SLIDING_TICK_MS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Normal => "normal",
            Cadence::Fast => "fast",
            Cadence::Sliding => "sliding",
        }
    }
}

/// Press/release edge for commands that act while held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Logical commands produced by input capture and the start control
///
/// Raw device encoding never reaches the game; the input layer translates
/// key events into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Hold or release the left direction
    MoveLeft(KeyState),
    /// Hold or release the right direction
    MoveRight(KeyState),
    /// Rotate 90° clockwise (edge-triggered, one rotation per press)
    Rotate,
    /// Hold or release soft drop
    SoftDrop(KeyState),
    /// Start a new session (only honoured while not playing)
    Start,
    /// Toggle pause while playing
    Pause,
}

impl Command {
    /// Key edge carried by hold-style commands, `None` for one-shot commands
    pub fn key_state(&self) -> Option<KeyState> {
        match self {
            Command::MoveLeft(state) | Command::MoveRight(state) | Command::SoftDrop(state) => {
                Some(*state)
            }
            Command::Rotate | Command::Start | Command::Pause => None,
        }
    }
}
