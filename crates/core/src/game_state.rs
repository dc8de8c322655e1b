//! Game state module - the session orchestrator
//!
//! Ties the board state machine to score, the upcoming queue, the play flag and
//! the tick cadence. The caller owns time: it calls [`GameState::tick`] once per
//! cadence interval and forwards input [`Command`]s as they arrive.
//!
//! Tick handling:
//!
//! 1. Lock pending: if the piece can fall again (it was slid over a gap), clear
//!    the lock and resume `Normal`; otherwise commit.
//! 2. Piece can fall: drop one row.
//! 3. Piece landed: switch to `Sliding` and mark the lock pending, so the next
//!    tick decides. The grace window is exactly one interval and is not
//!    extended by further moves.
//!
//! Commit merges the piece into a copy of the board, clears full rows, scores,
//! spawns the head of the upcoming queue and detects game over by spawn
//! collision. The copy is installed only after scoring succeeds.

use log::{debug, info};

use crate::board::Board;
use crate::board_state::{BoardAction, BoardState, Tetromino};
use crate::error::CoreError;
use crate::rng::{PieceSource, SimpleRng};
use crate::scoring::line_clear_points;
use crate::shape::Shape;
use crate::snapshot::GameSnapshot;
use crate::types::*;
use crate::upcoming::Upcoming;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, or paused
    Idle,
    /// Piece moved down one row
    Dropped,
    /// Piece landed; lock pending, cadence switched to `Sliding`
    Landed,
    /// Piece was moved off its landing spot during the grace window
    Resumed,
    /// Piece locked and the next one spawned
    Committed { lines: usize, points: u32 },
    /// Piece locked and the next spawn collided; the session has ended
    GameOver { lines: usize, points: u32 },
}

/// Held horizontal directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lateral {
    pub left: bool,
    pub right: bool,
}

impl Lateral {
    pub fn is_held(&self) -> bool {
        self.left || self.right
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState<R: PieceSource = SimpleRng> {
    board_state: BoardState,
    upcoming: Upcoming,
    source: R,
    score: u32,
    lines: u32,
    playing: bool,
    game_over: bool,
    paused: bool,
    locking: bool,
    cadence: Option<Cadence>,
    lateral: Lateral,
}

impl<R: PieceSource> GameState<R> {
    /// Create a session in the "not playing" state with an empty board
    pub fn new(mut source: R) -> Self {
        let upcoming = Upcoming::fill(&mut source);
        Self {
            board_state: BoardState::new(),
            upcoming,
            source,
            score: 0,
            lines: 0,
            playing: false,
            game_over: false,
            paused: false,
            locking: false,
            cadence: None,
            lateral: Lateral::default(),
        }
    }

    /// Start a fresh session. Ignored (returns false) while already playing.
    pub fn start(&mut self) -> bool {
        if self.playing {
            return false;
        }

        let first = self.source.next_piece();
        self.dispatch(BoardAction::Start { first });
        self.upcoming = Upcoming::fill(&mut self.source);
        self.score = 0;
        self.lines = 0;
        self.playing = true;
        self.game_over = false;
        self.paused = false;
        self.locking = false;
        self.lateral = Lateral::default();
        self.cadence = Some(Cadence::Normal);

        info!("session started with {:?}", first);
        true
    }

    /// End the session without a game over (quit/teardown)
    pub fn stop(&mut self) {
        self.playing = false;
        self.paused = false;
        self.locking = false;
        self.lateral = Lateral::default();
        self.cadence = None;
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    /// The last session ended because a new piece could not spawn
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn locking(&self) -> bool {
        self.locking
    }

    /// Current tick regime; `None` means no ticking
    pub fn cadence(&self) -> Option<Cadence> {
        self.cadence
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared this session
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn upcoming(&self) -> &[PieceKind; UPCOMING_LEN] {
        self.upcoming.pieces()
    }

    pub fn lateral(&self) -> Lateral {
        self.lateral
    }

    /// Authoritative board (without the falling piece)
    pub fn board(&self) -> &Board {
        self.board_state.board()
    }

    pub fn active(&self) -> &Tetromino {
        self.board_state.active()
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board_state.board
    }

    fn dispatch(&mut self, action: BoardAction) {
        let state = std::mem::take(&mut self.board_state);
        self.board_state = state.reduce(action);
    }

    /// Advance the session by one cadence interval
    pub fn tick(&mut self) -> Result<TickOutcome, CoreError> {
        if !self.playing || self.paused {
            return Ok(TickOutcome::Idle);
        }

        let can_fall = self.active().can_fall(self.board());

        if self.locking {
            if can_fall {
                debug!("lock cancelled, piece can fall again");
                self.locking = false;
                self.cadence = Some(Cadence::Normal);
                return Ok(TickOutcome::Resumed);
            }
            return self.commit();
        }

        if can_fall {
            self.dispatch(BoardAction::Drop);
            Ok(TickOutcome::Dropped)
        } else {
            debug!("piece landed at row {}", self.active().row);
            self.cadence = Some(Cadence::Sliding);
            self.locking = true;
            Ok(TickOutcome::Landed)
        }
    }

    fn commit(&mut self) -> Result<TickOutcome, CoreError> {
        let active = *self.active();

        let mut board = self.board().clone();
        board.merge(&active.shape, active.row, active.column, active.kind);
        let lines = board.clear_full_rows().len();
        let points = line_clear_points(lines)?;

        let next = self.upcoming.advance(self.source.next_piece());
        let blocked = board.collides(&Shape::of(next), SPAWN_ROW, SPAWN_COLUMN);

        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines as u32);
        self.dispatch(BoardAction::Commit { board, next });
        self.locking = false;

        if lines > 0 {
            debug!("cleared {} rows for {} points", lines, points);
        }

        if blocked {
            info!("game over: {:?} cannot spawn, final score {}", next, self.score);
            self.playing = false;
            self.game_over = true;
            self.lateral = Lateral::default();
            self.cadence = None;
            Ok(TickOutcome::GameOver { lines, points })
        } else {
            self.cadence = Some(Cadence::Normal);
            Ok(TickOutcome::Committed { lines, points })
        }
    }

    /// Apply an input command. Returns whether anything changed.
    pub fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.toggle_pause(),
            _ if !self.playing || self.paused => false,
            Command::MoveLeft(state) => {
                self.lateral.left = state == KeyState::Pressed;
                self.shift()
            }
            Command::MoveRight(state) => {
                self.lateral.right = state == KeyState::Pressed;
                self.shift()
            }
            Command::Rotate => self.apply_move(false, false, true),
            Command::SoftDrop(KeyState::Pressed) => {
                self.cadence = Some(Cadence::Fast);
                true
            }
            Command::SoftDrop(KeyState::Released) => {
                self.cadence = Some(Cadence::Normal);
                true
            }
        }
    }

    /// Re-assert the held direction (lateral repeat timer)
    pub fn repeat_lateral(&mut self) -> bool {
        if !self.playing || self.paused || !self.lateral.is_held() {
            return false;
        }
        self.shift()
    }

    fn shift(&mut self) -> bool {
        let Lateral { left, right } = self.lateral;
        self.apply_move(left, right, false)
    }

    fn apply_move(&mut self, left: bool, right: bool, rotate: bool) -> bool {
        let before = *self.active();
        self.dispatch(BoardAction::Move {
            left,
            right,
            rotate,
        });
        *self.active() != before
    }

    /// Toggle pause while playing. Pausing stops ticking and releases held
    /// directions; resuming restores the cadence the lock state calls for.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.playing {
            return false;
        }

        self.paused = !self.paused;
        if self.paused {
            self.lateral = Lateral::default();
            self.cadence = None;
        } else if self.locking {
            self.cadence = Some(Cadence::Sliding);
        } else {
            self.cadence = Some(Cadence::Normal);
        }
        debug!("paused: {}", self.paused);
        true
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let mut overlay = self.board().clone();
        let active = *self.active();
        if self.playing {
            overlay.merge(&active.shape, active.row, active.column, active.kind);
        }
        overlay.write_grid(&mut out.board);

        out.active = self.playing.then_some(active);
        out.upcoming = *self.upcoming.pieces();
        out.score = self.score;
        out.lines = self.lines;
        out.playing = self.playing;
        out.game_over = self.game_over;
        out.paused = self.paused;
        out.locking = self.locking;
        out.cadence = self.cadence;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(SimpleRng::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedSequence;

    fn game_of(kind: PieceKind) -> GameState<FixedSequence> {
        let mut game = GameState::new(FixedSequence::repeat(kind));
        game.start();
        game
    }

    fn fill_row_except(board: &mut Board, row: i8, gaps: &[i8]) {
        for column in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&column) {
                board.set(row, column, Some(PieceKind::Z));
            }
        }
    }

    /// Tick until the active piece locks
    fn drop_until_locked<R: PieceSource>(game: &mut GameState<R>) -> TickOutcome {
        for _ in 0..100 {
            match game.tick().unwrap() {
                outcome @ (TickOutcome::Committed { .. } | TickOutcome::GameOver { .. }) => {
                    return outcome
                }
                _ => {}
            }
        }
        panic!("piece never locked");
    }

    fn press(game: &mut GameState<FixedSequence>, command: fn(KeyState) -> Command) -> bool {
        let moved = game.handle_command(command(KeyState::Pressed));
        game.handle_command(command(KeyState::Released));
        moved
    }

    #[test]
    fn test_new_game_state() {
        let game = GameState::new(SimpleRng::new(12345));
        assert!(!game.playing());
        assert!(!game.locking());
        assert_eq!(game.cadence(), None);
        assert_eq!(game.score(), 0);
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_start() {
        let mut game = GameState::new(FixedSequence::new(vec![
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::L,
        ]));
        assert!(game.start());

        assert!(game.playing());
        assert_eq!(game.cadence(), Some(Cadence::Normal));
        assert_eq!(game.upcoming().len(), 3);
        assert_eq!(game.active().row, 0);
        assert_eq!(game.active().column, 3);
        assert!(game.board().is_empty());

        // Start is only honoured while not playing.
        assert!(!game.start());
    }

    #[test]
    fn test_tick_when_not_playing_is_idle() {
        let mut game = GameState::new(SimpleRng::new(1));
        assert_eq!(game.tick(), Ok(TickOutcome::Idle));
    }

    #[test]
    fn test_landing_enters_sliding_then_commits() {
        let mut game = game_of(PieceKind::O);

        // O spawns at row 0 and rests on the floor at row 18.
        for _ in 0..18 {
            assert_eq!(game.tick(), Ok(TickOutcome::Dropped));
        }
        assert_eq!(game.active().row, 18);

        assert_eq!(game.tick(), Ok(TickOutcome::Landed));
        assert!(game.locking());
        assert_eq!(game.cadence(), Some(Cadence::Sliding));

        assert_eq!(
            game.tick(),
            Ok(TickOutcome::Committed {
                lines: 0,
                points: 0
            })
        );
        assert!(!game.locking());
        assert_eq!(game.cadence(), Some(Cadence::Normal));
        assert_eq!(game.board().get(19, 3), Some(Some(PieceKind::O)));
        assert_eq!(game.board().get(18, 4), Some(Some(PieceKind::O)));
        assert_eq!(*game.active(), Tetromino::spawn(PieceKind::O));
        assert_eq!(game.upcoming().len(), 3);
    }

    #[test]
    fn test_sliding_off_a_ledge_resumes_fall() {
        let mut game = game_of(PieceKind::O);
        // Ledge under columns 3-4 at row 10; open to the right.
        game.board_mut().set(10, 3, Some(PieceKind::J));
        game.board_mut().set(10, 4, Some(PieceKind::J));

        assert_eq!(drop_to_landing(&mut game), 8);
        assert_eq!(game.cadence(), Some(Cadence::Sliding));

        // Two steps right clears the ledge.
        assert!(press(&mut game, Command::MoveRight));
        assert!(press(&mut game, Command::MoveRight));

        assert_eq!(game.tick(), Ok(TickOutcome::Resumed));
        assert!(!game.locking());
        assert_eq!(game.cadence(), Some(Cadence::Normal));
        assert_eq!(game.tick(), Ok(TickOutcome::Dropped));
    }

    fn drop_to_landing(game: &mut GameState<FixedSequence>) -> i8 {
        loop {
            match game.tick().unwrap() {
                TickOutcome::Dropped => {}
                TickOutcome::Landed => return game.active().row,
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_grace_window_is_one_tick() {
        let mut game = game_of(PieceKind::O);
        drop_to_landing(&mut game);

        // Moving along the floor does not extend the window.
        assert!(press(&mut game, Command::MoveLeft));
        assert!(matches!(game.tick(), Ok(TickOutcome::Committed { .. })));
    }

    #[test]
    fn test_single_line_clear_scores_100() {
        let mut game = game_of(PieceKind::I);
        fill_row_except(game.board_mut(), 19, &[3, 4, 5, 6]);
        game.board_mut().set(18, 0, Some(PieceKind::L));

        let outcome = drop_until_locked(&mut game);
        assert_eq!(
            outcome,
            TickOutcome::Committed {
                lines: 1,
                points: 100
            }
        );
        assert_eq!(game.score(), 100);
        assert_eq!(game.lines(), 1);
        assert_eq!(game.board().get(19, 0), Some(Some(PieceKind::L)));
        assert_eq!(game.board().cells().iter().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn test_tetris_scores_800() {
        let mut game = game_of(PieceKind::I);
        for row in 16..20 {
            fill_row_except(game.board_mut(), row, &[0]);
        }

        // Rotate to vertical (local column 1), then slide to column 0.
        assert!(game.handle_command(Command::Rotate));
        for _ in 0..4 {
            press(&mut game, Command::MoveLeft);
        }
        assert_eq!(game.active().column, -1);

        let outcome = drop_until_locked(&mut game);
        assert_eq!(
            outcome,
            TickOutcome::Committed {
                lines: 4,
                points: 800
            }
        );
        assert!(game.board().is_empty());
    }

    #[test]
    fn test_five_full_rows_fails_without_mutation() {
        let mut game = game_of(PieceKind::O);
        for row in 15..20 {
            fill_row_except(game.board_mut(), row, &[]);
        }
        // O lands on top and completes nothing; the five stale rows trip the table.
        drop_to_landing(&mut game);
        let board_before = game.board().clone();
        let upcoming_before = *game.upcoming();
        let active_before = *game.active();

        assert_eq!(game.tick(), Err(CoreError::UnscoredLineClear { lines: 5 }));
        assert_eq!(game.board(), &board_before);
        assert_eq!(game.upcoming(), &upcoming_before);
        assert_eq!(*game.active(), active_before);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_spawn_collision_ends_game() {
        let mut game = game_of(PieceKind::I);
        // The horizontal I occupies board row 2, columns 3-6. Block its fall
        // directly so it locks in the spawn area.
        game.board_mut().set(3, 3, Some(PieceKind::S));

        assert_eq!(game.tick(), Ok(TickOutcome::Landed));
        assert_eq!(
            game.tick(),
            Ok(TickOutcome::GameOver {
                lines: 0,
                points: 0
            })
        );
        assert!(!game.playing());
        assert!(game.game_over());
        assert!(game.snapshot().game_over);
        assert_eq!(game.cadence(), None);
        assert_eq!(game.tick(), Ok(TickOutcome::Idle));

        // A new session can be started afterwards.
        assert!(game.handle_command(Command::Start));
        assert!(!game.game_over());
        assert!(game.board().is_empty());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_soft_drop_switches_cadence() {
        let mut game = game_of(PieceKind::T);
        assert!(game.handle_command(Command::SoftDrop(KeyState::Pressed)));
        assert_eq!(game.cadence(), Some(Cadence::Fast));
        // Soft drop only changes the cadence, it does not move the piece.
        assert_eq!(game.active().row, 0);
        assert!(game.handle_command(Command::SoftDrop(KeyState::Released)));
        assert_eq!(game.cadence(), Some(Cadence::Normal));
    }

    #[test]
    fn test_held_direction_repeats() {
        let mut game = game_of(PieceKind::O);
        assert!(game.handle_command(Command::MoveRight(KeyState::Pressed)));
        assert_eq!(game.active().column, 4);
        assert!(game.lateral().right);

        assert!(game.repeat_lateral());
        assert!(game.repeat_lateral());
        assert_eq!(game.active().column, 6);

        game.handle_command(Command::MoveRight(KeyState::Released));
        assert!(!game.lateral().is_held());
        assert!(!game.repeat_lateral());
        assert_eq!(game.active().column, 6);
    }

    #[test]
    fn test_release_with_other_direction_held_moves_that_way() {
        let mut game = game_of(PieceKind::O);
        game.handle_command(Command::MoveLeft(KeyState::Pressed));
        assert_eq!(game.active().column, 2);
        // Both held: right wins.
        game.handle_command(Command::MoveRight(KeyState::Pressed));
        assert_eq!(game.active().column, 3);
        game.handle_command(Command::MoveRight(KeyState::Released));
        assert_eq!(game.active().column, 2);
    }

    #[test]
    fn test_rejected_move_leaves_piece_unchanged() {
        let mut game = game_of(PieceKind::O);
        for _ in 0..5 {
            press(&mut game, Command::MoveLeft);
        }
        let before = *game.active();
        assert!(!press(&mut game, Command::MoveLeft));
        assert_eq!(*game.active(), before);
    }

    #[test]
    fn test_commands_ignored_when_not_playing() {
        let mut game = GameState::new(FixedSequence::repeat(PieceKind::T));
        let before = *game.active();
        assert!(!game.handle_command(Command::MoveLeft(KeyState::Pressed)));
        assert!(!game.handle_command(Command::Rotate));
        assert!(!game.handle_command(Command::SoftDrop(KeyState::Pressed)));
        assert!(!game.handle_command(Command::Pause));
        assert_eq!(*game.active(), before);
        assert_eq!(game.cadence(), None);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut game = game_of(PieceKind::T);
        game.handle_command(Command::MoveLeft(KeyState::Pressed));

        assert!(game.handle_command(Command::Pause));
        assert!(game.paused());
        assert_eq!(game.cadence(), None);
        assert!(!game.lateral().is_held());
        assert_eq!(game.tick(), Ok(TickOutcome::Idle));
        assert!(!game.handle_command(Command::Rotate));

        assert!(game.handle_command(Command::Pause));
        assert!(!game.paused());
        assert_eq!(game.cadence(), Some(Cadence::Normal));
    }

    #[test]
    fn test_resume_while_locking_restores_sliding() {
        let mut game = game_of(PieceKind::O);
        drop_to_landing(&mut game);
        game.toggle_pause();
        game.toggle_pause();
        assert_eq!(game.cadence(), Some(Cadence::Sliding));
    }

    #[test]
    fn test_stop_ends_without_game_over() {
        let mut game = game_of(PieceKind::T);
        game.stop();
        assert!(!game.playing());
        assert!(!game.game_over());
        assert_eq!(game.cadence(), None);
    }

    #[test]
    fn test_stop_with_locked_pieces_is_not_game_over() {
        let mut game = game_of(PieceKind::O);
        drop_to_landing(&mut game);
        assert!(matches!(game.tick(), Ok(TickOutcome::Committed { .. })));
        assert!(!game.board().is_empty());

        game.stop();
        let snap = game.snapshot();
        assert!(!snap.playing);
        assert!(!snap.game_over);
        assert_eq!(snap.cell(19, 3), Some(PieceKind::O));
    }

    #[test]
    fn test_snapshot_overlays_active_piece() {
        let game = game_of(PieceKind::O);
        let snap = game.snapshot();

        assert_eq!(snap.cell(0, 3), Some(PieceKind::O));
        assert_eq!(snap.cell(1, 4), Some(PieceKind::O));
        assert!(game.board().is_empty(), "overlay must not touch the board");
        assert_eq!(snap.upcoming, *game.upcoming());
        assert!(snap.playing);
    }

    #[test]
    fn test_spawned_i_keeps_its_empty_top_rows() {
        // The I bounding box is not compacted, so its bar sits on board row 2.
        let snap = game_of(PieceKind::I).snapshot();
        for column in 3..7 {
            assert_eq!(snap.cell(2, column), Some(PieceKind::I));
        }
        assert!(snap.board[..2].iter().flatten().all(|c| c.is_none()));
    }

    #[test]
    fn test_snapshot_without_session_has_no_overlay() {
        let game = GameState::new(FixedSequence::repeat(PieceKind::O));
        let snap = game.snapshot();
        assert!(snap.board.iter().flatten().all(|c| c.is_none()));
        assert!(snap.active.is_none());
    }
}
