//! Session loop - one sequential event stream into the game
//!
//! Timer events and input commands share a single channel and are applied to
//! the [`GameState`] one at a time, so no two state transitions interleave.
//! After every event the scheduler is reconciled with the game: the tick timer
//! follows the game's cadence and the repeat timer restarts whenever the held
//! directions change.

use anyhow::{Context, Result};
use log::{debug, info, trace};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::Timing;
use crate::core::{GameSnapshot, GameState, Lateral, PieceSource, SimpleRng, TickOutcome};
use crate::scheduler::Scheduler;
use crate::types::Command;

/// Everything that can reach the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Tick timer fired
    Tick { generation: u64 },
    /// Lateral repeat timer fired
    Repeat { generation: u64 },
    Command(Command),
    /// Tear down: stop the game and cancel all timers
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<R: PieceSource = SimpleRng> {
    game: GameState<R>,
    scheduler: Scheduler,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
    snapshot: GameSnapshot,
}

impl<R: PieceSource> Session<R> {
    /// Wrap a game. No timer runs until the first event is handled.
    pub fn new(game: GameState<R>, timing: Timing) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            game,
            scheduler: Scheduler::new(tx.clone(), timing),
            tx,
            rx,
            snapshot: GameSnapshot::default(),
        }
    }

    /// Handle for input producers
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.tx.clone()
    }

    pub fn game(&self) -> &GameState<R> {
        &self.game
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Apply one event and bring the timers in line with the result
    pub fn handle(&mut self, event: Event) -> Result<Flow> {
        if !self.scheduler.is_current(&event) {
            trace!("dropping stale {:?}", event);
            return Ok(Flow::Continue);
        }

        match event {
            Event::Tick { .. } => {
                let outcome = self.game.tick().context("tick failed")?;
                match outcome {
                    TickOutcome::Committed { lines, .. } if lines > 0 => {
                        debug!("score {} after {} rows", self.game.score(), lines)
                    }
                    TickOutcome::GameOver { .. } => {
                        info!("game over with score {}", self.game.score())
                    }
                    _ => {}
                }
            }
            Event::Repeat { .. } => {
                self.game.repeat_lateral();
            }
            Event::Command(command) => {
                trace!("command {:?}", command);
                self.game.handle_command(command);
            }
            Event::Quit => {
                self.game.stop();
                self.scheduler.cancel_all();
                return Ok(Flow::Quit);
            }
        }

        self.reconcile();
        Ok(Flow::Continue)
    }

    fn reconcile(&mut self) {
        let active = self.game.playing() && !self.game.paused();
        let held = if active {
            self.game.lateral()
        } else {
            Lateral::default()
        };
        self.scheduler.set_cadence(self.game.cadence());
        self.scheduler.set_repeat(held);
    }

    /// Wait for the next event and apply it
    pub async fn step(&mut self) -> Result<Flow> {
        match self.rx.recv().await {
            Some(event) => self.handle(event),
            None => Ok(Flow::Quit),
        }
    }

    /// Run until [`Event::Quit`], calling `on_frame` once up front and after
    /// every event. Timers are cancelled on every exit path.
    pub async fn run<F>(&mut self, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&GameSnapshot) -> Result<()>,
    {
        self.reconcile();
        self.game.snapshot_into(&mut self.snapshot);

        let result = match on_frame(&self.snapshot) {
            Err(e) => Err(e),
            Ok(()) => loop {
                let flow = match self.step().await {
                    Ok(flow) => flow,
                    Err(e) => break Err(e),
                };
                self.game.snapshot_into(&mut self.snapshot);
                if let Err(e) = on_frame(&self.snapshot) {
                    break Err(e);
                }
                if flow == Flow::Quit {
                    break Ok(());
                }
            },
        };

        self.scheduler.cancel_all();
        result
    }
}
