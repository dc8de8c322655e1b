//! Held-key tracking for terminal environments.
//!
//! Without the keyboard enhancement protocol most terminals report neither key
//! releases nor a distinct repeat kind: holding a key produces a stream of
//! presses. The handler collapses those into a single press edge and, as long
//! as no real release has ever been observed, synthesizes the release once a
//! held key has gone quiet for the timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::types::{Command, KeyState};

/// Keys with a held state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeldKey {
    Left,
    Right,
    Down,
}

impl HeldKey {
    fn of(command: Command) -> Option<(Self, KeyState)> {
        match command {
            Command::MoveLeft(state) => Some((HeldKey::Left, state)),
            Command::MoveRight(state) => Some((HeldKey::Right, state)),
            Command::SoftDrop(state) => Some((HeldKey::Down, state)),
            Command::Rotate | Command::Start | Command::Pause => None,
        }
    }

    fn command(self, state: KeyState) -> Command {
        match self {
            HeldKey::Left => Command::MoveLeft(state),
            HeldKey::Right => Command::MoveRight(state),
            HeldKey::Down => Command::SoftDrop(state),
        }
    }
}

// A single tap must not turn into a sustained hold on terminals that never
// send the release.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone)]
pub struct InputHandler {
    held: ArrayVec<(HeldKey, Instant), 3>,
    key_release_timeout: Duration,
    reports_releases: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            held: ArrayVec::new(),
            key_release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
            reports_releases: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn key_release_timeout(&self) -> Duration {
        self.key_release_timeout
    }

    /// True once the terminal has delivered a real release event
    pub fn reports_releases(&self) -> bool {
        self.reports_releases
    }

    pub fn is_held(&self, key: HeldKey) -> bool {
        self.held.iter().any(|(k, _)| *k == key)
    }

    /// Filter a mapped command seen at `now`.
    ///
    /// Presses of an already-held key only refresh its timestamp. Releases of
    /// a key that is not held (already synthesized) are dropped.
    pub fn handle(&mut self, command: Command, now: Instant) -> Option<Command> {
        let Some((key, state)) = HeldKey::of(command) else {
            return Some(command);
        };

        let slot = self.held.iter().position(|(k, _)| *k == key);
        match (state, slot) {
            (KeyState::Pressed, Some(i)) => {
                self.held[i].1 = now;
                None
            }
            (KeyState::Pressed, None) => {
                // Capacity equals the number of held keys, so this cannot fail.
                let _ = self.held.try_push((key, now));
                Some(command)
            }
            (KeyState::Released, Some(i)) => {
                self.reports_releases = true;
                self.held.remove(i);
                Some(command)
            }
            (KeyState::Released, None) => {
                self.reports_releases = true;
                None
            }
        }
    }

    /// Synthesize releases for keys not seen within the timeout
    pub fn expire(&mut self, now: Instant) -> ArrayVec<Command, 3> {
        let mut released = ArrayVec::new();
        if self.reports_releases {
            return released;
        }

        let timeout = self.key_release_timeout;
        self.held.retain(|(key, seen)| {
            if now.saturating_duration_since(*seen) > timeout {
                released.push(key.command(KeyState::Released));
                false
            } else {
                true
            }
        });
        released
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
