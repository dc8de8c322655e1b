//! Engine configuration from environment variables.

use std::env;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::{Cadence, FAST_TICK_MS, MOVE_REPEAT_MS, NORMAL_TICK_MS, SLIDING_TICK_MS};

/// Timer intervals in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub normal_ms: u32,
    pub fast_ms: u32,
    pub sliding_ms: u32,
    pub repeat_ms: u32,
}

impl Timing {
    /// Tick interval for a cadence
    pub fn tick_interval(&self, cadence: Cadence) -> Duration {
        let ms = match cadence {
            Cadence::Normal => self.normal_ms,
            Cadence::Fast => self.fast_ms,
            Cadence::Sliding => self.sliding_ms,
        };
        Duration::from_millis(ms.max(1) as u64)
    }

    /// Lateral repeat interval
    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_ms.max(1) as u64)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            normal_ms: NORMAL_TICK_MS,
            fast_ms: FAST_TICK_MS,
            sliding_ms: SLIDING_TICK_MS,
            repeat_ms: MOVE_REPEAT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub timing: Timing,
    pub seed: u32,
    pub log_path: Option<String>,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Timing::default();
        let timing = Timing {
            normal_ms: parse_var("TETRIS_NORMAL_MS").unwrap_or(defaults.normal_ms),
            fast_ms: parse_var("TETRIS_FAST_MS").unwrap_or(defaults.fast_ms),
            sliding_ms: parse_var("TETRIS_SLIDING_MS").unwrap_or(defaults.sliding_ms),
            repeat_ms: parse_var("TETRIS_REPEAT_MS").unwrap_or(defaults.repeat_ms),
        };

        let seed = parse_var("TETRIS_SEED").unwrap_or_else(clock_seed);

        let log_path = match env::var("TETRIS_LOG_PATH") {
            Ok(s) => {
                let s = s.trim().to_string();
                if s.is_empty() {
                    None
                } else {
                    Some(s)
                }
            }
            Err(_) => Some(DEFAULT_LOG_PATH.to_string()),
        };

        Self {
            timing,
            seed,
            log_path,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timing: Timing::default(),
            seed: 1,
            log_path: Some(DEFAULT_LOG_PATH.to_string()),
        }
    }
}

const DEFAULT_LOG_PATH: &str = "tetris-session.log";

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
