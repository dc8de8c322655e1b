//! Tick and lateral-repeat timers.
//!
//! The scheduler owns at most one tick timer and at most one repeat timer.
//! Changing the cadence drops the old tick timer and starts a new one in the
//! same call, so two tick timers never coexist. Every timer is tagged with a
//! generation number that travels inside its events; an event whose
//! generation no longer matches a live timer was already queued when that
//! timer was replaced and is discarded by [`Scheduler::is_current`].
//!
//! The repeat timer is keyed by the held directions. Any change to them
//! replaces it, so a newly held direction waits one full repeat interval.

use log::{debug, trace};
use tokio::sync::mpsc::UnboundedSender;

use crate::config::Timing;
use crate::core::Lateral;
use crate::session::Event;
use crate::timer::Timer;
use crate::types::Cadence;

#[derive(Debug)]
struct TickTimer {
    cadence: Cadence,
    generation: u64,
    _timer: Timer,
}

#[derive(Debug)]
struct RepeatTimer {
    held: Lateral,
    generation: u64,
    _timer: Timer,
}

#[derive(Debug)]
pub struct Scheduler {
    tx: UnboundedSender<Event>,
    timing: Timing,
    generation: u64,
    tick: Option<TickTimer>,
    repeat: Option<RepeatTimer>,
}

impl Scheduler {
    pub fn new(tx: UnboundedSender<Event>, timing: Timing) -> Self {
        Self {
            tx,
            timing,
            generation: 0,
            tick: None,
            repeat: None,
        }
    }

    /// Cadence of the running tick timer
    pub fn cadence(&self) -> Option<Cadence> {
        self.tick.as_ref().map(|t| t.cadence)
    }

    pub fn repeating(&self) -> bool {
        self.repeat.is_some()
    }

    fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Run the tick timer at `cadence`, or stop it with `None`.
    ///
    /// Returns whether the timer was replaced. An unchanged cadence keeps the
    /// running timer and its phase.
    pub fn set_cadence(&mut self, cadence: Option<Cadence>) -> bool {
        if self.cadence() == cadence {
            return false;
        }

        // Old timer is aborted before the new one exists.
        self.tick = None;

        if let Some(cadence) = cadence {
            let generation = self.next_generation();
            let period = self.timing.tick_interval(cadence);
            debug!("tick timer {} at {} ({:?})", generation, cadence.as_str(), period);
            self.tick = Some(TickTimer {
                cadence,
                generation,
                _timer: Timer::every(period, self.tx.clone(), Event::Tick { generation }),
            });
        }
        true
    }

    /// Directions the running repeat timer was started for
    pub fn repeat_held(&self) -> Lateral {
        self.repeat.as_ref().map(|t| t.held).unwrap_or_default()
    }

    /// Run the repeat timer for `held`, or stop it when nothing is held.
    ///
    /// Returns whether the timer was replaced. Any change in the held
    /// directions restarts it with a fresh generation.
    pub fn set_repeat(&mut self, held: Lateral) -> bool {
        if self.repeat_held() == held {
            return false;
        }

        self.repeat = None;

        if held.is_held() {
            let generation = self.next_generation();
            trace!("repeat timer {} for {:?}", generation, held);
            self.repeat = Some(RepeatTimer {
                held,
                generation,
                _timer: Timer::every(
                    self.timing.repeat_interval(),
                    self.tx.clone(),
                    Event::Repeat { generation },
                ),
            });
        }
        true
    }

    /// False for timer events from a timer that has since been replaced
    pub fn is_current(&self, event: &Event) -> bool {
        match *event {
            Event::Tick { generation } => self.tick.as_ref().map(|t| t.generation) == Some(generation),
            Event::Repeat { generation } => {
                self.repeat.as_ref().map(|t| t.generation) == Some(generation)
            }
            Event::Command(_) | Event::Quit => true,
        }
    }

    pub fn cancel_all(&mut self) {
        self.tick = None;
        self.repeat = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_cadence_change_replaces_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx, Timing::default());
        let start = Instant::now();

        assert!(scheduler.set_cadence(Some(Cadence::Normal)));
        assert!(!scheduler.set_cadence(Some(Cadence::Normal)));
        assert!(scheduler.set_cadence(Some(Cadence::Fast)));
        assert_eq!(scheduler.cadence(), Some(Cadence::Fast));

        let event = rx.recv().await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(50));
        assert!(scheduler.is_current(&event));
        assert!(!scheduler.is_current(&Event::Tick { generation: 1 }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_queued_tick_goes_stale_on_replace() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx, Timing::default());

        scheduler.set_cadence(Some(Cadence::Sliding));
        let queued = rx.recv().await.unwrap();
        assert!(scheduler.is_current(&queued));

        scheduler.set_cadence(Some(Cadence::Normal));
        assert!(!scheduler.is_current(&queued));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ticking() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx, Timing::default());

        scheduler.set_cadence(Some(Cadence::Fast));
        assert!(scheduler.set_cadence(None));
        assert_eq!(scheduler.cadence(), None);

        let waited = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(waited.is_err(), "no tick after the timer is stopped");
    }

    const LEFT: Lateral = Lateral { left: true, right: false };
    const BOTH: Lateral = Lateral { left: true, right: true };

    #[tokio::test(start_paused = true)]
    async fn test_repeat_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx, Timing::default());
        let start = Instant::now();

        assert!(scheduler.set_repeat(LEFT));
        assert!(!scheduler.set_repeat(LEFT));
        assert!(scheduler.repeating());

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::Repeat { .. }));
        assert_eq!(start.elapsed(), Duration::from_millis(150));

        assert!(scheduler.set_repeat(Lateral::default()));
        assert!(!scheduler.repeating());
        assert!(!scheduler.is_current(&event));
    }

    #[tokio::test(start_paused = true)]
    async fn test_direction_change_restarts_repeat() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx, Timing::default());

        scheduler.set_repeat(LEFT);
        tokio::time::sleep(Duration::from_millis(140)).await;

        let switched = Instant::now();
        assert!(scheduler.set_repeat(BOTH));
        assert_eq!(scheduler.repeat_held(), BOTH);

        let event = rx.recv().await.unwrap();
        assert_eq!(switched.elapsed(), Duration::from_millis(150));
        assert!(scheduler.is_current(&event));
    }

    #[tokio::test(start_paused = true)]
    async fn test_left_repeat_queued_before_switch_is_stale() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx, Timing::default());

        scheduler.set_repeat(LEFT);
        let queued = rx.recv().await.unwrap();
        assert!(scheduler.is_current(&queued));

        scheduler.set_repeat(BOTH);
        assert!(!scheduler.is_current(&queued));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new(tx, Timing::default());
        scheduler.set_cadence(Some(Cadence::Normal));
        scheduler.set_repeat(LEFT);

        scheduler.cancel_all();
        assert_eq!(scheduler.cadence(), None);
        assert!(!scheduler.repeating());
        assert!(scheduler.is_current(&Event::Quit));
    }
}
