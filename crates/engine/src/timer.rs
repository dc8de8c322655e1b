//! Cancellable periodic timer.
//!
//! A [`Timer`] is a spawned tokio task that sends a copy of one event into a
//! channel every period. The handle is the only way to stop it: dropping the
//! handle aborts the task, so a timer can never outlive its owner.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

#[derive(Debug)]
pub struct Timer {
    handle: JoinHandle<()>,
}

impl Timer {
    /// Send `event` every `period`, first one `period` from now.
    ///
    /// The task also ends on its own once the receiver is gone.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn every<E>(period: Duration, tx: UnboundedSender<E>, event: E) -> Self
    where
        E: Clone + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(event.clone()).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_fires_every_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();
        let _timer = Timer::every(Duration::from_millis(100), tx, 7u8);

        assert_eq!(rx.recv().await, Some(7));
        assert_eq!(start.elapsed(), Duration::from_millis(100));
        assert_eq!(rx.recv().await, Some(7));
        assert_eq!(start.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = Timer::every(Duration::from_millis(100), tx, ());
        drop(timer);

        // The only sender lived in the aborted task.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel::<()>();
        let timer = Timer::every(Duration::from_millis(10), tx, ());
        drop(rx);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(timer.is_finished());
    }
}
