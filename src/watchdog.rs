//! End-of-stroke watchdog.
//!
//! The sensor does not always report the END of a stroke. Every forwarded
//! START/MOVE rearms a single-shot deadline; if nothing rearms or cancels it
//! in time, the timer task posts [`SurfaceCommand::WatchdogExpired`] onto the
//! surface queue and the surface synthesizes the END itself.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::surface::SurfaceCommand;

/// Restartable single-shot deadline.
///
/// Only one deadline is live at a time. Each [`reset`](Self::reset) aborts the
/// previous timer task and bumps a generation counter; an expiry message
/// carries the generation it was armed with so the owner can discard it with
/// [`claim`](Self::claim) if it was superseded before being handled.
pub struct Watchdog {
    delay: Duration,
    tx: mpsc::UnboundedSender<SurfaceCommand>,
    runtime: Handle,
    generation: u64,
    armed: bool,
    task: Option<JoinHandle<()>>,
}

impl Watchdog {
    /// Creates a disarmed watchdog.
    ///
    /// # Arguments
    /// * `delay` - Time without samples after which a stroke is considered over
    /// * `tx` - Surface command queue that receives expiry messages
    /// * `runtime` - Tokio runtime handle for spawning timer tasks
    pub fn new(delay: Duration, tx: mpsc::UnboundedSender<SurfaceCommand>, runtime: Handle) -> Self {
        Self {
            delay,
            tx,
            runtime,
            generation: 0,
            armed: false,
            task: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Generation of the most recently armed deadline.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancels any pending deadline and schedules a new one.
    pub fn reset(&mut self) {
        self.abort_pending();
        self.generation = self.generation.wrapping_add(1);
        self.armed = true;

        let generation = self.generation;
        let delay = self.delay;
        let tx = self.tx.clone();
        self.task = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the surface is shutting down
            let _ = tx.send(SurfaceCommand::WatchdogExpired(generation));
        }));
    }

    /// Cancels the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.abort_pending();
        self.armed = false;
    }

    /// Accepts an expiry message.
    ///
    /// Returns `true` exactly once for the live deadline and disarms the
    /// watchdog; stale or cancelled generations return `false`.
    pub fn claim(&mut self, generation: u64) -> bool {
        if !self.armed || generation != self.generation {
            log::trace!(
                "Discarding stale watchdog expiry (generation {}, current {})",
                generation,
                self.generation
            );
            return false;
        }
        self.armed = false;
        self.task = None;
        true
    }

    fn abort_pending(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.abort_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::error::TryRecvError;

    const DELAY: Duration = Duration::from_millis(100);

    fn watchdog() -> (Watchdog, mpsc::UnboundedReceiver<SurfaceCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Watchdog::new(DELAY, tx, Handle::current()), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_delay() {
        let (mut dog, mut rx) = watchdog();
        dog.reset();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(rx.try_recv(), Ok(SurfaceCommand::WatchdogExpired(1)));
        assert!(dog.claim(1));
        assert!(!dog.claim(1));

        tokio::time::sleep(DELAY * 3).await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_supersedes_pending_deadline() {
        let (mut dog, mut rx) = watchdog();
        for _ in 0..5 {
            dog.reset();
            tokio::time::sleep(Duration::from_millis(60)).await;
        }
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));

        tokio::time::sleep(DELAY).await;
        assert_eq!(rx.try_recv(), Ok(SurfaceCommand::WatchdogExpired(5)));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_expiry() {
        let (mut dog, mut rx) = watchdog();
        dog.reset();
        dog.cancel();
        assert!(!dog.is_armed());

        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn claim_rejects_superseded_generation() {
        let (mut dog, _rx) = watchdog();
        dog.reset();
        dog.reset();
        assert!(!dog.claim(1));
        assert!(dog.claim(2));
    }

    #[tokio::test(start_paused = true)]
    async fn claim_rejects_after_cancel() {
        let (mut dog, _rx) = watchdog();
        dog.reset();
        dog.cancel();
        assert!(!dog.claim(dog.generation()));
    }
}
