//! Session timer.
//!
//! Counts elapsed seconds while a session is active. The counting task runs
//! on the runtime and is aborted whenever the active flag clears, so no
//! repeating task outlives the timer or a reset.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::interval;

/// Elapsed-seconds counter gated by an active flag.
pub struct SessionTimer {
    seconds: Arc<AtomicU64>,
    active: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl SessionTimer {
    /// Creates an inactive timer at zero.
    pub fn new() -> Self {
        Self {
            seconds: Arc::new(AtomicU64::new(0)),
            active: Arc::new(AtomicBool::new(false)),
            task: Mutex::new(None),
        }
    }

    /// Starts counting. Idempotent: a running timer is left alone.
    pub fn activate(&self) {
        if self.active.swap(true, Ordering::SeqCst) {
            return;
        }

        let seconds = Arc::clone(&self.seconds);
        let active = Arc::clone(&self.active);
        let handle = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(1));
            // The first tick completes immediately; consume it so the
            // counter advances one full second after activation.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !tick(&seconds, &active) {
                    break;
                }
            }
        });

        let mut task = self.task.lock().unwrap();
        if let Some(previous) = task.replace(handle) {
            previous.abort();
        }
    }

    /// Stops counting without touching the counter.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
        if let Some(handle) = self.task.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// Stops counting and zeroes the counter.
    pub fn reset(&self) {
        self.deactivate();
        self.seconds.store(0, Ordering::SeqCst);
    }

    /// Elapsed seconds counted so far.
    pub fn elapsed_secs(&self) -> u64 {
        self.seconds.load(Ordering::SeqCst)
    }

    /// Whether the timer is currently counting.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Applies one tick; exposed for deterministic tests.
    #[cfg(test)]
    fn tick_once(&self) -> bool {
        tick(&self.seconds, &self.active)
    }
}

/// Advances the counter if the timer is still active; returns whether the
/// counting loop should continue.
fn tick(seconds: &AtomicU64, active: &AtomicBool) -> bool {
    if !active.load(Ordering::SeqCst) {
        return false;
    }
    seconds.fetch_add(1, Ordering::SeqCst);
    true
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.task.lock().unwrap().take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticks_advance_only_while_active() {
        let timer = SessionTimer::new();
        assert!(!timer.tick_once());
        assert_eq!(timer.elapsed_secs(), 0);

        timer.activate();
        assert!(timer.tick_once());
        assert!(timer.tick_once());
        assert!(timer.tick_once());
        assert_eq!(timer.elapsed_secs(), 3);

        timer.deactivate();
        assert!(!timer.tick_once());
        assert_eq!(timer.elapsed_secs(), 3);
    }

    #[tokio::test]
    async fn test_reset_zeroes_and_deactivates() {
        let timer = SessionTimer::new();
        timer.activate();
        timer.tick_once();
        timer.tick_once();

        timer.reset();
        assert_eq!(timer.elapsed_secs(), 0);
        assert!(!timer.is_active());
    }

    #[tokio::test]
    async fn test_activate_is_idempotent() {
        let timer = SessionTimer::new();
        timer.activate();
        timer.activate();
        timer.tick_once();
        assert_eq!(timer.elapsed_secs(), 1);
        timer.reset();
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_task_counts_seconds() {
        let timer = SessionTimer::new();
        timer.activate();
        // Let the counting task install its interval before moving the clock
        tokio::task::yield_now().await;

        for _ in 0..3 {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }
        assert_eq!(timer.elapsed_secs(), 3);

        timer.deactivate();
        for _ in 0..2 {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }
        assert_eq!(timer.elapsed_secs(), 3);
    }
}
