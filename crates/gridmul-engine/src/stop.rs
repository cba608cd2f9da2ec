//! Cooperative stop signal for the background task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable stop flag shared between the background loop and its
/// controller.
///
/// `stop` is sticky: once set it stays set for every clone. The background
/// loop polls `is_stopped` at iteration boundaries only, so a
/// multiplication in progress always completes.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal stop. Idempotent.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    /// True once `stop` has been called on any clone.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running() {
        assert!(!StopToken::new().is_stopped());
    }

    #[test]
    fn stop_is_visible_to_clones() {
        let token = StopToken::new();
        let observer = token.clone();

        token.stop();

        assert!(observer.is_stopped());
    }

    #[test]
    fn stop_is_idempotent() {
        let token = StopToken::new();
        token.stop();
        token.stop();
        assert!(token.is_stopped());
    }

    #[test]
    fn stop_crosses_threads() {
        let token = StopToken::new();
        let observer = token.clone();

        let handle = std::thread::spawn(move || {
            while !observer.is_stopped() {
                std::thread::yield_now();
            }
            true
        });

        token.stop();
        assert!(handle.join().unwrap());
    }
}
