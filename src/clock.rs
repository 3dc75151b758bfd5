//! Clock Module
//!
//! Time sources for entry timestamps. The cache never reads wall-clock time
//! directly; it asks an injected [`Clock`], so tests can step time by hand.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Milliseconds on a clock's own timeline.
pub type Timestamp = u64;

// == Clock Trait ==
/// A source of monotonically non-decreasing timestamps.
pub trait Clock: Send + Sync {
    /// Returns the current time in milliseconds.
    fn now(&self) -> Timestamp;
}

// == System Clock ==
/// Monotonic clock measuring milliseconds since it was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed().as_millis() as Timestamp
    }
}

// == Manual Clock ==
/// Clock that only moves when told to.
///
/// Clones share the same timeline, so a test can keep one handle and give
/// another to the cache.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

impl ManualClock {
    /// Creates a clock starting at 0 ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock starting at `start_ms`.
    pub fn starting_at(start_ms: Timestamp) -> Self {
        Self {
            now_ms: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    /// Moves time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now_ms
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    /// Jumps to `ms`. Earlier values are ignored so time never runs backwards.
    pub fn set(&self, ms: Timestamp) {
        self.now_ms.fetch_max(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now_ms.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        std::thread::sleep(Duration::from_millis(5));
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), 0);

        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), 250);

        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), 1250);
    }

    #[test]
    fn test_manual_clock_never_goes_backwards() {
        let clock = ManualClock::starting_at(1_000);

        clock.set(500);
        assert_eq!(clock.now(), 1_000);

        clock.set(2_000);
        assert_eq!(clock.now(), 2_000);
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();

        handle.advance(Duration::from_millis(42));
        assert_eq!(clock.now(), 42);
    }
}
