//! Time sources for the timer registry
//!
//! Every stored timer instant is a value read from a [`Clock`]. The registry
//! layers pause-awareness on top, so clocks report plain wall-clock time.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use time::OffsetDateTime;

/// Source of "now" in milliseconds since a fixed epoch.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

/// Wall-clock milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and hand
/// another to the registry.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start_millis)),
        }
    }

    /// Jump to an absolute instant (may go backwards)
    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    /// Advance by a delta, saturating on overflow
    pub fn advance_by(&self, millis: i64) {
        let _ = self
            .now
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                Some(current.saturating_add(millis))
            });
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(1_000);
        let handle = clock.clone();

        handle.advance_by(250);
        assert_eq!(clock.now_millis(), 1_250);

        clock.set(10);
        assert_eq!(handle.now_millis(), 10);
    }

    #[test]
    fn test_manual_clock_saturates() {
        let clock = ManualClock::new(i64::MAX - 1);
        clock.advance_by(10);
        assert_eq!(clock.now_millis(), i64::MAX);
    }

    #[test]
    fn test_concurrent_advances_are_not_lost() {
        let clock = ManualClock::new(0);
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handle = clock.clone();
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        handle.advance_by(1);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(clock.now_millis(), 4_000);
    }

    #[test]
    fn test_system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
