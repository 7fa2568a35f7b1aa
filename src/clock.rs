//! Wall-clock abstraction.
//!
//! `DynmapClient` stamps every poll with whole seconds of wall-clock time.
//! The [`Clock`] trait keeps that readable from a controllable source so the
//! frame-diffing boundary can be pinned down in tests.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of current wall-clock time, in whole seconds since the Unix
/// epoch.
pub trait Clock: Send + Sync + Debug {
    fn now_secs(&self) -> u64;
}

/// Production clock reading [`std::time::SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Manually controlled clock for tests.
///
/// Clones share the same underlying value, so a test can keep a handle and
/// advance time while the client owns its own copy.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<AtomicU64>,
}

impl FixedClock {
    pub fn new(secs: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(secs)),
        }
    }

    pub fn set(&self, secs: u64) {
        self.now.store(secs, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: u64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_secs(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_shares_state_across_clones() {
        let clock = FixedClock::new(100);
        let handle = clock.clone();

        handle.advance(25);
        assert_eq!(clock.now_secs(), 125);

        handle.set(1000);
        assert_eq!(clock.now_secs(), 1000);
    }

    #[test]
    fn system_clock_is_past_2020() {
        assert!(SystemClock.now_secs() > 1_577_836_800);
    }
}
