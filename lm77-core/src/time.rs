//! Time sources
//!
//! - [`MonotonicClock`]: milliseconds since construction, from the OS
//!   monotonic clock (requires `std`)
//! - [`MockTimeSource`]: manually driven time for tests; clones share one
//!   counter so a test can advance the clock a device is holding

#[cfg(feature = "std")]
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

#[cfg(feature = "std")]
use crate::traits::TimeSource;

/// Timestamp in milliseconds since an arbitrary epoch
pub type Timestamp = u64;

/// Monotonic clock backed by `std::time::Instant`
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Start a clock at zero
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl TimeSource for MonotonicClock {
    fn now(&self) -> Timestamp {
        // u64 milliseconds outlasts any realistic uptime
        self.origin.elapsed().as_millis() as Timestamp
    }
}

/// Controllable time source for testing
///
/// Cloning shares the underlying counter.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct MockTimeSource {
    now: Arc<AtomicU64>,
}

#[cfg(feature = "std")]
impl MockTimeSource {
    /// Create a source frozen at `start`
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Jump to an absolute timestamp (may go backwards)
    pub fn set(&self, timestamp: Timestamp) {
        self.now.store(timestamp, Ordering::SeqCst);
    }

    /// Move forward by `ms`
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

#[cfg(feature = "std")]
impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}
