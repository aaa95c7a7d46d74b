//! Reading cache
//!
//! Holds the last [`SensorSnapshot`] together with the bus it came from,
//! behind one lock. Readers inside the staleness window get the cached copy;
//! the first reader after it expires pays for one refresh while everyone
//! else waits on the lock, so a burst of readers costs one set of register
//! reads.
//!
//! A snapshot is refreshed when:
//! - none has been fetched yet (or it was invalidated)
//! - it is older than the staleness window
//! - the clock reads earlier than `fetched_at` (wraparound or a reset
//!   clock; the age is unknowable, so the data is not trusted)
//! - a thread panicked while holding the lock
//!
//! A refresh reads into locals and only replaces the snapshot once every
//! register came back, so a transport failure leaves the previous state
//! exactly as it was.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::codec::decode;
use crate::errors::{Lm77Error, Lm77Result};
use crate::registers::{read_value, Register};
use crate::snapshot::{AlarmFlags, SensorSnapshot};
use crate::time::Timestamp;
use crate::traits::{RegisterBus, TimeSource};

/// State guarded by the cache lock
pub(crate) struct CacheState<B> {
    pub(crate) bus: B,
    pub(crate) snapshot: Option<SensorSnapshot>,
}

/// Time-bounded cache of one sensor's registers
pub struct ReadingCache<B, T> {
    state: Mutex<CacheState<B>>,
    clock: T,
    staleness_ms: u64,
}

impl<B: RegisterBus, T: TimeSource> ReadingCache<B, T> {
    /// Create an empty cache; the first read fetches from the chip
    pub fn new(bus: B, clock: T, staleness_ms: u64) -> Self {
        Self {
            state: Mutex::new(CacheState {
                bus,
                snapshot: None,
            }),
            clock,
            staleness_ms,
        }
    }

    /// Current snapshot, refreshing from the chip if stale
    pub fn get_snapshot(&self) -> Lm77Result<SensorSnapshot, B::Error> {
        let mut state = self.lock();
        self.current(&mut state)
    }

    /// Re-read every register regardless of age
    pub fn refresh(&self) -> Lm77Result<SensorSnapshot, B::Error> {
        let mut state = self.lock();
        self.refresh_locked(&mut state)
    }

    /// Drop the snapshot so the next read goes to the chip
    pub fn invalidate(&self) {
        self.lock().snapshot = None;
    }

    /// Snapshot as cached, without touching the bus
    pub fn cached(&self) -> Option<SensorSnapshot> {
        self.lock().snapshot
    }

    /// Configured staleness window in milliseconds
    pub fn staleness_ms(&self) -> u64 {
        self.staleness_ms
    }

    /// Tear down the cache and hand back the bus
    pub fn release(self) -> B {
        // Only the bus survives, so a poisoned snapshot does not matter here
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .bus
    }

    /// Take the cache lock
    ///
    /// A panic while the lock was held may have come between two setpoint
    /// writes, so after poisoning the chip is not trusted to match the
    /// snapshot. The snapshot is dropped and the next read refreshes.
    pub(crate) fn lock(&self) -> MutexGuard<'_, CacheState<B>> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                lm_warn!("lm77: lock poisoned, dropping cached state");
                self.state.clear_poison();
                let mut guard = poisoned.into_inner();
                guard.snapshot = None;
                guard
            }
        }
    }

    /// Snapshot under an already held lock, refreshing if stale
    pub(crate) fn current(&self, state: &mut CacheState<B>) -> Lm77Result<SensorSnapshot, B::Error> {
        let now = self.clock.now();
        if let Some(snapshot) = state.snapshot {
            if self.is_fresh(&snapshot, now) {
                return Ok(snapshot);
            }
        }
        self.refresh_locked(state)
    }

    fn is_fresh(&self, snapshot: &SensorSnapshot, now: Timestamp) -> bool {
        matches!(snapshot.age_at(now), Some(age) if age <= self.staleness_ms)
    }

    fn refresh_locked(&self, state: &mut CacheState<B>) -> Lm77Result<SensorSnapshot, B::Error> {
        lm_debug!("lm77: starting update");

        let snapshot = match self.fetch(&mut state.bus) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                lm_warn!("lm77: update failed, keeping previous state");
                return Err(err);
            }
        };

        state.snapshot = Some(snapshot);
        lm_debug!(
            "lm77: updated at {} ms, temp {} mC",
            snapshot.fetched_at,
            snapshot.current_temp
        );
        Ok(snapshot)
    }

    fn fetch(&self, bus: &mut B) -> Lm77Result<SensorSnapshot, B::Error> {
        let mut read = |register: Register| {
            read_value(bus, register).map_err(|cause| Lm77Error::Transport { register, cause })
        };

        let temp = read(Register::Temperature)?;
        let hyst = read(Register::Hysteresis)?;
        let crit = read(Register::Critical)?;
        let low = read(Register::Low)?;
        let high = read(Register::High)?;

        Ok(SensorSnapshot {
            current_temp: decode(temp),
            temp_min: decode(low),
            temp_max: decode(high),
            temp_crit: decode(crit),
            temp_hyst: decode(hyst),
            alarm_flags: AlarmFlags::from_temperature_register(temp),
            fetched_at: self.clock.now(),
        })
    }
}
