//! Threshold update transaction
//!
//! Applies a sparse [`ThresholdUpdate`] all-or-nothing with respect to
//! validation: the request is merged over the cached setpoints, the merged
//! set is checked against every invariant, and only a clean set reaches the
//! chip. The whole sequence runs under the cache lock, so no refresh or
//! competing update can slip in between validation and commit.
//!
//! Only fields the caller supplied are written, in register order
//! (low, high, critical, hysteresis). A transport failure on the first write
//! changes nothing. A failure after at least one write is a
//! [`PartialHardwareCommit`](Lm77Error::PartialHardwareCommit): the chip
//! already holds some new setpoints, so the cache is invalidated and the next
//! read re-syncs from the chip.

use heapless::Vec;

use crate::cache::ReadingCache;
use crate::codec::encode;
use crate::errors::{Lm77Error, Lm77Result};
use crate::registers::write_value;
use crate::thresholds::{ThresholdSet, ThresholdUpdate};
use crate::traits::{RegisterBus, TimeSource};

/// Validate `update` against the cached setpoints and write it to the chip
///
/// Returns the merged set now in effect, clamped to the sensor range.
pub fn apply<B, T>(
    cache: &ReadingCache<B, T>,
    update: &ThresholdUpdate,
) -> Lm77Result<ThresholdSet, B::Error>
where
    B: RegisterBus,
    T: TimeSource,
{
    let mut state = cache.lock();
    let mut snapshot = cache.current(&mut state)?;
    let candidate = snapshot.thresholds().merge(update);

    if let Err(violations) = candidate.validate() {
        for violation in &violations {
            lm_warn!("lm77: invariant {} failed: {}", violation.invariant(), violation);
        }
        lm_warn!("lm77: changes not applied");
        return Err(Lm77Error::ValidationRejected(violations));
    }

    let mut written = Vec::new();
    for (register, temp) in update.writes() {
        if let Err(cause) = write_value(&mut state.bus, register, encode(temp)) {
            if written.is_empty() {
                return Err(Lm77Error::Transport { register, cause });
            }
            lm_warn!(
                "lm77: {} write failed after {} register(s), cache invalidated",
                register.as_str(),
                written.len()
            );
            state.snapshot = None;
            return Err(Lm77Error::PartialHardwareCommit {
                written,
                failed: register,
                cause,
            });
        }
        // One slot per setpoint register
        let _ = written.push(register);
    }

    // crit and hyst skip the range check; keep the cache within what encode sent
    let committed = candidate.clamped();
    snapshot.apply_thresholds(committed);
    state.snapshot = Some(snapshot);

    if !written.is_empty() {
        lm_info!("lm77: changes applied ({} register(s))", written.len());
    }
    Ok(committed)
}
