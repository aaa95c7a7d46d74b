//! Error Types for Sensor Access and Threshold Updates
//!
//! ## Error Categories
//!
//! ### Transport
//! - `Transport`: a register read or write did not complete. Nothing in the
//!   cache changed. Retry policy belongs to the bus implementation.
//!
//! ### Rejected Requests
//! - `ValidationRejected`: the merged threshold set broke one or more
//!   datasheet invariants. Carries *every* violation, not just the first.
//!   Device and cache are untouched.
//! - `UnsupportedOperation`: the request can never succeed (alarm status is
//!   read-only). Nothing was sent to the chip.
//!
//! ### Divergence
//! - `PartialHardwareCommit`: a validated update wrote some registers and
//!   then lost the bus. The chip now holds a mix of old and new setpoints
//!   and the cache has been invalidated; the next read re-syncs it.
//!
//! ## Handling Strategy
//!
//! ```rust
//! use lm77_core::{Lm77Error, ThresholdViolation};
//!
//! fn report<E: core::fmt::Debug>(err: &Lm77Error<E>) {
//!     match err {
//!         Lm77Error::ValidationRejected(violations) => {
//!             for v in violations {
//!                 // tell the operator which invariant failed
//!                 let _ = v.invariant();
//!             }
//!         }
//!         Lm77Error::PartialHardwareCommit { .. } => {
//!             // re-read before trusting any setpoint
//!         }
//!         Lm77Error::Transport { .. } | Lm77Error::UnsupportedOperation(_) => {}
//!     }
//! }
//! ```

use heapless::Vec;
use thiserror_no_std::Error;

use crate::codec::MilliCelsius;
use crate::registers::Register;

/// Upper bound on violations one threshold set can produce
pub const MAX_VIOLATIONS: usize = 4;

/// Upper bound on registers one threshold update writes
pub const MAX_SETPOINT_WRITES: usize = 4;

/// Every invariant a rejected threshold set broke, in check order
pub type Violations = Vec<ThresholdViolation, MAX_VIOLATIONS>;

/// Result type for sensor operations over a bus with error `E`
pub type Lm77Result<T, E> = Result<T, Lm77Error<E>>;

/// One failed threshold invariant
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThresholdViolation {
    /// temp_min outside the sensor range
    #[error("temp_min {value} outside range [{min}, {max}]")]
    MinOutOfRange {
        /// Requested low setpoint
        value: MilliCelsius,
        /// Lowest accepted value
        min: MilliCelsius,
        /// Highest accepted value
        max: MilliCelsius,
    },

    /// temp_max outside the sensor range
    #[error("temp_max {value} outside range [{min}, {max}]")]
    MaxOutOfRange {
        /// Requested high setpoint
        value: MilliCelsius,
        /// Lowest accepted value
        min: MilliCelsius,
        /// Highest accepted value
        max: MilliCelsius,
    },

    /// temp_min is not strictly below temp_max
    #[error("temp_min {min} not below temp_max {max}")]
    MinNotBelowMax {
        /// Merged low setpoint
        min: MilliCelsius,
        /// Merged high setpoint
        max: MilliCelsius,
    },

    /// Hysteresis bands of the low and high setpoints overlap
    #[error("overlapping setpoints: {min} + {hyst} >= {max} - {hyst}")]
    OverlappingSetpoints {
        /// Merged low setpoint
        min: MilliCelsius,
        /// Merged high setpoint
        max: MilliCelsius,
        /// Merged hysteresis
        hyst: MilliCelsius,
    },
}

impl ThresholdViolation {
    /// Number of the datasheet invariant this violates (1 to 3)
    pub const fn invariant(&self) -> u8 {
        match self {
            Self::MinOutOfRange { .. } | Self::MaxOutOfRange { .. } => 1,
            Self::MinNotBelowMax { .. } => 2,
            Self::OverlappingSetpoints { .. } => 3,
        }
    }
}

/// Errors returned by the sensor core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Lm77Error<E> {
    /// A register transfer failed
    #[error("transport failure on register {register:?}")]
    Transport {
        /// Register being accessed
        register: Register,
        /// Error reported by the bus
        cause: E,
    },

    /// Threshold set broke one or more invariants
    #[error("threshold update rejected: {} violation(s)", .0.len())]
    ValidationRejected(Violations),

    /// Some setpoints reached the chip before a later write failed
    #[error("partial hardware commit: {} register(s) written before {failed:?} failed", .written.len())]
    PartialHardwareCommit {
        /// Registers that were written, in write order
        written: Vec<Register, MAX_SETPOINT_WRITES>,
        /// Register whose write failed
        failed: Register,
        /// Error reported by the bus
        cause: E,
    },

    /// Operation the chip does not support
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

impl<E> Lm77Error<E> {
    /// Violations carried by a rejected update
    pub fn violations(&self) -> Option<&[ThresholdViolation]> {
        match self {
            Self::ValidationRejected(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Whether chip and cache may disagree until the next refresh
    pub const fn requires_refresh(&self) -> bool {
        matches!(self, Self::PartialHardwareCommit { .. })
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Lm77Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Transport { register, .. } =>
                defmt::write!(fmt, "Transport failure on {}", register),
            Self::ValidationRejected(v) =>
                defmt::write!(fmt, "Rejected: {} violation(s)", v.len()),
            Self::PartialHardwareCommit { written, failed, .. } =>
                defmt::write!(fmt, "Partial commit: {} written, {} failed", written.len(), failed),
            Self::UnsupportedOperation(what) =>
                defmt::write!(fmt, "Unsupported: {}", what),
        }
    }
}
