//! Threshold sets and their datasheet invariants
//!
//! The four setpoints are validated as one unit. A request that touches a
//! single field is first merged over the cached values, and the merged set
//! is what gets checked:
//!
//! 1. `LM_TEMP_MIN <= temp_min <= LM_TEMP_MAX`, same for `temp_max`
//! 2. `temp_min < temp_max`
//! 3. `temp_min + temp_hyst < temp_max - temp_hyst`
//!
//! Invariant 3 keeps the T_LOW and T_HIGH comparator bands apart
//! (datasheet section 1.1.2). All checks run; the caller gets every
//! violation, in the order above.

use heapless::Vec;

use crate::codec::{clamp, in_range, MilliCelsius};
use crate::constants::limits::{LM_TEMP_MAX, LM_TEMP_MIN};
use crate::errors::{ThresholdViolation, Violations, MAX_SETPOINT_WRITES};
use crate::registers::Register;

/// The four configurable setpoints
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdSet {
    /// Low window setpoint (T_LOW)
    pub temp_min: MilliCelsius,
    /// High window setpoint (T_HIGH)
    pub temp_max: MilliCelsius,
    /// Critical setpoint (T_CRIT)
    pub temp_crit: MilliCelsius,
    /// Hysteresis (T_HYST)
    pub temp_hyst: MilliCelsius,
}

impl ThresholdSet {
    /// Overlay the fields `update` supplies
    pub fn merge(&self, update: &ThresholdUpdate) -> ThresholdSet {
        ThresholdSet {
            temp_min: update.temp_min.unwrap_or(self.temp_min),
            temp_max: update.temp_max.unwrap_or(self.temp_max),
            temp_crit: update.temp_crit.unwrap_or(self.temp_crit),
            temp_hyst: update.temp_hyst.unwrap_or(self.temp_hyst),
        }
    }

    /// Every field pulled into the sensor range, as the chip will hold it
    ///
    /// Values are not quantized; only out-of-range ones move.
    pub fn clamped(&self) -> ThresholdSet {
        ThresholdSet {
            temp_min: clamp(self.temp_min),
            temp_max: clamp(self.temp_max),
            temp_crit: clamp(self.temp_crit),
            temp_hyst: clamp(self.temp_hyst),
        }
    }

    /// Check every invariant, collecting all violations
    pub fn validate(&self) -> Result<(), Violations> {
        let mut violations = Violations::new();
        let mut record = |v: ThresholdViolation| {
            // Capacity covers every check below, one entry each
            let _ = violations.push(v);
        };

        if !in_range(self.temp_min) {
            record(ThresholdViolation::MinOutOfRange {
                value: self.temp_min,
                min: LM_TEMP_MIN,
                max: LM_TEMP_MAX,
            });
        }
        if !in_range(self.temp_max) {
            record(ThresholdViolation::MaxOutOfRange {
                value: self.temp_max,
                min: LM_TEMP_MIN,
                max: LM_TEMP_MAX,
            });
        }

        if self.temp_min >= self.temp_max {
            record(ThresholdViolation::MinNotBelowMax {
                min: self.temp_min,
                max: self.temp_max,
            });
        }

        // Widened so out-of-range requests cannot overflow the comparison
        let low_band = i64::from(self.temp_min) + i64::from(self.temp_hyst);
        let high_band = i64::from(self.temp_max) - i64::from(self.temp_hyst);
        if low_band >= high_band {
            record(ThresholdViolation::OverlappingSetpoints {
                min: self.temp_min,
                max: self.temp_max,
                hyst: self.temp_hyst,
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Sparse setpoint request: `None` leaves a field as it is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThresholdUpdate {
    /// New low window setpoint
    pub temp_min: Option<MilliCelsius>,
    /// New high window setpoint
    pub temp_max: Option<MilliCelsius>,
    /// New critical setpoint
    pub temp_crit: Option<MilliCelsius>,
    /// New hysteresis
    pub temp_hyst: Option<MilliCelsius>,
}

impl ThresholdUpdate {
    /// Empty request
    pub const fn new() -> Self {
        Self {
            temp_min: None,
            temp_max: None,
            temp_crit: None,
            temp_hyst: None,
        }
    }

    /// Set the low window setpoint
    pub const fn min(mut self, temp: MilliCelsius) -> Self {
        self.temp_min = Some(temp);
        self
    }

    /// Set the high window setpoint
    pub const fn max(mut self, temp: MilliCelsius) -> Self {
        self.temp_max = Some(temp);
        self
    }

    /// Set the critical setpoint
    pub const fn crit(mut self, temp: MilliCelsius) -> Self {
        self.temp_crit = Some(temp);
        self
    }

    /// Set the hysteresis
    pub const fn hyst(mut self, temp: MilliCelsius) -> Self {
        self.temp_hyst = Some(temp);
        self
    }

    /// Whether no field is supplied
    pub const fn is_empty(&self) -> bool {
        self.temp_min.is_none()
            && self.temp_max.is_none()
            && self.temp_crit.is_none()
            && self.temp_hyst.is_none()
    }

    /// Register writes this request needs, in the order they are issued
    ///
    /// Only supplied fields appear; nothing else is ever written.
    pub fn writes(&self) -> Vec<(Register, MilliCelsius), MAX_SETPOINT_WRITES> {
        let mut writes = Vec::new();
        let fields = [
            (Register::Low, self.temp_min),
            (Register::High, self.temp_max),
            (Register::Critical, self.temp_crit),
            (Register::Hysteresis, self.temp_hyst),
        ];
        for (reg, value) in fields {
            if let Some(temp) = value {
                // Four fields, four slots
                let _ = writes.push((reg, temp));
            }
        }
        writes
    }
}
