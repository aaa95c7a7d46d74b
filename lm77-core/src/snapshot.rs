//! Cached sensor state
//!
//! A [`SensorSnapshot`] is everything one refresh reads from the chip, plus
//! the time it was read. Snapshots are plain `Copy` values; the cache owns
//! the live one and hands out copies.

use crate::codec::{MilliCelsius, RawRegister};
use crate::constants::registers::ALARM_MASK;
use crate::thresholds::ThresholdSet;
use crate::time::Timestamp;

/// Alarm status bits reported in the temperature register
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmFlags(u8);

impl AlarmFlags {
    /// Temperature below T_LOW
    pub const LOW: Self = Self(0x01);
    /// Temperature above T_HIGH
    pub const HIGH: Self = Self(0x02);
    /// Temperature above T_CRIT
    pub const CRITICAL: Self = Self(0x04);

    /// Extract the alarm bits from a raw temperature register
    pub const fn from_temperature_register(reg: RawRegister) -> Self {
        Self((reg & ALARM_MASK) as u8)
    }

    /// Build from raw bits, dropping anything above the three alarm bits
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & ALARM_MASK as u8)
    }

    /// Raw bit value
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// No alarm asserted
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every bit of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

/// Window readings: setpoints plus the current temperature
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperatures {
    /// Low window setpoint
    pub min: MilliCelsius,
    /// High window setpoint
    pub max: MilliCelsius,
    /// Last converted temperature
    pub current: MilliCelsius,
}

/// Everything read from the chip in one refresh
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSnapshot {
    /// Last converted temperature
    pub current_temp: MilliCelsius,
    /// Low window setpoint
    pub temp_min: MilliCelsius,
    /// High window setpoint
    pub temp_max: MilliCelsius,
    /// Critical setpoint
    pub temp_crit: MilliCelsius,
    /// Hysteresis applied to every setpoint
    pub temp_hyst: MilliCelsius,
    /// Alarm status at the time of the read
    pub alarm_flags: AlarmFlags,
    /// When the registers were read
    pub fetched_at: Timestamp,
}

impl SensorSnapshot {
    /// The four configurable setpoints
    pub const fn thresholds(&self) -> ThresholdSet {
        ThresholdSet {
            temp_min: self.temp_min,
            temp_max: self.temp_max,
            temp_crit: self.temp_crit,
            temp_hyst: self.temp_hyst,
        }
    }

    /// Replace the setpoints, keeping readings and timestamp
    pub fn apply_thresholds(&mut self, set: ThresholdSet) {
        self.temp_min = set.temp_min;
        self.temp_max = set.temp_max;
        self.temp_crit = set.temp_crit;
        self.temp_hyst = set.temp_hyst;
    }

    /// Low/high setpoints and current temperature
    pub const fn temperatures(&self) -> Temperatures {
        Temperatures {
            min: self.temp_min,
            max: self.temp_max,
            current: self.current_temp,
        }
    }

    /// Age in milliseconds, or `None` when `now` is before the fetch
    pub fn age_at(&self, now: Timestamp) -> Option<u64> {
        now.checked_sub(self.fetched_at)
    }
}
