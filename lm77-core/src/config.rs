//! Per-sensor configuration
//!
//! Cache timing and the configuration-register bits written by
//! [`init`](crate::device::Lm77::init). Loadable from JSON under `std`:
//!
//! ```rust
//! use lm77_core::SensorConfig;
//!
//! let config = SensorConfig::from_json(r#"{ "staleness_ms": 500, "fault_queue": true }"#)?;
//! assert_eq!(config.staleness_ms, 500);
//! assert!(!config.int_mode); // unspecified fields keep their defaults
//! # Ok::<(), lm77_core::config::ConfigError>(())
//! ```

use thiserror_no_std::Error;

use crate::constants::time::DEFAULT_STALENESS_MS;
use crate::registers::ConfigFlags;

/// Configuration rejected at construction
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero window would refresh on every read yet still cache
    #[error("staleness window must be at least 1 ms")]
    ZeroStaleness,

    /// Malformed configuration document
    #[error("invalid configuration at line {line}, column {column}")]
    Parse {
        /// Line of the first error
        line: usize,
        /// Column of the first error
        column: usize,
    },
}

/// Configuration for one sensor instance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorConfig {
    /// Maximum snapshot age before a reader refreshes (milliseconds)
    pub staleness_ms: u64,
    /// Enable the chip's fault queue (four consecutive faults to trip)
    pub fault_queue: bool,
    /// INT output in interrupt mode rather than comparator mode
    pub int_mode: bool,
    /// INT output active high
    pub int_active_high: bool,
    /// T_CRIT_A output active high
    pub tcrit_active_high: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            staleness_ms: DEFAULT_STALENESS_MS, // one conversion cycle
            fault_queue: false,
            int_mode: false,
            int_active_high: false,
            tcrit_active_high: false,
        }
    }
}

impl SensorConfig {
    /// Noisy environments: fault queue on, default timing
    pub const fn filtered() -> Self {
        Self {
            staleness_ms: DEFAULT_STALENESS_MS,
            fault_queue: true,
            int_mode: false,
            int_active_high: false,
            tcrit_active_high: false,
        }
    }

    /// Fewer bus transfers: keep snapshots for ten seconds
    pub const fn low_traffic() -> Self {
        Self {
            staleness_ms: 10_000,
            fault_queue: false,
            int_mode: false,
            int_active_high: false,
            tcrit_active_high: false,
        }
    }

    /// Replace the staleness window
    pub const fn with_staleness_ms(mut self, ms: u64) -> Self {
        self.staleness_ms = ms;
        self
    }

    /// Reject unusable settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.staleness_ms == 0 {
            return Err(ConfigError::ZeroStaleness);
        }
        Ok(())
    }

    /// Configuration register contents for an awake chip
    pub fn config_flags(&self) -> ConfigFlags {
        let mut flags = ConfigFlags::NONE;
        if self.int_mode {
            flags = flags | ConfigFlags::INT_MODE;
        }
        if self.tcrit_active_high {
            flags = flags | ConfigFlags::TCRIT_POLARITY;
        }
        if self.int_active_high {
            flags = flags | ConfigFlags::INT_POLARITY;
        }
        if self.fault_queue {
            flags = flags | ConfigFlags::FAULT_QUEUE;
        }
        flags
    }

    /// Parse and validate a JSON document; missing fields take defaults
    #[cfg(feature = "std")]
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            line: e.line(),
            column: e.column(),
        })?;
        config.validate()?;
        Ok(config)
    }
}
