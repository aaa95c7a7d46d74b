//! Device-independent core of an LM77 temperature sensor driver
//!
//! Converts between milli-degrees Celsius and the chip's register encoding,
//! caches the chip's readings for one conversion cycle, and guards every
//! threshold write with the datasheet's window invariants.
//!
//! Key constraints:
//! - No discovery, no bus arbitration: the core only needs "read register"
//!   and "write register" ([`traits::RegisterBus`])
//! - No global clock: staleness comes from an injected [`traits::TimeSource`]
//! - Codec, validation and errors are `no_std` and allocation-free
//!
//! ```no_run
//! use embedded_hal::i2c::I2c;
//! use lm77_core::{I2cBus, Lm77, Lm77Error, ThresholdUpdate};
//!
//! fn monitor<I: I2c>(i2c: I) -> Result<(), Lm77Error<I::Error>> {
//!     let sensor = Lm77::new(I2cBus::new(i2c, 0x48));
//!     sensor.init()?;
//!
//!     let temps = sensor.read_temperatures()?;
//!     println!("{} m°C (window {}..{})", temps.current, temps.min, temps.max);
//!
//!     match sensor.write_thresholds(ThresholdUpdate::new().min(20_000).max(40_000)) {
//!         Ok(applied) => println!("now {:?}", applied),
//!         Err(e) => println!("rejected: {}", e),
//!     }
//!     Ok(())
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod codec;
pub mod config;
pub mod constants;
pub mod errors;
pub mod registers;
pub mod snapshot;
pub mod thresholds;
pub mod time;
pub mod traits;

#[cfg(feature = "std")]
pub mod cache;
#[cfg(feature = "std")]
pub mod device;
#[cfg(feature = "std")]
pub mod transaction;

#[cfg(feature = "i2c")]
pub mod i2c;

// Public API
pub use codec::{decode, encode, MilliCelsius, RawRegister};
pub use config::SensorConfig;
pub use constants::{LM_TEMP_MAX, LM_TEMP_MIN};
pub use errors::{Lm77Error, Lm77Result, ThresholdViolation, Violations};
pub use registers::{ConfigFlags, Register};
pub use snapshot::{AlarmFlags, SensorSnapshot, Temperatures};
pub use thresholds::{ThresholdSet, ThresholdUpdate};

#[cfg(feature = "std")]
pub use cache::ReadingCache;
#[cfg(feature = "std")]
pub use device::Lm77;
#[cfg(feature = "std")]
pub use time::{MockTimeSource, MonotonicClock};

#[cfg(feature = "i2c")]
pub use i2c::I2cBus;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
