//! Constants for the LM77 core
//!
//! Every numeric value the driver depends on lives here, grouped by concern,
//! with the datasheet section it comes from where one applies.
//!
//! ## Organization
//!
//! - **Limits**: physical temperature range and codec field layout
//! - **Registers**: register addresses, configuration bits and power-on defaults
//! - **Time**: conversion cycle and cache staleness
//!
//! All temperatures are milli-degrees Celsius.

/// Physical temperature limits and register field layout.
pub mod limits;

/// Register map, configuration bits and power-on defaults.
pub mod registers;

/// Conversion timing and cache staleness.
pub mod time;

pub use limits::{LM_TEMP_MAX, LM_TEMP_MIN, TEMP_STEP_MILLI_C};
pub use registers::{ALARM_MASK, DEFAULT_RAW_CONF};
pub use time::{CONVERSION_CYCLE_MS, DEFAULT_STALENESS_MS};
