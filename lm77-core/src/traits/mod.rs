//! Seams between the core and its environment
//!
//! The core never talks to hardware or reads a clock directly. Both come in
//! through the traits here so the driver runs the same on a Linux I2C
//! adapter, a bare-metal HAL, or a test double.
//!
//! - [`bus`] - register-level transport ([`RegisterBus`])
//! - [`time`] - monotonic time for cache staleness ([`TimeSource`])

pub mod bus;
pub mod time;

pub use bus::RegisterBus;
pub use time::TimeSource;
