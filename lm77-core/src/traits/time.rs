//! Time Source Abstraction
//!
//! The reading cache decides staleness by comparing timestamps, and it gets
//! those timestamps from a [`TimeSource`] handed in at construction. Nothing
//! in the core reads a global clock, which keeps cache behaviour
//! deterministic under test.
//!
//! ## Implementation Requirements
//!
//! - `now()` is called with the cache lock held and must not block
//! - Timestamps are milliseconds from an arbitrary epoch
//! - A source may wrap or jump backwards; the cache treats a timestamp
//!   earlier than its last fetch as a reason to refresh, never as fresh data
//!
//! ## Example Implementation
//!
//! ```rust
//! use lm77_core::traits::TimeSource;
//! use lm77_core::time::Timestamp;
//!
//! struct TickCounter {
//!     // ... hardware timer handle
//! }
//!
//! impl TimeSource for TickCounter {
//!     fn now(&self) -> Timestamp {
//!         // Read the timer, convert ticks to milliseconds
//!         0 // placeholder
//!     }
//! }
//! ```

use crate::time::Timestamp;

/// Source of time for cache staleness
pub trait TimeSource: Send + Sync {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}
