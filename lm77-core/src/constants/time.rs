//! Timing Constants
//!
//! The LM77 converts continuously; a fresh temperature is available roughly
//! every conversion cycle. Reading faster than that only returns the same
//! value again, so the cache keeps a snapshot for one cycle.

/// Worst-case conversion cycle (milliseconds).
///
/// Source: LM77 datasheet, t_CONV.
pub const CONVERSION_CYCLE_MS: u64 = 1500;

/// Default maximum snapshot age before a reader refreshes (milliseconds).
pub const DEFAULT_STALENESS_MS: u64 = CONVERSION_CYCLE_MS;
