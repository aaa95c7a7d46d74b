//! Temperature Limits and Register Field Layout
//!
//! The LM77 reports temperature as a 10-bit two's complement count of
//! half-degree steps, left-aligned at bit 3 of a 16-bit word. Bits 13-15
//! repeat the sign, bits 0-2 carry alarm status in the temperature register
//! and are unused in the setpoint registers.
//!
//! ```text
//!  15 14 13 12 11 10  9  8  7  6  5  4  3  2  1  0
//! ┌──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┐
//! │ S│ S│ S│ S│ magnitude (9 bits)       │ alarms │
//! └──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┘
//!           └────── FIELD_MASK (0x1FF8) ──┘
//! ```

/// Lowest temperature the sensor can measure or be programmed with (m°C).
///
/// Source: LM77 datasheet, absolute operating range.
pub const LM_TEMP_MIN: i32 = -55_000;

/// Highest temperature the sensor can measure or be programmed with (m°C).
///
/// Source: LM77 datasheet, absolute operating range.
pub const LM_TEMP_MAX: i32 = 125_000;

/// Resolution of one register count (m°C).
pub const TEMP_STEP_MILLI_C: i32 = 500;

/// Bits of a temperature word holding sign and magnitude.
pub const FIELD_MASK: u16 = 0x1FF8;

/// Position of the temperature field inside the word.
pub const FIELD_SHIFT: u32 = 3;

/// Width of the two's complement temperature count.
pub const FIELD_BITS: u32 = 10;

/// Mask selecting the count bits of a native integer before shifting.
pub const FIELD_COUNT_MASK: i32 = (1 << FIELD_BITS) - 1;

/// Sign bit of the temperature count, after shifting the field down.
pub const FIELD_SIGN_BIT: u16 = 1 << (FIELD_BITS - 1);

/// Sign extension forced into the top nibble of a negative encoding.
pub const SIGN_EXTENSION: u16 = 0xF000;
