//! Temperature codec
//!
//! Pure conversion between milli-degrees Celsius and the LM77 register
//! encoding. Nothing here touches the bus.
//!
//! The encoding is lossy: one register count is 500 m°C, and encoding
//! truncates toward zero, so 1499 m°C reads back as 1000 m°C and -700 m°C
//! reads back as -500 m°C.

use crate::constants::limits::{
    FIELD_BITS, FIELD_COUNT_MASK, FIELD_MASK, FIELD_SHIFT, FIELD_SIGN_BIT, LM_TEMP_MAX,
    LM_TEMP_MIN, SIGN_EXTENSION, TEMP_STEP_MILLI_C,
};

/// Temperature in milli-degrees Celsius
pub type MilliCelsius = i32;

/// A register value as stored in the chip, in native byte order
pub type RawRegister = u16;

/// Encode a temperature into a setpoint register value.
///
/// Input outside the sensor range is clamped first, so this never fails.
pub fn encode(temp: MilliCelsius) -> RawRegister {
    let count = clamp(temp) / TEMP_STEP_MILLI_C;
    let field = ((count & FIELD_COUNT_MASK) as u16) << FIELD_SHIFT;

    if count < 0 {
        field | SIGN_EXTENSION
    } else {
        field
    }
}

/// Decode a register value into a temperature.
///
/// Only the 13 sign/magnitude bits are looked at; alarm bits and the
/// repeated sign bits are ignored.
pub fn decode(reg: RawRegister) -> MilliCelsius {
    let count = (reg & FIELD_MASK) >> FIELD_SHIFT;
    let signed = if count & FIELD_SIGN_BIT != 0 {
        i32::from(count) - (1 << FIELD_BITS)
    } else {
        i32::from(count)
    };

    signed * TEMP_STEP_MILLI_C
}

/// Clamp a temperature into the range the sensor accepts
#[inline]
pub fn clamp(temp: MilliCelsius) -> MilliCelsius {
    temp.clamp(LM_TEMP_MIN, LM_TEMP_MAX)
}

/// Whether a temperature lies inside the sensor range
#[inline]
pub fn in_range(temp: MilliCelsius) -> bool {
    (LM_TEMP_MIN..=LM_TEMP_MAX).contains(&temp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_known_values() {
        assert_eq!(encode(0), 0x0000);
        assert_eq!(encode(25_000), 0x0190);
        assert_eq!(encode(125_000), 0x07D0);
        assert_eq!(encode(-500), 0xFFF8);
        assert_eq!(encode(-25_000), 0xFE70);
        assert_eq!(encode(-55_000), 0xFC90);
    }

    #[test]
    fn negative_encodings_fill_top_nibble() {
        for temp in [-500, -10_000, -55_000] {
            assert_eq!(encode(temp) & 0xF000, 0xF000, "temp {temp}");
        }
        for temp in [0, 500, 125_000] {
            assert_eq!(encode(temp) & 0xF000, 0x0000, "temp {temp}");
        }
    }

    #[test]
    fn decodes_known_values() {
        assert_eq!(decode(0x0190), 25_000);
        assert_eq!(decode(0xFE70), -25_000);
        assert_eq!(decode(0xFFF8), -500);
        assert_eq!(decode(0x07D0), 125_000);
    }

    #[test]
    fn decode_ignores_alarm_bits() {
        assert_eq!(decode(0x0190 | 0x0007), 25_000);
        assert_eq!(decode(0xFE70 | 0x0005), -25_000);
    }

    #[test]
    fn decode_ignores_repeated_sign_bits() {
        // Sign lives in bit 12; bits 13-15 are copies the chip may or may not set.
        assert_eq!(decode(0x1FF8), -500);
        assert_eq!(decode(0xFFF8), -500);
    }

    #[test]
    fn encode_truncates_toward_zero() {
        assert_eq!(decode(encode(1_499)), 1_000);
        assert_eq!(decode(encode(999)), 500);
        assert_eq!(decode(encode(-700)), -500);
        assert_eq!(decode(encode(-1_499)), -1_000);
    }

    #[test]
    fn encode_clamps_out_of_range_input() {
        assert_eq!(encode(1_000_000), encode(LM_TEMP_MAX));
        assert_eq!(encode(-273_150), encode(LM_TEMP_MIN));
        assert_eq!(encode(i32::MAX), encode(LM_TEMP_MAX));
        assert_eq!(encode(i32::MIN), encode(LM_TEMP_MIN));
    }

    #[test]
    fn range_check() {
        assert!(in_range(LM_TEMP_MIN));
        assert!(in_range(LM_TEMP_MAX));
        assert!(!in_range(LM_TEMP_MIN - 1));
        assert!(!in_range(LM_TEMP_MAX + 1));
    }
}
