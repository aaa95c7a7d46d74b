//! LM77 Register Map
//!
//! The chip has no identification register. Word registers are transmitted
//! high byte first, the configuration register is a single byte.
//!
//! Source: LM77 datasheet, section 1.10 (register map) and 1.11 (defaults).

// ===== ADDRESSES =====

/// Current temperature (read-only). Low 3 bits hold alarm status.
pub const REG_TEMP: u8 = 0x00;

/// Configuration (read-write, single byte).
pub const REG_CONF: u8 = 0x01;

/// Hysteresis applied to every setpoint (read-write).
pub const REG_T_HYST: u8 = 0x02;

/// Critical temperature setpoint (read-write).
pub const REG_T_CRIT: u8 = 0x03;

/// Low window setpoint (read-write).
pub const REG_T_LOW: u8 = 0x04;

/// High window setpoint (read-write).
pub const REG_T_HIGH: u8 = 0x05;

// ===== CONFIGURATION BITS =====

/// Shutdown: stops conversions, keeps the serial interface alive.
pub const CONF_SHUTDOWN: u8 = 0x01;

/// INT output in interrupt mode instead of comparator mode.
pub const CONF_INT_MODE: u8 = 0x02;

/// T_CRIT_A output active high.
pub const CONF_TCRIT_POL: u8 = 0x04;

/// INT output active high.
pub const CONF_INT_POL: u8 = 0x08;

/// Require four consecutive faults before asserting an output.
pub const CONF_FAULT_QUEUE: u8 = 0x10;

/// Bits of the configuration register that are defined at all.
pub const CONF_DEFINED_MASK: u8 = 0x1F;

// ===== ALARMS =====

/// Alarm status bits in the temperature register.
pub const ALARM_MASK: u16 = 0x0007;

// ===== POWER-ON DEFAULTS (raw register values) =====

/// Configuration at power-on: comparator mode, everything active low.
pub const DEFAULT_RAW_CONF: u8 = 0x00;

/// T_LOW at power-on: 10 °C.
pub const DEFAULT_RAW_T_LOW: u16 = 0x00A0;

/// T_HIGH at power-on: 64 °C.
pub const DEFAULT_RAW_T_HIGH: u16 = 0x0400;

/// T_CRIT at power-on: 80 °C.
pub const DEFAULT_RAW_T_CRIT: u16 = 0x0500;

/// T_HYST at power-on: 2 °C.
pub const DEFAULT_RAW_T_HYST: u16 = 0x0020;
