//! Register access
//!
//! Typed register addresses and the byte-order fix-up applied on top of a
//! [`RegisterBus`]. All word registers are high-byte first on the wire,
//! which is the opposite of what an SMBus word transfer assumes, so every
//! word is swapped on the way in and out. The configuration register is a
//! single byte and passes through untouched.

use core::ops::BitOr;

use crate::codec::RawRegister;
use crate::constants::registers::{
    CONF_DEFINED_MASK, CONF_FAULT_QUEUE, CONF_INT_MODE, CONF_INT_POL, CONF_SHUTDOWN,
    CONF_TCRIT_POL, REG_CONF, REG_TEMP, REG_T_CRIT, REG_T_HIGH, REG_T_HYST, REG_T_LOW,
};
use crate::traits::RegisterBus;

/// An LM77 register
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Current temperature and alarm status (read-only)
    Temperature,
    /// Configuration byte
    Config,
    /// Hysteresis
    Hysteresis,
    /// Critical setpoint
    Critical,
    /// Low window setpoint
    Low,
    /// High window setpoint
    High,
}

impl Register {
    /// Bus address of the register
    pub const fn address(self) -> u8 {
        match self {
            Register::Temperature => REG_TEMP,
            Register::Config => REG_CONF,
            Register::Hysteresis => REG_T_HYST,
            Register::Critical => REG_T_CRIT,
            Register::Low => REG_T_LOW,
            Register::High => REG_T_HIGH,
        }
    }

    /// Whether the register is word-sized (everything except configuration)
    pub const fn is_word(self) -> bool {
        !matches!(self, Register::Config)
    }

    /// Whether the host may write the register
    pub const fn is_writable(self) -> bool {
        !matches!(self, Register::Temperature)
    }

    /// Short name used in log lines
    pub const fn as_str(self) -> &'static str {
        match self {
            Register::Temperature => "temp",
            Register::Config => "conf",
            Register::Hysteresis => "t_hyst",
            Register::Critical => "t_crit",
            Register::Low => "t_low",
            Register::High => "t_high",
        }
    }
}

/// Read a register and return its contents in native order
pub fn read_value<B: RegisterBus>(bus: &mut B, reg: Register) -> Result<RawRegister, B::Error> {
    let wire = bus.read_register(reg.address())?;
    Ok(if reg.is_word() {
        wire.swap_bytes()
    } else {
        wire & 0x00FF
    })
}

/// Write native-order contents to a register
pub fn write_value<B: RegisterBus>(
    bus: &mut B,
    reg: Register,
    value: RawRegister,
) -> Result<(), B::Error> {
    let wire = if reg.is_word() {
        value.swap_bytes()
    } else {
        value & 0x00FF
    };
    bus.write_register(reg.address(), wire)
}

/// Contents of the configuration register
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigFlags(u8);

impl ConfigFlags {
    /// No bits set: converting, comparator mode, outputs active low
    pub const NONE: Self = Self(0);
    /// Conversions stopped
    pub const SHUTDOWN: Self = Self(CONF_SHUTDOWN);
    /// INT in interrupt mode
    pub const INT_MODE: Self = Self(CONF_INT_MODE);
    /// T_CRIT_A active high
    pub const TCRIT_POLARITY: Self = Self(CONF_TCRIT_POL);
    /// INT active high
    pub const INT_POLARITY: Self = Self(CONF_INT_POL);
    /// Fault queue enabled
    pub const FAULT_QUEUE: Self = Self(CONF_FAULT_QUEUE);

    /// Build from a raw byte, dropping undefined bits
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & CONF_DEFINED_MASK)
    }

    /// Raw byte value
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every bit of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Copy with `other` set
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Copy with `other` cleared
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Whether the chip is shut down
    pub const fn is_shutdown(self) -> bool {
        self.contains(Self::SHUTDOWN)
    }
}

impl BitOr for ConfigFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.with(rhs)
    }
}
