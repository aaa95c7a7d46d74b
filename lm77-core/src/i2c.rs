//! `embedded-hal` I2C transport
//!
//! Implements [`RegisterBus`] over any `embedded_hal::i2c::I2c` bus using
//! SMBus-style transfers: a register pointer write followed by a one-byte
//! (configuration) or two-byte (everything else) read. Words are returned in
//! transmitted order, first byte low, exactly as an SMBus word read would
//! deliver them.

use embedded_hal::i2c::I2c;

use crate::codec::RawRegister;
use crate::constants::registers::REG_CONF;
use crate::traits::RegisterBus;

/// Lowest address the LM77 can be strapped to
pub const ADDRESS_MIN: u8 = 0x48;

/// Highest address the LM77 can be strapped to
pub const ADDRESS_MAX: u8 = 0x4B;

/// An LM77 at a fixed address on an I2C bus
#[derive(Debug)]
pub struct I2cBus<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> I2cBus<I> {
    /// Wrap a bus for the chip at `address`
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Seven-bit address of the chip
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the underlying I2C bus
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> RegisterBus for I2cBus<I> {
    type Error = I::Error;

    fn read_register(&mut self, address: u8) -> Result<RawRegister, Self::Error> {
        if address == REG_CONF {
            let mut buf = [0u8; 1];
            self.i2c.write_read(self.address, &[address], &mut buf)?;
            Ok(u16::from(buf[0]))
        } else {
            let mut buf = [0u8; 2];
            self.i2c.write_read(self.address, &[address], &mut buf)?;
            Ok(u16::from_le_bytes(buf))
        }
    }

    fn write_register(&mut self, address: u8, value: RawRegister) -> Result<(), Self::Error> {
        if address == REG_CONF {
            self.i2c.write(self.address, &[address, value as u8])
        } else {
            let [first, second] = value.to_le_bytes();
            self.i2c.write(self.address, &[address, first, second])
        }
    }
}
