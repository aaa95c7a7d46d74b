//! Register Transport Abstraction
//!
//! The LM77 speaks SMBus: byte reads/writes for the configuration register,
//! word reads/writes for everything else. This trait is the whole contract
//! the core needs from a transport.
//!
//! ## Byte Order
//!
//! Implementations return and accept words in *transmitted* order, the way
//! an SMBus word transfer delivers them: the first byte on the wire lands in
//! the low half of the `u16`. The LM77 sends its most significant byte
//! first, so every word coming through here is byte-swapped relative to the
//! register contents. Undoing that is the core's job (see
//! [`registers`](crate::registers)), not the transport's.
//!
//! For the configuration register only the low byte is meaningful.
//!
//! ## Example Implementation
//!
//! ```rust
//! use lm77_core::traits::RegisterBus;
//!
//! struct Loopback([u16; 8]);
//!
//! impl RegisterBus for Loopback {
//!     type Error = ();
//!
//!     fn read_register(&mut self, address: u8) -> Result<u16, ()> {
//!         self.0.get(address as usize).copied().ok_or(())
//!     }
//!
//!     fn write_register(&mut self, address: u8, value: u16) -> Result<(), ()> {
//!         *self.0.get_mut(address as usize).ok_or(())? = value;
//!         Ok(())
//!     }
//! }
//! ```

use crate::codec::RawRegister;

/// Register-level access to one sensor on a bus
///
/// Calls may block for the duration of the transfer. Retries and timeouts,
/// if any, belong to the implementation.
pub trait RegisterBus {
    /// Transport failure reported by the bus
    type Error: core::fmt::Debug;

    /// Read the register at `address`, in transmitted byte order
    fn read_register(&mut self, address: u8) -> Result<RawRegister, Self::Error>;

    /// Write `value` to the register at `address`, in transmitted byte order
    fn write_register(&mut self, address: u8, value: RawRegister) -> Result<(), Self::Error>;
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    type Error = B::Error;

    fn read_register(&mut self, address: u8) -> Result<RawRegister, Self::Error> {
        (**self).read_register(address)
    }

    fn write_register(&mut self, address: u8, value: RawRegister) -> Result<(), Self::Error> {
        (**self).write_register(address, value)
    }
}
