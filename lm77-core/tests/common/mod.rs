//! Shared fixtures for integration tests
//!
//! - `FakeLm77`: register-level model of the chip behind a `RegisterBus`,
//!   with transfer logs and failure injection. Clones share state, so a test
//!   can keep a handle while the sensor owns the bus.
//! - `sensor_with_defaults`: a sensor over a chip holding power-on values

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use lm77_core::{
    encode,
    traits::RegisterBus,
    Lm77, MockTimeSource, SensorConfig,
};

/// Error the fake bus reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nak(pub u8);

/// One transfer as seen on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    Read(u8),
    Write(u8, u16),
}

#[derive(Debug, Default)]
pub struct ChipState {
    /// Register contents in native order
    pub regs: [u16; 8],
    pub log: Vec<Transfer>,
    pub fail_reads_at: Option<u8>,
    pub fail_writes_at: Option<u8>,
}

impl ChipState {
    pub fn reads(&self) -> usize {
        self.log.iter().filter(|t| matches!(t, Transfer::Read(_))).count()
    }

    pub fn writes(&self) -> Vec<(u8, u16)> {
        self.log
            .iter()
            .filter_map(|t| match t {
                Transfer::Write(addr, value) => Some((*addr, *value)),
                Transfer::Read(_) => None,
            })
            .collect()
    }
}

/// Register-level LM77 model
#[derive(Debug, Clone, Default)]
pub struct FakeLm77 {
    state: Arc<Mutex<ChipState>>,
}

impl FakeLm77 {
    /// Chip holding the datasheet power-on setpoints and `current` m°C
    pub fn with_defaults(current: i32) -> Self {
        let chip = Self::default();
        {
            let mut state = chip.state();
            state.regs[0x00] = encode(current);
            state.regs[0x02] = 0x0020;
            state.regs[0x03] = 0x0500;
            state.regs[0x04] = 0x00A0;
            state.regs[0x05] = 0x0400;
        }
        chip
    }

    pub fn state(&self) -> MutexGuard<'_, ChipState> {
        self.state.lock().unwrap()
    }

    pub fn set_temp(&self, milli_c: i32, alarms: u16) {
        self.state().regs[0x00] = encode(milli_c) | alarms;
    }

    pub fn reg(&self, address: u8) -> u16 {
        self.state().regs[address as usize]
    }

    pub fn reads(&self) -> usize {
        self.state().reads()
    }

    pub fn writes(&self) -> Vec<(u8, u16)> {
        self.state().writes()
    }

    pub fn clear_log(&self) {
        self.state().log.clear();
    }
}

impl RegisterBus for FakeLm77 {
    type Error = Nak;

    fn read_register(&mut self, address: u8) -> Result<u16, Nak> {
        let mut state = self.state();
        if state.fail_reads_at == Some(address) {
            return Err(Nak(address));
        }
        state.log.push(Transfer::Read(address));
        let value = state.regs[address as usize & 0x07];
        // Words leave the chip high byte first
        Ok(if address == 0x01 { value & 0xFF } else { value.swap_bytes() })
    }

    fn write_register(&mut self, address: u8, value: u16) -> Result<(), Nak> {
        let mut state = self.state();
        if state.fail_writes_at == Some(address) {
            return Err(Nak(address));
        }
        let native = if address == 0x01 { value & 0xFF } else { value.swap_bytes() };
        state.log.push(Transfer::Write(address, native));
        state.regs[address as usize & 0x07] = native;
        Ok(())
    }
}

/// Sensor over a power-on chip reading 23.5 °C, clock at 10 s
pub fn sensor_with_defaults() -> (Lm77<FakeLm77, MockTimeSource>, FakeLm77, MockTimeSource) {
    let chip = FakeLm77::with_defaults(23_500);
    let clock = MockTimeSource::new(10_000);
    let sensor = Lm77::with_config(chip.clone(), clock.clone(), SensorConfig::default())
        .expect("default config is valid");
    (sensor, chip, clock)
}
