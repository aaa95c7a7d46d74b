//! LM77 device facade
//!
//! [`Lm77`] is one sensor instance: its bus, its reading cache and its
//! configuration. Everything an operator-facing layer (a control table, a
//! CLI, an RPC service) needs is a method here. The type is `Sync` when the
//! bus is `Send`, so it can sit behind an `Arc` and be read from several
//! threads; all bus traffic is serialized by the cache lock.
//!
//! ```rust
//! use lm77_core::{Lm77, ThresholdUpdate};
//! # use lm77_core::traits::RegisterBus;
//! # struct Bus([u16; 8]);
//! # impl RegisterBus for Bus {
//! #     type Error = ();
//! #     fn read_register(&mut self, a: u8) -> Result<u16, ()> { Ok(self.0[a as usize]) }
//! #     fn write_register(&mut self, a: u8, v: u16) -> Result<(), ()> { self.0[a as usize] = v; Ok(()) }
//! # }
//! # let bus = Bus([0x9000, 0, 0x2000, 0x0005, 0xA000, 0x0004, 0, 0]);
//! let sensor = Lm77::new(bus);
//! sensor.init()?;
//!
//! let temps = sensor.read_temperatures()?;
//! assert_eq!(temps.current, 9_000);
//!
//! sensor.write_thresholds(ThresholdUpdate::new().crit(90_000))?;
//! assert_eq!(sensor.read_critical()?, 90_000);
//! # Ok::<(), lm77_core::Lm77Error<()>>(())
//! ```

use crate::cache::ReadingCache;
use crate::codec::MilliCelsius;
use crate::config::{ConfigError, SensorConfig};
use crate::constants::registers::{
    DEFAULT_RAW_CONF, DEFAULT_RAW_T_CRIT, DEFAULT_RAW_T_HIGH, DEFAULT_RAW_T_HYST,
    DEFAULT_RAW_T_LOW,
};
use crate::errors::{Lm77Error, Lm77Result};
use crate::registers::{read_value, write_value, ConfigFlags, Register};
use crate::snapshot::{AlarmFlags, SensorSnapshot, Temperatures};
use crate::thresholds::{ThresholdSet, ThresholdUpdate};
use crate::time::MonotonicClock;
use crate::traits::{RegisterBus, TimeSource};
use crate::transaction;

/// One LM77 sensor
pub struct Lm77<B, T = MonotonicClock> {
    cache: ReadingCache<B, T>,
    config: SensorConfig,
}

impl<B: RegisterBus> Lm77<B, MonotonicClock> {
    /// Sensor with default configuration and the OS monotonic clock
    pub fn new(bus: B) -> Self {
        Self::with_clock(bus, MonotonicClock::new())
    }
}

impl<B: RegisterBus, T: TimeSource> Lm77<B, T> {
    /// Sensor with default configuration and a caller-supplied clock
    pub fn with_clock(bus: B, clock: T) -> Self {
        let config = SensorConfig::default();
        Self {
            cache: ReadingCache::new(bus, clock, config.staleness_ms),
            config,
        }
    }

    /// Sensor with explicit configuration
    pub fn with_config(bus: B, clock: T, config: SensorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            cache: ReadingCache::new(bus, clock, config.staleness_ms),
            config,
        })
    }

    /// Configuration this sensor was built with
    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    /// Wake the chip and program the configuration register
    ///
    /// Shutdown is always cleared; the remaining bits come from
    /// [`SensorConfig`]. Returns the value written.
    pub fn init(&self) -> Lm77Result<ConfigFlags, B::Error> {
        let mut state = self.cache.lock();
        let current = read_value(&mut state.bus, Register::Config)
            .map(|raw| ConfigFlags::from_bits_truncate(raw as u8))
            .map_err(|cause| Lm77Error::Transport { register: Register::Config, cause })?;

        if current.is_shutdown() {
            lm_info!("lm77: waking up from shutdown");
        }

        let flags = self.config.config_flags();
        write_value(&mut state.bus, Register::Config, u16::from(flags.bits()))
            .map_err(|cause| Lm77Error::Transport { register: Register::Config, cause })?;
        Ok(flags)
    }

    /// Low and high setpoints plus the current temperature
    pub fn read_temperatures(&self) -> Lm77Result<Temperatures, B::Error> {
        Ok(self.cache.get_snapshot()?.temperatures())
    }

    /// Critical setpoint
    pub fn read_critical(&self) -> Lm77Result<MilliCelsius, B::Error> {
        Ok(self.cache.get_snapshot()?.temp_crit)
    }

    /// Hysteresis
    pub fn read_hysteresis(&self) -> Lm77Result<MilliCelsius, B::Error> {
        Ok(self.cache.get_snapshot()?.temp_hyst)
    }

    /// Alarm status as of the last refresh
    pub fn read_alarms(&self) -> Lm77Result<AlarmFlags, B::Error> {
        Ok(self.cache.get_snapshot()?.alarm_flags)
    }

    /// Full snapshot, refreshing if stale
    pub fn snapshot(&self) -> Lm77Result<SensorSnapshot, B::Error> {
        self.cache.get_snapshot()
    }

    /// Re-read every register now
    pub fn refresh(&self) -> Lm77Result<SensorSnapshot, B::Error> {
        self.cache.refresh()
    }

    /// Drop cached state; the next read goes to the chip
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// Validate and apply new setpoints
    ///
    /// See [`transaction::apply`] for the exact guarantees.
    pub fn write_thresholds(&self, update: ThresholdUpdate) -> Lm77Result<ThresholdSet, B::Error> {
        transaction::apply(&self.cache, &update)
    }

    /// Alarm status is computed by the chip and cannot be written
    pub fn write_alarms(&self, _alarms: AlarmFlags) -> Lm77Result<(), B::Error> {
        lm_warn!("lm77: alarms are read-only");
        Err(Lm77Error::UnsupportedOperation("alarm status is read-only"))
    }

    /// Current configuration register, read directly from the chip
    pub fn read_config(&self) -> Lm77Result<ConfigFlags, B::Error> {
        let mut state = self.cache.lock();
        read_value(&mut state.bus, Register::Config)
            .map(|raw| ConfigFlags::from_bits_truncate(raw as u8))
            .map_err(|cause| Lm77Error::Transport { register: Register::Config, cause })
    }

    /// Restore the power-on register values
    ///
    /// Raw defaults are written directly, without the codec, so a reset works
    /// even if the temperature encoding were wrong. The cache is invalidated
    /// whether or not every write succeeds.
    pub fn reset_to_defaults(&self) -> Lm77Result<(), B::Error> {
        let mut state = self.cache.lock();
        state.snapshot = None;

        let defaults = [
            (Register::Config, u16::from(DEFAULT_RAW_CONF)),
            (Register::Low, DEFAULT_RAW_T_LOW),
            (Register::High, DEFAULT_RAW_T_HIGH),
            (Register::Critical, DEFAULT_RAW_T_CRIT),
            (Register::Hysteresis, DEFAULT_RAW_T_HYST),
        ];
        for (register, raw) in defaults {
            write_value(&mut state.bus, register, raw)
                .map_err(|cause| Lm77Error::Transport { register, cause })?;
        }

        lm_warn!("lm77: registers reset to their defaults");
        Ok(())
    }

    /// Tear down the sensor and hand back the bus
    pub fn release(self) -> B {
        self.cache.release()
    }
}
