//! Integration tests for chip setup, reset and the I2C transport

mod common;

use common::{sensor_with_defaults, FakeLm77, Nak, Transfer};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use lm77_core::{
    encode, i2c::ADDRESS_MIN, ConfigFlags, I2cBus, Lm77, Lm77Error, MockTimeSource, Register,
    SensorConfig, ThresholdUpdate,
};

#[test]
fn init_wakes_chip_from_shutdown() {
    let (sensor, chip, _clock) = sensor_with_defaults();
    chip.state().regs[0x01] = 0x01;

    let written = sensor.init().unwrap();

    assert_eq!(written, ConfigFlags::NONE);
    assert_eq!(chip.reg(0x01), 0x00);
    assert!(!sensor.read_config().unwrap().is_shutdown());
}

#[test]
fn init_applies_configured_bits() {
    let chip = FakeLm77::with_defaults(20_000);
    chip.state().regs[0x01] = 0x01;
    let config = SensorConfig {
        int_mode: true,
        ..SensorConfig::filtered()
    };
    let sensor = Lm77::with_config(chip.clone(), MockTimeSource::new(0), config).unwrap();

    let written = sensor.init().unwrap();

    assert_eq!(written, ConfigFlags::FAULT_QUEUE | ConfigFlags::INT_MODE);
    assert_eq!(chip.reg(0x01), 0x12);
    assert_eq!(
        chip.state().log,
        vec![Transfer::Read(0x01), Transfer::Write(0x01, 0x12)]
    );
}

#[test]
fn init_reports_config_read_failure() {
    let (sensor, chip, _clock) = sensor_with_defaults();
    chip.state().fail_reads_at = Some(0x01);

    assert_eq!(
        sensor.init().unwrap_err(),
        Lm77Error::Transport {
            register: Register::Config,
            cause: Nak(0x01),
        }
    );
    assert!(chip.writes().is_empty());
}

#[test]
fn reset_restores_power_on_values_and_invalidates() {
    let (sensor, chip, _clock) = sensor_with_defaults();
    sensor
        .write_thresholds(ThresholdUpdate::new().min(0).max(100_000).crit(110_000).hyst(500))
        .unwrap();
    chip.state().regs[0x01] = 0x18;
    chip.clear_log();

    sensor.reset_to_defaults().unwrap();

    assert_eq!(
        chip.writes(),
        vec![
            (0x01, 0x00),
            (0x04, 0x00A0),
            (0x05, 0x0400),
            (0x03, 0x0500),
            (0x02, 0x0020),
        ]
    );

    // Next read goes to the chip
    let snap = sensor.snapshot().unwrap();
    assert_eq!(chip.reads(), 5);
    assert_eq!(
        (snap.temp_min, snap.temp_max, snap.temp_crit, snap.temp_hyst),
        (10_000, 64_000, 80_000, 2_000)
    );
}

#[test]
fn reset_failure_still_invalidates() {
    let (sensor, chip, _clock) = sensor_with_defaults();
    sensor.snapshot().unwrap();
    chip.state().fail_writes_at = Some(0x05);

    let err = sensor.reset_to_defaults().unwrap_err();
    assert!(matches!(err, Lm77Error::Transport { register: Register::High, .. }));

    chip.clear_log();
    sensor.snapshot().unwrap();
    assert_eq!(chip.reads(), 5);
}

#[test]
fn release_hands_back_the_bus() {
    let (sensor, chip, _clock) = sensor_with_defaults();
    sensor.snapshot().unwrap();

    let bus = sensor.release();
    assert_eq!(bus.reads(), chip.reads());
}

#[test]
fn full_cycle_over_i2c() {
    let addr = ADDRESS_MIN;
    let word = |value: u16| value.to_be_bytes().to_vec();
    let expectations = [
        // init
        I2cTransaction::write_read(addr, vec![0x01], vec![0x01]),
        I2cTransaction::write(addr, vec![0x01, 0x00]),
        // first refresh
        I2cTransaction::write_read(addr, vec![0x00], word(encode(-12_500) | 0x0001)),
        I2cTransaction::write_read(addr, vec![0x02], word(0x0020)),
        I2cTransaction::write_read(addr, vec![0x03], word(0x0500)),
        I2cTransaction::write_read(addr, vec![0x04], word(0x00A0)),
        I2cTransaction::write_read(addr, vec![0x05], word(0x0400)),
        // T_LOW update
        I2cTransaction::write(addr, vec![0x04, 0xFE, 0x70]),
    ];
    let mock = I2cMock::new(&expectations);
    let sensor = Lm77::with_clock(I2cBus::new(mock, addr), MockTimeSource::new(0));

    sensor.init().unwrap();

    let temps = sensor.read_temperatures().unwrap();
    assert_eq!(temps.current, -12_500);
    assert_eq!((temps.min, temps.max), (10_000, 64_000));
    assert_eq!(sensor.read_alarms().unwrap().bits(), 0x01);

    sensor
        .write_thresholds(ThresholdUpdate::new().min(-25_000))
        .unwrap();
    assert_eq!(sensor.read_temperatures().unwrap().min, -25_000);

    sensor.release().release().done();
}
