//! Integration tests for snapshot caching and refresh policy

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use common::{sensor_with_defaults, FakeLm77, Nak, Transfer};
use lm77_core::{AlarmFlags, Lm77, Lm77Error, MockTimeSource, Register, SensorConfig};

#[test]
fn reads_inside_window_share_one_refresh() {
    let (sensor, chip, clock) = sensor_with_defaults();

    let first = sensor.snapshot().unwrap();
    clock.advance(700);
    let second = sensor.snapshot().unwrap();

    assert_eq!(first, second);
    assert_eq!(chip.reads(), 5);

    let temps = sensor.read_temperatures().unwrap();
    assert_eq!((temps.min, temps.max, temps.current), (10_000, 64_000, 23_500));
    assert_eq!(chip.reads(), 5);
}

#[test]
fn read_after_window_refreshes_exactly_once() {
    let (sensor, chip, clock) = sensor_with_defaults();

    sensor.read_temperatures().unwrap();
    chip.set_temp(30_000, 0);
    clock.advance(1_501);

    assert_eq!(sensor.read_temperatures().unwrap().current, 30_000);
    assert_eq!(sensor.read_critical().unwrap(), 80_000);
    assert_eq!(chip.reads(), 10);
}

#[test]
fn refresh_reads_registers_in_fixed_order() {
    let (sensor, chip, _clock) = sensor_with_defaults();

    sensor.snapshot().unwrap();

    assert_eq!(
        chip.state().log,
        vec![
            Transfer::Read(0x00),
            Transfer::Read(0x02),
            Transfer::Read(0x03),
            Transfer::Read(0x04),
            Transfer::Read(0x05),
        ]
    );
}

#[test]
fn single_field_reads_use_the_cache() {
    let (sensor, chip, _clock) = sensor_with_defaults();
    chip.set_temp(85_000, 0x0006);

    assert_eq!(sensor.read_hysteresis().unwrap(), 2_000);
    assert_eq!(sensor.read_critical().unwrap(), 80_000);

    let alarms = sensor.read_alarms().unwrap();
    assert!(alarms.contains(AlarmFlags::HIGH));
    assert!(alarms.contains(AlarmFlags::CRITICAL));
    assert!(!alarms.contains(AlarmFlags::LOW));
    assert_eq!(chip.reads(), 5);
}

#[test]
fn staleness_window_is_configurable() {
    let chip = FakeLm77::with_defaults(20_000);
    let clock = MockTimeSource::new(0);
    let config = SensorConfig::low_traffic();
    let sensor = Lm77::with_config(chip.clone(), clock.clone(), config).unwrap();

    sensor.snapshot().unwrap();
    clock.advance(9_000);
    sensor.snapshot().unwrap();
    assert_eq!(chip.reads(), 5);

    clock.advance(1_001);
    sensor.snapshot().unwrap();
    assert_eq!(chip.reads(), 10);
}

#[test]
fn zero_staleness_config_is_refused() {
    let config = SensorConfig::default().with_staleness_ms(0);
    let result = Lm77::with_config(FakeLm77::default(), MockTimeSource::new(0), config);
    assert!(result.is_err());
}

#[test]
fn clock_reset_is_not_trusted() {
    let (sensor, chip, clock) = sensor_with_defaults();

    sensor.snapshot().unwrap();
    clock.set(5_000); // earlier than the fetch at 10 s
    let snap = sensor.snapshot().unwrap();

    assert_eq!(snap.fetched_at, 5_000);
    assert_eq!(chip.reads(), 10);
}

#[test]
fn transport_failure_surfaces_and_keeps_state() {
    let (sensor, chip, clock) = sensor_with_defaults();
    let before = sensor.snapshot().unwrap();

    chip.set_temp(40_000, 0);
    chip.state().fail_reads_at = Some(0x03);
    clock.advance(2_000);

    match sensor.snapshot() {
        Err(Lm77Error::Transport { register, cause }) => {
            assert_eq!(register, Register::Critical);
            assert_eq!(cause, Nak(0x03));
        }
        other => panic!("expected transport failure, got {other:?}"),
    }

    // Still stale, still the old values; the next reader retries
    chip.state().fail_reads_at = None;
    let after = sensor.snapshot().unwrap();
    assert_ne!(after, before);
    assert_eq!(after.current_temp, 40_000);
}

#[test]
fn first_fetch_failure_leaves_nothing_cached() {
    let chip = FakeLm77::with_defaults(20_000);
    chip.state().fail_reads_at = Some(0x00);
    let sensor = Lm77::with_clock(chip.clone(), MockTimeSource::new(0));

    assert!(sensor.read_temperatures().is_err());
    assert!(sensor.read_alarms().is_err());
    assert_eq!(chip.reads(), 0);
}

#[test]
fn forced_refresh_ignores_age() {
    let (sensor, chip, _clock) = sensor_with_defaults();

    sensor.snapshot().unwrap();
    chip.set_temp(26_000, 0);
    assert_eq!(sensor.refresh().unwrap().current_temp, 26_000);

    sensor.invalidate();
    sensor.snapshot().unwrap();
    assert_eq!(chip.reads(), 15);
}

#[test]
fn concurrent_readers_trigger_one_refresh() {
    let (sensor, chip, _clock) = sensor_with_defaults();
    let sensor = Arc::new(sensor);
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let sensor = Arc::clone(&sensor);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                sensor.snapshot().unwrap()
            })
        })
        .collect();

    let snapshots: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(snapshots.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(chip.reads(), 5);
}
