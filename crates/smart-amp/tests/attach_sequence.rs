//! Attach: identification, reset and the per-chip init sequence.

#![allow(clippy::unwrap_used)]

mod common;

use common::{powered_bus, REVISION};
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State as PinState, Transaction as PinTransaction};
use embedded_hal_mock::eh1::MockError;
use platform::mocks::{BusOp, MockBusError, RecordingDelay};
use platform::SlotIndex;
use smart_amp::{AmpConfig, ChipFamily, Error, ResetState, SmartAmp};

const REVISION_ID: u16 = 0x21FF;

/// MAX98396 attach: identify, reset, then the init writes in order.
#[test]
fn max98396_attach_sequence() {
    let amp = SmartAmp::attach(
        powered_bus(ChipFamily::Max98396),
        RecordingDelay::new(),
        ChipFamily::Max98396,
        AmpConfig::default(),
    )
    .unwrap();

    let ops = amp.regmap().bus().ops();
    assert_eq!(
        ops.get(..3),
        Some(&[BusOp::Read(REVISION_ID), BusOp::Write(0x2000, 0x01), BusOp::Read(REVISION_ID)][..])
    );
    assert_eq!(
        amp.regmap().bus().writes(),
        [
            (0x2000, 0x01), // software reset
            (0x203F, 0x00), // enable controls
            (0x2055, 0x00), // DAI Sel: left
            (0x2056, 0x10),
            (0x205F, 0x01), // VI Sense switch on
            (0x205D, 0x01),
            (0x2092, 0x03), // DC blocker on, safe mode off
            (0x20E0, 0x07),
            (0x2044, 0x00), // vmon slot
            (0x2045, 0x01), // imon slot
            (0x2053, 0xFE), // slot 0 out of Hi-Z
            (0x2053, 0xFC), // slot 1 out of Hi-Z
            (0x2038, 0x01), // clock monitor auto-restart
        ]
    );
    assert_eq!(
        amp.state().reset,
        ResetState::Verified {
            attempts: 1,
            revision: REVISION
        }
    );
    assert_eq!(amp.delay().calls_ms(), [10]);
}

/// MAX98520 attach settles 30 ms after reset and unlocks test mode.
#[test]
fn max98520_attach_sequence() {
    let amp = SmartAmp::attach(
        powered_bus(ChipFamily::Max98520),
        RecordingDelay::new(),
        ChipFamily::Max98520,
        AmpConfig::default(),
    )
    .unwrap();

    assert_eq!(amp.delay().calls_ms(), [10, 30]);
    assert_eq!(
        amp.regmap().bus().writes(),
        [
            (0x2000, 0x01),
            (0x2043, 0x02), // DAI Sel: left+right
            (0x2044, 0x10),
            (0x2092, 0x03),
            (0x2030, 0x01),
            (0x21FF, 0x54),
            (0x21FF, 0x4D),
            (0x2161, 0x02),
            (0x2095, 0xC8),
        ]
    );
}

/// Monitor slots above 7 are taken out of the high Hi-Z register.
#[test]
fn high_monitor_slots() {
    let config = AmpConfig {
        vmon_slot: SlotIndex::try_new(8).unwrap(),
        imon_slot: SlotIndex::try_new(9).unwrap(),
        interleave_mode: false,
    };
    let amp = common::attach_with(ChipFamily::Max98396, config);
    assert_eq!(common::hw(&amp, 0x2044), 8);
    assert_eq!(common::hw(&amp, 0x2045), 9);
    assert_eq!(common::hw(&amp, 0x2052), 0xFC);
    assert_eq!(common::hw(&amp, 0x2053), 0xFF);
}

/// Nothing answering at the address aborts attach.
#[test]
fn identification_failure_aborts() {
    let mut bus = powered_bus(ChipFamily::Max98396);
    bus.fail_reads(REVISION_ID, 1);
    let result = SmartAmp::attach(bus, RecordingDelay::new(), ChipFamily::Max98396, AmpConfig::default());
    assert_eq!(result.err(), Some(Error::Bus(MockBusError { reg: REVISION_ID })));
}

/// A reset that never verifies still completes attach, and says so.
#[test]
fn unverified_reset_completes_attach() {
    let mut bus = powered_bus(ChipFamily::Max98396);
    bus.fail_reads_after(REVISION_ID, 1, 3);
    let amp = SmartAmp::attach(bus, RecordingDelay::new(), ChipFamily::Max98396, AmpConfig::default()).unwrap();

    assert_eq!(amp.state().reset, ResetState::Failed { attempts: 3 });
    assert_eq!(
        amp.check_verified(),
        Err(Error::ResetVerificationFailed { attempts: 3 })
    );
    assert_eq!(amp.delay().calls_ms(), [10, 10, 10]);
    assert_eq!(common::hw(&amp, 0x2056), 0x10, "init sequence still ran");
}

/// Bus errors in the init sequence abort attach.
#[test]
fn init_error_aborts() {
    let mut bus = powered_bus(ChipFamily::Max98396);
    bus.fail_writes(0x2056, 1);
    let result = SmartAmp::attach(bus, RecordingDelay::new(), ChipFamily::Max98396, AmpConfig::default());
    assert_eq!(result.err(), Some(Error::Bus(MockBusError { reg: 0x2056 })));
}

/// The reset line is pulsed low for 50 ms, then released for 20 ms.
#[test]
fn reset_line_pulse() {
    let expectations = [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ];
    let mut pin = PinMock::new(&expectations);

    let amp = SmartAmp::attach_with_reset(
        powered_bus(ChipFamily::Max98396),
        RecordingDelay::new(),
        ChipFamily::Max98396,
        AmpConfig::default(),
        &mut pin,
    )
    .unwrap();

    assert_eq!(amp.delay().calls_ms(), [50, 20, 10]);
    pin.done();
}

/// A reset-line failure is reported as a GPIO error before any bus traffic.
#[test]
fn reset_line_failure() {
    let expectations =
        [PinTransaction::set(PinState::Low).with_error(MockError::Io(std::io::ErrorKind::NotConnected))];
    let mut pin = PinMock::new(&expectations);

    let result = SmartAmp::attach_with_reset(
        powered_bus(ChipFamily::Max98396),
        RecordingDelay::new(),
        ChipFamily::Max98396,
        AmpConfig::default(),
        &mut pin,
    );
    assert_eq!(result.err(), Some(Error::Gpio));
    pin.done();
}
