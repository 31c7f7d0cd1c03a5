//! Suspend/resume: cache-only mode, reset on resume, and sync.
//!
//! The device loses every register while suspended. Resume must put back
//! each non-volatile value software ever set, and must never replay a
//! volatile register.

#![allow(clippy::unwrap_used)]

mod common;

use common::{attach, hw};
use platform::mocks::{BusOp, MockBusError};
use smart_amp::{ChipFamily, Error, PowerDirection, TdmSlots};

const AMP_VOL_CTRL: u16 = 0x2090;
const AMP_PATH_GAIN: u16 = 0x2091;
const PCM_RX_SRC2: u16 = 0x2056;
const GLOBAL_EN: u16 = 0x210F;
const AMP_EN: u16 = 0x20AF;
const PCM_RX_EN: u16 = 0x205E;
const REVISION_ID: u16 = 0x21FF;

/// Settings made before and during suspend survive a power loss.
#[test]
fn resume_restores_non_volatile_registers() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.put_control("Digital Volume", 0x40).unwrap();

    amp.suspend().unwrap();
    common::forget_history(&mut amp);
    amp.put_control("Speaker Volume", 5).unwrap();
    assert!(
        amp.regmap().bus().ops().is_empty(),
        "no bus traffic while suspended"
    );

    amp.regmap_mut().bus_mut().power_loss();
    amp.resume().unwrap();

    assert_eq!(hw(&amp, AMP_VOL_CTRL), 0x3F, "inverted digital volume");
    assert_eq!(hw(&amp, AMP_PATH_GAIN), 0x05);
    assert_eq!(hw(&amp, PCM_RX_SRC2), 0x10, "attach-time setting");
    assert!(
        common::writes(&amp).iter().all(|&(reg, _)| reg != GLOBAL_EN),
        "volatile global enable must not be replayed"
    );
    assert!(amp.check_verified().is_ok());
}

/// Suspend takes a playing amplifier down through its hooks.
#[test]
fn suspend_powers_down_playback() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.configure_tdm(TdmSlots {
        tx_mask: 0x3,
        rx_mask: 0x3,
        slots: 8,
        slot_width: 32,
    })
    .unwrap();
    amp.stream_event("HiFi Playback", PowerDirection::Up).unwrap();
    common::forget_history(&mut amp);

    amp.suspend().unwrap();
    assert_eq!(
        common::writes(&amp),
        [(AMP_EN, 0x00), (GLOBAL_EN, 0x00), (PCM_RX_EN, 0x00)]
    );
    assert!(!amp.is_powered("Amp Enable"));
    assert!(!amp.tdm_mode());
}

/// Playback running at suspend is running again after resume.
#[test]
fn resume_restarts_playback() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.stream_event("HiFi Playback", PowerDirection::Up).unwrap();
    amp.suspend().unwrap();
    amp.regmap_mut().bus_mut().power_loss();
    common::forget_history(&mut amp);

    amp.resume().unwrap();
    let writes = common::writes(&amp);
    assert_eq!(
        writes.get(writes.len().saturating_sub(3)..),
        Some(&[(AMP_EN, 0x01), (PCM_RX_EN, 0x01), (GLOBAL_EN, 0x01)][..])
    );
    assert_eq!(hw(&amp, GLOBAL_EN), 0x01);
    assert!(amp.is_powered("BE_OUT"));

    // Stop and start again from the restored state.
    amp.stream_event("HiFi Playback", PowerDirection::Down).unwrap();
    assert_eq!(hw(&amp, GLOBAL_EN), 0x00);
    amp.stream_event("HiFi Playback", PowerDirection::Up).unwrap();
    assert_eq!(hw(&amp, GLOBAL_EN), 0x01);
}

/// Stream events while suspended are applied on resume.
#[test]
fn stream_start_while_suspended_waits_for_resume() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.suspend().unwrap();
    common::forget_history(&mut amp);

    amp.stream_event("HiFi Playback", PowerDirection::Up).unwrap();
    assert!(amp.regmap().bus().ops().is_empty());
    assert!(!amp.is_powered("Amp Enable"));

    amp.resume().unwrap();
    assert!(amp.is_powered("Amp Enable"));
    assert_eq!(hw(&amp, GLOBAL_EN), 0x01);
}

/// A failed power-down write is reported, and the device is still frozen.
#[test]
fn suspend_reports_power_down_error() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.stream_event("HiFi Playback", PowerDirection::Up).unwrap();
    amp.regmap_mut().bus_mut().fail_writes(GLOBAL_EN, 1);

    assert_eq!(
        amp.suspend(),
        Err(Error::Bus(MockBusError { reg: GLOBAL_EN }))
    );
    assert!(amp.regmap().is_cache_only());
    assert_eq!(hw(&amp, PCM_RX_EN), 0x00, "receive path still cleared");
}

/// Resume starts with the software reset, then the sync writes.
#[test]
fn resume_resets_before_sync() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.put_control("Speaker Volume", 5).unwrap();
    amp.suspend().unwrap();
    common::forget_history(&mut amp);

    amp.resume().unwrap();
    let ops = amp.regmap().bus().ops();
    assert_eq!(ops.first(), Some(&BusOp::Write(0x2000, 0x01)));
    assert_eq!(ops.get(1), Some(&BusOp::Read(REVISION_ID)));
    assert!(ops.contains(&BusOp::Write(AMP_PATH_GAIN, 0x05)));
    assert_eq!(amp.delay().calls_ms(), [10]);
}

/// An unverified reset is flagged but does not stop the sync.
#[test]
fn failed_reset_on_resume_is_not_fatal() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.put_control("Speaker Volume", 5).unwrap();
    amp.suspend().unwrap();
    amp.regmap_mut().bus_mut().power_loss();
    amp.regmap_mut().bus_mut().fail_reads_always(REVISION_ID);

    amp.resume().unwrap();
    assert_eq!(
        amp.check_verified(),
        Err(Error::ResetVerificationFailed { attempts: 3 })
    );
    assert_eq!(hw(&amp, AMP_PATH_GAIN), 0x05);
}

/// A bus error during sync is reported; the failed entry stays dirty.
#[test]
fn sync_error_is_reported() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.put_control("Speaker Volume", 5).unwrap();
    amp.suspend().unwrap();
    amp.regmap_mut().bus_mut().fail_writes(AMP_PATH_GAIN, 1);

    assert_eq!(
        amp.resume(),
        Err(Error::Bus(MockBusError { reg: AMP_PATH_GAIN }))
    );
    assert!(amp.regmap().cache().dirty_count() > 0);
    assert!(amp.regmap_mut().sync().unwrap() > 0);
    assert_eq!(hw(&amp, AMP_PATH_GAIN), 0x05);
}

/// Volatile registers have no storage while suspended.
#[test]
fn volatile_access_while_suspended() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.suspend().unwrap();
    assert_eq!(
        amp.regmap_mut().read(REVISION_ID),
        Err(Error::CacheOnly(REVISION_ID))
    );
    assert_eq!(amp.get_control("Speaker Volume").unwrap(), 0x0B);
    amp.regmap_mut().write(GLOBAL_EN, 0x01).unwrap();
    assert!(amp.regmap().bus().ops().is_empty());
    assert_eq!(amp.regmap().cached(GLOBAL_EN), None);
}
