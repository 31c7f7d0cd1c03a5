//! TDM slot allocation against the simulated register file.

#![allow(clippy::unwrap_used)]

mod common;

use common::{attach, hw, writes};
use smart_amp::{ChipFamily, Error, PowerDirection, TdmSlots};

fn slots(tx_mask: u32, rx_mask: u32, slots: u32, slot_width: u32) -> TdmSlots {
    TdmSlots {
        tx_mask,
        rx_mask,
        slots,
        slot_width,
    }
}

/// Eight 32-bit slots, transmitting in slots 0 and 1.
#[test]
fn eight_by_32_layout_on_max98396() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.configure_tdm(slots(0x0003, 0x0002, 8, 32)).unwrap();

    assert!(amp.tdm_mode());
    assert_eq!(
        writes(&amp),
        [
            (0x2042, 0x08), // BCLK selector for 256
            (0x2056, 0x12), // DMIX CH0 source
            (0x2056, 0x22), // DMIX CH1 source
            (0x2053, 0xFC), // Hi-Z slots 0-7
            (0x2052, 0xFF), // Hi-Z slots 8-15
        ]
    );
}

/// All four inputs zero leaves TDM mode without touching the device.
#[test]
fn all_zero_disables_without_writes() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.configure_tdm(slots(0x3, 0x3, 4, 16)).unwrap();
    common::forget_history(&mut amp);

    amp.configure_tdm(TdmSlots::DISABLED).unwrap();
    assert!(!amp.tdm_mode());
    assert!(amp.regmap().bus().ops().is_empty());
}

/// A rejected layout leaves the registers alone.
#[test]
fn rejected_layout_writes_nothing() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.configure_tdm(slots(0x3, 0x3, 4, 16)).unwrap();
    common::forget_history(&mut amp);

    assert_eq!(
        amp.configure_tdm(slots(0x3, 0x3, 5, 16)).err(),
        Some(Error::UnsupportedClockRatio(80))
    );
    assert_eq!(
        amp.configure_tdm(slots(0x3, 0x3, 4, 20)).err(),
        Some(Error::UnsupportedFormat(20))
    );
    assert!(amp.regmap().bus().ops().is_empty());
}

/// Any non-zero layout turns TDM mode on, even one that is refused.
#[test]
fn rejected_layout_still_enters_tdm_mode() {
    let mut amp = attach(ChipFamily::Max98396);
    assert!(!amp.tdm_mode());

    assert_eq!(
        amp.configure_tdm(slots(0x3, 0x3, 5, 20)).err(),
        Some(Error::UnsupportedFormat(20))
    );
    assert!(amp.tdm_mode());
    assert!(amp.regmap().bus().ops().is_empty());

    amp.configure_tdm(TdmSlots::DISABLED).unwrap();
    assert!(!amp.tdm_mode());
}

/// MAX98520 does not transmit, so no Hi-Z registers exist.
#[test]
fn max98520_has_no_hiz() {
    let mut amp = attach(ChipFamily::Max98520);
    amp.configure_tdm(slots(0x1, 0x1, 2, 16)).unwrap();

    assert_eq!(
        writes(&amp),
        [
            (0x2041, 0x02), // BCLK selector for 32
            (0x2040, 0x40), // 16-bit slots
            (0x2044, 0x11), // DMIX CH0 source
        ],
        "CH1 already holds 1 from attach"
    );
}

/// Slots 8-15 land in the high Hi-Z register.
#[test]
fn upper_slots_drive_high_hiz_register() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.configure_tdm(slots(0x0300, 0x1, 16, 16)).unwrap();
    assert_eq!(hw(&amp, 0x2053), 0xFF);
    assert_eq!(hw(&amp, 0x2052), 0xFC);
}

/// Amplifier power-down always drops TDM mode.
#[test]
fn power_down_clears_tdm_mode() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.configure_tdm(slots(0x3, 0x3, 8, 16)).unwrap();
    amp.stream_event("HiFi Playback", PowerDirection::Up).unwrap();
    assert!(amp.tdm_mode(), "power-up keeps the layout");

    amp.stream_event("HiFi Playback", PowerDirection::Down).unwrap();
    assert!(!amp.tdm_mode());
}
