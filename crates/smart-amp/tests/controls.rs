//! Named controls: user values, inversion, enumerations and routing side
//! effects.

#![allow(clippy::unwrap_used)]

mod common;

use common::{attach, hw, writes};
use smart_amp::{ChipFamily, ControlKind, Error, PowerDirection};

/// Inverted volume: register 0 is full scale.
#[test]
fn digital_volume_is_inverted() {
    let mut amp = attach(ChipFamily::Max98396);
    assert_eq!(amp.get_control("Digital Volume").unwrap(), 0x7F);

    assert!(amp.put_control("Digital Volume", 0x10).unwrap());
    assert_eq!(writes(&amp), [(0x2090, 0x6F)]);
    assert_eq!(amp.get_control("Digital Volume").unwrap(), 0x10);
}

/// Writing the current value changes nothing on the bus.
#[test]
fn unchanged_value_is_not_written() {
    let mut amp = attach(ChipFamily::Max98396);
    assert!(!amp.put_control("Speaker Volume", 0x0B).unwrap());
    assert!(writes(&amp).is_empty());
}

/// One-bit switches touch only their own bit.
#[test]
fn switch_preserves_neighbouring_bits() {
    let mut amp = attach(ChipFamily::Max98396);
    // AMP_DSP_CFG holds 0x03 after attach: DC blocker and dither on.
    assert_eq!(amp.get_control("Dither Switch").unwrap(), 1);
    assert!(amp.put_control("Ramp Up Switch", 1).unwrap());
    assert_eq!(hw(&amp, 0x2092), 0x0B);
    assert!(amp.put_control("DC Blocker Switch", 0).unwrap());
    assert_eq!(hw(&amp, 0x2092), 0x0A);
}

/// MAX98520 dynamic mode is stored inverted in AMP_CFG bit 4.
#[test]
fn max98520_dynamic_mode_is_inverted() {
    let mut amp = attach(ChipFamily::Max98520);
    assert_eq!(hw(&amp, 0x2095), 0xC8);
    assert_eq!(amp.get_control("Dynamic Mode Switch").unwrap(), 1);
    assert_eq!(amp.get_control("Speaker Mode Switch").unwrap(), 1);

    assert!(amp.put_control("Dynamic Mode Switch", 0).unwrap());
    assert_eq!(writes(&amp), [(0x2095, 0xD8)]);
}

/// The attach sequence selects left+right on MAX98520 and left on MAX98396.
#[test]
fn dai_sel_after_attach() {
    let mut max98520 = attach(ChipFamily::Max98520);
    assert_eq!(max98520.get_control("DAI Sel").unwrap(), 2);
    let mut max98396 = attach(ChipFamily::Max98396);
    assert_eq!(max98396.get_control("DAI Sel").unwrap(), 0);
}

/// Values above the maximum are refused before any register access.
#[test]
fn out_of_range_values() {
    let mut amp = attach(ChipFamily::Max98396);
    assert_eq!(
        amp.put_control("Digital Volume", 0x80),
        Err(Error::ControlOutOfRange {
            value: 0x80,
            max: 0x7F
        })
    );
    assert_eq!(
        amp.put_control("DAI Sel", 3),
        Err(Error::ControlOutOfRange { value: 3, max: 2 })
    );
    assert_eq!(
        amp.put_control("VI Sense Switch", 2),
        Err(Error::ControlOutOfRange { value: 2, max: 1 })
    );
    assert!(amp.regmap().bus().ops().is_empty());
}

/// Unknown names, including controls only the other chip has.
#[test]
fn unknown_controls() {
    let mut amp = attach(ChipFamily::Max98396);
    assert_eq!(amp.get_control("Master Volume"), Err(Error::UnknownControl));
    assert_eq!(amp.put_control("Dynamic Mode Switch", 1), Err(Error::UnknownControl));

    let mut amp = attach(ChipFamily::Max98520);
    assert_eq!(amp.get_control("VI Sense Switch"), Err(Error::UnknownControl));
}

/// Changing the mux keeps playback powered through another route.
#[test]
fn dai_sel_change_keeps_playback_powered() {
    let mut amp = attach(ChipFamily::Max98396);
    amp.stream_event("HiFi Playback", PowerDirection::Up).unwrap();
    common::forget_history(&mut amp);

    assert!(amp.put_control("DAI Sel", 1).unwrap());
    assert_eq!(writes(&amp), [(0x2055, 0x01)]);
    assert!(amp.is_powered("BE_OUT"));
    assert!(amp.is_powered("Amp Enable"));
}

/// Control tables carry the dB scales callers display.
#[test]
fn volume_scales() {
    let chip = ChipFamily::Max98396.chip();
    let digital = chip.controls.iter().find(|c| c.name == "Digital Volume").unwrap();
    let ControlKind::Volume(tlv) = digital.kind else {
        unreachable!("digital volume is a volume control");
    };
    assert_eq!(tlv.cdb(0), None);
    assert_eq!(tlv.cdb(0x7F), Some(50));

    let speaker = chip.controls.iter().find(|c| c.name == "Speaker Volume").unwrap();
    let ControlKind::Volume(tlv) = speaker.kind else {
        unreachable!("speaker volume is a volume control");
    };
    assert_eq!(tlv.cdb(0), Some(400));
    assert_eq!(tlv.cdb(0x11), Some(2100));
}
