//! Shared fixtures: a simulated amplifier behind `MockRegisterBus`.

#![allow(dead_code, clippy::unwrap_used)]

use platform::mocks::{MockRegisterBus, RecordingDelay};
use smart_amp::{AmpConfig, ChipFamily, SmartAmp};

/// Engine over the simulated register file.
pub type MockAmp = SmartAmp<MockRegisterBus, RecordingDelay>;

/// Revision ID the simulated parts report.
pub const REVISION: u8 = 0x41;

/// Register file holding `family`'s power-on defaults, with a working
/// software reset.
pub fn powered_bus(family: ChipFamily) -> MockRegisterBus {
    let chip = family.chip();
    let defaults = chip
        .map
        .defaults
        .iter()
        .map(|d| (d.reg, d.def))
        .chain([(chip.reset.revision, REVISION)]);
    MockRegisterBus::with_defaults(defaults).with_reset_register(chip.reset.sw_reset)
}

/// Attached device with default config; bus log and delay history cleared.
pub fn attach(family: ChipFamily) -> MockAmp {
    attach_with(family, AmpConfig::default())
}

/// Attached device with `config`; bus log and delay history cleared.
pub fn attach_with(family: ChipFamily, config: AmpConfig) -> MockAmp {
    let mut amp = SmartAmp::attach(powered_bus(family), RecordingDelay::new(), family, config).unwrap();
    forget_history(&mut amp);
    amp
}

/// Clear the bus log and delay history.
pub fn forget_history(amp: &mut MockAmp) {
    amp.regmap_mut().bus_mut().clear_log();
    amp.delay_mut().clear();
}

/// Writes seen since the last [`forget_history`].
pub fn writes(amp: &MockAmp) -> Vec<(u16, u8)> {
    amp.regmap().bus().writes()
}

/// Hardware value of `reg`.
pub fn hw(amp: &MockAmp, reg: u16) -> u8 {
    amp.regmap().bus().peek(reg)
}
