//! MAX98396: boosted class-D amplifier with speaker IV sense.
//!
//! Playback runs `Amp Enable → DAI Sel Mux → BE_OUT`. The voltage and current
//! monitors feed the capture interface through the `VI Sense` switch.

pub mod registers;

use self::registers as reg;
use super::{AmpEnableRegisters, Chip, ChipFamily, InitStep};
use crate::controls::{ControlDesc, TlvScale};
use crate::dapm::{RouteDesc, WidgetDesc, WidgetHook, WidgetKind};
use crate::pcm::{FormatCaps, PcmRegisters, RATES_96K};
use crate::reset::ResetRegisters;
use crate::tdm::TdmRegisters;

/// Playback stream name.
pub const PLAYBACK: &str = "HiFi Playback";
/// Capture stream name.
pub const CAPTURE: &str = "HiFi Capture";

/// Items of the `DAI Sel` mux.
pub static DAI_SEL_ITEMS: [&str; 3] = ["Left", "Right", "LeftRight"];

/// -63 dB to +0.5 dB in 0.5 dB steps, step 0 mutes.
pub const DIGITAL_TLV: TlvScale = TlvScale {
    min_cdb: -6300,
    step_cdb: 50,
    mute: true,
};

/// +4 dB to +21 dB in 1 dB steps.
pub const SPEAKER_TLV: TlvScale = TlvScale {
    min_cdb: 400,
    step_cdb: 100,
    mute: false,
};

static CONTROLS: [ControlDesc; 13] = [
    ControlDesc::volume("Digital Volume", reg::AMP_VOL_CTRL, 0x7F, true, DIGITAL_TLV),
    ControlDesc::volume("Speaker Volume", reg::AMP_PATH_GAIN, 0x11, false, SPEAKER_TLV),
    ControlDesc::switch("Ramp Up Switch", reg::AMP_DSP_CFG, 3),
    ControlDesc::switch("Ramp Down Switch", reg::AMP_DSP_CFG, 4),
    ControlDesc::switch("CLK Monitor Switch", reg::ENABLE_CTRLS, 0),
    ControlDesc::switch("Dither Switch", reg::AMP_DSP_CFG, 1),
    ControlDesc::switch("DC Blocker Switch", reg::AMP_DSP_CFG, 0),
    ControlDesc::switch("PCM Bypass Switch", reg::PCM_RX_EN, 1),
    ControlDesc::switch("DHT Switch", reg::DHT_EN, 0),
    ControlDesc::switch("BPE Switch", reg::BPE_EN, 0),
    ControlDesc::switch("BPE Limiter Switch", reg::BPE_EN, 1),
    ControlDesc::enumerated("DAI Sel", reg::PCM_RX_SRC1, 0, &DAI_SEL_ITEMS).dapm(),
    ControlDesc::switch("VI Sense Switch", reg::PCM_TX_EN, 0).dapm(),
];

static WIDGETS: [WidgetDesc; 9] = [
    WidgetDesc::new("Amp Enable", WidgetKind::Dac)
        .stream(PLAYBACK)
        .power(reg::AMP_EN, 0)
        .hook(WidgetHook::AmpEnable),
    WidgetDesc::new("DAI Sel Mux", WidgetKind::Mux).control("DAI Sel"),
    WidgetDesc::new("BE_OUT", WidgetKind::Output),
    WidgetDesc::new("Voltage Sense", WidgetKind::AifOut)
        .stream(CAPTURE)
        .power(reg::IV_SENSE_PATH_EN, 0),
    WidgetDesc::new("Current Sense", WidgetKind::AifOut)
        .stream(CAPTURE)
        .power(reg::IV_SENSE_PATH_EN, 1),
    WidgetDesc::new("VI Sense", WidgetKind::Switch).control("VI Sense Switch"),
    WidgetDesc::new("VMON", WidgetKind::SigGen),
    WidgetDesc::new("IMON", WidgetKind::SigGen),
    WidgetDesc::new("FBMON", WidgetKind::SigGen),
];

static ROUTES: [RouteDesc; 8] = [
    RouteDesc::new("DAI Sel Mux", Some("Left"), "Amp Enable"),
    RouteDesc::new("DAI Sel Mux", Some("Right"), "Amp Enable"),
    RouteDesc::new("DAI Sel Mux", Some("LeftRight"), "Amp Enable"),
    RouteDesc::new("BE_OUT", None, "DAI Sel Mux"),
    RouteDesc::new("VI Sense", Some("Switch"), "VMON"),
    RouteDesc::new("VI Sense", Some("Switch"), "IMON"),
    RouteDesc::new("Voltage Sense", None, "VI Sense"),
    RouteDesc::new("Current Sense", None, "VI Sense"),
];

static INIT: [InitStep; 10] = [
    InitStep::write(reg::ENABLE_CTRLS, 0x00),
    InitStep::write(reg::PCM_RX_SRC1, 0x00),
    InitStep::write(reg::PCM_RX_SRC2, 0x10),
    InitStep::write(reg::PCM_TX_EN, 0x01),
    InitStep::write(reg::PCM_TX_SRC_EN, 0x01),
    // DC blocker on, speaker safe mode off.
    InitStep::update(reg::AMP_DSP_CFG, 0x21, 0x01),
    InitStep::update(reg::IV_SENSE_PATH_CFG, 0x03, 0x03),
    InitStep::MonitorSlots {
        vmon: reg::PCM_TX_CTRL_1,
        imon: reg::PCM_TX_CTRL_2,
        hiz_low: reg::PCM_TX_HIZ_CTRL_8,
        hiz_high: reg::PCM_TX_HIZ_CTRL_7,
    },
    InitStep::Interleave {
        reg: reg::PCM_MODE_CFG,
    },
    // Restart the clocks automatically after a clock error.
    InitStep::update(reg::CLK_MON_CTRL, 0x01, 0x01),
];

/// MAX98396 descriptor.
pub static CHIP: Chip = Chip {
    family: ChipFamily::Max98396,
    map: &reg::MAP,
    caps: FormatCaps {
        rates: &RATES_96K,
        ivadc_rate: true,
    },
    pcm: PcmRegisters {
        mode_cfg: reg::PCM_MODE_CFG,
        clk_setup: reg::PCM_CLK_SETUP,
        sr_setup: reg::PCM_SR_SETUP,
    },
    tdm: TdmRegisters {
        mode_cfg: reg::PCM_MODE_CFG,
        clk_setup: reg::PCM_CLK_SETUP,
        rx_src2: reg::PCM_RX_SRC2,
        hiz: Some((reg::PCM_TX_HIZ_CTRL_8, reg::PCM_TX_HIZ_CTRL_7)),
    },
    reset: ResetRegisters {
        sw_reset: reg::SW_RESET,
        revision: reg::REVISION_ID,
    },
    amp: AmpEnableRegisters {
        rx_enable: reg::PCM_RX_EN,
        global_enable: reg::GLOBAL_EN,
    },
    settle_ms: 0,
    widgets: &WIDGETS,
    routes: &ROUTES,
    controls: &CONTROLS,
    init: &INIT,
};
