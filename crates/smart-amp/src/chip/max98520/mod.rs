//! MAX98520: class-D amplifier with a playback path only.

pub mod registers;

use self::registers as reg;
use super::{AmpEnableRegisters, Chip, ChipFamily, InitStep};
use crate::controls::ControlDesc;
use crate::dapm::{RouteDesc, WidgetDesc, WidgetHook, WidgetKind};
use crate::pcm::{FormatCaps, PcmRegisters, RATES_192K};
use crate::reset::ResetRegisters;
use crate::tdm::TdmRegisters;

use super::max98396::{DAI_SEL_ITEMS, DIGITAL_TLV, PLAYBACK, SPEAKER_TLV};

/// Reset, enable and disable need this long to take effect.
pub const SETTLE_MS: u32 = 30;

static CONTROLS: [ControlDesc; 14] = [
    ControlDesc::volume("Digital Volume", reg::AMP_VOL_CTRL, 0x7F, true, DIGITAL_TLV),
    ControlDesc::volume("Speaker Volume", reg::AMP_PATH_GAIN, 0x11, false, SPEAKER_TLV),
    ControlDesc::switch("Ramp Up Switch", reg::AMP_DSP_CFG, 3),
    ControlDesc::switch("Ramp Down Switch", reg::AMP_DSP_CFG, 4),
    ControlDesc::switch("CLK Monitor Switch", reg::ERR_MON_CTRL, 0),
    ControlDesc::switch("CLKMON Autorestart Switch", reg::CLK_MON_CTRL, 0),
    ControlDesc::switch("Dither Switch", reg::AMP_DSP_CFG, 1),
    ControlDesc::switch("DC Blocker Switch", reg::AMP_DSP_CFG, 0),
    ControlDesc::switch("Speaker Safemode Switch", reg::AMP_DSP_CFG, 5),
    ControlDesc::switch("CP Bypass Switch", reg::SSM_CFG, 3),
    ControlDesc::switch("Dynamic Mode Switch", reg::AMP_CFG, 4).inverted(),
    ControlDesc::switch("Speaker Mode Switch", reg::AMP_CFG, 3),
    ControlDesc::switch("DHT Switch", reg::DHT_EN, 0),
    ControlDesc::enumerated("DAI Sel", reg::PCM_RX_SRC1, 0, &DAI_SEL_ITEMS).dapm(),
];

static WIDGETS: [WidgetDesc; 3] = [
    WidgetDesc::new("Amp Enable", WidgetKind::Dac)
        .stream(PLAYBACK)
        .power(reg::AMP_EN, 0)
        .hook(WidgetHook::AmpEnable),
    WidgetDesc::new("DAI Sel Mux", WidgetKind::Mux).control("DAI Sel"),
    WidgetDesc::new("BE_OUT", WidgetKind::Output),
];

static ROUTES: [RouteDesc; 4] = [
    RouteDesc::new("DAI Sel Mux", Some("Left"), "Amp Enable"),
    RouteDesc::new("DAI Sel Mux", Some("Right"), "Amp Enable"),
    RouteDesc::new("DAI Sel Mux", Some("LeftRight"), "Amp Enable"),
    RouteDesc::new("BE_OUT", None, "DAI Sel Mux"),
];

static INIT: [InitStep; 9] = [
    InitStep::write(reg::PCM_RX_SRC1, 0x02),
    InitStep::write(reg::PCM_RX_SRC2, 0x10),
    InitStep::update(reg::AMP_DSP_CFG, 0x01, 0x01),
    InitStep::update(reg::AMP_DSP_CFG, 0x20, 0x00),
    InitStep::write(reg::CLK_MON_CTRL, 0x01),
    // Test-mode unlock, then boost trim.
    InitStep::write(reg::REVISION_ID, 0x54),
    InitStep::write(reg::REVISION_ID, 0x4D),
    InitStep::write(reg::BOOST_TM1, 0x02),
    InitStep::write(reg::AMP_CFG, 0xC8),
];

/// MAX98520 descriptor.
pub static CHIP: Chip = Chip {
    family: ChipFamily::Max98520,
    map: &reg::MAP,
    caps: FormatCaps {
        rates: &RATES_192K,
        ivadc_rate: false,
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
        hiz: None,
    },
    reset: ResetRegisters {
        sw_reset: reg::SW_RESET,
        revision: reg::REVISION_ID,
    },
    amp: AmpEnableRegisters {
        rx_enable: reg::PCM_RX_EN,
        global_enable: reg::GLOBAL_EN,
    },
    settle_ms: SETTLE_MS,
    widgets: &WIDGETS,
    routes: &ROUTES,
    controls: &CONTROLS,
    init: &INIT,
};
