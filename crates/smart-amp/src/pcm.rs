//! PCM format negotiation.
//!
//! Turns a requested `(rate, width, channels)` plus interface format into the
//! PCM register fields both amplifier families share:
//!
//! | Register      | Field        | Bits  |
//! |---------------|--------------|-------|
//! | PCM_MODE_CFG  | channel size | [7:6] |
//! | PCM_MODE_CFG  | format       | [5:3] |
//! | PCM_MODE_CFG  | TX interleave| [2]   |
//! | PCM_CLK_SETUP | BCLK edge    | [4]   |
//! | PCM_CLK_SETUP | BCLK select  | [3:0] |
//! | PCM_SR_SETUP  | IV-ADC rate  | [7:4] |
//! | PCM_SR_SETUP  | sample rate  | [3:0] |
//!
//! Planning ([`plan_format`]) is pure and does all validation; applying
//! ([`apply_format`]) only issues `update_bits` calls, so a rejected request
//! never reaches the bus.

use platform::RegisterBus;

use crate::error::{Error, FormatError};
use crate::regmap::Regmap;

// ── Field masks ──────────────────────────────────────────────────────────────

/// PCM_MODE_CFG channel-size field.
pub const MODE_CFG_CHANSZ_MASK: u8 = 0xC0;
/// PCM_MODE_CFG interface-format field.
pub const MODE_CFG_FORMAT_MASK: u8 = 0x38;
/// PCM_MODE_CFG interface-format shift.
pub const MODE_CFG_FORMAT_SHIFT: u32 = 3;
/// PCM_MODE_CFG TX channel interleave.
pub const MODE_CFG_TX_INTERLEAVE: u8 = 0x04;
/// PCM_CLK_SETUP BCLK sampling edge.
pub const CLK_SETUP_BCLK_EDGE: u8 = 0x10;
/// PCM_CLK_SETUP BCLK-per-LRCLK selector.
pub const CLK_SETUP_BSEL_MASK: u8 = 0x0F;
/// PCM_SR_SETUP main sample-rate field.
pub const SR_MASK: u8 = 0x0F;
/// PCM_SR_SETUP IV-ADC sample-rate field.
pub const IVADC_SR_MASK: u8 = 0xF0;
/// PCM_SR_SETUP IV-ADC sample-rate shift.
pub const IVADC_SR_SHIFT: u32 = 4;

/// Rate code of 16 kHz; above it, interleaved monitors run at a lower rate.
pub const SR_16000: u8 = 0x3;
/// Code distance between the main rate and the interleaved monitor rate.
pub const IVADC_INTERLEAVE_OFFSET: u8 = 3;

// ── Interface format ─────────────────────────────────────────────────────────

/// Serial interface framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatKind {
    /// Philips I²S.
    I2s,
    /// Left-justified.
    LeftJustified,
    /// DSP mode A (TDM mode 1, data one BCLK after frame sync).
    DspA,
    /// DSP mode B (TDM mode 0, data on frame sync).
    DspB,
}

impl FormatKind {
    /// Value of the PCM_MODE_CFG format field.
    pub fn code(self) -> u8 {
        match self {
            Self::I2s => 0,
            Self::LeftJustified => 1,
            Self::DspB => 3,
            Self::DspA => 4,
        }
    }

    /// Short name for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::I2s => "I2S",
            Self::LeftJustified => "LJ",
            Self::DspA => "DSP_A",
            Self::DspB => "DSP_B",
        }
    }
}

/// Clock polarity of the serial interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockInversion {
    /// Normal BCLK, normal frame.
    #[default]
    Normal,
    /// Inverted BCLK, normal frame.
    InvertedBclk,
    /// Normal BCLK, inverted frame.
    InvertedFrame,
    /// Both inverted.
    InvertedBoth,
}

impl ClockInversion {
    /// Value of the BCLK edge bit, or an error for frame inversion.
    pub fn bclk_edge(self) -> Result<u8, FormatError> {
        match self {
            Self::Normal => Ok(0),
            Self::InvertedBclk => Ok(CLK_SETUP_BCLK_EDGE),
            Self::InvertedFrame | Self::InvertedBoth => Err(FormatError::UnsupportedInversion),
        }
    }
}

// ── Channel size ─────────────────────────────────────────────────────────────

/// PCM word length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelSize {
    /// 16-bit words.
    Bits16,
    /// 24-bit words.
    Bits24,
    /// 32-bit words.
    Bits32,
}

impl ChannelSize {
    /// Channel size for a sample or slot width.
    pub fn from_width(width: u32) -> Result<Self, FormatError> {
        match width {
            16 => Ok(Self::Bits16),
            24 => Ok(Self::Bits24),
            32 => Ok(Self::Bits32),
            other => Err(FormatError::UnsupportedFormat(other)),
        }
    }

    /// Width in bits.
    pub fn bits(self) -> u32 {
        match self {
            Self::Bits16 => 16,
            Self::Bits24 => 24,
            Self::Bits32 => 32,
        }
    }

    /// Value of the PCM_MODE_CFG channel-size field, in place.
    pub fn field(self) -> u8 {
        match self {
            Self::Bits16 => 0x40,
            Self::Bits24 => 0x80,
            Self::Bits32 => 0xC0,
        }
    }
}

// ── BCLK selector ────────────────────────────────────────────────────────────

/// BCLKs per LRCLK, in selector order. Selector code is index + 2.
pub const BCLK_RATIOS: [u32; 10] = [32, 48, 64, 96, 128, 192, 256, 384, 512, 320];

/// Selector code for `ratio` BCLKs per frame. Exact match only.
pub fn bclk_selector(ratio: u32) -> Option<u8> {
    BCLK_RATIOS
        .iter()
        .position(|&r| r == ratio)
        .and_then(|i| u8::try_from(i).ok())
        .map(|i| i.wrapping_add(2))
}

/// Selector code for `ratio`, or [`FormatError::UnsupportedClockRatio`].
pub fn require_bclk_selector(ratio: u32) -> Result<u8, FormatError> {
    bclk_selector(ratio).ok_or(FormatError::UnsupportedClockRatio(ratio))
}

// ── Sample rates ─────────────────────────────────────────────────────────────

/// One supported sample rate and its register code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateEntry {
    /// Frame rate in Hz.
    pub hz: u32,
    /// PCM_SR_SETUP code.
    pub code: u8,
}

impl RateEntry {
    const fn new(hz: u32, code: u8) -> Self {
        Self { hz, code }
    }
}

/// 8 kHz to 96 kHz.
pub static RATES_96K: [RateEntry; 11] = [
    RateEntry::new(8_000, 0x0),
    RateEntry::new(11_025, 0x1),
    RateEntry::new(12_000, 0x2),
    RateEntry::new(16_000, 0x3),
    RateEntry::new(22_050, 0x4),
    RateEntry::new(24_000, 0x5),
    RateEntry::new(32_000, 0x6),
    RateEntry::new(44_100, 0x7),
    RateEntry::new(48_000, 0x8),
    RateEntry::new(88_200, 0x9),
    RateEntry::new(96_000, 0xA),
];

/// 8 kHz to 192 kHz.
pub static RATES_192K: [RateEntry; 13] = [
    RateEntry::new(8_000, 0x0),
    RateEntry::new(11_025, 0x1),
    RateEntry::new(12_000, 0x2),
    RateEntry::new(16_000, 0x3),
    RateEntry::new(22_050, 0x4),
    RateEntry::new(24_000, 0x5),
    RateEntry::new(32_000, 0x6),
    RateEntry::new(44_100, 0x7),
    RateEntry::new(48_000, 0x8),
    RateEntry::new(88_200, 0x9),
    RateEntry::new(96_000, 0xA),
    RateEntry::new(176_400, 0xB),
    RateEntry::new(192_000, 0xC),
];

/// Code for `hz` in `rates`, or [`FormatError::UnsupportedRate`].
pub fn rate_code(rates: &[RateEntry], hz: u32) -> Result<u8, FormatError> {
    rates
        .iter()
        .find(|r| r.hz == hz)
        .map(|r| r.code)
        .ok_or(FormatError::UnsupportedRate(hz))
}

/// IV-ADC rate code for a main rate code.
///
/// With interleaved monitors the IV-ADC runs three codes below the main rate
/// once the main rate is above 16 kHz.
pub fn monitor_rate_code(rate_code: u8, interleave: bool) -> u8 {
    if interleave && rate_code > SR_16000 {
        rate_code.saturating_sub(IVADC_INTERLEAVE_OFFSET)
    } else {
        rate_code
    }
}

// ── Negotiation ──────────────────────────────────────────────────────────────

/// Stream parameters requested by the audio framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PcmParams {
    /// Frame rate in Hz.
    pub rate: u32,
    /// Sample width in bits.
    pub width: u32,
    /// Channels per frame.
    pub channels: u32,
}

/// Chip capabilities that change how a format is encoded.
#[derive(Debug, Clone, Copy)]
pub struct FormatCaps {
    /// Supported sample rates.
    pub rates: &'static [RateEntry],
    /// Chip has an IV-ADC rate field in PCM_SR_SETUP.
    pub ivadc_rate: bool,
}

/// Register fields for one accepted format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FormatPlan {
    /// Interface framing.
    pub kind: FormatKind,
    /// Word length.
    pub ch_size: ChannelSize,
    /// PCM_SR_SETUP main rate code.
    pub rate_code: u8,
    /// PCM_SR_SETUP IV-ADC rate code, on chips that have the field.
    pub ivadc_code: Option<u8>,
    /// BCLK selector; `None` in TDM mode where the slot layout owns it.
    pub bsel: Option<u8>,
}

/// Validate `params` and work out every field to program.
///
/// Order of checks: width, rate, then (outside TDM) the BCLK ratio.
pub fn plan_format(
    params: PcmParams,
    kind: FormatKind,
    caps: FormatCaps,
    tdm_mode: bool,
    interleave: bool,
) -> Result<FormatPlan, FormatError> {
    let ch_size = ChannelSize::from_width(params.width)?;
    let rate_code = rate_code(caps.rates, params.rate)?;

    let bsel = if tdm_mode {
        None
    } else {
        let ratio = params
            .channels
            .checked_mul(params.width)
            .ok_or(FormatError::UnsupportedClockRatio(u32::MAX))?;
        Some(require_bclk_selector(ratio)?)
    };

    let ivadc_code = caps
        .ivadc_rate
        .then(|| monitor_rate_code(rate_code, interleave));

    Ok(FormatPlan {
        kind,
        ch_size,
        rate_code,
        ivadc_code,
        bsel,
    })
}

/// PCM register addresses of one chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmRegisters {
    /// PCM_MODE_CFG.
    pub mode_cfg: u16,
    /// PCM_CLK_SETUP.
    pub clk_setup: u16,
    /// PCM_SR_SETUP.
    pub sr_setup: u16,
}

/// Program an accepted plan.
pub fn apply_format<B: RegisterBus>(
    regmap: &mut Regmap<B>,
    regs: &PcmRegisters,
    plan: &FormatPlan,
) -> Result<(), Error<B::Error>> {
    regmap.update_bits(
        regs.mode_cfg,
        MODE_CFG_FORMAT_MASK,
        plan.kind.code().wrapping_shl(MODE_CFG_FORMAT_SHIFT),
    )?;
    regmap.update_bits(regs.mode_cfg, MODE_CFG_CHANSZ_MASK, plan.ch_size.field())?;
    regmap.update_bits(regs.sr_setup, SR_MASK, plan.rate_code)?;
    if let Some(code) = plan.ivadc_code {
        regmap.update_bits(regs.sr_setup, IVADC_SR_MASK, code.wrapping_shl(IVADC_SR_SHIFT))?;
    }
    if let Some(bsel) = plan.bsel {
        regmap.update_bits(regs.clk_setup, CLK_SETUP_BSEL_MASK, bsel)?;
    }
    Ok(())
}

/// Program interface framing and clock polarity.
///
/// Inversion is validated before either field is written.
pub fn apply_dai_format<B: RegisterBus>(
    regmap: &mut Regmap<B>,
    regs: &PcmRegisters,
    kind: FormatKind,
    inversion: ClockInversion,
) -> Result<(), Error<B::Error>> {
    let edge = inversion.bclk_edge()?;
    regmap.update_bits(regs.clk_setup, CLK_SETUP_BCLK_EDGE, edge)?;
    regmap.update_bits(
        regs.mode_cfg,
        MODE_CFG_FORMAT_MASK,
        kind.code().wrapping_shl(MODE_CFG_FORMAT_SHIFT),
    )?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CAPS_96K: FormatCaps = FormatCaps {
        rates: &RATES_96K,
        ivadc_rate: true,
    };

    fn params(rate: u32, width: u32, channels: u32) -> PcmParams {
        PcmParams {
            rate,
            width,
            channels,
        }
    }

    #[test]
    fn selector_codes_follow_table_order() {
        assert_eq!(bclk_selector(32), Some(2));
        assert_eq!(bclk_selector(64), Some(4));
        assert_eq!(bclk_selector(512), Some(10));
        assert_eq!(bclk_selector(320), Some(11));
        assert_eq!(bclk_selector(100), None);
        assert_eq!(bclk_selector(0), None);
    }

    #[test]
    fn stereo_16_bit_44k1_uses_ratio_32() {
        let plan = plan_format(params(44_100, 16, 2), FormatKind::I2s, CAPS_96K, false, false).unwrap();
        assert_eq!(plan.bsel, Some(2));
        assert_eq!(plan.rate_code, 0x7);
        assert_eq!(plan.ch_size, ChannelSize::Bits16);
    }

    #[test]
    fn width_is_checked_before_rate() {
        let err = plan_format(params(7_000, 20, 2), FormatKind::I2s, CAPS_96K, false, false);
        assert_eq!(err, Err(FormatError::UnsupportedFormat(20)));
    }

    #[test]
    fn rate_beyond_table_rejected() {
        let err = plan_format(params(192_000, 16, 2), FormatKind::I2s, CAPS_96K, false, false);
        assert_eq!(err, Err(FormatError::UnsupportedRate(192_000)));
    }

    #[test]
    fn tdm_mode_skips_ratio_check() {
        // 3 x 24 = 72 has no selector, but TDM owns the BCLK.
        let plan = plan_format(params(48_000, 24, 3), FormatKind::DspA, CAPS_96K, true, false).unwrap();
        assert_eq!(plan.bsel, None);
    }

    #[test]
    fn interleave_offsets_monitor_rate_above_16k() {
        assert_eq!(monitor_rate_code(0x8, true), 0x5);
        assert_eq!(monitor_rate_code(0x3, true), 0x3);
        assert_eq!(monitor_rate_code(0x8, false), 0x8);
    }

    #[test]
    fn frame_inversion_is_unsupported() {
        assert_eq!(ClockInversion::Normal.bclk_edge(), Ok(0));
        assert_eq!(ClockInversion::InvertedBclk.bclk_edge(), Ok(0x10));
        assert_eq!(
            ClockInversion::InvertedFrame.bclk_edge(),
            Err(FormatError::UnsupportedInversion)
        );
    }

    #[test]
    fn format_codes_match_mode_field() {
        assert_eq!(FormatKind::I2s.code(), 0);
        assert_eq!(FormatKind::LeftJustified.code(), 1);
        assert_eq!(FormatKind::DspA.code(), 4);
        assert_eq!(FormatKind::DspB.code(), 3);
    }
}
