//! TDM slot allocation.
//!
//! A TDM layout is `(tx_mask, rx_mask, slots, slot_width)`. All four zero
//! means "leave TDM mode". Anything else must pass two checks, in order:
//! the slot width must be a valid channel size, then `slots × slot_width`
//! must have a BCLK selector.
//!
//! Every TX slot not in `tx_mask` is put in high impedance so other devices
//! on the same frame can drive it.

use platform::RegisterBus;

use crate::error::{Error, FormatError};
use crate::pcm::{self, ChannelSize, CLK_SETUP_BSEL_MASK, MODE_CFG_CHANSZ_MASK};
use crate::regmap::Regmap;

/// PCM_RX_SRC2 DMIX channel 0 source.
pub const RX_SRC2_CH0_MASK: u8 = 0x0F;
/// PCM_RX_SRC2 DMIX channel 1 source.
pub const RX_SRC2_CH1_MASK: u8 = 0xF0;
/// PCM_RX_SRC2 DMIX channel 1 shift.
pub const RX_SRC2_CH1_SHIFT: u32 = 4;

/// Requested TDM slot layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TdmSlots {
    /// Slots this device transmits in.
    pub tx_mask: u32,
    /// Slots this device receives from.
    pub rx_mask: u32,
    /// Slots per frame.
    pub slots: u32,
    /// Bits per slot.
    pub slot_width: u32,
}

impl TdmSlots {
    /// The all-zero layout that turns TDM mode off.
    pub const DISABLED: Self = Self {
        tx_mask: 0,
        rx_mask: 0,
        slots: 0,
        slot_width: 0,
    };

    /// Whether this layout turns TDM mode off.
    pub fn is_disabled(&self) -> bool {
        *self == Self::DISABLED
    }
}

/// Register fields for one accepted layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TdmPlan {
    /// BCLK selector for `slots × slot_width`.
    pub bsel: u8,
    /// Slot word length.
    pub ch_size: ChannelSize,
    /// DMIX channel 0 source field value, in place.
    pub rx_ch0: u8,
    /// DMIX channel 1 source field value, in place.
    pub rx_ch1: u8,
    /// Hi-Z mask for slots 0–7.
    pub hiz_low: u8,
    /// Hi-Z mask for slots 8–15.
    pub hiz_high: u8,
}

/// Hi-Z masks for a TX slot mask, as `(slots 0–7, slots 8–15)`.
pub fn hiz_masks(tx_mask: u32) -> (u8, u8) {
    let [low, high, ..] = (!tx_mask).to_le_bytes();
    (low, high)
}

/// Validate `slots`. `Ok(None)` means TDM mode is being turned off.
pub fn plan_tdm(slots: TdmSlots) -> Result<Option<TdmPlan>, FormatError> {
    if slots.is_disabled() {
        return Ok(None);
    }

    let ch_size = ChannelSize::from_width(slots.slot_width)?;
    let ratio = slots
        .slots
        .checked_mul(slots.slot_width)
        .ok_or(FormatError::UnsupportedClockRatio(u32::MAX))?;
    let bsel = pcm::require_bclk_selector(ratio)?;

    let [rx_low, ..] = slots.rx_mask.to_le_bytes();
    let (hiz_low, hiz_high) = hiz_masks(slots.tx_mask);

    Ok(Some(TdmPlan {
        bsel,
        ch_size,
        rx_ch0: rx_low & RX_SRC2_CH0_MASK,
        rx_ch1: rx_low.wrapping_shl(RX_SRC2_CH1_SHIFT) & RX_SRC2_CH1_MASK,
        hiz_low,
        hiz_high,
    }))
}

/// TDM register addresses of one chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TdmRegisters {
    /// PCM_MODE_CFG.
    pub mode_cfg: u16,
    /// PCM_CLK_SETUP.
    pub clk_setup: u16,
    /// PCM_RX_SRC2.
    pub rx_src2: u16,
    /// TX Hi-Z registers `(slots 0–7, slots 8–15)`, on chips that transmit.
    pub hiz: Option<(u16, u16)>,
}

/// Program an accepted plan.
pub fn apply_tdm<B: RegisterBus>(
    regmap: &mut Regmap<B>,
    regs: &TdmRegisters,
    plan: &TdmPlan,
) -> Result<(), Error<B::Error>> {
    regmap.update_bits(regs.clk_setup, CLK_SETUP_BSEL_MASK, plan.bsel)?;
    regmap.update_bits(regs.mode_cfg, MODE_CFG_CHANSZ_MASK, plan.ch_size.field())?;
    regmap.update_bits(regs.rx_src2, RX_SRC2_CH0_MASK, plan.rx_ch0)?;
    regmap.update_bits(regs.rx_src2, RX_SRC2_CH1_MASK, plan.rx_ch1)?;
    if let Some((low, high)) = regs.hiz {
        regmap.write(low, plan.hiz_low)?;
        regmap.write(high, plan.hiz_high)?;
    }
    Ok(())
}
