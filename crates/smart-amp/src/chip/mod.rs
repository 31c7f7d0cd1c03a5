//! Chip-family descriptors.
//!
//! Everything that differs between MAX98396 and MAX98520 is data in a
//! [`Chip`]: register map, rate table, field locations, the power graph, the
//! control table and the attach-time init sequence. The engine itself has no
//! per-chip branches.

pub mod max98396;
pub mod max98520;

use platform::RegisterBus;

use crate::config::AmpConfig;
use crate::controls::ControlDesc;
use crate::dapm::{RouteDesc, WidgetDesc};
use crate::error::Error;
use crate::pcm::{FormatCaps, PcmRegisters, MODE_CFG_TX_INTERLEAVE};
use crate::regmap::{Regmap, RegisterMap};
use crate::reset::ResetRegisters;
use crate::tdm::TdmRegisters;

/// Supported amplifier families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipFamily {
    /// Boosted class-D amplifier with IV sense.
    Max98396,
    /// Class-D amplifier, playback only.
    Max98520,
}

impl ChipFamily {
    /// Static descriptor for this family.
    pub fn chip(self) -> &'static Chip {
        match self {
            Self::Max98396 => &max98396::CHIP,
            Self::Max98520 => &max98520::CHIP,
        }
    }

    /// Part name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Max98396 => "max98396",
            Self::Max98520 => "max98520",
        }
    }
}

/// Registers driven by the amplifier-enable hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmpEnableRegisters {
    /// PCM_RX_EN; bit 0 enables the PCM receive path.
    pub rx_enable: u16,
    /// GLOBAL_EN.
    pub global_enable: u16,
}

/// PCM_RX_EN receive-path enable.
pub const PCM_RX_EN_BIT: u8 = 0x01;

/// One step of a chip's attach-time configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep {
    /// Full register write.
    Write {
        /// Address.
        reg: u16,
        /// Value.
        value: u8,
    },
    /// Read-modify-write.
    Update {
        /// Address.
        reg: u16,
        /// Bits to change.
        mask: u8,
        /// New bit values.
        value: u8,
    },
    /// Program the configured monitor slots and take both out of Hi-Z.
    MonitorSlots {
        /// TX slot register for the voltage monitor.
        vmon: u16,
        /// TX slot register for the current monitor.
        imon: u16,
        /// Hi-Z register for slots 0–7.
        hiz_low: u16,
        /// Hi-Z register for slots 8–15.
        hiz_high: u16,
    },
    /// Set the interleave bit of `reg` when the config asks for it.
    Interleave {
        /// PCM_MODE_CFG.
        reg: u16,
    },
}

impl InitStep {
    /// Write-only step.
    pub const fn write(reg: u16, value: u8) -> Self {
        Self::Write { reg, value }
    }

    /// Read-modify-write step.
    pub const fn update(reg: u16, mask: u8, value: u8) -> Self {
        Self::Update { reg, mask, value }
    }

    /// Carry out this step.
    pub fn apply<B: RegisterBus>(
        &self,
        regmap: &mut Regmap<B>,
        config: &AmpConfig,
    ) -> Result<(), Error<B::Error>> {
        match *self {
            Self::Write { reg, value } => regmap.write(reg, value),
            Self::Update { reg, mask, value } => regmap.update_bits(reg, mask, value).map(drop),
            Self::MonitorSlots {
                vmon,
                imon,
                hiz_low,
                hiz_high,
            } => {
                regmap.write(vmon, config.vmon_slot.get())?;
                regmap.write(imon, config.imon_slot.get())?;
                for slot in [config.vmon_slot, config.imon_slot] {
                    let [low, high] = slot.mask().to_le_bytes();
                    let (reg, bit) = if low != 0 { (hiz_low, low) } else { (hiz_high, high) };
                    regmap.update_bits(reg, bit, 0)?;
                }
                Ok(())
            }
            Self::Interleave { reg } => {
                if config.interleave_mode {
                    regmap.update_bits(reg, MODE_CFG_TX_INTERLEAVE, MODE_CFG_TX_INTERLEAVE)?;
                }
                Ok(())
            }
        }
    }
}

/// Everything the engine needs to know about one chip family.
#[derive(Debug)]
pub struct Chip {
    /// Family tag.
    pub family: ChipFamily,
    /// Register classification and defaults.
    pub map: &'static RegisterMap,
    /// Rate table and IV-ADC support.
    pub caps: FormatCaps,
    /// PCM format registers.
    pub pcm: PcmRegisters,
    /// TDM registers.
    pub tdm: TdmRegisters,
    /// Reset command and revision registers.
    pub reset: ResetRegisters,
    /// Amplifier-enable hook registers.
    pub amp: AmpEnableRegisters,
    /// Settle time after reset and after the amplifier turns on or off.
    pub settle_ms: u32,
    /// Power-graph widgets.
    pub widgets: &'static [WidgetDesc],
    /// Power-graph routes.
    pub routes: &'static [RouteDesc],
    /// User controls.
    pub controls: &'static [ControlDesc],
    /// Attach-time configuration, in order.
    pub init: &'static [InitStep],
}

impl Chip {
    /// Run the init sequence. Stops at the first bus error.
    pub fn initialise<B: RegisterBus>(
        &self,
        regmap: &mut Regmap<B>,
        config: &AmpConfig,
    ) -> Result<(), Error<B::Error>> {
        for step in self.init {
            step.apply(regmap, config)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dapm::PowerGraph;

    #[test]
    fn every_chip_is_consistent() {
        for family in [ChipFamily::Max98396, ChipFamily::Max98520] {
            let chip = family.chip();
            assert_eq!(chip.family, family);
            assert!(chip.map.is_well_formed(), "{} map", family.as_str());
            assert!(
                PowerGraph::new(chip.widgets, chip.routes).is_ok(),
                "{} graph",
                family.as_str()
            );
            for ctl in chip.controls {
                assert!(chip.map.exists(ctl.reg), "{} control {}", family.as_str(), ctl.name);
            }
            for w in chip.widgets {
                if let Some(control) = w.control {
                    assert!(
                        chip.controls.iter().any(|c| c.name == control && c.dapm),
                        "{} widget {} control",
                        family.as_str(),
                        w.name
                    );
                }
            }
        }
    }
}
