//! Attach-time configuration

use platform::SlotIndex;

/// Per-device settings supplied by board code at attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AmpConfig {
    /// TX slot carrying the speaker-voltage monitor.
    pub vmon_slot: SlotIndex,
    /// TX slot carrying the speaker-current monitor.
    pub imon_slot: SlotIndex,
    /// Voltage and current samples share one slot, interleaved.
    pub interleave_mode: bool,
}

impl Default for AmpConfig {
    fn default() -> Self {
        Self {
            vmon_slot: SlotIndex::from_masked(0),
            imon_slot: SlotIndex::from_masked(1),
            interleave_mode: false,
        }
    }
}

impl AmpConfig {
    /// Build from raw firmware properties.
    ///
    /// Missing slot properties fall back to the defaults; present ones keep
    /// only their low nibble.
    pub fn from_properties(vmon_slot: Option<u32>, imon_slot: Option<u32>, interleave_mode: bool) -> Self {
        let defaults = Self::default();
        Self {
            vmon_slot: vmon_slot.map_or(defaults.vmon_slot, SlotIndex::from_masked),
            imon_slot: imon_slot.map_or(defaults.imon_slot, SlotIndex::from_masked),
            interleave_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_put_monitors_in_slots_0_and_1() {
        let cfg = AmpConfig::default();
        assert_eq!(cfg.vmon_slot.get(), 0);
        assert_eq!(cfg.imon_slot.get(), 1);
        assert!(!cfg.interleave_mode);
    }

    #[test]
    fn raw_properties_are_masked() {
        let cfg = AmpConfig::from_properties(Some(0x12), None, true);
        assert_eq!(cfg.vmon_slot.get(), 2);
        assert_eq!(cfg.imon_slot.get(), 1);
        assert!(cfg.interleave_mode);
    }
}
