//! User control surface.
//!
//! Each chip publishes a static table of named register fields: volumes with
//! a dB scale, one-bit switches and enumerations. Values seen by the caller
//! are always "user" values; inverted controls are flipped on the way to and
//! from the register.

use platform::RegisterBus;

use crate::error::Error;
use crate::regmap::Regmap;

/// Linear dB scale in hundredths of a dB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TlvScale {
    /// Level at value 0.
    pub min_cdb: i32,
    /// Increment per step.
    pub step_cdb: i32,
    /// Value 0 means muted rather than `min_cdb`.
    pub mute: bool,
}

impl TlvScale {
    /// Level for user value `value`, `None` when muted.
    pub fn cdb(&self, value: u32) -> Option<i32> {
        if self.mute && value == 0 {
            return None;
        }
        let steps = i32::try_from(value).unwrap_or(i32::MAX);
        Some(self.min_cdb.saturating_add(self.step_cdb.saturating_mul(steps)))
    }
}

/// What a control's value means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Multi-step level with a dB scale.
    Volume(TlvScale),
    /// One-bit on/off.
    Switch,
    /// Named items, value is the item index.
    Enum(&'static [&'static str]),
}

/// One named register field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlDesc {
    /// Unique name.
    pub name: &'static str,
    /// Register address.
    pub reg: u16,
    /// Lowest bit of the field.
    pub shift: u8,
    /// Largest user value.
    pub max: u32,
    /// Register holds `max - value`.
    pub invert: bool,
    /// Value meaning.
    pub kind: ControlKind,
    /// Changing this control can reroute the power graph.
    pub dapm: bool,
}

impl ControlDesc {
    /// Volume control.
    pub const fn volume(name: &'static str, reg: u16, max: u32, invert: bool, tlv: TlvScale) -> Self {
        Self {
            name,
            reg,
            shift: 0,
            max,
            invert,
            kind: ControlKind::Volume(tlv),
            dapm: false,
        }
    }

    /// One-bit switch at `shift`.
    pub const fn switch(name: &'static str, reg: u16, shift: u8) -> Self {
        Self {
            name,
            reg,
            shift,
            max: 1,
            invert: false,
            kind: ControlKind::Switch,
            dapm: false,
        }
    }

    /// Enumeration over `items`, field starting at `shift`.
    #[allow(clippy::cast_possible_truncation)] // item tables are a handful of entries
    pub const fn enumerated(
        name: &'static str,
        reg: u16,
        shift: u8,
        items: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            reg,
            shift,
            max: items.len().saturating_sub(1) as u32,
            invert: false,
            kind: ControlKind::Enum(items),
            dapm: false,
        }
    }

    /// Store the inverse of the user value.
    #[must_use]
    pub const fn inverted(mut self) -> Self {
        self.invert = true;
        self
    }

    /// Mark as a routing control.
    #[must_use]
    pub const fn dapm(mut self) -> Self {
        self.dapm = true;
        self
    }

    /// Register bits the field occupies.
    pub fn mask(&self) -> u8 {
        let width = self
            .max
            .checked_add(1)
            .and_then(u32::checked_next_power_of_two)
            .map_or(u32::MAX, |p| p.saturating_sub(1));
        u8::try_from(width)
            .unwrap_or(u8::MAX)
            .wrapping_shl(u32::from(self.shift))
    }

    /// User value held in register value `raw`.
    pub fn decode(&self, raw: u8) -> u32 {
        let field = u32::from((raw & self.mask()).wrapping_shr(u32::from(self.shift)));
        if self.invert {
            self.max.saturating_sub(field)
        } else {
            field
        }
    }

    /// Field bits for user value `value`, already shifted into place.
    pub fn encode<E>(&self, value: u32) -> Result<u8, Error<E>> {
        if value > self.max {
            return Err(Error::ControlOutOfRange {
                value,
                max: self.max,
            });
        }
        let field = if self.invert {
            self.max.saturating_sub(value)
        } else {
            value
        };
        let field = u8::try_from(field).map_err(|_| Error::ControlOutOfRange {
            value,
            max: self.max,
        })?;
        Ok(field.wrapping_shl(u32::from(self.shift)) & self.mask())
    }

    /// Item name for `value`, on enumerations.
    pub fn item(&self, value: u32) -> Option<&'static str> {
        match self.kind {
            ControlKind::Enum(items) => usize::try_from(value)
                .ok()
                .and_then(|i| items.get(i))
                .copied(),
            _ => None,
        }
    }
}

/// Look up `name` in `controls`.
pub fn find<'a>(controls: &'a [ControlDesc], name: &str) -> Option<&'a ControlDesc> {
    controls.iter().find(|c| c.name == name)
}

/// Current user value of `ctl`.
pub fn get<B: RegisterBus>(regmap: &mut Regmap<B>, ctl: &ControlDesc) -> Result<u32, Error<B::Error>> {
    Ok(ctl.decode(regmap.read(ctl.reg)?))
}

/// Set `ctl` to `value`. Returns whether the register changed.
pub fn put<B: RegisterBus>(
    regmap: &mut Regmap<B>,
    ctl: &ControlDesc,
    value: u32,
) -> Result<bool, Error<B::Error>> {
    let bits = ctl.encode(value)?;
    regmap.update_bits(ctl.reg, ctl.mask(), bits)
}
