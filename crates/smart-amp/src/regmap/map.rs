//! Static register-map description.
//!
//! Each chip family ships one [`RegisterMap`]: its power-on defaults plus the
//! inclusive address ranges that are readable and volatile. All three tables
//! are sorted so classification is a binary search.

use core::cmp::Ordering;

/// Power-on value of one register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegDefault {
    /// Register address.
    pub reg: u16,
    /// Value after reset.
    pub def: u8,
}

impl RegDefault {
    /// Table entry for `reg` resetting to `def`.
    pub const fn new(reg: u16, def: u8) -> Self {
        Self { reg, def }
    }
}

/// Inclusive address range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegRange {
    /// First address in the range.
    pub start: u16,
    /// Last address in the range.
    pub end: u16,
}

impl RegRange {
    /// Range `start..=end`.
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    /// A range holding one register.
    pub const fn single(reg: u16) -> Self {
        Self { start: reg, end: reg }
    }

    /// Whether `reg` falls inside the range.
    pub const fn contains(&self, reg: u16) -> bool {
        self.start <= reg && reg <= self.end
    }

    fn cmp_reg(&self, reg: u16) -> Ordering {
        if self.end < reg {
            Ordering::Less
        } else if self.start > reg {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Register classification for one chip family.
#[derive(Debug)]
pub struct RegisterMap {
    /// Chip name, for logs.
    pub name: &'static str,
    /// Highest valid address.
    pub max_register: u16,
    /// Power-on defaults, sorted by address.
    pub defaults: &'static [RegDefault],
    /// Registers that can be read back, sorted, non-overlapping.
    pub readable: &'static [RegRange],
    /// Registers whose value changes behind software's back, sorted,
    /// non-overlapping.
    pub volatile: &'static [RegRange],
}

impl RegisterMap {
    /// Power-on value of `reg`, if the map declares one.
    pub fn default_of(&self, reg: u16) -> Option<u8> {
        self.defaults
            .binary_search_by_key(&reg, |d| d.reg)
            .ok()
            .and_then(|i| self.defaults.get(i))
            .map(|d| d.def)
    }

    /// Whether `reg` can be read from hardware.
    pub fn readable(&self, reg: u16) -> bool {
        reg <= self.max_register && in_ranges(self.readable, reg)
    }

    /// Whether `reg` must always be read from hardware.
    pub fn volatile(&self, reg: u16) -> bool {
        in_ranges(self.volatile, reg)
    }

    /// Whether `reg` exists at all: within `max_register` and either
    /// readable or carrying a default.
    pub fn exists(&self, reg: u16) -> bool {
        reg <= self.max_register && (self.default_of(reg).is_some() || in_ranges(self.readable, reg))
    }

    /// Whether all three tables are sorted with unique addresses.
    pub fn is_well_formed(&self) -> bool {
        let defaults_sorted = self
            .defaults
            .windows(2)
            .all(|w| matches!(w, [a, b] if a.reg < b.reg));
        let defaults_bounded = self.defaults.iter().all(|d| d.reg <= self.max_register);
        defaults_sorted
            && defaults_bounded
            && ranges_well_formed(self.readable, self.max_register)
            && ranges_well_formed(self.volatile, self.max_register)
    }

    /// Number of distinct addresses that exist in the map.
    pub fn register_count(&self) -> usize {
        (0..=self.max_register).filter(|&reg| self.exists(reg)).count()
    }
}

fn in_ranges(ranges: &[RegRange], reg: u16) -> bool {
    ranges.binary_search_by(|r| r.cmp_reg(reg)).is_ok()
}

fn ranges_well_formed(ranges: &[RegRange], max: u16) -> bool {
    ranges.iter().all(|r| r.start <= r.end && r.end <= max)
        && ranges
            .windows(2)
            .all(|w| matches!(w, [a, b] if a.end < b.start))
}
