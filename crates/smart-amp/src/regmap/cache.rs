//! Sparse register cache.
//!
//! Entries are kept sorted by address in a fixed-capacity `heapless::Vec`,
//! each with a dirty flag that [`super::Regmap::sync`] consumes.

use heapless::Vec;

use super::map::RegisterMap;

/// Maximum number of cached registers per device.
///
/// The MAX98396 map exposes fewer than 200 addresses, so this never fills
/// for the built-in chips.
pub const CACHE_CAPACITY: usize = 256;

/// One cached register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CacheEntry {
    /// Register address.
    pub reg: u16,
    /// Last known value.
    pub value: u8,
    /// Value has not reached the hardware since the last reset.
    pub dirty: bool,
}

/// Returned when the cache has no room for `reg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheFull(pub u16);

/// Address-sorted register cache.
#[derive(Debug, Default)]
pub struct RegCache {
    entries: Vec<CacheEntry, CACHE_CAPACITY>,
}

impl RegCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-filled with every non-volatile default of `map`.
    pub fn from_defaults(map: &RegisterMap) -> Result<Self, CacheFull> {
        let mut cache = Self::new();
        for d in map.defaults.iter().filter(|d| !map.volatile(d.reg)) {
            cache.insert(d.reg, d.def, false)?;
        }
        Ok(cache)
    }

    /// Cached value of `reg`.
    pub fn get(&self, reg: u16) -> Option<u8> {
        self.position(reg)
            .ok()
            .and_then(|i| self.entries.get(i))
            .map(|e| e.value)
    }

    /// Store `value` for `reg`, replacing any previous entry.
    pub fn insert(&mut self, reg: u16, value: u8, dirty: bool) -> Result<(), CacheFull> {
        let entry = CacheEntry { reg, value, dirty };
        match self.position(reg) {
            Ok(i) => {
                if let Some(slot) = self.entries.get_mut(i) {
                    *slot = entry;
                }
                Ok(())
            }
            Err(i) => self.entries.insert(i, entry).map_err(|_| CacheFull(reg)),
        }
    }

    /// Flag every entry as not yet on the hardware.
    pub fn mark_all_dirty(&mut self) {
        for e in &mut self.entries {
            e.dirty = true;
        }
    }

    /// Number of dirty entries.
    pub fn dirty_count(&self) -> usize {
        self.entries.iter().filter(|e| e.dirty).count()
    }

    /// All entries, sorted by address.
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    pub(super) fn entries_mut(&mut self) -> &mut [CacheEntry] {
        &mut self.entries
    }

    /// Number of cached registers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, reg: u16) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&reg, |e| e.reg)
    }
}
