//! Register access layer.
//!
//! [`Regmap`] sits between every engine component and the [`RegisterBus`]:
//!
//! - volatile registers always go to the bus and are never cached;
//! - other registers are served from the cache once known, and cached on every
//!   successful write;
//! - in cache-only mode (device suspended) writes land in the cache as dirty
//!   entries and [`Regmap::sync`] replays them after resume.
//!
//! Nothing here retries. A transport failure comes back as [`Error::Bus`].

mod cache;
mod map;

pub use cache::{CacheEntry, CacheFull, RegCache, CACHE_CAPACITY};
pub use map::{RegDefault, RegRange, RegisterMap};

use platform::RegisterBus;

use crate::error::Error;

/// Cached register access for one device.
pub struct Regmap<B> {
    bus: B,
    map: &'static RegisterMap,
    cache: RegCache,
    cache_only: bool,
}

impl<B: RegisterBus> Regmap<B> {
    /// Wrap `bus`, pre-filling the cache with `map`'s non-volatile defaults.
    pub fn new(bus: B, map: &'static RegisterMap) -> Result<Self, Error<B::Error>> {
        let cache = RegCache::from_defaults(map).map_err(|CacheFull(reg)| Error::CacheFull(reg))?;
        Ok(Self {
            bus,
            map,
            cache,
            cache_only: false,
        })
    }

    /// Register map this instance classifies against.
    pub fn map(&self) -> &'static RegisterMap {
        self.map
    }

    /// Whether `reg` can be read from hardware.
    pub fn readable(&self, reg: u16) -> bool {
        self.map.readable(reg)
    }

    /// Whether `reg` bypasses the cache.
    pub fn volatile(&self, reg: u16) -> bool {
        self.map.volatile(reg)
    }

    /// Read `reg`.
    pub fn read(&mut self, reg: u16) -> Result<u8, Error<B::Error>> {
        self.check(reg)?;

        if self.map.volatile(reg) {
            if self.cache_only {
                return Err(Error::CacheOnly(reg));
            }
            return self.bus.read_reg(reg).map_err(Error::Bus);
        }

        if let Some(value) = self.cache.get(reg) {
            return Ok(value);
        }
        if self.cache_only {
            return Err(Error::CacheOnly(reg));
        }
        if !self.map.readable(reg) {
            return Err(Error::InvalidRegister(reg));
        }

        let value = self.bus.read_reg(reg).map_err(Error::Bus)?;
        self.store(reg, value, false)?;
        Ok(value)
    }

    /// Write `value` to `reg`.
    pub fn write(&mut self, reg: u16, value: u8) -> Result<(), Error<B::Error>> {
        self.check(reg)?;
        let volatile = self.map.volatile(reg);

        if self.cache_only {
            if volatile {
                debug!("{}: dropping volatile write {:#x} while suspended", self.map.name, reg);
                return Ok(());
            }
            return self.store(reg, value, true);
        }

        trace!("{}: write {:#x} = {:#x}", self.map.name, reg, value);
        self.bus.write_reg(reg, value).map_err(Error::Bus)?;
        if !volatile {
            self.store(reg, value, false)?;
        }
        Ok(())
    }

    /// Read-modify-write of the bits in `mask`.
    ///
    /// Returns whether the register value changed. Nothing is written when it
    /// did not.
    pub fn update_bits(&mut self, reg: u16, mask: u8, value: u8) -> Result<bool, Error<B::Error>> {
        let old = self.read(reg)?;
        let new = (old & !mask) | (value & mask);
        if new == old {
            return Ok(false);
        }
        self.write(reg, new)?;
        Ok(true)
    }

    /// Write straight to the bus without caching.
    ///
    /// For command registers such as a software reset, which must never be
    /// replayed by [`sync`][Self::sync].
    pub fn write_bypassed(&mut self, reg: u16, value: u8) -> Result<(), Error<B::Error>> {
        self.check(reg)?;
        if self.cache_only {
            return Err(Error::CacheOnly(reg));
        }
        self.bus.write_reg(reg, value).map_err(Error::Bus)
    }

    /// Enter or leave cache-only mode.
    pub fn set_cache_only(&mut self, enable: bool) {
        debug!("{}: cache-only {}", self.map.name, enable);
        self.cache_only = enable;
    }

    /// Whether the bus is currently off-limits.
    pub fn is_cache_only(&self) -> bool {
        self.cache_only
    }

    /// Flag every cached value as needing replay.
    pub fn mark_dirty(&mut self) {
        self.cache.mark_all_dirty();
    }

    /// Replay dirty cache entries to the hardware.
    ///
    /// Entries equal to the power-on default are skipped since a freshly
    /// reset device already holds them. Volatile registers never reach the
    /// cache and so are never replayed. Stops at the first bus error; entries
    /// not yet written stay dirty. Returns the number of writes issued.
    pub fn sync(&mut self) -> Result<usize, Error<B::Error>> {
        if self.cache_only {
            warn!("{}: sync requested while cache-only, skipped", self.map.name);
            return Ok(0);
        }

        let map = self.map;
        let mut written = 0usize;
        for entry in self.cache.entries_mut().iter_mut().filter(|e| e.dirty) {
            if !map.volatile(entry.reg) && map.default_of(entry.reg) != Some(entry.value) {
                self.bus
                    .write_reg(entry.reg, entry.value)
                    .map_err(Error::Bus)?;
                written = written.saturating_add(1);
            }
            entry.dirty = false;
        }
        debug!("{}: sync wrote {} registers", map.name, written);
        Ok(written)
    }

    /// Cached value of `reg`, without touching the bus.
    pub fn cached(&self, reg: u16) -> Option<u8> {
        self.cache.get(reg)
    }

    /// The register cache.
    pub fn cache(&self) -> &RegCache {
        &self.cache
    }

    /// Borrow the bus.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutably borrow the bus.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give the bus back, dropping the cache.
    pub fn release(self) -> B {
        self.bus
    }

    fn check(&self, reg: u16) -> Result<(), Error<B::Error>> {
        if self.map.exists(reg) {
            Ok(())
        } else {
            Err(Error::InvalidRegister(reg))
        }
    }

    fn store(&mut self, reg: u16, value: u8, dirty: bool) -> Result<(), Error<B::Error>> {
        self.cache
            .insert(reg, value, dirty)
            .map_err(|CacheFull(reg)| Error::CacheFull(reg))
    }
}
