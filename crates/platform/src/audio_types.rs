//! Domain newtypes for codec control-bus configuration.
//!
//! These zero-cost wrappers keep raw integers from leaking into register
//! writes unchecked:
//! - `SlotIndex`: TDM slot number, 0–15 (one nibble in the slot registers)
//! - `I2cAddr`: 7-bit I²C address outside the reserved ranges

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("value {value} outside {min}..={max}")]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

// ── SlotIndex ────────────────────────────────────────────────────────────────

/// A TDM slot position, 0–15.
///
/// The monitor-slot registers hold the slot number in their low nibble, so
/// anything above 15 cannot be represented on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// Highest addressable slot.
    pub const MAX: u8 = 15;

    /// Create a `SlotIndex`, returning an error if `slot > 15`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `slot > 15`.
    pub fn try_new(slot: u8) -> Result<Self, OutOfRangeError> {
        if slot > Self::MAX {
            Err(OutOfRangeError {
                value: u32::from(slot),
                min: 0,
                max: u32::from(Self::MAX),
            })
        } else {
            Ok(Self(slot))
        }
    }

    /// Keep only the low nibble of a raw property value.
    ///
    /// Firmware tables store slot numbers as 32-bit cells; the hardware
    /// silently ignores the upper bits, and so does this constructor.
    #[must_use]
    pub fn from_masked(raw: u32) -> Self {
        Self((raw & 0x0F) as u8)
    }

    /// Return the slot number (0–15).
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Bit for this slot within a 16-bit slot mask.
    #[must_use]
    pub fn mask(self) -> u16 {
        1u16.wrapping_shl(u32::from(self.0))
    }
}

// ── I2cAddr ──────────────────────────────────────────────────────────────────

/// I2C 7-bit address.
///
/// ## Reserved I2C addresses (I2C specification):
/// - 0x00–0x07: reserved (general call, CBUS, etc.)
/// - 0x78–0x7F: reserved (10-bit address prefix, device ID, etc.)
///
/// ## Usage:
/// ```rust
/// use platform::audio_types::I2cAddr;
///
/// // MAX98396 with ADDR strapped to GND
/// let amp = I2cAddr::new(0x38);
/// assert_eq!(amp.get(), 0x38);
/// assert!(I2cAddr::try_new(0x7C).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct I2cAddr(u8);

impl I2cAddr {
    /// Create an I2C address without checking reserved ranges.
    ///
    /// Prefer [`try_new`][Self::try_new] for addresses read from board
    /// configuration. Use this only when the address is a known strap value.
    #[must_use]
    pub fn new(addr: u8) -> Self {
        Self(addr)
    }

    /// Create an I2C address, rejecting I2C-reserved ranges.
    ///
    /// Reserved: 0x00–0x07 (general call etc.) and 0x78–0x7F (10-bit prefix).
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `addr <= 0x07` or `addr >= 0x78`.
    pub fn try_new(addr: u8) -> Result<Self, OutOfRangeError> {
        if addr <= 0x07 || addr >= 0x78 {
            Err(OutOfRangeError {
                value: u32::from(addr),
                min: 0x08,
                max: 0x77,
            })
        } else {
            Ok(Self(addr))
        }
    }

    /// Return the 7-bit I2C address.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}
