//! Error types.

use thiserror_no_std::Error as ThisError;

/// Validation failure raised before any register is touched.
///
/// Pure planning functions in [`crate::pcm`] and [`crate::tdm`] return this;
/// it converts into the matching [`Error`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatError {
    /// Sample or slot width other than 16, 24 or 32 bits.
    #[error("unsupported sample width: {0} bits")]
    UnsupportedFormat(u32),
    /// Sample rate missing from the chip's rate table.
    #[error("unsupported sample rate: {0} Hz")]
    UnsupportedRate(u32),
    /// No BCLK selector for this many bit clocks per frame.
    #[error("no BCLK selector for {0} BCLKs per frame")]
    UnsupportedClockRatio(u32),
    /// Only normal and inverted-BCLK clocking are implemented in silicon.
    #[error("unsupported clock inversion")]
    UnsupportedInversion,
}

/// Errors returned by the configuration engine.
///
/// `E` is the transport error of the [`platform::RegisterBus`] in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Sample or slot width other than 16, 24 or 32 bits.
    #[error("unsupported sample width: {0} bits")]
    UnsupportedFormat(u32),
    /// Sample rate missing from the chip's rate table.
    #[error("unsupported sample rate: {0} Hz")]
    UnsupportedRate(u32),
    /// No BCLK selector for this many bit clocks per frame.
    #[error("no BCLK selector for {0} BCLKs per frame")]
    UnsupportedClockRatio(u32),
    /// Frame-clock inversion requested.
    #[error("unsupported clock inversion")]
    UnsupportedInversion,
    /// Address outside the chip's register map, or a write-only register
    /// that has never been written.
    #[error("invalid register {0:#06x}")]
    InvalidRegister(u16),
    /// Register needs the bus but the map is frozen for suspend.
    #[error("register {0:#06x} unavailable while cache-only")]
    CacheOnly(u16),
    /// Register cache has no room for another entry.
    #[error("register cache full at {0:#06x}")]
    CacheFull(u16),
    /// No widget or stream with this name.
    #[error("unknown power-graph node")]
    UnknownNode,
    /// No control with this name.
    #[error("unknown control")]
    UnknownControl,
    /// Control value above the control's maximum.
    #[error("control value {value} above maximum {max}")]
    ControlOutOfRange {
        /// Requested value.
        value: u32,
        /// Largest accepted value.
        max: u32,
    },
    /// Revision ID never answered after a software reset.
    ///
    /// Reported by [`crate::SmartAmp::check_verified`] only; attach and resume
    /// carry on regardless.
    #[error("reset not verified after {attempts} attempts")]
    ResetVerificationFailed {
        /// Polling attempts made.
        attempts: u8,
    },
    /// Reset line could not be driven.
    #[error("reset GPIO error")]
    Gpio,
    /// Transport failure, passed through unchanged.
    #[error("bus error: {0:?}")]
    Bus(E),
}

impl<E> From<FormatError> for Error<E> {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::UnsupportedFormat(width) => Self::UnsupportedFormat(width),
            FormatError::UnsupportedRate(rate) => Self::UnsupportedRate(rate),
            FormatError::UnsupportedClockRatio(ratio) => Self::UnsupportedClockRatio(ratio),
            FormatError::UnsupportedInversion => Self::UnsupportedInversion,
        }
    }
}
