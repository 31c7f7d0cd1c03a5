//! Register configuration and power-routing engine for MAX98396/MAX98520
//! smart amplifiers
//!
//! The engine turns audio-framework requests into register traffic:
//!
//! ```text
//! hw_params / set_tdm_slot / power events / suspend-resume
//!         ↓
//! SmartAmp (device context)
//!    ├── pcm    format negotiation, BCLK ratio selection
//!    ├── tdm    slot layout, Hi-Z masks
//!    ├── dapm   power graph, ordered widget transitions
//!    └── reset  software reset, revision polling
//!         ↓
//! regmap (classification, cache, cache-only mode, sync)
//!         ↓
//! platform::RegisterBus (16-bit address, 8-bit value)
//! ```
//!
//! Chip differences live in static descriptors under [`chip`].
//!
//! # Features
//!
//! - `std`: re-export the platform mocks for downstream host tests
//! - `defmt`: log through defmt and derive `defmt::Format`
//! - `tracing`: log through tracing
//!
//! # Example
//!
//! ```no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::i2c::I2c;
//! use platform::{I2cAddr, I2cRegisterBus};
//! use smart_amp::{AmpConfig, ChipFamily, FormatKind, PcmParams, SmartAmp};
//!
//! fn bring_up<I: I2c, D: DelayNs>(i2c: I, delay: D) -> Result<(), smart_amp::Error<I::Error>> {
//!     let bus = I2cRegisterBus::new(i2c, I2cAddr::new(0x38));
//!     let mut amp = SmartAmp::attach(bus, delay, ChipFamily::Max98396, AmpConfig::default())?;
//!     amp.negotiate_format(
//!         PcmParams { rate: 48_000, width: 32, channels: 2 },
//!         FormatKind::I2s,
//!     )?;
//!     amp.stream_event("HiFi Playback", smart_amp::PowerDirection::Up)
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
mod fmt;

pub mod chip;
pub mod config;
pub mod controls;
pub mod dapm;
pub mod device;
pub mod error;
pub mod pcm;
pub mod regmap;
pub mod reset;
pub mod tdm;

pub use chip::{Chip, ChipFamily};
pub use config::AmpConfig;
pub use controls::{ControlDesc, ControlKind, TlvScale};
pub use dapm::{PowerDirection, PowerEvent};
pub use device::{DeviceState, SmartAmp};
pub use error::{Error, FormatError};
pub use pcm::{ClockInversion, FormatKind, FormatPlan, PcmParams};
pub use regmap::{RegisterMap, Regmap};
pub use reset::ResetState;
pub use tdm::TdmSlots;

#[cfg(feature = "std")]
pub use platform::mocks;
