//! Hardware abstraction layer for smart-amplifier codec drivers
//!
//! This crate provides the transport seam and the small domain types shared
//! by the codec configuration engine, enabling development and testing
//! without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Machine driver / board support (external)
//!         ↓
//! smart-amp (format negotiation, TDM, power routing, reset/cache sync)
//!         ↓
//! Platform HAL (this crate - RegisterBus, newtypes, mocks)
//!         ↓
//! embedded-hal I²C / GPIO / delay implementations
//! ```
//!
//! # Features
//!
//! - `std`: Enable the [`mocks`] module outside of `cfg(test)`
//! - `defmt`: Enable defmt::Format derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{I2cAddr, I2cRegisterBus, RegisterBus};
//!
//! fn revision<I: embedded_hal::i2c::I2c>(i2c: I) -> Result<u8, I::Error> {
//!     let mut bus = I2cRegisterBus::new(i2c, I2cAddr::new(0x38));
//!     bus.read_reg(0x21FF)
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
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod audio_types;
pub mod bus;
#[cfg(any(test, feature = "std"))]
pub mod mocks;

pub use audio_types::{I2cAddr, OutOfRangeError, SlotIndex};
pub use bus::{I2cRegisterBus, RegisterBus};
