//! Register-bus abstraction for codecs with 16-bit register addresses.
//!
//! Smart amplifiers such as the MAX98396 expose an 8-bit register file behind
//! a 16-bit address space. Every transaction on the wire is either
//!
//! ```text
//! write:  S | addr+W | reg[15:8] | reg[7:0] | value | P
//! read:   S | addr+W | reg[15:8] | reg[7:0] | Sr | addr+R | value | P
//! ```
//!
//! [`RegisterBus`] is the narrow seam between the configuration engine and the
//! transport. The engine never sees I²C directly, which keeps it testable
//! against a simulated register file (see [`crate::mocks`]).

use core::fmt::Debug;

use embedded_hal::i2c::I2c;

use crate::audio_types::I2cAddr;

/// Single-register access over a control bus.
///
/// Implementations must not retry; a failed transfer is reported once and
/// the caller decides what to do with it.
pub trait RegisterBus {
    /// Transport error, passed through uninterpreted.
    type Error: Debug;

    /// Read one 8-bit register.
    fn read_reg(&mut self, reg: u16) -> Result<u8, Self::Error>;

    /// Write one 8-bit register.
    fn write_reg(&mut self, reg: u16, value: u8) -> Result<(), Self::Error>;
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    type Error = T::Error;

    fn read_reg(&mut self, reg: u16) -> Result<u8, Self::Error> {
        T::read_reg(self, reg)
    }

    fn write_reg(&mut self, reg: u16, value: u8) -> Result<(), Self::Error> {
        T::write_reg(self, reg, value)
    }
}

/// [`RegisterBus`] over any blocking `embedded-hal` I²C bus.
///
/// Register addresses go out big-endian, one data byte per transfer.
pub struct I2cRegisterBus<I> {
    i2c: I,
    addr: I2cAddr,
}

impl<I: I2c> I2cRegisterBus<I> {
    /// Bind `i2c` to the device at `addr`.
    pub fn new(i2c: I, addr: I2cAddr) -> Self {
        Self { i2c, addr }
    }

    /// Device address this bus talks to.
    pub fn addr(&self) -> I2cAddr {
        self.addr
    }

    /// Give the I²C peripheral back.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> RegisterBus for I2cRegisterBus<I> {
    type Error = I::Error;

    fn read_reg(&mut self, reg: u16) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.addr.get(), &reg.to_be_bytes(), &mut buf)?;
        let [value] = buf;
        Ok(value)
    }

    fn write_reg(&mut self, reg: u16, value: u8) -> Result<(), Self::Error> {
        let [hi, lo] = reg.to_be_bytes();
        self.i2c.write(self.addr.get(), &[hi, lo, value])
    }
}
