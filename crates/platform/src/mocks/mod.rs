//! Mock implementations for testing
//!
//! This module provides a simulated register file and a recording delay so
//! that register-level drivers can be exercised on the host.

#![cfg(any(test, feature = "std"))]

use std::collections::BTreeMap;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::bus::RegisterBus;

/// One transfer seen by [`MockRegisterBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    /// Register read.
    Read(u16),
    /// Register write with the value sent.
    Write(u16, u8),
}

/// Error injected by [`MockRegisterBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError {
    /// Register the failed transfer addressed.
    pub reg: u16,
}

#[derive(Debug, Clone, Copy)]
enum Fault {
    Times { skip: u32, times: u32 },
    Always,
}

impl Fault {
    /// Consume one transfer; returns whether it fails.
    fn hit(&mut self) -> bool {
        match self {
            Self::Always => true,
            Self::Times { skip, .. } if *skip > 0 => {
                *skip = skip.saturating_sub(1);
                false
            }
            Self::Times { times: 0, .. } => false,
            Self::Times { times, .. } => {
                *times = times.saturating_sub(1);
                true
            }
        }
    }
}

/// Simulated 16-bit-addressed register file.
///
/// Registers never written read back their power-on default (or 0). Writing
/// the trigger value to the reset register restores every default, the way a
/// software reset does on silicon.
#[derive(Debug, Default)]
pub struct MockRegisterBus {
    regs: BTreeMap<u16, u8>,
    defaults: BTreeMap<u16, u8>,
    log: Vec<BusOp>,
    read_faults: BTreeMap<u16, Fault>,
    write_faults: BTreeMap<u16, Fault>,
    reset_reg: Option<u16>,
}

impl MockRegisterBus {
    /// Create an empty register file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a register file holding `defaults` after power-on.
    pub fn with_defaults(defaults: impl IntoIterator<Item = (u16, u8)>) -> Self {
        let defaults: BTreeMap<u16, u8> = defaults.into_iter().collect();
        Self {
            regs: defaults.clone(),
            defaults,
            ..Self::default()
        }
    }

    /// Writing `1` to `reg` restores the power-on defaults.
    #[must_use]
    pub fn with_reset_register(mut self, reg: u16) -> Self {
        self.reset_reg = Some(reg);
        self
    }

    /// Set a register from the hardware side (not logged).
    pub fn poke(&mut self, reg: u16, value: u8) {
        self.regs.insert(reg, value);
    }

    /// Current hardware value of `reg`.
    pub fn peek(&self, reg: u16) -> u8 {
        self.regs.get(&reg).copied().unwrap_or(0)
    }

    /// Fail the next `times` reads of `reg`.
    pub fn fail_reads(&mut self, reg: u16, times: u32) {
        self.fail_reads_after(reg, 0, times);
    }

    /// Let `skip` reads of `reg` through, then fail the next `times`.
    pub fn fail_reads_after(&mut self, reg: u16, skip: u32, times: u32) {
        self.read_faults.insert(reg, Fault::Times { skip, times });
    }

    /// Fail every read of `reg` until [`clear_faults`][Self::clear_faults].
    pub fn fail_reads_always(&mut self, reg: u16) {
        self.read_faults.insert(reg, Fault::Always);
    }

    /// Fail the next `times` writes to `reg`.
    pub fn fail_writes(&mut self, reg: u16, times: u32) {
        self.write_faults.insert(reg, Fault::Times { skip: 0, times });
    }

    /// Fail every write to `reg` until [`clear_faults`][Self::clear_faults].
    pub fn fail_writes_always(&mut self, reg: u16) {
        self.write_faults.insert(reg, Fault::Always);
    }

    /// Remove all injected faults.
    pub fn clear_faults(&mut self) {
        self.read_faults.clear();
        self.write_faults.clear();
    }

    /// Drop every register back to its default, as if supply was removed.
    pub fn power_loss(&mut self) {
        self.regs = self.defaults.clone();
    }

    /// Every transfer attempted so far, failed ones included.
    pub fn ops(&self) -> &[BusOp] {
        &self.log
    }

    /// Writes attempted so far, in order.
    pub fn writes(&self) -> Vec<(u16, u8)> {
        self.log
            .iter()
            .filter_map(|op| match *op {
                BusOp::Write(reg, value) => Some((reg, value)),
                BusOp::Read(_) => None,
            })
            .collect()
    }

    /// Registers read so far, in order.
    pub fn reads(&self) -> Vec<u16> {
        self.log
            .iter()
            .filter_map(|op| match *op {
                BusOp::Read(reg) => Some(reg),
                BusOp::Write(..) => None,
            })
            .collect()
    }

    /// Number of reads of `reg` attempted so far.
    pub fn read_count(&self, reg: u16) -> usize {
        self.log.iter().filter(|op| **op == BusOp::Read(reg)).count()
    }

    /// Forget the transfer log.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

impl RegisterBus for MockRegisterBus {
    type Error = MockBusError;

    fn read_reg(&mut self, reg: u16) -> Result<u8, Self::Error> {
        self.log.push(BusOp::Read(reg));
        if self.read_faults.get_mut(&reg).is_some_and(Fault::hit) {
            return Err(MockBusError { reg });
        }
        Ok(self.peek(reg))
    }

    fn write_reg(&mut self, reg: u16, value: u8) -> Result<(), Self::Error> {
        self.log.push(BusOp::Write(reg, value));
        if self.write_faults.get_mut(&reg).is_some_and(Fault::hit) {
            return Err(MockBusError { reg });
        }
        if self.reset_reg == Some(reg) && value & 0x01 != 0 {
            self.power_loss();
        } else {
            self.regs.insert(reg, value);
        }
        Ok(())
    }
}

/// [`DelayNs`] that returns immediately and records every request.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    calls_ns: Vec<u64>,
}

impl RecordingDelay {
    /// Create a delay with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Each requested delay, in milliseconds (rounded down).
    pub fn calls_ms(&self) -> Vec<u64> {
        self.calls_ns.iter().map(|ns| ns / 1_000_000).collect()
    }

    /// Sum of all requested delays, in milliseconds (rounded down).
    pub fn total_ms(&self) -> u64 {
        self.calls_ns.iter().sum::<u64>() / 1_000_000
    }

    /// Forget the history.
    pub fn clear(&mut self) {
        self.calls_ns.clear();
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls_ns.push(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.calls_ns.push(u64::from(us).saturating_mul(1_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls_ns.push(u64::from(ms).saturating_mul(1_000_000));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unwritten_register_reads_default() {
        let mut bus = MockRegisterBus::with_defaults([(0x2090, 0x55)]);
        assert_eq!(bus.read_reg(0x2090).unwrap(), 0x55);
        assert_eq!(bus.read_reg(0x2091).unwrap(), 0x00);
    }

    #[test]
    fn reset_register_restores_defaults() {
        let mut bus = MockRegisterBus::with_defaults([(0x2090, 0x55)]).with_reset_register(0x2000);
        bus.write_reg(0x2090, 0x10).unwrap();
        bus.write_reg(0x2000, 0x01).unwrap();
        assert_eq!(bus.peek(0x2090), 0x55, "software reset must restore defaults");
    }

    #[test]
    fn counted_read_fault_expires() {
        let mut bus = MockRegisterBus::new();
        bus.fail_reads(0x21FF, 2);
        assert!(bus.read_reg(0x21FF).is_err());
        assert!(bus.read_reg(0x21FF).is_err());
        assert!(bus.read_reg(0x21FF).is_ok());
        assert_eq!(bus.read_count(0x21FF), 3);
    }

    #[test]
    fn delayed_read_fault_lets_first_reads_through() {
        let mut bus = MockRegisterBus::new();
        bus.fail_reads_after(0x21FF, 1, 1);
        assert!(bus.read_reg(0x21FF).is_ok());
        assert!(bus.read_reg(0x21FF).is_err());
        assert!(bus.read_reg(0x21FF).is_ok());
    }

    #[test]
    fn failed_write_is_logged_but_not_applied() {
        let mut bus = MockRegisterBus::new();
        bus.fail_writes_always(0x205E);
        assert_eq!(bus.write_reg(0x205E, 1), Err(MockBusError { reg: 0x205E }));
        assert_eq!(bus.peek(0x205E), 0);
        assert_eq!(bus.writes(), [(0x205E, 1)]);
    }

    #[test]
    fn recording_delay_keeps_millisecond_requests_whole() {
        let mut delay = RecordingDelay::new();
        delay.delay_ms(10);
        delay.delay_us(500);
        assert_eq!(delay.calls_ms(), [10, 0]);
        assert_eq!(delay.total_ms(), 10);
    }
}
