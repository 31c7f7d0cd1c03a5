//! Software reset and verification.
//!
//! ```text
//! Unreset ──write SW_RESET──▶ Resetting{0}
//! Resetting{n} ──sleep 10 ms, read REVISION_ID ok──▶ Verified
//! Resetting{n} ──read failed, n+1 < 3──▶ Resetting{n+1}
//! Resetting{2} ──read failed──▶ Failed
//! ```
//!
//! A failed reset is reported, not raised: the device may still be usable and
//! the caller decides through [`crate::SmartAmp::check_verified`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use platform::RegisterBus;

use crate::regmap::Regmap;

/// Revision reads before giving up.
pub const RESET_ATTEMPTS: u8 = 3;
/// Sleep before each revision read.
pub const RESET_POLL_MS: u32 = 10;
/// Value written to the software-reset register.
pub const SW_RESET_TRIGGER: u8 = 0x01;
/// Reset line held low for this long.
pub const RESET_PULSE_MS: u32 = 50;
/// Wait after releasing the reset line.
pub const RESET_RELEASE_MS: u32 = 20;

/// Registers the reset sequence touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetRegisters {
    /// SW_RESET command register.
    pub sw_reset: u16,
    /// REVISION_ID, polled to confirm the device is back.
    pub revision: u16,
}

/// Where the reset sequence stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetState {
    /// No reset issued yet.
    #[default]
    Unreset,
    /// Reset issued, `attempt` revision reads failed so far.
    Resetting {
        /// Failed reads so far.
        attempt: u8,
    },
    /// Device answered with `revision` on read number `attempts`.
    Verified {
        /// Reads issued, the last one successful.
        attempts: u8,
        /// REVISION_ID value.
        revision: u8,
    },
    /// Every read failed.
    Failed {
        /// Reads issued.
        attempts: u8,
    },
}

impl ResetState {
    /// Whether the device answered after reset.
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// Short name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unreset => "unreset",
            Self::Resetting { .. } => "resetting",
            Self::Verified { .. } => "verified",
            Self::Failed { .. } => "failed",
        }
    }

    /// Advance by one transition.
    ///
    /// `Verified` and `Failed` are terminal and return themselves.
    pub fn step<B: RegisterBus, D: DelayNs>(
        self,
        regmap: &mut Regmap<B>,
        regs: &ResetRegisters,
        delay: &mut D,
    ) -> Self {
        match self {
            Self::Unreset => {
                if regmap.write_bypassed(regs.sw_reset, SW_RESET_TRIGGER).is_err() {
                    warn!("reset: write to {:#x} failed, polling anyway", regs.sw_reset);
                }
                Self::Resetting { attempt: 0 }
            }
            Self::Resetting { attempt } if attempt >= RESET_ATTEMPTS => {
                Self::Failed { attempts: attempt }
            }
            Self::Resetting { attempt } => {
                delay.delay_ms(RESET_POLL_MS);
                let attempts = attempt.saturating_add(1);
                match regmap.read(regs.revision) {
                    Ok(revision) => Self::Verified { attempts, revision },
                    Err(_) => {
                        debug!("reset: revision read {} failed", attempts);
                        if attempts >= RESET_ATTEMPTS {
                            Self::Failed { attempts }
                        } else {
                            Self::Resetting { attempt: attempts }
                        }
                    }
                }
            }
            done => done,
        }
    }
}

/// Run the whole sequence from [`ResetState::Unreset`].
pub fn software_reset<B: RegisterBus, D: DelayNs>(
    regmap: &mut Regmap<B>,
    regs: &ResetRegisters,
    delay: &mut D,
) -> ResetState {
    let mut state = ResetState::Unreset;
    loop {
        state = state.step(regmap, regs, delay);
        match state {
            ResetState::Verified { attempts, revision } => {
                info!("reset: verified after {} reads, revision {:#x}", attempts, revision);
                return state;
            }
            ResetState::Failed { attempts } => {
                error!("reset: device silent after {} reads", attempts);
                return state;
            }
            ResetState::Unreset | ResetState::Resetting { .. } => {}
        }
    }
}

/// Pulse the reset line: low, 50 ms, high, 20 ms.
pub fn hardware_reset<P: OutputPin, D: DelayNs>(pin: &mut P, delay: &mut D) -> Result<(), P::Error> {
    pin.set_low()?;
    delay.delay_ms(RESET_PULSE_MS);
    pin.set_high()?;
    delay.delay_ms(RESET_RELEASE_MS);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use platform::mocks::{BusOp, MockRegisterBus, RecordingDelay};

    use super::*;
    use crate::regmap::{RegDefault, RegRange, RegisterMap};

    static DEFAULTS: [RegDefault; 2] = [RegDefault::new(0x2000, 0x00), RegDefault::new(0x21FF, 0x00)];
    static READABLE: [RegRange; 1] = [RegRange::single(0x21FF)];
    static VOLATILE: [RegRange; 1] = [RegRange::single(0x21FF)];
    static MAP: RegisterMap = RegisterMap {
        name: "reset-test",
        max_register: 0x21FF,
        defaults: &DEFAULTS,
        readable: &READABLE,
        volatile: &VOLATILE,
    };
    const REGS: ResetRegisters = ResetRegisters {
        sw_reset: 0x2000,
        revision: 0x21FF,
    };

    fn regmap() -> Regmap<MockRegisterBus> {
        let mut bus = MockRegisterBus::new();
        bus.poke(0x21FF, 0x41);
        Regmap::new(bus, &MAP).unwrap()
    }

    #[test]
    fn first_good_read_stops_polling() {
        let mut map = regmap();
        let mut delay = RecordingDelay::new();
        let state = software_reset(&mut map, &REGS, &mut delay);
        assert_eq!(
            state,
            ResetState::Verified {
                attempts: 1,
                revision: 0x41
            }
        );
        assert_eq!(delay.calls_ms(), [10]);
        assert_eq!(
            map.bus().ops(),
            [BusOp::Write(0x2000, 0x01), BusOp::Read(0x21FF)]
        );
    }

    #[test]
    fn third_read_succeeds() {
        let mut map = regmap();
        map.bus_mut().fail_reads(0x21FF, 2);
        let mut delay = RecordingDelay::new();
        let state = software_reset(&mut map, &REGS, &mut delay);
        assert_eq!(
            state,
            ResetState::Verified {
                attempts: 3,
                revision: 0x41
            }
        );
        assert_eq!(delay.total_ms(), 30);
    }

    #[test]
    fn gives_up_after_three_reads() {
        let mut map = regmap();
        map.bus_mut().fail_reads_always(0x21FF);
        let mut delay = RecordingDelay::new();
        let state = software_reset(&mut map, &REGS, &mut delay);
        assert_eq!(state, ResetState::Failed { attempts: 3 });
        assert_eq!(map.bus().read_count(0x21FF), 3);
        assert_eq!(delay.calls_ms(), [10, 10, 10]);
    }

    #[test]
    fn failed_reset_write_still_polls() {
        let mut map = regmap();
        map.bus_mut().fail_writes(0x2000, 1);
        let mut delay = RecordingDelay::new();
        assert!(software_reset(&mut map, &REGS, &mut delay).is_verified());
    }

    #[test]
    fn terminal_states_do_not_move() {
        let mut map = regmap();
        let mut delay = RecordingDelay::new();
        let failed = ResetState::Failed { attempts: 3 };
        assert_eq!(failed.step(&mut map, &REGS, &mut delay), failed);
        assert!(map.bus().ops().is_empty());
    }
}
