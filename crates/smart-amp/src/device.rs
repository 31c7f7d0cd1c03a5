//! Per-device engine context.
//!
//! [`SmartAmp`] owns one amplifier: its register map and cache, the power
//! graph state and the negotiated configuration. Every runtime entry point
//! takes `&mut self`, so calls into one device are serialized by the borrow
//! checker; devices share nothing.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::Vec;
use platform::RegisterBus;

use crate::chip::{Chip, ChipFamily, PCM_RX_EN_BIT};
use crate::config::AmpConfig;
use crate::controls::{self, ControlKind};
use crate::dapm::{PowerDirection, PowerEvent, PowerGraph, Transition, WidgetHook, MAX_ROUTES};
use crate::error::Error;
use crate::pcm::{self, ChannelSize, ClockInversion, FormatKind, FormatPlan, PcmParams};
use crate::regmap::Regmap;
use crate::reset::{self, ResetState};
use crate::tdm::{self, TdmSlots};

/// Negotiated state of one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
    /// Last programmed sample-rate code.
    pub rate_code: Option<u8>,
    /// Last programmed channel size.
    pub ch_size: Option<ChannelSize>,
    /// A TDM slot layout is in force.
    pub tdm_mode: bool,
    /// Outcome of the most recent reset.
    pub reset: ResetState,
}

/// One attached amplifier.
pub struct SmartAmp<B, D> {
    chip: &'static Chip,
    regmap: Regmap<B>,
    delay: D,
    graph: PowerGraph,
    config: AmpConfig,
    state: DeviceState,
}

impl<B: RegisterBus, D: DelayNs> SmartAmp<B, D> {
    /// Bring up a device of `family` on `bus`.
    ///
    /// Reads the revision ID (a failure means nothing answers and aborts
    /// attach), resets the device, then runs the chip's init sequence. A
    /// reset that never verifies does not abort; see
    /// [`check_verified`][Self::check_verified].
    pub fn attach(bus: B, delay: D, family: ChipFamily, config: AmpConfig) -> Result<Self, Error<B::Error>> {
        let chip = family.chip();
        let regmap = Regmap::new(bus, chip.map)?;
        let graph = PowerGraph::new(chip.widgets, chip.routes).map_err(|_| Error::UnknownNode)?;
        let mut amp = Self {
            chip,
            regmap,
            delay,
            graph,
            config,
            state: DeviceState::default(),
        };

        let revision = amp.regmap.read(chip.reset.revision)?;
        info!("{}: found, revision {:#x}", family.as_str(), revision);

        amp.state.reset = reset::software_reset(&mut amp.regmap, &chip.reset, &mut amp.delay);
        amp.settle();
        chip.initialise(&mut amp.regmap, &amp.config)?;
        info!(
            "{}: attached, vmon slot {}, imon slot {}",
            family.as_str(),
            amp.config.vmon_slot.get(),
            amp.config.imon_slot.get()
        );
        Ok(amp)
    }

    /// Pulse `reset_line`, then [`attach`][Self::attach].
    pub fn attach_with_reset<P: OutputPin>(
        bus: B,
        mut delay: D,
        family: ChipFamily,
        config: AmpConfig,
        reset_line: &mut P,
    ) -> Result<Self, Error<B::Error>> {
        reset::hardware_reset(reset_line, &mut delay).map_err(|_| Error::Gpio)?;
        Self::attach(bus, delay, family, config)
    }

    // ── Format negotiation ──────────────────────────────────────────────

    /// Program interface framing and bit-clock polarity.
    pub fn set_dai_format(&mut self, kind: FormatKind, inversion: ClockInversion) -> Result<(), Error<B::Error>> {
        pcm::apply_dai_format(&mut self.regmap, &self.chip.pcm, kind, inversion)?;
        debug!("{}: dai format {}", self.name(), kind.as_str());
        Ok(())
    }

    /// Validate and program stream parameters.
    ///
    /// Nothing is written unless all of width, rate and (outside TDM mode)
    /// BCLK ratio are supported.
    pub fn negotiate_format(&mut self, params: PcmParams, kind: FormatKind) -> Result<FormatPlan, Error<B::Error>> {
        let plan = pcm::plan_format(
            params,
            kind,
            self.chip.caps,
            self.state.tdm_mode,
            self.config.interleave_mode,
        )
        .map_err(|err| {
            warn!(
                "{}: rejected {} Hz, {} bits, {} channels",
                self.name(),
                params.rate,
                params.width,
                params.channels
            );
            err
        })?;

        pcm::apply_format(&mut self.regmap, &self.chip.pcm, &plan)?;
        self.state.rate_code = Some(plan.rate_code);
        self.state.ch_size = Some(plan.ch_size);
        debug!(
            "{}: {} Hz as code {:#x}, {} bits",
            self.name(),
            params.rate,
            plan.rate_code,
            plan.ch_size.bits()
        );
        Ok(plan)
    }

    // ── TDM ─────────────────────────────────────────────────────────────

    /// Apply a slot layout; [`TdmSlots::DISABLED`] leaves TDM mode.
    pub fn configure_tdm(&mut self, slots: TdmSlots) -> Result<(), Error<B::Error>> {
        self.state.tdm_mode = !slots.is_disabled();
        match tdm::plan_tdm(slots)? {
            None => {
                debug!("{}: tdm off", self.name());
            }
            Some(plan) => {
                tdm::apply_tdm(&mut self.regmap, &self.chip.tdm, &plan)?;
                debug!(
                    "{}: tdm {} x {} bits, tx {:#x}, rx {:#x}",
                    self.name(),
                    slots.slots,
                    slots.slot_width,
                    slots.tx_mask,
                    slots.rx_mask
                );
            }
        }
        Ok(())
    }

    // ── Power routing ───────────────────────────────────────────────────

    /// Activate or deactivate the widget called `node`.
    pub fn power_event(&mut self, node: &str, direction: PowerDirection) -> Result<(), Error<B::Error>> {
        let index = self.graph.find(node).ok_or(Error::UnknownNode)?;
        self.graph.set_active(index, direction.is_up());
        self.update_power()
    }

    /// Start or stop every widget bound to `stream`.
    pub fn stream_event(&mut self, stream: &str, direction: PowerDirection) -> Result<(), Error<B::Error>> {
        if self.graph.set_stream_active(stream, direction.is_up()) == 0 {
            return Err(Error::UnknownNode);
        }
        self.update_power()
    }

    /// Whether the widget called `node` is powered.
    pub fn is_powered(&self, node: &str) -> bool {
        self.graph.is_powered_by_name(node)
    }

    fn update_power(&mut self) -> Result<(), Error<B::Error>> {
        if self.regmap.is_cache_only() {
            debug!("{}: power update deferred until resume", self.name());
            return Ok(());
        }
        let connected = self.route_states()?;
        for transition in self.graph.plan(&connected) {
            self.transition(transition)?;
        }
        Ok(())
    }

    /// Connection state of every route under the current control values.
    fn route_states(&mut self) -> Result<Vec<bool, MAX_ROUTES>, Error<B::Error>> {
        let mut states = Vec::new();
        for route in self.graph.routes() {
            let connected = match route.control {
                None => true,
                Some(setting) => {
                    let control = self
                        .graph
                        .find(route.sink)
                        .and_then(|i| self.graph.widget(i))
                        .and_then(|w| w.control);
                    match control {
                        None => true,
                        Some(name) => {
                            let ctl = controls::find(self.chip.controls, name).ok_or(Error::UnknownControl)?;
                            let value = controls::get(&mut self.regmap, ctl)?;
                            match ctl.kind {
                                ControlKind::Enum(_) => ctl.item(value) == Some(setting),
                                ControlKind::Switch | ControlKind::Volume(_) => value != 0,
                            }
                        }
                    }
                }
            };
            states.push(connected).map_err(|_| Error::UnknownNode)?;
        }
        Ok(states)
    }

    fn transition(&mut self, transition: Transition) -> Result<(), Error<B::Error>> {
        let widget = self.graph.widget(transition.widget).ok_or(Error::UnknownNode)?;
        let (before, after) = transition.direction.events();
        debug!("{}: {} {}", self.name(), widget.name, before.as_str());

        self.run_hook(widget.hook, before)?;
        if let Some(bit) = widget.power {
            let value = if transition.direction.is_up() { bit.mask() } else { 0 };
            self.regmap.update_bits(bit.reg, bit.mask(), value)?;
        }
        self.graph.commit(transition);
        self.run_hook(widget.hook, after)
    }

    fn run_hook(&mut self, hook: Option<WidgetHook>, event: PowerEvent) -> Result<(), Error<B::Error>> {
        match (hook, event) {
            (Some(WidgetHook::AmpEnable), PowerEvent::PostPowerUp) => self.amp_on(),
            (Some(WidgetHook::AmpEnable), PowerEvent::PostPowerDown) => self.amp_off(),
            _ => Ok(()),
        }
    }

    fn amp_on(&mut self) -> Result<(), Error<B::Error>> {
        let regs = self.chip.amp;
        self.regmap.update_bits(regs.rx_enable, PCM_RX_EN_BIT, PCM_RX_EN_BIT)?;
        self.regmap.write(regs.global_enable, 0x01)?;
        self.settle();
        info!("{}: amplifier on", self.name());
        Ok(())
    }

    /// Both writes are attempted and TDM mode is always left; the first bus
    /// error is reported afterwards.
    fn amp_off(&mut self) -> Result<(), Error<B::Error>> {
        let regs = self.chip.amp;
        let global = self.regmap.write(regs.global_enable, 0x00);
        let rx = self.regmap.update_bits(regs.rx_enable, PCM_RX_EN_BIT, 0).map(drop);
        self.settle();
        self.state.tdm_mode = false;
        info!("{}: amplifier off", self.name());
        global.and(rx)
    }

    // ── Controls ────────────────────────────────────────────────────────

    /// Current value of the control called `name`.
    pub fn get_control(&mut self, name: &str) -> Result<u32, Error<B::Error>> {
        let ctl = controls::find(self.chip.controls, name).ok_or(Error::UnknownControl)?;
        controls::get(&mut self.regmap, ctl)
    }

    /// Set the control called `name`. Returns whether the register changed.
    ///
    /// Routing controls re-evaluate the power graph when they change.
    pub fn put_control(&mut self, name: &str, value: u32) -> Result<bool, Error<B::Error>> {
        let ctl = controls::find(self.chip.controls, name).ok_or(Error::UnknownControl)?;
        let changed = controls::put(&mut self.regmap, ctl, value)?;
        if changed && ctl.dapm {
            self.update_power()?;
        }
        Ok(changed)
    }

    // ── Power state ─────────────────────────────────────────────────────

    /// Power the graph down and freeze register access before the supply
    /// is removed.
    ///
    /// Every powered widget goes down through its hooks, so the amplifier is
    /// disabled and TDM mode is left. Active widgets stay active and come
    /// back up in [`resume`][Self::resume]. Later writes are kept in the
    /// cache and replayed on resume. Cache-only mode is entered even when a
    /// power-down write fails; the first such error is returned.
    pub fn suspend(&mut self) -> Result<(), Error<B::Error>> {
        let powered_down = self.power_down_all();
        self.regmap.set_cache_only(true);
        self.regmap.mark_dirty();
        info!("{}: suspended", self.name());
        powered_down
    }

    /// Reset the device, restore every cached register, then power the
    /// active widgets back up.
    ///
    /// An unverified reset is logged and the sync still runs.
    pub fn resume(&mut self) -> Result<(), Error<B::Error>> {
        self.regmap.set_cache_only(false);
        self.state.reset = reset::software_reset(&mut self.regmap, &self.chip.reset, &mut self.delay);
        let written = self.regmap.sync()?;
        info!("{}: resumed, {} registers restored", self.name(), written);
        self.update_power()
    }

    fn power_down_all(&mut self) -> Result<(), Error<B::Error>> {
        for transition in self.graph.plan_off() {
            self.transition(transition)?;
        }
        Ok(())
    }

    /// `Ok` if the last reset was verified.
    pub fn check_verified(&self) -> Result<(), Error<B::Error>> {
        match self.state.reset {
            ResetState::Verified { .. } => Ok(()),
            ResetState::Failed { attempts } => Err(Error::ResetVerificationFailed { attempts }),
            ResetState::Unreset | ResetState::Resetting { .. } => {
                Err(Error::ResetVerificationFailed { attempts: 0 })
            }
        }
    }

    /// Detach, returning the bus and delay.
    pub fn release(self) -> (B, D) {
        (self.regmap.release(), self.delay)
    }

    fn settle(&mut self) {
        if self.chip.settle_ms > 0 {
            self.delay.delay_ms(self.chip.settle_ms);
        }
    }
}

impl<B, D> SmartAmp<B, D> {
    /// Chip descriptor.
    pub fn chip(&self) -> &'static Chip {
        self.chip
    }

    /// Chip family.
    pub fn family(&self) -> ChipFamily {
        self.chip.family
    }

    /// Attach-time configuration.
    pub fn config(&self) -> &AmpConfig {
        &self.config
    }

    /// Negotiated state.
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Whether a TDM layout is in force.
    pub fn tdm_mode(&self) -> bool {
        self.state.tdm_mode
    }

    /// Register map and cache.
    pub fn regmap(&self) -> &Regmap<B> {
        &self.regmap
    }

    /// Mutable register map, for registers the engine does not model.
    pub fn regmap_mut(&mut self) -> &mut Regmap<B> {
        &mut self.regmap
    }

    /// Power graph state.
    pub fn graph(&self) -> &PowerGraph {
        &self.graph
    }

    /// Borrow the delay source.
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Mutably borrow the delay source.
    pub fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }

    fn name(&self) -> &'static str {
        self.chip.family.as_str()
    }
}
