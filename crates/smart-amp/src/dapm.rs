//! Power-routing graph.
//!
//! Widgets are the amplifier's internal blocks; routes are the legal signal
//! paths between them, `(sink, control, source)`. A route with a control is
//! only connected while that control selects it (mux) or is on (switch).
//!
//! A widget becomes *active* through [`PowerGraph::set_active`] (a direct
//! power event) or [`PowerGraph::set_stream_active`] (stream start/stop).
//! Every widget on a connected path into or out of an active widget must be
//! powered. [`PowerGraph::plan`] diffs that set against what is powered now
//! and returns the transitions: power-downs sink-first, then power-ups
//! source-first.
//!
//! The graph only decides. Register writes and hooks are run by the caller,
//! which reports each completed transition back through
//! [`PowerGraph::commit`].

use heapless::Vec;

/// Largest widget table a graph accepts.
pub const MAX_WIDGETS: usize = 16;
/// Largest route table a graph accepts.
pub const MAX_ROUTES: usize = 16;

// ── Static description ───────────────────────────────────────────────────────

/// What a widget is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WidgetKind {
    /// Playback DAC stage.
    Dac,
    /// Enumerated path selector.
    Mux,
    /// On/off path gate.
    Switch,
    /// Output endpoint (speaker pins).
    Output,
    /// Capture interface output.
    AifOut,
    /// Internal signal source.
    SigGen,
}

/// Register bit that powers a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PowerBit {
    /// Register address.
    pub reg: u16,
    /// Bit position.
    pub shift: u8,
}

impl PowerBit {
    /// Single-bit mask.
    pub fn mask(self) -> u8 {
        1u8.wrapping_shl(u32::from(self.shift))
    }
}

/// Side effect attached to a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WidgetHook {
    /// Amplifier enable: PCM receive path and global enable.
    AmpEnable,
}

/// One widget in a chip's graph.
#[derive(Debug, Clone, Copy)]
pub struct WidgetDesc {
    /// Unique name.
    pub name: &'static str,
    /// Widget kind.
    pub kind: WidgetKind,
    /// Stream that activates this widget.
    pub stream: Option<&'static str>,
    /// Power bit, if the block has one.
    pub power: Option<PowerBit>,
    /// Hook run around power transitions.
    pub hook: Option<WidgetHook>,
    /// Control gating the widget's input routes (mux and switch widgets).
    pub control: Option<&'static str>,
}

impl WidgetDesc {
    /// Widget without stream, power bit, hook or control.
    pub const fn new(name: &'static str, kind: WidgetKind) -> Self {
        Self {
            name,
            kind,
            stream: None,
            power: None,
            hook: None,
            control: None,
        }
    }

    /// Bind to `stream`.
    #[must_use]
    pub const fn stream(mut self, stream: &'static str) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Power through bit `shift` of `reg`.
    #[must_use]
    pub const fn power(mut self, reg: u16, shift: u8) -> Self {
        self.power = Some(PowerBit { reg, shift });
        self
    }

    /// Attach `hook`.
    #[must_use]
    pub const fn hook(mut self, hook: WidgetHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Gate inputs with the control named `control`.
    #[must_use]
    pub const fn control(mut self, control: &'static str) -> Self {
        self.control = Some(control);
        self
    }
}

/// Directed path `source → sink`, optionally through a control setting.
#[derive(Debug, Clone, Copy)]
pub struct RouteDesc {
    /// Downstream widget.
    pub sink: &'static str,
    /// Mux item or switch name the path depends on.
    pub control: Option<&'static str>,
    /// Upstream widget.
    pub source: &'static str,
}

impl RouteDesc {
    /// Route `source → sink` gated by `control`.
    pub const fn new(sink: &'static str, control: Option<&'static str>, source: &'static str) -> Self {
        Self {
            sink,
            control,
            source,
        }
    }
}

// ── Events ───────────────────────────────────────────────────────────────────

/// Event delivered to a widget hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerEvent {
    /// Before the power bit is set.
    PrePowerUp,
    /// After the power bit is set.
    PostPowerUp,
    /// Before the power bit is cleared.
    PrePowerDown,
    /// After the power bit is cleared.
    PostPowerDown,
}

impl PowerEvent {
    /// Short name for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrePowerUp => "PRE_PMU",
            Self::PostPowerUp => "POST_PMU",
            Self::PrePowerDown => "PRE_PMD",
            Self::PostPowerDown => "POST_PMD",
        }
    }
}

/// Direction of a power transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerDirection {
    /// Power on.
    Up,
    /// Power off.
    Down,
}

impl PowerDirection {
    /// Events around the transition, as `(before, after)`.
    pub fn events(self) -> (PowerEvent, PowerEvent) {
        match self {
            Self::Up => (PowerEvent::PrePowerUp, PowerEvent::PostPowerUp),
            Self::Down => (PowerEvent::PrePowerDown, PowerEvent::PostPowerDown),
        }
    }

    /// Whether this direction powers on.
    pub fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }
}

/// One widget changing power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// Index into the widget table.
    pub widget: usize,
    /// New state.
    pub direction: PowerDirection,
}

/// Ordered transitions returned by [`PowerGraph::plan`].
pub type Transitions = Vec<Transition, MAX_WIDGETS>;

/// Graph tables that cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GraphError {
    /// More than [`MAX_WIDGETS`] widgets.
    TooManyWidgets,
    /// More than [`MAX_ROUTES`] routes.
    TooManyRoutes,
    /// A route names a widget that does not exist.
    UnknownEndpoint,
}

// ── Runtime graph ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    active: bool,
    powered: bool,
}

/// Per-device power state over a static widget/route table.
#[derive(Debug)]
pub struct PowerGraph {
    widgets: &'static [WidgetDesc],
    routes: &'static [RouteDesc],
    nodes: Vec<NodeState, MAX_WIDGETS>,
    /// `(source, sink)` widget indices per route.
    ends: Vec<(u8, u8), MAX_ROUTES>,
    /// Widget indices, sources before sinks.
    order: Vec<u8, MAX_WIDGETS>,
}

impl PowerGraph {
    /// Load a graph with every widget off.
    pub fn new(
        widgets: &'static [WidgetDesc],
        routes: &'static [RouteDesc],
    ) -> Result<Self, GraphError> {
        if widgets.len() > MAX_WIDGETS {
            return Err(GraphError::TooManyWidgets);
        }

        let mut nodes = Vec::new();
        for _ in widgets {
            nodes
                .push(NodeState::default())
                .map_err(|_| GraphError::TooManyWidgets)?;
        }

        let mut ends = Vec::new();
        for route in routes {
            let source = index_of(widgets, route.source).ok_or(GraphError::UnknownEndpoint)?;
            let sink = index_of(widgets, route.sink).ok_or(GraphError::UnknownEndpoint)?;
            ends.push((source, sink))
                .map_err(|_| GraphError::TooManyRoutes)?;
        }

        let order = topological_order(widgets.len(), &ends);
        Ok(Self {
            widgets,
            routes,
            nodes,
            ends,
            order,
        })
    }

    /// Index of the widget called `name`.
    pub fn find(&self, name: &str) -> Option<usize> {
        index_of(self.widgets, name).map(usize::from)
    }

    /// Route table.
    pub fn routes(&self) -> &'static [RouteDesc] {
        self.routes
    }

    /// Widget at `index`.
    pub fn widget(&self, index: usize) -> Option<&'static WidgetDesc> {
        self.widgets.get(index)
    }

    /// Mark one widget as (in)active.
    pub fn set_active(&mut self, index: usize, active: bool) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.active = active;
        }
    }

    /// Mark every widget bound to `stream` as (in)active. Returns how many
    /// widgets matched.
    pub fn set_stream_active(&mut self, stream: &str, active: bool) -> usize {
        let mut matched = 0usize;
        for (widget, node) in self.widgets.iter().zip(self.nodes.iter_mut()) {
            if widget.stream == Some(stream) {
                node.active = active;
                matched = matched.saturating_add(1);
            }
        }
        matched
    }

    /// Whether the widget at `index` was activated directly or by a stream.
    pub fn is_active(&self, index: usize) -> bool {
        self.nodes.get(index).is_some_and(|n| n.active)
    }

    /// Whether the widget at `index` is powered.
    pub fn is_powered(&self, index: usize) -> bool {
        self.nodes.get(index).is_some_and(|n| n.powered)
    }

    /// Whether the widget called `name` is powered.
    pub fn is_powered_by_name(&self, name: &str) -> bool {
        self.find(name).is_some_and(|i| self.is_powered(i))
    }

    /// Transitions needed to match the active set.
    ///
    /// `connected[i]` says whether route `i` currently passes signal; missing
    /// entries count as disconnected.
    pub fn plan(&self, connected: &[bool]) -> Transitions {
        let want = self.wanted(connected);
        let mut out = Transitions::new();

        for &i in self.order.iter().rev() {
            let i = usize::from(i);
            if self.is_powered(i) && !flag(&want, i) {
                let _ = out.push(Transition {
                    widget: i,
                    direction: PowerDirection::Down,
                });
            }
        }
        for &i in &self.order {
            let i = usize::from(i);
            if !self.is_powered(i) && flag(&want, i) {
                let _ = out.push(Transition {
                    widget: i,
                    direction: PowerDirection::Up,
                });
            }
        }
        out
    }

    /// Power-downs for every powered widget, sinks first. Active flags are
    /// left alone so a later [`plan`][Self::plan] restores the same set.
    pub fn plan_off(&self) -> Transitions {
        let mut out = Transitions::new();
        for &i in self.order.iter().rev() {
            let i = usize::from(i);
            if self.is_powered(i) {
                let _ = out.push(Transition {
                    widget: i,
                    direction: PowerDirection::Down,
                });
            }
        }
        out
    }

    /// Record a transition that the caller carried out.
    pub fn commit(&mut self, transition: Transition) {
        if let Some(node) = self.nodes.get_mut(transition.widget) {
            node.powered = transition.direction.is_up();
        }
    }

    fn wanted(&self, connected: &[bool]) -> [bool; MAX_WIDGETS] {
        let mut want = [false; MAX_WIDGETS];
        for (i, node) in self.nodes.iter().enumerate() {
            if node.active {
                self.walk(i, connected, true, &mut want);
                self.walk(i, connected, false, &mut want);
            }
        }
        want
    }

    /// Mark everything reachable from `start`, against (`upstream`) or along
    /// the route direction.
    fn walk(&self, start: usize, connected: &[bool], upstream: bool, want: &mut [bool; MAX_WIDGETS]) {
        let mut seen = [false; MAX_WIDGETS];
        let mut stack: Vec<usize, MAX_WIDGETS> = Vec::new();
        set_flag(&mut seen, start);
        set_flag(want, start);
        let _ = stack.push(start);

        while let Some(node) = stack.pop() {
            for (r, &(source, sink)) in self.ends.iter().enumerate() {
                if !connected.get(r).copied().unwrap_or(false) {
                    continue;
                }
                let (from, to) = if upstream {
                    (usize::from(sink), usize::from(source))
                } else {
                    (usize::from(source), usize::from(sink))
                };
                if from == node && !flag(&seen, to) {
                    set_flag(&mut seen, to);
                    set_flag(want, to);
                    let _ = stack.push(to);
                }
            }
        }
    }
}

fn index_of(widgets: &[WidgetDesc], name: &str) -> Option<u8> {
    widgets
        .iter()
        .position(|w| w.name == name)
        .and_then(|i| u8::try_from(i).ok())
}

fn flag(flags: &[bool; MAX_WIDGETS], i: usize) -> bool {
    flags.get(i).copied().unwrap_or(false)
}

fn set_flag(flags: &mut [bool; MAX_WIDGETS], i: usize) {
    if let Some(f) = flags.get_mut(i) {
        *f = true;
    }
}

/// Kahn's algorithm; widgets caught in a cycle go last, in table order.
fn topological_order(count: usize, ends: &[(u8, u8)]) -> Vec<u8, MAX_WIDGETS> {
    let mut indegree = [0usize; MAX_WIDGETS];
    for &(_, sink) in ends {
        if let Some(d) = indegree.get_mut(usize::from(sink)) {
            *d = d.saturating_add(1);
        }
    }

    let mut placed = [false; MAX_WIDGETS];
    let mut order = Vec::new();
    while let Some(next) =
        (0..count).find(|&i| !flag(&placed, i) && indegree.get(i).copied() == Some(0))
    {
        set_flag(&mut placed, next);
        if let Ok(idx) = u8::try_from(next) {
            let _ = order.push(idx);
        }
        for &(source, sink) in ends {
            if usize::from(source) == next {
                if let Some(d) = indegree.get_mut(usize::from(sink)) {
                    *d = d.saturating_sub(1);
                }
            }
        }
    }

    for i in (0..count).filter(|&i| !flag(&placed, i)) {
        if let Ok(idx) = u8::try_from(i) {
            let _ = order.push(idx);
        }
    }
    order
}
