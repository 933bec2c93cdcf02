//! The polling state machine engine.

use super::error::{Hook, MachineError, UsageError};
use super::hooks::{Context, StateHooks};
use crate::builder::{ConfigError, EngineConfig};
use crate::core::{
    CustomEvent, Event, StateId, TransitionHistory, TransitionRecord, TransitionTable,
};
use crate::sources::EventSource;
use chrono::Utc;
use std::convert::Infallible;

/// What happened during one evaluation cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport<C = ()> {
    /// Tick number, starting at 1
    pub tick: u64,
    /// Event the cycle resolved, `NoEvent` if no source reported one
    pub event: Event<C>,
    /// Table-driven state change, if any
    pub transition: Option<(StateId, StateId)>,
    /// State change requested through `goto_state`, if any
    pub forced: Option<(StateId, StateId)>,
    /// Current state once the cycle finished
    pub state: StateId,
}

impl<C> TickReport<C> {
    pub fn changed_state(&self) -> bool {
        self.transition.is_some() || self.forced.is_some()
    }
}

/// Event-driven finite state machine polled one tick at a time.
///
/// Each tick polls every registered source, resolves at most one event,
/// looks it up in the transition table, runs exit/entry hooks on a state
/// change and always runs the do hook of the current state.
///
/// The machine is single threaded: hooks run to completion before the next
/// source is polled. Configuration (transitions and sources) is frozen as
/// soon as the machine starts or evaluates its first tick.
///
/// # Example
///
/// ```rust
/// use std::convert::Infallible;
/// use tickfsm::core::{Event, StateId};
/// use tickfsm::engine::{StateHooks, StateMachine};
/// use tickfsm::sources::ScriptedSource;
///
/// struct Quiet;
///
/// impl StateHooks for Quiet {
///     type Error = Infallible;
/// }
///
/// let mut machine = StateMachine::new(3, Quiet).unwrap();
/// machine.add_transition(0, [Event::BTN1_PRESS], 1).unwrap();
/// machine.add_transition(1, [Event::NO_EVENT], 2).unwrap();
/// machine
///     .register_event_source(ScriptedSource::new([Event::BTN1_PRESS]))
///     .unwrap();
///
/// machine.evaluate_once().unwrap();
/// assert_eq!(machine.current_state(), StateId::new(1));
///
/// machine.evaluate_once().unwrap();
/// assert_eq!(machine.current_state(), StateId::new(2));
/// ```
pub struct StateMachine<'a, H, C = ()>
where
    C: CustomEvent,
{
    hooks: H,
    table: TransitionTable<C>,
    sources: Vec<Box<dyn EventSource<C> + 'a>>,
    current: StateId,
    initial: StateId,
    tick: u64,
    started: bool,
    frozen: bool,
    history: TransitionHistory<C>,
    config: EngineConfig,
}

impl<'a, H, C> StateMachine<'a, H, C>
where
    H: StateHooks<C>,
    C: CustomEvent,
{
    /// Machine with `state_count` states, starting in state 0.
    pub fn new(state_count: usize, hooks: H) -> Result<Self, ConfigError> {
        Self::with_initial(state_count, hooks, StateId::new(0))
    }

    pub fn with_initial(
        state_count: usize,
        hooks: H,
        initial: impl Into<StateId>,
    ) -> Result<Self, ConfigError> {
        let initial = initial.into();
        if state_count == 0 {
            return Err(ConfigError::ZeroStates);
        }
        if !initial.is_valid_for(state_count) {
            return Err(ConfigError::InitialOutOfRange {
                state: initial,
                state_count,
            });
        }
        if let Some(declared) = hooks.declared_states() {
            if declared != state_count {
                return Err(ConfigError::HookCountMismatch {
                    expected: state_count,
                    found: declared,
                });
            }
        }

        let config = EngineConfig::default();
        Ok(Self {
            hooks,
            table: TransitionTable::new(state_count),
            sources: Vec::new(),
            current: initial,
            initial,
            tick: 0,
            started: false,
            frozen: false,
            history: TransitionHistory::with_capacity(config.history_capacity),
            config,
        })
    }

    /// Replace the engine settings. Resets the transition history.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.history = TransitionHistory::with_capacity(config.history_capacity);
        self.config = config;
        self
    }

    /// Register that any of `events` in state `from` moves to `to`.
    pub fn add_transition<I>(
        &mut self,
        from: impl Into<StateId>,
        events: I,
        to: impl Into<StateId>,
    ) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = Event<C>>,
    {
        if self.frozen {
            return Err(ConfigError::AlreadyRunning);
        }
        self.table.add_transition(from.into(), events, to.into())
    }

    /// Add an input to poll each tick. When several sources report a
    /// concrete event on the same tick, the one registered first wins.
    pub fn register_event_source<S>(&mut self, source: S) -> Result<(), ConfigError>
    where
        S: EventSource<C> + 'a,
    {
        self.register_boxed_source(Box::new(source))
    }

    pub(crate) fn register_boxed_source(
        &mut self,
        source: Box<dyn EventSource<C> + 'a>,
    ) -> Result<(), ConfigError> {
        if self.frozen {
            return Err(ConfigError::AlreadyRunning);
        }
        self.sources.push(source);
        Ok(())
    }

    /// Enter the initial state: runs `on_enter(initial, NO_EVENT)` once.
    pub fn start(&mut self) -> Result<(), MachineError<H::Error>> {
        if self.started {
            return Err(UsageError::AlreadyStarted.into());
        }
        self.frozen = true;

        tracing::info!(
            state = %self.current,
            transitions = self.table.len(),
            sources = self.sources.len(),
            "starting state machine"
        );
        let state = self.current;
        self.log_entered(state);
        self.dispatch(Hook::Enter, state, |hooks, ctx| {
            hooks.on_enter(ctx, state, &Event::NoEvent)
        })?;
        self.started = true;
        Ok(())
    }

    /// Run one evaluation cycle.
    pub fn evaluate_once(&mut self) -> Result<TickReport<C>, MachineError<H::Error>> {
        self.frozen = true;
        self.tick += 1;

        let event = self.poll_sources();
        tracing::debug!(tick = self.tick, state = %self.current, event = %event, "resolved event");

        let mut transition = None;
        if let Some(to) = self.table.lookup(self.current, &event) {
            if to != self.current {
                let from = self.current;
                self.change_state(to, &event)?;
                transition = Some((from, to));
            }
        }

        let state = self.current;
        let requested = self.dispatch(Hook::Do, state, |hooks, ctx| hooks.on_do(ctx, state))?;

        let mut forced = None;
        if let Some(target) = requested {
            tracing::debug!(tick = self.tick, from = %state, to = %target, "forced transition");
            self.change_state(target, &Event::Forced)?;
            forced = Some((state, target));
        }

        Ok(TickReport {
            tick: self.tick,
            event,
            transition,
            forced,
            state: self.current,
        })
    }

    /// Start if needed, then evaluate ticks forever.
    ///
    /// Only returns on error; stopping a healthy machine is up to whoever
    /// owns the process.
    pub fn run(&mut self) -> Result<Infallible, MachineError<H::Error>> {
        if !self.started {
            self.start()?;
        }
        loop {
            self.evaluate_once()?;
            self.pace();
        }
    }

    /// Like [`run`](Self::run), but asks `stop` after every tick whether to
    /// return. Returns the number of ticks evaluated.
    pub fn run_until<F>(&mut self, mut stop: F) -> Result<u64, MachineError<H::Error>>
    where
        F: FnMut(&TickReport<C>) -> bool,
    {
        if !self.started {
            self.start()?;
        }
        let mut ticks = 0;
        loop {
            let report = self.evaluate_once()?;
            ticks += 1;
            if stop(&report) {
                return Ok(ticks);
            }
            self.pace();
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    pub fn state_count(&self) -> usize {
        self.table.state_count()
    }

    /// Ticks evaluated so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn table(&self) -> &TransitionTable<C> {
        &self.table
    }

    pub fn history(&self) -> &TransitionHistory<C> {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn into_hooks(self) -> H {
        self.hooks
    }

    /// Poll every source in registration order and keep the first
    /// concrete event.
    fn poll_sources(&mut self) -> Event<C> {
        let mut resolved = Event::NoEvent;
        for source in self.sources.iter_mut() {
            match source.poll_event() {
                Ok(Event::NoEvent) => {}
                Ok(Event::Forced) => {
                    tracing::warn!(
                        source = %source.name(),
                        "event source reported FORCED, ignoring"
                    );
                }
                Ok(event) if resolved.is_concrete() => {
                    tracing::warn!(
                        source = %source.name(),
                        dropped = %event,
                        kept = %resolved,
                        "coincident event dropped"
                    );
                }
                Ok(event) => resolved = event,
                Err(err) => {
                    tracing::warn!(
                        source = %source.name(),
                        error = %err,
                        "event source failed, treating as NO_EVENT"
                    );
                }
            }
        }
        resolved
    }

    /// Exit the current state and enter `to`, recording the change.
    fn change_state(
        &mut self,
        to: StateId,
        event: &Event<C>,
    ) -> Result<(), MachineError<H::Error>> {
        let from = self.current;

        tracing::info!(tick = self.tick, event = %event, "{} left", self.hooks.state_name(from));
        self.dispatch(Hook::Exit, from, |hooks, ctx| hooks.on_exit(ctx, from, event))?;

        self.current = to;
        self.history.record(TransitionRecord {
            from,
            to,
            event: event.clone(),
            tick: self.tick,
            timestamp: Utc::now(),
        });

        self.log_entered(to);
        self.dispatch(Hook::Enter, to, |hooks, ctx| hooks.on_enter(ctx, to, event))?;
        Ok(())
    }

    fn log_entered(&self, state: StateId) {
        tracing::info!(tick = self.tick, "{} entered", self.hooks.state_name(state));
    }

    /// Invoke one hook with a fresh context and return the forced
    /// transition it requested, if any.
    fn dispatch<F>(
        &mut self,
        hook: Hook,
        state: StateId,
        call: F,
    ) -> Result<Option<StateId>, MachineError<H::Error>>
    where
        F: FnOnce(&mut H, &mut Context) -> Result<(), H::Error>,
    {
        let mut ctx = Context::new(hook, self.current, self.table.state_count(), self.tick);
        call(&mut self.hooks, &mut ctx).map_err(|source| {
            tracing::error!(%hook, %state, error = %source, "hook failed");
            MachineError::Callback { hook, state, source }
        })?;
        Ok(ctx.into_outcome()?)
    }

    fn pace(&self) {
        if let Some(interval) = self.config.tick_interval() {
            std::thread::sleep(interval);
        }
    }
}
