//! Builder for constructing state machines.

use crate::builder::config::EngineConfig;
use crate::builder::error::ConfigError;
use crate::core::{CustomEvent, Event, StateId};
use crate::engine::{StateHooks, StateMachine};
use crate::sources::EventSource;

/// Builder for constructing state machines with a fluent API.
///
/// Rules are only checked in [`build`](Self::build), which fails on the
/// first invalid one before any hook runs.
///
/// # Example
///
/// ```rust
/// use std::convert::Infallible;
/// use tickfsm::builder::MachineBuilder;
/// use tickfsm::core::Event;
/// use tickfsm::engine::StateHooks;
/// use tickfsm::sources::ScriptedSource;
///
/// struct Quiet;
///
/// impl StateHooks for Quiet {
///     type Error = Infallible;
/// }
///
/// let machine = MachineBuilder::new(2)
///     .transition(0, [Event::BTN1_PRESS], 1)
///     .transition(1, [Event::BTN1_PRESS], 0)
///     .source(ScriptedSource::new([]))
///     .build(Quiet)
///     .unwrap();
///
/// assert_eq!(machine.table().len(), 2);
/// ```
pub struct MachineBuilder<'a, C: CustomEvent = ()> {
    state_count: usize,
    initial: StateId,
    rules: Vec<(StateId, Vec<Event<C>>, StateId)>,
    sources: Vec<Box<dyn EventSource<C> + 'a>>,
    config: EngineConfig,
}

impl<'a, C: CustomEvent> MachineBuilder<'a, C> {
    /// Create a new builder for a machine with `state_count` states.
    pub fn new(state_count: usize) -> Self {
        Self {
            state_count,
            initial: StateId::new(0),
            rules: Vec::new(),
            sources: Vec::new(),
            config: EngineConfig::default(),
        }
    }

    /// Set the initial state (defaults to 0).
    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.initial = state.into();
        self
    }

    /// Add a rule: any of `events` in `from` moves to `to`.
    pub fn transition<I>(
        mut self,
        from: impl Into<StateId>,
        events: I,
        to: impl Into<StateId>,
    ) -> Self
    where
        I: IntoIterator<Item = Event<C>>,
    {
        self.rules
            .push((from.into(), events.into_iter().collect(), to.into()));
        self
    }

    /// Add an event source, polled after the ones added before it.
    pub fn source<S>(mut self, source: S) -> Self
    where
        S: EventSource<C> + 'a,
    {
        self.sources.push(Box::new(source));
        self
    }

    /// Set engine settings.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the state machine around `hooks`.
    pub fn build<H>(self, hooks: H) -> Result<StateMachine<'a, H, C>, ConfigError>
    where
        H: StateHooks<C>,
    {
        let mut machine = StateMachine::with_initial(self.state_count, hooks, self.initial)?
            .with_config(self.config);

        for (from, events, to) in self.rules {
            machine.add_transition(from, events, to)?;
        }
        for source in self.sources {
            machine.register_boxed_source(source)?;
        }
        Ok(machine)
    }
}
