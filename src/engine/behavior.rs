//! Per-state behaviours as trait objects.
//!
//! Instead of one hook implementation that branches on the state number,
//! each state gets its own [`StateBehavior`] value. A [`StateSet`] owns the
//! shared application data (hardware handles, counters) and forwards every
//! hook to the behaviour of the state involved.

use super::hooks::{Context, StateHooks};
use crate::core::{CustomEvent, Event, StateId};
use std::borrow::Cow;

/// Entry/do/exit behaviour of one concrete state.
///
/// `D` is the application data shared by all states, `E` the error type of
/// the hooks.
pub trait StateBehavior<D, E, C: CustomEvent = ()> {
    /// Name used in log lines.
    fn name(&self) -> &str;

    fn on_enter(&mut self, data: &mut D, ctx: &mut Context, event: &Event<C>) -> Result<(), E> {
        let _ = (data, ctx, event);
        Ok(())
    }

    fn on_do(&mut self, data: &mut D, ctx: &mut Context) -> Result<(), E> {
        let _ = (data, ctx);
        Ok(())
    }

    fn on_exit(&mut self, data: &mut D, ctx: &mut Context, event: &Event<C>) -> Result<(), E> {
        let _ = (data, ctx, event);
        Ok(())
    }
}

/// Behaviours indexed by state id, plus the data they share.
///
/// The behaviour pushed first is state 0, the next one state 1, and so on.
/// A machine built over a `StateSet` rejects a state count that differs from
/// the number of behaviours.
pub struct StateSet<D, E, C: CustomEvent = ()> {
    data: D,
    states: Vec<Box<dyn StateBehavior<D, E, C>>>,
}

impl<D, E, C: CustomEvent> StateSet<D, E, C> {
    pub fn new(data: D) -> Self {
        Self {
            data,
            states: Vec::new(),
        }
    }

    /// Append the behaviour for the next state id.
    pub fn with_state<B>(mut self, behavior: B) -> Self
    where
        B: StateBehavior<D, E, C> + 'static,
    {
        self.states.push(Box::new(behavior));
        self
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    pub fn into_data(self) -> D {
        self.data
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<D, E, C> StateHooks<C> for StateSet<D, E, C>
where
    E: std::error::Error + 'static,
    C: CustomEvent,
{
    type Error = E;

    fn on_enter(&mut self, ctx: &mut Context, state: StateId, event: &Event<C>) -> Result<(), E> {
        match self.states.get_mut(state.index()) {
            Some(behavior) => behavior.on_enter(&mut self.data, ctx, event),
            None => Ok(()),
        }
    }

    fn on_do(&mut self, ctx: &mut Context, state: StateId) -> Result<(), E> {
        match self.states.get_mut(state.index()) {
            Some(behavior) => behavior.on_do(&mut self.data, ctx),
            None => Ok(()),
        }
    }

    fn on_exit(&mut self, ctx: &mut Context, state: StateId, event: &Event<C>) -> Result<(), E> {
        match self.states.get_mut(state.index()) {
            Some(behavior) => behavior.on_exit(&mut self.data, ctx, event),
            None => Ok(()),
        }
    }

    fn state_name(&self, state: StateId) -> Cow<'_, str> {
        match self.states.get(state.index()) {
            Some(behavior) => Cow::Borrowed(behavior.name()),
            None => Cow::Owned(format!("State {state}")),
        }
    }

    fn declared_states(&self) -> Option<usize> {
        Some(self.states.len())
    }
}
