//! The callback surface implemented by applications.

use super::error::{Hook, UsageError};
use crate::core::{CustomEvent, Event, StateId};
use std::borrow::Cow;

/// Entry/do/exit callbacks driven by a [`StateMachine`](super::StateMachine).
///
/// Hooks must return promptly: while one runs, no source is polled. Any
/// error returned aborts the current tick and surfaces to the caller of
/// `evaluate_once`/`run` unchanged.
///
/// # Example
///
/// ```rust
/// use std::convert::Infallible;
/// use tickfsm::core::StateId;
/// use tickfsm::engine::{Context, StateHooks};
///
/// struct Blinker {
///     ticks_lit: u32,
/// }
///
/// impl StateHooks for Blinker {
///     type Error = Infallible;
///
///     fn on_do(&mut self, _ctx: &mut Context, state: StateId) -> Result<(), Infallible> {
///         if state.index() == 1 {
///             self.ticks_lit += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait StateHooks<C: CustomEvent = ()> {
    /// Error raised by the application's hooks.
    type Error: std::error::Error + 'static;

    /// Called after `state` becomes current.
    fn on_enter(
        &mut self,
        ctx: &mut Context,
        state: StateId,
        event: &Event<C>,
    ) -> Result<(), Self::Error> {
        let _ = (ctx, state, event);
        Ok(())
    }

    /// Called once per tick for the current state, after any entry hook.
    /// The only hook allowed to call [`Context::goto_state`].
    fn on_do(&mut self, ctx: &mut Context, state: StateId) -> Result<(), Self::Error> {
        let _ = (ctx, state);
        Ok(())
    }

    /// Called while `state` is still current, right before leaving it.
    fn on_exit(
        &mut self,
        ctx: &mut Context,
        state: StateId,
        event: &Event<C>,
    ) -> Result<(), Self::Error> {
        let _ = (ctx, state, event);
        Ok(())
    }

    /// Human readable state name used in log lines.
    fn state_name(&self, state: StateId) -> Cow<'_, str> {
        Cow::Owned(format!("State {state}"))
    }

    /// Number of states these hooks were written for, if known. A machine
    /// refuses to start over hooks declaring a different count.
    fn declared_states(&self) -> Option<usize> {
        None
    }
}

/// Per-dispatch view of the machine handed to every hook.
#[derive(Debug)]
pub struct Context {
    hook: Hook,
    current: StateId,
    state_count: usize,
    tick: u64,
    pending: Option<StateId>,
    violation: Option<UsageError>,
}

impl Context {
    pub(crate) fn new(hook: Hook, current: StateId, state_count: usize, tick: u64) -> Self {
        Self {
            hook,
            current,
            state_count,
            tick,
            pending: None,
            violation: None,
        }
    }

    /// Request a forced transition to `target`, bypassing the table.
    ///
    /// Only valid inside `on_do`. The machine runs `on_exit(current, FORCED)`
    /// and `on_enter(target, FORCED)` as soon as `on_do` returns, within the
    /// same tick. If called several times, the last target wins.
    ///
    /// Misuse is reported here and also remembered, so the machine fails the
    /// tick with [`MachineError::Usage`](super::MachineError::Usage) even if
    /// the hook ignores the returned error.
    pub fn goto_state(&mut self, target: StateId) -> Result<(), UsageError> {
        let violation = if self.hook != Hook::Do {
            Some(UsageError::GotoOutsideDo { target, hook: self.hook })
        } else if !target.is_valid_for(self.state_count) {
            Some(UsageError::GotoOutOfRange {
                target,
                state_count: self.state_count,
            })
        } else {
            None
        };

        if let Some(err) = violation {
            self.violation.get_or_insert_with(|| err.clone());
            return Err(err);
        }

        if let Some(previous) = self.pending.replace(target) {
            tracing::warn!(
                %previous,
                %target,
                "goto_state called twice in one on_do, last target wins"
            );
        }
        Ok(())
    }

    /// State that was current when the hook was dispatched.
    pub fn current_state(&self) -> StateId {
        self.current
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Number of the tick being evaluated. Zero during `start`.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Which hook this context was created for.
    pub fn hook(&self) -> Hook {
        self.hook
    }

    pub(crate) fn into_outcome(self) -> Result<Option<StateId>, UsageError> {
        match self.violation {
            Some(err) => Err(err),
            None => Ok(self.pending),
        }
    }
}
