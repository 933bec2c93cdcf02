//! Runtime errors raised while evaluating a machine.

use crate::core::StateId;
use std::fmt;
use thiserror::Error;

/// Which hook was running when something went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    Enter,
    Do,
    Exit,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hook::Enter => "on_enter",
            Hook::Do => "on_do",
            Hook::Exit => "on_exit",
        };
        f.write_str(name)
    }
}

/// Misuse of the engine API at runtime.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UsageError {
    #[error("goto_state({target}) called from {hook}, only on_do may force a transition")]
    GotoOutsideDo { target: StateId, hook: Hook },

    #[error("goto_state({target}) is out of range for a machine with {state_count} states")]
    GotoOutOfRange { target: StateId, state_count: usize },

    #[error("Machine already started, the initial state was entered before")]
    AlreadyStarted,
}

/// Everything `evaluate_once`, `start` and `run` can fail with.
///
/// Callback failures are never swallowed: the tick stops where the hook
/// failed and the error is handed to the caller, which decides whether to
/// halt or drive outputs to a safe state.
#[derive(Debug, Error)]
pub enum MachineError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("{hook} failed for state {state}: {source}")]
    Callback {
        hook: Hook,
        state: StateId,
        #[source]
        source: E,
    },
}

impl<E: std::error::Error + 'static> MachineError<E> {
    /// The application error, if a hook failed.
    pub fn callback_error(&self) -> Option<&E> {
        match self {
            MachineError::Callback { source, .. } => Some(source),
            _ => None,
        }
    }
}
