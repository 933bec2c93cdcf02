//! Configuration errors for machines and transition tables.

use crate::core::StateId;
use thiserror::Error;

/// Errors detected while configuring a machine.
///
/// All of these surface before the first tick, so no hardware has been
/// actuated when one is reported.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("A state machine needs at least one state")]
    ZeroStates,

    #[error("State {state} is out of range for a machine with {state_count} states")]
    StateOutOfRange { state: StateId, state_count: usize },

    #[error("Initial state {state} is out of range for a machine with {state_count} states")]
    InitialOutOfRange { state: StateId, state_count: usize },

    #[error("FORCED cannot trigger a table transition (rule from state {from})")]
    ForcedTrigger { from: StateId },

    #[error("Machine has already started, configuration is frozen")]
    AlreadyRunning,

    #[error("Expected {expected} state behaviours, found {found}")]
    HookCountMismatch { expected: usize, found: usize },

    #[error("Failed to parse machine configuration: {0}")]
    Parse(String),

    #[error("Invalid machine configuration: {}", summarize(.0))]
    Invalid(Vec<ConfigError>),
}

fn summarize(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
