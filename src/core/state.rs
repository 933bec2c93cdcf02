//! State identifiers.
//!
//! A machine with `N` states addresses them as `StateId(0)..StateId(N - 1)`.
//! States carry no payload; everything a state needs lives in the
//! application's hook implementation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a state in a machine with a fixed state count.
///
/// # Example
///
/// ```rust
/// use tickfsm::core::StateId;
///
/// let alarm = StateId::new(4);
/// assert_eq!(alarm.index(), 4);
/// assert!(alarm.is_valid_for(5));
/// assert!(!alarm.is_valid_for(4));
/// assert_eq!(alarm.to_string(), "4");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(usize);

impl StateId {
    /// Create a state identifier from its index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw index of this state.
    pub const fn index(self) -> usize {
        self.0
    }

    /// Check whether this state exists in a machine with `state_count` states.
    pub const fn is_valid_for(self, state_count: usize) -> bool {
        self.0 < state_count
    }
}

impl From<usize> for StateId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<StateId> for usize {
    fn from(state: StateId) -> Self {
        state.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
