//! Transition history tracking.
//!
//! The engine records every state change (table-driven or forced) into a
//! bounded history. It is a pure side channel for diagnostics: nothing in the
//! evaluation cycle ever reads it back.

use super::event::{CustomEvent, Event};
use super::state::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// History capacity used when none is configured.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Record of a single state change.
///
/// # Example
///
/// ```rust
/// use tickfsm::core::{Event, StateId, TransitionRecord};
/// use chrono::Utc;
///
/// let record: TransitionRecord = TransitionRecord {
///     from: StateId::new(0),
///     to: StateId::new(2),
///     event: Event::BTN1_PRESS,
///     tick: 7,
///     timestamp: Utc::now(),
/// };
/// assert!(!record.is_forced());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionRecord<C = ()> {
    /// The state being left
    pub from: StateId,
    /// The state being entered
    pub to: StateId,
    /// Event that caused the change, `Event::Forced` for `goto_state`
    pub event: Event<C>,
    /// Tick on which the change happened
    pub tick: u64,
    /// Wall-clock time of the change
    pub timestamp: DateTime<Utc>,
}

impl<C> TransitionRecord<C> {
    /// True when the change bypassed the transition table.
    pub fn is_forced(&self) -> bool {
        self.event.is_forced()
    }
}

/// Bounded, ordered history of state changes.
///
/// When full, the oldest record is discarded. A capacity of zero disables
/// recording entirely.
///
/// # Example
///
/// ```rust
/// use tickfsm::core::{Event, StateId, TransitionHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history: TransitionHistory = TransitionHistory::with_capacity(8);
///
/// history.record(TransitionRecord {
///     from: StateId::new(0),
///     to: StateId::new(2),
///     event: Event::BTN1_PRESS,
///     tick: 1,
///     timestamp: Utc::now(),
/// });
/// history.record(TransitionRecord {
///     from: StateId::new(2),
///     to: StateId::new(4),
///     event: Event::NO_EVENT,
///     tick: 2,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![StateId::new(0), StateId::new(2), StateId::new(4)]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionHistory<C = ()> {
    capacity: usize,
    records: VecDeque<TransitionRecord<C>>,
}

impl<C: CustomEvent> Default for TransitionHistory<C> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl<C: CustomEvent> TransitionHistory<C> {
    /// Create an empty history keeping at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord<C>) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// States traversed: the `from` of the oldest retained record, then the
    /// `to` of every record.
    pub fn get_path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|record| record.to));
        path
    }

    /// Time between the oldest and newest retained records.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Retained records, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &TransitionRecord<C>> {
        self.records.iter()
    }

    /// Edges taken through `goto_state`. These never appear in the
    /// transition table.
    pub fn forced_edges(&self) -> impl Iterator<Item = (StateId, StateId)> + '_ {
        self.records
            .iter()
            .filter(|record| record.is_forced())
            .map(|record| (record.from, record.to))
    }

    pub fn last(&self) -> Option<&TransitionRecord<C>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
