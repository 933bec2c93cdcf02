//! Transition table: `(state, event) -> next state`.

use super::event::{CustomEvent, Event};
use super::state::StateId;
use crate::builder::ConfigError;
use std::collections::{BTreeSet, VecDeque};

/// A single `(from, trigger, to)` rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule<C = ()> {
    pub from: StateId,
    pub trigger: Event<C>,
    pub to: StateId,
}

/// Lookup table from `(state, event)` to destination state.
///
/// Rules are stored per source state. Only equality on the event is ever
/// checked; there are no guards.
///
/// `goto_state` transitions never pass through this table, so [`edges`] and
/// [`reachable_from`] describe the table-driven graph only. Forced edges
/// taken at runtime show up in the machine's history instead.
///
/// [`edges`]: TransitionTable::edges
/// [`reachable_from`]: TransitionTable::reachable_from
///
/// # Example
///
/// ```rust
/// use tickfsm::core::{Event, StateId, TransitionTable};
///
/// let mut table: TransitionTable = TransitionTable::new(5);
/// table.add_transition(StateId::new(0), [Event::BTN1_PRESS], StateId::new(2)).unwrap();
/// table.add_transition(StateId::new(2), [Event::NO_EVENT], StateId::new(4)).unwrap();
///
/// assert_eq!(table.lookup(StateId::new(0), &Event::BTN1_PRESS), Some(StateId::new(2)));
/// assert_eq!(table.lookup(StateId::new(0), &Event::NO_EVENT), None);
/// ```
#[derive(Clone, Debug)]
pub struct TransitionTable<C = ()> {
    rows: Vec<Vec<(Event<C>, StateId)>>,
}

impl<C: CustomEvent> TransitionTable<C> {
    /// Create an empty table for a machine with `state_count` states.
    pub fn new(state_count: usize) -> Self {
        Self {
            rows: vec![Vec::new(); state_count],
        }
    }

    pub fn state_count(&self) -> usize {
        self.rows.len()
    }

    /// Register that any event in `events` moves `from` to `to`.
    ///
    /// All arguments are validated before anything is inserted, so a failed
    /// call leaves the table untouched. Registering an already-known
    /// `(from, event)` pair replaces its destination and logs a warning.
    pub fn add_transition<I>(
        &mut self,
        from: StateId,
        events: I,
        to: StateId,
    ) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = Event<C>>,
    {
        let state_count = self.state_count();
        for state in [from, to] {
            if !state.is_valid_for(state_count) {
                return Err(ConfigError::StateOutOfRange { state, state_count });
            }
        }

        let events: Vec<Event<C>> = events.into_iter().collect();
        if events.iter().any(Event::is_forced) {
            return Err(ConfigError::ForcedTrigger { from });
        }

        let row = &mut self.rows[from.index()];
        for event in events {
            match row.iter_mut().find(|(trigger, _)| *trigger == event) {
                Some(existing) => {
                    tracing::warn!(
                        %from,
                        event = %event,
                        previous = %existing.1,
                        replacement = %to,
                        "duplicate transition rule, last registration wins"
                    );
                    existing.1 = to;
                }
                None => row.push((event, to)),
            }
        }
        Ok(())
    }

    /// Destination for `event` in state `from`, if a rule matches.
    pub fn lookup(&self, from: StateId, event: &Event<C>) -> Option<StateId> {
        self.rows
            .get(from.index())?
            .iter()
            .find(|(trigger, _)| trigger == event)
            .map(|(_, to)| *to)
    }

    /// True if `from` has a `NO_EVENT` rule, i.e. it is left automatically.
    pub fn has_automatic_exit(&self, from: StateId) -> bool {
        self.lookup(from, &Event::NoEvent).is_some()
    }

    /// Every registered rule, grouped by source state.
    pub fn edges(&self) -> impl Iterator<Item = Rule<C>> + '_ {
        self.rows.iter().enumerate().flat_map(|(from, row)| {
            row.iter().map(move |(trigger, to)| Rule {
                from: StateId::new(from),
                trigger: trigger.clone(),
                to: *to,
            })
        })
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// States reachable from `start` through table rules alone, `start`
    /// included. Forced transitions are not considered.
    pub fn reachable_from(&self, start: StateId) -> BTreeSet<StateId> {
        let mut seen = BTreeSet::new();
        if !start.is_valid_for(self.state_count()) {
            return seen;
        }

        let mut queue = VecDeque::from([start]);
        seen.insert(start);
        while let Some(state) = queue.pop_front() {
            for (_, to) in &self.rows[state.index()] {
                if seen.insert(*to) {
                    queue.push_back(*to);
                }
            }
        }
        seen
    }
}
