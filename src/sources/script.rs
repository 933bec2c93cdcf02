use super::{EventSource, SourceError};
use crate::core::{CustomEvent, Event};
use std::borrow::Cow;
use std::collections::VecDeque;

/// Replays a fixed sequence of events, one per poll, then reports
/// `NO_EVENT` forever.
///
/// Useful for simulations and tests: put `Event::NoEvent` in the script to
/// leave a quiet tick between two inputs.
///
/// # Example
///
/// ```rust
/// use tickfsm::core::Event;
/// use tickfsm::sources::{EventSource, ScriptedSource};
///
/// let mut script: ScriptedSource = ScriptedSource::new([Event::BTN1_PRESS, Event::NO_EVENT]);
/// assert_eq!(script.poll_event(), Ok(Event::BTN1_PRESS));
/// assert_eq!(script.poll_event(), Ok(Event::NO_EVENT));
/// assert!(script.is_exhausted());
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedSource<C = ()> {
    name: String,
    pending: VecDeque<Event<C>>,
}

impl<C: CustomEvent> ScriptedSource<C> {
    pub fn new<I>(events: I) -> Self
    where
        I: IntoIterator<Item = Event<C>>,
    {
        Self {
            name: "script".to_string(),
            pending: events.into_iter().collect(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Queue one more event behind the ones already scripted.
    pub fn push(&mut self, event: Event<C>) {
        self.pending.push_back(event);
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl<C: CustomEvent> EventSource<C> for ScriptedSource<C> {
    fn poll_event(&mut self) -> Result<Event<C>, SourceError> {
        Ok(self.pending.pop_front().unwrap_or(Event::NoEvent))
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}
