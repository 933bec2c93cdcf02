//! Pollable event sources.
//!
//! A source is asked once per tick whether something happened since the
//! last poll. Sources never push into the machine; anything interrupt driven
//! has to be latched by the driver and reported on the next poll.

mod button;
mod script;
mod timer;

pub use button::{Button, Polarity};
pub use script::ScriptedSource;
pub use timer::{Clock, ManualClock, MonotonicClock, Timeout};

use crate::core::{CustomEvent, Event};
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Failure to read a source. The machine treats it as `NO_EVENT` for that
/// source on that tick.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    #[error("Event source '{name}' is unavailable: {reason}")]
    Unavailable { name: String, reason: String },

    #[error("Reading input pin of '{name}' failed: {reason}")]
    Pin { name: String, reason: String },
}

/// A non-blocking input polled once per tick.
pub trait EventSource<C: CustomEvent = ()> {
    /// Report the event that happened since the last poll, or
    /// `Event::NoEvent`.
    fn poll_event(&mut self) -> Result<Event<C>, SourceError>;

    /// Name used in log lines.
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("source")
    }
}

impl<C: CustomEvent, S: EventSource<C> + ?Sized> EventSource<C> for &mut S {
    fn poll_event(&mut self) -> Result<Event<C>, SourceError> {
        (**self).poll_event()
    }

    fn name(&self) -> Cow<'_, str> {
        (**self).name()
    }
}

impl<C: CustomEvent, S: EventSource<C> + ?Sized> EventSource<C> for Box<S> {
    fn poll_event(&mut self) -> Result<Event<C>, SourceError> {
        (**self).poll_event()
    }

    fn name(&self) -> Cow<'_, str> {
        (**self).name()
    }
}

/// Shared handle, so the application can keep using the source (restart a
/// timer, inspect a button) while the machine polls it.
impl<C: CustomEvent, S: EventSource<C> + ?Sized> EventSource<C> for Rc<RefCell<S>> {
    fn poll_event(&mut self) -> Result<Event<C>, SourceError> {
        let mut source = self.try_borrow_mut().map_err(|_| SourceError::Unavailable {
            name: "shared source".to_string(),
            reason: "already borrowed".to_string(),
        })?;
        source.poll_event()
    }

    /// Owned copy of the inner name; `"shared source"` while the source is
    /// mutably borrowed elsewhere.
    fn name(&self) -> Cow<'_, str> {
        match self.try_borrow() {
            Ok(source) => Cow::Owned(source.name().into_owned()),
            Err(_) => Cow::Borrowed("shared source"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_handle_polls_inner_source() {
        let script = Rc::new(RefCell::new(ScriptedSource::new([Event::BTN1_PRESS])));
        let mut handle: Rc<RefCell<ScriptedSource>> = Rc::clone(&script);

        assert_eq!(handle.poll_event(), Ok(Event::BTN1_PRESS));
        assert_eq!(handle.poll_event(), Ok(Event::NoEvent));
        assert!(script.borrow().is_exhausted());
    }

    #[test]
    fn shared_handle_reports_borrow_conflict() {
        let script = Rc::new(RefCell::new(ScriptedSource::<()>::new([Event::BTN1_PRESS])));
        let mut handle = Rc::clone(&script);
        let _guard = script.borrow_mut();

        assert!(matches!(
            EventSource::<()>::poll_event(&mut handle),
            Err(SourceError::Unavailable { .. })
        ));
    }

    #[test]
    fn shared_handle_forwards_name() {
        let script = Rc::new(RefCell::new(ScriptedSource::<()>::new([]).named("manual")));
        let handle: Rc<RefCell<ScriptedSource>> = Rc::clone(&script);

        assert_eq!(EventSource::<()>::name(&handle), "manual");

        let _guard = script.borrow_mut();
        assert_eq!(EventSource::<()>::name(&handle), "shared source");
    }

    #[test]
    fn boxed_sources_forward_names() {
        let boxed: Box<dyn EventSource> = Box::new(ScriptedSource::<()>::new([]).named("panel"));
        assert_eq!(boxed.name(), "panel");
    }
}
