//! Discrete events that drive transitions.
//!
//! The engine defines a closed set of input events (buttons, timeouts) plus
//! the [`Event::NoEvent`] sentinel and the [`Event::Forced`] marker. Anything
//! else an application needs to raise goes through [`Event::Custom`].

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Bound for application-defined event payloads.
///
/// Implemented automatically for every type that is `Clone + PartialEq + Debug`,
/// so a plain `#[derive(Clone, PartialEq, Debug)] enum` works out of the box.
pub trait CustomEvent: Clone + PartialEq + Debug {}

impl<T: Clone + PartialEq + Debug> CustomEvent for T {}

/// An event considered by one evaluation cycle.
///
/// Matching in the transition table is plain equality: `ButtonPress(1)` only
/// matches rules registered on `ButtonPress(1)`.
///
/// # Example
///
/// ```rust
/// use tickfsm::core::Event;
///
/// let press: Event = Event::BTN1_PRESS;
/// assert_eq!(press, Event::ButtonPress(1));
/// assert!(press.is_concrete());
/// assert!(!Event::<()>::NO_EVENT.is_concrete());
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event<C = ()> {
    /// No source reported anything this tick.
    NoEvent,

    /// Button `k` went from released to pressed.
    ButtonPress(u8),

    /// Button `k` went from pressed to released.
    ButtonRelease(u8),

    /// Timer `k` expired.
    Timeout(u8),

    /// Application-defined event.
    Custom(C),

    /// Marker passed to exit/entry hooks of a forced transition.
    /// Never produced by a source and never valid as a table trigger.
    Forced,
}

impl<C> Event<C> {
    pub const NO_EVENT: Self = Event::NoEvent;
    pub const FORCED: Self = Event::Forced;
    pub const TIMEOUT: Self = Event::Timeout(0);

    pub const BTN1_PRESS: Self = Event::ButtonPress(1);
    pub const BTN2_PRESS: Self = Event::ButtonPress(2);
    pub const BTN3_PRESS: Self = Event::ButtonPress(3);
    pub const BTN4_PRESS: Self = Event::ButtonPress(4);

    pub const BTN1_RELEASE: Self = Event::ButtonRelease(1);
    pub const BTN2_RELEASE: Self = Event::ButtonRelease(2);
    pub const BTN3_RELEASE: Self = Event::ButtonRelease(3);
    pub const BTN4_RELEASE: Self = Event::ButtonRelease(4);

    /// True for anything other than `NoEvent`.
    pub fn is_concrete(&self) -> bool {
        !matches!(self, Event::NoEvent)
    }

    pub fn is_forced(&self) -> bool {
        matches!(self, Event::Forced)
    }
}

impl<C: Debug> fmt::Display for Event<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::NoEvent => write!(f, "NO_EVENT"),
            Event::ButtonPress(k) => write!(f, "BTN{k}_PRESS"),
            Event::ButtonRelease(k) => write!(f, "BTN{k}_RELEASE"),
            Event::Timeout(0) => write!(f, "TIMEOUT"),
            Event::Timeout(k) => write!(f, "TIMEOUT{k}"),
            Event::Custom(payload) => write!(f, "CUSTOM({payload:?})"),
            Event::Forced => write!(f, "FORCED"),
        }
    }
}
