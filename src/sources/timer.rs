use super::{EventSource, SourceError};
use crate::core::{CustomEvent, Event};
use std::borrow::Cow;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time since an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Clock backed by `std::time::Instant`.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Restartable one-shot timer reporting `Event::Timeout(id)` once it
/// expires.
///
/// Clones share the same deadline: register one clone with the machine and
/// keep another in the hooks to `start` it on entry, which gives a state an
/// explicit dwell time instead of relying on the tick rate.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use tickfsm::core::Event;
/// use tickfsm::sources::{EventSource, ManualClock, Timeout};
///
/// let clock = ManualClock::new();
/// let mut timer = Timeout::new(0, clock.clone());
/// let handle = timer.clone();
///
/// handle.start(Duration::from_millis(500));
/// assert_eq!(EventSource::<()>::poll_event(&mut timer), Ok(Event::NO_EVENT));
///
/// clock.advance(Duration::from_millis(500));
/// assert_eq!(EventSource::<()>::poll_event(&mut timer), Ok(Event::TIMEOUT));
/// assert!(!handle.is_running());
/// ```
#[derive(Clone, Debug)]
pub struct Timeout<K> {
    id: u8,
    name: String,
    clock: K,
    deadline: Rc<Cell<Option<Duration>>>,
}

impl<K: Clock> Timeout<K> {
    pub fn new(id: u8, clock: K) -> Self {
        Self {
            id,
            name: format!("TIMER{id}"),
            clock,
            deadline: Rc::new(Cell::new(None)),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Arm (or re-arm) the timer to fire `after` from now. Deadlines past
    /// the end of `Duration` saturate, so `Duration::MAX` never fires.
    pub fn start(&self, after: Duration) {
        let deadline = self.clock.now().saturating_add(after);
        self.deadline.set(Some(deadline));
    }

    pub fn cancel(&self) {
        self.deadline.set(None);
    }

    pub fn is_running(&self) -> bool {
        self.deadline.get().is_some()
    }

    /// Time left before expiry, zero once overdue.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .get()
            .map(|deadline| deadline.saturating_sub(self.clock.now()))
    }
}

impl<K: Clock, C: CustomEvent> EventSource<C> for Timeout<K> {
    fn poll_event(&mut self) -> Result<Event<C>, SourceError> {
        match self.deadline.get() {
            Some(deadline) if self.clock.now() >= deadline => {
                self.deadline.set(None);
                Ok(Event::Timeout(self.id))
            }
            _ => Ok(Event::NoEvent),
        }
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll(timer: &mut Timeout<ManualClock>) -> Event {
        timer.poll_event().unwrap()
    }

    #[test]
    fn idle_timer_never_fires() {
        let clock = ManualClock::new();
        let mut timer = Timeout::new(1, clock.clone());
        clock.advance(Duration::from_secs(60));
        assert_eq!(poll(&mut timer), Event::NoEvent);
    }

    #[test]
    fn fires_once_after_deadline() {
        let clock = ManualClock::new();
        let mut timer = Timeout::new(2, clock.clone());
        timer.start(Duration::from_secs(2));

        clock.advance(Duration::from_secs(1));
        assert_eq!(poll(&mut timer), Event::NoEvent);
        assert_eq!(timer.remaining(), Some(Duration::from_secs(1)));

        clock.advance(Duration::from_secs(3));
        assert_eq!(poll(&mut timer), Event::Timeout(2));
        assert_eq!(poll(&mut timer), Event::NoEvent);
    }

    #[test]
    fn restart_pushes_deadline_back() {
        let clock = ManualClock::new();
        let mut timer = Timeout::new(0, clock.clone());
        let handle = timer.clone();

        handle.start(Duration::from_secs(1));
        clock.advance(Duration::from_millis(900));
        handle.start(Duration::from_secs(1));
        clock.advance(Duration::from_millis(200));
        assert_eq!(poll(&mut timer), Event::NoEvent);

        clock.advance(Duration::from_millis(800));
        assert_eq!(poll(&mut timer), Event::TIMEOUT);
    }

    #[test]
    fn cancel_disarms() {
        let clock = ManualClock::new();
        let mut timer = Timeout::new(0, clock.clone());
        timer.start(Duration::ZERO);
        timer.cancel();

        assert!(!timer.is_running());
        assert_eq!(poll(&mut timer), Event::NoEvent);
    }

    #[test]
    fn unbounded_delay_saturates_instead_of_overflowing() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(1));
        let mut timer = Timeout::new(3, clock.clone());

        timer.start(Duration::MAX);

        assert!(timer.is_running());
        clock.advance(Duration::from_secs(3600));
        assert_eq!(poll(&mut timer), Event::NoEvent);
    }

    #[test]
    fn monotonic_clock_moves_forward() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
