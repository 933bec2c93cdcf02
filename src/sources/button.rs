use super::{EventSource, SourceError};
use crate::core::{CustomEvent, Event};
use embedded_hal::digital::InputPin;
use std::borrow::Cow;

/// Electrical level that means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Pressed pulls the pin low (pull-up wiring).
    #[default]
    ActiveLow,
    ActiveHigh,
}

/// Debounced push button turning pin levels into press/release events.
///
/// A level change is only accepted once it has been read on
/// `debounce_ticks` consecutive polls. The button starts out released.
pub struct Button<P> {
    pin: P,
    id: u8,
    name: String,
    polarity: Polarity,
    debounce_ticks: u8,
    pressed: bool,
    candidate_count: u8,
}

impl<P: InputPin> Button<P> {
    /// Button `id` reports `ButtonPress(id)` / `ButtonRelease(id)`.
    pub fn new(pin: P, id: u8) -> Self {
        Self {
            pin,
            id,
            name: format!("BTN{id}"),
            polarity: Polarity::default(),
            debounce_ticks: 1,
            pressed: false,
            candidate_count: 0,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Consecutive identical reads needed before a change is reported.
    /// Zero is treated as one.
    pub fn debounce_ticks(mut self, ticks: u8) -> Self {
        self.debounce_ticks = ticks.max(1);
        self
    }

    /// Debounced state as of the last poll.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn release(self) -> P {
        self.pin
    }

    fn read_pressed(&mut self) -> Result<bool, SourceError> {
        let high = self.pin.is_high().map_err(|err| SourceError::Pin {
            name: self.name.clone(),
            reason: format!("{err:?}"),
        })?;
        Ok(match self.polarity {
            Polarity::ActiveLow => !high,
            Polarity::ActiveHigh => high,
        })
    }
}

impl<P: InputPin, C: CustomEvent> EventSource<C> for Button<P> {
    fn poll_event(&mut self) -> Result<Event<C>, SourceError> {
        let level = self.read_pressed()?;
        if level == self.pressed {
            self.candidate_count = 0;
            return Ok(Event::NoEvent);
        }

        self.candidate_count += 1;
        if self.candidate_count < self.debounce_ticks {
            return Ok(Event::NoEvent);
        }

        self.candidate_count = 0;
        self.pressed = level;
        Ok(if level {
            Event::ButtonPress(self.id)
        } else {
            Event::ButtonRelease(self.id)
        })
    }

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }
}
