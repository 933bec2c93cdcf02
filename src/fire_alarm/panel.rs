//! Hardware seen by the fire alarm: one trait, injected at construction.

use std::time::Duration;
use thiserror::Error;

/// Failure reported by a panel driver.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PanelError {
    #[error("{device} did not respond: {reason}")]
    Device { device: &'static str, reason: String },
}

/// Indicator lights on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Light {
    Red,
    Blue,
}

/// Every peripheral the fire alarm drives or reads.
///
/// Implementations wrap the real drivers (display, lights, buzzer, pixel
/// strip, smoke sensors). All calls must return quickly; they run inside
/// machine hooks.
pub trait FireAlarmPanel {
    fn show_text(&mut self, text: &str) -> Result<(), PanelError>;

    fn reset_display(&mut self) -> Result<(), PanelError>;

    fn light_off(&mut self, light: Light) -> Result<(), PanelError>;

    /// Toggle `light` once; called every tick for a blinking effect.
    fn blink(&mut self, light: Light) -> Result<(), PanelError>;

    fn beep(&mut self, tone_hz: u32) -> Result<(), PanelError>;

    fn stop_buzzer(&mut self) -> Result<(), PanelError>;

    /// Start the chase animation on the evacuation pixel strip.
    fn start_evacuation_chase(&mut self) -> Result<(), PanelError>;

    fn evacuation_off(&mut self) -> Result<(), PanelError>;

    fn lab_tripped(&mut self) -> Result<bool, PanelError>;

    fn breakroom_tripped(&mut self) -> Result<bool, PanelError>;

    /// Explicit hardware settle delay. Blocks the whole loop for `duration`.
    fn settle(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<P: FireAlarmPanel + ?Sized> FireAlarmPanel for Box<P> {
    fn show_text(&mut self, text: &str) -> Result<(), PanelError> {
        (**self).show_text(text)
    }

    fn reset_display(&mut self) -> Result<(), PanelError> {
        (**self).reset_display()
    }

    fn light_off(&mut self, light: Light) -> Result<(), PanelError> {
        (**self).light_off(light)
    }

    fn blink(&mut self, light: Light) -> Result<(), PanelError> {
        (**self).blink(light)
    }

    fn beep(&mut self, tone_hz: u32) -> Result<(), PanelError> {
        (**self).beep(tone_hz)
    }

    fn stop_buzzer(&mut self) -> Result<(), PanelError> {
        (**self).stop_buzzer()
    }

    fn start_evacuation_chase(&mut self) -> Result<(), PanelError> {
        (**self).start_evacuation_chase()
    }

    fn evacuation_off(&mut self) -> Result<(), PanelError> {
        (**self).evacuation_off()
    }

    fn lab_tripped(&mut self) -> Result<bool, PanelError> {
        (**self).lab_tripped()
    }

    fn breakroom_tripped(&mut self) -> Result<bool, PanelError> {
        (**self).breakroom_tripped()
    }

    fn settle(&mut self, duration: Duration) {
        (**self).settle(duration)
    }
}
