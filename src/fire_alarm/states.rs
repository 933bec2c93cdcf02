//! One behaviour per fire alarm state.

use super::panel::{FireAlarmPanel, Light, PanelError};
use crate::core::Event;
use crate::engine::{Context, StateBehavior};
use std::time::Duration;

crate::states! {
    /// States of the fire alarm, in id order.
    pub enum FireState {
        Idle,
        LabFire,
        Manual,
        BreakroomFire,
        Alarm,
    }
}

/// Tones played by the alarm on every tick, in Hz.
pub const SIREN: [u32; 12] = [262, 262, 294, 262, 262, 294, 262, 262, 294, 262, 262, 294];

pub const LAB_FIRE_TEXT: &str = "Fire Detected In Laboratory";
pub const MANUAL_TEXT: &str = "Manual Alarm Pulled";
pub const BREAKROOM_FIRE_TEXT: &str = "Fire Detected In Breakroom";
pub const DIALLING_TEXT: &str = "Dialling 911...";

/// Waiting for a fire. Polls both smoke sensors on every tick.
pub struct Idle;

impl<P: FireAlarmPanel> StateBehavior<P, PanelError> for Idle {
    fn name(&self) -> &str {
        FireState::Idle.name()
    }

    fn on_enter(
        &mut self,
        panel: &mut P,
        _ctx: &mut Context,
        _event: &Event,
    ) -> Result<(), PanelError> {
        panel.reset_display()?;
        panel.stop_buzzer()?;
        panel.light_off(Light::Red)?;
        panel.light_off(Light::Blue)?;
        panel.evacuation_off()
    }

    fn on_do(&mut self, panel: &mut P, ctx: &mut Context) -> Result<(), PanelError> {
        let target = if panel.lab_tripped()? {
            Some(FireState::LabFire)
        } else if panel.breakroom_tripped()? {
            Some(FireState::BreakroomFire)
        } else {
            None
        };

        if let Some(state) = target {
            tracing::warn!(sensor = state.name(), "smoke sensor tripped");
            if let Err(err) = ctx.goto_state(state.id()) {
                tracing::error!(error = %err, "could not force fire state");
            }
        }
        Ok(())
    }
}

/// A fire detected by a sensor: shows where, then hands over to the alarm.
pub struct FireDetected {
    state: FireState,
    text: &'static str,
}

impl FireDetected {
    pub fn lab() -> Self {
        Self {
            state: FireState::LabFire,
            text: LAB_FIRE_TEXT,
        }
    }

    pub fn breakroom() -> Self {
        Self {
            state: FireState::BreakroomFire,
            text: BREAKROOM_FIRE_TEXT,
        }
    }
}

impl<P: FireAlarmPanel> StateBehavior<P, PanelError> for FireDetected {
    fn name(&self) -> &str {
        self.state.name()
    }

    fn on_enter(
        &mut self,
        panel: &mut P,
        _ctx: &mut Context,
        _event: &Event,
    ) -> Result<(), PanelError> {
        panel.show_text(self.text)
    }

    fn on_exit(
        &mut self,
        panel: &mut P,
        _ctx: &mut Context,
        _event: &Event,
    ) -> Result<(), PanelError> {
        panel.reset_display()
    }
}

/// The manual alarm button was pressed.
pub struct Manual {
    settle: Duration,
}

impl Manual {
    /// `settle` is how long the entry hook holds the loop so the message
    /// stays readable before the alarm takes over the display. Zero skips it.
    pub fn new(settle: Duration) -> Self {
        Self { settle }
    }
}

impl<P: FireAlarmPanel> StateBehavior<P, PanelError> for Manual {
    fn name(&self) -> &str {
        FireState::Manual.name()
    }

    fn on_enter(
        &mut self,
        panel: &mut P,
        _ctx: &mut Context,
        _event: &Event,
    ) -> Result<(), PanelError> {
        panel.show_text(MANUAL_TEXT)?;
        if !self.settle.is_zero() {
            panel.settle(self.settle);
        }
        Ok(())
    }

    fn on_exit(
        &mut self,
        panel: &mut P,
        _ctx: &mut Context,
        _event: &Event,
    ) -> Result<(), PanelError> {
        panel.reset_display()
    }
}

/// Alarm sequence: evacuation chase, police lights and siren until
/// disarmed.
pub struct Alarm;

impl<P: FireAlarmPanel> StateBehavior<P, PanelError> for Alarm {
    fn name(&self) -> &str {
        FireState::Alarm.name()
    }

    fn on_enter(
        &mut self,
        panel: &mut P,
        _ctx: &mut Context,
        _event: &Event,
    ) -> Result<(), PanelError> {
        panel.start_evacuation_chase()
    }

    fn on_do(&mut self, panel: &mut P, _ctx: &mut Context) -> Result<(), PanelError> {
        panel.show_text(DIALLING_TEXT)?;
        panel.blink(Light::Red)?;
        panel.blink(Light::Blue)?;
        SIREN.iter().try_for_each(|tone| panel.beep(*tone))
    }

    fn on_exit(
        &mut self,
        panel: &mut P,
        _ctx: &mut Context,
        _event: &Event,
    ) -> Result<(), PanelError> {
        panel.reset_display()?;
        panel.light_off(Light::Red)?;
        panel.light_off(Light::Blue)?;
        panel.stop_buzzer()
    }
}
