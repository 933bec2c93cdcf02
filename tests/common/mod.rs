//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::time::Duration;
use tickfsm::fire_alarm::{FireAlarmPanel, Light, PanelError};

/// Setup tracing for tests (reads RUST_LOG)
pub fn setup_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelCall {
    ShowText(String),
    ResetDisplay,
    LightOff(Light),
    Blink(Light),
    Beep(u32),
    StopBuzzer,
    ChaseOn,
    EvacuationOff,
    Settle(Duration),
}

/// Fake panel recording every command; sensors are plain flags.
#[derive(Debug, Default)]
pub struct RecordingPanel {
    pub calls: Vec<PanelCall>,
    pub lab_smoke: bool,
    pub breakroom_smoke: bool,
    pub buzzer_broken: bool,
}

impl RecordingPanel {
    pub fn take_calls(&mut self) -> Vec<PanelCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn beeps(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, PanelCall::Beep(_)))
            .count()
    }
}

impl FireAlarmPanel for RecordingPanel {
    fn show_text(&mut self, text: &str) -> Result<(), PanelError> {
        self.calls.push(PanelCall::ShowText(text.to_string()));
        Ok(())
    }

    fn reset_display(&mut self) -> Result<(), PanelError> {
        self.calls.push(PanelCall::ResetDisplay);
        Ok(())
    }

    fn light_off(&mut self, light: Light) -> Result<(), PanelError> {
        self.calls.push(PanelCall::LightOff(light));
        Ok(())
    }

    fn blink(&mut self, light: Light) -> Result<(), PanelError> {
        self.calls.push(PanelCall::Blink(light));
        Ok(())
    }

    fn beep(&mut self, tone_hz: u32) -> Result<(), PanelError> {
        if self.buzzer_broken {
            return Err(PanelError::Device {
                device: "buzzer",
                reason: "pwm channel stuck".to_string(),
            });
        }
        self.calls.push(PanelCall::Beep(tone_hz));
        Ok(())
    }

    fn stop_buzzer(&mut self) -> Result<(), PanelError> {
        self.calls.push(PanelCall::StopBuzzer);
        Ok(())
    }

    fn start_evacuation_chase(&mut self) -> Result<(), PanelError> {
        self.calls.push(PanelCall::ChaseOn);
        Ok(())
    }

    fn evacuation_off(&mut self) -> Result<(), PanelError> {
        self.calls.push(PanelCall::EvacuationOff);
        Ok(())
    }

    fn lab_tripped(&mut self) -> Result<bool, PanelError> {
        Ok(self.lab_smoke)
    }

    fn breakroom_tripped(&mut self) -> Result<bool, PanelError> {
        Ok(self.breakroom_smoke)
    }

    fn settle(&mut self, duration: Duration) {
        self.calls.push(PanelCall::Settle(duration));
    }
}
