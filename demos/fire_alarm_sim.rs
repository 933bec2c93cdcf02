//! Fire Alarm Simulation
//!
//! This example runs the five-state fire alarm against a simulated panel
//! that logs every hardware command instead of driving real peripherals.
//!
//! Key concepts:
//! - Per-state behaviours collected in a `StateSet`
//! - Scripted button presses as event sources
//! - Forced transitions when a smoke sensor trips
//! - Paced ticking with `run_until`
//!
//! Run with: RUST_LOG=info cargo run --example fire_alarm_sim

use std::time::Duration;
use tickfsm::builder::EngineConfig;
use tickfsm::core::Event;
use tickfsm::fire_alarm::{self, FireAlarmPanel, FireState, Light, PanelError};
use tickfsm::sources::ScriptedSource;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Panel that prints what real hardware would do.
#[derive(Default)]
struct SimulatedPanel {
    lab_smoke_at: Option<u32>,
    polls: u32,
}

impl FireAlarmPanel for SimulatedPanel {
    fn show_text(&mut self, text: &str) -> Result<(), PanelError> {
        tracing::info!(target: "panel", "display: {text}");
        Ok(())
    }

    fn reset_display(&mut self) -> Result<(), PanelError> {
        tracing::info!(target: "panel", "display: cleared");
        Ok(())
    }

    fn light_off(&mut self, light: Light) -> Result<(), PanelError> {
        tracing::debug!(target: "panel", ?light, "light off");
        Ok(())
    }

    fn blink(&mut self, light: Light) -> Result<(), PanelError> {
        tracing::debug!(target: "panel", ?light, "blink");
        Ok(())
    }

    fn beep(&mut self, tone_hz: u32) -> Result<(), PanelError> {
        tracing::trace!(target: "panel", tone_hz, "beep");
        Ok(())
    }

    fn stop_buzzer(&mut self) -> Result<(), PanelError> {
        tracing::debug!(target: "panel", "buzzer off");
        Ok(())
    }

    fn start_evacuation_chase(&mut self) -> Result<(), PanelError> {
        tracing::info!(target: "panel", "evacuation strip: chase");
        Ok(())
    }

    fn evacuation_off(&mut self) -> Result<(), PanelError> {
        tracing::debug!(target: "panel", "evacuation strip: off");
        Ok(())
    }

    fn lab_tripped(&mut self) -> Result<bool, PanelError> {
        self.polls += 1;
        Ok(self.lab_smoke_at == Some(self.polls))
    }

    fn breakroom_tripped(&mut self) -> Result<bool, PanelError> {
        Ok(false)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Fire Alarm Simulation ===\n");

    // Manual pull on tick 3, disarm on tick 8.
    let manual =
        ScriptedSource::new([Event::NO_EVENT, Event::NO_EVENT, Event::BTN1_PRESS]).named("manual");
    let disarm: Vec<Event> = std::iter::repeat(Event::NO_EVENT)
        .take(7)
        .chain([Event::BTN2_PRESS])
        .collect();
    let disarm = ScriptedSource::new(disarm).named("disarm");

    let panel = SimulatedPanel {
        lab_smoke_at: Some(5),
        ..SimulatedPanel::default()
    };

    let mut machine = fire_alarm::configure()
        .config(EngineConfig {
            tick_interval_ms: Some(100),
            ..EngineConfig::default()
        })
        .source(manual)
        .source(disarm)
        .build(fire_alarm::behaviours(panel, Duration::from_millis(300)))?;

    // Stop once the sensor-triggered alarm has run for a while.
    let ticks = machine.run_until(|report| report.tick >= 14)?;

    println!("\nTicks evaluated: {ticks}");
    println!("Final state: {:?}", FireState::from_id(machine.current_state()));
    println!("\nState path:");
    for record in machine.history().transitions() {
        let kind = if record.is_forced() { "forced" } else { "table" };
        println!(
            "  tick {:>2}: {} -> {} ({kind}, {})",
            record.tick, record.from, record.to, record.event
        );
    }

    Ok(())
}
