//! Reference configuration: a five-state fire alarm.
//!
//! | id | state          | leaves on            |
//! |----|----------------|----------------------|
//! | 0  | idle           | BTN1 press -> manual; smoke -> forced to 1 or 3 |
//! | 1  | lab fire       | NO_EVENT -> alarm    |
//! | 2  | manual         | NO_EVENT -> alarm    |
//! | 3  | breakroom fire | NO_EVENT -> alarm    |
//! | 4  | alarm          | BTN2 press -> idle   |
//!
//! The fire states pass straight through to the alarm on the tick after
//! they are entered. The sensor edges out of idle are forced transitions
//! and do not appear in the table.

mod panel;
mod states;

pub use panel::{FireAlarmPanel, Light, PanelError};
pub use states::{
    Alarm, FireDetected, FireState, Idle, Manual, BREAKROOM_FIRE_TEXT, DIALLING_TEXT, LAB_FIRE_TEXT,
    MANUAL_TEXT, SIREN,
};

use crate::builder::{ConfigError, MachineBuilder};
use crate::core::Event;
use crate::engine::{StateMachine, StateSet};
use crate::sources::EventSource;
use std::time::Duration;

/// Button id of the manual alarm (`BTN1`).
pub const MANUAL_BUTTON: u8 = 1;

/// Button id of the disarm button (`BTN2`).
pub const DISARM_BUTTON: u8 = 2;

/// How long the manual state holds its message before the alarm starts.
pub const DEFAULT_MANUAL_SETTLE: Duration = Duration::from_millis(600);

pub type FireAlarmStates<P> = StateSet<P, PanelError>;

pub type FireAlarmMachine<'a, P> = StateMachine<'a, FireAlarmStates<P>>;

/// Behaviours of all five states around `panel`.
pub fn behaviours<P>(panel: P, manual_settle: Duration) -> FireAlarmStates<P>
where
    P: FireAlarmPanel + 'static,
{
    StateSet::new(panel)
        .with_state(Idle)
        .with_state(FireDetected::lab())
        .with_state(Manual::new(manual_settle))
        .with_state(FireDetected::breakroom())
        .with_state(Alarm)
}

/// The fire alarm transition table, without sources.
pub fn configure<'a>() -> MachineBuilder<'a> {
    MachineBuilder::new(FireState::COUNT)
        .initial(FireState::Idle)
        .transition(FireState::Idle, [Event::ButtonPress(MANUAL_BUTTON)], FireState::Manual)
        .transition(FireState::LabFire, [Event::NoEvent], FireState::Alarm)
        .transition(FireState::Manual, [Event::NoEvent], FireState::Alarm)
        .transition(FireState::BreakroomFire, [Event::NoEvent], FireState::Alarm)
        .transition(FireState::Alarm, [Event::ButtonPress(DISARM_BUTTON)], FireState::Idle)
}

/// Complete fire alarm machine. `manual` must report
/// `ButtonPress(MANUAL_BUTTON)` and `disarm` `ButtonPress(DISARM_BUTTON)`.
pub fn build<'a, P, M, D>(
    panel: P,
    manual: M,
    disarm: D,
    manual_settle: Duration,
) -> Result<FireAlarmMachine<'a, P>, ConfigError>
where
    P: FireAlarmPanel + 'static,
    M: EventSource + 'a,
    D: EventSource + 'a,
{
    configure()
        .source(manual)
        .source(disarm)
        .build(behaviours(panel, manual_settle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateId;
    use crate::engine::StateHooks;
    use std::convert::Infallible;

    struct NoopHooks;

    impl StateHooks for NoopHooks {
        type Error = Infallible;
    }

    /// Panel with nothing attached: sensors never trip.
    struct Unplugged;

    impl FireAlarmPanel for Unplugged {
        fn show_text(&mut self, _text: &str) -> Result<(), PanelError> {
            Ok(())
        }

        fn reset_display(&mut self) -> Result<(), PanelError> {
            Ok(())
        }

        fn light_off(&mut self, _light: Light) -> Result<(), PanelError> {
            Ok(())
        }

        fn blink(&mut self, _light: Light) -> Result<(), PanelError> {
            Ok(())
        }

        fn beep(&mut self, _tone_hz: u32) -> Result<(), PanelError> {
            Ok(())
        }

        fn stop_buzzer(&mut self) -> Result<(), PanelError> {
            Ok(())
        }

        fn start_evacuation_chase(&mut self) -> Result<(), PanelError> {
            Ok(())
        }

        fn evacuation_off(&mut self) -> Result<(), PanelError> {
            Ok(())
        }

        fn lab_tripped(&mut self) -> Result<bool, PanelError> {
            Ok(false)
        }

        fn breakroom_tripped(&mut self) -> Result<bool, PanelError> {
            Ok(false)
        }
    }

    #[test]
    fn table_matches_reference_rules() {
        let machine = configure().build(NoopHooks).unwrap();
        let table = machine.table();

        assert_eq!(table.len(), 5);
        assert_eq!(table.lookup(StateId::new(0), &Event::BTN1_PRESS), Some(StateId::new(2)));
        assert_eq!(table.lookup(StateId::new(1), &Event::NO_EVENT), Some(StateId::new(4)));
        assert_eq!(table.lookup(StateId::new(2), &Event::NO_EVENT), Some(StateId::new(4)));
        assert_eq!(table.lookup(StateId::new(3), &Event::NO_EVENT), Some(StateId::new(4)));
        assert_eq!(table.lookup(StateId::new(4), &Event::BTN2_PRESS), Some(StateId::new(0)));
    }

    #[test]
    fn sensor_states_are_unreachable_through_the_table() {
        let machine = configure().build(NoopHooks).unwrap();
        let reachable = machine.table().reachable_from(FireState::Idle.id());

        assert!(!reachable.contains(&FireState::LabFire.id()));
        assert!(!reachable.contains(&FireState::BreakroomFire.id()));
        assert!(reachable.contains(&FireState::Alarm.id()));
    }

    #[test]
    fn behaviours_cover_every_state() {
        let states = behaviours(Unplugged, Duration::ZERO);
        assert_eq!(states.len(), FireState::COUNT);
        for state in FireState::ALL {
            assert_eq!(states.state_name(state.id()), state.name());
        }
    }

    #[test]
    fn quiet_panel_stays_idle() {
        let mut machine = build(
            Unplugged,
            crate::sources::ScriptedSource::new([]),
            crate::sources::ScriptedSource::new([]),
            Duration::ZERO,
        )
        .unwrap();

        machine.run_until(|report| report.tick == 10).unwrap();
        assert_eq!(FireState::from_id(machine.current_state()), Some(FireState::Idle));
        assert!(machine.history().is_empty());
    }
}
