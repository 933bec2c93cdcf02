//! End-to-end runs of the fire alarm reference configuration.

mod common;

use common::{setup_tracing, PanelCall, RecordingPanel};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tickfsm::core::{Event, StateId};
use tickfsm::engine::{Hook, MachineError};
use tickfsm::fire_alarm::{
    self, FireAlarmMachine, FireState, Light, PanelError, DIALLING_TEXT, MANUAL_TEXT, SIREN,
};
use tickfsm::sources::ScriptedSource;

type Buttons = Rc<RefCell<ScriptedSource>>;

fn alarm(settle: Duration) -> (FireAlarmMachine<'static, RecordingPanel>, Buttons, Buttons) {
    setup_tracing();
    let manual = Rc::new(RefCell::new(ScriptedSource::new([]).named("manual")));
    let disarm = Rc::new(RefCell::new(ScriptedSource::new([]).named("disarm")));

    let mut machine = fire_alarm::build(
        RecordingPanel::default(),
        Rc::clone(&manual),
        Rc::clone(&disarm),
        settle,
    )
    .unwrap();
    machine.start().unwrap();
    machine.hooks_mut().data_mut().take_calls();

    (machine, manual, disarm)
}

fn state(machine: &FireAlarmMachine<'static, RecordingPanel>) -> FireState {
    FireState::from_id(machine.current_state()).unwrap()
}

fn panel<'m>(machine: &'m mut FireAlarmMachine<'static, RecordingPanel>) -> &'m mut RecordingPanel {
    machine.hooks_mut().data_mut()
}

#[test]
fn start_puts_outputs_in_safe_state() {
    let manual = ScriptedSource::new([]);
    let disarm = ScriptedSource::new([]);
    let mut machine =
        fire_alarm::build(RecordingPanel::default(), manual, disarm, Duration::ZERO).unwrap();

    machine.start().unwrap();

    assert_eq!(
        panel(&mut machine).take_calls(),
        vec![
            PanelCall::ResetDisplay,
            PanelCall::StopBuzzer,
            PanelCall::LightOff(Light::Red),
            PanelCall::LightOff(Light::Blue),
            PanelCall::EvacuationOff,
        ]
    );
}

#[test]
fn manual_button_passes_through_to_alarm_until_disarmed() {
    let (mut machine, manual, disarm) = alarm(Duration::ZERO);

    manual.borrow_mut().push(Event::BTN1_PRESS);
    let report = machine.evaluate_once().unwrap();
    assert_eq!(state(&machine), FireState::Manual);
    assert_eq!(report.transition, Some((StateId::new(0), StateId::new(2))));
    assert_eq!(
        panel(&mut machine).take_calls(),
        vec![PanelCall::ShowText(MANUAL_TEXT.to_string())]
    );

    let report = machine.evaluate_once().unwrap();
    assert_eq!(report.event, Event::NoEvent);
    assert_eq!(state(&machine), FireState::Alarm);

    for _ in 0..5 {
        machine.evaluate_once().unwrap();
        assert_eq!(state(&machine), FireState::Alarm);
    }
    assert_eq!(panel(&mut machine).beeps(), SIREN.len() * 6);

    disarm.borrow_mut().push(Event::BTN2_PRESS);
    machine.evaluate_once().unwrap();
    assert_eq!(state(&machine), FireState::Idle);

    let path = machine.history().get_path();
    assert_eq!(path, vec![StateId::new(0), StateId::new(2), StateId::new(4), StateId::new(0)]);
}

#[test]
fn alarm_tick_runs_full_siren_sequence() {
    let (mut machine, manual, _disarm) = alarm(Duration::ZERO);
    manual.borrow_mut().push(Event::BTN1_PRESS);
    machine.evaluate_once().unwrap();
    panel(&mut machine).take_calls();

    machine.evaluate_once().unwrap();

    let mut expected = vec![
        PanelCall::ResetDisplay,
        PanelCall::ChaseOn,
        PanelCall::ShowText(DIALLING_TEXT.to_string()),
        PanelCall::Blink(Light::Red),
        PanelCall::Blink(Light::Blue),
    ];
    expected.extend(SIREN.iter().map(|tone| PanelCall::Beep(*tone)));
    assert_eq!(panel(&mut machine).take_calls(), expected);
}

#[test]
fn disarming_silences_the_alarm() {
    let (mut machine, manual, disarm) = alarm(Duration::ZERO);
    manual.borrow_mut().push(Event::BTN1_PRESS);
    machine.evaluate_once().unwrap();
    machine.evaluate_once().unwrap();
    panel(&mut machine).take_calls();

    disarm.borrow_mut().push(Event::BTN2_PRESS);
    machine.evaluate_once().unwrap();

    assert_eq!(
        panel(&mut machine).take_calls(),
        vec![
            PanelCall::ResetDisplay,
            PanelCall::LightOff(Light::Red),
            PanelCall::LightOff(Light::Blue),
            PanelCall::StopBuzzer,
            PanelCall::ResetDisplay,
            PanelCall::StopBuzzer,
            PanelCall::LightOff(Light::Red),
            PanelCall::LightOff(Light::Blue),
            PanelCall::EvacuationOff,
        ]
    );
}

#[test]
fn disarm_button_is_ignored_while_idle() {
    let (mut machine, _manual, disarm) = alarm(Duration::ZERO);
    disarm.borrow_mut().push(Event::BTN2_PRESS);

    let report = machine.evaluate_once().unwrap();

    assert_eq!(report.event, Event::BTN2_PRESS);
    assert_eq!(state(&machine), FireState::Idle);
    assert!(panel(&mut machine).take_calls().is_empty());
}

#[test]
fn lab_sensor_forces_lab_fire_then_alarm() {
    let (mut machine, _manual, _disarm) = alarm(Duration::ZERO);
    panel(&mut machine).lab_smoke = true;

    let report = machine.evaluate_once().unwrap();
    assert_eq!(report.transition, None);
    assert_eq!(report.forced, Some((StateId::new(0), StateId::new(1))));
    assert_eq!(state(&machine), FireState::LabFire);

    let report = machine.evaluate_once().unwrap();
    assert_eq!(report.transition, Some((StateId::new(1), StateId::new(4))));
    assert_eq!(state(&machine), FireState::Alarm);

    let forced: Vec<_> = machine.history().forced_edges().collect();
    assert_eq!(forced, vec![(StateId::new(0), StateId::new(1))]);
}

#[test]
fn breakroom_sensor_forces_breakroom_fire() {
    let (mut machine, _manual, _disarm) = alarm(Duration::ZERO);
    panel(&mut machine).breakroom_smoke = true;

    machine.evaluate_once().unwrap();
    assert_eq!(state(&machine), FireState::BreakroomFire);

    machine.evaluate_once().unwrap();
    assert_eq!(state(&machine), FireState::Alarm);
}

#[test]
fn lingering_smoke_rearms_right_after_disarm() {
    let (mut machine, _manual, disarm) = alarm(Duration::ZERO);
    panel(&mut machine).lab_smoke = true;
    machine.evaluate_once().unwrap();
    machine.evaluate_once().unwrap();

    disarm.borrow_mut().push(Event::BTN2_PRESS);
    let report = machine.evaluate_once().unwrap();

    assert_eq!(report.transition, Some((StateId::new(4), StateId::new(0))));
    assert_eq!(report.forced, Some((StateId::new(0), StateId::new(1))));
    assert_eq!(state(&machine), FireState::LabFire);
}

#[test]
fn manual_settle_delay_is_explicit() {
    let (mut machine, manual, _disarm) = alarm(fire_alarm::DEFAULT_MANUAL_SETTLE);
    manual.borrow_mut().push(Event::BTN1_PRESS);

    machine.evaluate_once().unwrap();

    assert_eq!(
        panel(&mut machine).take_calls(),
        vec![
            PanelCall::ShowText(MANUAL_TEXT.to_string()),
            PanelCall::Settle(Duration::from_millis(600)),
        ]
    );
}

#[test]
fn buzzer_fault_surfaces_to_the_caller() {
    let (mut machine, manual, _disarm) = alarm(Duration::ZERO);
    manual.borrow_mut().push(Event::BTN1_PRESS);
    machine.evaluate_once().unwrap();
    panel(&mut machine).buzzer_broken = true;

    let err = machine.evaluate_once().unwrap_err();

    match err {
        MachineError::Callback { hook, state, source } => {
            assert_eq!(hook, Hook::Do);
            assert_eq!(state, FireState::Alarm.id());
            assert!(matches!(source, PanelError::Device { device: "buzzer", .. }));
        }
        other => panic!("expected callback error, got {other:?}"),
    }
    assert_eq!(machine.current_state(), FireState::Alarm.id());
}
