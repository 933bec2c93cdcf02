//! Declarative machine configuration.
//!
//! A [`MachineConfig`] describes the state count, initial state, transition
//! rules and engine settings as plain data, typically loaded from JSON.
//! Validation reports every problem at once instead of stopping at the first.

use super::error::ConfigError;
use super::machine::MachineBuilder;
use crate::core::{CustomEvent, DEFAULT_HISTORY_CAPACITY, Event, StateId};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Runtime settings of the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pause between ticks in `run`, none means tick as fast as possible
    pub tick_interval_ms: Option<u64>,

    /// Number of state changes kept in the transition history
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn tick_interval(&self) -> Option<Duration> {
        self.tick_interval_ms.map(Duration::from_millis)
    }
}

/// One `(from, on, to)` entry of a [`MachineConfig`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig<C = ()> {
    pub from: StateId,
    pub on: Vec<Event<C>>,
    pub to: StateId,
}

/// Serializable description of a machine.
///
/// # Example
///
/// ```rust
/// use tickfsm::builder::MachineConfig;
///
/// let config: MachineConfig = MachineConfig::from_json(r#"{
///     "states": 5,
///     "transitions": [
///         { "from": 0, "on": [{ "button_press": 1 }], "to": 2 },
///         { "from": 2, "on": ["no_event"], "to": 4 },
///         { "from": 4, "on": [{ "button_press": 2 }], "to": 0 }
///     ],
///     "engine": { "tick_interval_ms": 10 }
/// }"#).unwrap();
///
/// assert!(config.validate().is_success());
/// assert_eq!(config.transitions.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineConfig<C = ()> {
    pub states: usize,

    #[serde(default)]
    pub initial: StateId,

    #[serde(default = "Vec::new")]
    pub transitions: Vec<RuleConfig<C>>,

    #[serde(default)]
    pub engine: EngineConfig,
}

impl<C> MachineConfig<C>
where
    C: CustomEvent + for<'de> Deserialize<'de>,
{
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))
    }
}

impl<C: CustomEvent> MachineConfig<C> {
    /// Check the whole configuration, accumulating every violation.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        if self.states == 0 {
            checks.push(Validation::fail(ConfigError::ZeroStates));
        } else if !self.initial.is_valid_for(self.states) {
            checks.push(Validation::fail(ConfigError::InitialOutOfRange {
                state: self.initial,
                state_count: self.states,
            }));
        }

        for rule in &self.transitions {
            for state in [rule.from, rule.to] {
                if self.states > 0 && !state.is_valid_for(self.states) {
                    checks.push(Validation::fail(ConfigError::StateOutOfRange {
                        state,
                        state_count: self.states,
                    }));
                }
            }
            if rule.on.iter().any(Event::is_forced) {
                checks.push(Validation::fail(ConfigError::ForcedTrigger { from: rule.from }));
            }
        }

        if checks.is_empty() {
            return Validation::success(());
        }
        Validation::all_vec(checks).map(|_| ())
    }

    /// Validate, then turn the configuration into a builder. Sources still
    /// have to be added on the returned builder.
    pub fn into_builder<'a>(self) -> Result<MachineBuilder<'a, C>, ConfigError> {
        if let Validation::Failure(errors) = self.validate() {
            return Err(ConfigError::Invalid(errors.iter().cloned().collect()));
        }

        let builder = self.transitions.into_iter().fold(
            MachineBuilder::new(self.states)
                .initial(self.initial)
                .config(self.engine),
            |builder, rule| builder.transition(rule.from, rule.on, rule.to),
        );
        Ok(builder)
    }
}
