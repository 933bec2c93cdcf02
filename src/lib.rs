//! tickfsm: a polled, event-driven finite state machine engine
//!
//! tickfsm drives discrete-state control loops on small systems. An
//! application declares a fixed number of states, a table of
//! `(state, event) -> state` rules and entry/do/exit hooks; the engine then
//! polls its event sources once per tick and dispatches the hooks.
//!
//! # Core Concepts
//!
//! - **States**: plain indices `0..N` ([`StateId`]), optionally named with
//!   the [`states!`] macro
//! - **Events**: buttons, timeouts, custom payloads and the `NO_EVENT`
//!   sentinel that drives automatic transitions ([`Event`])
//! - **Sources**: inputs polled once per tick ([`sources::EventSource`])
//! - **Hooks**: application callbacks ([`engine::StateHooks`]) or one
//!   behaviour object per state ([`engine::StateSet`])
//! - **Forced transitions**: `goto_state` from inside `on_do`, bypassing
//!   the table
//!
//! # Example
//!
//! ```rust
//! use std::convert::Infallible;
//! use tickfsm::builder::MachineBuilder;
//! use tickfsm::core::{Event, StateId};
//! use tickfsm::engine::{Context, StateHooks};
//! use tickfsm::sources::ScriptedSource;
//!
//! #[derive(Default)]
//! struct Doorbell {
//!     rings: u32,
//! }
//!
//! impl StateHooks for Doorbell {
//!     type Error = Infallible;
//!
//!     fn on_enter(&mut self, _ctx: &mut Context, state: StateId, _event: &Event) -> Result<(), Infallible> {
//!         if state == StateId::new(1) {
//!             self.rings += 1;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut machine = MachineBuilder::new(2)
//!     .transition(0, [Event::BTN1_PRESS], 1)
//!     .transition(1, [Event::NO_EVENT], 0)
//!     .source(ScriptedSource::new([Event::BTN1_PRESS]))
//!     .build(Doorbell::default())
//!     .unwrap();
//!
//! machine.evaluate_once().unwrap(); // ring
//! machine.evaluate_once().unwrap(); // back to idle
//! assert_eq!(machine.current_state(), StateId::new(0));
//! assert_eq!(machine.hooks().rings, 1);
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod fire_alarm;
pub mod sources;

// Re-export commonly used types
pub use builder::{ConfigError, EngineConfig, MachineBuilder, MachineConfig};
pub use self::core::{Event, StateId, TransitionTable};
pub use engine::{Context, MachineError, StateHooks, StateMachine, TickReport};
pub use sources::{EventSource, SourceError};
