//! Core data model: states, events, the transition table and history.
//!
//! Nothing in this module performs side effects; the engine in
//! [`crate::engine`] is the only place hooks and sources are invoked.

mod event;
mod history;
mod state;
mod table;

pub use event::{CustomEvent, Event};
pub use history::{TransitionHistory, TransitionRecord, DEFAULT_HISTORY_CAPACITY};
pub use state::StateId;
pub use table::{Rule, TransitionTable};
