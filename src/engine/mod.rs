//! The runtime: evaluation cycle, hook dispatch and driver loop.
//!
//! # Evaluation cycle
//!
//! 1. Poll every source in registration order; the first concrete event
//!    wins, otherwise the tick's event is `NO_EVENT`.
//! 2. Look up `(current, event)` in the transition table.
//! 3. On a match with a different destination: `on_exit(current, event)`,
//!    switch state, `on_enter(destination, event)`.
//! 4. Always `on_do(current)`, exactly once.
//! 5. If `on_do` called `goto_state`: `on_exit(current, FORCED)`, switch,
//!    `on_enter(target, FORCED)`.
//!
//! Forced transitions are an escape hatch for conditions naturally checked
//! inside `on_do` (a sensor crossing a threshold). They bypass the table, so
//! the table alone does not describe every reachable edge.

mod behavior;
mod error;
mod hooks;
mod machine;

pub use behavior::{StateBehavior, StateSet};
pub use error::{Hook, MachineError, UsageError};
pub use hooks::{Context, StateHooks};
pub use machine::{StateMachine, TickReport};
