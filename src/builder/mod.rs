//! Configuration API: fluent builder, declarative config and the
//! `states!` macro.
//!
//! Everything here runs before the first tick. Mistakes are reported as
//! [`ConfigError`] so a machine never starts actuating outputs with a
//! broken table.

pub mod config;
pub mod error;
pub mod machine;
pub mod macros;

pub use config::{EngineConfig, MachineConfig, RuleConfig};
pub use error::ConfigError;
pub use machine::MachineBuilder;
