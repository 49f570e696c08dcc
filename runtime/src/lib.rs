//! Runtime for the Agora governance engine.
//!
//! Ties the configuration store, proposal registry and referendum board
//! together behind a single [`Runtime::execute`] entry point. Every action
//! runs against a snapshot of [`GovernanceState`]; a failing action leaves no
//! trace.

pub mod action;
pub mod config;
pub mod error;
pub mod runtime;
pub mod state;

pub use action::{Action, ActionReceipt, Transaction};
pub use config::{GenesisBalance, GenesisConfig, GenesisParam, GenesisSchedule, RuntimeConfig};
pub use error::RuntimeError;
pub use runtime::Runtime;
pub use state::GovernanceState;
