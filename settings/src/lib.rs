//! Configuration store for the governance engine.
//!
//! Holds the default phase schedule of every proposal type and a table of
//! scoped general parameters (the minimum stake, among others). Mutations
//! require the administrator's authority; reads are plain lookups.
//!
//! Schedules are handed out by value: a proposal copies its schedule at
//! creation, so re-configuring a type never touches existing proposals.

pub mod error;
pub mod params;
pub mod phase;
pub mod store;

pub use error::SettingsError;
pub use params::{ParamKey, ParamValue, GLOBAL_SCOPE, MIN_STAKE};
pub use phase::{PhaseEntry, PhaseType};
pub use store::SettingsStore;
