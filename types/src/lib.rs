//! Fundamental types for the Agora governance engine.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account names, token assets, timestamps, record identifiers, and the closed
//! set of proposal types.

pub mod account;
pub mod asset;
pub mod error;
pub mod ids;
pub mod kind;
pub mod time;

pub use account::AccountName;
pub use asset::{Asset, Symbol};
pub use error::TypesError;
pub use ids::{ProposalId, ReferendumId};
pub use kind::ProposalType;
pub use time::{Timestamp, SECS_PER_DAY};
