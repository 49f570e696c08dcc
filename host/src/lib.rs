//! Host-chain collaborator traits for the Agora engine.
//!
//! The engine never talks to the chain directly. Everything it needs from
//! the outside world goes through these traits:
//! - [`Authorizer`]: does the current transaction carry an account's authority
//! - [`TokenLedger`]: balance lookups and transfers of the governance token
//! - [`ChainClock`]: the current chain timestamp
//!
//! Test and in-memory implementations live in `agora-nullables`.

pub mod auth;
pub mod clock;
pub mod error;
pub mod ledger;

pub use auth::{require_auth, Authorizer, SignerSet};
pub use clock::{ChainClock, SystemClock};
pub use error::HostError;
pub use ledger::TokenLedger;
