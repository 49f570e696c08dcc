//! Nullable infrastructure for deterministic testing.
//!
//! All host-chain collaborators (clock, token ledger) are abstracted behind
//! traits in `agora-host`. This crate provides in-memory implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests, or run the
//! daemon against a genesis ledger.

pub mod clock;
pub mod ledger;

pub use clock::NullClock;
pub use ledger::NullLedger;
