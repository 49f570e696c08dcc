//! Proposal lifecycle engine.
//!
//! Proposals walk through the phase schedule configured for their type,
//! captured at creation time:
//!
//! 1. **Creation** is gated by the creator's authority and a minimum stake
//!    held in the governance token.
//! 2. **Discussion** (always the first phase): the creator may still edit.
//! 3. **Advancement** (`move`) is allowed once the phase deadline has passed.
//!    Entering a voting phase opens a referendum.
//! 4. **Resolution**: the referendum reports back; a rejection closes the
//!    proposal, an acceptance on the last phase accepts it. Reaching the last
//!    phase without a vote completes it.
//!
//! Terminal statuses are final: nothing about a closed proposal changes.

pub mod error;
pub mod phase;
pub mod proposal;
pub mod registry;

pub use error::GovernanceError;
pub use phase::{next_phase, NoNextPhase, PhaseTransition};
pub use proposal::{NewProposal, Proposal, ProposalKind, ProposalStatus, ProposalUpdate};
pub use registry::{MoveReceipt, ProposalRegistry, ReferendumOpener, RegistrySink};
