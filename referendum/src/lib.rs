//! Referendums attached to governance proposals.
//!
//! A referendum is opened when a proposal enters a voting phase. Token
//! holders cast one vote each (favour, against, or abstain). The proposals
//! contract finishes the referendum, which fixes the outcome and reports it
//! back to the owning proposal through an [`OutcomeSink`].
//!
//! Outcome rule: simple plurality of favour over against. Abstentions are
//! recorded but count for neither side, and a tie rejects.

pub mod board;
pub mod error;
pub mod outcome;
pub mod referendum;

pub use board::ReferendumBoard;
pub use error::ReferendumError;
pub use outcome::{Outcome, OutcomeSink};
pub use referendum::{Referendum, ReferendumStatus, Tally, VoteChoice};
