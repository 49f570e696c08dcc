//! Outcome reporting back to the proposal side.

use agora_types::{ProposalId, ReferendumId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Final result of a referendum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Accepted,
    Rejected,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => f.write_str("accepted"),
            Self::Rejected => f.write_str("rejected"),
        }
    }
}

/// Receiver of finished referendums.
///
/// The proposal registry implements this; the board calls it exactly once
/// per referendum, inside the same action that finishes it. Implementations
/// must not fail: a report that no longer applies is simply ignored.
pub trait OutcomeSink {
    fn referendum_finished(
        &mut self,
        proposal_id: ProposalId,
        referendum_id: ReferendumId,
        outcome: Outcome,
    );
}
