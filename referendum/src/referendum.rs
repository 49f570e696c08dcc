//! Referendum records and their vote tally.

use crate::outcome::Outcome;
use agora_types::{AccountName, ProposalId, ReferendumId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lifecycle of a referendum.
///
/// `Created -> Started -> (Hold <-> Started) -> Accepted | Rejected`.
/// `Created` only exists inside `open`; callers always see `Started` or later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferendumStatus {
    Created,
    Started,
    Hold,
    /// Terminal.
    Accepted,
    /// Terminal.
    Rejected,
}

impl ReferendumStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Started => "started",
            Self::Hold => "hold",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl From<Outcome> for ReferendumStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Accepted => Self::Accepted,
            Outcome::Rejected => Self::Rejected,
        }
    }
}

impl fmt::Display for ReferendumStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A voter's choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Favour,
    Against,
    Abstain,
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Favour => f.write_str("favour"),
            Self::Against => f.write_str("against"),
            Self::Abstain => f.write_str("abstain"),
        }
    }
}

/// Vote counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub favour: u64,
    pub against: u64,
    pub abstain: u64,
}

impl Tally {
    pub fn record(&mut self, choice: VoteChoice) {
        let counter = match choice {
            VoteChoice::Favour => &mut self.favour,
            VoteChoice::Against => &mut self.against,
            VoteChoice::Abstain => &mut self.abstain,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn total(&self) -> u64 {
        self.favour
            .saturating_add(self.against)
            .saturating_add(self.abstain)
    }

    /// Favour must strictly beat against; ties and empty tallies reject.
    pub fn outcome(&self) -> Outcome {
        if self.favour > self.against {
            Outcome::Accepted
        } else {
            Outcome::Rejected
        }
    }
}

/// A referendum on one phase of one proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Referendum {
    pub id: ReferendumId,
    pub proposal_id: ProposalId,
    pub status: ReferendumStatus,
    pub tally: Tally,
    /// One entry per voter; guards against double voting.
    pub votes: BTreeMap<AccountName, VoteChoice>,
    /// Votes are accepted while `now < deadline`.
    pub deadline: Timestamp,
    pub opened_at: Timestamp,
    pub finished_at: Option<Timestamp>,
}

impl Referendum {
    pub(crate) fn new(
        id: ReferendumId,
        proposal_id: ProposalId,
        deadline: Timestamp,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            proposal_id,
            status: ReferendumStatus::Created,
            tally: Tally::default(),
            votes: BTreeMap::new(),
            deadline,
            opened_at: now,
            finished_at: None,
        }
    }

    pub fn has_voted(&self, voter: &AccountName) -> bool {
        self.votes.contains_key(voter)
    }

    pub fn vote_of(&self, voter: &AccountName) -> Option<VoteChoice> {
        self.votes.get(voter).copied()
    }
}
