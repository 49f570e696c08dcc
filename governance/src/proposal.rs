//! Governance proposals and their lifecycle.

use agora_referendum::Outcome;
use agora_settings::PhaseEntry;
use agora_types::{AccountName, Asset, ProposalId, ProposalType, ReferendumId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a proposal stands. Everything except `Open` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Open,
    /// The final referendum accepted the proposal.
    Accepted,
    /// A referendum rejected the proposal.
    Rejected,
    /// Reached the last phase without a final vote.
    Completed,
}

impl ProposalStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Open)
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type of a proposal together with the attributes only that type carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalKind {
    /// A standalone proposal requesting a budget.
    #[serde(rename = "main")]
    Main { budget: Asset },
    /// Amends a parent proposal, possibly with a new budget.
    #[serde(rename = "amendment")]
    Amendment { budget: Asset },
    /// Asks to extend the debate of a parent proposal by `days`.
    #[serde(rename = "extenddebate")]
    ExtendDebate { days: u32 },
    /// Asks to shorten the debate of a parent proposal by `days`.
    #[serde(rename = "shortndebate")]
    ShortenDebate { days: u32 },
}

impl ProposalKind {
    pub fn proposal_type(&self) -> ProposalType {
        match self {
            Self::Main { .. } => ProposalType::Main,
            Self::Amendment { .. } => ProposalType::Amendment,
            Self::ExtendDebate { .. } => ProposalType::ExtendDebate,
            Self::ShortenDebate { .. } => ProposalType::ShortenDebate,
        }
    }

    pub fn budget(&self) -> Option<&Asset> {
        match self {
            Self::Main { budget } | Self::Amendment { budget } => Some(budget),
            _ => None,
        }
    }

    pub fn days(&self) -> Option<u32> {
        match self {
            Self::ExtendDebate { days } | Self::ShortenDebate { days } => Some(*days),
            _ => None,
        }
    }
}

/// A governance proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub creator: AccountName,
    pub title: String,
    pub description: String,
    pub kpi: String,
    pub kind: ProposalKind,
    /// Target proposal for amendments and debate changes.
    pub parent: Option<ProposalId>,
    /// Schedule captured from the settings at creation time.
    pub phases: Vec<PhaseEntry>,
    /// Always a valid index into `phases`.
    pub current_phase: usize,
    /// When the current phase may be left.
    pub deadline: Timestamp,
    pub status: ProposalStatus,
    /// Referendum of the current phase that has not reported yet.
    pub pending_referendum: Option<ReferendumId>,
    /// Every referendum opened for this proposal with its outcome once known.
    pub referendums: Vec<(ReferendumId, Option<Outcome>)>,
    pub created_at: Timestamp,
    pub closed_at: Option<Timestamp>,
}

impl Proposal {
    pub fn proposal_type(&self) -> ProposalType {
        self.kind.proposal_type()
    }

    pub fn current(&self) -> &PhaseEntry {
        &self.phases[self.current_phase]
    }

    pub fn is_open(&self) -> bool {
        self.status == ProposalStatus::Open
    }

    /// The first phase is the discussion phase, the only one allowing edits.
    pub fn in_discussion(&self) -> bool {
        self.current_phase == 0
    }

    pub fn on_last_phase(&self) -> bool {
        self.current_phase + 1 == self.phases.len()
    }
}

/// Everything a proposer supplies to `create`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProposal {
    pub creator: AccountName,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kpi: String,
    /// Deadline of the discussion phase. Defaults to now plus the phase duration.
    #[serde(default)]
    pub deadline: Option<Timestamp>,
    #[serde(default)]
    pub parent: Option<ProposalId>,
    pub kind: ProposalKind,
}

/// Field changes accepted by `update`. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub kpi: Option<String>,
    #[serde(default)]
    pub deadline: Option<Timestamp>,
    /// Replacement attributes; must keep the proposal's type.
    #[serde(default)]
    pub kind: Option<ProposalKind>,
}

impl ProposalUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.kpi.is_none()
            && self.deadline.is_none()
            && self.kind.is_none()
    }
}
