use agora_host::HostError;
use agora_referendum::ReferendumError;
use agora_settings::SettingsError;
use agora_types::{AccountName, Asset, ProposalId, ReferendumId, Timestamp};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    #[error(transparent)]
    Authorization(#[from] HostError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Referendum(#[from] ReferendumError),

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("no {symbol} balance found for {account}")]
    InsufficientBalance { account: AccountName, symbol: String },

    #[error("balance {balance} is below the minimum stake of {minimum}")]
    BelowMinimumStake { balance: Asset, minimum: Asset },

    #[error("proposal {proposal_id} can only be updated in its discussion phase, not in {phase}")]
    WrongPhase { proposal_id: ProposalId, phase: String },

    #[error("proposal {proposal_id} cannot move before its deadline {deadline} (now {now})")]
    DeadlineNotReached {
        proposal_id: ProposalId,
        deadline: Timestamp,
        now: Timestamp,
    },

    #[error("proposal {0} has no next phase")]
    NoNextPhase(ProposalId),

    #[error("proposal {proposal_id} is waiting for referendum {referendum_id} to finish")]
    ReferendumPending {
        proposal_id: ProposalId,
        referendum_id: ReferendumId,
    },

    #[error("invalid parent: {0}")]
    InvalidParent(String),

    #[error("invalid update: {0}")]
    InvalidUpdate(String),

    #[error("proposal id space exhausted")]
    IdOverflow,
}
