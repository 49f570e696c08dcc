use agora_host::HostError;
use agora_types::{AccountName, ReferendumId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReferendumError {
    #[error(transparent)]
    Authorization(#[from] HostError),

    #[error("referendum {0} not found")]
    NotFound(ReferendumId),

    #[error("{voter} has already voted on referendum {referendum_id}")]
    AlreadyVoted {
        referendum_id: ReferendumId,
        voter: AccountName,
    },

    #[error("referendum {0} is closed for voting")]
    ReferendumClosed(ReferendumId),

    #[error("referendum {0} is on hold")]
    ReferendumOnHold(ReferendumId),

    #[error("referendum {0} is already finished")]
    AlreadyFinished(ReferendumId),

    #[error("referendum {referendum_id} cannot go from {from} to {to}")]
    InvalidTransition {
        referendum_id: ReferendumId,
        from: &'static str,
        to: &'static str,
    },

    #[error("{0} holds no stake in the governance token")]
    InsufficientBalance(AccountName),

    #[error("referendum id space exhausted")]
    IdOverflow,
}
