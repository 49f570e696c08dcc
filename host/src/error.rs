use agora_types::AccountName;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("missing authority of {0}")]
    MissingAuthority(AccountName),

    #[error("overdrawn balance: {account} cannot transfer {quantity}")]
    Overdrawn { account: AccountName, quantity: String },

    #[error("ledger error: {0}")]
    Ledger(String),
}
