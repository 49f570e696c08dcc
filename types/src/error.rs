//! Errors raised while parsing or combining the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid asset string: {0}")]
    InvalidAsset(String),

    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("symbol mismatch: {left} vs {right}")]
    SymbolMismatch { left: String, right: String },

    #[error("asset amount overflow")]
    Overflow,

    #[error("unknown proposal type: {0}")]
    UnknownProposalType(String),
}
