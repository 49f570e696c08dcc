//! Fungible token ledger trait.

use crate::HostError;
use agora_types::{AccountName, Asset, Symbol};

/// The token ledger the engine consults for stake checks.
///
/// Implementations hold one balance record per (account, symbol).
pub trait TokenLedger {
    /// Balance of `account` in `symbol`, or `None` when the account has no
    /// balance record at all (distinct from a zero balance).
    fn balance_of(&self, account: &AccountName, symbol: &Symbol)
        -> Result<Option<Asset>, HostError>;

    /// Move `quantity` from `from` to `to`.
    fn transfer(
        &self,
        from: &AccountName,
        to: &AccountName,
        quantity: &Asset,
        memo: &str,
    ) -> Result<(), HostError>;
}
