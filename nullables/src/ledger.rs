//! Nullable token ledger backed by an in-memory balance table.

use agora_host::{HostError, TokenLedger};
use agora_types::{AccountName, Asset, Symbol};
use std::cell::RefCell;
use std::collections::HashMap;

/// An in-memory token ledger.
///
/// Accounts without a record report `None` from `balance_of`, exactly like a
/// token contract with no row for the account.
#[derive(Default)]
pub struct NullLedger {
    balances: RefCell<HashMap<(AccountName, Symbol), i64>>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper: create a balance record.
    pub fn with_balance(self, account: impl Into<AccountName>, balance: Asset) -> Self {
        self.set_balance(account, balance);
        self
    }

    /// Create or overwrite the balance record of an account.
    pub fn set_balance(&self, account: impl Into<AccountName>, balance: Asset) {
        self.balances
            .borrow_mut()
            .insert((account.into(), balance.symbol().clone()), balance.amount());
    }

    /// Remove an account's balance record entirely.
    pub fn remove_balance(&self, account: &AccountName, symbol: &Symbol) {
        self.balances
            .borrow_mut()
            .remove(&(account.clone(), symbol.clone()));
    }
}

impl TokenLedger for NullLedger {
    fn balance_of(
        &self,
        account: &AccountName,
        symbol: &Symbol,
    ) -> Result<Option<Asset>, HostError> {
        Ok(self
            .balances
            .borrow()
            .get(&(account.clone(), symbol.clone()))
            .map(|amount| Asset::new(*amount, symbol.clone())))
    }

    fn transfer(
        &self,
        from: &AccountName,
        to: &AccountName,
        quantity: &Asset,
        _memo: &str,
    ) -> Result<(), HostError> {
        let overdrawn = || HostError::Overdrawn {
            account: from.clone(),
            quantity: quantity.to_string(),
        };
        let symbol = quantity.symbol();
        let mut balances = self.balances.borrow_mut();
        let from_key = (from.clone(), symbol.clone());
        let remaining = balances
            .get(&from_key)
            .and_then(|available| available.checked_sub(quantity.amount()))
            .filter(|r| quantity.is_positive() && *r >= 0)
            .ok_or_else(overdrawn)?;
        let to_key = (to.clone(), symbol.clone());
        let credited = balances
            .get(&to_key)
            .map_or(Some(quantity.amount()), |b| b.checked_add(quantity.amount()))
            .ok_or_else(overdrawn)?;
        balances.insert(from_key, remaining);
        balances.insert(to_key, credited);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eos(amount: i64) -> Asset {
        Asset::new(amount, Symbol::new("EOS", 4))
    }

    fn acct(name: &str) -> AccountName {
        AccountName::new(name)
    }

    #[test]
    fn missing_record_is_none_not_zero() {
        let ledger = NullLedger::new().with_balance("alice", eos(0));
        let symbol = Symbol::new("EOS", 4);
        assert_eq!(ledger.balance_of(&acct("alice"), &symbol).unwrap(), Some(eos(0)));
        assert_eq!(ledger.balance_of(&acct("bob"), &symbol).unwrap(), None);
    }

    #[test]
    fn transfer_moves_funds() {
        let ledger = NullLedger::new().with_balance("alice", eos(100));
        ledger
            .transfer(&acct("alice"), &acct("bob"), &eos(40), "stake")
            .unwrap();

        let symbol = Symbol::new("EOS", 4);
        assert_eq!(ledger.balance_of(&acct("alice"), &symbol).unwrap(), Some(eos(60)));
        assert_eq!(ledger.balance_of(&acct("bob"), &symbol).unwrap(), Some(eos(40)));
    }

    #[test]
    fn overdraw_is_rejected_without_side_effects() {
        let ledger = NullLedger::new().with_balance("alice", eos(10));
        let err = ledger
            .transfer(&acct("alice"), &acct("bob"), &eos(11), "")
            .unwrap_err();
        assert!(matches!(err, HostError::Overdrawn { .. }));

        let symbol = Symbol::new("EOS", 4);
        assert_eq!(ledger.balance_of(&acct("alice"), &symbol).unwrap(), Some(eos(10)));
        assert_eq!(ledger.balance_of(&acct("bob"), &symbol).unwrap(), None);
    }

    #[test]
    fn remove_balance_drops_record() {
        let ledger = NullLedger::new().with_balance("alice", eos(10));
        let symbol = Symbol::new("EOS", 4);
        ledger.remove_balance(&acct("alice"), &symbol);
        assert_eq!(ledger.balance_of(&acct("alice"), &symbol).unwrap(), None);
    }
}
