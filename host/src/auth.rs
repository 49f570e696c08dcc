//! Transaction authority checks.

use crate::HostError;
use agora_types::AccountName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Answers "does the current transaction carry the authority of this account".
pub trait Authorizer {
    fn has_auth(&self, account: &AccountName) -> bool;
}

/// Fail with [`HostError::MissingAuthority`] unless `account` signed.
pub fn require_auth(auth: &dyn Authorizer, account: &AccountName) -> Result<(), HostError> {
    if auth.has_auth(account) {
        Ok(())
    } else {
        Err(HostError::MissingAuthority(account.clone()))
    }
}

/// The set of accounts that signed a transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerSet {
    signers: BTreeSet<AccountName>,
}

impl SignerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A signer set holding exactly one account.
    pub fn single(account: impl Into<AccountName>) -> Self {
        let mut set = Self::new();
        set.insert(account.into());
        set
    }

    pub fn insert(&mut self, account: AccountName) {
        self.signers.insert(account);
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccountName> {
        self.signers.iter()
    }
}

impl Authorizer for SignerSet {
    fn has_auth(&self, account: &AccountName) -> bool {
        self.signers.contains(account)
    }
}

impl FromIterator<AccountName> for SignerSet {
    fn from_iter<I: IntoIterator<Item = AccountName>>(iter: I) -> Self {
        Self {
            signers: iter.into_iter().collect(),
        }
    }
}
