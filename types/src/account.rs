//! Account names as used by the host chain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A host-chain account name (e.g. `alice`, `testproposal`).
///
/// Names follow the chain's naming rules: 1 to 12 characters drawn from
/// `a-z`, `1-5` and `.`. Construction does not validate; call
/// [`AccountName::is_valid`] at the boundaries where untrusted input enters.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountName(String);

impl AccountName {
    /// Maximum length of an account name.
    pub const MAX_LEN: usize = 12;

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw name string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this name is well-formed.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
            && self.0.len() <= Self::MAX_LEN
            && !self.0.ends_with('.')
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_lowercase() || ('1'..='5').contains(&c) || c == '.')
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AccountName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
