//! Scoped general parameters.

use agora_types::Asset;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Setting name of the minimum stake needed to create a proposal.
pub const MIN_STAKE: &str = "minstake";

/// Scope consulted when a proposal type has no scope-specific value.
pub const GLOBAL_SCOPE: &str = "global";

/// Key of a general parameter: `(scope, setting)`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParamKey {
    pub scope: String,
    pub setting: String,
}

impl ParamKey {
    pub fn new(scope: impl Into<String>, setting: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            setting: setting.into(),
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scope, self.setting)
    }
}

/// A scalar parameter value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamValue {
    Asset(Asset),
    Integer(i64),
    Name(String),
}

impl ParamValue {
    pub fn as_asset(&self) -> Option<&Asset> {
        match self {
            Self::Asset(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset(a) => write!(f, "{a}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Name(n) => f.write_str(n),
        }
    }
}
