//! The closed set of proposal types.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of governance proposal. Each type has its own phase schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProposalType {
    #[serde(rename = "main")]
    Main,
    #[serde(rename = "amendment")]
    Amendment,
    #[serde(rename = "extenddebate")]
    ExtendDebate,
    #[serde(rename = "shortndebate")]
    ShortenDebate,
}

impl ProposalType {
    pub const ALL: [ProposalType; 4] = [
        ProposalType::Main,
        ProposalType::Amendment,
        ProposalType::ExtendDebate,
        ProposalType::ShortenDebate,
    ];

    /// On-chain name of this type. Also used as the parameter scope for the type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Amendment => "amendment",
            Self::ExtendDebate => "extenddebate",
            Self::ShortenDebate => "shortndebate",
        }
    }

    /// Whether proposals of this type must reference a parent proposal.
    pub fn requires_parent(&self) -> bool {
        !matches!(self, Self::Main)
    }
}

impl fmt::Display for ProposalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProposalType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| TypesError::UnknownProposalType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for t in ProposalType::ALL {
            assert_eq!(t.name().parse::<ProposalType>().unwrap(), t);
        }
        assert!("budget".parse::<ProposalType>().is_err());
    }

    #[test]
    fn only_main_stands_alone() {
        assert!(!ProposalType::Main.requires_parent());
        assert!(ProposalType::Amendment.requires_parent());
        assert!(ProposalType::ExtendDebate.requires_parent());
        assert!(ProposalType::ShortenDebate.requires_parent());
    }
}
