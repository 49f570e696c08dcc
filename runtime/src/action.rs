//! Actions accepted by the runtime and their receipts.

use crate::error::RuntimeError;
use agora_governance::{MoveReceipt, NewProposal, ProposalUpdate};
use agora_host::SignerSet;
use agora_referendum::{Outcome, VoteChoice};
use agora_settings::{ParamValue, PhaseEntry};
use agora_types::{AccountName, ProposalId, ProposalType, ReferendumId};
use serde::{Deserialize, Serialize};

/// One governance action, tagged by name on the wire:
/// `{"action": "move", "proposal_id": 3}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    /// Replace the default phase schedule of a proposal type.
    #[serde(rename = "setpconfig")]
    SetPhaseConfig {
        proposal_type: ProposalType,
        phases: Vec<PhaseEntry>,
    },
    /// Set a scoped general parameter.
    #[serde(rename = "setgparam")]
    SetGeneralParam {
        scope: String,
        setting: String,
        value: ParamValue,
    },
    Create(NewProposal),
    Update {
        proposal_id: ProposalId,
        #[serde(default)]
        changes: ProposalUpdate,
    },
    Move {
        proposal_id: ProposalId,
    },
    Vote {
        referendum_id: ReferendumId,
        voter: AccountName,
        choice: VoteChoice,
    },
    Finish {
        referendum_id: ReferendumId,
    },
    Hold {
        referendum_id: ReferendumId,
    },
    Resume {
        referendum_id: ReferendumId,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetPhaseConfig { .. } => "setpconfig",
            Self::SetGeneralParam { .. } => "setgparam",
            Self::Create(_) => "create",
            Self::Update { .. } => "update",
            Self::Move { .. } => "move",
            Self::Vote { .. } => "vote",
            Self::Finish { .. } => "finish",
            Self::Hold { .. } => "hold",
            Self::Resume { .. } => "resume",
        }
    }

    pub fn from_json(json: &str) -> Result<Self, RuntimeError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An action together with the accounts that signed it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    pub signers: SignerSet,
    pub action: Action,
}

impl Transaction {
    pub fn new(signers: SignerSet, action: Action) -> Self {
        Self { signers, action }
    }

    /// Shorthand for a transaction signed by one account.
    pub fn signed_by(signer: impl Into<AccountName>, action: Action) -> Self {
        Self::new(SignerSet::single(signer), action)
    }
}

/// What a successful action did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionReceipt {
    Configured,
    Created(ProposalId),
    Updated(ProposalId),
    Moved(MoveReceipt),
    Voted(ReferendumId),
    Finished {
        referendum_id: ReferendumId,
        outcome: Outcome,
    },
    Held(ReferendumId),
    Resumed(ReferendumId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_governance::ProposalKind;
    use agora_settings::PhaseType;

    #[test]
    fn parses_create() {
        let action = Action::from_json(
            r#"{
                "action": "create",
                "creator": "alice",
                "title": "Community garden",
                "kind": {"main": {"budget": "100.0000 EOS"}}
            }"#,
        )
        .unwrap();
        let Action::Create(request) = action else {
            panic!("expected create, got {action:?}");
        };
        assert_eq!(request.creator.as_str(), "alice");
        assert_eq!(request.kind.proposal_type(), ProposalType::Main);
        assert!(matches!(request.kind, ProposalKind::Main { .. }));
    }

    #[test]
    fn parses_setpconfig() {
        let action = Action::from_json(
            r#"{
                "action": "setpconfig",
                "proposal_type": "main",
                "phases": [
                    {"name": "discussion", "duration_days": 7, "type": "draft"},
                    {"name": "voting", "duration_days": 7, "type": "voting"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            action,
            Action::SetPhaseConfig {
                proposal_type: ProposalType::Main,
                phases: vec![
                    PhaseEntry::new("discussion", 7, PhaseType::Draft),
                    PhaseEntry::new("voting", 7, PhaseType::Voting),
                ],
            }
        );
        assert_eq!(action.name(), "setpconfig");
    }

    #[test]
    fn parses_vote_and_update() {
        let vote = Action::from_json(
            r#"{"action": "vote", "referendum_id": 1, "voter": "bob", "choice": "favour"}"#,
        )
        .unwrap();
        assert_eq!(
            vote,
            Action::Vote {
                referendum_id: ReferendumId::new(1),
                voter: AccountName::new("bob"),
                choice: VoteChoice::Favour,
            }
        );

        let update = Action::from_json(
            r#"{"action": "update", "proposal_id": 2, "changes": {"title": "New"}}"#,
        )
        .unwrap();
        let Action::Update { changes, .. } = update else {
            panic!("expected update");
        };
        assert_eq!(changes.title.as_deref(), Some("New"));
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(matches!(
            Action::from_json(r#"{"action": "delete", "proposal_id": 1}"#),
            Err(RuntimeError::InvalidAction(_))
        ));
    }
}
