//! The complete persisted governance state.

use crate::error::RuntimeError;
use agora_governance::ProposalRegistry;
use agora_referendum::ReferendumBoard;
use agora_settings::SettingsStore;
use agora_types::{AccountName, Symbol};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings, proposals and referendums, owned together so a single clone
/// captures everything an action may touch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceState {
    pub settings: SettingsStore,
    pub proposals: ProposalRegistry,
    pub referendums: ReferendumBoard,
}

impl GovernanceState {
    /// Empty state. `admin` configures the engine; `proposals_account`
    /// finishes, holds and resumes referendums.
    pub fn new(admin: AccountName, proposals_account: AccountName, token: Symbol) -> Self {
        Self {
            settings: SettingsStore::new(admin, token.clone()),
            proposals: ProposalRegistry::new(),
            referendums: ReferendumBoard::new(proposals_account, token),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, RuntimeError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RuntimeError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Write a snapshot to `path`, replacing any previous one.
    pub fn save(&self, path: &Path) -> Result<(), RuntimeError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, path)?;
        tracing::debug!(path = %path.display(), "state snapshot written");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, RuntimeError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_governance::{NewProposal, ProposalKind};
    use agora_host::SignerSet;
    use agora_nullables::NullLedger;
    use agora_settings::{ParamValue, PhaseEntry, PhaseType, GLOBAL_SCOPE, MIN_STAKE};
    use agora_types::{Asset, ProposalId, ProposalType, Timestamp};

    fn eos(amount: i64) -> Asset {
        Asset::new(amount, Symbol::new("EOS", 4))
    }

    fn populated() -> GovernanceState {
        let mut state = GovernanceState::new(
            AccountName::new("eosio"),
            AccountName::new("proposals"),
            Symbol::new("EOS", 4),
        );
        let admin = SignerSet::single("eosio");
        state
            .settings
            .set_phase_schedule(
                &admin,
                ProposalType::Main,
                vec![
                    PhaseEntry::new("discussion", 0, PhaseType::Draft),
                    PhaseEntry::new("voting", 7, PhaseType::Voting),
                ],
            )
            .unwrap();
        state
            .settings
            .set_general_param(&admin, GLOBAL_SCOPE, MIN_STAKE, ParamValue::Asset(eos(1)))
            .unwrap();
        let ledger = NullLedger::new().with_balance("alice", eos(50));
        let id = state
            .proposals
            .create(
                &SignerSet::single("alice"),
                &ledger,
                &state.settings,
                NewProposal {
                    creator: AccountName::new("alice"),
                    title: "Snapshot me".to_string(),
                    description: String::new(),
                    kpi: String::new(),
                    deadline: None,
                    parent: None,
                    kind: ProposalKind::Main { budget: eos(5) },
                },
                Timestamp::new(100),
            )
            .unwrap();
        state
            .proposals
            .move_proposal(
                &SignerSet::single("alice"),
                &mut state.referendums,
                id,
                Timestamp::new(100),
            )
            .unwrap();
        state
    }

    #[test]
    fn snapshot_restores_everything() {
        let state = populated();
        let restored = GovernanceState::from_bytes(&state.to_bytes().unwrap()).unwrap();

        let proposal = restored.proposals.get(ProposalId::FIRST).unwrap();
        assert_eq!(proposal.title, "Snapshot me");
        assert_eq!(proposal.current().name, "voting");
        assert_eq!(proposal.kind.budget(), Some(&eos(5)));
        assert_eq!(restored.referendums.len(), 1);
        assert_eq!(
            restored.settings.asset_param(GLOBAL_SCOPE, MIN_STAKE).unwrap(),
            &eos(1)
        );
        assert_eq!(restored.referendums.finisher().as_str(), "proposals");
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.bin");
        populated().save(&path).unwrap();

        let loaded = GovernanceState::load(&path).unwrap();
        assert_eq!(loaded.proposals.len(), 1);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            GovernanceState::from_bytes(&[0xff, 0x01]),
            Err(RuntimeError::Snapshot(_))
        ));
    }
}
