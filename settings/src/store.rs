//! The configuration store.

use crate::error::SettingsError;
use crate::params::{ParamKey, ParamValue, GLOBAL_SCOPE, MIN_STAKE};
use crate::phase::{validate_schedule, PhaseEntry};
use agora_host::{require_auth, Authorizer};
use agora_types::{AccountName, Asset, ProposalType, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-type phase schedules and scoped general parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettingsStore {
    /// The only account allowed to change settings.
    admin: AccountName,
    /// Governance token; stake parameters must be denominated in it.
    token: Symbol,
    schedules: BTreeMap<ProposalType, Vec<PhaseEntry>>,
    params: BTreeMap<ParamKey, ParamValue>,
}

impl SettingsStore {
    pub fn new(admin: AccountName, token: Symbol) -> Self {
        Self {
            admin,
            token,
            schedules: BTreeMap::new(),
            params: BTreeMap::new(),
        }
    }

    pub fn admin(&self) -> &AccountName {
        &self.admin
    }

    pub fn token(&self) -> &Symbol {
        &self.token
    }

    /// Replace the default schedule for `proposal_type`.
    ///
    /// Only affects proposals created afterwards.
    pub fn set_phase_schedule(
        &mut self,
        auth: &dyn Authorizer,
        proposal_type: ProposalType,
        phases: Vec<PhaseEntry>,
    ) -> Result<(), SettingsError> {
        require_auth(auth, &self.admin)?;
        validate_schedule(&phases).map_err(SettingsError::InvalidSchedule)?;

        tracing::info!(
            proposal_type = %proposal_type,
            phases = phases.len(),
            "phase schedule set"
        );
        self.schedules.insert(proposal_type, phases);
        Ok(())
    }

    /// Insert or overwrite a general parameter.
    ///
    /// `minstake` must be an asset in the governance token, with its precision.
    pub fn set_general_param(
        &mut self,
        auth: &dyn Authorizer,
        scope: &str,
        setting: &str,
        value: ParamValue,
    ) -> Result<(), SettingsError> {
        require_auth(auth, &self.admin)?;
        if setting == MIN_STAKE && !value.as_asset().is_some_and(|a| a.symbol() == &self.token) {
            return Err(SettingsError::InvalidParam {
                scope: scope.to_string(),
                setting: setting.to_string(),
                expected: "an asset in the governance token",
            });
        }

        tracing::info!(scope, setting, value = %value, "general parameter set");
        self.params.insert(ParamKey::new(scope, setting), value);
        Ok(())
    }

    /// The current default schedule of a type.
    pub fn phase_schedule(&self, proposal_type: ProposalType) -> Result<&[PhaseEntry], SettingsError> {
        self.schedules
            .get(&proposal_type)
            .map(Vec::as_slice)
            .ok_or(SettingsError::ScheduleNotConfigured(proposal_type))
    }

    pub fn general_param(&self, scope: &str, setting: &str) -> Result<&ParamValue, SettingsError> {
        self.params
            .get(&ParamKey::new(scope, setting))
            .ok_or_else(|| SettingsError::ParamNotConfigured {
                scope: scope.to_string(),
                setting: setting.to_string(),
            })
    }

    /// Read a parameter that must hold an asset.
    pub fn asset_param(&self, scope: &str, setting: &str) -> Result<&Asset, SettingsError> {
        self.general_param(scope, setting)?
            .as_asset()
            .ok_or_else(|| SettingsError::InvalidParam {
                scope: scope.to_string(),
                setting: setting.to_string(),
                expected: "an asset",
            })
    }

    /// Read an asset parameter for `scope`, falling back to [`GLOBAL_SCOPE`]
    /// when the scope has no value of its own.
    ///
    /// A value of the wrong kind is an error and does not fall back.
    pub fn scoped_asset_param(&self, scope: &str, setting: &str) -> Result<&Asset, SettingsError> {
        match self.asset_param(scope, setting) {
            Err(SettingsError::ParamNotConfigured { .. }) if scope != GLOBAL_SCOPE => {
                self.asset_param(GLOBAL_SCOPE, setting)
            }
            other => other,
        }
    }

    /// All configured schedules, ordered by type.
    pub fn schedules(&self) -> impl Iterator<Item = (&ProposalType, &[PhaseEntry])> {
        self.schedules.iter().map(|(t, p)| (t, p.as_slice()))
    }

    /// All configured parameters, ordered by key.
    pub fn params(&self) -> impl Iterator<Item = (&ParamKey, &ParamValue)> {
        self.params.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::PhaseType;
    use agora_host::{HostError, SignerSet};

    fn admin() -> SignerSet {
        SignerSet::single("admin")
    }

    fn store() -> SettingsStore {
        SettingsStore::new(AccountName::new("admin"), Symbol::new("EOS", 4))
    }

    fn eos(amount: i64) -> Asset {
        Asset::new(amount, Symbol::new("EOS", 4))
    }

    fn standard() -> Vec<PhaseEntry> {
        vec![
            PhaseEntry::new("discussion", 7, PhaseType::Draft),
            PhaseEntry::new("debate", 7, PhaseType::Dialog),
            PhaseEntry::new("voting", 7, PhaseType::Voting),
        ]
    }

    #[test]
    fn schedule_requires_admin() {
        let mut s = store();
        let err = s
            .set_phase_schedule(&SignerSet::single("mallory"), ProposalType::Main, standard())
            .unwrap_err();
        assert_eq!(
            err,
            SettingsError::Authorization(HostError::MissingAuthority(AccountName::new("admin")))
        );
        assert!(s.phase_schedule(ProposalType::Main).is_err());
    }

    #[test]
    fn schedule_set_and_replaced() {
        let mut s = store();
        s.set_phase_schedule(&admin(), ProposalType::Main, standard())
            .unwrap();
        assert_eq!(s.phase_schedule(ProposalType::Main).unwrap().len(), 3);

        let shorter = vec![PhaseEntry::new("discussion", 1, PhaseType::Draft)];
        s.set_phase_schedule(&admin(), ProposalType::Main, shorter.clone())
            .unwrap();
        assert_eq!(s.phase_schedule(ProposalType::Main).unwrap(), shorter.as_slice());
    }

    #[test]
    fn missing_schedule_is_not_configured() {
        let err = store().phase_schedule(ProposalType::Amendment).unwrap_err();
        assert_eq!(err, SettingsError::ScheduleNotConfigured(ProposalType::Amendment));
        assert!(err.is_not_configured());
    }

    #[test]
    fn invalid_schedule_is_rejected() {
        let mut s = store();
        let err = s
            .set_phase_schedule(&admin(), ProposalType::Main, Vec::new())
            .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidSchedule(_)));
    }

    #[test]
    fn params_upsert() {
        let mut s = store();
        s.set_general_param(&admin(), "main", MIN_STAKE, ParamValue::Asset(eos(10)))
            .unwrap();
        s.set_general_param(&admin(), "main", MIN_STAKE, ParamValue::Asset(eos(20)))
            .unwrap();
        assert_eq!(s.asset_param("main", MIN_STAKE).unwrap(), &eos(20));
        assert_eq!(s.params().count(), 1);
    }

    #[test]
    fn params_require_admin() {
        let mut s = store();
        let err = s
            .set_general_param(
                &SignerSet::single("alice"),
                "main",
                MIN_STAKE,
                ParamValue::Integer(1),
            )
            .unwrap_err();
        assert!(matches!(err, SettingsError::Authorization(_)));
    }

    #[test]
    fn missing_param_is_not_configured() {
        let err = store().general_param("main", MIN_STAKE).unwrap_err();
        assert!(err.is_not_configured());
        assert_eq!(err.to_string(), "general parameter main/minstake is not configured");
    }

    #[test]
    fn wrong_kind_is_invalid_param() {
        let mut s = store();
        s.set_general_param(&admin(), "main", "quorum", ParamValue::Integer(5))
            .unwrap();
        assert!(matches!(
            s.asset_param("main", "quorum"),
            Err(SettingsError::InvalidParam { .. })
        ));
    }

    #[test]
    fn minstake_must_be_in_governance_token() {
        let mut s = store();
        for value in [
            ParamValue::Asset("10.00 EOS".parse().unwrap()),
            ParamValue::Asset("10.0000 USD".parse().unwrap()),
            ParamValue::Integer(10),
        ] {
            let err = s
                .set_general_param(&admin(), GLOBAL_SCOPE, MIN_STAKE, value)
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "general parameter global/minstake is not an asset in the governance token"
            );
        }
        assert!(s.params().next().is_none());

        s.set_general_param(&admin(), GLOBAL_SCOPE, MIN_STAKE, ParamValue::Asset(eos(100_000)))
            .unwrap();
        assert_eq!(s.asset_param(GLOBAL_SCOPE, MIN_STAKE).unwrap(), &eos(100_000));
    }

    #[test]
    fn scoped_lookup_falls_back_to_global() {
        let mut s = store();
        s.set_general_param(&admin(), GLOBAL_SCOPE, MIN_STAKE, ParamValue::Asset(eos(5)))
            .unwrap();
        assert_eq!(s.scoped_asset_param("main", MIN_STAKE).unwrap(), &eos(5));

        s.set_general_param(&admin(), "main", MIN_STAKE, ParamValue::Asset(eos(9)))
            .unwrap();
        assert_eq!(s.scoped_asset_param("main", MIN_STAKE).unwrap(), &eos(9));
        assert_eq!(s.scoped_asset_param("amendment", MIN_STAKE).unwrap(), &eos(5));
    }

    #[test]
    fn scoped_lookup_without_any_value_fails() {
        let err = store().scoped_asset_param("main", MIN_STAKE).unwrap_err();
        assert_eq!(
            err,
            SettingsError::ParamNotConfigured {
                scope: GLOBAL_SCOPE.to_string(),
                setting: MIN_STAKE.to_string(),
            }
        );
    }
}
