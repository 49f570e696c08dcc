//! The action dispatcher.

use crate::action::{Action, ActionReceipt, Transaction};
use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::state::GovernanceState;
use agora_host::{ChainClock, SignerSet, TokenLedger};
use agora_types::Timestamp;

/// Runs governance actions against a [`GovernanceState`].
///
/// Actions execute one at a time with exclusive access to the state. The
/// state is cloned before each action and put back if the action fails, so
/// an error never leaves a partial change behind.
pub struct Runtime<L, C> {
    state: GovernanceState,
    ledger: L,
    clock: C,
}

impl<L: TokenLedger, C: ChainClock> Runtime<L, C> {
    pub fn new(state: GovernanceState, ledger: L, clock: C) -> Self {
        Self {
            state,
            ledger,
            clock,
        }
    }

    /// Fresh state with the config's genesis schedules and parameters
    /// applied under the admin's authority.
    pub fn bootstrap(config: &RuntimeConfig, ledger: L, clock: C) -> Result<Self, RuntimeError> {
        config.validate()?;
        let mut state = GovernanceState::new(
            config.admin.clone(),
            config.proposals_account.clone(),
            config.token.clone(),
        );
        let admin = SignerSet::single(config.admin.clone());
        for schedule in &config.genesis.schedules {
            state.settings.set_phase_schedule(
                &admin,
                schedule.proposal_type,
                schedule.phases.clone(),
            )?;
        }
        for param in &config.genesis.params {
            state.settings.set_general_param(
                &admin,
                &param.scope,
                &param.setting,
                param.value.clone(),
            )?;
        }
        tracing::info!(
            admin = %config.admin,
            proposals_account = %config.proposals_account,
            token = %config.token,
            schedules = config.genesis.schedules.len(),
            params = config.genesis.params.len(),
            "governance state bootstrapped"
        );
        Ok(Self::new(state, ledger, clock))
    }

    /// Run one transaction. On failure the state is exactly as before.
    pub fn execute(&mut self, transaction: Transaction) -> Result<ActionReceipt, RuntimeError> {
        let Transaction { signers, action } = transaction;
        let name = action.name();
        let now = self.clock.now();

        let snapshot = self.state.clone();
        match self.apply(&signers, action, now) {
            Ok(receipt) => {
                tracing::debug!(action = name, now = %now, "action applied");
                Ok(receipt)
            }
            Err(e) => {
                self.state = snapshot;
                tracing::warn!(action = name, now = %now, error = %e, "action rejected");
                Err(e)
            }
        }
    }

    fn apply(
        &mut self,
        signers: &SignerSet,
        action: Action,
        now: Timestamp,
    ) -> Result<ActionReceipt, RuntimeError> {
        let state = &mut self.state;
        let receipt = match action {
            Action::SetPhaseConfig {
                proposal_type,
                phases,
            } => {
                state
                    .settings
                    .set_phase_schedule(signers, proposal_type, phases)?;
                ActionReceipt::Configured
            }
            Action::SetGeneralParam {
                scope,
                setting,
                value,
            } => {
                state
                    .settings
                    .set_general_param(signers, &scope, &setting, value)?;
                ActionReceipt::Configured
            }
            Action::Create(request) => {
                let id =
                    state
                        .proposals
                        .create(signers, &self.ledger, &state.settings, request, now)?;
                ActionReceipt::Created(id)
            }
            Action::Update {
                proposal_id,
                changes,
            } => {
                state.proposals.update(signers, proposal_id, changes)?;
                ActionReceipt::Updated(proposal_id)
            }
            Action::Move { proposal_id } => {
                let moved = state.proposals.move_proposal(
                    signers,
                    &mut state.referendums,
                    proposal_id,
                    now,
                )?;
                ActionReceipt::Moved(moved)
            }
            Action::Vote {
                referendum_id,
                voter,
                choice,
            } => {
                state
                    .referendums
                    .vote(signers, &self.ledger, referendum_id, &voter, choice, now)?;
                ActionReceipt::Voted(referendum_id)
            }
            Action::Finish { referendum_id } => {
                let mut sink = state.proposals.outcome_sink(now);
                let outcome = state
                    .referendums
                    .finish(signers, referendum_id, now, &mut sink)?;
                ActionReceipt::Finished {
                    referendum_id,
                    outcome,
                }
            }
            Action::Hold { referendum_id } => {
                state.referendums.hold(signers, referendum_id)?;
                ActionReceipt::Held(referendum_id)
            }
            Action::Resume { referendum_id } => {
                state.referendums.resume(signers, referendum_id)?;
                ActionReceipt::Resumed(referendum_id)
            }
        };
        Ok(receipt)
    }

    pub fn state(&self) -> &GovernanceState {
        &self.state
    }

    pub fn into_state(self) -> GovernanceState {
        self.state
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
