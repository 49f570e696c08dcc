//! The proposal registry: owns every proposal and drives its lifecycle.

use crate::error::GovernanceError;
use crate::phase::next_phase;
use crate::proposal::{NewProposal, Proposal, ProposalStatus, ProposalUpdate};
use agora_host::{require_auth, Authorizer, TokenLedger};
use agora_referendum::{Outcome, OutcomeSink, ReferendumBoard};
use agora_settings::{SettingsError, SettingsStore, MIN_STAKE};
use agora_types::{ProposalId, ReferendumId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opens referendums on behalf of the registry.
///
/// Implemented by [`ReferendumBoard`]; tests may substitute their own.
pub trait ReferendumOpener {
    fn open_referendum(
        &mut self,
        proposal_id: ProposalId,
        deadline: Timestamp,
        now: Timestamp,
    ) -> Result<ReferendumId, GovernanceError>;
}

impl ReferendumOpener for ReferendumBoard {
    fn open_referendum(
        &mut self,
        proposal_id: ProposalId,
        deadline: Timestamp,
        now: Timestamp,
    ) -> Result<ReferendumId, GovernanceError> {
        Ok(self.open(proposal_id, deadline, now)?)
    }
}

/// What a successful `move` did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReceipt {
    pub proposal_id: ProposalId,
    /// Name of the phase entered.
    pub phase: String,
    pub phase_index: usize,
    pub deadline: Timestamp,
    /// Referendum opened on entering a voting phase.
    pub referendum: Option<ReferendumId>,
    pub status: ProposalStatus,
}

/// All proposals, keyed by id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProposalRegistry {
    next_id: ProposalId,
    proposals: BTreeMap<ProposalId, Proposal>,
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self {
            next_id: ProposalId::FIRST,
            proposals: BTreeMap::new(),
        }
    }

    /// Create a proposal in the first phase of its type's current schedule.
    ///
    /// The creator must sign and hold at least the minimum stake configured
    /// for the proposal type (or globally), in the governance token. Only the
    /// balance is checked; nothing is transferred.
    pub fn create(
        &mut self,
        auth: &dyn Authorizer,
        ledger: &dyn TokenLedger,
        settings: &SettingsStore,
        request: NewProposal,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        require_auth(auth, &request.creator)?;

        let proposal_type = request.kind.proposal_type();
        self.check_parent(proposal_type.requires_parent(), request.parent)?;

        let token = settings.token();
        let minimum = settings.scoped_asset_param(proposal_type.name(), MIN_STAKE)?;
        if minimum.symbol() != token {
            return Err(SettingsError::InvalidParam {
                scope: proposal_type.name().to_string(),
                setting: MIN_STAKE.to_string(),
                expected: "an asset in the governance token",
            }
            .into());
        }
        let balance = ledger
            .balance_of(&request.creator, token)?
            .ok_or_else(|| GovernanceError::InsufficientBalance {
                account: request.creator.clone(),
                symbol: token.code.clone(),
            })?;
        if balance.amount() < minimum.amount() {
            return Err(GovernanceError::BelowMinimumStake {
                balance,
                minimum: minimum.clone(),
            });
        }

        let phases = settings.phase_schedule(proposal_type)?.to_vec();
        let first_duration = phases.first().map_or(0, |phase| phase.duration_days);
        let deadline = request
            .deadline
            .unwrap_or_else(|| now.plus_days(first_duration));

        let id = self.next_id;
        let next_id = id.next().ok_or(GovernanceError::IdOverflow)?;
        let proposal = Proposal {
            id,
            creator: request.creator,
            title: request.title,
            description: request.description,
            kpi: request.kpi,
            kind: request.kind,
            parent: request.parent,
            phases,
            current_phase: 0,
            deadline,
            status: ProposalStatus::Open,
            pending_referendum: None,
            referendums: Vec::new(),
            created_at: now,
            closed_at: None,
        };

        tracing::info!(
            proposal_id = %id,
            creator = %proposal.creator,
            proposal_type = %proposal_type,
            phase = %proposal.current().name,
            deadline = %deadline,
            "proposal created"
        );
        self.proposals.insert(id, proposal);
        self.next_id = next_id;
        Ok(id)
    }

    fn check_parent(
        &self,
        required: bool,
        parent: Option<ProposalId>,
    ) -> Result<(), GovernanceError> {
        match parent {
            None if required => Err(GovernanceError::InvalidParent(
                "this proposal type must reference a parent proposal".to_string(),
            )),
            None => Ok(()),
            Some(parent_id) if !self.proposals.contains_key(&parent_id) => Err(
                GovernanceError::InvalidParent(format!("proposal {parent_id} does not exist")),
            ),
            Some(_) => Ok(()),
        }
    }

    /// Edit a proposal while it is still in its discussion phase.
    ///
    /// Deadlines are taken as given, including ones earlier than now.
    pub fn update(
        &mut self,
        auth: &dyn Authorizer,
        proposal_id: ProposalId,
        update: ProposalUpdate,
    ) -> Result<(), GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;
        require_auth(auth, &proposal.creator)?;

        if !proposal.is_open() || !proposal.in_discussion() {
            return Err(GovernanceError::WrongPhase {
                proposal_id,
                phase: proposal.current().name.clone(),
            });
        }
        if let Some(kind) = &update.kind {
            if kind.proposal_type() != proposal.proposal_type() {
                return Err(GovernanceError::InvalidUpdate(format!(
                    "cannot turn a {} proposal into a {} proposal",
                    proposal.proposal_type(),
                    kind.proposal_type()
                )));
            }
        }

        if let Some(title) = update.title {
            proposal.title = title;
        }
        if let Some(description) = update.description {
            proposal.description = description;
        }
        if let Some(kpi) = update.kpi {
            proposal.kpi = kpi;
        }
        if let Some(deadline) = update.deadline {
            proposal.deadline = deadline;
        }
        if let Some(kind) = update.kind {
            proposal.kind = kind;
        }

        tracing::info!(proposal_id = %proposal_id, "proposal updated");
        Ok(())
    }

    /// Advance a proposal to its next phase once the current deadline passed.
    ///
    /// Entering a voting phase opens a referendum through `referendums`;
    /// nothing is changed if that fails.
    pub fn move_proposal(
        &mut self,
        auth: &dyn Authorizer,
        referendums: &mut dyn ReferendumOpener,
        proposal_id: ProposalId,
        now: Timestamp,
    ) -> Result<MoveReceipt, GovernanceError> {
        let proposal = self
            .proposals
            .get_mut(&proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;
        require_auth(auth, &proposal.creator)?;

        if !proposal.is_open() {
            return Err(GovernanceError::NoNextPhase(proposal_id));
        }
        if now < proposal.deadline {
            return Err(GovernanceError::DeadlineNotReached {
                proposal_id,
                deadline: proposal.deadline,
                now,
            });
        }
        if let Some(referendum_id) = proposal.pending_referendum {
            return Err(GovernanceError::ReferendumPending {
                proposal_id,
                referendum_id,
            });
        }

        let transition = next_phase(&proposal.phases, proposal.current_phase)
            .map_err(|_| GovernanceError::NoNextPhase(proposal_id))?;
        let entered = &proposal.phases[transition.index];
        let deadline = now.plus_days(entered.duration_days);

        let referendum = if transition.spawns_referendum {
            Some(referendums.open_referendum(proposal_id, deadline, now)?)
        } else {
            None
        };

        proposal.current_phase = transition.index;
        proposal.deadline = deadline;
        if let Some(referendum_id) = referendum {
            proposal.pending_referendum = Some(referendum_id);
            proposal.referendums.push((referendum_id, None));
        } else if transition.is_last {
            proposal.status = ProposalStatus::Completed;
            proposal.closed_at = Some(now);
        }

        tracing::info!(
            proposal_id = %proposal_id,
            phase = %proposal.current().name,
            deadline = %deadline,
            status = %proposal.status,
            "proposal moved"
        );
        Ok(MoveReceipt {
            proposal_id,
            phase: proposal.current().name.clone(),
            phase_index: transition.index,
            deadline,
            referendum,
            status: proposal.status,
        })
    }

    /// Apply a finished referendum to the proposal it belongs to.
    ///
    /// A rejection closes the proposal. An acceptance closes it as accepted
    /// on the last phase, otherwise it only clears the way for the next
    /// `move`. Reports for unknown or closed proposals, or for a referendum
    /// that is not the pending one, are logged and ignored.
    pub fn apply_referendum_outcome(
        &mut self,
        proposal_id: ProposalId,
        referendum_id: ReferendumId,
        outcome: Outcome,
        now: Timestamp,
    ) {
        let Some(proposal) = self.proposals.get_mut(&proposal_id) else {
            tracing::warn!(
                proposal_id = %proposal_id,
                referendum_id = %referendum_id,
                "referendum outcome for unknown proposal ignored"
            );
            return;
        };
        if !proposal.is_open() || proposal.pending_referendum != Some(referendum_id) {
            tracing::warn!(
                proposal_id = %proposal_id,
                referendum_id = %referendum_id,
                status = %proposal.status,
                "stale referendum outcome ignored"
            );
            return;
        }

        proposal.pending_referendum = None;
        if let Some(entry) = proposal
            .referendums
            .iter_mut()
            .find(|(id, _)| *id == referendum_id)
        {
            entry.1 = Some(outcome);
        }

        let status = match outcome {
            Outcome::Rejected => Some(ProposalStatus::Rejected),
            Outcome::Accepted if proposal.on_last_phase() => Some(ProposalStatus::Accepted),
            Outcome::Accepted => None,
        };
        if let Some(status) = status {
            proposal.status = status;
            proposal.closed_at = Some(now);
        }

        tracing::info!(
            proposal_id = %proposal_id,
            referendum_id = %referendum_id,
            outcome = %outcome,
            status = %proposal.status,
            "referendum outcome applied"
        );
    }

    /// Bind the registry to a timestamp so it can receive referendum reports.
    pub fn outcome_sink(&mut self, now: Timestamp) -> RegistrySink<'_> {
        RegistrySink {
            registry: self,
            now,
        }
    }

    pub fn get(&self, proposal_id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(&proposal_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }

    pub fn with_status(&self, status: ProposalStatus) -> Vec<&Proposal> {
        self.proposals
            .values()
            .filter(|p| p.status == status)
            .collect()
    }

    /// Proposals referencing `parent` (amendments, debate changes).
    pub fn children_of(&self, parent: ProposalId) -> Vec<&Proposal> {
        self.proposals
            .values()
            .filter(|p| p.parent == Some(parent))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}

impl Default for ProposalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// [`OutcomeSink`] handed to the referendum board during `finish`.
pub struct RegistrySink<'a> {
    registry: &'a mut ProposalRegistry,
    now: Timestamp,
}

impl OutcomeSink for RegistrySink<'_> {
    fn referendum_finished(
        &mut self,
        proposal_id: ProposalId,
        referendum_id: ReferendumId,
        outcome: Outcome,
    ) {
        self.registry
            .apply_referendum_outcome(proposal_id, referendum_id, outcome, self.now);
    }
}
