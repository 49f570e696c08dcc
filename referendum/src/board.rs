//! The referendum board: owns every referendum and drives their lifecycle.

use crate::error::ReferendumError;
use crate::outcome::{Outcome, OutcomeSink};
use crate::referendum::{Referendum, ReferendumStatus, VoteChoice};
use agora_host::{require_auth, Authorizer, TokenLedger};
use agora_types::{AccountName, ProposalId, ReferendumId, Symbol, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All referendums, keyed by id.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReferendumBoard {
    /// Account whose authority is needed to finish, hold, or resume.
    finisher: AccountName,
    /// Voters must hold a positive balance of this token.
    token: Symbol,
    next_id: ReferendumId,
    referendums: BTreeMap<ReferendumId, Referendum>,
}

impl ReferendumBoard {
    pub fn new(finisher: AccountName, token: Symbol) -> Self {
        Self {
            finisher,
            token,
            next_id: ReferendumId::FIRST,
            referendums: BTreeMap::new(),
        }
    }

    pub fn finisher(&self) -> &AccountName {
        &self.finisher
    }

    pub fn token(&self) -> &Symbol {
        &self.token
    }

    /// Open a referendum for `proposal_id`, accepting votes until `deadline`.
    ///
    /// The record goes `created -> started` before this returns.
    pub fn open(
        &mut self,
        proposal_id: ProposalId,
        deadline: Timestamp,
        now: Timestamp,
    ) -> Result<ReferendumId, ReferendumError> {
        let id = self.next_id;
        let next_id = id.next().ok_or(ReferendumError::IdOverflow)?;

        let mut referendum = Referendum::new(id, proposal_id, deadline, now);
        referendum.status = ReferendumStatus::Started;
        self.referendums.insert(id, referendum);
        self.next_id = next_id;

        tracing::info!(
            referendum_id = %id,
            proposal_id = %proposal_id,
            deadline = %deadline,
            "referendum opened"
        );
        Ok(id)
    }

    /// Record one vote by `voter`.
    pub fn vote(
        &mut self,
        auth: &dyn Authorizer,
        ledger: &dyn TokenLedger,
        referendum_id: ReferendumId,
        voter: &AccountName,
        choice: VoteChoice,
        now: Timestamp,
    ) -> Result<(), ReferendumError> {
        require_auth(auth, voter)?;

        let referendum = self
            .referendums
            .get(&referendum_id)
            .ok_or(ReferendumError::NotFound(referendum_id))?;
        match referendum.status {
            ReferendumStatus::Started => {}
            ReferendumStatus::Hold => return Err(ReferendumError::ReferendumOnHold(referendum_id)),
            _ => return Err(ReferendumError::ReferendumClosed(referendum_id)),
        }
        if referendum.deadline.has_passed(now) {
            return Err(ReferendumError::ReferendumClosed(referendum_id));
        }
        if referendum.has_voted(voter) {
            return Err(ReferendumError::AlreadyVoted {
                referendum_id,
                voter: voter.clone(),
            });
        }
        let stake = ledger.balance_of(voter, &self.token)?;
        if !stake.is_some_and(|s| s.is_positive()) {
            return Err(ReferendumError::InsufficientBalance(voter.clone()));
        }

        let referendum = self
            .referendums
            .get_mut(&referendum_id)
            .ok_or(ReferendumError::NotFound(referendum_id))?;
        referendum.votes.insert(voter.clone(), choice);
        referendum.tally.record(choice);

        tracing::debug!(
            referendum_id = %referendum_id,
            voter = %voter,
            choice = %choice,
            "vote recorded"
        );
        Ok(())
    }

    /// Close the referendum, fix its outcome, and report it to `sink`.
    ///
    /// The sink is invoked exactly once per referendum; a second `finish`
    /// fails with [`ReferendumError::AlreadyFinished`] before reaching it.
    pub fn finish(
        &mut self,
        auth: &dyn Authorizer,
        referendum_id: ReferendumId,
        now: Timestamp,
        sink: &mut dyn OutcomeSink,
    ) -> Result<Outcome, ReferendumError> {
        require_auth(auth, &self.finisher)?;

        let referendum = self
            .referendums
            .get_mut(&referendum_id)
            .ok_or(ReferendumError::NotFound(referendum_id))?;
        if referendum.status.is_terminal() {
            return Err(ReferendumError::AlreadyFinished(referendum_id));
        }

        let outcome = referendum.tally.outcome();
        referendum.status = outcome.into();
        referendum.finished_at = Some(now);
        let proposal_id = referendum.proposal_id;

        tracing::info!(
            referendum_id = %referendum_id,
            proposal_id = %proposal_id,
            favour = referendum.tally.favour,
            against = referendum.tally.against,
            abstain = referendum.tally.abstain,
            outcome = %outcome,
            "referendum finished"
        );
        sink.referendum_finished(proposal_id, referendum_id, outcome);
        Ok(outcome)
    }

    /// Pause voting on a started referendum.
    pub fn hold(
        &mut self,
        auth: &dyn Authorizer,
        referendum_id: ReferendumId,
    ) -> Result<(), ReferendumError> {
        self.transition(auth, referendum_id, ReferendumStatus::Started, ReferendumStatus::Hold)
    }

    /// Resume voting on a held referendum.
    pub fn resume(
        &mut self,
        auth: &dyn Authorizer,
        referendum_id: ReferendumId,
    ) -> Result<(), ReferendumError> {
        self.transition(auth, referendum_id, ReferendumStatus::Hold, ReferendumStatus::Started)
    }

    fn transition(
        &mut self,
        auth: &dyn Authorizer,
        referendum_id: ReferendumId,
        from: ReferendumStatus,
        to: ReferendumStatus,
    ) -> Result<(), ReferendumError> {
        require_auth(auth, &self.finisher)?;

        let referendum = self
            .referendums
            .get_mut(&referendum_id)
            .ok_or(ReferendumError::NotFound(referendum_id))?;
        if referendum.status.is_terminal() {
            return Err(ReferendumError::AlreadyFinished(referendum_id));
        }
        if referendum.status != from {
            return Err(ReferendumError::InvalidTransition {
                referendum_id,
                from: referendum.status.name(),
                to: to.name(),
            });
        }
        referendum.status = to;
        tracing::info!(referendum_id = %referendum_id, status = %to, "referendum status changed");
        Ok(())
    }

    pub fn get(&self, referendum_id: ReferendumId) -> Option<&Referendum> {
        self.referendums.get(&referendum_id)
    }

    /// Referendums opened for a proposal, oldest first.
    pub fn for_proposal(&self, proposal_id: ProposalId) -> Vec<&Referendum> {
        self.referendums
            .values()
            .filter(|r| r.proposal_id == proposal_id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Referendum> {
        self.referendums.values()
    }

    pub fn len(&self) -> usize {
        self.referendums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.referendums.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_host::{HostError, SignerSet};
    use agora_nullables::NullLedger;
    use agora_types::Asset;

    /// Records every report it receives.
    #[derive(Default)]
    struct RecordingSink {
        reports: Vec<(ProposalId, ReferendumId, Outcome)>,
    }

    impl OutcomeSink for RecordingSink {
        fn referendum_finished(
            &mut self,
            proposal_id: ProposalId,
            referendum_id: ReferendumId,
            outcome: Outcome,
        ) {
            self.reports.push((proposal_id, referendum_id, outcome));
        }
    }

    fn eos() -> Symbol {
        Symbol::new("EOS", 4)
    }

    fn acct(name: &str) -> AccountName {
        AccountName::new(name)
    }

    fn ts(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    fn board() -> ReferendumBoard {
        ReferendumBoard::new(acct("testproposal"), eos())
    }

    fn finisher() -> SignerSet {
        SignerSet::single("testproposal")
    }

    fn ledger() -> NullLedger {
        NullLedger::new()
            .with_balance("alice", Asset::new(10_000, eos()))
            .with_balance("bob", Asset::new(10_000, eos()))
            .with_balance("carol", Asset::new(10_000, eos()))
            .with_balance("broke", Asset::new(0, eos()))
    }

    fn vote(
        b: &mut ReferendumBoard,
        l: &NullLedger,
        id: ReferendumId,
        who: &str,
        choice: VoteChoice,
        now: u64,
    ) -> Result<(), ReferendumError> {
        b.vote(&SignerSet::single(who), l, id, &acct(who), choice, ts(now))
    }

    #[test]
    fn open_starts_immediately_with_zero_tally() {
        let mut b = board();
        let id = b.open(ProposalId::new(7), ts(1_000), ts(100)).unwrap();
        assert_eq!(id, ReferendumId::FIRST);

        let r = b.get(id).unwrap();
        assert_eq!(r.status, ReferendumStatus::Started);
        assert_eq!(r.proposal_id, ProposalId::new(7));
        assert_eq!(r.tally.total(), 0);
        assert_eq!(r.deadline, ts(1_000));
    }

    #[test]
    fn ids_are_monotonic() {
        let mut b = board();
        let a = b.open(ProposalId::new(1), ts(10), ts(0)).unwrap();
        let c = b.open(ProposalId::new(1), ts(10), ts(0)).unwrap();
        assert!(c > a);
        assert_eq!(b.for_proposal(ProposalId::new(1)).len(), 2);
    }

    #[test]
    fn vote_counts_choice() {
        let mut b = board();
        let l = ledger();
        let id = b.open(ProposalId::new(1), ts(1_000), ts(0)).unwrap();
        vote(&mut b, &l, id, "alice", VoteChoice::Favour, 10).unwrap();
        vote(&mut b, &l, id, "bob", VoteChoice::Against, 10).unwrap();
        vote(&mut b, &l, id, "carol", VoteChoice::Abstain, 10).unwrap();

        let r = b.get(id).unwrap();
        assert_eq!((r.tally.favour, r.tally.against, r.tally.abstain), (1, 1, 1));
        assert_eq!(r.vote_of(&acct("alice")), Some(VoteChoice::Favour));
    }

    #[test]
    fn second_vote_rejected() {
        let mut b = board();
        let l = ledger();
        let id = b.open(ProposalId::new(1), ts(1_000), ts(0)).unwrap();
        vote(&mut b, &l, id, "alice", VoteChoice::Favour, 10).unwrap();
        let err = vote(&mut b, &l, id, "alice", VoteChoice::Against, 11).unwrap_err();
        assert_eq!(
            err,
            ReferendumError::AlreadyVoted {
                referendum_id: id,
                voter: acct("alice"),
            }
        );
        assert_eq!(b.get(id).unwrap().tally.favour, 1);
        assert_eq!(b.get(id).unwrap().tally.against, 0);
    }

    #[test]
    fn vote_requires_voter_authority() {
        let mut b = board();
        let l = ledger();
        let id = b.open(ProposalId::new(1), ts(1_000), ts(0)).unwrap();
        let err = b
            .vote(
                &SignerSet::single("bob"),
                &l,
                id,
                &acct("alice"),
                VoteChoice::Favour,
                ts(1),
            )
            .unwrap_err();
        assert_eq!(
            err,
            ReferendumError::Authorization(HostError::MissingAuthority(acct("alice")))
        );
    }

    #[test]
    fn vote_requires_stake() {
        let mut b = board();
        let l = ledger();
        let id = b.open(ProposalId::new(1), ts(1_000), ts(0)).unwrap();
        assert_eq!(
            vote(&mut b, &l, id, "broke", VoteChoice::Favour, 1).unwrap_err(),
            ReferendumError::InsufficientBalance(acct("broke"))
        );
        assert_eq!(
            vote(&mut b, &l, id, "nobody", VoteChoice::Favour, 1).unwrap_err(),
            ReferendumError::InsufficientBalance(acct("nobody"))
        );
    }

    #[test]
    fn vote_after_deadline_rejected() {
        let mut b = board();
        let l = ledger();
        let id = b.open(ProposalId::new(1), ts(100), ts(0)).unwrap();
        assert_eq!(
            vote(&mut b, &l, id, "alice", VoteChoice::Favour, 100).unwrap_err(),
            ReferendumError::ReferendumClosed(id)
        );
    }

    #[test]
    fn vote_on_unknown_referendum() {
        let mut b = board();
        let l = ledger();
        let missing = ReferendumId::new(42);
        assert_eq!(
            vote(&mut b, &l, missing, "alice", VoteChoice::Favour, 1).unwrap_err(),
            ReferendumError::NotFound(missing)
        );
    }

    #[test]
    fn finish_reports_exactly_once() {
        let mut b = board();
        let l = ledger();
        let mut sink = RecordingSink::default();
        let id = b.open(ProposalId::new(3), ts(1_000), ts(0)).unwrap();
        vote(&mut b, &l, id, "alice", VoteChoice::Favour, 1).unwrap();

        let outcome = b.finish(&finisher(), id, ts(2), &mut sink).unwrap();
        assert_eq!(outcome, Outcome::Accepted);
        assert_eq!(b.get(id).unwrap().status, ReferendumStatus::Accepted);
        assert_eq!(b.get(id).unwrap().finished_at, Some(ts(2)));

        let err = b.finish(&finisher(), id, ts(3), &mut sink).unwrap_err();
        assert_eq!(err, ReferendumError::AlreadyFinished(id));
        assert_eq!(sink.reports, vec![(ProposalId::new(3), id, Outcome::Accepted)]);
    }

    #[test]
    fn finish_requires_finisher() {
        let mut b = board();
        let mut sink = RecordingSink::default();
        let id = b.open(ProposalId::new(3), ts(1_000), ts(0)).unwrap();
        let err = b
            .finish(&SignerSet::single("alice"), id, ts(2), &mut sink)
            .unwrap_err();
        assert!(matches!(err, ReferendumError::Authorization(_)));
        assert!(sink.reports.is_empty());
        assert_eq!(b.get(id).unwrap().status, ReferendumStatus::Started);
    }

    #[test]
    fn finish_tie_rejects() {
        let mut b = board();
        let l = ledger();
        let mut sink = RecordingSink::default();
        let id = b.open(ProposalId::new(3), ts(1_000), ts(0)).unwrap();
        vote(&mut b, &l, id, "alice", VoteChoice::Favour, 1).unwrap();
        vote(&mut b, &l, id, "bob", VoteChoice::Against, 1).unwrap();
        vote(&mut b, &l, id, "carol", VoteChoice::Abstain, 1).unwrap();

        assert_eq!(
            b.finish(&finisher(), id, ts(2), &mut sink).unwrap(),
            Outcome::Rejected
        );
        assert_eq!(b.get(id).unwrap().status, ReferendumStatus::Rejected);
    }

    #[test]
    fn votes_rejected_after_finish() {
        let mut b = board();
        let l = ledger();
        let mut sink = RecordingSink::default();
        let id = b.open(ProposalId::new(3), ts(1_000), ts(0)).unwrap();
        b.finish(&finisher(), id, ts(2), &mut sink).unwrap();
        assert_eq!(
            vote(&mut b, &l, id, "alice", VoteChoice::Favour, 3).unwrap_err(),
            ReferendumError::ReferendumClosed(id)
        );
    }

    #[test]
    fn hold_blocks_votes_until_resumed() {
        let mut b = board();
        let l = ledger();
        let id = b.open(ProposalId::new(3), ts(1_000), ts(0)).unwrap();

        b.hold(&finisher(), id).unwrap();
        assert_eq!(b.get(id).unwrap().status, ReferendumStatus::Hold);
        assert_eq!(
            vote(&mut b, &l, id, "alice", VoteChoice::Favour, 1).unwrap_err(),
            ReferendumError::ReferendumOnHold(id)
        );

        b.resume(&finisher(), id).unwrap();
        vote(&mut b, &l, id, "alice", VoteChoice::Favour, 2).unwrap();
    }

    #[test]
    fn hold_transitions_are_checked() {
        let mut b = board();
        let mut sink = RecordingSink::default();
        let id = b.open(ProposalId::new(3), ts(1_000), ts(0)).unwrap();

        assert!(matches!(
            b.resume(&finisher(), id),
            Err(ReferendumError::InvalidTransition { .. })
        ));
        assert!(matches!(
            b.hold(&SignerSet::single("alice"), id),
            Err(ReferendumError::Authorization(_))
        ));

        b.hold(&finisher(), id).unwrap();
        assert_eq!(
            b.finish(&finisher(), id, ts(5), &mut sink).unwrap(),
            Outcome::Rejected
        );
        assert_eq!(
            b.hold(&finisher(), id).unwrap_err(),
            ReferendumError::AlreadyFinished(id)
        );
    }
}
