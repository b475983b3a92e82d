//! Host-side registries.
//!
//! [`Ledger`] owns the poll and candidate stores, keyed by the same addresses
//! the program derives, and applies the same rules the instructions apply.
//! Every operation either commits all of its writes or returns an error with
//! both stores unchanged.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::{
    address::{candidate_address, poll_address},
    constants::*,
    error::VotingError,
    state::{CandidateAccount, PollAccount, VotingPhase},
    utils::validate_text,
};

mod shared;

pub use shared::{AccountLock, SharedLedger};

pub type LedgerResult<T> = core::result::Result<T, VotingError>;

#[derive(Clone, Debug, Default)]
pub struct Ledger {
    polls: BTreeMap<Pubkey, PollAccount>,
    candidates: BTreeMap<Pubkey, CandidateAccount>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the poll under `poll_id`, or overwrites window, name and description
    /// of the existing one. Returns the stored poll.
    pub fn upsert_poll(
        &mut self,
        poll_id: u64,
        voting_start: i64,
        voting_end: i64,
        name: &str,
        description: &str,
    ) -> LedgerResult<PollAccount> {
        validate_text(name, MAX_NAME_LEN)?;
        validate_text(description, MAX_DESCRIPTION_LEN)?;

        let (address, bump) = poll_address(poll_id);
        let poll = self.polls.entry(address).or_default();
        poll.upsert(
            poll_id,
            bump,
            voting_start,
            voting_end,
            name.to_owned(),
            description.to_owned(),
        );

        Ok(poll.clone())
    }

    /// Registers `name` under `poll_id` and advances the poll's option index.
    /// Returns the new candidate.
    pub fn register_candidate(
        &mut self,
        poll_id: u64,
        name: &str,
    ) -> LedgerResult<CandidateAccount> {
        validate_text(name, MAX_NAME_LEN)?;

        let (poll_key, _) = poll_address(poll_id);
        let mut poll = self
            .polls
            .get(&poll_key)
            .cloned()
            .ok_or(VotingError::PollNotFound)?;

        // work on copies so a rejected registration leaves both stores as they were
        let (candidate_key, bump) = candidate_address(poll_id, name);
        let mut candidate = self
            .candidates
            .get(&candidate_key)
            .cloned()
            .unwrap_or_default();
        candidate.register(&mut poll, name.to_owned(), bump)?;

        self.candidates.insert(candidate_key, candidate.clone());
        self.polls.insert(poll_key, poll);

        Ok(candidate)
    }

    /// Adds one vote for `name` if `now` lies inside the poll's window.
    /// Returns the candidate's updated tally.
    pub fn cast_vote(&mut self, poll_id: u64, name: &str, now: i64) -> LedgerResult<u64> {
        let poll = self
            .polls
            .get(&poll_address(poll_id).0)
            .ok_or(VotingError::PollNotFound)?;

        let candidate = Self::candidate_key(poll_id, name)
            .and_then(|key| self.candidates.get_mut(&key))
            .ok_or(VotingError::CandidateNotFound)?;

        candidate.accept_vote(poll, now)
    }

    pub fn poll(&self, address: &Pubkey) -> LedgerResult<&PollAccount> {
        self.polls.get(address).ok_or(VotingError::NotFound)
    }

    pub fn candidate(&self, address: &Pubkey) -> LedgerResult<&CandidateAccount> {
        self.candidates.get(address).ok_or(VotingError::NotFound)
    }

    pub fn poll_by_id(&self, poll_id: u64) -> LedgerResult<&PollAccount> {
        self.polls
            .get(&poll_address(poll_id).0)
            .ok_or(VotingError::PollNotFound)
    }

    pub fn candidate_by_name(&self, poll_id: u64, name: &str) -> LedgerResult<&CandidateAccount> {
        Self::candidate_key(poll_id, name)
            .and_then(|key| self.candidates.get(&key))
            .ok_or(VotingError::CandidateNotFound)
    }

    /// Where the poll's window stands at `now`.
    pub fn phase(&self, poll_id: u64, now: i64) -> LedgerResult<VotingPhase> {
        Ok(self.poll_by_id(poll_id)?.phase(now))
    }

    /// Raw vote counts of every candidate under `poll_id`, in registration order.
    pub fn tally(&self, poll_id: u64) -> LedgerResult<Vec<(String, u64)>> {
        self.poll_by_id(poll_id)?;

        let mut candidates: Vec<&CandidateAccount> = self
            .candidates
            .values()
            .filter(|candidate| candidate.poll_id == poll_id)
            .collect();
        candidates.sort_by_key(|candidate| candidate.index);

        Ok(candidates
            .into_iter()
            .map(|candidate| (candidate.name.clone(), candidate.votes))
            .collect())
    }

    /// Address of candidate `name`, or `None` if the name is too long to ever be registered.
    pub(crate) fn candidate_key(poll_id: u64, name: &str) -> Option<Pubkey> {
        validate_text(name, MAX_NAME_LEN).ok()?;
        Some(candidate_address(poll_id, name).0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with_poll(start: i64, end: i64) -> Ledger {
        let mut ledger = Ledger::new();
        ledger.upsert_poll(1, start, end, "poll", "description").unwrap();
        ledger
    }

    #[test]
    fn upsert_creates_then_updates() {
        let mut ledger = Ledger::new();
        let created = ledger.upsert_poll(1, 10, 20, "first", "one").unwrap();
        assert_eq!(created.option_index, 0);
        assert_eq!(created.poll_id, 1);
        assert!(created.is_initialized());

        ledger.register_candidate(1, "A").unwrap();

        let updated = ledger.upsert_poll(1, 30, 40, "second", "two").unwrap();
        assert_eq!(updated.name, "second");
        assert_eq!(updated.description, "two");
        assert_eq!(updated.voting_start, 30);
        assert_eq!(updated.voting_end, 40);
        assert_eq!(updated.option_index, 1);
        assert_eq!(updated.bump, created.bump);
        assert!(ledger.candidate_by_name(1, "A").is_ok());
    }

    #[test]
    fn oversized_text_is_rejected_before_any_write() {
        let mut ledger = Ledger::new();
        let long_name = "x".repeat(MAX_NAME_LEN + 1);
        let long_description = "x".repeat(MAX_DESCRIPTION_LEN + 1);

        assert!(matches!(
            ledger.upsert_poll(1, 0, 1, &long_name, ""),
            Err(VotingError::FieldTooLong)
        ));
        assert!(matches!(
            ledger.upsert_poll(1, 0, 1, "ok", &long_description),
            Err(VotingError::FieldTooLong)
        ));
        assert!(matches!(ledger.poll_by_id(1), Err(VotingError::PollNotFound)));

        ledger.upsert_poll(1, 0, 1, "ok", "").unwrap();
        assert!(matches!(
            ledger.register_candidate(1, &long_name),
            Err(VotingError::FieldTooLong)
        ));
        assert_eq!(ledger.poll_by_id(1).unwrap().option_index, 0);
    }

    #[test]
    fn register_requires_poll() {
        let mut ledger = Ledger::new();
        assert!(matches!(
            ledger.register_candidate(9, "A"),
            Err(VotingError::PollNotFound)
        ));
        assert!(matches!(
            ledger.candidate_by_name(9, "A"),
            Err(VotingError::CandidateNotFound)
        ));
    }

    #[test]
    fn duplicate_registration_changes_nothing() {
        let mut ledger = ledger_with_poll(0, 100);
        let first = ledger.register_candidate(1, "A").unwrap();
        ledger.cast_vote(1, "A", 50).unwrap();

        assert!(matches!(
            ledger.register_candidate(1, "A"),
            Err(VotingError::CandidateAlreadyExists)
        ));
        assert_eq!(ledger.poll_by_id(1).unwrap().option_index, 1);

        let stored = ledger.candidate_by_name(1, "A").unwrap();
        assert_eq!(stored.votes, 1);
        assert_eq!(stored.index, first.index);
    }

    #[test]
    fn option_index_follows_registration_order() {
        let mut ledger = ledger_with_poll(0, 100);
        for (k, name) in ["C", "A", "B"].iter().enumerate() {
            let candidate = ledger.register_candidate(1, name).unwrap();
            assert_eq!(candidate.index, k as u64);
            assert_eq!(candidate.votes, 0);
            assert_eq!(ledger.poll_by_id(1).unwrap().option_index, k as u64 + 1);
        }

        let names: Vec<String> = ledger
            .tally(1)
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[test]
    fn same_name_in_two_polls_is_two_candidates() {
        let mut ledger = ledger_with_poll(0, 100);
        ledger.upsert_poll(2, 0, 100, "other", "").unwrap();
        ledger.register_candidate(1, "A").unwrap();
        ledger.register_candidate(2, "A").unwrap();

        ledger.cast_vote(2, "A", 10).unwrap();
        assert_eq!(ledger.candidate_by_name(1, "A").unwrap().votes, 0);
        assert_eq!(ledger.candidate_by_name(2, "A").unwrap().votes, 1);
    }

    #[test]
    fn vote_preconditions_are_checked_in_order() {
        let mut ledger = ledger_with_poll(100, 200);
        assert!(matches!(
            ledger.cast_vote(2, "A", 150),
            Err(VotingError::PollNotFound)
        ));
        assert!(matches!(
            ledger.cast_vote(1, "A", 50),
            Err(VotingError::CandidateNotFound)
        ));

        ledger.register_candidate(1, "A").unwrap();
        assert!(matches!(
            ledger.cast_vote(1, "A", 99),
            Err(VotingError::VotingNotStarted)
        ));
        assert!(matches!(
            ledger.cast_vote(1, "A", 201),
            Err(VotingError::VotingEnded)
        ));
        assert_eq!(ledger.candidate_by_name(1, "A").unwrap().votes, 0);
    }

    #[test]
    fn overlong_candidate_name_is_not_found() {
        let mut ledger = ledger_with_poll(0, 100);
        let name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            ledger.cast_vote(1, &name, 10),
            Err(VotingError::CandidateNotFound)
        ));
    }

    #[test]
    fn repeated_votes_accumulate() {
        let mut ledger = ledger_with_poll(0, 100);
        ledger.register_candidate(1, "A").unwrap();
        for n in 1..=10 {
            assert_eq!(ledger.cast_vote(1, "A", 42).unwrap(), n);
        }
        assert_eq!(ledger.tally(1).unwrap(), vec![("A".to_string(), 10)]);
    }

    #[test]
    fn lookups_by_address_match_derivation() {
        let mut ledger = ledger_with_poll(0, 100);
        ledger.register_candidate(1, "A").unwrap();

        let (poll_key, _) = poll_address(1);
        let (candidate_key, bump) = candidate_address(1, "A");
        assert_eq!(ledger.poll(&poll_key).unwrap().poll_id, 1);
        assert_eq!(ledger.candidate(&candidate_key).unwrap().bump, bump);

        let (missing, _) = candidate_address(1, "B");
        assert!(matches!(ledger.candidate(&missing), Err(VotingError::NotFound)));
        assert!(matches!(
            ledger.poll(&poll_address(2).0),
            Err(VotingError::NotFound)
        ));
    }

    #[test]
    fn phase_and_tally_need_a_poll() {
        let ledger = Ledger::new();
        assert!(matches!(ledger.phase(1, 0), Err(VotingError::PollNotFound)));
        assert!(matches!(ledger.tally(1), Err(VotingError::PollNotFound)));
    }
}
