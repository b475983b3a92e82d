use std::sync::{Mutex, MutexGuard, PoisonError};

use anchor_lang::prelude::*;
use dashmap::{mapref::entry::Entry, DashMap};

use super::{Ledger, LedgerResult};
use crate::{
    address::{candidate_address, poll_address},
    constants::MAX_NAME_LEN,
    error::VotingError,
    state::{CandidateAccount, PollAccount},
    utils::validate_text,
};

/// A [`Ledger`] shared between concurrent callers.
///
/// Each operation claims the addresses it touches before running, the way the
/// runtime locks accounts: any number of readers or a single writer per address.
/// A call that overlaps an in-flight write fails with [`VotingError::Conflict`]
/// instead of waiting. Calls on disjoint addresses go through.
#[derive(Debug, Default)]
pub struct SharedLedger {
    ledger: Mutex<Ledger>,
    claims: DashMap<Pubkey, Claim>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Claim {
    Read(usize),
    Write,
}

/// Claim on a set of addresses, released on drop.
#[derive(Debug)]
pub struct AccountLock<'a> {
    claims: &'a DashMap<Pubkey, Claim>,
    held: Vec<(Pubkey, bool)>,
}

impl Drop for AccountLock<'_> {
    fn drop(&mut self) {
        for (address, write) in self.held.drain(..) {
            release(self.claims, address, write);
        }
    }
}

fn try_claim(claims: &DashMap<Pubkey, Claim>, address: Pubkey, write: bool) -> bool {
    match claims.entry(address) {
        Entry::Vacant(vacant) => {
            vacant.insert(if write { Claim::Write } else { Claim::Read(1) });
            true
        }
        Entry::Occupied(mut occupied) => match (write, *occupied.get()) {
            (false, Claim::Read(n)) => {
                *occupied.get_mut() = Claim::Read(n + 1);
                true
            }
            _ => false,
        },
    }
}

fn release(claims: &DashMap<Pubkey, Claim>, address: Pubkey, write: bool) {
    if let Entry::Occupied(mut occupied) = claims.entry(address) {
        let claim = *occupied.get();
        match claim {
            Claim::Read(n) if !write && n > 1 => *occupied.get_mut() = Claim::Read(n - 1),
            _ => {
                occupied.remove();
            }
        }
    }
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
            claims: DashMap::new(),
        }
    }

    /// Claims `writes` exclusively and `reads` shared, all or nothing.
    ///
    /// Addresses are taken in key order; on the first one that is unavailable
    /// the claims taken so far are released and the call fails.
    pub fn lock_accounts(
        &self,
        writes: &[Pubkey],
        reads: &[Pubkey],
    ) -> LedgerResult<AccountLock<'_>> {
        let mut wanted: Vec<(Pubkey, bool)> = writes
            .iter()
            .map(|address| (*address, true))
            .chain(reads.iter().map(|address| (*address, false)))
            .collect();
        wanted.sort();

        let mut lock = AccountLock {
            claims: &self.claims,
            held: Vec::with_capacity(wanted.len()),
        };
        for (address, write) in wanted {
            if !try_claim(&self.claims, address, write) {
                // dropping `lock` hands back what was already taken
                return Err(VotingError::Conflict);
            }
            lock.held.push((address, write));
        }

        Ok(lock)
    }

    pub fn upsert_poll(
        &self,
        poll_id: u64,
        voting_start: i64,
        voting_end: i64,
        name: &str,
        description: &str,
    ) -> LedgerResult<PollAccount> {
        let _lock = self.lock_accounts(&[poll_address(poll_id).0], &[])?;
        self.ledger()
            .upsert_poll(poll_id, voting_start, voting_end, name, description)
    }

    pub fn register_candidate(&self, poll_id: u64, name: &str) -> LedgerResult<CandidateAccount> {
        // the name is a seed, so it has to fit before an address can be derived
        validate_text(name, MAX_NAME_LEN)?;
        let _lock = self.lock_accounts(
            &[poll_address(poll_id).0, candidate_address(poll_id, name).0],
            &[],
        )?;
        self.ledger().register_candidate(poll_id, name)
    }

    pub fn cast_vote(&self, poll_id: u64, name: &str, now: i64) -> LedgerResult<u64> {
        let candidate: Vec<Pubkey> = Ledger::candidate_key(poll_id, name).into_iter().collect();
        let _lock = self.lock_accounts(&candidate, &[poll_address(poll_id).0])?;
        self.ledger().cast_vote(poll_id, name, now)
    }

    /// Copy of the committed state.
    pub fn snapshot(&self) -> Ledger {
        self.ledger().clone()
    }

    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
