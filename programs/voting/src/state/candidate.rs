use anchor_lang::prelude::*;

use crate::{error::VotingError, state::PollAccount};

/// A named option scoped to one poll.
#[account]
#[derive(Debug, Default, PartialEq, Eq, InitSpace)]
pub struct CandidateAccount {
    /// PDA bump seed, non-zero once registered
    pub bump: u8,
    /// Poll this candidate belongs to
    pub poll_id: u64,
    /// Registration order within the poll, starting at 0
    pub index: u64,
    /// The candidate name (max 32 bytes), also part of the address seeds
    #[max_len(32)]
    pub name: String,
    pub votes: u64,
}

impl CandidateAccount {
    pub fn new(poll_id: u64, index: u64, name: String, bump: u8) -> Self {
        Self {
            bump,
            poll_id,
            index,
            name,
            votes: 0,
        }
    }

    /// A freshly allocated account is all zeroes, a registered one carries its bump.
    pub fn is_registered(&self) -> bool {
        self.bump != 0
    }

    /// Registers this account under `poll`, taking the poll's next option index.
    /// Fails without touching either account if the candidate is already registered.
    pub fn register(
        &mut self,
        poll: &mut PollAccount,
        name: String,
        bump: u8,
    ) -> core::result::Result<u64, VotingError> {
        if self.is_registered() {
            return Err(VotingError::CandidateAlreadyExists);
        }
        let index = poll.next_option_index()?;
        *self = Self::new(poll.poll_id, index, name, bump);
        Ok(index)
    }

    /// Counts one vote if `now` falls inside the poll's window. Returns the new tally.
    pub fn accept_vote(
        &mut self,
        poll: &PollAccount,
        now: i64,
    ) -> core::result::Result<u64, VotingError> {
        poll.ensure_open(now)?;
        self.record_vote()
    }

    pub fn record_vote(&mut self) -> core::result::Result<u64, VotingError> {
        self.votes = self.votes.checked_add(1).ok_or(VotingError::Overflow)?;
        Ok(self.votes)
    }
}
