use anchor_lang::prelude::*;

use crate::error::VotingError;

/// Where a poll's voting window stands at a given moment. Always computed, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VotingPhase {
    NotStarted,
    Open,
    Ended,
}

/// A named ballot with a voting window and a running count of registered candidates.
#[account]
#[derive(Debug, Default, PartialEq, Eq, InitSpace)]
pub struct PollAccount {
    /// PDA bump seed, non-zero once the poll has been written
    pub bump: u8,
    /// Identifier the poll address is derived from
    pub poll_id: u64,
    /// The poll name (max 32 bytes)
    #[max_len(32)]
    pub name: String,
    /// The poll description (max 300 bytes)
    #[max_len(300)]
    pub description: String,
    /// Unix timestamp (seconds) from which votes are accepted
    pub voting_start: i64,
    /// Unix timestamp (seconds) up to which votes are accepted
    pub voting_end: i64,
    /// Number of candidates registered under this poll
    pub option_index: u64,
}

impl PollAccount {
    pub fn new(poll_id: u64, bump: u8) -> Self {
        Self {
            bump,
            poll_id,
            ..Default::default()
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.bump != 0
    }

    /// Applies an upsert. A zeroed account, which is what `init_if_needed` hands
    /// over on first use, is set up for `poll_id` first. Returns whether it was.
    pub fn upsert(
        &mut self,
        poll_id: u64,
        bump: u8,
        voting_start: i64,
        voting_end: i64,
        name: String,
        description: String,
    ) -> bool {
        let created = !self.is_initialized();
        if created {
            *self = Self::new(poll_id, bump);
        }
        self.apply_settings(voting_start, voting_end, name, description);
        created
    }

    /// Overwrites the caller-controlled fields. `option_index` is left alone so
    /// re-running an upsert never disturbs registered candidates.
    pub fn apply_settings(
        &mut self,
        voting_start: i64,
        voting_end: i64,
        name: String,
        description: String,
    ) {
        self.voting_start = voting_start;
        self.voting_end = voting_end;
        self.name = name;
        self.description = description;
    }

    /// Classifies `now` against the window. Both ends are inclusive.
    pub fn phase(&self, now: i64) -> VotingPhase {
        if now < self.voting_start {
            VotingPhase::NotStarted
        } else if now > self.voting_end {
            VotingPhase::Ended
        } else {
            VotingPhase::Open
        }
    }

    pub fn ensure_open(&self, now: i64) -> core::result::Result<(), VotingError> {
        match self.phase(now) {
            VotingPhase::NotStarted => Err(VotingError::VotingNotStarted),
            VotingPhase::Ended => Err(VotingError::VotingEnded),
            VotingPhase::Open => Ok(()),
        }
    }

    /// Claims the next option slot and returns the index the new candidate takes.
    pub fn next_option_index(&mut self) -> core::result::Result<u64, VotingError> {
        let index = self.option_index;
        self.option_index = index.checked_add(1).ok_or(VotingError::Overflow)?;
        Ok(index)
    }
}
