use anchor_lang::prelude::*;

#[event]
pub struct PollInitialized {
    pub poll_id: u64,
    /// False when an existing poll was overwritten
    pub created: bool,
    pub voting_start: i64,
    pub voting_end: i64,
}

#[event]
pub struct CandidateRegistered {
    pub poll_id: u64,
    pub name: String,
    /// The poll's option index after this registration
    pub option_index: u64,
}

#[event]
pub struct VoteCast {
    pub poll_id: u64,
    pub name: String,
    /// Candidate tally including this vote
    pub votes: u64,
    pub timestamp: i64,
}
