use anchor_lang::prelude::*;

#[error_code]
pub enum VotingError {
    /// 6000 0x1770
    #[msg("Text field exceeds its maximum length")]
    FieldTooLong,
    /// 6001 0x1771
    #[msg("Poll does not exist")]
    PollNotFound,
    /// 6002 0x1772
    #[msg("Candidate does not exist")]
    CandidateNotFound,
    /// 6003 0x1773
    #[msg("Candidate is already registered for this poll")]
    CandidateAlreadyExists,
    /// 6004 0x1774
    #[msg("Voting has not started yet")]
    VotingNotStarted,
    /// 6005 0x1775
    #[msg("Voting has ended")]
    VotingEnded,
    /// 6006 0x1776
    #[msg("Record not found")]
    NotFound,
    /// 6007 0x1777
    #[msg("Record is locked by a concurrent operation")]
    Conflict,
    /// 6008 0x1778
    #[msg("Counter overflow")]
    Overflow,
}
