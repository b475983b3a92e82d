// Seed prefix for poll accounts. Candidate accounts are seeded by poll id and name only.
pub const POLL_SEED: &[u8] = b"poll";

/// Maximum UTF-8 byte length of a poll or candidate name. Also the seed length limit.
pub const MAX_NAME_LEN: usize = 32;

/// Maximum UTF-8 byte length of a poll description.
pub const MAX_DESCRIPTION_LEN: usize = 300;
