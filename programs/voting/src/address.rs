//! Deterministic record addresses.
//!
//! Clients derive the same addresses from the same seeds, so a record can be
//! located (or checked for existence) without asking the program first.

use anchor_lang::prelude::*;

use crate::constants::POLL_SEED;

/// Address and canonical bump of the poll stored under `poll_id`.
pub fn poll_address(poll_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[POLL_SEED, poll_id.to_le_bytes().as_ref()], &crate::ID)
}

/// Address and canonical bump of candidate `name` under `poll_id`.
///
/// `name` is used as a seed, so it must not exceed [`crate::constants::MAX_NAME_LEN`] bytes.
pub fn candidate_address(poll_id: u64, name: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[poll_id.to_le_bytes().as_ref(), name.as_bytes()],
        &crate::ID,
    )
}
