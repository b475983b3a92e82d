// Stops Rust Analyzer complaining about missing configs
// See https://solana.stackexchange.com/questions/17777
#![allow(unexpected_cfgs)]
// The `#[program]` expansion (its generated IDL account instructions) still calls
// the deprecated `AccountInfo::realloc`; see https://solana.stackexchange.com/questions/22979
#![allow(deprecated)]

use anchor_lang::prelude::*;

pub mod address;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod state;
mod utils;

pub use error::VotingError;
pub use handlers::*;
pub use ledger::{Ledger, LedgerResult, SharedLedger};
pub use state::*;

declare_id!("7LtqoYD5gDA81gHuE9Vsb1jKuLxh6sQG3GzYiq9EoujW");

#[program]
pub mod voting {
    use super::*;

    pub fn initialize_poll(
        ctx: Context<InitializePoll>,
        poll_id: u64,
        voting_start: i64,
        voting_end: i64,
        name: String,
        description: String,
    ) -> Result<()> {
        handlers::initialize_poll::initialize_poll(
            ctx,
            poll_id,
            voting_start,
            voting_end,
            name,
            description,
        )
    }

    pub fn initialize_candidate(
        ctx: Context<InitializeCandidate>,
        poll_id: u64,
        candidate_name: String,
    ) -> Result<()> {
        handlers::initialize_candidate::initialize_candidate(ctx, poll_id, candidate_name)
    }

    pub fn vote(ctx: Context<Vote>, poll_id: u64, candidate_name: String) -> Result<()> {
        handlers::vote::vote(ctx, poll_id, candidate_name)
    }
}
