use anchor_lang::prelude::*;

use crate::{
    constants::*,
    state::{CandidateAccount, PollAccount, VoteCast},
};

#[derive(Accounts)]
#[instruction(poll_id: u64, candidate_name: String)]
pub struct Vote<'info> {
    pub signer: Signer<'info>,

    #[account(
        seeds = [POLL_SEED, poll_id.to_le_bytes().as_ref()],
        bump = poll_account.bump,
    )]
    pub poll_account: Account<'info, PollAccount>,

    #[account(
        mut,
        seeds = [poll_id.to_le_bytes().as_ref(), candidate_name.as_bytes()],
        bump = candidate_account.bump,
    )]
    pub candidate_account: Account<'info, CandidateAccount>,
}

/// Adds one vote to `candidate_name` if the cluster clock is inside the poll's window.
///
/// The window is inclusive at both ends. There is no per-voter record, so the same
/// signer may vote any number of times.
pub fn vote(ctx: Context<Vote>, poll_id: u64, candidate_name: String) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let accounts = &mut *ctx.accounts;
    let votes = accounts
        .candidate_account
        .accept_vote(&accounts.poll_account, now)?;

    msg!(
        "Vote for {} in poll {}, tally now {}",
        candidate_name,
        poll_id,
        votes
    );

    emit!(VoteCast {
        poll_id,
        name: candidate_name,
        votes,
        timestamp: now,
    });

    Ok(())
}
