use anchor_lang::prelude::*;

use crate::{
    constants::*,
    state::{CandidateAccount, CandidateRegistered, PollAccount},
};

#[derive(Accounts)]
#[instruction(poll_id: u64, candidate_name: String)]
pub struct InitializeCandidate<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [POLL_SEED, poll_id.to_le_bytes().as_ref()],
        bump = poll_account.bump,
    )]
    pub poll_account: Account<'info, PollAccount>,

    #[account(
        init_if_needed,
        payer = signer,
        space = CandidateAccount::DISCRIMINATOR.len() + CandidateAccount::INIT_SPACE,
        seeds = [poll_id.to_le_bytes().as_ref(), candidate_name.as_bytes()],
        bump,
    )]
    pub candidate_account: Account<'info, CandidateAccount>,

    pub system_program: Program<'info, System>,
}

/// Registers `candidate_name` under the poll and bumps the poll's option index.
///
/// A name can be registered once per poll. A repeated registration fails with
/// `CandidateAlreadyExists` and the transaction leaves both accounts untouched.
///
/// # Arguments
/// * `poll_id` - The poll to register under (used for account derivation)
/// * `candidate_name` - Candidate name, at most 32 bytes of UTF-8. Longer names
///   cannot form a seed, so account validation rejects them before this runs.
pub fn initialize_candidate(
    ctx: Context<InitializeCandidate>,
    poll_id: u64,
    candidate_name: String,
) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let index = accounts.candidate_account.register(
        &mut accounts.poll_account,
        candidate_name.clone(),
        ctx.bumps.candidate_account,
    )?;

    msg!(
        "Registered candidate {} as option {} of poll {}",
        candidate_name,
        index,
        poll_id
    );

    emit!(CandidateRegistered {
        poll_id,
        name: candidate_name,
        option_index: accounts.poll_account.option_index,
    });

    Ok(())
}
