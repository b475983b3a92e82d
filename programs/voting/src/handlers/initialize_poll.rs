use anchor_lang::prelude::*;

use crate::{
    constants::*,
    state::{PollAccount, PollInitialized},
    utils::validate_text,
};

#[derive(Accounts)]
#[instruction(poll_id: u64)]
pub struct InitializePoll<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        init_if_needed,
        payer = signer,
        space = PollAccount::DISCRIMINATOR.len() + PollAccount::INIT_SPACE,
        seeds = [POLL_SEED, poll_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub poll_account: Account<'info, PollAccount>,

    pub system_program: Program<'info, System>,
}

/// Creates the poll stored under `poll_id`, or overwrites the settings of an existing one.
///
/// On creation the option index starts at 0. On update only the window, name and
/// description change; the option index and registered candidates are kept.
///
/// # Arguments
/// * `poll_id` - Identifier the poll address is derived from
/// * `voting_start` - First Unix timestamp at which votes are accepted
/// * `voting_end` - Last Unix timestamp at which votes are accepted
/// * `name` - Poll name, at most 32 bytes of UTF-8
/// * `description` - Poll description, at most 300 bytes of UTF-8
pub fn initialize_poll(
    ctx: Context<InitializePoll>,
    poll_id: u64,
    voting_start: i64,
    voting_end: i64,
    name: String,
    description: String,
) -> Result<()> {
    validate_text(&name, MAX_NAME_LEN)?;
    validate_text(&description, MAX_DESCRIPTION_LEN)?;

    let created = ctx.accounts.poll_account.upsert(
        poll_id,
        ctx.bumps.poll_account,
        voting_start,
        voting_end,
        name,
        description,
    );
    if created {
        msg!("Created poll {}", poll_id);
    } else {
        msg!("Updated poll {}", poll_id);
    }

    emit!(PollInitialized {
        poll_id,
        created,
        voting_start,
        voting_end,
    });

    Ok(())
}
