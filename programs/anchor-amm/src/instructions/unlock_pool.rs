// Unlock Pool Instruction
//
// Re-enables pool operations. Only pool authority can unlock.

use anchor_lang::prelude::*;

use crate::{constants::*, events::PoolLockChanged, state::*};

#[derive(Accounts)]
pub struct UnlockPool<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED, config.seed.to_le_bytes().as_ref()],
        bump = config.config_bump,
    )]
    pub config: Account<'info, Config>,
}

impl<'info> UnlockPool<'info> {
    pub fn unlock_pool(&mut self) -> Result<()> {
        self.config.assert_is_authority(&self.authority.key())?;

        self.config.unlock()?;

        emit!(PoolLockChanged {
            config: self.config.key(),
            authority: self.authority.key(),
            locked: false,
        });

        msg!("Pool {} unlocked by {}", self.config.seed, self.authority.key());

        Ok(())
    }
}
