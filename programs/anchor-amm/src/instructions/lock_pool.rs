// Lock Pool Instruction
//
// Emergency pause mechanism. Only pool authority can lock.

use anchor_lang::prelude::*;

use crate::{constants::*, events::PoolLockChanged, state::*};

#[derive(Accounts)]
pub struct LockPool<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED, config.seed.to_le_bytes().as_ref()],
        bump = config.config_bump,
    )]
    pub config: Account<'info, Config>,
}

impl<'info> LockPool<'info> {
    pub fn lock_pool(&mut self) -> Result<()> {
        self.config.assert_is_authority(&self.authority.key())?;

        self.config.lock()?;

        emit!(PoolLockChanged {
            config: self.config.key(),
            authority: self.authority.key(),
            locked: true,
        });

        msg!("Pool {} locked by {}", self.config.seed, self.authority.key());

        Ok(())
    }
}
