// Set Authority Instruction
//
// Hands pool administration to a new key. Passing None renounces it for good:
// the pool can then never be locked or unlocked again.

use anchor_lang::prelude::*;

use crate::{constants::*, state::*};

#[derive(Accounts)]
pub struct SetAuthority<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED, config.seed.to_le_bytes().as_ref()],
        bump = config.config_bump,
    )]
    pub config: Account<'info, Config>,
}

impl<'info> SetAuthority<'info> {
    pub fn set_authority(&mut self, new_authority: Option<Pubkey>) -> Result<()> {
        self.config.assert_is_authority(&self.authority.key())?;

        self.config.authority = new_authority;

        match new_authority {
            Some(key) => msg!("Pool {} authority set to {}", self.config.seed, key),
            None => msg!("Pool {} authority renounced", self.config.seed),
        }

        Ok(())
    }
}
