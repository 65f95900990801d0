// Pool Configuration State

use anchor_lang::prelude::*;

use crate::{constants::*, errors::*};

#[account]
#[derive(InitSpace)]
pub struct Config {
    pub seed: u64,                 // Part of the config PDA
    pub authority: Option<Pubkey>, // Can lock/unlock, None once renounced
    pub mint_x: Pubkey,            // First token in pair
    pub mint_y: Pubkey,            // Second token in pair
    pub mint_lp: Pubkey,           // LP token mint, ["lp", config]
    pub fee: u16,                  // Swap fee in basis points (e.g., 30 = 0.30%)
    pub locked: bool,              // Emergency pause state
    pub config_bump: u8,           // PDA bump for config
    pub lp_bump: u8,               // PDA bump for LP mint
}

impl Config {
    pub fn lock(&mut self) -> Result<()> {
        require!(!self.locked, AmmError::PoolAlreadyLocked);
        self.locked = true;
        Ok(())
    }

    pub fn unlock(&mut self) -> Result<()> {
        require!(self.locked, AmmError::PoolAlreadyUnlocked);
        self.locked = false;
        Ok(())
    }

    pub fn assert_not_locked(&self) -> Result<()> {
        require!(!self.locked, AmmError::PoolLocked);
        Ok(())
    }

    pub fn assert_is_authority(&self, caller: &Pubkey) -> Result<()> {
        match self.authority {
            Some(authority) if authority == *caller => Ok(()),
            Some(authority) => {
                msg!("Expected authority {}, got {}", authority, caller);
                err!(AmmError::Unauthorized)
            }
            None => {
                msg!("Pool authority has been renounced");
                err!(AmmError::Unauthorized)
            }
        }
    }

    pub fn validate_fee(fee: u16) -> Result<()> {
        require_gt!(BPS_DENOMINATOR, fee as u64, AmmError::InvalidFee);
        Ok(())
    }
}
