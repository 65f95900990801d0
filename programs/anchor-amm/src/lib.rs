// AMM (Automated Market Maker) Program
//
// Constant product AMM (x * y = k) where each pool is addressed by a u64 seed.
//
// Instructions:
// - initialize: Create config, LP mint and both vaults for a seed
// - deposit: Add tokens in the current ratio, receive LP tokens
// - withdraw: Burn LP tokens, receive a proportional share of both vaults
// - swap: Exchange tokens against the curve, fee charged on the input
// - lock_pool / unlock_pool: Emergency pause mechanism
// - set_authority: Hand off or renounce pool administration

use anchor_lang::prelude::*;

pub mod constants;
pub mod curve;
pub mod errors;
pub mod events;
pub mod helpers;
pub mod instructions;
pub mod pda;
pub mod state;

use instructions::*;

declare_id!("8px1Q5TPqcLa8ZBsaMcJCUwYvt9YpfseEaVYQjgBtgJQ");

#[program]
pub mod anchor_amm {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        seed: u64,
        fee: u16,
        authority: Option<Pubkey>,
    ) -> Result<()> {
        ctx.accounts.initialize(seed, fee, authority, &ctx.bumps)
    }

    pub fn deposit(ctx: Context<Deposit>, max_x: u64, max_y: u64, min_lp: u64) -> Result<()> {
        ctx.accounts.deposit(max_x, max_y, min_lp)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64, min_x: u64, min_y: u64) -> Result<()> {
        ctx.accounts.withdraw(amount, min_x, min_y)
    }

    pub fn swap(ctx: Context<Swap>, is_x: bool, amount_in: u64, min_out: u64) -> Result<()> {
        ctx.accounts.swap(is_x, amount_in, min_out)
    }

    pub fn lock_pool(ctx: Context<LockPool>) -> Result<()> {
        ctx.accounts.lock_pool()
    }

    pub fn unlock_pool(ctx: Context<UnlockPool>) -> Result<()> {
        ctx.accounts.unlock_pool()
    }

    pub fn set_authority(ctx: Context<SetAuthority>, new_authority: Option<Pubkey>) -> Result<()> {
        ctx.accounts.set_authority(new_authority)
    }
}
