// Swap Instruction
//
// Swaps tokens using the constant product formula (x * y = k).
// The fee is deducted from the input before pricing and stays in the vault.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, curve, errors::*, events::SwapEvent, helpers, state::*};

#[derive(Accounts)]
pub struct Swap<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    pub mint_x: Box<Account<'info, Mint>>,
    pub mint_y: Box<Account<'info, Mint>>,

    #[account(
        has_one = mint_x,
        has_one = mint_y,
        seeds = [CONFIG_SEED, config.seed.to_le_bytes().as_ref()],
        bump = config.config_bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        associated_token::mint = mint_x,
        associated_token::authority = config,
    )]
    pub vault_x: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = mint_y,
        associated_token::authority = config,
    )]
    pub vault_y: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = mint_x,
        associated_token::authority = user,
    )]
    pub user_x: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = mint_y,
        associated_token::authority = user,
    )]
    pub user_y: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Swap<'info> {
    pub fn swap(&mut self, is_x: bool, amount_in: u64, min_out: u64) -> Result<()> {
        self.config.assert_not_locked()?;

        let vault_x_balance = self.vault_x.amount;
        let vault_y_balance = self.vault_y.amount;
        let k_before = curve::invariant(vault_x_balance, vault_y_balance);

        let (vault_in, vault_out) = match is_x {
            true => (vault_x_balance, vault_y_balance),
            false => (vault_y_balance, vault_x_balance),
        };

        let quote = curve::swap_quote(vault_in, vault_out, amount_in, self.config.fee)?;

        // Slippage protection
        require_gte!(quote.amount_out, min_out, AmmError::SlippageExceeded);

        let user_in_balance = match is_x {
            true => self.user_x.amount,
            false => self.user_y.amount,
        };
        require_gte!(user_in_balance, amount_in, AmmError::InsufficientBalance);

        self.deposit_token(is_x, quote.amount_in)?;
        self.withdraw_token(is_x, quote.amount_out)?;

        // k must not decrease
        self.vault_x.reload()?;
        self.vault_y.reload()?;
        let k_after = curve::invariant(self.vault_x.amount, self.vault_y.amount);
        curve::assert_invariant_held(k_before, k_after)?;

        emit!(SwapEvent {
            config: self.config.key(),
            user: self.user.key(),
            is_x,
            amount_in: quote.amount_in,
            fee: quote.fee,
            amount_out: quote.amount_out,
        });

        match is_x {
            true => msg!("Swapped {} X -> {} Y", quote.amount_in, quote.amount_out),
            false => msg!("Swapped {} Y -> {} X", quote.amount_in, quote.amount_out),
        }

        Ok(())
    }

    // User -> input vault
    fn deposit_token(&self, is_x: bool, amount: u64) -> Result<()> {
        let (from, to) = match is_x {
            true => (self.user_x.to_account_info(), self.vault_x.to_account_info()),
            false => (self.user_y.to_account_info(), self.vault_y.to_account_info()),
        };

        helpers::transfer_tokens(
            amount,
            &self.token_program.to_account_info(),
            &from,
            &to,
            &self.user.to_account_info(),
        )
    }

    // Output vault -> user, the opposite side of the input
    fn withdraw_token(&self, is_x: bool, amount: u64) -> Result<()> {
        let (from, to) = match is_x {
            true => (self.vault_y.to_account_info(), self.user_y.to_account_info()),
            false => (self.vault_x.to_account_info(), self.user_x.to_account_info()),
        };

        let seed_bytes = self.config.seed.to_le_bytes();
        let authority_seeds: &[&[u8]] = &[CONFIG_SEED, &seed_bytes, &[self.config.config_bump]];

        helpers::transfer_from_vault(
            amount,
            &self.token_program.to_account_info(),
            &from,
            &to,
            &self.config.to_account_info(),
            authority_seeds,
        )
    }
}
