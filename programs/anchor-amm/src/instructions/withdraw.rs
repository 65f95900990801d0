// Withdraw Instruction
//
// Burns LP tokens and returns the proportional share of both vaults,
// priced against the supply before the burn.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, curve, errors::*, events::WithdrawEvent, helpers, state::*};

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut)]
    pub user: Signer<'info>,

    pub mint_x: Box<Account<'info, Mint>>,
    pub mint_y: Box<Account<'info, Mint>>,

    #[account(
        has_one = mint_x,
        has_one = mint_y,
        has_one = mint_lp,
        seeds = [CONFIG_SEED, config.seed.to_le_bytes().as_ref()],
        bump = config.config_bump,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        mut,
        seeds = [LP_MINT_SEED, config.key().as_ref()],
        bump = config.lp_bump,
    )]
    pub mint_lp: Box<Account<'info, Mint>>,

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

    #[account(
        mut,
        token::mint = mint_lp,
        token::authority = user,
    )]
    pub user_lp: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Withdraw<'info> {
    pub fn withdraw(&mut self, amount: u64, min_x: u64, min_y: u64) -> Result<()> {
        self.config.assert_not_locked()?;

        require!(amount > 0, AmmError::InvalidAmount);
        require_gte!(self.user_lp.amount, amount, AmmError::InsufficientBalance);

        let lp_supply = self.mint_lp.supply;
        let quote = curve::withdraw_quote(
            amount,
            self.vault_x.amount,
            self.vault_y.amount,
            lp_supply,
        )?;

        // Slippage protection
        require_gte!(quote.amount_x, min_x, AmmError::SlippageExceeded);
        require_gte!(quote.amount_y, min_y, AmmError::SlippageExceeded);

        self.burn_lp_tokens(amount)?;
        self.withdraw_token(true, quote.amount_x)?;
        self.withdraw_token(false, quote.amount_y)?;

        // Burning the last LP token must leave nothing behind
        if amount == lp_supply {
            self.vault_x.reload()?;
            self.vault_y.reload()?;
            if self.vault_x.amount != 0 || self.vault_y.amount != 0 {
                msg!(
                    "Supply burned but vaults hold ({}, {})",
                    self.vault_x.amount,
                    self.vault_y.amount
                );
                return err!(AmmError::InvariantViolation);
            }
        }

        emit!(WithdrawEvent {
            config: self.config.key(),
            user: self.user.key(),
            lp_burned: amount,
            amount_x: quote.amount_x,
            amount_y: quote.amount_y,
        });

        msg!(
            "Withdrawn: {} LP -> {} X, {} Y",
            amount,
            quote.amount_x,
            quote.amount_y
        );

        Ok(())
    }

    fn burn_lp_tokens(&self, amount: u64) -> Result<()> {
        helpers::burn_lp_tokens(
            amount,
            &self.token_program.to_account_info(),
            &self.mint_lp.to_account_info(),
            &self.user_lp.to_account_info(),
            &self.user.to_account_info(),
        )
    }

    fn withdraw_token(&self, is_x: bool, amount: u64) -> Result<()> {
        let (from, to) = match is_x {
            true => (self.vault_x.to_account_info(), self.user_x.to_account_info()),
            false => (self.vault_y.to_account_info(), self.user_y.to_account_info()),
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
