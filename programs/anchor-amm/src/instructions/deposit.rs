// Deposit Instruction
//
// Adds liquidity to the pool and mints LP tokens.
// First deposit: LP = sqrt(x * y), the amounts set the price
// Subsequent: LP proportional to the binding side, charged in the pool ratio

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, curve, errors::*, events::DepositEvent, helpers, state::*};

#[derive(Accounts)]
pub struct Deposit<'info> {
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
        mint::authority = config,
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
        mut,
        token::mint = mint_x,
        token::authority = user,
    )]
    pub user_x: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint_y,
        token::authority = user,
    )]
    pub user_y: Box<Account<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = user,
        associated_token::mint = mint_lp,
        associated_token::authority = user,
    )]
    pub user_lp: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Deposit<'info> {
    pub fn deposit(&mut self, max_x: u64, max_y: u64, min_lp: u64) -> Result<()> {
        self.config.assert_not_locked()?;

        let vault_x_balance = self.vault_x.amount;
        let vault_y_balance = self.vault_y.amount;
        let lp_supply = self.mint_lp.supply;

        let quote = curve::deposit_quote(
            max_x,
            max_y,
            vault_x_balance,
            vault_y_balance,
            lp_supply,
        )?;

        // Slippage protection
        require_gte!(quote.lp_to_mint, min_lp, AmmError::SlippageExceeded);

        // Caller funds
        require_gte!(self.user_x.amount, quote.amount_x, AmmError::InsufficientBalance);
        require_gte!(self.user_y.amount, quote.amount_y, AmmError::InsufficientBalance);

        self.deposit_token(true, quote.amount_x)?;
        self.deposit_token(false, quote.amount_y)?;
        self.mint_lp_tokens(quote.lp_to_mint)?;

        self.assert_deposit_applied(vault_x_balance, vault_y_balance, lp_supply, &quote)?;

        emit!(DepositEvent {
            config: self.config.key(),
            user: self.user.key(),
            amount_x: quote.amount_x,
            amount_y: quote.amount_y,
            lp_minted: quote.lp_to_mint,
        });

        msg!(
            "Deposited: {} X, {} Y -> {} LP",
            quote.amount_x,
            quote.amount_y,
            quote.lp_to_mint
        );

        Ok(())
    }

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

    fn mint_lp_tokens(&self, amount: u64) -> Result<()> {
        let seed_bytes = self.config.seed.to_le_bytes();
        let authority_seeds: &[&[u8]] = &[CONFIG_SEED, &seed_bytes, &[self.config.config_bump]];

        helpers::mint_lp_tokens(
            amount,
            &self.token_program.to_account_info(),
            &self.mint_lp.to_account_info(),
            &self.user_lp.to_account_info(),
            &self.config.to_account_info(),
            authority_seeds,
        )
    }

    // Re-read vaults and supply after the CPIs
    fn assert_deposit_applied(
        &mut self,
        vault_x_before: u64,
        vault_y_before: u64,
        lp_supply_before: u64,
        quote: &curve::DepositQuote,
    ) -> Result<()> {
        self.vault_x.reload()?;
        self.vault_y.reload()?;
        self.mint_lp.reload()?;

        let applied = self.vault_x.amount == vault_x_before + quote.amount_x
            && self.vault_y.amount == vault_y_before + quote.amount_y
            && self.mint_lp.supply == lp_supply_before + quote.lp_to_mint;

        if !applied {
            msg!(
                "Deposit mismatch: vaults ({}, {}), supply {}",
                self.vault_x.amount,
                self.vault_y.amount,
                self.mint_lp.supply
            );
            return err!(AmmError::InvariantViolation);
        }

        Ok(())
    }
}
