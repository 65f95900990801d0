// Initialize Instruction
//
// Creates the config, the LP mint and both vaults for a new seed.
// A seed can only be initialized once: `init` fails when the config PDA
// already holds an account, so an existing pool is never overwritten.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, state::*};

#[derive(Accounts)]
#[instruction(seed: u64)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub initializer: Signer<'info>,

    pub mint_x: Box<Account<'info, Mint>>,
    pub mint_y: Box<Account<'info, Mint>>,

    // Init fields are validated first, in order. The mint check sits on the
    // first one so identical mints fail before the vault addresses collide.
    #[account(
        init,
        payer = initializer,
        space = ANCHOR_DISCRIMINATOR + Config::INIT_SPACE,
        seeds = [CONFIG_SEED, seed.to_le_bytes().as_ref()],
        bump,
        constraint = mint_x.key() != mint_y.key() @ AmmError::IdenticalMints,
    )]
    pub config: Box<Account<'info, Config>>,

    #[account(
        init,
        payer = initializer,
        seeds = [LP_MINT_SEED, config.key().as_ref()],
        bump,
        mint::decimals = LP_DECIMALS,
        mint::authority = config,
    )]
    pub mint_lp: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = initializer,
        associated_token::mint = mint_x,
        associated_token::authority = config,
    )]
    pub vault_x: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = initializer,
        associated_token::mint = mint_y,
        associated_token::authority = config,
    )]
    pub vault_y: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(
        &mut self,
        seed: u64,
        fee: u16,
        authority: Option<Pubkey>,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        Config::validate_fee(fee)?;

        self.config.set_inner(Config {
            seed,
            authority,
            mint_x: self.mint_x.key(),
            mint_y: self.mint_y.key(),
            mint_lp: self.mint_lp.key(),
            fee,
            locked: false,
            config_bump: bumps.config,
            lp_bump: bumps.mint_lp,
        });

        msg!(
            "Pool {} initialized: {} / {}",
            seed,
            self.mint_x.key(),
            self.mint_y.key()
        );
        msg!("Fee: {} basis points", fee);

        Ok(())
    }
}
