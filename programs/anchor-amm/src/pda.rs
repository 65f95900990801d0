// Pool Address Derivation
//
// Every account a pool uses is derived from the seed, so clients and the
// program compute the same addresses without a registry. The instruction
// contexts enforce these derivations through `seeds`/`bump` and
// `associated_token` constraints.

use anchor_lang::prelude::*;
use anchor_spl::associated_token::get_associated_token_address;

use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolAddresses {
    pub config: Pubkey,
    pub config_bump: u8,
    pub mint_lp: Pubkey,
    pub lp_bump: u8,
    pub vault_x: Pubkey,
    pub vault_y: Pubkey,
}

impl PoolAddresses {
    pub fn derive(seed: u64, mint_x: &Pubkey, mint_y: &Pubkey) -> Self {
        let (config, config_bump) = config_address(seed);
        let (mint_lp, lp_bump) = lp_mint_address(&config);

        Self {
            config,
            config_bump,
            mint_lp,
            lp_bump,
            vault_x: vault_address(&config, mint_x),
            vault_y: vault_address(&config, mint_y),
        }
    }
}

// ["config", seed_le]
pub fn config_address(seed: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED, &seed.to_le_bytes()], &crate::ID)
}

// ["lp", config]
pub fn lp_mint_address(config: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LP_MINT_SEED, config.as_ref()], &crate::ID)
}

// Canonical token account held by the config PDA
pub fn vault_address(config: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address(config, mint)
}
