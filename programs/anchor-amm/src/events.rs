use anchor_lang::prelude::*;

#[event]
pub struct DepositEvent {
    pub config: Pubkey,
    pub user: Pubkey,
    pub amount_x: u64,
    pub amount_y: u64,
    pub lp_minted: u64,
}

#[event]
pub struct WithdrawEvent {
    pub config: Pubkey,
    pub user: Pubkey,
    pub lp_burned: u64,
    pub amount_x: u64,
    pub amount_y: u64,
}

#[event]
pub struct SwapEvent {
    pub config: Pubkey,
    pub user: Pubkey,
    pub is_x: bool,
    pub amount_in: u64,
    pub fee: u64,
    pub amount_out: u64,
}

#[event]
pub struct PoolLockChanged {
    pub config: Pubkey,
    pub authority: Pubkey,
    pub locked: bool,
}
