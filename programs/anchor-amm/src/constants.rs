// AMM Program Constants

pub const CONFIG_SEED: &[u8] = b"config";
pub const LP_MINT_SEED: &[u8] = b"lp";
pub const BPS_DENOMINATOR: u64 = 10_000; // fee must stay strictly below
pub const LP_DECIMALS: u8 = 6;
pub const ANCHOR_DISCRIMINATOR: usize = 8;
