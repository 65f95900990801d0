use anchor_lang::prelude::*;

#[error_code]
pub enum AmmError {
    // Configuration errors
    #[msg("Fee basis points must be below 10000")]
    InvalidFee,

    #[msg("Token mints must be different - cannot create pool with same token")]
    IdenticalMints,

    // Input errors
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Computed amount is below the caller's minimum (slippage protection)")]
    SlippageExceeded,

    // Balance errors
    #[msg("Caller does not hold enough tokens for this operation")]
    InsufficientBalance,

    #[msg("Pool does not have enough liquidity for this operation")]
    InsufficientLiquidity,

    // Arithmetic errors
    #[msg("Arithmetic overflow occurred")]
    Overflow,

    // Post-condition errors
    #[msg("Pool invariant violated - operation aborted")]
    InvariantViolation,

    // Lock errors
    #[msg("Pool is currently locked - operations are disabled")]
    PoolLocked,

    #[msg("Pool is already locked")]
    PoolAlreadyLocked,

    #[msg("Pool is already unlocked")]
    PoolAlreadyUnlocked,

    // Access control
    #[msg("Only the pool authority can perform this action")]
    Unauthorized,
}
