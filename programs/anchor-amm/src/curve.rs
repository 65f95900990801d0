// Constant Product Curve Math
//
// Integer-only quotes for deposit, withdraw and swap. Every multiply is
// widened to u128 before dividing. Amounts paid out of the pool round down,
// amounts charged into the pool round up, so rounding never erodes k.

use anchor_lang::prelude::*;

use crate::{constants::BPS_DENOMINATOR, errors::AmmError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositQuote {
    pub amount_x: u64,
    pub amount_y: u64,
    pub lp_to_mint: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawQuote {
    pub amount_x: u64,
    pub amount_y: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapQuote {
    pub amount_in: u64,
    pub amount_in_after_fee: u64,
    pub fee: u64,
    pub amount_out: u64,
}

// Constant product value k = x * y
pub fn invariant(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

fn widened_mul_div(a: u64, b: u64, denominator: u64, round_up: bool) -> Result<u128> {
    require!(denominator > 0, AmmError::InvariantViolation);

    let product = (a as u128)
        .checked_mul(b as u128)
        .ok_or(AmmError::Overflow)?;
    let denominator = denominator as u128;

    let quotient = product / denominator;
    if round_up && product % denominator != 0 {
        return quotient.checked_add(1).ok_or(AmmError::Overflow.into());
    }

    Ok(quotient)
}

fn narrow(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(AmmError::Overflow))
}

/// floor(a * b / denominator)
pub fn mul_div_floor(a: u64, b: u64, denominator: u64) -> Result<u64> {
    narrow(widened_mul_div(a, b, denominator, false)?)
}

/// ceil(a * b / denominator)
pub fn mul_div_ceil(a: u64, b: u64, denominator: u64) -> Result<u64> {
    narrow(widened_mul_div(a, b, denominator, true)?)
}

/// Integer square root, rounded down.
pub fn isqrt(value: u128) -> u64 {
    // Start from ceil(value / 2), which is >= sqrt(value) for every input
    let mut x = value;
    let mut y = value / 2 + (value & 1);
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x as u64
}

// First deposit: LP = floor(sqrt(x * y))
//
// Nothing is held back from the first depositor, so burning the whole supply
// always returns the pool to exactly zero.
pub fn initial_lp(amount_x: u64, amount_y: u64) -> Result<u64> {
    require!(amount_x > 0 && amount_y > 0, AmmError::InvalidAmount);

    let product = (amount_x as u128)
        .checked_mul(amount_y as u128)
        .ok_or(AmmError::Overflow)?;

    let lp = isqrt(product);
    require!(lp > 0, AmmError::InvalidAmount);

    Ok(lp)
}

// Deposit quote against the current reserves
//
// Empty supply: the two amounts set the initial price and are taken in full.
// Otherwise: LP = min(max_x * S / X, max_y * S / Y), and the depositor is
// charged ceil(LP * X / S), ceil(LP * Y / S). The binding side is pulled in
// full, the excess of the other side stays with the caller.
pub fn deposit_quote(
    max_x: u64,
    max_y: u64,
    vault_x: u64,
    vault_y: u64,
    lp_supply: u64,
) -> Result<DepositQuote> {
    require!(max_x > 0 && max_y > 0, AmmError::InvalidAmount);

    let quote = if lp_supply == 0 {
        DepositQuote {
            amount_x: max_x,
            amount_y: max_y,
            lp_to_mint: initial_lp(max_x, max_y)?,
        }
    } else {
        if vault_x == 0 || vault_y == 0 {
            msg!(
                "Outstanding supply {} with empty vault ({}, {})",
                lp_supply,
                vault_x,
                vault_y
            );
            return err!(AmmError::InvariantViolation);
        }

        let lp_from_x = widened_mul_div(max_x, lp_supply, vault_x, false)?;
        let lp_from_y = widened_mul_div(max_y, lp_supply, vault_y, false)?;
        let lp_to_mint = narrow(std::cmp::min(lp_from_x, lp_from_y))?;
        require!(lp_to_mint > 0, AmmError::InvalidAmount);

        DepositQuote {
            amount_x: mul_div_ceil(lp_to_mint, vault_x, lp_supply)?,
            amount_y: mul_div_ceil(lp_to_mint, vault_y, lp_supply)?,
            lp_to_mint,
        }
    };

    // Resulting balances and supply must stay representable
    vault_x
        .checked_add(quote.amount_x)
        .ok_or(AmmError::Overflow)?;
    vault_y
        .checked_add(quote.amount_y)
        .ok_or(AmmError::Overflow)?;
    lp_supply
        .checked_add(quote.lp_to_mint)
        .ok_or(AmmError::Overflow)?;

    Ok(quote)
}

// Withdraw quote: amount = floor(lp_burned * vault / lp_supply)
//
// The pre-burn supply is the denominator, so burning the full supply pays out
// both vaults exactly.
pub fn withdraw_quote(
    lp_to_burn: u64,
    vault_x: u64,
    vault_y: u64,
    lp_supply: u64,
) -> Result<WithdrawQuote> {
    require!(lp_to_burn > 0, AmmError::InvalidAmount);
    require_gte!(lp_supply, lp_to_burn, AmmError::InsufficientBalance);

    let quote = WithdrawQuote {
        amount_x: mul_div_floor(lp_to_burn, vault_x, lp_supply)?,
        amount_y: mul_div_floor(lp_to_burn, vault_y, lp_supply)?,
    };

    // Burning LP for nothing
    require!(
        quote.amount_x > 0 || quote.amount_y > 0,
        AmmError::InvalidAmount
    );

    Ok(quote)
}

// Swap quote with the fee taken from the input side
//
// in_net = floor(in * (10000 - fee) / 10000)
// out    = floor(vault_out * in_net / (vault_in + in_net))
//
// which equals vault_out - ceil(k / (vault_in + in_net)), so
// (vault_in + in_net) * (vault_out - out) >= k. The full input, fee included,
// lands in the input vault.
pub fn swap_quote(
    vault_in: u64,
    vault_out: u64,
    amount_in: u64,
    fee_bps: u16,
) -> Result<SwapQuote> {
    require!(amount_in > 0, AmmError::InvalidAmount);
    require!((fee_bps as u64) < BPS_DENOMINATOR, AmmError::InvalidFee);
    require!(
        vault_in > 0 && vault_out > 0,
        AmmError::InsufficientLiquidity
    );

    vault_in
        .checked_add(amount_in)
        .ok_or(AmmError::Overflow)?;

    let amount_in_after_fee =
        mul_div_floor(amount_in, BPS_DENOMINATOR - fee_bps as u64, BPS_DENOMINATOR)?;
    let fee = amount_in
        .checked_sub(amount_in_after_fee)
        .ok_or(AmmError::Overflow)?;

    let denominator = (vault_in as u128)
        .checked_add(amount_in_after_fee as u128)
        .ok_or(AmmError::Overflow)?;
    let amount_out = (vault_out as u128)
        .checked_mul(amount_in_after_fee as u128)
        .ok_or(AmmError::Overflow)?
        / denominator;
    let amount_out = narrow(amount_out)?;

    require!(amount_out > 0, AmmError::InvalidAmount);
    require_gt!(vault_out, amount_out, AmmError::InsufficientLiquidity);

    Ok(SwapQuote {
        amount_in,
        amount_in_after_fee,
        fee,
        amount_out,
    })
}

pub fn assert_invariant_held(k_before: u128, k_after: u128) -> Result<()> {
    if k_after < k_before {
        msg!("k decreased: {} -> {}", k_before, k_after);
        return err!(AmmError::InvariantViolation);
    }
    Ok(())
}
