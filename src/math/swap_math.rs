use crate::error::Error;
use crate::math::math_helpers::{mul_div, mul_div_rounding_up};
use crate::math::sqrt_price_math::{
    get_amount_0_delta_base, get_amount_1_delta_base, get_next_sqrt_price_from_input,
    get_next_sqrt_price_from_output,
};
use crate::U256_E6;
use alloy_primitives::{I256, U256};

/// Computes one swap step between the current sqrt price and a target price
/// that must not be exceeded, given the in-range liquidity and the signed
/// remaining amount (positive = exact input, negative = exact output).
///
/// Returns `(sqrt_ratio_next, amount_in, amount_out, fee_amount)`.
///
/// The swap direction is inferred from the price relationship: the step
/// moves token0 into the pool when `sqrt_ratio_current >= sqrt_ratio_target`
/// and token1 into the pool otherwise. Amounts the trader pays are rounded
/// up, amounts the trader receives are rounded down; the fee plus the
/// in-amount never exceeds a positive `amount_remaining`.
pub fn compute_swap_step(
    sqrt_ratio_current_x96: U256,
    sqrt_ratio_target_x96: U256,
    liquidity: u128,
    amount_remaining: I256,
    fee_pips: u32,
) -> Result<(U256, U256, U256, U256), Error> {
    let zero_for_one = sqrt_ratio_current_x96 >= sqrt_ratio_target_x96;
    let exact_in = amount_remaining >= I256::ZERO;

    let sqrt_ratio_next_x96: U256;
    let mut amount_in = U256::ZERO;
    let mut amount_out = U256::ZERO;

    if exact_in {
        let amount_remaining_less_fee = mul_div(
            amount_remaining.into_raw(),
            U256::from(1_000_000 - fee_pips),
            U256_E6,
        )?;
        amount_in = if zero_for_one {
            get_amount_0_delta_base(
                sqrt_ratio_target_x96,
                sqrt_ratio_current_x96,
                liquidity,
                true,
            )?
        } else {
            get_amount_1_delta_base(
                sqrt_ratio_current_x96,
                sqrt_ratio_target_x96,
                liquidity,
                true,
            )?
        };
        sqrt_ratio_next_x96 = if amount_remaining_less_fee >= amount_in {
            sqrt_ratio_target_x96
        } else {
            get_next_sqrt_price_from_input(
                sqrt_ratio_current_x96,
                liquidity,
                amount_remaining_less_fee,
                zero_for_one,
            )?
        };
    } else {
        amount_out = if zero_for_one {
            get_amount_1_delta_base(
                sqrt_ratio_target_x96,
                sqrt_ratio_current_x96,
                liquidity,
                false,
            )?
        } else {
            get_amount_0_delta_base(
                sqrt_ratio_current_x96,
                sqrt_ratio_target_x96,
                liquidity,
                false,
            )?
        };
        sqrt_ratio_next_x96 = if amount_remaining.unsigned_abs() >= amount_out {
            sqrt_ratio_target_x96
        } else {
            get_next_sqrt_price_from_output(
                sqrt_ratio_current_x96,
                liquidity,
                amount_remaining.unsigned_abs(),
                zero_for_one,
            )?
        };
    }

    let max = sqrt_ratio_target_x96 == sqrt_ratio_next_x96;

    if zero_for_one {
        if !(max && exact_in) {
            amount_in = get_amount_0_delta_base(
                sqrt_ratio_next_x96,
                sqrt_ratio_current_x96,
                liquidity,
                true,
            )?;
        }
        if !(max && !exact_in) {
            amount_out = get_amount_1_delta_base(
                sqrt_ratio_next_x96,
                sqrt_ratio_current_x96,
                liquidity,
                false,
            )?;
        }
    } else {
        if !(max && exact_in) {
            amount_in = get_amount_1_delta_base(
                sqrt_ratio_current_x96,
                sqrt_ratio_next_x96,
                liquidity,
                true,
            )?;
        }
        if !(max && !exact_in) {
            amount_out = get_amount_0_delta_base(
                sqrt_ratio_current_x96,
                sqrt_ratio_next_x96,
                liquidity,
                false,
            )?;
        }
    }

    // never hand out more than an exact-output request asked for
    if !exact_in && amount_out > amount_remaining.unsigned_abs() {
        amount_out = amount_remaining.unsigned_abs();
    }

    let fee_amount = if exact_in && sqrt_ratio_next_x96 != sqrt_ratio_target_x96 {
        // the step ended inside the range: the unspent remainder is the fee
        amount_remaining.into_raw() - amount_in
    } else {
        mul_div_rounding_up(
            amount_in,
            U256::from(fee_pips),
            U256::from(1_000_000 - fee_pips),
        )?
    };

    Ok((sqrt_ratio_next_x96, amount_in, amount_out, fee_amount))
}
