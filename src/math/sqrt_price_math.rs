use crate::error::{Error, MathError, StateError};
use crate::math::math_helpers::{div_rounding_up, mul_div, mul_div_rounding_up, unlikely};
use crate::{Q96, RESOLUTION, U160_MAX};
use alloy_primitives::{I256, U256, U512};

/// Computes the next sqrt price after adding or removing `amount` of token0,
/// rounding the resulting price up.
pub fn get_next_sqrt_price_from_amount_0_rounding_up(
    sqrt_p_x96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, Error> {
    if amount.is_zero() {
        return Ok(sqrt_p_x96);
    }

    let numerator1: U256 = U256::from(liquidity) << RESOLUTION;
    let product: U256 = amount.wrapping_mul(sqrt_p_x96);

    if add {
        if product.wrapping_div(amount) == sqrt_p_x96 {
            let denominator = numerator1.wrapping_add(product);
            if denominator >= numerator1 {
                return mul_div_rounding_up(numerator1, sqrt_p_x96, denominator)
                    .map_err(Error::from);
            }
        }
        Ok(div_rounding_up(
            numerator1,
            (numerator1 / sqrt_p_x96) + amount,
        ))
    } else {
        if product.wrapping_div(amount) != sqrt_p_x96 || numerator1 <= product {
            return Err(StateError::InsufficientReserves.into());
        }
        let denominator = numerator1 - product;
        mul_div_rounding_up(numerator1, sqrt_p_x96, denominator).map_err(Error::from)
    }
}

/// Computes the next sqrt price after adding or removing `amount` of token1,
/// rounding the resulting price down.
pub fn get_next_sqrt_price_from_amount_1_rounding_down(
    sqrt_p_x96: U256,
    liquidity: u128,
    amount: U256,
    add: bool,
) -> Result<U256, Error> {
    let liquidity = U256::from(liquidity);
    if add {
        let quotient: U256 = if amount <= U160_MAX {
            (amount << RESOLUTION) / liquidity
        } else {
            mul_div(amount, Q96, liquidity)?
        };

        let result = sqrt_p_x96 + quotient;
        if result <= U160_MAX {
            Ok(result)
        } else {
            Err(MathError::Overflow.into())
        }
    } else {
        let quotient: U256 = if amount <= U160_MAX {
            div_rounding_up(amount << RESOLUTION, liquidity)
        } else {
            mul_div_rounding_up(amount, Q96, liquidity)?
        };

        if sqrt_p_x96 <= quotient {
            return Err(StateError::InsufficientReserves.into());
        }
        let result = sqrt_p_x96 - quotient;

        if result <= U160_MAX {
            Ok(result)
        } else {
            Err(MathError::Overflow.into())
        }
    }
}

/// Token0 amount delta between two sqrt prices for a given liquidity,
/// optionally rounding up. Used by both exact-in and exact-out flows.
pub fn get_amount_0_delta_base(
    mut sqrt_ratio_a_x96: U256,
    mut sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, Error> {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    };

    if sqrt_ratio_a_x96.is_zero() {
        return Err(StateError::SqrtPriceIsZero.into());
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = sqrt_ratio_b_x96 - sqrt_ratio_a_x96;

    if round_up {
        Ok(div_rounding_up(
            mul_div_rounding_up(numerator1, numerator2, sqrt_ratio_b_x96)?,
            sqrt_ratio_a_x96,
        ))
    } else {
        Ok(mul_div(numerator1, numerator2, sqrt_ratio_b_x96)? / sqrt_ratio_a_x96)
    }
}

/// Token1 amount delta between two sqrt prices for a given liquidity,
/// optionally rounding up.
pub fn get_amount_1_delta_base(
    mut sqrt_ratio_a_x96: U256,
    mut sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256, MathError> {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96) = (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    };
    let liquidity = U256::from(liquidity);

    if round_up {
        mul_div_rounding_up(liquidity, sqrt_ratio_b_x96 - sqrt_ratio_a_x96, Q96)
    } else {
        mul_div(liquidity, sqrt_ratio_b_x96 - sqrt_ratio_a_x96, Q96)
    }
}

/// Signed token0 amount delta between two sqrt prices for a signed
/// liquidity amount.
pub fn get_amount_0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: i128,
) -> Result<I256, Error> {
    if liquidity < 0 {
        Ok(-I256::from_raw(get_amount_0_delta_base(
            sqrt_ratio_a_x96,
            sqrt_ratio_b_x96,
            liquidity.unsigned_abs(),
            false,
        )?))
    } else {
        Ok(I256::from_raw(get_amount_0_delta_base(
            sqrt_ratio_a_x96,
            sqrt_ratio_b_x96,
            liquidity as u128,
            true,
        )?))
    }
}

/// Signed token1 amount delta between two sqrt prices for a signed
/// liquidity amount.
pub fn get_amount_1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: i128,
) -> Result<I256, MathError> {
    if liquidity < 0 {
        Ok(-I256::from_raw(get_amount_1_delta_base(
            sqrt_ratio_a_x96,
            sqrt_ratio_b_x96,
            liquidity.unsigned_abs(),
            false,
        )?))
    } else {
        Ok(I256::from_raw(get_amount_1_delta_base(
            sqrt_ratio_a_x96,
            sqrt_ratio_b_x96,
            liquidity as u128,
            true,
        )?))
    }
}

/// Next sqrt price when swapping `amount_in` into the pool, choosing the
/// token0/token1 branch from `zero_for_one`.
pub fn get_next_sqrt_price_from_input(
    sqrt_p_x96: U256,
    liquidity: u128,
    amount_in: U256,
    zero_for_one: bool,
) -> Result<U256, Error> {
    if unlikely(sqrt_p_x96.is_zero()) {
        return Err(StateError::SqrtPriceIsZero.into());
    }
    if unlikely(liquidity == 0) {
        return Err(StateError::LiquidityIsZero.into());
    }

    if zero_for_one {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_p_x96, liquidity, amount_in, true)
    } else {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_p_x96, liquidity, amount_in, true)
    }
}

/// Next sqrt price when swapping `amount_out` out of the pool, choosing the
/// token0/token1 branch from `zero_for_one`.
pub fn get_next_sqrt_price_from_output(
    sqrt_p_x96: U256,
    liquidity: u128,
    amount_out: U256,
    zero_for_one: bool,
) -> Result<U256, Error> {
    if unlikely(sqrt_p_x96.is_zero()) {
        return Err(StateError::SqrtPriceIsZero.into());
    }
    if unlikely(liquidity == 0) {
        return Err(StateError::LiquidityIsZero.into());
    }

    if zero_for_one {
        get_next_sqrt_price_from_amount_1_rounding_down(sqrt_p_x96, liquidity, amount_out, false)
    } else {
        get_next_sqrt_price_from_amount_0_rounding_up(sqrt_p_x96, liquidity, amount_out, false)
    }
}

/// Encodes the sqrt of the price `amount1 / amount0` as a Q64.96 value: the
/// floor integer square root of `amount1 * 2^192 / amount0`, computed in
/// 512-bit intermediate space so large reserves do not overflow.
pub fn encode_sqrt_ratio_x96(amount1: U256, amount0: U256) -> Result<U256, Error> {
    if amount0.is_zero() {
        return Err(MathError::DivisionByZero.into());
    }

    let limbs = amount1.as_limbs();
    let numerator =
        U512::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0]) << (2 * RESOLUTION);
    let a0_limbs = amount0.as_limbs();
    let denominator = U512::from_limbs([
        a0_limbs[0],
        a0_limbs[1],
        a0_limbs[2],
        a0_limbs[3],
        0,
        0,
        0,
        0,
    ]);

    // sqrt of a value below 2^448 always fits in 256 bits
    let root = (numerator / denominator).root(2);
    let root_limbs = root.as_limbs();
    Ok(U256::from_limbs([
        root_limbs[0],
        root_limbs[1],
        root_limbs[2],
        root_limbs[3],
    ]))
}
