use crate::error::{Error, PoolError};
use crate::math::liquidity_math::add_delta;
use crate::math::swap_math::compute_swap_step;
use crate::math::tick_math::{
    get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO,
    MIN_TICK,
};
use crate::pool::clmm_pool::Pool;
use crate::U256_1;
use alloy_primitives::{I256, U256};
use std::ops::{Add, Sub};
use tracing::trace;

// the top level state of the swap, aggregated across steps
struct SwapState {
    // the amount remaining to be swapped in/out of the input/output asset
    amount_specified_remaining: I256,
    // the amount already swapped out/in of the output/input asset
    amount_calculated: I256,
    // current sqrt(price)
    sqrt_price_x96: U256,
    // the tick associated with the current price
    tick: i32,
    // the current liquidity in range
    liquidity: u128,
}

/// Post-swap pool state plus the accumulated counter-amount, handed back to
/// the pool entry points to build the output amount and the next snapshot.
#[derive(Debug)]
pub(crate) struct SwapComputation {
    pub(crate) amount_calculated: I256,
    pub(crate) sqrt_price_x96: U256,
    pub(crate) tick_current: i32,
    pub(crate) liquidity: u128,
}

struct StepComputations {
    // the price at the beginning of the step
    sqrt_price_start_x96: U256,
    // the next tick to swap to from the current tick in the swap direction
    tick_next: i32,
    // whether tick_next is an initialized boundary or the domain edge
    initialized: bool,
    // sqrt(price) for the next tick
    sqrt_price_next_x96: U256,
    // how much is being swapped in this step
    amount_in: U256,
    // how much is being swapped out
    amount_out: U256,
    // how much fee is being paid in
    fee_amount: U256,
}

impl Default for StepComputations {
    fn default() -> Self {
        Self {
            sqrt_price_start_x96: U256::ZERO,
            tick_next: 0,
            initialized: false,
            sqrt_price_next_x96: U256::ZERO,
            amount_in: U256::ZERO,
            amount_out: U256::ZERO,
            fee_amount: U256::ZERO,
        }
    }
}

impl Pool {
    /// Drives the multi-tick swap loop over this pool snapshot.
    ///
    /// `zero_for_one` is the direction flag (token0 in, price decreasing,
    /// when true); `amount_specified` is positive for exact input and
    /// negative for exact output. Without an explicit price limit the loop
    /// runs until the amount is exhausted and fails with
    /// `InsufficientLiquidity` if the tick list runs out first; with a
    /// limit, hitting it ends the swap as a partial fill.
    pub(crate) fn swap(
        &self,
        zero_for_one: bool,
        amount_specified: I256,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<SwapComputation, Error> {
        let explicit_limit = sqrt_price_limit_x96.is_some();
        let sqrt_price_limit_x96 = match sqrt_price_limit_x96 {
            Some(limit) => {
                if zero_for_one {
                    if limit >= self.sqrt_price_x96 || limit <= MIN_SQRT_RATIO {
                        return Err(PoolError::InvalidPriceLimit.into());
                    }
                } else if limit <= self.sqrt_price_x96 || limit >= MAX_SQRT_RATIO {
                    return Err(PoolError::InvalidPriceLimit.into());
                }
                limit
            }
            None if zero_for_one => MIN_SQRT_RATIO + U256_1,
            None => MAX_SQRT_RATIO - U256_1,
        };

        let exact_input = amount_specified.is_positive();

        let mut state = SwapState {
            amount_specified_remaining: amount_specified,
            amount_calculated: I256::ZERO,
            sqrt_price_x96: self.sqrt_price_x96,
            tick: self.tick_current,
            liquidity: self.liquidity,
        };

        while !state.amount_specified_remaining.is_zero()
            && state.sqrt_price_x96 != sqrt_price_limit_x96
        {
            let mut step = StepComputations {
                sqrt_price_start_x96: state.sqrt_price_x96,
                ..StepComputations::default()
            };

            match self.ticks.next_initialized_tick(state.tick, zero_for_one) {
                Some(tick) => {
                    step.tick_next = tick.index;
                    step.initialized = true;
                }
                None if explicit_limit => {
                    // run the remaining stretch against the domain edge;
                    // the limit terminates the loop before the edge price
                    step.tick_next = if zero_for_one { MIN_TICK } else { MAX_TICK };
                    step.initialized = false;
                }
                None => return Err(PoolError::InsufficientLiquidity.into()),
            }

            step.sqrt_price_next_x96 = get_sqrt_ratio_at_tick(step.tick_next)?;

            (
                state.sqrt_price_x96,
                step.amount_in,
                step.amount_out,
                step.fee_amount,
            ) = compute_swap_step(
                state.sqrt_price_x96,
                if zero_for_one {
                    if step.sqrt_price_next_x96 < sqrt_price_limit_x96 {
                        sqrt_price_limit_x96
                    } else {
                        step.sqrt_price_next_x96
                    }
                } else if step.sqrt_price_next_x96 > sqrt_price_limit_x96 {
                    sqrt_price_limit_x96
                } else {
                    step.sqrt_price_next_x96
                },
                state.liquidity,
                state.amount_specified_remaining,
                self.fee.pips(),
            )?;

            trace!(
                tick_next = step.tick_next,
                sqrt_price = %state.sqrt_price_x96,
                amount_in = %step.amount_in,
                amount_out = %step.amount_out,
                "swap step"
            );

            if exact_input {
                state.amount_specified_remaining -=
                    I256::from_raw(step.amount_in + step.fee_amount);
                state.amount_calculated =
                    state.amount_calculated.sub(I256::from_raw(step.amount_out));
            } else {
                state.amount_specified_remaining += I256::from_raw(step.amount_out);
                state.amount_calculated = state
                    .amount_calculated
                    .add(I256::from_raw(step.amount_in + step.fee_amount));
            }

            if state.sqrt_price_x96 == step.sqrt_price_next_x96 {
                // the step ended exactly on the tick boundary: cross it
                if step.initialized {
                    let mut liquidity_net = self.ticks.get_tick(step.tick_next)?.liquidity_net;
                    if zero_for_one {
                        liquidity_net = -liquidity_net;
                    }
                    state.liquidity = add_delta(state.liquidity, liquidity_net)?;
                }
                state.tick = if zero_for_one {
                    step.tick_next - 1
                } else {
                    step.tick_next
                };
            } else if state.sqrt_price_x96 != step.sqrt_price_start_x96 {
                state.tick = get_tick_at_sqrt_ratio(state.sqrt_price_x96)?;
            }
        }

        Ok(SwapComputation {
            amount_calculated: state.amount_calculated,
            sqrt_price_x96: state.sqrt_price_x96,
            tick_current: state.tick,
            liquidity: state.liquidity,
        })
    }
}
