use crate::address::{derive_sorted, FactoryConfig};
use crate::error::{Error, MathError, PoolError};
use crate::fee::FeeAmount;
use crate::math::tick_math::get_tick_at_sqrt_ratio;
use crate::pool::swap::SwapComputation;
use crate::pool::tick_list::{Tick, TickList};
use crate::price::Price;
use crate::token::{Token, TokenAmount};
use alloy_primitives::{Address, Sign, I256, U256};

/// An immutable snapshot of a concentrated-liquidity pool.
///
/// Swap entry points never mutate the snapshot; they return the computed
/// counter-amount together with a new `Pool` value reflecting the post-swap
/// price, tick and in-range liquidity. Snapshots can therefore be shared
/// across threads and quoted against concurrently without synchronization.
#[derive(Clone, Debug)]
pub struct Pool {
    pub(crate) token0: Token,
    pub(crate) token1: Token,
    pub(crate) fee: FeeAmount,
    pub(crate) sqrt_price_x96: U256,
    pub(crate) liquidity: u128,
    pub(crate) tick_current: i32,
    pub(crate) ticks: TickList,
}

impl Pool {
    /// Builds a pool snapshot from unordered tokens and raw state.
    ///
    /// The token pair is canonicalized so that `token0` is the numerically
    /// lower address. Fails if the tokens are invalid as a pair, if the
    /// sqrt price is outside the representable domain, or if it does not
    /// fall inside `tick_current`'s range (a price sitting exactly on a
    /// tick boundary belongs to that tick). Panics if `ticks` is malformed,
    /// see [`TickList::new`].
    pub fn new(
        token_a: Token,
        token_b: Token,
        fee: FeeAmount,
        sqrt_price_x96: U256,
        liquidity: u128,
        tick_current: i32,
        ticks: Vec<Tick>,
    ) -> Result<Self, Error> {
        let (token0, token1) = if token_a.sorts_before(&token_b)? {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        if get_tick_at_sqrt_ratio(sqrt_price_x96)? != tick_current {
            return Err(PoolError::PriceOutOfTickBounds.into());
        }

        let ticks = TickList::new(ticks, fee.tick_spacing());

        Ok(Self {
            token0,
            token1,
            fee,
            sqrt_price_x96,
            liquidity,
            tick_current,
            ticks,
        })
    }

    pub fn token0(&self) -> &Token {
        &self.token0
    }

    pub fn token1(&self) -> &Token {
        &self.token1
    }

    pub fn fee(&self) -> FeeAmount {
        self.fee
    }

    pub fn sqrt_price_x96(&self) -> U256 {
        self.sqrt_price_x96
    }

    pub fn liquidity(&self) -> u128 {
        self.liquidity
    }

    pub fn tick_current(&self) -> i32 {
        self.tick_current
    }

    pub fn ticks(&self) -> &TickList {
        &self.ticks
    }

    /// The chain both tokens live on.
    pub fn chain_id(&self) -> u64 {
        self.token0.chain_id
    }

    pub fn involves_token(&self, token: &Token) -> bool {
        *token == self.token0 || *token == self.token1
    }

    /// Price of token0 denominated in token1, as an exact rational.
    pub fn token0_price(&self) -> Price {
        Price::from_sqrt_ratio_x96(
            self.token0.clone(),
            self.token1.clone(),
            self.sqrt_price_x96,
        )
    }

    /// Price of token1 denominated in token0, as an exact rational.
    pub fn token1_price(&self) -> Price {
        self.token0_price().inverted()
    }

    /// Price of `token` in terms of the other pool token.
    pub fn price_of(&self, token: &Token) -> Result<Price, Error> {
        if *token == self.token0 {
            Ok(self.token0_price())
        } else if *token == self.token1 {
            Ok(self.token1_price())
        } else {
            Err(PoolError::UnknownToken.into())
        }
    }

    /// This pool's deterministic deployment address under the given
    /// factory configuration.
    pub fn address(&self, config: &FactoryConfig) -> Address {
        derive_sorted(config, self.token0.address, self.token1.address, self.fee)
    }

    /// Quotes an exact-input swap: how much of the other token
    /// `input_amount` buys, and the pool state after the swap.
    ///
    /// With `sqrt_price_limit_x96` set, the swap stops at the limit and the
    /// quote is a partial fill; without it, the swap must complete and
    /// fails with `InsufficientLiquidity` if the initialized tick range
    /// cannot absorb the input.
    pub fn get_output_amount(
        &self,
        input_amount: &TokenAmount,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<(TokenAmount, Pool), Error> {
        if !self.involves_token(&input_amount.token) {
            return Err(PoolError::UnknownToken.into());
        }

        let zero_for_one = input_amount.token == self.token0;
        let amount_specified =
            I256::checked_from_sign_and_abs(Sign::Positive, input_amount.amount)
                .ok_or(MathError::Overflow)?;

        let swap = self.swap(zero_for_one, amount_specified, sqrt_price_limit_x96)?;

        let output_token = if zero_for_one {
            self.token1.clone()
        } else {
            self.token0.clone()
        };
        let output = TokenAmount::new(output_token, (-swap.amount_calculated).into_raw());
        Ok((output, self.with_swap_state(&swap)))
    }

    /// Quotes an exact-output swap: how much input is required to withdraw
    /// `output_amount`, and the pool state after the swap.
    pub fn get_input_amount(
        &self,
        output_amount: &TokenAmount,
        sqrt_price_limit_x96: Option<U256>,
    ) -> Result<(TokenAmount, Pool), Error> {
        if !self.involves_token(&output_amount.token) {
            return Err(PoolError::UnknownToken.into());
        }

        let zero_for_one = output_amount.token == self.token1;
        let amount_specified =
            -I256::checked_from_sign_and_abs(Sign::Positive, output_amount.amount)
                .ok_or(MathError::Overflow)?;

        let swap = self.swap(zero_for_one, amount_specified, sqrt_price_limit_x96)?;

        let input_token = if zero_for_one {
            self.token0.clone()
        } else {
            self.token1.clone()
        };
        let input = TokenAmount::new(input_token, swap.amount_calculated.into_raw());
        Ok((input, self.with_swap_state(&swap)))
    }

    fn with_swap_state(&self, swap: &SwapComputation) -> Pool {
        Pool {
            token0: self.token0.clone(),
            token1: self.token1.clone(),
            fee: self.fee,
            sqrt_price_x96: swap.sqrt_price_x96,
            liquidity: swap.liquidity,
            tick_current: swap.tick_current,
            ticks: self.ticks.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::sqrt_price_math::encode_sqrt_ratio_x96;
    use crate::math::tick_math::{nearest_usable_tick, MAX_TICK, MIN_TICK};

    const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

    fn usdc() -> Token {
        Token::with_symbol(1, Address::from([0xb8; 20]), 6, "USDC")
    }

    fn dai() -> Token {
        Token::with_symbol(1, Address::from([0x5d; 20]), 18, "DAI")
    }

    fn weth() -> Token {
        Token::with_symbol(1, Address::from([0xc0; 20]), 18, "WETH")
    }

    fn one_to_one() -> U256 {
        encode_sqrt_ratio_x96(U256::ONE, U256::ONE).unwrap()
    }

    /// 1:1 pool with a single liquidity range spanning the whole domain.
    fn swap_pool(fee: FeeAmount) -> Pool {
        let spacing = fee.tick_spacing();
        Pool::new(
            usdc(),
            dai(),
            fee,
            one_to_one(),
            ONE_ETHER,
            0,
            vec![
                Tick::new(
                    nearest_usable_tick(MIN_TICK, spacing),
                    ONE_ETHER as i128,
                    ONE_ETHER,
                ),
                Tick::new(
                    nearest_usable_tick(MAX_TICK, spacing),
                    -(ONE_ETHER as i128),
                    ONE_ETHER,
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn cannot_pair_tokens_from_different_chains() {
        let other_chain = Token::new(5, Address::from([0xc0; 20]), 18);
        let result = Pool::new(
            usdc(),
            other_chain,
            FeeAmount::Medium,
            one_to_one(),
            0,
            0,
            vec![],
        );
        assert_eq!(result.unwrap_err(), PoolError::ChainMismatch.into());
    }

    #[test]
    fn cannot_pair_a_token_with_itself() {
        let result = Pool::new(
            usdc(),
            usdc(),
            FeeAmount::Medium,
            one_to_one(),
            0,
            0,
            vec![],
        );
        assert_eq!(result.unwrap_err(), PoolError::DuplicateToken.into());
    }

    #[test]
    fn price_must_sit_inside_the_current_tick() {
        let result = Pool::new(usdc(), weth(), FeeAmount::Medium, one_to_one(), 0, 1, vec![]);
        assert_eq!(result.unwrap_err(), PoolError::PriceOutOfTickBounds.into());

        let result = Pool::new(
            usdc(),
            weth(),
            FeeAmount::Medium,
            one_to_one() + U256::ONE,
            0,
            -1,
            vec![],
        );
        assert_eq!(result.unwrap_err(), PoolError::PriceOutOfTickBounds.into());
    }

    #[test]
    fn works_with_valid_arguments_for_empty_pool() {
        for fee in [
            FeeAmount::Lowest,
            FeeAmount::Low,
            FeeAmount::Medium,
            FeeAmount::High,
        ] {
            Pool::new(usdc(), weth(), fee, one_to_one(), 0, 0, vec![]).unwrap();
        }
    }

    #[test]
    fn token0_is_always_the_lower_address() {
        let pool = Pool::new(usdc(), dai(), FeeAmount::Low, one_to_one(), 0, 0, vec![]).unwrap();
        assert_eq!(*pool.token0(), dai());
        assert_eq!(*pool.token1(), usdc());

        let flipped = Pool::new(dai(), usdc(), FeeAmount::Low, one_to_one(), 0, 0, vec![]).unwrap();
        assert_eq!(*flipped.token0(), dai());
        assert_eq!(*flipped.token1(), usdc());
    }

    #[test]
    fn prices_follow_the_sqrt_price() {
        // 101e6 token1 per 100e18 token0
        let sqrt_price = encode_sqrt_ratio_x96(
            U256::from(101_000_000u64),
            U256::from(100u8) * U256::from(10u8).pow(U256::from(18u8)),
        )
        .unwrap();
        let tick = get_tick_at_sqrt_ratio(sqrt_price).unwrap();

        let pool = Pool::new(usdc(), dai(), FeeAmount::Low, sqrt_price, 0, tick, vec![]).unwrap();

        assert_eq!(pool.token0_price().base, *pool.token0());
        assert_eq!(pool.token1_price(), pool.token0_price().inverted());
        // construction order does not change the prices
        let flipped = Pool::new(dai(), usdc(), FeeAmount::Low, sqrt_price, 0, tick, vec![]).unwrap();
        assert_eq!(flipped.token0_price(), pool.token0_price());
    }

    #[test]
    fn price_of_maps_tokens_to_their_price() {
        let pool = Pool::new(usdc(), dai(), FeeAmount::Low, one_to_one(), 0, 0, vec![]).unwrap();
        assert_eq!(pool.price_of(&dai()).unwrap(), pool.token0_price());
        assert_eq!(pool.price_of(&usdc()).unwrap(), pool.token1_price());
        assert_eq!(
            pool.price_of(&weth()).unwrap_err(),
            PoolError::UnknownToken.into()
        );
    }

    #[test]
    fn chain_id_is_the_shared_token_chain() {
        let pool = Pool::new(usdc(), dai(), FeeAmount::Low, one_to_one(), 0, 0, vec![]).unwrap();
        assert_eq!(pool.chain_id(), 1);
    }

    #[test]
    fn involves_token_covers_exactly_the_pair() {
        let pool = Pool::new(usdc(), dai(), FeeAmount::Low, one_to_one(), 0, 0, vec![]).unwrap();
        assert!(pool.involves_token(&usdc()));
        assert!(pool.involves_token(&dai()));
        assert!(!pool.involves_token(&weth()));
    }

    #[test]
    fn exact_input_token0_for_token1() {
        let pool = swap_pool(FeeAmount::Low);
        let input = TokenAmount::new(pool.token0().clone(), U256::from(100u8));

        let (output, pool_after) = pool.get_output_amount(&input, None).unwrap();

        assert_eq!(output.token, *pool.token1());
        // 100 in yields 98 out: fee plus rounding in the pool's favor
        assert_eq!(output.amount, U256::from(98u8));
        assert!(pool_after.sqrt_price_x96() < pool.sqrt_price_x96());
        // the original snapshot is untouched
        assert_eq!(pool.sqrt_price_x96(), one_to_one());
    }

    #[test]
    fn exact_input_token1_for_token0() {
        let pool = swap_pool(FeeAmount::Low);
        let input = TokenAmount::new(pool.token1().clone(), U256::from(100u8));

        let (output, pool_after) = pool.get_output_amount(&input, None).unwrap();

        assert_eq!(output.token, *pool.token0());
        assert_eq!(output.amount, U256::from(98u8));
        assert!(pool_after.sqrt_price_x96() > pool.sqrt_price_x96());
    }

    #[test]
    fn exact_output_recovers_the_original_input() {
        let pool = swap_pool(FeeAmount::Low);

        // token0 -> token1: asking for the 98 back out costs exactly 100 in
        let requested = TokenAmount::new(pool.token1().clone(), U256::from(98u8));
        let (input, _) = pool.get_input_amount(&requested, None).unwrap();
        assert_eq!(input.token, *pool.token0());
        assert_eq!(input.amount, U256::from(100u8));

        // and the mirror direction
        let requested = TokenAmount::new(pool.token0().clone(), U256::from(98u8));
        let (input, _) = pool.get_input_amount(&requested, None).unwrap();
        assert_eq!(input.token, *pool.token1());
        assert_eq!(input.amount, U256::from(100u8));
    }

    #[test]
    fn swap_rejects_foreign_tokens() {
        let pool = swap_pool(FeeAmount::Low);
        let foreign = TokenAmount::new(weth(), U256::from(100u8));

        assert_eq!(
            pool.get_output_amount(&foreign, None).unwrap_err(),
            PoolError::UnknownToken.into()
        );
        assert_eq!(
            pool.get_input_amount(&foreign, None).unwrap_err(),
            PoolError::UnknownToken.into()
        );
    }

    #[test]
    fn swap_exhausting_the_tick_range_is_insufficient_liquidity() {
        let pool = swap_pool(FeeAmount::Low);
        let input = TokenAmount::new(
            pool.token0().clone(),
            U256::from(10u8).pow(U256::from(40u8)),
        );

        assert_eq!(
            pool.get_output_amount(&input, None).unwrap_err(),
            PoolError::InsufficientLiquidity.into()
        );
    }

    #[test]
    fn swap_against_an_empty_pool_is_insufficient_liquidity() {
        let pool = Pool::new(usdc(), dai(), FeeAmount::Low, one_to_one(), 0, 0, vec![]).unwrap();
        let input = TokenAmount::new(pool.token0().clone(), U256::from(100u8));

        assert_eq!(
            pool.get_output_amount(&input, None).unwrap_err(),
            PoolError::InsufficientLiquidity.into()
        );
    }

    #[test]
    fn big_amounts_near_the_53_bit_boundary_are_exact() {
        // (2^53, 2^53) must encode and compare without precision loss
        let big = U256::from(9007199254740992u64 + 1);
        let sqrt_price = encode_sqrt_ratio_x96(big, big).unwrap();
        assert_eq!(sqrt_price, one_to_one());

        let spacing = FeeAmount::Low.tick_spacing();
        let pool = Pool::new(
            usdc(),
            dai(),
            FeeAmount::Low,
            sqrt_price,
            ONE_ETHER,
            0,
            vec![
                Tick::new(
                    nearest_usable_tick(MIN_TICK, spacing),
                    ONE_ETHER as i128,
                    ONE_ETHER,
                ),
                Tick::new(
                    nearest_usable_tick(MAX_TICK, spacing),
                    -(ONE_ETHER as i128),
                    ONE_ETHER,
                ),
            ],
        )
        .unwrap();

        let input = TokenAmount::new(pool.token0().clone(), U256::from(100u8));
        let (output, _) = pool.get_output_amount(&input, None).unwrap();
        assert_eq!(output.amount, U256::from(98u8));
    }

    #[test]
    fn post_swap_pool_keeps_the_pair_and_tick_list() {
        let pool = swap_pool(FeeAmount::Low);
        let input = TokenAmount::new(pool.token0().clone(), U256::from(100u8));

        let (_, pool_after) = pool.get_output_amount(&input, None).unwrap();

        assert_eq!(pool_after.token0(), pool.token0());
        assert_eq!(pool_after.token1(), pool.token1());
        assert_eq!(pool_after.fee(), pool.fee());
        assert_eq!(pool_after.ticks(), pool.ticks());
        assert_eq!(
            pool_after.tick_current(),
            get_tick_at_sqrt_ratio(pool_after.sqrt_price_x96()).unwrap()
        );
    }
}
