//! Off-chain simulation of concentrated-liquidity AMM swaps.
//!
//! This crate reproduces, bit for bit, the fixed-point integer arithmetic a
//! Uniswap V3–style pool contract performs during a swap, so quotes computed
//! here can be used to set slippage bounds for transactions that are later
//! checked on-chain. It exposes:
//!
//! - Low-level math primitives (`math::*`) for ticks, sqrt prices and swap
//!   steps.
//! - An immutable [`Pool`] value object with exact-input and exact-output
//!   swap entry points that return the counter-amount together with the
//!   post-swap pool state.
//! - Deterministic pool-address derivation ([`compute_pool_address`]) for the
//!   factory's CREATE2-style deployment schemes.
//!
//! # Examples
//!
//! ```no_run
//! use clmm_sim::{
//!     math::tick_math::{get_sqrt_ratio_at_tick, nearest_usable_tick, MAX_TICK, MIN_TICK},
//!     Address, FeeAmount, Pool, Tick, Token, TokenAmount, U256,
//! };
//!
//! let token_a = Token::new(1, Address::from([0x11; 20]), 6);
//! let token_b = Token::new(1, Address::from([0x22; 20]), 18);
//!
//! let liquidity = 1_000_000_000_000_000_000u128;
//! let spacing = FeeAmount::Low.tick_spacing();
//! let pool = Pool::new(
//!     token_a.clone(),
//!     token_b,
//!     FeeAmount::Low,
//!     get_sqrt_ratio_at_tick(0).unwrap(),
//!     liquidity,
//!     0,
//!     vec![
//!         Tick::new(nearest_usable_tick(MIN_TICK, spacing), liquidity as i128, liquidity),
//!         Tick::new(nearest_usable_tick(MAX_TICK, spacing), -(liquidity as i128), liquidity),
//!     ],
//! )
//! .unwrap();
//!
//! let input = TokenAmount::new(token_a, U256::from(100u64));
//! let (output, pool_after) = pool.get_output_amount(&input, None).unwrap();
//! println!("out: {}, new tick: {}", output.amount, pool_after.tick_current());
//! ```

pub use alloy_primitives::{Address, B256, I256, U256, U512};

pub mod address;
pub mod error;
pub mod fee;
pub mod math;
pub mod pool;
pub mod price;
pub mod token;

pub use address::{compute_pool_address, AddressScheme, FactoryConfig};
pub use error::Error;
pub use fee::FeeAmount;
pub use pool::clmm_pool::Pool;
pub use pool::tick_list::{Tick, TickList};
pub use price::Price;
pub use token::{Token, TokenAmount};

pub(crate) const U256_1: U256 = U256::from_limbs([1, 0, 0, 0]);

pub(crate) const U160_MAX: U256 = U256::from_limbs([0, 0, 4294967296, 0]);
pub(crate) const U256_E6: U256 = U256::from_limbs([1000000, 0, 0, 0]);

/// Number of fractional bits in the Q64.96 sqrt-price encoding.
pub const RESOLUTION: u8 = 96;
/// 2^96, the Q64.96 scaling factor.
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
