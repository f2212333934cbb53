use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MathError {
    #[error("math error - overflow")]
    Overflow,
    #[error("math error - underflow")]
    Underflow,
    #[error("math error - division by zero")]
    DivisionByZero,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("state error - sqrtPrice out of bounds")]
    SqrtPriceOutOfBounds,
    #[error("state error - sqrtPrice is 0")]
    SqrtPriceIsZero,

    #[error("state error - tick out of bounds")]
    TickOutOfBounds,

    #[error("state error - liquidity is 0")]
    LiquidityIsZero,

    #[error("state error - requested amount exceeds pool reserves")]
    InsufficientReserves,

    #[error("state error - tick {0} is not initialized")]
    TickNotFound(i32),
}

/// Failures of the pool value object and its swap entry points. These are
/// caller errors: the inputs must be fixed, nothing is retried internally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("pool error - tokens belong to different chains")]
    ChainMismatch,

    #[error("pool error - fee is not one of the supported tiers")]
    InvalidFee,

    #[error("pool error - token0 and token1 resolve to the same token")]
    DuplicateToken,

    #[error("pool error - sqrtPrice does not fall in the current tick's range")]
    PriceOutOfTickBounds,

    #[error("pool error - token is not part of this pool")]
    UnknownToken,

    #[error("pool error - price limit violates swap direction or domain bounds")]
    InvalidPriceLimit,

    #[error("pool error - initialized ticks exhausted before the requested amount was filled")]
    InsufficientLiquidity,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] MathError),

    #[error(transparent)]
    StateError(#[from] StateError),

    #[error(transparent)]
    PoolError(#[from] PoolError),
}
