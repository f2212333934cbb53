use crate::error::{Error, PoolError};

/// The factory-enabled fee tiers, denominated in hundredths of a basis
/// point (pips), each with a fixed tick spacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeeAmount {
    Lowest,
    Low,
    Medium,
    High,
}

impl FeeAmount {
    /// Fee rate in pips (1 pip = 0.0001%).
    pub const fn pips(self) -> u32 {
        match self {
            FeeAmount::Lowest => 100,
            FeeAmount::Low => 500,
            FeeAmount::Medium => 3000,
            FeeAmount::High => 10000,
        }
    }

    /// Tick spacing enabled by the factory for this tier.
    pub const fn tick_spacing(self) -> i32 {
        match self {
            FeeAmount::Lowest => 1,
            FeeAmount::Low => 10,
            FeeAmount::Medium => 60,
            FeeAmount::High => 200,
        }
    }

    /// Resolves a raw pip value to its tier, failing with `InvalidFee` for
    /// anything that is not one of the enabled tiers.
    pub fn try_from_pips(pips: u32) -> Result<Self, Error> {
        match pips {
            100 => Ok(FeeAmount::Lowest),
            500 => Ok(FeeAmount::Low),
            3000 => Ok(FeeAmount::Medium),
            10000 => Ok(FeeAmount::High),
            _ => Err(PoolError::InvalidFee.into()),
        }
    }
}
