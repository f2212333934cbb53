use crate::error::{Error, PoolError};
use alloy_primitives::{Address, U256};

/// A token identity: chain id plus contract address, with display metadata.
///
/// Equality is identity equality (chain id and address); decimals and symbol
/// do not participate.
#[derive(Clone, Debug, Eq)]
pub struct Token {
    pub chain_id: u64,
    pub address: Address,
    pub decimals: u8,
    pub symbol: Option<String>,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.chain_id == other.chain_id && self.address == other.address
    }
}

impl Token {
    pub fn new(chain_id: u64, address: Address, decimals: u8) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: None,
        }
    }

    pub fn with_symbol(chain_id: u64, address: Address, decimals: u8, symbol: &str) -> Self {
        Self {
            chain_id,
            address,
            decimals,
            symbol: Some(symbol.to_string()),
        }
    }

    /// Whether this token precedes `other` in canonical (numeric address)
    /// order. Errs if the tokens live on different chains or share an
    /// address, since no order exists for such a pair.
    pub fn sorts_before(&self, other: &Token) -> Result<bool, Error> {
        if self.chain_id != other.chain_id {
            return Err(PoolError::ChainMismatch.into());
        }
        if self.address == other.address {
            return Err(PoolError::DuplicateToken.into());
        }
        Ok(self.address < other.address)
    }
}

/// A raw amount of a specific token, in the token's smallest unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenAmount {
    pub token: Token,
    pub amount: U256,
}

impl TokenAmount {
    pub fn new(token: Token, amount: U256) -> Self {
        Self { token, amount }
    }
}
