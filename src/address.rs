use crate::error::Error;
use crate::fee::FeeAmount;
use crate::token::Token;
use alloy_primitives::{keccak256, Address, B256, U256};

/// How a network derives a pool's deployment address from the factory, the
/// salt, and the init-code hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressScheme {
    /// Standard CREATE2: `keccak256(0xff ‖ factory ‖ salt ‖ init_code_hash)`.
    Create2,
    /// zkSync-style CREATE2 digest, which prefixes a domain-separation hash
    /// and appends the (empty) constructor-input hash.
    ZkSyncCreate2,
}

/// Deployment parameters of the pool factory on one network.
///
/// Passed explicitly by the caller; the library carries no built-in factory
/// or init-code-hash table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FactoryConfig {
    pub factory: Address,
    pub init_code_hash: B256,
    pub scheme: AddressScheme,
}

/// Deterministically derives the pool address for a token pair and fee tier
/// under the given factory configuration.
///
/// Token order does not matter; the pair is canonicalized before encoding.
pub fn compute_pool_address(
    config: &FactoryConfig,
    token_a: &Token,
    token_b: &Token,
    fee: FeeAmount,
) -> Result<Address, Error> {
    let (token0, token1) = if token_a.sorts_before(token_b)? {
        (token_a.address, token_b.address)
    } else {
        (token_b.address, token_a.address)
    };
    Ok(derive_sorted(config, token0, token1, fee))
}

pub(crate) fn derive_sorted(
    config: &FactoryConfig,
    token0: Address,
    token1: Address,
    fee: FeeAmount,
) -> Address {
    // abi.encode(token0, token1, fee): three left-padded 32-byte words
    let mut encoded = [0u8; 96];
    encoded[..32].copy_from_slice(token0.into_word().as_slice());
    encoded[32..64].copy_from_slice(token1.into_word().as_slice());
    encoded[64..].copy_from_slice(&U256::from(fee.pips()).to_be_bytes::<32>());
    let salt = keccak256(encoded);

    match config.scheme {
        AddressScheme::Create2 => config.factory.create2(salt, config.init_code_hash),
        AddressScheme::ZkSyncCreate2 => {
            let prefix = keccak256("zksyncCreate2");
            let input_hash = keccak256(b"");
            let mut digest_input = [0u8; 160];
            digest_input[..32].copy_from_slice(prefix.as_slice());
            digest_input[32..64].copy_from_slice(config.factory.into_word().as_slice());
            digest_input[64..96].copy_from_slice(salt.as_slice());
            digest_input[96..128].copy_from_slice(config.init_code_hash.as_slice());
            digest_input[128..].copy_from_slice(input_hash.as_slice());
            Address::from_word(keccak256(digest_input))
        }
    }
}
