use crate::token::Token;
use alloy_primitives::{U256, U512};

/// Exact rational price of `base` denominated in `quote`.
///
/// Derived from a Q64.96 sqrt price as the fraction
/// `sqrt_ratio_x96^2 / 2^192`, carried in 512-bit space so the square never
/// truncates. No floating point is involved at any stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Price {
    pub base: Token,
    pub quote: Token,
    pub numerator: U512,
    pub denominator: U512,
}

impl Price {
    /// Price of `base` in `quote` for a pool sitting at `sqrt_ratio_x96`,
    /// where `base` is the pool's token0.
    pub fn from_sqrt_ratio_x96(base: Token, quote: Token, sqrt_ratio_x96: U256) -> Self {
        let wide = widen(sqrt_ratio_x96);
        Self {
            base,
            quote,
            numerator: wide * wide,
            denominator: U512::ONE << 192usize,
        }
    }

    /// The reciprocal price: quote in terms of base.
    pub fn inverted(&self) -> Price {
        Price {
            base: self.quote.clone(),
            quote: self.base.clone(),
            numerator: self.denominator,
            denominator: self.numerator,
        }
    }
}

fn widen(x: U256) -> U512 {
    let limbs = x.as_limbs();
    U512::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Q96;
    use alloy_primitives::Address;

    fn token(byte: u8) -> Token {
        Token::new(1, Address::from([byte; 20]), 18)
    }

    #[test]
    fn unit_sqrt_price_is_one() {
        let price = Price::from_sqrt_ratio_x96(token(1), token(2), Q96);
        assert_eq!(price.numerator, price.denominator);
    }

    #[test]
    fn squares_the_sqrt_ratio() {
        // sqrt price 2 * 2^96 means base is worth 4 quote
        let price = Price::from_sqrt_ratio_x96(token(1), token(2), Q96 * U256::from(2u8));
        assert_eq!(
            price.numerator,
            price.denominator * U512::from(4u8)
        );
    }

    #[test]
    fn inverting_swaps_terms() {
        let price = Price::from_sqrt_ratio_x96(token(1), token(2), Q96 * U256::from(3u8));
        let inverse = price.inverted();
        assert_eq!(inverse.base, price.quote);
        assert_eq!(inverse.quote, price.base);
        assert_eq!(inverse.numerator, price.denominator);
        assert_eq!(inverse.inverted(), price);
    }
}
