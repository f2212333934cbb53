use crate::error::MathError;
use alloy_primitives::U256;

const U256_ONE: U256 = U256::ONE;
const U256_TWO: U256 = U256::from_limbs([2, 0, 0, 0]);
const U256_THREE: U256 = U256::from_limbs([3, 0, 0, 0]);

#[inline(always)]
pub(crate) fn unlikely(b: bool) -> bool {
    #[cold]
    #[inline(never)]
    fn cold() {}
    if b {
        cold();
    }
    b
}

/// Computes `a * b / denominator` with full 512-bit intermediate precision,
/// returning a `MathError` on overflow or division by zero.
///
/// Mirrors the Solidity `FullMath.mulDiv` behavior and underpins the
/// higher-level swap and liquidity calculations.
#[inline(always)]
pub fn mul_div(a: U256, b: U256, mut denominator: U256) -> Result<U256, MathError> {
    if unlikely(denominator.is_zero()) {
        return Err(MathError::DivisionByZero);
    }

    let mm = a.mul_mod(b, U256::MAX);
    let mut prod0 = a.wrapping_mul(b);

    let (mut prod1, borrow1) = mm.overflowing_sub(prod0);
    if borrow1 {
        prod1 = prod1.wrapping_sub(U256_ONE);
    }

    if prod1.is_zero() {
        return Ok(prod0.wrapping_div(denominator));
    }

    if unlikely(denominator <= prod1) {
        return Err(MathError::Overflow);
    }

    let remainder = a.mul_mod(b, denominator);
    let (prod0_new, borrow2) = prod0.overflowing_sub(remainder);
    prod0 = prod0_new;
    if borrow2 {
        prod1 = prod1.wrapping_sub(U256_ONE);
    }

    let twos = denominator & denominator.wrapping_neg();
    denominator = denominator.wrapping_div(twos);
    prod0 = prod0.wrapping_div(twos);

    let twos_adj = twos
        .wrapping_neg()
        .wrapping_div(twos)
        .wrapping_add(U256_ONE);
    prod0 |= prod1.wrapping_mul(twos_adj);

    let mut inv = U256_THREE.wrapping_mul(denominator) ^ U256_TWO;

    macro_rules! newton_iteration {
        () => {
            inv = inv.wrapping_mul(U256_TWO.wrapping_sub(denominator.wrapping_mul(inv)))
        };
    }

    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();
    newton_iteration!();

    Ok(prod0.wrapping_mul(inv))
}

/// Like [`mul_div`], but rounds the result up when there is a non-zero
/// remainder, returning an overflow error if the rounded result would
/// exceed `U256::MAX`.
#[inline(always)]
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, MathError> {
    let mut result = mul_div(a, b, denominator)?;

    if a.mul_mod(b, denominator) > U256::ZERO {
        if result >= U256::MAX {
            return Err(MathError::Overflow);
        }
        result += U256::ONE;
    }
    Ok(result)
}

/// Divides `a` by `b`, rounding the quotient up when there is a non-zero
/// remainder.
///
/// Panics on division by zero, mirroring primitive integer division, so
/// callers must ensure `b != 0`.
#[inline(always)]
pub fn div_rounding_up(a: U256, b: U256) -> U256 {
    let (quotient, remainder) = a.div_rem(b);
    if remainder.is_zero() {
        quotient
    } else {
        quotient + U256::ONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_simple_division() {
        let result = mul_div(U256::from(10u8), U256::from(20u8), U256::from(5u8)).unwrap();
        assert_eq!(result, U256::from(40u8));
    }

    #[test]
    fn mul_div_division_by_zero() {
        let result = mul_div(U256::from(10u8), U256::from(20u8), U256::ZERO);
        assert!(matches!(result, Err(MathError::DivisionByZero)));
    }

    #[test]
    fn mul_div_rounds_down() {
        // 7 * 10 / 8 = 8.75, floor is 8
        let result = mul_div(U256::from(7u8), U256::from(10u8), U256::from(8u8)).unwrap();
        assert_eq!(result, U256::from(8u8));
    }

    #[test]
    fn mul_div_large_multiplication_no_overflow() {
        // a * b does not fit in 256 bits, but the quotient does:
        // (2^256 - 1) * (2^256 - 1) / (2^256 - 1) = 2^256 - 1
        let result = mul_div(U256::MAX, U256::MAX, U256::MAX).unwrap();
        assert_eq!(result, U256::MAX);
    }

    #[test]
    fn mul_div_result_overflow() {
        // (2^256 - 1) * 2 / 1 cannot fit in 256 bits
        let result = mul_div(U256::MAX, U256::from(2u8), U256::ONE);
        assert!(matches!(result, Err(MathError::Overflow)));
    }

    #[test]
    fn mul_div_rounding_up_exact_division() {
        let result =
            mul_div_rounding_up(U256::from(20u8), U256::from(10u8), U256::from(5u8)).unwrap();
        assert_eq!(result, U256::from(40u8));
    }

    #[test]
    fn mul_div_rounding_up_non_exact() {
        // 7 * 10 / 3 = 23.333..., ceil is 24
        let result =
            mul_div_rounding_up(U256::from(7u8), U256::from(10u8), U256::from(3u8)).unwrap();
        assert_eq!(result, U256::from(24u8));
    }

    #[test]
    fn mul_div_rounding_up_propagates_overflow() {
        let result = mul_div_rounding_up(U256::MAX, U256::from(2u8), U256::ONE);
        assert!(matches!(result, Err(MathError::Overflow)));
    }

    #[test]
    fn div_rounding_up_exact_division() {
        assert_eq!(
            div_rounding_up(U256::from(10u8), U256::from(5u8)),
            U256::from(2u8)
        );
    }

    #[test]
    fn div_rounding_up_non_exact() {
        assert_eq!(
            div_rounding_up(U256::from(10u8), U256::from(3u8)),
            U256::from(4u8)
        );
    }

    #[test]
    #[should_panic]
    fn div_rounding_up_division_by_zero_panics() {
        let _ = div_rounding_up(U256::from(10u8), U256::ZERO);
    }
}
