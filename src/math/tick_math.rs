use crate::error::StateError;
use alloy_primitives::{I256, U256};

/// Lowest tick index for which a sqrt price is representable.
pub const MIN_TICK: i32 = -887272;
/// Highest tick index for which a sqrt price is representable.
pub const MAX_TICK: i32 = -MIN_TICK;

/// Sqrt price at `MIN_TICK`.
pub const MIN_SQRT_RATIO: U256 = U256::from_limbs([4295128739, 0, 0, 0]);
/// Sqrt price just above `MAX_TICK`; valid prices are strictly below this.
pub const MAX_SQRT_RATIO: U256 =
    U256::from_limbs([6743328256752651558, 17280870778742802505, 4294805859, 0]);

const SHIFT_32: usize = 32;
const SHIFT_128: usize = 128;

const SQRT_10001: I256 = I256::from_raw(U256::from_limbs([11745905768312294533, 13863, 0, 0]));
const TICK_LOW: I256 = I256::from_raw(U256::from_limbs([
    6552757943157144234,
    184476617836266586,
    0,
    0,
]));
const TICK_HIGH: I256 = I256::from_raw(U256::from_limbs([
    4998474450511881007,
    15793544031827761793,
    0,
    0,
]));

/// Returns the sqrt price (Q64.96 fixed-point) at a given tick index, or
/// `StateError::TickOutOfBounds` if the tick is invalid.
///
/// Replicates the on-chain per-bit multiplier ladder exactly, including the
/// final round-up when truncating from Q128.128 to Q64.96.
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U256, StateError> {
    let abs_tick = tick.unsigned_abs();

    if abs_tick > MAX_TICK as u32 {
        return Err(StateError::TickOutOfBounds);
    }

    // Start with ratio based on bit 0
    let mut ratio = if abs_tick & 1 != 0 {
        U256::from_limbs([12262481743371124737, 18445821805675392311, 0, 0])
    } else {
        U256::from_limbs([0, 0, 1, 0])
    };

    macro_rules! apply_multiplier {
        ($bit:expr, $l0:expr, $l1:expr) => {
            if abs_tick & $bit != 0 {
                ratio = ratio.wrapping_mul(U256::from_limbs([$l0, $l1, 0, 0])) >> 128;
            }
        };
    }

    apply_multiplier!(2, 6459403834229662010, 18444899583751176498);
    apply_multiplier!(4, 17226890335427755468, 18443055278223354162);
    apply_multiplier!(8, 2032852871939366096, 18439367220385604838);
    apply_multiplier!(16, 14545316742740207172, 18431993317065449817);
    apply_multiplier!(32, 5129152022828963008, 18417254355718160513);
    apply_multiplier!(64, 4894419605888772193, 18387811781193591352);
    apply_multiplier!(128, 1280255884321894483, 18329067761203520168);
    apply_multiplier!(256, 15924666964335305636, 18212142134806087854);
    apply_multiplier!(512, 8010504389359918676, 17980523815641551639);
    apply_multiplier!(1024, 10668036004952895731, 17526086738831147013);
    apply_multiplier!(2048, 4878133418470705625, 16651378430235024244);
    apply_multiplier!(4096, 9537173718739605541, 15030750278693429944);
    apply_multiplier!(8192, 9972618978014552549, 12247334978882834399);
    apply_multiplier!(16384, 10428997489610666743, 8131365268884726200);
    apply_multiplier!(32768, 9305304367709015974, 3584323654723342297);
    apply_multiplier!(65536, 14301143598189091785, 696457651847595233);
    apply_multiplier!(131072, 7393154844743099908, 26294789957452057);
    apply_multiplier!(262144, 2209338891292245656, 37481735321082);
    apply_multiplier!(524288, 10518117631919034274, 76158723);

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    let lower_32_bits = (ratio.as_limbs()[0] & 0xFFFF_FFFF) as u32;
    Ok((ratio >> 32) + U256::from((lower_32_bits != 0) as u64))
}

#[inline(always)]
fn most_significant_bit(x: U256) -> u32 {
    debug_assert!(!x.is_zero());
    255 - x.leading_zeros() as u32
}

/// Computes the tick index corresponding to a given sqrt price (Q64.96
/// fixed-point), enforcing the standard price bounds.
///
/// Integer-only: a base-2 logarithm is built from the most significant bit
/// plus fourteen squaring/shift refinement steps, then rescaled to base
/// 1.0001 and resolved against the two candidate ticks, matching the
/// on-chain logic exactly.
pub fn get_tick_at_sqrt_ratio(sqrt_price_x_96: U256) -> Result<i32, StateError> {
    if sqrt_price_x_96 < MIN_SQRT_RATIO || sqrt_price_x_96 >= MAX_SQRT_RATIO {
        return Err(StateError::SqrtPriceOutOfBounds);
    }

    let ratio = sqrt_price_x_96 << SHIFT_32;
    let msb = most_significant_bit(ratio);

    let mut r = if msb >= 128 {
        ratio >> (msb - 127)
    } else {
        ratio << (127 - msb)
    };

    let mut log_2: I256 =
        (I256::from_raw(U256::from(msb)) - I256::from_raw(U256::from(128u8))) << 64;

    macro_rules! log2_step {
        ($shift:expr) => {{
            r = r.overflowing_mul(r).0 >> 127usize;
            let f = r >> SHIFT_128;
            log_2 |= I256::from_raw(f << $shift);
            r >>= f;
        }};
    }

    log2_step!(63);
    log2_step!(62);
    log2_step!(61);
    log2_step!(60);
    log2_step!(59);
    log2_step!(58);
    log2_step!(57);
    log2_step!(56);
    log2_step!(55);
    log2_step!(54);
    log2_step!(53);
    log2_step!(52);
    log2_step!(51);
    log2_step!(50);

    let log_sqrt10001 = log_2.wrapping_mul(SQRT_10001);
    let tick_low = ((log_sqrt10001 - TICK_LOW) >> SHIFT_128).low_i32();
    let tick_high = ((log_sqrt10001 + TICK_HIGH) >> SHIFT_128).low_i32();

    Ok(if tick_low == tick_high {
        tick_low
    } else if get_sqrt_ratio_at_tick(tick_high)? <= sqrt_price_x_96 {
        tick_high
    } else {
        tick_low
    })
}

/// Rounds `tick` to the nearest multiple of `tick_spacing`, clamped inside
/// [`MIN_TICK`, `MAX_TICK`].
///
/// A tick exactly halfway between two multiples rounds toward positive
/// infinity: `nearest_usable_tick(5, 10) == 10`,
/// `nearest_usable_tick(-5, 10) == 0`.
///
/// Panics if `tick_spacing` is not positive.
pub fn nearest_usable_tick(tick: i32, tick_spacing: i32) -> i32 {
    assert!(tick_spacing > 0, "tick spacing must be positive");

    let spacing = tick_spacing as i64;
    let rounded = ((2 * tick as i64 + spacing).div_euclid(2 * spacing) * spacing) as i32;

    if rounded < MIN_TICK {
        rounded + tick_spacing
    } else if rounded > MAX_TICK {
        rounded - tick_spacing
    } else {
        rounded
    }
}
