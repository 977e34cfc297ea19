use alloy::primitives::{U256, uint};

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = -MIN_TICK;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("tick {0} is out of range")]
pub struct TickOutOfRange(pub i32);

/// `2^128`, one in Q128.128.
const Q128: U256 = U256::from_limbs([0, 0, 1, 0]);
/// `2^32`, the resolution dropped going from Q128.128 to Q128.96.
const Q32: U256 = U256::from_limbs([1 << 32, 0, 0, 0]);

/// Magic numbers `2^128 / sqrt(1.0001)^(2^i)` for every bit `i > 0` of the
/// absolute tick.
const RATIOS: [U256; 19] = uint!([
    0xfff97272373d413259a46990580e213a_U256,
    0xfff2e50f5f656932ef12357cf3c7fdcc_U256,
    0xffe5caca7e10e4e61c3624eaa0941cd0_U256,
    0xffcb9843d60f6159c9db58835c926644_U256,
    0xff973b41fa98c081472e6896dfb254c0_U256,
    0xff2ea16466c96a3843ec78b326b52861_U256,
    0xfe5dee046a99a2a811c461f1969c3053_U256,
    0xfcbe86c7900a88aedcffc83b479aa3a4_U256,
    0xf987a7253ac413176f2b074cf7815e54_U256,
    0xf3392b0822b70005940c7a398e4b70f3_U256,
    0xe7159475a2c29b7443b29c7fa6e889d9_U256,
    0xd097f3bdfd2022b8845ad8f792aa5825_U256,
    0xa9f746462d870fdf8a65dc1f90e061e5_U256,
    0x70d869a156d2a1b890bb3df62baf32f7_U256,
    0x31be135f97d08fd981231505542fcfa6_U256,
    0x9aa508b5b7a84e1c677de54f3e99bc9_U256,
    0x5d6af8dedb81196699c329225ee604_U256,
    0x2216e584f5fa1ea926041bedfe98_U256,
    0x48a170391f7dc42444e8fa2_U256,
]);

/// Computes `sqrt(1.0001^tick) * 2^96` exactly the way the pool contracts
/// do, as a Q64.96 fixed point number.
pub fn sqrt_ratio_at_tick(tick: i32) -> Result<U256, TickOutOfRange> {
    let abs_tick = tick.unsigned_abs();
    if abs_tick > MAX_TICK.unsigned_abs() {
        return Err(TickOutOfRange(tick));
    }

    let mut ratio = if abs_tick & 1 != 0 {
        uint!(0xfffcb933bd6fad37aa2d162d1a594001_U256)
    } else {
        Q128
    };
    for (i, magic) in RATIOS.iter().enumerate() {
        if abs_tick & (2 << i) != 0 {
            // Both factors are below 2^128, so the product can't overflow.
            ratio = (ratio * *magic) >> 128usize;
        }
    }
    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 to Q128.96, rounding up.
    let round_up = !(ratio % Q32).is_zero();
    Ok((ratio >> 32usize) + U256::from(u8::from(round_up)))
}

/// Rounds a tick to the nearest multiple of the spacing that is still
/// within the valid tick range. Halves round towards positive infinity.
pub fn nearest_usable_tick(tick: i32, spacing: i32) -> i32 {
    debug_assert!(spacing > 0, "tick spacing must be positive");
    let rounded = (f64::from(tick) / f64::from(spacing) + 0.5).floor() as i32 * spacing;
    if rounded < MIN_TICK {
        rounded + spacing
    } else if rounded > MAX_TICK {
        rounded - spacing
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_ratios() {
        assert_eq!(
            sqrt_ratio_at_tick(0).unwrap(),
            uint!(79228162514264337593543950336_U256)
        );
        assert_eq!(
            sqrt_ratio_at_tick(1).unwrap(),
            uint!(79232123823359799118286999568_U256)
        );
        assert_eq!(
            sqrt_ratio_at_tick(-1).unwrap(),
            uint!(79224201403219477170569942574_U256)
        );
        assert_eq!(
            sqrt_ratio_at_tick(100).unwrap(),
            uint!(79625275426524748796330556128_U256)
        );
        assert_eq!(
            sqrt_ratio_at_tick(-200_000).unwrap(),
            uint!(3598751819609688046946419_U256)
        );
    }

    #[test]
    fn sqrt_ratio_bounds() {
        assert_eq!(
            sqrt_ratio_at_tick(MIN_TICK).unwrap(),
            uint!(4295128739_U256)
        );
        assert_eq!(
            sqrt_ratio_at_tick(MAX_TICK).unwrap(),
            uint!(1461446703485210103287273052203988822378723970342_U256)
        );
        assert_eq!(
            sqrt_ratio_at_tick(MIN_TICK - 1),
            Err(TickOutOfRange(MIN_TICK - 1))
        );
        assert_eq!(
            sqrt_ratio_at_tick(MAX_TICK + 1),
            Err(TickOutOfRange(MAX_TICK + 1))
        );
    }

    #[test]
    fn usable_ticks() {
        assert_eq!(nearest_usable_tick(0, 10), 0);
        assert_eq!(nearest_usable_tick(14, 10), 10);
        assert_eq!(nearest_usable_tick(15, 10), 20);
        assert_eq!(nearest_usable_tick(-15, 10), -10);
        assert_eq!(nearest_usable_tick(-16, 10), -20);
        assert_eq!(nearest_usable_tick(MAX_TICK, 60), 887220);
        assert_eq!(nearest_usable_tick(MIN_TICK, 60), -887220);
    }
}
