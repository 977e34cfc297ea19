use {super::tick_math::nearest_usable_tick, alloy::primitives::U256};

const Q96: f64 = 79228162514264337593543950336.;

/// A position one tick spacing to either side of the current price, sized
/// with floating point math. Good enough to split a deposit between the two
/// tokens; the pool computes the exact amounts on mint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub tick_lower: i32,
    pub tick_upper: i32,
    /// Amount of token0 the position takes for `amount` of liquidity input.
    pub amount0: f64,
    /// Amount of token1 the position takes for `amount` of liquidity input.
    pub amount1: f64,
}

impl Position {
    /// Sizes a position around the current pool price for an input of
    /// `amount` (in base units of either token).
    pub fn around(sqrt_price_x96: U256, tick_spacing: i32, amount: U256) -> Self {
        let amount = to_f64(amount);

        let price = (to_f64(sqrt_price_x96) / Q96).powi(2);
        let tick = price_to_tick(price);

        let tick_lower = nearest_usable_tick(tick - tick_spacing, tick_spacing);
        let tick_upper = nearest_usable_tick(tick + tick_spacing, tick_spacing);

        let sqrt_lower = price_to_sqrt_price(tick_to_price(tick_lower));
        let sqrt_current = price_to_sqrt_price(price);
        let sqrt_upper = price_to_sqrt_price(tick_to_price(tick_upper));

        let liquidity = f64::min(
            liquidity0(amount, sqrt_current, sqrt_upper),
            liquidity1(amount, sqrt_current, sqrt_lower),
        );

        Self {
            tick_lower,
            tick_upper,
            amount0: amount0(liquidity, sqrt_upper, sqrt_current),
            amount1: amount1(liquidity, sqrt_lower, sqrt_current),
        }
    }
}

fn to_f64(value: U256) -> f64 {
    value
        .as_limbs()
        .iter()
        .rev()
        .fold(0., |acc, limb| acc * 2f64.powi(64) + *limb as f64)
}

fn price_to_tick(price: f64) -> i32 {
    (price.ln() / 1.0001f64.ln()).floor() as i32
}

fn tick_to_price(tick: i32) -> f64 {
    (f64::from(tick) * 1.0001f64.ln()).exp()
}

fn price_to_sqrt_price(price: f64) -> f64 {
    price.sqrt() * Q96
}

fn sorted(a: f64, b: f64) -> (f64, f64) {
    if a > b { (b, a) } else { (a, b) }
}

fn liquidity0(amount: f64, pa: f64, pb: f64) -> f64 {
    let (pa, pb) = sorted(pa, pb);
    amount * pa * pb / Q96 / (pb - pa)
}

fn liquidity1(amount: f64, pa: f64, pb: f64) -> f64 {
    let (pa, pb) = sorted(pa, pb);
    amount * Q96 / (pb - pa)
}

fn amount0(liquidity: f64, pa: f64, pb: f64) -> f64 {
    let (pa, pb) = sorted(pa, pb);
    liquidity * Q96 * (pb - pa) / pa / pb
}

fn amount1(liquidity: f64, pa: f64, pb: f64) -> f64 {
    let (pa, pb) = sorted(pa, pb);
    liquidity * (pb - pa) / Q96
}
