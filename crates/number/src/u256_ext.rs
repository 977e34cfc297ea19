//! Extension trait for U256 arithmetic operations.

use alloy::primitives::{U256, U512};

/// Rounding direction for integer divisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Floor,
    Ceil,
}

/// Extension trait for U256 to add utility methods.
pub trait U256Ext: Sized {
    /// Ceiling division: (self + other - 1) / other
    fn checked_ceil_div(&self, other: &Self) -> Option<Self>;

    /// Multiply U256 by f64 factor with high precision.
    ///
    /// The factor is first multiplied by a conversion factor to convert it to
    /// an integer, avoiding rounding to 0. The result is then divided by
    /// the conversion factor to convert it back to the original scale.
    fn checked_mul_f64(&self, factor: f64) -> Option<Self>;

    /// Computes `self * numerator / denominator` with a 512-bit intermediate
    /// product.
    ///
    /// Returns `None` if `denominator` is `0` or the result overflows.
    fn checked_mul_div(
        &self,
        numerator: Self,
        denominator: Self,
        rounding: Rounding,
    ) -> Option<Self>;

    /// Scales the value by `bps / 10_000`, rounding down.
    fn checked_mul_bps(&self, bps: u64) -> Option<Self>;
}

impl U256Ext for U256 {
    fn checked_ceil_div(&self, other: &Self) -> Option<Self> {
        self.checked_add(other.checked_sub(U256::from(1u64))?)?
            .checked_div(*other)
    }

    fn checked_mul_f64(&self, factor: f64) -> Option<Self> {
        const CONVERSION_FACTOR: f64 = 1_000_000_000_000_000_000.;
        if !factor.is_finite() || factor < 0. {
            return None;
        }
        self.checked_mul_div(
            U256::from(factor * CONVERSION_FACTOR),
            U256::from(CONVERSION_FACTOR),
            Rounding::Floor,
        )
    }

    fn checked_mul_div(
        &self,
        numerator: Self,
        denominator: Self,
        rounding: Rounding,
    ) -> Option<Self> {
        if denominator.is_zero() {
            return None;
        }

        // fast path when math in U256 doesn't overflow
        let (div, rem) = match self.checked_mul(numerator) {
            Some(product) => (
                U512::from(product / denominator),
                !(product % denominator).is_zero(),
            ),
            None => {
                let product = U512::from(*self) * U512::from(numerator);
                let denominator = U512::from(denominator);
                (product / denominator, !(product % denominator).is_zero())
            }
        };

        let limbs = div.into_limbs();
        if limbs[4..].iter().any(|limb| *limb != 0) {
            return None;
        }
        let result = U256::from_limbs_slice(&limbs[..4]);
        match rounding {
            Rounding::Floor => Some(result),
            Rounding::Ceil => result.checked_add(U256::from(rem)),
        }
    }

    fn checked_mul_bps(&self, bps: u64) -> Option<Self> {
        self.checked_mul_div(U256::from(bps), U256::from(10_000), Rounding::Floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_div() {
        assert_eq!(
            U256::from(10).checked_ceil_div(&U256::from(3)),
            Some(U256::from(4))
        );
        assert_eq!(
            U256::from(9).checked_ceil_div(&U256::from(3)),
            Some(U256::from(3))
        );
        assert_eq!(U256::from(9).checked_ceil_div(&U256::ZERO), None);
    }

    #[test]
    fn mul_div_rounds_in_requested_direction() {
        let value = U256::from(10);
        assert_eq!(
            value.checked_mul_div(U256::from(2), U256::from(3), Rounding::Floor),
            Some(U256::from(6))
        );
        assert_eq!(
            value.checked_mul_div(U256::from(2), U256::from(3), Rounding::Ceil),
            Some(U256::from(7))
        );
        assert_eq!(
            value.checked_mul_div(U256::from(3), U256::from(3), Rounding::Ceil),
            Some(U256::from(10))
        );
        assert_eq!(
            value.checked_mul_div(U256::from(1), U256::ZERO, Rounding::Floor),
            None
        );
    }

    #[test]
    fn mul_div_survives_intermediate_overflow() {
        assert_eq!(
            U256::MAX.checked_mul_div(U256::from(3), U256::from(6), Rounding::Floor),
            Some(U256::MAX / U256::from(2))
        );
        assert_eq!(
            U256::MAX.checked_mul_div(U256::from(2), U256::from(1), Rounding::Floor),
            None
        );
    }

    #[test]
    fn mul_f64() {
        assert_eq!(
            U256::from(1_000_000).checked_mul_f64(1.5),
            Some(U256::from(1_500_000))
        );
        assert_eq!(U256::from(1).checked_mul_f64(-1.), None);
        assert_eq!(U256::from(1).checked_mul_f64(f64::NAN), None);
    }

    #[test]
    fn mul_bps() {
        assert_eq!(
            U256::from(10_000).checked_mul_bps(9_997),
            Some(U256::from(9_997))
        );
        assert_eq!(U256::from(3).checked_mul_bps(9_999), Some(U256::from(2)));
    }
}
