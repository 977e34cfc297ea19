//! Share accounting of Gamma hypervisors (Uniswap V3 position vaults).

use {
    super::uniswap_v3::tick_math::{self, TickOutOfRange},
    alloy::primitives::{U256, U512},
};

/// Snapshot of a hypervisor, as read from the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hypervisor {
    pub current_tick: i32,
    pub precision: U256,
    pub total0: U256,
    pub total1: U256,
    pub total_supply: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Tick(#[from] TickOutOfRange),
    #[error("share computation overflowed")]
    Overflow,
}

impl Hypervisor {
    /// Price of token0 in token1, scaled by `precision`.
    pub fn price(&self) -> Result<U256, Error> {
        let sqrt_price = U512::from(tick_math::sqrt_ratio_at_tick(self.current_tick)?);
        let price = (sqrt_price * sqrt_price)
            .checked_mul(U512::from(self.precision))
            .ok_or(Error::Overflow)?
            >> 192;
        narrow(price)
    }

    /// LP shares minted for depositing `deposit0` and `deposit1`, valuing
    /// everything in token1 at the current tick.
    pub fn shares(&self, deposit0: U256, deposit1: U256) -> Result<U256, Error> {
        if self.precision.is_zero() {
            return Err(Error::Overflow);
        }
        let price = self.price()?;
        let in_token1 = |amount: U256| {
            amount
                .checked_mul(price)
                .map(|value| value / self.precision)
                .ok_or(Error::Overflow)
        };

        let shares = deposit1
            .checked_add(in_token1(deposit0)?)
            .ok_or(Error::Overflow)?;
        if self.total_supply.is_zero() {
            return Ok(shares);
        }

        let pool = in_token1(self.total0)?
            .checked_add(self.total1)
            .ok_or(Error::Overflow)?;
        shares
            .checked_mul(self.total_supply)
            .and_then(|value| value.checked_div(pool))
            .ok_or(Error::Overflow)
    }
}

fn narrow(value: U512) -> Result<U256, Error> {
    let limbs = value.into_limbs();
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return Err(Error::Overflow);
    }
    Ok(U256::from_limbs_slice(&limbs[..4]))
}

#[cfg(test)]
mod tests {
    use {super::*, number::units::EthUnit};

    fn hypervisor() -> Hypervisor {
        Hypervisor {
            current_tick: 0,
            precision: 1u64.eth(),
            total0: 100u64.eth(),
            total1: 300u64.eth(),
            total_supply: 200u64.eth(),
        }
    }

    #[test]
    fn price_at_parity() {
        assert_eq!(hypervisor().price().unwrap(), 1u64.eth());
    }

    #[test]
    fn shares_of_empty_vault_equal_deposit_value() {
        let hypervisor = Hypervisor {
            total_supply: U256::ZERO,
            ..hypervisor()
        };
        assert_eq!(
            hypervisor.shares(1u64.eth(), 2u64.eth()).unwrap(),
            3u64.eth()
        );
    }

    #[test]
    fn shares_are_proportional_to_pool_value() {
        // The pool is worth 400 and has 200 shares, so a deposit worth 4
        // gets 2 shares.
        assert_eq!(
            hypervisor().shares(1u64.eth(), 3u64.eth()).unwrap(),
            2u64.eth()
        );
    }

    #[test]
    fn price_follows_tick() {
        let below = Hypervisor {
            current_tick: -1_000,
            ..hypervisor()
        };
        let above = Hypervisor {
            current_tick: 1_000,
            ..hypervisor()
        };
        assert!(below.price().unwrap() < 1u64.eth());
        assert!(above.price().unwrap() > 1u64.eth());
        assert!(matches!(
            Hypervisor {
                current_tick: 900_000,
                ..hypervisor()
            }
            .price(),
            Err(Error::Tick(_))
        ));
    }
}
