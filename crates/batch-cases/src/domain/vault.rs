//! ERC-4626 vault share math, mirroring OpenZeppelin's virtual share
//! accounting so deposits can be bounded before they are submitted.

use {
    alloy::primitives::U256,
    number::{
        units::exp10,
        u256_ext::{Rounding, U256Ext},
    },
};

/// Slippage tolerated on minted shares, in basis points of the expected
/// shares.
pub const MIN_SHARES_BPS: u64 = 9_997;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vault {
    pub total_supply: U256,
    pub total_assets: U256,
    pub decimals_offset: u8,
}

impl Vault {
    /// `previewDeposit`: shares minted for `assets`, rounded down.
    pub fn convert_to_shares(&self, assets: U256) -> Option<U256> {
        assets.checked_mul_div(
            self.total_supply.checked_add(exp10(self.decimals_offset))?,
            self.total_assets.checked_add(U256::from(1))?,
            Rounding::Floor,
        )
    }

    /// Lower bound on the shares a deposit of `assets` mints.
    pub fn min_shares(&self, assets: U256) -> Option<U256> {
        self.convert_to_shares(assets)?.checked_mul_bps(MIN_SHARES_BPS)
    }
}
