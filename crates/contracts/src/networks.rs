//! Chain IDs of the networks batches can target.

pub const MAINNET: u64 = 1;
pub const OPTIMISM: u64 = 10;
pub const BNB: u64 = 56;
pub const GNOSIS: u64 = 100;
pub const POLYGON: u64 = 137;
pub const FANTOM: u64 = 250;
pub const ZKSYNC_ERA: u64 = 324;
pub const KLAYTN: u64 = 8217;
pub const BASE: u64 = 8453;
pub const ARBITRUM_ONE: u64 = 42161;
pub const AVALANCHE: u64 = 43114;
pub const SCROLL: u64 = 534352;
pub const ZORA: u64 = 7777777;
pub const AURORA: u64 = 1313161554;
