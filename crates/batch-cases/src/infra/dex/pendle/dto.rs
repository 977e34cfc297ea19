//! DTOs for the Pendle v2 API.

use {
    alloy::primitives::{Address, Bytes, U256},
    number::serialization::HexOrDecimalU256,
    serde::{Deserialize, Serialize},
    serde_with::serde_as,
};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MarketsQuery {
    pub select: &'static str,
    pub is_expired: bool,
    pub sy: Address,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Markets {
    pub results: Vec<Market>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Market {
    pub address: Address,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyTokenInOutQuery {
    pub chain_id: u64,
    pub market_addr: Address,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyTokenInOut {
    #[serde(default)]
    pub output_tokens: Vec<Address>,
}

/// Query shared by the swap and zap endpoints of the SDK API.
#[serde_as]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub chain_id: u64,
    pub receiver_addr: Address,
    pub market_addr: Address,
    pub token_in_addr: Address,
    #[serde_as(as = "HexOrDecimalU256")]
    pub amount_token_in: U256,
    pub sy_token_in_addr: Address,
    /// Relative slippage, `0.002` is 0.2%.
    pub slippage: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Transaction {
    pub to: Address,
    pub data: Bytes,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Zap {
    pub transaction: Transaction,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Swap {
    pub transaction: Transaction,
    pub data: SwapData,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapData {
    #[serde_as(as = "Option<HexOrDecimalU256>")]
    #[serde(default)]
    pub amount_pt_out: Option<U256>,
    #[serde_as(as = "Option<HexOrDecimalU256>")]
    #[serde(default)]
    pub amount_yt_out: Option<U256>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Error {
    #[serde(default)]
    pub message: String,
}
