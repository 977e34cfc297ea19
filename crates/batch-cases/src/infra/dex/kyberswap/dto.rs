//! DTOs for the KyberSwap aggregator API v1.

use {
    alloy::primitives::{Address, Bytes, U256},
    number::serialization::HexOrDecimalU256,
    serde::{Deserialize, Serialize},
    serde_with::{DisplayFromStr, PickFirst, serde_as},
};

#[serde_as]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuery {
    pub token_in: Address,
    pub token_out: Address,
    #[serde_as(as = "HexOrDecimalU256")]
    pub amount_in: U256,
}

/// Every response is wrapped in this envelope. A `code` other than `0`
/// signals an error described by `message`.
#[serde_as]
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routes {
    /// Kept verbatim, the build endpoint expects it back unchanged.
    pub route_summary: serde_json::Value,
    pub router_address: Address,
}

#[serde_as]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    pub route_summary: serde_json::Value,
    /// Unix timestamp in seconds.
    pub deadline: i64,
    /// In basis points, `150` is 1.5%.
    pub slippage_tolerance: u32,
    pub sender: Address,
    pub recipient: Address,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde_as(as = "HexOrDecimalU256")]
    pub amount_in: U256,
    #[serde_as(as = "HexOrDecimalU256")]
    pub amount_out: U256,
    pub data: Bytes,
    pub router_address: Address,
}
