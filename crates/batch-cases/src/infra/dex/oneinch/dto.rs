//! DTOs for the 1inch swap API v6. Full documentation for the API can be
//! found [here](https://portal.1inch.dev/documentation/apis/swap/classic-swap/introduction).

use {
    alloy::primitives::{Address, Bytes, U256},
    number::serialization::HexOrDecimalU256,
    serde::{Deserialize, Serialize},
    serde_with::serde_as,
};

/// A 1inch API quote query parameters.
#[serde_as]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// Contract address of the token to sell.
    pub src: Address,
    /// Contract address of the token to buy.
    pub dst: Address,
    /// Amount of `src` token to sell, in base units.
    #[serde_as(as = "HexOrDecimalU256")]
    pub amount: U256,
}

/// A 1inch API swap query parameters.
///
/// See [API](https://portal.1inch.dev/documentation/apis/swap/classic-swap/Parameters)
/// documentation for more detailed information on each parameter.
#[serde_as]
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuery {
    #[serde(flatten)]
    pub quote: Query,
    /// The address which sends the sell tokens and receives the buy tokens.
    pub from: Address,
    /// Limit of price slippage, in percent.
    pub slippage: f64,
    /// Skip on-chain balance and allowance checks. Batches approve in the
    /// same submission, so those checks would fail.
    pub disable_estimate: bool,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde_as(as = "HexOrDecimalU256")]
    pub dst_amount: U256,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swap {
    #[serde_as(as = "HexOrDecimalU256")]
    pub dst_amount: U256,
    pub tx: Transaction,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub to: Address,
    pub data: Bytes,
    #[serde_as(as = "HexOrDecimalU256")]
    pub value: U256,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    pub error: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status_code: u16,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Response<T> {
    Ok(T),
    Err(Error),
}

impl<T> Response<T> {
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Response::Ok(value) => Ok(value),
            Response::Err(err) => Err(err),
        }
    }
}
