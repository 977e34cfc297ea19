use {
    alloy::primitives::{Address, Bytes, U256},
    serde::{Serialize, de::DeserializeOwned},
    std::time::Duration,
    tracing::Instrument,
    url::Url,
};

pub mod dto;

/// Bindings to the Pendle v2 API.
pub struct Pendle {
    client: reqwest::Client,
    endpoint: Url,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the API, ending with a `/`.
    pub endpoint: Url,
    pub timeout: Duration,
}

pub const DEFAULT_URL: &str = "https://api-v2.pendle.finance/";

/// The Pendle token a swap buys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Output {
    /// Principal token.
    Pt,
    /// Yield token.
    Yt,
}

/// Router calldata for a swap and what it is expected to buy.
#[derive(Debug, Clone)]
pub struct Swap {
    pub to: Address,
    pub data: Bytes,
    pub amount_out: U256,
}

impl Pendle {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }

    /// The active market of a standardized yield token. SY tokens don't
    /// expire, markets do, so this is how the current market is found.
    pub async fn market(&self, chain_id: u64, sy: Address) -> Result<Address, Error> {
        let markets: dto::Markets = self
            .get(
                &format!("core/v1/{chain_id}/markets"),
                &dto::MarketsQuery {
                    select: "all",
                    is_expired: false,
                    sy,
                },
            )
            .await?;
        markets
            .results
            .first()
            .map(|market| market.address)
            .ok_or(Error::ResponseFailed)
    }

    /// Buys PT or YT of a market with `query.token_in_addr`.
    pub async fn swap_exact_token(&self, output: Output, query: &dto::Query) -> Result<Swap, Error> {
        let swap: dto::Swap = self
            .get(&format!("sdk/api/v1/swapExactTokenFor{output}"), query)
            .await?;
        let amount_out = match output {
            Output::Pt => swap.data.amount_pt_out,
            Output::Yt => swap.data.amount_yt_out,
        }
        .ok_or(Error::ResponseFailed)?;
        Ok(Swap {
            to: swap.transaction.to,
            data: swap.transaction.data,
            amount_out,
        })
    }

    /// Provides liquidity to a market with a single token. The SY input
    /// token of the query is replaced by the first one the market accepts.
    pub async fn add_liquidity_single_token(
        &self,
        query: &dto::Query,
    ) -> Result<dto::Transaction, Error> {
        let sy: dto::SyTokenInOut = self
            .get(
                "sdk/api/v1/syTokenInOut",
                &dto::SyTokenInOutQuery {
                    chain_id: query.chain_id,
                    market_addr: query.market_addr,
                },
            )
            .await?;
        let sy_token_in_addr = *sy.output_tokens.first().ok_or(Error::ResponseFailed)?;

        let zap: dto::Zap = self
            .get(
                "sdk/api/v1/addLiquiditySingleToken",
                &dto::Query {
                    sy_token_in_addr,
                    ..query.clone()
                },
            )
            .await?;
        Ok(zap.transaction)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &impl Serialize,
    ) -> Result<T, Error> {
        let id = super::request_id();
        async {
            let request = self
                .client
                .get(self.endpoint.join(path)?)
                .query(query)
                .build()?;
            tracing::trace!(request = %request.url(), "requesting");
            let response = self.client.execute(request).await?;
            let status = response.status();
            let body = response.text().await?;
            tracing::trace!(status = %status.as_u16(), %body, "received");

            if !status.is_success() {
                let message = serde_json::from_str::<dto::Error>(&body)
                    .map(|err| err.message)
                    .unwrap_or(body);
                return Err(Error::Api {
                    status: status.as_u16(),
                    message,
                });
            }
            Ok(serde_json::from_str(&body)?)
        }
        .instrument(tracing::trace_span!("pendle", id = %id))
        .await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Couldn't get a proper response from Pendle's api, try again later.")]
    ResponseFailed,
    #[error("{status}: {message}")]
    Api { status: u16, message: String },
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
