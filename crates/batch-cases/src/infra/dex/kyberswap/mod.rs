use {
    alloy::primitives::{Address, U256},
    chrono::{DateTime, Utc},
    std::time::Duration,
    tracing::Instrument,
    url::Url,
};

pub mod dto;

/// Bindings to the KyberSwap aggregator API.
pub struct KyberSwap {
    client: reqwest::Client,
    endpoint: Url,
    client_id: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the API, ending with a `/`.
    pub endpoint: Url,
    /// Sent as `x-client-id` with every request.
    pub client_id: String,
    pub timeout: Duration,
}

pub const DEFAULT_URL: &str = "https://aggregator-api.kyberswap.com/";

/// The route parameters a batch commits to.
#[derive(Debug, Clone)]
pub struct Order {
    pub chain_id: u64,
    pub token_in: Address,
    pub token_out: Address,
    pub amount_in: U256,
    pub account: Address,
    pub deadline: DateTime<Utc>,
    /// In basis points.
    pub slippage: u32,
}

/// Path segment the API uses for a chain.
fn chain_name(chain_id: u64) -> Option<&'static str> {
    use contracts::networks::*;
    Some(match chain_id {
        MAINNET => "ethereum",
        OPTIMISM => "optimism",
        BNB => "bsc",
        POLYGON => "polygon",
        ZKSYNC_ERA => "zksync",
        BASE => "base",
        ARBITRUM_ONE => "arbitrum",
        AVALANCHE => "avalanche",
        SCROLL => "scroll",
        _ => return None,
    })
}

impl KyberSwap {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
            client_id: config.client_id,
        })
    }

    /// Finds the best route for an order and builds the router calldata
    /// executing it.
    pub async fn swap(&self, order: &Order) -> Result<dto::Route, Error> {
        let chain = chain_name(order.chain_id).ok_or(Error::UnsupportedChain(order.chain_id))?;
        let id = super::request_id();
        async {
            let routes: dto::Routes = self
                .send(
                    self.client
                        .get(self.endpoint.join(&format!("{chain}/api/v1/routes"))?)
                        .query(&dto::RouteQuery {
                            token_in: order.token_in,
                            token_out: order.token_out,
                            amount_in: order.amount_in,
                        }),
                )
                .await?;
            tracing::debug!(router = %routes.router_address, "found route");

            self.send(
                self.client
                    .post(self.endpoint.join(&format!("{chain}/api/v1/route/build"))?)
                    .json(&dto::BuildRequest {
                        route_summary: routes.route_summary,
                        deadline: order.deadline.timestamp(),
                        slippage_tolerance: order.slippage,
                        sender: order.account,
                        recipient: order.account,
                    }),
            )
            .await
        }
        .instrument(tracing::trace_span!("kyberswap", id = %id))
        .await
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, Error> {
        let request = request.header("x-client-id", &self.client_id).build()?;
        tracing::trace!(method = %request.method(), request = %request.url(), "requesting");
        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::trace!(status = %status.as_u16(), %body, "received");

        let envelope: dto::Envelope<T> = serde_json::from_str(&body)?;
        match envelope.data {
            Some(data) if envelope.code == 0 => Ok(data),
            _ if envelope.message.is_empty() => Err(Error::Api(
                "Unknown error from KyberSwap API".to_owned(),
            )),
            _ => Err(Error::Api(envelope.message)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("chain {0} is not supported by KyberSwap")]
    UnsupportedChain(u64),
    #[error("{0}")]
    Api(String),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
