use {
    alloy::primitives::U256,
    serde::{Serialize, de::DeserializeOwned},
    std::time::Duration,
    tracing::Instrument,
    url::Url,
};

pub mod dto;

/// Bindings to the 1inch swap API.
pub struct OneInch {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// The base URL for the 1inch swap API. Chain specific paths are joined
    /// onto it, so it must end with a `/`.
    pub endpoint: Url,

    /// Bearer token for the 1inch developer portal.
    pub api_key: Option<String>,

    pub timeout: Duration,
}

pub const DEFAULT_URL: &str = "https://api.1inch.dev/swap/v6.0/";

impl OneInch {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
            api_key: config.api_key,
        })
    }

    /// How much of `query.dst` selling `query.amount` of `query.src` would
    /// currently buy.
    pub async fn quote(&self, chain_id: u64, query: &dto::Query) -> Result<U256, Error> {
        let id = super::request_id();
        let quote: dto::Quote = self
            .get(chain_id, "quote", query)
            .instrument(tracing::trace_span!("quote", id = %id))
            .await?;
        Ok(quote.dst_amount)
    }

    /// Routes a swap and returns the router calldata for it.
    pub async fn swap(&self, chain_id: u64, query: &dto::SwapQuery) -> Result<dto::Swap, Error> {
        let id = super::request_id();
        self.get(chain_id, "swap", query)
            .instrument(tracing::trace_span!("swap", id = %id))
            .await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        chain_id: u64,
        action: &str,
        query: &impl Serialize,
    ) -> Result<T, Error> {
        if contracts::addresses::oneinch::router(chain_id).is_none() {
            return Err(Error::UnsupportedChain(chain_id));
        }

        let mut request = self
            .client
            .get(self.endpoint.join(&format!("{chain_id}/{action}"))?)
            .query(query);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }
        let request = request.build()?;
        tracing::trace!(request = %request.url(), "requesting");
        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::trace!(status = %status.as_u16(), %body, "received");

        Ok(serde_json::from_str::<dto::Response<T>>(&body)?.into_result()?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Might be input amount too small, try using bigger amount.")]
    InputAmountTooSmall,
    #[error("Chain Id {0} is not supported by 1inch")]
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

impl From<dto::Error> for Error {
    fn from(err: dto::Error) -> Self {
        // The public API puts the reason into `description`, proxies in
        // front of it into `error`.
        if [&err.error, &err.description]
            .iter()
            .any(|reason| reason.as_str() == "insufficient liquidity")
        {
            return Self::InputAmountTooSmall;
        }
        Self::Api(err.error)
    }
}
