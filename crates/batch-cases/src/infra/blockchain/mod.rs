use {
    alloy::{
        network::TransactionBuilder,
        primitives::{Address, Bytes, U256},
        providers::{DynProvider, Provider, ProviderBuilder},
        rpc::types::TransactionRequest,
        sol_types::SolCall,
    },
    url::Url,
};

/// A read-only `eth_call`, optionally from an account and with ETH attached
/// so payable functions can be simulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub from: Option<Address>,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

/// Read access to the chain a case is rendered for.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Node: Send + Sync {
    /// Executes a call against the latest block and returns the raw output.
    async fn call(&self, call: Call) -> Result<Bytes, Error>;

    /// Native token balance of an account.
    async fn balance(&self, owner: Address) -> Result<U256, Error>;
}

impl dyn Node + '_ {
    /// Calls a view function and decodes its return value.
    pub async fn read<C: SolCall>(&self, to: Address, call: C) -> Result<C::Return, Error> {
        let data = self
            .call(Call {
                from: None,
                to,
                value: U256::ZERO,
                data: call.abi_encode().into(),
            })
            .await?;
        Ok(C::abi_decode_returns(&data)?)
    }

    /// Simulates a (payable) call from `from` and decodes what it would
    /// return.
    pub async fn simulate<C: SolCall>(
        &self,
        from: Address,
        to: Address,
        value: U256,
        call: C,
    ) -> Result<C::Return, Error> {
        let data = self
            .call(Call {
                from: Some(from),
                to,
                value,
                data: call.abi_encode().into(),
            })
            .await?;
        Ok(C::abi_decode_returns(&data)?)
    }
}

/// A JSON RPC connection to an Ethereum compatible node.
pub struct Ethereum {
    provider: DynProvider,
}

impl Ethereum {
    /// Connects to the node at `url` and checks that it serves `chain_id`.
    pub async fn connect(chain_id: u64, url: &Url) -> Result<Self, Error> {
        let provider = ProviderBuilder::new().connect_http(url.clone()).erased();
        let actual = provider.get_chain_id().await?;
        if actual != chain_id {
            return Err(Error::ChainMismatch {
                expected: chain_id,
                actual,
            });
        }
        tracing::debug!(chain_id, %url, "connected to node");
        Ok(Self { provider })
    }
}

#[async_trait::async_trait]
impl Node for Ethereum {
    async fn call(&self, call: Call) -> Result<Bytes, Error> {
        let mut request = TransactionRequest::default()
            .with_to(call.to)
            .with_value(call.value)
            .with_input(call.data);
        if let Some(from) = call.from {
            request = request.with_from(from);
        }
        tracing::trace!(?request, "eth_call");
        Ok(self.provider.call(request).await?)
    }

    async fn balance(&self, owner: Address) -> Result<U256, Error> {
        Ok(self.provider.get_balance(owner).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node is on chain {actual} but chain {expected} was expected")]
    ChainMismatch { expected: u64, actual: u64 },
    #[error("no node is configured for chain {0}")]
    NotConfigured(u64),
    #[error(transparent)]
    Rpc(#[from] alloy::transports::TransportError),
    #[error("unexpected return data: {0}")]
    Decode(#[from] alloy::sol_types::Error),
}
