//! The shape every batch case has: static metadata describing it, preview
//! transactions, and a render step that turns inputs into transactions.

use {
    crate::{
        domain::{
            eth::{PreviewTx, Tx},
            validate::{self, Validator},
        },
        infra::{
            blockchain::{self, Node},
            dex::{self, Dexes},
        },
    },
    alloy::primitives::{Address, U256},
    chrono::{DateTime, Utc},
    serde::Serialize,
    std::{borrow::Cow, sync::Arc},
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub website: Link,
    pub tags: Vec<Tag>,
    pub curator_twitter: Curator,
    pub protocols: Vec<Protocol>,
    pub attributes: Vec<Attribute>,
    pub network_id: u64,
    /// Whether the batch must be submitted as a single atomic bundle.
    pub atomic: bool,
    /// Seconds after which rendered transactions are stale and have to be
    /// rendered again.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_expiry: Option<u64>,
    pub supported_wallet_types: Vec<WalletType>,
    pub inputs: Vec<Input>,
}

impl Metadata {
    /// Every case in the catalog is curated by the same account.
    pub fn curator() -> Curator {
        Curator {
            name: "Bento Batch 🍱",
            url: "https://x.com/bentobatch",
        }
    }

    /// Attribute telling how many transactions a rendered batch has.
    pub fn txn_count(count: &'static str) -> Attribute {
        Attribute {
            id: "txn_count",
            name: "TXN count",
            value: count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    pub title: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Curator {
    pub name: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub id: &'static str,
    pub name: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum Tag {
    Official,
    Benefits,
    #[serde(rename = "DeFi")]
    #[strum(serialize = "DeFi")]
    Defi,
    Staking,
    Restaking,
    Lending,
    Points,
    Airdrop,
    Bridge,
    #[serde(rename = "NFT")]
    #[strum(serialize = "NFT")]
    Nft,
    Yield,
    Stablecoin,
    Liquidity,
    Swap,
    Asset,
    #[serde(rename = "RWA")]
    #[strum(serialize = "RWA")]
    Rwa,
    #[serde(rename = "ETH")]
    #[strum(serialize = "ETH")]
    Eth,
    #[serde(rename = "weETH")]
    #[strum(serialize = "weETH")]
    WeEth,
    EtherFi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum Protocol {
    #[strum(serialize = "1inch")]
    #[serde(rename = "1inch")]
    OneInch,
    Aave,
    Arbitrum,
    #[strum(serialize = "ether.fi")]
    #[serde(rename = "ether.fi")]
    EtherFi,
    Gamma,
    Genesis,
    KyberSwap,
    Lido,
    Morpho,
    Pendle,
    Penpad,
    SpaceFi,
    SyncSwap,
    Uniswap,
    Yearn,
    Zircuit,
    Zora,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WalletType {
    /// Smart contract (account abstraction) wallets.
    #[serde(rename = "AA")]
    Aa,
    /// Externally owned accounts.
    #[serde(rename = "EOA")]
    Eoa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputType {
    NativeAmount,
    #[serde(rename = "ERC20Amount")]
    Erc20Amount,
    Text,
    Address,
}

/// Buttons a wallet UI shows next to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputButton {
    /// Fill in the whole balance.
    Max,
    /// Fill in the connected account.
    PasteMyAddress,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub name: Cow<'static, str>,
    pub input_type: InputType,
    pub description: &'static str,
    pub validate: Validator,
    /// Token whose balance is shown next to the input. `None` for the native
    /// token of an amount input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<Address>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub action_buttons: Vec<InputButton>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_optional: bool,
}

impl Input {
    /// An ETH amount with a max button.
    pub fn native(
        name: impl Into<Cow<'static, str>>,
        description: &'static str,
        validate: Validator,
    ) -> Self {
        Self {
            name: name.into(),
            input_type: InputType::NativeAmount,
            description,
            validate,
            token: None,
            action_buttons: vec![InputButton::Max],
            is_optional: false,
        }
    }

    /// An ERC20 amount with a max button.
    pub fn erc20(
        name: impl Into<Cow<'static, str>>,
        description: &'static str,
        token: Address,
        validate: Validator,
    ) -> Self {
        Self {
            name: name.into(),
            input_type: InputType::Erc20Amount,
            description,
            validate,
            token: Some(token),
            action_buttons: vec![InputButton::Max],
            is_optional: false,
        }
    }

    pub fn text(
        name: impl Into<Cow<'static, str>>,
        description: &'static str,
        validate: Validator,
    ) -> Self {
        Self {
            name: name.into(),
            input_type: InputType::Text,
            description,
            validate,
            token: None,
            action_buttons: vec![],
            is_optional: false,
        }
    }

    pub fn address(name: impl Into<Cow<'static, str>>, description: &'static str) -> Self {
        Self {
            name: name.into(),
            input_type: InputType::Address,
            description,
            validate: Validator::Address,
            token: None,
            action_buttons: vec![InputButton::PasteMyAddress],
            is_optional: false,
        }
    }
}

/// A link offered after a batch was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Action {
    pub href: &'static str,
    pub text: &'static str,
}

/// What a render has to work with.
#[derive(Clone)]
pub struct Context {
    pub account: Address,
    pub chain_id: u64,
    /// Raw input values in declaration order. Optional inputs that were left
    /// empty are `None`.
    pub inputs: Vec<Option<String>>,
    pub node: Arc<dyn Node>,
    pub dexes: Arc<Dexes>,
    pub now: DateTime<Utc>,
}

impl Context {
    /// The raw value of a required input.
    pub fn input(&self, index: usize) -> Result<&str, Error> {
        self.inputs
            .get(index)
            .and_then(Option::as_deref)
            .ok_or(Error::MissingInput(index))
    }

    /// A required input parsed as an amount with `decimals` decimals.
    pub fn amount(&self, index: usize, decimals: u8) -> Result<U256, Error> {
        Ok(number::units::parse_units(self.input(index)?, decimals)?)
    }

    /// A required input parsed as an address.
    pub fn address(&self, index: usize) -> Result<Address, Error> {
        self.input(index)?
            .trim()
            .parse()
            .map_err(|_| Error::Invalid("Invalid address".to_owned()))
    }
}

#[async_trait::async_trait]
pub trait Case: Send + Sync {
    fn metadata(&self) -> Metadata;

    /// The steps of the batch as shown before rendering. Steps that are only
    /// added when needed (e.g. approvals) are included.
    fn preview(&self) -> Vec<PreviewTx>;

    /// Links to manage the position created by the batch.
    fn actions(&self) -> Vec<Action> {
        vec![]
    }

    /// Builds the transactions of the batch for `ctx.account`.
    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error>;
}

/// Checks the raw inputs against what a case declares.
pub fn validate(metadata: &Metadata, inputs: &[Option<String>]) -> Result<(), Error> {
    for (index, input) in metadata.inputs.iter().enumerate() {
        match inputs.get(index).and_then(Option::as_deref) {
            Some(value) => input
                .validate
                .validate(value)
                .map_err(|validate::Error(reason)| Error::InvalidInput {
                    name: input.name.clone(),
                    reason,
                })?,
            None if input.is_optional => {}
            None => return Err(Error::MissingInput(index)),
        }
    }
    if inputs.len() > metadata.inputs.len() {
        return Err(Error::Invalid(format!(
            "expected at most {} inputs but got {}",
            metadata.inputs.len(),
            inputs.len()
        )));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing input #{0}")]
    MissingInput(usize),
    #[error("{name}: {reason}")]
    InvalidInput {
        name: Cow<'static, str>,
        reason: String,
    },
    /// The inputs are well-formed, but the batch can't be built with them
    /// in the current on-chain state.
    #[error("{0}")]
    Invalid(String),
    #[error("arithmetic overflow")]
    Overflow,
    #[error(transparent)]
    Units(#[from] number::units::Error),
    #[error(transparent)]
    Node(#[from] blockchain::Error),
    #[error(transparent)]
    OneInch(#[from] dex::oneinch::Error),
    #[error(transparent)]
    Pendle(#[from] dex::pendle::Error),
    #[error(transparent)]
    KyberSwap(#[from] dex::kyberswap::Error),
}
