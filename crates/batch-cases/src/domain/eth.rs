use {
    alloy::{
        primitives::{Address, Bytes, U256},
        sol_types::SolCall,
    },
    number::serialization::HexOrDecimalU256,
    serde::Serialize,
    serde_with::serde_as,
};

/// Presentation hints for a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    /// Parts of the description that should be emphasized.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

impl Meta {
    fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }
}

/// One step of a rendered batch, ready to be signed.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tx {
    pub name: String,
    pub description: String,
    pub to: Address,
    #[serde_as(as = "HexOrDecimalU256")]
    pub value: U256,
    pub data: Bytes,
    /// Signature of the called function when it is known, e.g.
    /// `approve(address,uint256)`. Calldata built by aggregators leaves it
    /// empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<&'static str>,
    #[serde(skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl Tx {
    /// A transaction calling `call` on `to`.
    pub fn call<C: SolCall>(
        name: impl Into<String>,
        description: impl Into<String>,
        to: Address,
        call: &C,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            to,
            value: U256::ZERO,
            data: call.abi_encode().into(),
            function: Some(C::SIGNATURE),
            meta: Meta::default(),
        }
    }

    /// A transaction with opaque calldata.
    pub fn raw(
        name: impl Into<String>,
        description: impl Into<String>,
        to: Address,
        data: Bytes,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            to,
            value: U256::ZERO,
            data,
            function: None,
            meta: Meta::default(),
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    pub fn highlight(mut self, highlight: impl Into<String>) -> Self {
        self.meta.highlights.push(highlight.into());
        self
    }
}

/// What a step of a case will look like, shown before any inputs are known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewTx {
    pub name: String,
    pub description: String,
    pub to: Address,
    #[serde(skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl PreviewTx {
    pub fn new(name: impl Into<String>, description: impl Into<String>, to: Address) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            to,
            meta: Meta::default(),
        }
    }

    pub fn highlight(mut self, highlight: impl Into<String>) -> Self {
        self.meta.highlights.push(highlight.into());
        self
    }
}
