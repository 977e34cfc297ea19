use {
    crate::{
        domain::{
            Error,
            eth::{PreviewTx, Tx},
        },
        infra::blockchain::Node,
    },
    alloy::primitives::{Address, U256},
    contracts::{IERC20, addresses},
    number::units,
};

/// A token as far as descriptions are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub address: Address,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// The native token, with the address aggregators use for it.
pub const ETH: Token = Token::new(addresses::NATIVE_TOKEN, "ETH", 18);

impl Token {
    pub const fn new(address: Address, symbol: &'static str, decimals: u8) -> Self {
        Self {
            address,
            symbol,
            decimals,
        }
    }

    /// `amount` in whole units followed by the symbol, e.g. `1.5 USDC`.
    pub fn format(&self, amount: U256) -> String {
        format!("{} {}", units::format_units(amount, self.decimals), self.symbol)
    }
}

pub fn approve_preview(token: &Token, spender_name: &str) -> PreviewTx {
    PreviewTx::new(
        "Approve",
        format!("{spender_name} to access {}", token.symbol),
        token.address,
    )
    .highlight(spender_name)
}

pub fn approve(token: &Token, spender: Address, spender_name: &str, amount: U256) -> Tx {
    Tx::call(
        "Approve",
        format!("{spender_name} to access {}", token.format(amount)),
        token.address,
        &IERC20::approveCall { spender, amount },
    )
    .highlight(spender_name)
}

/// An approval for `amount`, or `None` when the current allowance already
/// covers it.
pub async fn approve_if_needed(
    node: &dyn Node,
    owner: Address,
    token: &Token,
    spender: Address,
    spender_name: &str,
    amount: U256,
) -> Result<Option<Tx>, Error> {
    let allowance = allowance(node, token.address, owner, spender).await?;
    Ok((allowance < amount).then(|| approve(token, spender, spender_name, amount)))
}

pub fn transfer_preview(token: &Token, receiver: Address) -> PreviewTx {
    PreviewTx::new(
        "Transfer",
        format!("{} to {receiver}", token.symbol),
        token.address,
    )
    .highlight(token.symbol)
}

pub fn transfer(token: &Token, to: Address, amount: U256) -> Tx {
    Tx::call(
        "Transfer",
        format!("{} to {to}", token.format(amount)),
        token.address,
        &IERC20::transferCall { to, amount },
    )
    .highlight(token.symbol)
}

pub async fn allowance(
    node: &dyn Node,
    token: Address,
    owner: Address,
    spender: Address,
) -> Result<U256, Error> {
    Ok(node
        .read(token, IERC20::allowanceCall { owner, spender })
        .await?)
}

pub async fn balance_of(node: &dyn Node, token: Address, owner: Address) -> Result<U256, Error> {
    Ok(node.read(token, IERC20::balanceOfCall { owner }).await?)
}

pub async fn decimals(node: &dyn Node, token: Address) -> Result<u8, Error> {
    Ok(node.read(token, IERC20::decimalsCall {}).await?)
}
