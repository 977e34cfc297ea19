//! Zircuit restaking: liquid restaking tokens are deposited into the
//! Zircuit pool to earn points.

use {
    super::erc20::{self, Token},
    crate::{
        domain::{
            Error,
            eth::{PreviewTx, Tx},
        },
        infra::blockchain::Node,
    },
    alloy::primitives::{Address, U256},
    contracts::{ZircuitRestakingPool, addresses::ethereum},
};

pub const NAME: &str = "Zircuit";

pub fn approve_preview(token: &Token) -> PreviewTx {
    PreviewTx::new(
        "Approve",
        format!("{} to {NAME}", token.symbol),
        token.address,
    )
    .highlight(NAME)
}

pub async fn approve_if_needed(
    node: &dyn Node,
    owner: Address,
    token: &Token,
    amount: U256,
) -> Result<Option<Tx>, Error> {
    let allowance =
        erc20::allowance(node, token.address, owner, ethereum::ZIRCUIT_RESTAKING_POOL).await?;
    Ok((allowance < amount).then(|| {
        Tx::call(
            "Approve",
            format!("{} to {NAME}", token.format(amount)),
            token.address,
            &contracts::IERC20::approveCall {
                spender: ethereum::ZIRCUIT_RESTAKING_POOL,
                amount,
            },
        )
        .highlight(NAME)
    }))
}

pub fn deposit_preview(token: &Token) -> PreviewTx {
    PreviewTx::new(
        "Deposit",
        format!("{} to {NAME}", token.symbol),
        ethereum::ZIRCUIT_RESTAKING_POOL,
    )
    .highlight(NAME)
}

/// Deposits `amount` of `token`, crediting `receiver`.
pub fn deposit(token: &Token, amount: U256, receiver: Address) -> Tx {
    Tx::call(
        "Deposit",
        format!("{} to {NAME}", token.format(amount)),
        ethereum::ZIRCUIT_RESTAKING_POOL,
        &ZircuitRestakingPool::depositForCall {
            token: token.address,
            receiver,
            amount,
        },
    )
    .highlight(NAME)
}
