//! ether.fi restaking: ETH is staked for eETH, which is wrapped into weETH
//! and can be deposited into the liquid vault.

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
    contracts::{EtherFiLiquidVault, EtherFiLiquidityPool, WeETH, addresses::ethereum},
    number::units::format_ether,
};

pub const EETH: Token = Token::new(ethereum::ETHER_FI_EETH, "eETH", 18);
pub const WEETH: Token = Token::new(ethereum::ETHER_FI_WEETH, "weETH", 18);

pub const LIQUID_VAULT_NAME: &str = "Ether Fi Liquid Vault v1";

pub fn stake_preview() -> PreviewTx {
    PreviewTx::new("Stake", "ETH to ether.fi", ethereum::ETHER_FI_LIQUIDITY_POOL)
        .highlight("ether.fi")
}

pub fn stake(amount: U256) -> Tx {
    Tx::call(
        "Stake",
        format!("{} ETH to ether.fi", format_ether(amount)),
        ethereum::ETHER_FI_LIQUIDITY_POOL,
        &EtherFiLiquidityPool::deposit_0Call {},
    )
    .with_value(amount)
    .highlight("ether.fi")
}

pub fn wrap_preview() -> PreviewTx {
    PreviewTx::new("Wrap", "eETH to weETH", WEETH.address).highlight("weETH")
}

/// Shares (weETH) minted for staking `amount` ETH from `account`.
pub async fn shares_for_deposit(
    node: &dyn Node,
    account: Address,
    amount: U256,
) -> Result<U256, Error> {
    Ok(node
        .simulate(
            account,
            ethereum::ETHER_FI_LIQUIDITY_POOL,
            amount,
            EtherFiLiquidityPool::deposit_0Call {},
        )
        .await?)
}

/// eETH backing `shares`.
pub async fn amount_for_share(node: &dyn Node, shares: U256) -> Result<U256, Error> {
    Ok(node
        .read(
            ethereum::ETHER_FI_LIQUIDITY_POOL,
            EtherFiLiquidityPool::amountForShareCall { share: shares },
        )
        .await?)
}

pub fn wrap(eeth: U256) -> Tx {
    Tx::call(
        "Wrap",
        format!("{} eETH into weETH", format_ether(eeth)),
        WEETH.address,
        &WeETH::wrapCall { eETHAmount: eeth },
    )
}

/// weETH expected from staking `amount`, less a wei of rounding.
/// weETH minted when wrapping `eeth`.
pub async fn weeth_for_eeth(node: &dyn Node, eeth: U256) -> Result<U256, Error> {
    Ok(node
        .read(WEETH.address, WeETH::getWeETHByeETHCall { eETHAmount: eeth })
        .await?)
}

pub async fn estimate_weeth(
    node: &dyn Node,
    account: Address,
    amount: U256,
) -> Result<U256, Error> {
    Ok(shares_for_deposit(node, account, amount)
        .await?
        .saturating_sub(U256::from(1)))
}

pub fn stake_and_wrap_preview() -> Vec<PreviewTx> {
    vec![
        stake_preview(),
        erc20::approve_preview(&EETH, "weETH"),
        wrap_preview(),
    ]
}

/// Stakes `amount` ETH and wraps all of the minted eETH.
pub async fn stake_and_wrap(
    node: &dyn Node,
    account: Address,
    amount: U256,
) -> Result<Vec<Tx>, Error> {
    let shares = shares_for_deposit(node, account, amount).await?;
    let eeth = amount_for_share(node, shares).await?;
    Ok(vec![
        stake(amount),
        erc20::approve(&EETH, WEETH.address, "weETH", amount),
        wrap(eeth),
    ])
}

pub fn liquid_vault_preview() -> Vec<PreviewTx> {
    vec![
        erc20::approve_preview(&WEETH, LIQUID_VAULT_NAME),
        PreviewTx::new(
            "Deposit",
            format!("weETH to {LIQUID_VAULT_NAME}"),
            ethereum::ETHER_FI_LIQUID_VAULT,
        )
        .highlight(LIQUID_VAULT_NAME),
    ]
}

pub fn liquid_vault_deposit(weeth: U256, receiver: Address) -> Vec<Tx> {
    vec![
        erc20::approve(&WEETH, ethereum::ETHER_FI_LIQUID_VAULT, LIQUID_VAULT_NAME, weeth),
        Tx::call(
            "Deposit",
            format!("{} into {LIQUID_VAULT_NAME}", WEETH.format(weeth)),
            ethereum::ETHER_FI_LIQUID_VAULT,
            &EtherFiLiquidVault::multiAssetDepositCall {
                asset: WEETH.address,
                amount: weeth,
                receiver,
            },
        ),
    ]
}
