//! Lido liquid staking: ETH is staked for stETH, which is wrapped into the
//! non-rebasing wstETH.

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
    contracts::{
        Lido,
        WstETH,
        addresses::{REFERRAL, ethereum},
    },
    number::units::format_ether,
};

pub const STETH: Token = Token::new(ethereum::LIDO_STETH, "stETH", 18);
pub const WSTETH: Token = Token::new(ethereum::LIDO_WSTETH, "wstETH", 18);

pub fn stake_preview() -> PreviewTx {
    PreviewTx::new("Stake", "ETH to Lido", STETH.address).highlight("Lido")
}

pub fn stake(amount: U256) -> Tx {
    Tx::call(
        "Stake",
        format!("{} ETH to Lido", format_ether(amount)),
        STETH.address,
        &Lido::submitCall { referral: REFERRAL },
    )
    .with_value(amount)
    .highlight("Lido")
}

pub fn approve_wrap_preview() -> PreviewTx {
    erc20::approve_preview(&STETH, "wstETH")
}

pub async fn approve_wrap_if_needed(
    node: &dyn Node,
    owner: Address,
    amount: U256,
) -> Result<Option<Tx>, Error> {
    erc20::approve_if_needed(node, owner, &STETH, WSTETH.address, "wstETH", amount).await
}

pub fn wrap_preview() -> PreviewTx {
    PreviewTx::new("Wrap", "stETH to wstETH", WSTETH.address).highlight("wstETH")
}

pub fn wrap(amount: U256) -> Tx {
    Tx::call(
        "Wrap",
        format!("{} stETH into wstETH", format_ether(amount)),
        WSTETH.address,
        &WstETH::wrapCall {
            stETHAmount: amount,
        },
    )
}

/// wstETH received for wrapping `amount` stETH.
pub async fn wsteth_for_steth(node: &dyn Node, amount: U256) -> Result<U256, Error> {
    Ok(node
        .read(
            WSTETH.address,
            WstETH::getWstETHByStETHCall {
                stETHAmount: amount,
            },
        )
        .await?)
}

/// wstETH received for wrapping the stETH minted by staking `amount`. stETH
/// transfers lose a wei to share rounding, so one wei is taken off.
pub async fn estimate_wsteth(node: &dyn Node, amount: U256) -> Result<U256, Error> {
    let wsteth = wsteth_for_steth(node, amount).await?;
    Ok(wsteth.saturating_sub(U256::from(1)))
}
