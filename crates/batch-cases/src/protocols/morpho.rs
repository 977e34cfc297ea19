//! MetaMorpho vaults, entered through the Morpho bundler so that wrapping
//! and depositing happen in one call.

use {
    super::erc20::{self, Token},
    crate::{
        domain::{
            Error,
            eth::{PreviewTx, Tx},
            vault::Vault,
        },
        infra::blockchain::Node,
    },
    alloy::{
        primitives::{Address, Bytes, U256},
        sol_types::SolCall,
    },
    contracts::{MetaMorpho, MorphoBundler, addresses::ethereum},
};

pub const NAME: &str = "Morpho Blue";

pub fn deposit_preview(token: &Token, vault_name: &str) -> PreviewTx {
    PreviewTx::new(
        "Deposit",
        format!("{} to {vault_name} on {NAME}", token.symbol),
        ethereum::MORPHO_BUNDLER,
    )
    .highlight(NAME)
}

/// Lower bound on the shares `vault` mints for `assets`. Fails when the
/// share price moved so far that the bound would not hold.
pub async fn min_shares(node: &dyn Node, vault: Address, assets: U256) -> Result<U256, Error> {
    let asset = node.read(vault, MetaMorpho::assetCall {}).await?;
    let (balance, total_supply, decimals_offset, total_assets) = futures::try_join!(
        erc20::balance_of(node, asset, vault),
        async { Ok::<_, Error>(node.read(vault, MetaMorpho::totalSupplyCall {}).await?) },
        async { Ok::<_, Error>(node.read(vault, MetaMorpho::DECIMALS_OFFSETCall {}).await?) },
        async { Ok::<_, Error>(node.read(vault, MetaMorpho::totalAssetsCall {}).await?) },
    )?;

    let state = Vault {
        total_supply,
        total_assets,
        decimals_offset,
    };
    let shares = state.convert_to_shares(assets).ok_or(Error::Overflow)?;
    let min_shares = state.min_shares(assets).ok_or(Error::Overflow)?;

    let covered = assets.min(balance);
    let expected = shares.checked_mul(assets).ok_or(Error::Overflow)?;
    let bound = covered.checked_mul(min_shares).ok_or(Error::Overflow)?;
    if expected < bound {
        return Err(Error::Invalid(
            "The share has changed, please try again.".to_owned(),
        ));
    }
    Ok(min_shares)
}

/// Bundler calldata depositing `assets` the bundler holds into `vault`.
pub async fn erc4626_deposit(
    node: &dyn Node,
    vault: Address,
    assets: U256,
    receiver: Address,
) -> Result<Bytes, Error> {
    let min_shares = min_shares(node, vault, assets).await?;
    Ok(MorphoBundler::erc4626DepositCall {
        vault,
        assets,
        minShares: min_shares,
        receiver,
    }
    .abi_encode()
    .into())
}

/// Wraps bundler calls into a `multicall`. The bundler only accepts calls
/// that come in through it.
pub fn multicall(
    calls: Vec<Bytes>,
    value: U256,
    token: &Token,
    amount: U256,
    vault_name: &str,
) -> Tx {
    Tx::call(
        "Deposit",
        format!("{} to {vault_name} on {NAME}", token.format(amount)),
        ethereum::MORPHO_BUNDLER,
        &MorphoBundler::multicallCall { data: calls },
    )
    .with_value(value)
    .highlight(NAME)
}

/// Deposits ETH into a WETH vault: the bundler wraps the attached ETH and
/// deposits the WETH for `receiver`.
pub async fn deposit_eth(
    node: &dyn Node,
    vault: Address,
    vault_name: &str,
    amount: U256,
    receiver: Address,
) -> Result<Tx, Error> {
    let wrap = MorphoBundler::wrapNativeCall { amount }.abi_encode().into();
    let deposit = erc4626_deposit(node, vault, amount, receiver).await?;
    Ok(multicall(
        vec![wrap, deposit],
        amount,
        &erc20::ETH,
        amount,
        vault_name,
    ))
}

/// Deposits `amount` of an ERC20 token into its vault. The token is
/// transferred to the bundler first, which then deposits what it holds.
pub async fn deposit_erc20(
    node: &dyn Node,
    token: &Token,
    vault: Address,
    vault_name: &str,
    amount: U256,
    receiver: Address,
) -> Result<Vec<Tx>, Error> {
    let deposit = erc4626_deposit(node, vault, amount, receiver).await?;
    Ok(vec![
        erc20::transfer(token, ethereum::MORPHO_BUNDLER, amount),
        multicall(vec![deposit], U256::ZERO, token, amount, vault_name),
    ])
}
