//! Gamma hypervisors: managed Uniswap V3 positions that take both tokens of
//! a pair and mint fungible LP shares.

use {
    super::erc20::{self, Token},
    crate::{
        domain::{
            Error,
            eth::{PreviewTx, Tx},
            gamma::{self, Hypervisor},
        },
        infra::blockchain::Node,
    },
    alloy::primitives::{Address, U256},
    contracts::{GammaHypervisor, GammaUniProxy},
    number::u256_ext::U256Ext,
};

pub const NAME: &str = "Gamma";

/// Share of the locally computed LP shares that the deposit is assumed to
/// mint at least. The pool may move before inclusion.
const SAFE_SHARES_BPS: u64 = 9_999;

impl From<gamma::Error> for Error {
    fn from(err: gamma::Error) -> Self {
        match err {
            gamma::Error::Overflow => Self::Overflow,
            gamma::Error::Tick(err) => Self::Invalid(err.to_string()),
        }
    }
}

/// How much of the other token of the pair has to accompany `amount` of
/// `token`. The proxy returns a range, its midpoint is used.
pub async fn deposit_amount(
    node: &dyn Node,
    proxy: Address,
    hypervisor: Address,
    token: Address,
    amount: U256,
) -> Result<U256, Error> {
    let range = node
        .read(
            proxy,
            GammaUniProxy::getDepositAmountCall {
                pos: hypervisor,
                token,
                deposit: amount,
            },
        )
        .await?;
    Ok((range.amountStart + range.amountEnd) / U256::from(2))
}

pub fn deposit_preview(proxy: Address, token0: &Token, token1: &Token) -> PreviewTx {
    PreviewTx::new(
        "Deposit",
        format!("{} and {} to {NAME}", token0.symbol, token1.symbol),
        proxy,
    )
    .highlight(NAME)
}

/// A built deposit with the LP shares it is expected to mint.
#[derive(Debug, Clone)]
pub struct Deposit {
    pub tx: Tx,
    /// Lower bound on the minted LP shares.
    pub safe_shares: U256,
    pub shares_decimals: u8,
}

/// Deposits `amount0` of `token0` and `amount1` of `token1` into
/// `hypervisor` for `account`. The tokens must be given in the order the
/// hypervisor declares them.
pub async fn deposit(
    node: &dyn Node,
    proxy: Address,
    hypervisor: Address,
    account: Address,
    (token0, amount0): (&Token, U256),
    (token1, amount1): (&Token, U256),
) -> Result<Deposit, Error> {
    let (actual0, actual1) = futures::try_join!(
        node.read(hypervisor, GammaHypervisor::token0Call {}),
        node.read(hypervisor, GammaHypervisor::token1Call {}),
    )?;
    if actual0 != token0.address || actual1 != token1.address {
        return Err(Error::Invalid(
            "The two addresses input doesn't match with the tokens of this LP pair.".to_owned(),
        ));
    }

    let state = read(node, hypervisor).await?;
    let shares = state.shares(amount0, amount1)?;
    let safe_shares = shares
        .checked_mul_bps(SAFE_SHARES_BPS)
        .ok_or(Error::Overflow)?;
    let shares_decimals = node
        .read(hypervisor, GammaHypervisor::decimalsCall {})
        .await?;

    let tx = Tx::call(
        "Deposit",
        format!(
            "{} and {} to {NAME}",
            token0.format(amount0),
            token1.format(amount1)
        ),
        proxy,
        &GammaUniProxy::depositCall {
            deposit0: amount0,
            deposit1: amount1,
            to: account,
            pos: hypervisor,
            minIn: [U256::ZERO; 4],
        },
    )
    .highlight(NAME);

    Ok(Deposit {
        tx,
        safe_shares,
        shares_decimals,
    })
}

async fn read(node: &dyn Node, hypervisor: Address) -> Result<Hypervisor, Error> {
    let (tick, precision, totals, total_supply) = futures::try_join!(
        node.read(hypervisor, GammaHypervisor::currentTickCall {}),
        node.read(hypervisor, GammaHypervisor::PRECISIONCall {}),
        node.read(hypervisor, GammaHypervisor::getTotalAmountsCall {}),
        node.read(hypervisor, GammaHypervisor::totalSupplyCall {}),
    )?;
    Ok(Hypervisor {
        current_tick: i32::try_from(tick).map_err(|_| Error::Overflow)?,
        precision,
        total0: totals.total0,
        total1: totals.total1,
        total_supply,
    })
}

/// Approves `token` for `hypervisor`, which pulls the deposit.
pub async fn approve_if_needed(
    node: &dyn Node,
    owner: Address,
    token: &Token,
    hypervisor: Address,
    amount: U256,
) -> Result<Option<Tx>, Error> {
    erc20::approve_if_needed(node, owner, token, hypervisor, "Gamma Vault", amount).await
}

pub fn approve_preview(token: &Token) -> PreviewTx {
    erc20::approve_preview(token, "Gamma Vault")
}
