//! Leveraged Lido staking: stake, wrap and supply wstETH on AAVE, then
//! repeatedly borrow ETH against it and do the same again until the
//! requested multiple of the initial deposit is staked.

use {
    super::metadata,
    crate::{
        domain::{
            Case,
            Context,
            Error,
            PreviewTx,
            Tx,
            case::{Action, Input, Link, Metadata, Protocol, Tag},
            leverage,
            validate::Validator,
        },
        infra::blockchain::Node,
        protocols::{
            aave,
            lido::{self, WSTETH},
        },
    },
    alloy::primitives::{Address, U256},
    contracts::networks,
    futures::future,
    number::u256_ext::U256Ext,
};

/// Share of the last deposit borrowed in the next round.
const BORROW_RATIO: f64 = 0.9;
const MIN_MULTIPLIER: f64 = 1.;
const MAX_MULTIPLIER: f64 = 5.;

pub struct LidoMultiplier;

#[async_trait::async_trait]
impl Case for LidoMultiplier {
    fn metadata(&self) -> Metadata {
        Metadata {
            tags: vec![Tag::Defi, Tag::Restaking],
            protocols: vec![Protocol::Lido, Protocol::Aave],
            render_expiry: Some(30),
            inputs: vec![
                Input::native(
                    "ETH Amount",
                    "Amount to supply",
                    Validator::decimal(18, U256::ZERO),
                ),
                Input::text(
                    "Risk Multiplier",
                    "Risk Multiplier you want to take. Ex: Multiplier is 5 and supply 1 ETH, means \
                     borrow 4 ETH and wrap all to wstETH and suuply all wstETH to AAVE (Min: 1.0, \
                     Max: 5.0)",
                    Validator::Number {
                        min: MIN_MULTIPLIER,
                        max: MAX_MULTIPLIER,
                    },
                ),
            ],
            ..metadata(
                "lido_multiplier",
                "Multiply your Lido staking by AAVE lending",
                "One Click to repeatedly stake ETH on Lido through lending and borrowing on AAVE",
                Link {
                    title: "Lido",
                    url: "https://stake.lido.fi/",
                },
                networks::MAINNET,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        vec![
            aave::enable_emode_preview(),
            aave::delegate_preview(),
            lido::approve_wrap_preview(),
            aave::approve_preview(&WSTETH),
            lido::stake_preview(),
            lido::wrap_preview(),
            aave::supply_preview(&WSTETH),
            aave::borrow_eth_preview(),
        ]
    }

    fn actions(&self) -> Vec<Action> {
        vec![
            Action {
                href: "https://stake.lido.fi/",
                text: "Check Portfolio (Lido)",
            },
            Action {
                href: "https://app.aave.com/",
                text: "Check Portfolio (AAVE)",
            },
        ]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let node = &*ctx.node;
        let amount = ctx.amount(0, 18)?;
        let multiplier = multiplier(ctx.input(1)?)?;
        let target = amount.checked_mul_f64(multiplier).ok_or(Error::Overflow)?;
        let borrows = borrows(amount, target, multiplier)?;
        tracing::debug!(%target, rounds = borrows.len() + 1, "leveraging");

        let (emode, approve_wrap, approve_supply) = futures::try_join!(
            aave::emode_enabled(node, ctx.account),
            lido::approve_wrap_if_needed(node, ctx.account, target),
            aave::approve_if_needed(node, ctx.account, &WSTETH, target),
        )?;
        let deposits = future::try_join_all(
            std::iter::once(amount)
                .chain(borrows.iter().copied())
                .map(|deposit| stake_wrap_supply(node, ctx.account, deposit)),
        )
        .await?;

        let mut txs = Vec::new();
        if !emode {
            txs.push(aave::enable_emode());
        }
        txs.push(aave::delegate(target));
        txs.extend(approve_wrap);
        txs.extend(approve_supply);

        let mut deposits = deposits.into_iter();
        txs.extend(deposits.next().into_iter().flatten());
        for (borrow, deposit) in borrows.into_iter().zip(deposits) {
            txs.push(aave::borrow_eth(borrow));
            txs.extend(deposit);
        }
        Ok(txs)
    }
}

fn multiplier(input: &str) -> Result<f64, Error> {
    let invalid = |reason: &str| Error::InvalidInput {
        name: "Risk Multiplier".into(),
        reason: reason.to_owned(),
    };
    let multiplier = input
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid("Invalid number"))?;
    if !(MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&multiplier) {
        return Err(invalid("Multiplier must be between 1 and 5"));
    }
    Ok(multiplier)
}

/// ETH borrowed in every round after the initial deposit. Each round
/// borrows 90% of the previous one, except for the last, which borrows
/// exactly what is left to reach `target`.
fn borrows(amount: U256, target: U256, multiplier: f64) -> Result<Vec<U256>, Error> {
    let rounds = leverage::minimum_rounds(1., BORROW_RATIO, multiplier)
        .map_err(|err| Error::Invalid(err.to_string()))?;

    let mut borrows = Vec::new();
    let mut total = amount;
    let mut borrow = amount;
    for round in 1..rounds {
        borrow = borrow * U256::from(9) / U256::from(10);
        if round == rounds - 1 {
            borrow = target.checked_sub(total).ok_or(Error::Overflow)?;
        }
        borrows.push(borrow);
        total += borrow;
    }
    Ok(borrows)
}

/// Stakes `amount` ETH on Lido, wraps the stETH and supplies the wstETH to
/// AAVE.
async fn stake_wrap_supply(
    node: &dyn Node,
    account: Address,
    amount: U256,
) -> Result<Vec<Tx>, Error> {
    let wsteth = lido::estimate_wsteth(node, amount).await?;
    Ok(vec![
        lido::stake(amount),
        lido::wrap(amount.saturating_sub(U256::from(1))),
        aave::supply(&WSTETH, wsteth, account),
    ])
}
