//! Swaps routed by the 1inch aggregation router.

use {
    super::erc20::Token,
    crate::{
        domain::{
            Context,
            Error,
            eth::{PreviewTx, Tx},
        },
        infra::dex::oneinch::{self, dto},
    },
    alloy::primitives::U256,
    contracts::addresses,
    number::{
        u256_ext::{Rounding, U256Ext},
        units::exp10,
    },
};

pub const NAME: &str = "1inch";

/// Tolerated slippage, in percent.
const SLIPPAGE: f64 = 0.5;

pub fn swap_preview(src: &Token, dst: &Token) -> PreviewTx {
    PreviewTx::new(
        "Swap",
        format!("{} to {} at {NAME}", src.symbol, dst.symbol),
        addresses::oneinch::ROUTER_V6,
    )
    .highlight(NAME)
}

/// Sells `amount` of `src` for `dst` and returns the swap together with the
/// amount of `dst` it is quoted to buy.
pub async fn swap(
    ctx: &Context,
    src: &Token,
    amount: U256,
    dst: &Token,
) -> Result<(Tx, U256), Error> {
    let swap = ctx
        .dexes
        .oneinch
        .swap(
            ctx.chain_id,
            &dto::SwapQuery {
                quote: dto::Query {
                    src: src.address,
                    dst: dst.address,
                    amount,
                },
                from: ctx.account,
                slippage: SLIPPAGE,
                disable_estimate: true,
            },
        )
        .await?;
    tracing::debug!(
        src = src.symbol,
        dst = dst.symbol,
        %amount,
        dst_amount = %swap.dst_amount,
        "routed swap"
    );

    let tx = Tx::raw(
        "Swap",
        format!(
            "{} to {} at {NAME}",
            src.format(amount),
            dst.format(swap.dst_amount)
        ),
        swap.tx.to,
        swap.tx.data,
    )
    .with_value(swap.tx.value)
    .highlight(NAME);
    Ok((tx, swap.dst_amount))
}

pub async fn quote(ctx: &Context, src: &Token, amount: U256, dst: &Token) -> Result<U256, Error> {
    Ok(ctx
        .dexes
        .oneinch
        .quote(
            ctx.chain_id,
            &dto::Query {
                src: src.address,
                dst: dst.address,
                amount,
            },
        )
        .await?)
}

/// How much `src` has to be sold to buy at least `dst_amount` of `dst`. The
/// API only quotes exact inputs, so the price of one whole `src` token is
/// extrapolated with a relative `buffer` and the result is checked with a
/// second quote.
pub async fn src_amount(
    ctx: &Context,
    src: &Token,
    dst_amount: U256,
    dst: &Token,
    buffer: f64,
) -> Result<U256, Error> {
    let trial = exp10(src.decimals);
    let trial_quote = quote(ctx, src, trial, dst).await?;
    let amount = dst_amount
        .checked_mul_div(trial, trial_quote, Rounding::Floor)
        .and_then(|amount| amount.checked_mul_f64(1. + buffer))
        .ok_or(Error::Overflow)?;

    if quote(ctx, src, amount, dst).await? > dst_amount {
        Ok(amount)
    } else {
        Err(oneinch::Error::InputAmountTooSmall.into())
    }
}
