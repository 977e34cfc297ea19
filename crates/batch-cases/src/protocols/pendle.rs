//! Pendle yield trading on Arbitrum. Routing is left to the Pendle API, this
//! only turns its answers into batch steps.

use {
    super::erc20::{self, Token},
    crate::{
        domain::{
            Context,
            Error,
            eth::{PreviewTx, Tx},
        },
        infra::{
            blockchain::Node,
            dex::pendle::{Output, dto},
        },
    },
    alloy::primitives::{Address, U256},
    contracts::addresses::arbitrum,
    number::units::format_units,
};

pub const NAME: &str = "Pendle";

/// Pendle's marker for native ETH as swap input.
pub const NATIVE: Address = Address::ZERO;

/// What is bought in a Pendle market.
#[derive(Debug, Clone, Copy)]
pub struct Trade {
    /// Standardized yield token identifying the market.
    pub sy: Address,
    /// Token the SY wraps. Its decimals are used for the output.
    pub underlying: Token,
    /// e.g. `YT rsETH`.
    pub output_name: &'static str,
    /// Relative slippage, `0.005` is 0.5%.
    pub slippage: f64,
}

pub fn swap_preview(token_in: &Token, output_name: &str, to: Address) -> PreviewTx {
    PreviewTx::new(
        "Swap",
        format!("{} to {output_name}", token_in.symbol),
        to,
    )
    .highlight(NAME)
}

/// Buys the yield token of `trade` with `amount` ETH.
pub async fn buy_yt_with_eth(ctx: &Context, trade: &Trade, amount: U256) -> Result<Tx, Error> {
    let market = ctx.dexes.pendle.market(ctx.chain_id, trade.sy).await?;
    let swap = ctx
        .dexes
        .pendle
        .swap_exact_token(
            Output::Yt,
            &dto::Query {
                chain_id: ctx.chain_id,
                receiver_addr: ctx.account,
                market_addr: market,
                token_in_addr: NATIVE,
                amount_token_in: amount,
                sy_token_in_addr: trade.underlying.address,
                slippage: trade.slippage,
            },
        )
        .await?;

    Ok(Tx::raw(
        "Swap",
        format!(
            "{} to {} {} on {NAME}",
            erc20::ETH.format(amount),
            format_units(swap.amount_out, trade.underlying.decimals),
            trade.output_name
        ),
        swap.to,
        swap.data,
    )
    .with_value(amount)
    .highlight(NAME))
}

pub fn provide_liquidity_preview() -> PreviewTx {
    PreviewTx::new(
        "Provide",
        "Liquidity to PT/SY pool on Pendle",
        arbitrum::PENDLE_ROUTER,
    )
    .highlight(NAME)
}

/// Zaps `amount` of `token` into the liquidity of the current market of
/// `sy`. Returns the router that has to be approved together with the step.
pub async fn provide_liquidity(
    ctx: &Context,
    sy: Address,
    token: &Token,
    amount: U256,
    slippage: f64,
) -> Result<(Tx, Address), Error> {
    let market = ctx.dexes.pendle.market(ctx.chain_id, sy).await?;
    let transaction = ctx
        .dexes
        .pendle
        .add_liquidity_single_token(&dto::Query {
            chain_id: ctx.chain_id,
            receiver_addr: ctx.account,
            market_addr: market,
            token_in_addr: token.address,
            amount_token_in: amount,
            sy_token_in_addr: token.address,
            slippage,
        })
        .await?;
    let router = transaction.to;
    let tx = Tx::raw(
        "Provide",
        format!("Liquidity to PT/SY pool of {} on {NAME}", token.symbol),
        router,
        transaction.data,
    )
    .highlight(NAME);
    Ok((tx, router))
}

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
    router: Address,
    amount: U256,
) -> Result<Option<Tx>, Error> {
    let allowance = erc20::allowance(node, token.address, owner, router).await?;
    Ok((allowance < amount).then(|| {
        Tx::call(
            "Approve",
            format!("{} to {NAME}", token.format(amount)),
            token.address,
            &contracts::IERC20::approveCall {
                spender: router,
                amount,
            },
        )
        .highlight(NAME)
    }))
}
