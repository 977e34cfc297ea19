//! Pendle cases on Arbitrum.

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
            validate::Validator,
        },
        protocols::{
            Token,
            erc20::ETH,
            oneinch,
            pendle::{self, Trade},
        },
    },
    alloy::primitives::U256,
    contracts::{addresses::arbitrum, networks},
};

const WEBSITE: Link = Link {
    title: "Pendle",
    url: "https://app.pendle.finance/points",
};

const USDE: Token = Token::new(arbitrum::USDE, "USDe", 18);

/// Slippage accepted when zapping into the USDe market.
const USDE_SLIPPAGE: f64 = 0.002;

/// Swaps ETH to USDe and provides it as liquidity on Pendle.
pub struct Usde;

#[async_trait::async_trait]
impl Case for Usde {
    fn metadata(&self) -> Metadata {
        Metadata {
            tags: vec![Tag::Defi, Tag::Restaking],
            protocols: vec![Protocol::OneInch, Protocol::Pendle],
            attributes: vec![Metadata::txn_count("3")],
            render_expiry: Some(15),
            inputs: vec![Input {
                action_buttons: vec![],
                ..Input::native(
                    "ETH Amount",
                    "Amount to purchase USDe and buy LP on Pendle",
                    Validator::decimal(18, U256::ZERO),
                )
            }],
            ..metadata(
                "pendle_usde",
                "Earn up to 30% LP APY and Ethena sats on Pendle",
                "One Click to swap ETH to USDe and provide LP on Pendle to earn high APY and \
                 Ethena sats.",
                WEBSITE,
                networks::ARBITRUM_ONE,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        vec![
            oneinch::swap_preview(&ETH, &USDE),
            pendle::approve_preview(&USDE),
            pendle::provide_liquidity_preview(),
        ]
    }

    fn actions(&self) -> Vec<Action> {
        vec![
            Action {
                href: "https://app.ethena.fi/join",
                text: "Sats Campaign (Ethena)",
            },
            Action {
                href: "https://app.pendle.finance/trade/dashboard/overview?timeframe=allTime",
                text: "Manage Position (Pendle)",
            },
        ]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let amount = ctx.amount(0, ETH.decimals)?;
        let (swap, usde) = oneinch::swap(ctx, &ETH, amount, &USDE).await?;
        let (provide, router) =
            pendle::provide_liquidity(ctx, arbitrum::PENDLE_SY_USDE, &USDE, usde, USDE_SLIPPAGE)
                .await?;
        let approve =
            pendle::approve_if_needed(&*ctx.node, ctx.account, &USDE, router, usde).await?;

        Ok([swap].into_iter().chain(approve).chain([provide]).collect())
    }
}

/// The yield tokens bought by [`Points`], one per input.
const TRADES: [Trade; 2] = [
    Trade {
        sy: arbitrum::PENDLE_SY_RSETH,
        underlying: Token::new(arbitrum::RSETH, "rsETH", 18),
        output_name: "YT rsETH",
        slippage: 0.005,
    },
    Trade {
        sy: arbitrum::PENDLE_SY_EZETH,
        underlying: Token::new(arbitrum::EZETH, "ezETH", 18),
        output_name: "YT ezETH",
        slippage: 0.005,
    },
];

/// Buys YT rsETH and YT ezETH to farm Kelp, Renzo and EigenLayer points.
pub struct Points;

#[async_trait::async_trait]
impl Case for Points {
    fn metadata(&self) -> Metadata {
        Metadata {
            tags: vec![Tag::Defi, Tag::Staking, Tag::Restaking],
            protocols: vec![Protocol::Pendle],
            attributes: vec![Metadata::txn_count("2")],
            inputs: vec![
                Input::native(
                    "ETH Amount",
                    "Amount to purchase YT rsETH",
                    Validator::decimal(18, U256::ZERO),
                ),
                Input::native(
                    "ETH Amount",
                    "Amount to purchase YT ezETH",
                    Validator::decimal(18, U256::ZERO),
                ),
            ],
            ..metadata(
                "pendle_points",
                "Earn Kelp Miles + Renzo ezPoints + EigenLayer Points with ETH",
                "Swap ETH to YT ezETH and YT rsETH on Pendle with one click to earn multiple \
                 points.",
                WEBSITE,
                networks::ARBITRUM_ONE,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        TRADES
            .iter()
            .map(|trade| pendle::swap_preview(&ETH, trade.output_name, trade.underlying.address))
            .collect()
    }

    fn actions(&self) -> Vec<Action> {
        vec![Action {
            href: "https://app.pendle.finance/trade/pools/0x4f43c77872db6ba177c270986cd30c3381af37ee/zap/in?chain=ethereum&isFromDashboard=true",
            text: "Check Assets (Pendle)",
        }]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let mut txs = Vec::with_capacity(TRADES.len());
        for (index, trade) in TRADES.iter().enumerate() {
            let amount = ctx.amount(index, ETH.decimals)?;
            txs.push(pendle::buy_yt_with_eth(ctx, trade, amount).await?);
        }
        Ok(txs)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            infra::blockchain::MockNode,
            tests::{
                self,
                mock::http::{self, Expectation, Path},
            },
        },
        alloy::{
            primitives::{Address, address},
            sol_types::{SolCall, SolValue},
        },
        contracts::IERC20,
        serde_json::json,
    };

    const MARKET: Address = address!("2dfaf9a5e4f293bceede49f2dba29aacdd88e0c4");

    fn market() -> Expectation {
        Expectation::Get {
            path: Path::prefix("pendle/core/v1/42161/markets?select=all&is_expired=false&sy="),
            res: json!({ "results": [{ "address": MARKET }] }),
        }
    }

    #[tokio::test]
    async fn swaps_to_usde_and_provides_liquidity() {
        let api = http::setup(vec![
            Expectation::Get {
                path: Path::prefix("oneinch/42161/swap?"),
                res: json!({
                    "dstAmount": "3500000000000000000000",
                    "tx": {
                        "to": contracts::addresses::oneinch::ROUTER_V6,
                        "data": "0x07ed2379",
                        "value": "1000000000000000000",
                    }
                }),
            },
            market(),
            Expectation::Get {
                path: Path::prefix("pendle/sdk/api/v1/syTokenInOut?chainId=42161"),
                res: json!({ "outputTokens": [arbitrum::USDE] }),
            },
            Expectation::Get {
                path: Path::prefix("pendle/sdk/api/v1/addLiquiditySingleToken?"),
                res: json!({
                    "transaction": { "to": arbitrum::PENDLE_ROUTER, "data": "0x12599ac6" }
                }),
            },
        ])
        .await;
        let mut node = MockNode::new();
        node.expect_call().returning(|call| {
            assert!(call.data.starts_with(&IERC20::allowanceCall::SELECTOR));
            Ok(U256::ZERO.abi_encode().into())
        });
        let mut ctx = tests::context_with_api(node, api, &["1"]);
        ctx.chain_id = networks::ARBITRUM_ONE;

        let txs = Usde.render(&ctx).await.unwrap();
        let names = txs.iter().map(|tx| tx.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Swap", "Approve", "Provide"]);
        assert_eq!(txs[0].value, U256::from(10).pow(U256::from(18)));
        assert_eq!(txs[0].description, "1 ETH to 3500 USDe at 1inch");

        let approve = IERC20::approveCall::abi_decode(&txs[1].data).unwrap();
        assert_eq!(approve.spender, arbitrum::PENDLE_ROUTER);
        assert_eq!(approve.amount, U256::from(3_500) * U256::from(10).pow(U256::from(18)));
        assert_eq!(txs[1].description, "3500 USDe to Pendle");
        assert_eq!(txs[2].to, arbitrum::PENDLE_ROUTER);
    }

    #[tokio::test]
    async fn buys_both_yield_tokens() {
        let swap = |amount: &str| Expectation::Get {
            path: Path::prefix("pendle/sdk/api/v1/swapExactTokenForYt?"),
            res: json!({
                "transaction": { "to": arbitrum::PENDLE_ROUTER, "data": "0xed48907e" },
                "data": { "amountYtOut": amount }
            }),
        };
        let api = http::setup(vec![
            market(),
            swap("20000000000000000000"),
            market(),
            swap("7500000000000000000"),
        ])
        .await;
        let mut ctx = tests::context_with_api(MockNode::new(), api, &["0.5", "0.25"]);
        ctx.chain_id = networks::ARBITRUM_ONE;

        let txs = Points.render(&ctx).await.unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].value, U256::from(500_000_000_000_000_000u64));
        assert_eq!(txs[0].description, "0.5 ETH to 20 YT rsETH on Pendle");
        assert_eq!(txs[1].value, U256::from(250_000_000_000_000_000u64));
        assert_eq!(txs[1].description, "0.25 ETH to 7.5 YT ezETH on Pendle");
    }
}
