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
        protocols::{Token, erc20, gamma, oneinch, yearn},
    },
    alloy::primitives::U256,
    contracts::{addresses::polygon, networks},
    number::{
        u256_ext::{Rounding, U256Ext},
        units::exp10,
    },
};

const WETH: Token = Token::new(polygon::WETH, "WETH", 18);
const USDCE: Token = Token::new(polygon::USDC_E, "USDC.e", 6);
const LP_SYMBOL: &str = "aUSDC-WETH";
const ROUTER_NAME: &str = "1inch router";
const YEARN_VAULT_NAME: &str = "Yearn v3";

/// Extra WETH sold on top of the quoted price, so the swap buys enough
/// USDC.e even if the price moves.
const SWAP_BUFFER: f64 = 0.005;

/// Swaps part of a WETH deposit to USDC.e, provides both as liquidity on the
/// Gamma USDC.e/WETH hypervisor and compounds the LP shares in Yearn V3.
pub struct GammaYearn;

#[async_trait::async_trait]
impl Case for GammaYearn {
    fn metadata(&self) -> Metadata {
        Metadata {
            tags: vec![Tag::Defi, Tag::Lending, Tag::Liquidity],
            protocols: vec![Protocol::Gamma, Protocol::Yearn],
            attributes: vec![Metadata::txn_count("7")],
            render_expiry: Some(15),
            inputs: vec![Input::erc20(
                "WETH Amount",
                "Amount to invest",
                WETH.address,
                Validator::decimal(18, exp10(16) * U256::from(2)),
            )],
            ..metadata(
                "gamma_yearn",
                "Yield Farming on Yearn with Gamma USDC.e/WETH LP",
                "One Click to provide USDC.e/WETH LP on Gamma and reinvest it on Yearn V3 vaults.",
                Link {
                    title: "Gamma",
                    url: "https://twitter.com/GammaStrategies",
                },
                networks::POLYGON,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        let lp = Token::new(polygon::GAMMA_USDC_WETH_HYPERVISOR, LP_SYMBOL, 18);
        vec![
            erc20::approve_preview(&WETH, ROUTER_NAME),
            oneinch::swap_preview(&WETH, &USDCE),
            gamma::approve_preview(&USDCE),
            gamma::approve_preview(&WETH),
            gamma::deposit_preview(polygon::GAMMA_UNI_PROXY, &USDCE, &WETH),
            erc20::approve_preview(&lp, YEARN_VAULT_NAME),
            yearn::deposit_preview(LP_SYMBOL, polygon::YEARN_V3_GAMMA_USDC_WETH_COMPOUNDER),
        ]
    }

    fn actions(&self) -> Vec<Action> {
        vec![Action {
            href: "https://yearn.fi/v3/137/0x54303F18161d9870b0fc66B88B0B129e8e5fF505?action=withdraw",
            text: "Manage Position (Yearn V3)",
        }]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let node = &*ctx.node;
        let (proxy, hypervisor) = (polygon::GAMMA_UNI_PROXY, polygon::GAMMA_USDC_WETH_HYPERVISOR);
        let amount = ctx.amount(0, WETH.decimals)?;

        // Split the WETH so that the swapped part buys the USDC.e the
        // hypervisor wants next to the rest.
        let trial = gamma::deposit_amount(node, proxy, hypervisor, WETH.address, amount).await?;
        let src_amount = oneinch::src_amount(ctx, &WETH, trial, &USDCE, SWAP_BUFFER).await?;
        let invest = amount
            .checked_add(src_amount)
            .and_then(|total| amount.checked_mul_div(amount, total, Rounding::Floor))
            .ok_or(Error::Overflow)?;
        let (swap, usdce_amount) = oneinch::swap(ctx, &WETH, amount - invest, &USDCE).await?;

        let usdce_needed =
            gamma::deposit_amount(node, proxy, hypervisor, WETH.address, invest).await?;
        if usdce_needed > usdce_amount {
            return Err(Error::Invalid(format!(
                "{} is not enough, please try again.",
                USDCE.symbol
            )));
        }

        let (approve_router, approve_usdce, approve_weth, deposit) = futures::try_join!(
            erc20::approve_if_needed(node, ctx.account, &WETH, swap.to, ROUTER_NAME, amount),
            gamma::approve_if_needed(node, ctx.account, &USDCE, hypervisor, usdce_needed),
            gamma::approve_if_needed(node, ctx.account, &WETH, hypervisor, invest),
            gamma::deposit(
                node,
                proxy,
                hypervisor,
                ctx.account,
                (&USDCE, usdce_needed),
                (&WETH, invest),
            ),
        )?;

        let lp = Token::new(hypervisor, LP_SYMBOL, deposit.shares_decimals);
        let compounder = polygon::YEARN_V3_GAMMA_USDC_WETH_COMPOUNDER;
        let (approve_lp, compound) = futures::try_join!(
            erc20::approve_if_needed(
                node,
                ctx.account,
                &lp,
                compounder,
                YEARN_VAULT_NAME,
                deposit.safe_shares,
            ),
            yearn::deposit(
                node,
                LP_SYMBOL,
                compounder,
                deposit.safe_shares,
                ctx.account,
            ),
        )?;

        Ok(approve_router
            .into_iter()
            .chain([swap])
            .chain(approve_usdce)
            .chain(approve_weth)
            .chain([deposit.tx])
            .chain(approve_lp)
            .chain([compound])
            .collect())
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
        alloy::sol_types::{SolCall, SolValue},
        contracts::{GammaHypervisor, GammaUniProxy, IERC20, YearnVault, addresses},
        serde_json::json,
    };

    /// A hypervisor at tick 0 that wants 3000 USDC.e per WETH.
    fn node() -> MockNode {
        let mut node = MockNode::new();
        node.expect_call().returning(|call| {
            let selector: [u8; 4] = call.data[..4].try_into().unwrap();
            Ok(match selector {
                s if s == GammaUniProxy::getDepositAmountCall::SELECTOR => {
                    let weth = GammaUniProxy::getDepositAmountCall::abi_decode(&call.data)
                        .unwrap()
                        .deposit;
                    let usdce = weth * U256::from(3_000) / exp10(12);
                    (usdce, usdce).abi_encode_params()
                }
                s if s == GammaHypervisor::token0Call::SELECTOR => polygon::USDC_E.abi_encode(),
                s if s == GammaHypervisor::token1Call::SELECTOR => polygon::WETH.abi_encode(),
                s if s == GammaHypervisor::currentTickCall::SELECTOR => U256::ZERO.abi_encode(),
                s if s == GammaHypervisor::PRECISIONCall::SELECTOR => exp10(36).abi_encode(),
                s if s == GammaHypervisor::getTotalAmountsCall::SELECTOR => {
                    (U256::ZERO, U256::ZERO).abi_encode_params()
                }
                s if s == GammaHypervisor::totalSupplyCall::SELECTOR => U256::ZERO.abi_encode(),
                s if s == IERC20::decimalsCall::SELECTOR => U256::from(18).abi_encode(),
                s if s == IERC20::allowanceCall::SELECTOR => U256::ZERO.abi_encode(),
                _ => panic!("unexpected call {call:?}"),
            }
            .into())
        });
        node
    }

    fn swap(dst_amount: &str) -> Expectation {
        Expectation::Get {
            path: Path::prefix("oneinch/1/swap?"),
            res: json!({
                "dstAmount": dst_amount,
                "tx": {
                    "to": addresses::oneinch::ROUTER_V6,
                    "data": "0x07ed2379",
                    "value": "0",
                }
            }),
        }
    }

    fn quotes() -> Vec<Expectation> {
        vec![
            Expectation::Get {
                path: Path::prefix("oneinch/1/quote?"),
                res: json!({ "dstAmount": "3000000000" }),
            },
            Expectation::Get {
                path: Path::prefix("oneinch/1/quote?"),
                res: json!({ "dstAmount": "3015000000" }),
            },
        ]
    }

    #[tokio::test]
    async fn provides_liquidity_and_compounds() {
        let mut expectations = quotes();
        expectations.push(swap("1600000000"));
        let api = http::setup(expectations).await;
        let ctx = tests::context_with_api(node(), api, &["1"]);

        let txs = GammaYearn.render(&ctx).await.unwrap();
        let names = txs.iter().map(|tx| tx.name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            ["Approve", "Swap", "Approve", "Approve", "Deposit", "Approve", "Deposit"]
        );

        let approve = IERC20::approveCall::abi_decode(&txs[0].data).unwrap();
        assert_eq!(approve.spender, addresses::oneinch::ROUTER_V6);
        assert_eq!(approve.amount, exp10(18));

        // Roughly half of the WETH is swapped.
        let deposit = GammaUniProxy::depositCall::abi_decode(&txs[4].data).unwrap();
        assert!(deposit.deposit1 > exp10(17) * U256::from(4));
        assert!(deposit.deposit1 < exp10(17) * U256::from(5));
        assert_eq!(
            deposit.deposit0,
            deposit.deposit1 * U256::from(3_000) / exp10(12)
        );
        assert_eq!(deposit.to, tests::ACCOUNT);
        assert_eq!(deposit.pos, polygon::GAMMA_USDC_WETH_HYPERVISOR);

        let approve = IERC20::approveCall::abi_decode(&txs[5].data).unwrap();
        assert_eq!(txs[5].to, polygon::GAMMA_USDC_WETH_HYPERVISOR);
        assert_eq!(
            approve.spender,
            polygon::YEARN_V3_GAMMA_USDC_WETH_COMPOUNDER
        );
        let compound = YearnVault::depositCall::abi_decode(&txs[6].data).unwrap();
        assert_eq!(compound.assets, approve.amount);
        assert!(compound.assets < deposit.deposit0 + deposit.deposit1);
        assert!(txs[6].description.ends_with("aUSDC-WETH to vault on Yearn V3"));
    }

    #[tokio::test]
    async fn rejects_a_short_swap() {
        let mut expectations = quotes();
        expectations.push(swap("1000000"));
        let api = http::setup(expectations).await;
        let ctx = tests::context_with_api(node(), api, &["1"]);

        let err = GammaYearn.render(&ctx).await.unwrap_err();
        assert_eq!(err.to_string(), "USDC.e is not enough, please try again.");
    }
}
