//! Splits ETH between GenesisLRT and Lido so that the genETH and wstETH
//! received match the current price of the wstETH/genETH Uniswap pool, and
//! provides both as liquidity around that price.

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
            genesis::{self, GENETH},
            lido::{self, WSTETH},
            uniswap::{self, PoolState},
        },
    },
    alloy::primitives::U256,
    contracts::{addresses::ethereum, networks},
    number::units::{self, format_ether},
};

/// wstETH is token0 of the pool.
const POOL: uniswap::Pool = uniswap::Pool {
    token0: WSTETH,
    token1: GENETH,
    fee: 500,
};

pub struct GenesisLiquidity;

#[async_trait::async_trait]
impl Case for GenesisLiquidity {
    fn metadata(&self) -> Metadata {
        Metadata {
            tags: vec![
                Tag::Official,
                Tag::Benefits,
                Tag::Defi,
                Tag::Restaking,
                Tag::Liquidity,
            ],
            protocols: vec![Protocol::Genesis, Protocol::Lido, Protocol::Uniswap],
            attributes: vec![Metadata::txn_count("7")],
            render_expiry: Some(15),
            inputs: vec![Input::native(
                "ETH Amount (min 0.0000000000000001 ETH)",
                "Amount to deposit",
                Validator::decimal(18, U256::from(100)),
            )],
            ..metadata(
                "genesis_liquidity",
                "🔥 Earn extra 20% GenesisLRT restaking points and get x15 Gems boost",
                "Restake ETH on GenesisLRT and Lido. Plus, provide liquidity on Uniswap to receive \
                 a 15x GenesisLRT Gems boost with One-Click!",
                Link {
                    title: "Genesis",
                    url: "https://www.genesislrt.com/app/defi",
                },
                networks::MAINNET,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        vec![
            genesis::stake_preview(),
            uniswap::approve_preview(&GENETH),
            lido::stake_preview(),
            lido::approve_wrap_preview(),
            lido::wrap_preview(),
            uniswap::approve_preview(&WSTETH),
            uniswap::mint_preview(&WSTETH, &GENETH),
        ]
    }

    fn actions(&self) -> Vec<Action> {
        vec![Action {
            href: "https://www.genesislrt.com/app/dashboard/",
            text: "Check Points (GenesisLRT)",
        }]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let node = &*ctx.node;
        let amount = ctx.amount(0, 18)?;
        let one = units::exp10(18);

        let (pool, geneth_per_eth, wsteth_per_eth) = futures::try_join!(
            PoolState::read(node, ethereum::UNISWAP_V3_WSTETH_GENETH_POOL),
            genesis::convert_to_shares(node, one),
            lido::wsteth_for_steth(node, one),
        )?;
        // The ratio of the two tokens in a position around the current price.
        let position = pool.position(one);
        let split = Split {
            amount0: to_u256(position.amount0)?,
            amount1: to_u256(position.amount1)?,
            geneth_per_eth,
            wsteth_per_eth,
        };
        let eth_for_geneth = split.eth_for_genesis(amount)?;
        let eth_for_steth = amount - eth_for_geneth;
        tracing::debug!(%eth_for_geneth, %eth_for_steth, "split deposit");

        let (geneth, wsteth) = futures::try_join!(
            genesis::convert_to_shares(node, eth_for_geneth),
            lido::wsteth_for_steth(node, eth_for_steth),
        )?;
        let (approve_geneth, approve_wrap, approve_wsteth) = futures::try_join!(
            uniswap::approve_if_needed(
                node,
                ctx.account,
                &GENETH,
                geneth,
                format!(
                    "{} genETH to be added to the {} liquidity pool",
                    format_ether(geneth),
                    uniswap::NAME
                ),
            ),
            lido::approve_wrap_if_needed(node, ctx.account, eth_for_steth),
            uniswap::approve_if_needed(
                node,
                ctx.account,
                &WSTETH,
                wsteth,
                format!(
                    "{} wstETH to be added to the {} liquidity pool",
                    format_ether(wsteth),
                    uniswap::NAME
                ),
            ),
        )?;

        let mut txs = vec![genesis::stake(eth_for_geneth, geneth)];
        txs.extend(approve_geneth);
        txs.push(lido::stake(eth_for_steth));
        txs.extend(approve_wrap);
        txs.push(lido::wrap(eth_for_steth));
        txs.extend(approve_wsteth);
        txs.push(uniswap::mint(
            &POOL,
            (position.tick_lower, position.tick_upper),
            (wsteth, geneth),
            ctx.account,
            ctx.now,
        )?);
        Ok(txs)
    }
}

/// How ETH has to be split between genETH and wstETH so that both are
/// provided in the ratio `amount0 : amount1` of the pool.
struct Split {
    /// wstETH per unit of liquidity.
    amount0: U256,
    /// genETH per unit of liquidity.
    amount1: U256,
    /// genETH minted per ETH staked.
    geneth_per_eth: U256,
    /// wstETH received per stETH wrapped.
    wsteth_per_eth: U256,
}

impl Split {
    /// ETH to stake on Genesis out of `amount`. Solves
    /// `g * geneth_per_eth / amount1 = (amount - g) * wsteth_per_eth / amount0`.
    fn eth_for_genesis(&self, amount: U256) -> Result<U256, Error> {
        let numerator = self
            .amount1
            .checked_mul(amount)
            .and_then(|value| value.checked_mul(self.wsteth_per_eth))
            .ok_or(Error::Overflow)?;
        let denominator = self
            .geneth_per_eth
            .checked_mul(self.amount0)
            .and_then(|value| value.checked_add(self.wsteth_per_eth.checked_mul(self.amount1)?))
            .filter(|value| !value.is_zero())
            .ok_or(Error::Overflow)?;
        Ok(numerator / denominator)
    }
}

fn to_u256(amount: f64) -> Result<U256, Error> {
    U256::try_from(amount.floor()).map_err(|_| Error::Overflow)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{domain::uniswap_v3::sqrt_ratio_at_tick, infra::blockchain::MockNode, tests},
        alloy::sol_types::{SolCall, SolValue},
        contracts::{GenETH, IERC20, NonfungiblePositionManager, UniswapV3Pool, WstETH},
        number::units::EthUnit,
    };

    fn ratio(amount: U256, percent: u64) -> U256 {
        amount * U256::from(percent) / U256::from(100)
    }

    /// A pool at a price of 1 with 1 ETH buying 0.9 genETH or 0.8 wstETH.
    fn node() -> MockNode {
        let mut node = MockNode::new();
        node.expect_call().returning(|call| {
            let selector: [u8; 4] = call.data[..4].try_into().unwrap();
            Ok(match selector {
                s if s == UniswapV3Pool::slot0Call::SELECTOR => (
                    sqrt_ratio_at_tick(0).unwrap(),
                    U256::ZERO,
                    U256::ZERO,
                    U256::ZERO,
                    U256::ZERO,
                    U256::ZERO,
                    U256::from(1),
                )
                    .abi_encode_params(),
                s if s == UniswapV3Pool::tickSpacingCall::SELECTOR => U256::from(10).abi_encode(),
                s if s == GenETH::convertToSharesCall::SELECTOR => {
                    let assets = GenETH::convertToSharesCall::abi_decode(&call.data)
                        .unwrap()
                        .assets;
                    ratio(assets, 90).abi_encode()
                }
                s if s == WstETH::getWstETHByStETHCall::SELECTOR => {
                    let steth = WstETH::getWstETHByStETHCall::abi_decode(&call.data)
                        .unwrap()
                        .stETHAmount;
                    ratio(steth, 80).abi_encode()
                }
                s if s == IERC20::allowanceCall::SELECTOR => U256::ZERO.abi_encode(),
                _ => panic!("unexpected call to {}", call.to),
            }
            .into())
        });
        node
    }

    #[test]
    fn splits_by_token_ratio() {
        let split = Split {
            amount0: 1u64.eth(),
            amount1: 1u64.eth(),
            geneth_per_eth: ratio(1u64.eth(), 90),
            wsteth_per_eth: ratio(1u64.eth(), 80),
        };
        // 0.8 / (0.9 + 0.8) of 1.7 ETH
        assert_eq!(
            split.eth_for_genesis(ratio(1u64.eth(), 170)).unwrap(),
            ratio(1u64.eth(), 80)
        );
    }

    #[tokio::test]
    async fn provides_balanced_liquidity() {
        let ctx = tests::context(node(), &["1.7"]);
        let txs = GenesisLiquidity.render(&ctx).await.unwrap();

        let names = txs.iter().map(|tx| tx.name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            ["Stake", "Approve", "Stake", "Approve", "Wrap", "Approve", "Add"]
        );
        assert_eq!(txs[0].to, ethereum::GENESIS_RESTAKING_POOL);
        assert_eq!(txs[0].value + txs[2].value, ratio(1u64.eth(), 170));

        let params = NonfungiblePositionManager::mintCall::abi_decode(&txs[6].data)
            .unwrap()
            .params;
        assert_eq!(params.token0, WSTETH.address);
        assert_eq!(params.token1, GENETH.address);
        assert_eq!(i32::try_from(params.tickLower).unwrap(), -10);
        assert_eq!(i32::try_from(params.tickUpper).unwrap(), 10);
        assert_eq!(params.recipient, tests::ACCOUNT);
        assert_eq!(params.deadline, U256::from(1_700_000_600u64));

        // Both sides of the position end up with about 0.72 tokens.
        let tolerance = U256::from(1_000_000_000u64);
        for amount in [params.amount0Desired, params.amount1Desired] {
            let expected = ratio(1u64.eth(), 72);
            assert!(amount.abs_diff(expected) < tolerance, "{amount}");
        }
    }
}
