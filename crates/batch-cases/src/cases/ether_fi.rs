//! ether.fi restaking: ETH is staked for eETH and wrapped into weETH, which
//! is then put to work in the Liquid vault or bridged to Arbitrum.

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
            arbitrum,
            erc20,
            etherfi::{self, WEETH},
        },
    },
    alloy::primitives::U256,
    contracts::networks,
};

/// Stakes ETH and deposits the weETH into the ether.fi Liquid vault.
pub struct Liquid;

#[async_trait::async_trait]
impl Case for Liquid {
    fn metadata(&self) -> Metadata {
        Metadata {
            tags: vec![Tag::Benefits, Tag::Defi, Tag::Restaking],
            protocols: vec![Protocol::EtherFi],
            attributes: vec![Metadata::txn_count("5")],
            render_expiry: Some(15),
            inputs: vec![Input::native(
                "ETH Amount",
                "Amount to stake",
                Validator::decimal(18, U256::ZERO),
            )],
            ..metadata(
                "ether_fi_liquid",
                "Earn auto-compounded yields plus Etherfi loyalty points and EigenLayer points \
                 with ETH",
                "One Click to stake ETH and do liquid yield on Etherfi.",
                Link {
                    title: "Ether.fi Liquid Vault",
                    url: "https://app.ether.fi/liquid/eth",
                },
                networks::MAINNET,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        let mut preview = etherfi::stake_and_wrap_preview();
        preview.extend(etherfi::liquid_vault_preview());
        preview
    }

    fn actions(&self) -> Vec<Action> {
        vec![Action {
            href: "https://app.ether.fi/liquid/eth",
            text: "Check Portfolio (Ether.fi)",
        }]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let node = &*ctx.node;
        let amount = ctx.amount(0, 18)?;
        let (mut txs, weeth) = futures::try_join!(
            etherfi::stake_and_wrap(node, ctx.account, amount),
            etherfi::estimate_weeth(node, ctx.account, amount),
        )?;
        txs.extend(etherfi::liquid_vault_deposit(weeth, ctx.account));
        Ok(txs)
    }
}

/// Stakes ETH for weETH and bridges it to an address on Arbitrum One.
pub struct ArbitrumBridge;

#[async_trait::async_trait]
impl Case for ArbitrumBridge {
    fn metadata(&self) -> Metadata {
        Metadata {
            tags: vec![
                Tag::Official,
                Tag::Benefits,
                Tag::Defi,
                Tag::Restaking,
                Tag::Bridge,
            ],
            protocols: vec![Protocol::EtherFi, Protocol::Arbitrum],
            attributes: vec![Metadata::txn_count("5")],
            render_expiry: Some(15),
            inputs: vec![
                Input::native(
                    "ETH Amount",
                    "Amount to stake and bridge (leave ~0.001 ETH for bridging fee)",
                    Validator::decimal(18, U256::ZERO),
                ),
                Input::address(
                    "Target Address",
                    "Target address on Arbitrum (make sure your arbitrum address is consistent \
                     with \"My Address\" on Ethereum)",
                ),
            ],
            ..metadata(
                "ether_fi_arbitrum_bridge",
                "🔥 Earn extra Ether.Fi points and Bridge",
                "With official collaboration with Ether.fi. We can earn extra Ether.fi Loyalty \
                 Points by staking ETH. The Batch also help user to bridge $weETH to Arbitrum for \
                 further usage.",
                Link {
                    title: "Ether.fi",
                    url: "https://ether.fi",
                },
                networks::MAINNET,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        let mut preview = etherfi::stake_and_wrap_preview();
        preview.push(erc20::approve_preview(&WEETH, "ether.fi"));
        preview.push(arbitrum::bridge_preview(&WEETH));
        preview
    }

    fn actions(&self) -> Vec<Action> {
        vec![Action {
            href: "https://app.ether.fi/portfolio",
            text: "Check Portfolio (Etherfi)",
        }]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let node = &*ctx.node;
        let amount = ctx.amount(0, 18)?;
        let to = ctx.address(1)?;

        let (mut txs, weeth) = futures::try_join!(
            etherfi::stake_and_wrap(node, ctx.account, amount),
            etherfi::estimate_weeth(node, ctx.account, amount),
        )?;
        txs.push(arbitrum::approve_gateway(&WEETH, weeth, "ether.fi"));
        txs.push(arbitrum::bridge(node, &WEETH, to, weeth).await?);
        Ok(txs)
    }
}
