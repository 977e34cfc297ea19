//! Restakes ETH through ether.fi into the Zircuit restaking pool, earning
//! Zircuit, ether.fi loyalty and EigenLayer points at once.

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
            erc20,
            etherfi::{self, EETH, WEETH},
            zircuit,
        },
    },
    alloy::primitives::U256,
    contracts::networks,
};

pub struct ZircuitEtherFi;

#[async_trait::async_trait]
impl Case for ZircuitEtherFi {
    fn metadata(&self) -> Metadata {
        Metadata {
            tags: vec![Tag::Defi, Tag::Eth, Tag::WeEth, Tag::Points, Tag::EtherFi],
            protocols: vec![Protocol::EtherFi, Protocol::Zircuit],
            attributes: vec![Metadata::txn_count("5")],
            inputs: vec![Input::native(
                "ETH Amount",
                "Amount to stake to eETH",
                Validator::decimal(18, U256::ZERO),
            )],
            ..metadata(
                "zircuit_etherfi",
                "Earn Points on Zircuit and EtherFi",
                "Stake ETH to EtherFi and Zircuit to earn Zircuit points, EtherFi loyalty points \
                 and EigenLayer Points",
                Link {
                    title: "Zircuit",
                    url: "https://www.zircuit.com/",
                },
                networks::MAINNET,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        vec![
            etherfi::stake_preview(),
            erc20::approve_preview(&EETH, "weETH"),
            etherfi::wrap_preview(),
            zircuit::approve_preview(&WEETH),
            zircuit::deposit_preview(&WEETH),
        ]
    }

    fn actions(&self) -> Vec<Action> {
        vec![
            Action {
                href: "https://stake.zircuit.com/?ref=BENTOZ",
                text: "Check Points (Zircuit)",
            },
            Action {
                href: "https://app.ether.fi/portfolio",
                text: "Check Portfolio (Etherfi)",
            },
        ]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let node = &*ctx.node;
        let amount = ctx.amount(0, 18)?;
        // Staking keeps one wei of the deposit.
        let eeth = amount.saturating_sub(U256::from(1));

        let (approve_eeth, weeth) = futures::try_join!(
            erc20::approve_if_needed(node, ctx.account, &EETH, WEETH.address, "weETH", eeth),
            etherfi::weeth_for_eeth(node, eeth),
        )?;
        let approve_weeth = zircuit::approve_if_needed(node, ctx.account, &WEETH, weeth).await?;

        let mut txs = vec![etherfi::stake(amount)];
        txs.extend(approve_eeth);
        txs.push(etherfi::wrap(eeth));
        txs.extend(approve_weeth);
        txs.push(zircuit::deposit(&WEETH, weeth, ctx.account));
        Ok(txs)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{infra::blockchain::MockNode, tests},
        alloy::sol_types::{SolCall, SolValue},
        contracts::{IERC20, WeETH, ZircuitRestakingPool, addresses::ethereum},
        number::units::EthUnit,
    };

    fn node(allowance: U256) -> MockNode {
        let mut node = MockNode::new();
        node.expect_call().returning(move |call| {
            let selector: [u8; 4] = call.data[..4].try_into().unwrap();
            Ok(match selector {
                s if s == IERC20::allowanceCall::SELECTOR => allowance.abi_encode(),
                s if s == WeETH::getWeETHByeETHCall::SELECTOR => {
                    let eeth = WeETH::getWeETHByeETHCall::abi_decode(&call.data)
                        .unwrap()
                        .eETHAmount;
                    (eeth * U256::from(96) / U256::from(100)).abi_encode()
                }
                _ => panic!("unexpected call to {}", call.to),
            }
            .into())
        });
        node
    }

    #[tokio::test]
    async fn stakes_wraps_and_restakes() {
        let ctx = tests::context(node(U256::ZERO), &["1"]);
        let txs = ZircuitEtherFi.render(&ctx).await.unwrap();

        let names = txs.iter().map(|tx| tx.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Stake", "Approve", "Wrap", "Approve", "Deposit"]);
        assert_eq!(txs[0].value, 1u64.eth());
        assert_eq!(txs[4].to, ethereum::ZIRCUIT_RESTAKING_POOL);

        let deposit = ZircuitRestakingPool::depositForCall::abi_decode(&txs[4].data).unwrap();
        assert_eq!(deposit.token, WEETH.address);
        assert_eq!(deposit.receiver, tests::ACCOUNT);
        assert_eq!(
            deposit.amount,
            (1u64.eth() - U256::from(1)) * U256::from(96) / U256::from(100)
        );
    }

    #[tokio::test]
    async fn skips_existing_approvals() {
        let ctx = tests::context(node(10u64.eth()), &["1"]);
        let txs = ZircuitEtherFi.render(&ctx).await.unwrap();

        let names = txs.iter().map(|tx| tx.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Stake", "Wrap", "Deposit"]);
    }
}
