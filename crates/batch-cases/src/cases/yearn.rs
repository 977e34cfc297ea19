//! Yield farming on Polygon Yearn V3 vaults.

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
        protocols::{Token, yearn::Vault},
    },
    alloy::primitives::U256,
    contracts::{addresses::polygon, networks},
};

pub struct Farm {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    vault: Vault,
    /// Withdraw page of the vault on the Yearn app.
    page: &'static str,
}

pub fn all() -> Vec<Farm> {
    vec![
        Farm {
            id: "yearn_v3_dai_a",
            name: "Yield farming on Yearn with DAI-A",
            description: "Deposit DAI to Yearn finance’s V3 Vault. Auto compound and yeild high \
                          APY% with DAI",
            vault: Vault {
                name: "DAI-A",
                shares: "yvDAI-A",
                address: polygon::YEARN_V3_DAI_A,
                asset: Token::new(polygon::DAI, "DAI", 18),
            },
            page: "https://yearn.fi/v3/137/0x90b2f54C6aDDAD41b8f6c4fCCd555197BC0F773B?action=withdraw",
        },
        Farm {
            id: "yearn_v3_weth",
            name: "Yield farming on Yearn with WETH",
            description: "Deposit WETH to Yearn finance’s V3 Vault. Auto compound and yeild high \
                          APY% with WETH.",
            vault: Vault {
                name: "WETH-A",
                shares: "yvWETH-A",
                address: polygon::YEARN_V3_WETH,
                asset: Token::new(polygon::WETH, "WETH", 18),
            },
            page: "https://yearn.fi/v3/137/0x305F25377d0a39091e99B975558b1bdfC3975654?action=withdraw",
        },
        Farm {
            id: "yearn_v3_usdce",
            name: "Yield farming on Yearn with USDC.e",
            description: "Deposit USDC.e to Yearn finance’s V3 Vault. Auto compound and yeild \
                          high APY% with USDC.e",
            vault: Vault {
                name: "USDC.e-A",
                shares: "yvUSDC-A",
                address: polygon::YEARN_V3_USDC_E,
                asset: Token::new(polygon::USDC_E, "USDC.e", 6),
            },
            page: "https://yearn.fi/v3/137/0xA013Fbd4b711f9ded6fB09C1c0d358E2FbC2EAA0?action=withdraw",
        },
        Farm {
            id: "yearn_v3_usdt_a",
            name: "Yield farming on Yearn with USDT",
            description: "Deposit USDT to Yearn finance’s V3 Vault. Auto compound and yeild high \
                          APY% with USDT.",
            vault: Vault {
                name: "USDT-A",
                shares: "yvUSDT-A",
                address: polygon::YEARN_V3_USDT,
                asset: Token::new(polygon::USDT, "USDT", 6),
            },
            page: "https://yearn.fi/v3/137/0xBb287E6017d3DEb0e2E65061e8684eab21060123?action=withdraw",
        },
    ]
}

#[async_trait::async_trait]
impl Case for Farm {
    fn metadata(&self) -> Metadata {
        let asset = self.vault.asset;
        Metadata {
            tags: vec![Tag::Defi, Tag::Yield],
            protocols: vec![Protocol::Yearn],
            attributes: vec![Metadata::txn_count("2")],
            inputs: vec![Input::erc20(
                "Amount",
                "Amount to invest",
                asset.address,
                Validator::decimal(asset.decimals, U256::ZERO),
            )],
            ..metadata(
                self.id,
                self.name,
                self.description,
                Link {
                    title: "Yearn.Fi",
                    url: "https://yearn.fi",
                },
                networks::POLYGON,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        vec![self.vault.approve_preview(), self.vault.deposit_preview()]
    }

    fn actions(&self) -> Vec<Action> {
        vec![Action {
            href: self.page,
            text: "Manage Assets (Yearn)",
        }]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let amount = ctx.amount(0, self.vault.asset.decimals)?;
        Ok(vec![
            self.vault.approve(amount),
            self.vault.deposit(amount, ctx.account),
        ])
    }
}

/// Redeems shares of any of the farmed vaults. Every amount is optional but
/// at least one has to be given.
pub struct Withdrawal;

impl Withdrawal {
    fn vaults() -> impl Iterator<Item = Vault> {
        all().into_iter().map(|farm| farm.vault)
    }
}

#[async_trait::async_trait]
impl Case for Withdrawal {
    fn metadata(&self) -> Metadata {
        Metadata {
            tags: vec![Tag::Defi, Tag::Yield],
            protocols: vec![Protocol::Yearn],
            attributes: vec![Metadata::txn_count("1 ~ 4")],
            inputs: Self::vaults()
                .map(|vault| Input {
                    is_optional: true,
                    ..Input::erc20(
                        format!("{} Amount (optional)", vault.shares),
                        "Amount to withdraw",
                        vault.address,
                        Validator::decimal(vault.asset.decimals, U256::ZERO),
                    )
                })
                .collect(),
            ..metadata(
                "yearn_withdrawal",
                "Reverse Batch - Withdraw Yearn Fund",
                "One click to withdraw fund from Yearn V3 vault",
                Link {
                    title: "Yearn",
                    url: "https://yearn.fi/v3",
                },
                networks::POLYGON,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        Self::vaults().map(|vault| vault.withdraw_preview()).collect()
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let node = &*ctx.node;
        let mut txs = Vec::new();
        for (index, vault) in Self::vaults().enumerate() {
            if ctx.inputs.get(index).and_then(Option::as_deref).is_none() {
                continue;
            }
            let shares = ctx.amount(index, vault.asset.decimals)?;
            if shares.is_zero() {
                continue;
            }
            let price_per_share = vault.price_per_share(node).await?;
            let assets = vault.assets_for(shares, price_per_share)?;
            tracing::debug!(vault = vault.name, %shares, %assets, "withdrawing");
            txs.push(vault.withdraw(shares, assets, ctx.account));
        }
        if txs.is_empty() {
            return Err(Error::Invalid("Please enter at least one field".to_owned()));
        }
        Ok(txs)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{infra::blockchain::MockNode, tests},
        alloy::sol_types::{SolCall, SolValue},
        contracts::{IERC20, YearnVault},
    };

    fn case(id: &str) -> Farm {
        all().into_iter().find(|case| case.id == id).unwrap()
    }

    #[tokio::test]
    async fn approves_and_deposits() {
        let case = case("yearn_v3_usdce");
        let ctx = tests::context(MockNode::new(), &["12.5"]);
        let txs = case.render(&ctx).await.unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].to, polygon::USDC_E);
        assert_eq!(
            txs[0].description,
            "USDC.e-A vault to spend 12.5 USDC.e on Yearn V3"
        );
        let approve = IERC20::approveCall::abi_decode(&txs[0].data).unwrap();
        assert_eq!(approve.spender, polygon::YEARN_V3_USDC_E);
        assert_eq!(approve.amount, U256::from(12_500_000));

        assert_eq!(txs[1].to, polygon::YEARN_V3_USDC_E);
        let deposit = YearnVault::depositCall::abi_decode(&txs[1].data).unwrap();
        assert_eq!(deposit.assets, U256::from(12_500_000));
        assert_eq!(deposit.receiver, tests::ACCOUNT);
    }

    #[test]
    fn vault_pages_point_at_the_vault() {
        for case in all() {
            assert!(
                case.page
                    .to_lowercase()
                    .contains(&case.vault.address.to_string().to_lowercase()),
                "{}",
                case.id
            );
            assert_eq!(case.metadata().network_id, networks::POLYGON);
        }
    }

    fn withdrawal_node() -> MockNode {
        let mut node = MockNode::new();
        node.expect_call().returning(|call| {
            assert_eq!(&call.data[..4], YearnVault::pricePerShareCall::SELECTOR);
            let price_per_share = if call.to == polygon::YEARN_V3_USDC_E {
                U256::from(1_100_000)
            } else {
                U256::from(10).pow(U256::from(18))
            };
            Ok(price_per_share.abi_encode().into())
        });
        node
    }

    #[tokio::test]
    async fn withdraws_only_given_amounts() {
        let mut ctx = tests::context(withdrawal_node(), &["", "", "10", "0"]);
        ctx.inputs[0] = None;
        ctx.inputs[1] = None;
        let txs = Withdrawal.render(&ctx).await.unwrap();

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].name, "Withdraw");
        assert_eq!(txs[0].to, polygon::YEARN_V3_USDC_E);
        assert_eq!(txs[0].description, "10 yvUSDC-A to 11 USDC.e from Yearn");
        let redeem = YearnVault::redeemCall::abi_decode(&txs[0].data).unwrap();
        assert_eq!(redeem.shares, U256::from(10_000_000));
        assert_eq!(redeem.owner, tests::ACCOUNT);
        assert_eq!(redeem.receiver, tests::ACCOUNT);
    }

    #[tokio::test]
    async fn requires_one_amount() {
        let mut ctx = tests::context(MockNode::new(), &["0"]);
        ctx.inputs.extend([None, None, None]);
        let err = Withdrawal.render(&ctx).await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter at least one field");
    }

    #[test]
    fn withdrawal_inputs_are_optional_shares() {
        let metadata = Withdrawal.metadata();
        let names = metadata
            .inputs
            .iter()
            .map(|input| &*input.name)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "yvDAI-A Amount (optional)",
                "yvWETH-A Amount (optional)",
                "yvUSDC-A Amount (optional)",
                "yvUSDT-A Amount (optional)",
            ]
        );
        assert!(metadata.inputs.iter().all(|input| input.is_optional));
        assert_eq!(metadata.inputs[2].token, Some(polygon::YEARN_V3_USDC_E));
        assert_eq!(Withdrawal.preview().len(), 4);
    }
}
