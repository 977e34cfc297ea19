//! The Morpho series: one click deposits into curated MetaMorpho vaults.

use {
    super::metadata,
    crate::{
        domain::{
            Case,
            Context,
            Error,
            PreviewTx,
            Tx,
            case::{Action, Attribute, Input, Link, Metadata, Protocol, Tag},
            validate::Validator,
        },
        protocols::{
            Token,
            erc20::{self, ETH},
            morpho,
        },
    },
    alloy::primitives::{Address, U256},
    contracts::{addresses::ethereum, networks},
};

pub struct Deposit {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    tags: &'static [Tag],
    vault_name: &'static str,
    vault: Address,
    /// Position page of the vault on the Morpho app.
    page: &'static str,
    /// What is deposited. ETH is wrapped by the bundler.
    token: Token,
}

pub fn all() -> Vec<Deposit> {
    vec![
        Deposit {
            id: "morpho_gauntlet_weth_prime",
            name: "Morpho Series - One click to deposit on Gauntlet WETH Prime Vault",
            description: "One Click to earn lending APY + wstETH, $MORPHO rewards by Morpho’s \
                          strategy.",
            tags: &[Tag::Defi, Tag::Lending, Tag::Staking],
            vault_name: "Gauntlet WETH Prime",
            vault: ethereum::MORPHO_GAUNTLET_WETH_PRIME,
            page: "https://app.morpho.org/vault?vault=0x2371e134e3455e0593363cBF89d3b6cf53740618",
            token: ETH,
        },
        Deposit {
            id: "morpho_re7_weth",
            name: "Morpho Series - One click to deposit on Re7 WETH Vault",
            description: "One Click to earn lending APY and USDC, $BRTFLY, $RSR, wstETH, $MORPHO \
                          rewards by Morpho’s strategy.",
            tags: &[Tag::Defi, Tag::Staking, Tag::Restaking, Tag::Lending],
            vault_name: "Re7 WETH",
            vault: ethereum::MORPHO_RE7_WETH,
            page: "https://app.morpho.org/vault?vault=0x78Fc2c2eD1A4cDb5402365934aE5648aDAd094d0",
            token: ETH,
        },
        Deposit {
            id: "morpho_gauntlet_lrt_core",
            name: "Morpho Series - One click to deposit on Gauntlet LRT Core Vault",
            description: "One Click to earn lending APY and USDC, wstETH, $MORPHO rewards by \
                          Morpho’s strategy.",
            tags: &[Tag::Defi, Tag::Lending],
            vault_name: "Gauntlet LRT Core",
            vault: ethereum::MORPHO_GAUNTLET_LRT_CORE,
            page: "https://app.morpho.org/vault?vault=0x4881Ef0BF6d2365D3dd6499ccd7532bcdBCE0658",
            token: ETH,
        },
        Deposit {
            id: "gauntlet_usdt_prime",
            name: "Morpho Series - One click to deposit on Gauntlet USDT Prime Vault",
            description: "One Click to earn lending APY and USDC, $MORPHO rewards by Morpho’s \
                          strategy.",
            tags: &[Tag::Defi, Tag::Lending],
            vault_name: "Gauntlet USDT Prime",
            vault: ethereum::MORPHO_GAUNTLET_USDT_PRIME,
            page: "https://app.morpho.org/vault?vault=0x8CB3649114051cA5119141a34C200D65dc0Faa73",
            token: Token::new(ethereum::USDT, "USDT", 6),
        },
        Deposit {
            id: "gauntlet_dai_core",
            name: "Morpho Series - One click to deposit on Gauntlet DAI Core Vault",
            description: "One Click to earn lending DAI APY by Morpho’s strategy.",
            tags: &[Tag::Defi, Tag::Lending],
            vault_name: "Gauntlet DAI Core",
            vault: ethereum::MORPHO_GAUNTLET_DAI_CORE,
            page: "https://app.morpho.org/vault?vault=0x500331c9fF24D9d11aee6B07734Aa72343EA74a5",
            token: Token::new(ethereum::DAI, "DAI", 18),
        },
        Deposit {
            id: "morpho_leadblock_usdc_rwa",
            name: "Morpho Series - One click to deposit on LeadBlock USDC RWA Vault",
            description: "One Click to earn lending APY and USDC, $MORPHO rewards by Morpho’s \
                          strategy.",
            tags: &[Tag::Defi, Tag::Rwa],
            vault_name: "LeadBlock USDC RWA",
            vault: ethereum::MORPHO_LEADBLOCK_USDC_RWA,
            page: "https://app.morpho.org/vault?vault=0x4cA0E178c94f039d7F202E09d8d1a655Ed3fb6b6",
            token: Token::new(ethereum::USDC, "USDC", 6),
        },
    ]
}

impl Deposit {
    fn is_native(&self) -> bool {
        self.token == ETH
    }
}

#[async_trait::async_trait]
impl Case for Deposit {
    fn metadata(&self) -> Metadata {
        let (input, txn_count) = if self.is_native() {
            (
                Input::native(
                    "ETH Amount",
                    "Amount to stake",
                    Validator::decimal(18, U256::ZERO),
                ),
                "1",
            )
        } else {
            (
                Input::erc20(
                    format!("{} Amount", self.token.symbol),
                    "Amount to stake",
                    self.token.address,
                    Validator::decimal(self.token.decimals, U256::ZERO),
                ),
                "2",
            )
        };
        Metadata {
            tags: self.tags.to_vec(),
            protocols: vec![Protocol::Morpho],
            attributes: vec![
                Metadata::txn_count(txn_count),
                Attribute {
                    id: "vault",
                    name: "Vault",
                    value: self.vault_name,
                },
            ],
            inputs: vec![input],
            ..metadata(
                self.id,
                self.name,
                self.description,
                Link {
                    title: "Morpho Labs",
                    url: "https://twitter.com/MorphoLabs",
                },
                networks::MAINNET,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        let deposit = morpho::deposit_preview(&self.token, self.vault_name);
        if self.is_native() {
            vec![deposit]
        } else {
            vec![
                erc20::transfer_preview(&self.token, ethereum::MORPHO_BUNDLER),
                deposit,
            ]
        }
    }

    fn actions(&self) -> Vec<Action> {
        vec![Action {
            href: self.page,
            text: "Manage Position (Morpho)",
        }]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let node = &*ctx.node;
        let amount = ctx.amount(0, self.token.decimals)?;
        if self.is_native() {
            let tx =
                morpho::deposit_eth(node, self.vault, self.vault_name, amount, ctx.account).await?;
            Ok(vec![tx])
        } else {
            morpho::deposit_erc20(
                node,
                &self.token,
                self.vault,
                self.vault_name,
                amount,
                ctx.account,
            )
            .await
        }
    }
}
