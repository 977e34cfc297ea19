//! Supplies a stablecoin to AAVE and borrows ETH against it.

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
        protocols::{Token, aave},
    },
    alloy::primitives::{Address, U256},
    contracts::{addresses::ethereum, networks},
};

/// Highest share of the collateral value that may be borrowed, in percent.
const MAX_BORROW_PERCENTAGE: u64 = 70;

pub struct BorrowEth {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    amount_name: &'static str,
    percentage_description: &'static str,
    token: Token,
    /// Chainlink USD feed of the collateral.
    price_feed: Address,
}

impl BorrowEth {
    pub fn usdc() -> Self {
        Self {
            id: "aave_usdc_eth",
            name: "Deposit USDC to borrow ETH on AAVE",
            description: "One click to deposit USDC and borrow 70% equivalent value in ETH.",
            amount_name: "USDC Amount",
            percentage_description: "Percentage of the supplied USDC to be borrowed as ETH (Max: \
                                     70%)",
            token: Token::new(ethereum::USDC, "USDC", 6),
            price_feed: ethereum::CHAINLINK_USDC_USD,
        }
    }

    pub fn usdt() -> Self {
        Self {
            id: "aave_usdt_eth",
            name: "Deposit USDT to borrow ETH on AAVE",
            description: "One click to deposit USDT and borrow 70% equivalent value in ETH.",
            amount_name: "USDT Amount",
            percentage_description: "Percentage of the supplied USDT to be borrowed as ETH (Max: \
                                     70%)",
            token: Token::new(ethereum::USDT, "USDT", 6),
            price_feed: ethereum::CHAINLINK_USDT_USD,
        }
    }

    /// ETH worth `percentage`% of `amount` collateral. Both prices are USD
    /// prices with the same decimals.
    fn borrow_amount(
        &self,
        amount: U256,
        percentage: U256,
        token_price: U256,
        eth_price: U256,
    ) -> Result<U256, Error> {
        let numerator = amount
            .checked_mul(token_price)
            .and_then(|value| value.checked_mul(percentage))
            .and_then(|value| value.checked_mul(U256::from(10).pow(U256::from(18))))
            .ok_or(Error::Overflow)?;
        let denominator = U256::from(10)
            .pow(U256::from(self.token.decimals))
            .checked_mul(U256::from(100))
            .and_then(|value| value.checked_mul(eth_price))
            .ok_or(Error::Overflow)?;
        Ok(numerator / denominator)
    }
}

#[async_trait::async_trait]
impl Case for BorrowEth {
    fn metadata(&self) -> Metadata {
        Metadata {
            tags: vec![Tag::Defi, Tag::Lending],
            protocols: vec![Protocol::Aave],
            inputs: vec![
                Input::erc20(
                    self.amount_name,
                    "Supply to AAVE as collateral",
                    self.token.address,
                    Validator::decimal(self.token.decimals, U256::ZERO),
                ),
                Input::text(
                    "Borrow Percentage",
                    self.percentage_description,
                    Validator::decimal_between(0, U256::ZERO, U256::from(MAX_BORROW_PERCENTAGE)),
                ),
            ],
            ..metadata(
                self.id,
                self.name,
                self.description,
                Link {
                    title: "AAVE",
                    url: "https://aave.com/",
                },
                networks::MAINNET,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        vec![
            aave::approve_preview(&self.token),
            aave::supply_preview(&self.token),
            aave::disable_emode_preview(),
            aave::delegate_preview(),
            aave::borrow_eth_preview(),
        ]
    }

    fn actions(&self) -> Vec<Action> {
        vec![Action {
            href: "https://app.aave.com/",
            text: "Manage Position (AAVE)",
        }]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let node = &*ctx.node;
        let amount = ctx.amount(0, self.token.decimals)?;
        let percentage = ctx.amount(1, 0)?;

        let (approve, emode, token_price, eth_price, allowance) = futures::try_join!(
            aave::approve_if_needed(node, ctx.account, &self.token, amount),
            aave::emode_enabled(node, ctx.account),
            aave::price(node, self.price_feed),
            aave::price(node, ethereum::CHAINLINK_ETH_USD),
            aave::borrow_allowance(node, ctx.account),
        )?;
        let borrow = self.borrow_amount(amount, percentage, token_price, eth_price)?;
        tracing::debug!(%token_price, %eth_price, %borrow, "borrowing against collateral");

        let mut txs = Vec::from_iter(approve);
        txs.push(aave::supply(&self.token, amount, ctx.account));
        // Stablecoins can't be used as collateral in the ETH correlated
        // category.
        if emode {
            txs.push(aave::disable_emode());
        }
        if allowance < borrow {
            txs.push(aave::delegate(borrow));
        }
        txs.push(aave::borrow_eth(borrow));
        Ok(txs)
    }
}

/// Supplies ETH in normal mode and borrows part of it back. Collateral and
/// debt share a price, so no feed is read.
pub struct BorrowEthWithEth;

#[async_trait::async_trait]
impl Case for BorrowEthWithEth {
    fn metadata(&self) -> Metadata {
        Metadata {
            tags: vec![Tag::Defi, Tag::Lending],
            protocols: vec![Protocol::Aave],
            inputs: vec![
                Input::native(
                    "ETH Amount",
                    "Supply to AAVE as collateral",
                    Validator::decimal(18, U256::ZERO),
                ),
                Input::text(
                    "Borrow Percentage",
                    "Percentage of the supplied ETH to be borrowed as ETH (Max: 70%)",
                    Validator::decimal_between(0, U256::ZERO, U256::from(MAX_BORROW_PERCENTAGE)),
                ),
            ],
            ..metadata(
                "aave_eth_eth",
                "Deposit ETH and borrow ETH on AAVE [Normal-Mode]",
                "One click to deposit ETH and borrow 70% equivalent value in ETH.",
                Link {
                    title: "AAVE",
                    url: "https://aave.com/",
                },
                networks::MAINNET,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        vec![
            aave::supply_eth_preview(),
            aave::disable_emode_preview(),
            aave::delegate_preview(),
            aave::borrow_eth_preview(),
        ]
    }

    fn actions(&self) -> Vec<Action> {
        vec![Action {
            href: "https://app.aave.com/",
            text: "Manage Position (AAVE)",
        }]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let node = &*ctx.node;
        let amount = ctx.amount(0, 18)?;
        let percentage = ctx.amount(1, 0)?;

        let (emode, allowance) = futures::try_join!(
            aave::emode_enabled(node, ctx.account),
            aave::borrow_allowance(node, ctx.account),
        )?;
        let borrow = amount
            .checked_mul(percentage)
            .ok_or(Error::Overflow)?
            / U256::from(100);

        let mut txs = vec![aave::supply_eth(amount, ctx.account)];
        if emode {
            txs.push(aave::disable_emode());
        }
        if allowance < borrow {
            txs.push(aave::delegate(borrow));
        }
        txs.push(aave::borrow_eth(borrow));
        Ok(txs)
    }
}
