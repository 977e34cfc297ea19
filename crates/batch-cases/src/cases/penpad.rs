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
        protocols::scroll::{self, kyber, penpad, spacefi, syncswap},
    },
    alloy::primitives::U256,
    contracts::networks,
    number::units::exp10,
};

/// Interacts with the Scroll ecosystem: swaps ETH to USDC on SyncSwap,
/// sells it back to ETH on KyberSwap and SpaceFi, then stakes ETH on Penpad.
pub struct AirdropHunting;

#[async_trait::async_trait]
impl Case for AirdropHunting {
    fn metadata(&self) -> Metadata {
        Metadata {
            tags: vec![
                Tag::Official,
                Tag::Benefits,
                Tag::Defi,
                Tag::Swap,
                Tag::Staking,
            ],
            protocols: vec![
                Protocol::SyncSwap,
                Protocol::KyberSwap,
                Protocol::SpaceFi,
                Protocol::Penpad,
            ],
            attributes: vec![Metadata::txn_count("6")],
            render_expiry: Some(15),
            inputs: vec![
                Input::native(
                    "ETH Amount",
                    "Amount to swap to USDC, then swap to ETH",
                    Validator::decimal_between(18, U256::ZERO, exp10(17)),
                ),
                Input::native(
                    "ETH Amount",
                    "Amount to stake, require 0.05 eth minimum",
                    Validator::decimal(18, exp10(16) * U256::from(5)),
                ),
            ],
            ..metadata(
                "scroll_airdrop_hunting_with_penpad",
                "🔥 Earn extra 10% Penpad Points and share up to 10000 $BLT prize pool ",
                "Engage with the Scroll ecosystem effortlessly by swapping ETH/USDC on SyncSwap, \
                 KyberNetwork, and SpaceFi, then stake your ETH to Penpad all in just One Click.",
                Link {
                    title: "Penpad",
                    url: "https://penpad.io/staking",
                },
                networks::SCROLL,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        vec![
            syncswap::swap_eth_to_usdc_preview(),
            kyber::approve_preview(),
            kyber::swap_preview(),
            spacefi::approve_preview(),
            spacefi::swap_preview(),
            penpad::stake_preview(),
        ]
    }

    fn actions(&self) -> Vec<Action> {
        vec![Action {
            href: "https://penpad.io/staking",
            text: "Check Points (Penpad)",
        }]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let node = &*ctx.node;
        let to_swap = ctx.amount(0, 18)?;
        let to_stake = ctx.amount(1, 18)?;
        let total = to_swap.checked_add(to_stake).ok_or(Error::Overflow)?;
        scroll::ensure_balance(node, ctx.account, total).await?;

        let (swap, usdc) = syncswap::swap_eth_to_usdc(node, ctx.account, to_swap, ctx.now).await?;
        // Half of the USDC goes back through each of the other two DEXes.
        let half = usdc / U256::from(2);
        let ([approve_kyber, swap_kyber], swap_spacefi) = futures::try_join!(
            kyber::swap_usdc_to_eth(ctx, half),
            spacefi::swap_usdc_to_eth(node, ctx.account, half, ctx.now),
        )?;

        Ok(vec![
            swap,
            approve_kyber,
            swap_kyber,
            spacefi::approve(half),
            swap_spacefi,
            penpad::stake(to_stake),
        ])
    }
}
