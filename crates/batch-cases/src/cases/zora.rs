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
        protocols::zora::Nft,
    },
    alloy::primitives::U256,
    contracts::{addresses::zora, networks},
    number::units::format_ether,
};

/// 0.000777 ETH, the price of an open edition on Zora.
const PRICE: U256 = U256::from_limbs([777_000_000_000_000, 0, 0, 0]);

const NFTS: [Nft; 2] = [
    Nft {
        name: "11:11",
        collection: zora::ELEVEN_ELEVEN,
        token_id: 3,
        price: PRICE,
    },
    Nft {
        name: "It's a feeling.",
        collection: zora::ITS_A_FEELING,
        token_id: 1,
        price: PRICE,
    },
];

/// Mints the latest drops of imagine.zora.eth as many times as asked.
pub struct MostMinted;

#[async_trait::async_trait]
impl Case for MostMinted {
    fn metadata(&self) -> Metadata {
        Metadata {
            tags: vec![Tag::Nft],
            protocols: vec![Protocol::Zora],
            attributes: vec![Metadata::txn_count("2")],
            atomic: false,
            inputs: vec![Input::text(
                "Batch Amount",
                "How many times do you want to mint these two NFTs?",
                Validator::Integer { min: 1, max: None },
            )],
            ..metadata(
                "zora_most_minted",
                "Grab the Most Popular NFT on Zora",
                "Imagine.zora.eth's latest NFT package is here - Batch the mint with ease and \
                 cheap!",
                Link {
                    title: "Zora",
                    url: "https://zora.co/",
                },
                networks::ZORA,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        NFTS.iter().map(Nft::mint_preview).collect()
    }

    fn actions(&self) -> Vec<Action> {
        vec![Action {
            href: "https://opensea.io/account/private",
            text: "Opensea",
        }]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let node = &*ctx.node;
        let quantity = ctx
            .input(0)?
            .trim()
            .parse::<u64>()
            .map_err(|_| Error::Invalid("Invalid integer".to_owned()))?;

        let total = NFTS
            .iter()
            .try_fold(U256::ZERO, |total, nft| {
                nft.price
                    .checked_mul(U256::from(quantity))
                    .and_then(|price| total.checked_add(price))
            })
            .ok_or(Error::Overflow)?;
        let balance = node.balance(ctx.account).await?;
        if total > balance {
            return Err(Error::Invalid(format!(
                "ETH balance is not enough, you need at least {} ETH",
                format_ether(total)
            )));
        }

        futures::future::try_join_all(NFTS.iter().map(|nft| nft.ensure_on_sale(node, ctx.now)))
            .await?;
        NFTS.iter()
            .map(|nft| nft.mint(quantity, ctx.account))
            .collect()
    }
}
