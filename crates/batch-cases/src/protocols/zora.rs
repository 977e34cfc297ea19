//! Zora 1155 mints through the fixed price sale strategy.

use {
    crate::{
        domain::{
            Error,
            eth::{PreviewTx, Tx},
        },
        infra::blockchain::Node,
    },
    alloy::{
        primitives::{Address, U256},
        sol_types::SolValue,
    },
    chrono::{DateTime, Utc},
    contracts::{
        ZoraCreator1155,
        ZoraFixedPriceSaleStrategy,
        addresses::{REFERRAL, zora},
    },
    number::units::format_ether,
};

pub const NAME: &str = "Zora";

/// Attached to every mint.
pub const MINT_COMMENT: &str = "Minted with BentoBatch 🍱!";

/// A token of a Zora 1155 collection sold at a fixed price.
#[derive(Debug, Clone, Copy)]
pub struct Nft {
    pub name: &'static str,
    pub collection: Address,
    pub token_id: u64,
    /// In wei, per token.
    pub price: U256,
}

impl Nft {
    pub fn mint_preview(&self) -> PreviewTx {
        PreviewTx::new(
            "Mint",
            format!(
                "NFT {} with {} ETH on {NAME}",
                self.name,
                format_ether(self.price)
            ),
            self.collection,
        )
        .highlight(self.name)
        .highlight(NAME)
    }

    /// Mints `quantity` tokens to `receiver`, paying the full price.
    pub fn mint(&self, quantity: u64, receiver: Address) -> Result<Tx, Error> {
        let value = self
            .price
            .checked_mul(U256::from(quantity))
            .ok_or(Error::Overflow)?;
        Ok(Tx::call(
            "Mint",
            format!(
                "{quantity} NFT {} with {} ETH on {NAME}",
                self.name,
                format_ether(value)
            ),
            self.collection,
            &ZoraCreator1155::mintWithRewardsCall {
                minter: zora::FIXED_PRICE_SALE_STRATEGY,
                tokenId: U256::from(self.token_id),
                quantity: U256::from(quantity),
                minterArguments: (receiver, MINT_COMMENT.to_owned())
                    .abi_encode_params()
                    .into(),
                mintReferral: REFERRAL,
            },
        )
        .with_value(value)
        .highlight(self.name)
        .highlight(NAME))
    }

    /// Fails when the sale of the token has ended.
    pub async fn ensure_on_sale(&self, node: &dyn Node, now: DateTime<Utc>) -> Result<(), Error> {
        let sale = node
            .read(
                zora::FIXED_PRICE_SALE_STRATEGY,
                ZoraFixedPriceSaleStrategy::saleCall {
                    tokenContract: self.collection,
                    tokenId: U256::from(self.token_id),
                },
            )
            .await?;
        let now = u64::try_from(now.timestamp()).unwrap_or_default();
        if sale.saleEnd < now {
            return Err(Error::Invalid(format!(
                "NFT {} minting is expired.",
                self.name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::infra::blockchain::MockNode,
        alloy::sol_types::SolCall,
        chrono::TimeZone,
    };

    const NFT: Nft = Nft {
        name: "11:11",
        collection: zora::ELEVEN_ELEVEN,
        token_id: 3,
        price: U256::from_limbs([777_000_000_000_000, 0, 0, 0]),
    };

    #[test]
    fn mint_pays_for_every_token() {
        let receiver = Address::repeat_byte(1);
        let tx = NFT.mint(3, receiver).unwrap();
        assert_eq!(tx.value, U256::from(2_331_000_000_000_000u64));
        assert_eq!(tx.description, "3 NFT 11:11 with 0.002331 ETH on Zora");
        assert_eq!(tx.meta.highlights, ["11:11", "Zora"]);

        let call = ZoraCreator1155::mintWithRewardsCall::abi_decode(&tx.data).unwrap();
        assert_eq!(call.quantity, U256::from(3));
        assert_eq!(call.mintReferral, REFERRAL);
        let (to, comment) =
            <(Address, String)>::abi_decode_params(&call.minterArguments).unwrap();
        assert_eq!(to, receiver);
        assert_eq!(comment, MINT_COMMENT);
    }

    #[tokio::test]
    async fn rejects_ended_sales() {
        let mut node = MockNode::new();
        node.expect_call().returning(|_| {
            Ok(ZoraFixedPriceSaleStrategy::SalesConfig {
                saleStart: 0,
                saleEnd: 1_000,
                maxTokensPerAddress: 0,
                pricePerToken: Default::default(),
                fundsRecipient: Address::ZERO,
            }
            .abi_encode()
            .into())
        });

        let before = Utc.timestamp_opt(999, 0).unwrap();
        assert!(NFT.ensure_on_sale(&node, before).await.is_ok());
        let after = Utc.timestamp_opt(1_001, 0).unwrap();
        assert_eq!(
            NFT.ensure_on_sale(&node, after).await.unwrap_err().to_string(),
            "NFT 11:11 minting is expired."
        );
    }
}
