use {
    super::metadata,
    crate::{
        domain::{
            Case,
            Context,
            Error,
            PreviewTx,
            Tx,
            case::{Input, Link, Metadata, Tag},
            validate::{self, Validator},
        },
        protocols::{Token, erc20},
    },
    alloy::primitives::U256,
    contracts::{addresses::polygon, networks},
};

const USDT: Token = Token::new(polygon::USDT, "USDT", 6);
const MAX_RECIPIENTS: usize = 30;

/// Sends the same amount of USDT to every listed recipient.
pub struct MultiSender;

#[async_trait::async_trait]
impl Case for MultiSender {
    fn metadata(&self) -> Metadata {
        Metadata {
            tags: vec![Tag::Asset],
            inputs: vec![
                Input::erc20(
                    "USDT Amount",
                    "Amount to be sent to each recipient",
                    USDT.address,
                    Validator::decimal(USDT.decimals, U256::ZERO),
                ),
                Input::text(
                    "Recipients",
                    "List of addresses with a maximum limit of 30, separated by comma",
                    Validator::Addresses {
                        max: MAX_RECIPIENTS,
                    },
                ),
            ],
            ..metadata(
                "multi_sender",
                "Multi-Send of USDT on Polygon",
                "One-Click to send USDT to multiple addresses.",
                Link {
                    title: "Bento Batch 🍱",
                    url: "https://x.com/bentobatch",
                },
                networks::POLYGON,
            )
        }
    }

    fn preview(&self) -> Vec<PreviewTx> {
        vec![PreviewTx::new("Transfer", "USDT to recipient", USDT.address); 3]
    }

    async fn render(&self, ctx: &Context) -> Result<Vec<Tx>, Error> {
        let amount = ctx.amount(0, USDT.decimals)?;
        let recipients = validate::addresses(ctx.input(1)?, MAX_RECIPIENTS)
            .map_err(|validate::Error(reason)| Error::Invalid(reason))?;

        let total = u64::try_from(recipients.len())
            .ok()
            .and_then(|count| amount.checked_mul(U256::from(count)))
            .ok_or(Error::Overflow)?;
        let balance = erc20::balance_of(&*ctx.node, USDT.address, ctx.account).await?;
        if total > balance {
            return Err(Error::Invalid(format!(
                "Insufficient balance: need {} in total",
                USDT.format(total)
            )));
        }

        Ok(recipients
            .into_iter()
            .map(|recipient| erc20::transfer(&USDT, recipient, amount))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{infra::blockchain::MockNode, tests},
        alloy::{
            primitives::address,
            sol_types::{SolCall, SolValue},
        },
        contracts::IERC20,
    };

    fn node(balance: u64) -> MockNode {
        let mut node = MockNode::new();
        node.expect_call()
            .returning(move |_| Ok(U256::from(balance).abi_encode().into()));
        node
    }

    const RECIPIENTS: &str = "0x80011844928B469EAc5E4bC7e6EBA9b3C2Fa1b41,\
                              0x2371e134e3455e0593363cBF89d3b6cf53740618";

    #[tokio::test]
    async fn transfers_to_each_recipient() {
        let ctx = tests::context(node(10_000_000), &["2.5", RECIPIENTS]);
        let txs = MultiSender.render(&ctx).await.unwrap();

        assert_eq!(txs.len(), 2);
        let transfer = IERC20::transferCall::abi_decode(&txs[1].data).unwrap();
        assert_eq!(
            transfer.to,
            address!("2371e134e3455e0593363cBF89d3b6cf53740618")
        );
        assert_eq!(transfer.amount, U256::from(2_500_000));
        assert_eq!(txs[1].to, polygon::USDT);
        assert_eq!(
            txs[0].description,
            "2.5 USDT to 0x80011844928B469EAc5E4bC7e6EBA9b3C2Fa1b41"
        );
    }

    #[tokio::test]
    async fn needs_enough_balance_for_everyone() {
        let ctx = tests::context(node(4_000_000), &["2.5", RECIPIENTS]);
        let err = MultiSender.render(&ctx).await.unwrap_err();
        assert_eq!(err.to_string(), "Insufficient balance: need 5 USDT in total");
    }

    #[tokio::test]
    async fn rejects_invalid_recipients() {
        let ctx = tests::context(MockNode::new(), &["1", "0x80011844928B469EAc5E4bC7e6EBA9b3"]);
        let err = MultiSender.render(&ctx).await.unwrap_err();
        assert_eq!(err.to_string(), "Recipients contain invalid address(es)");
    }
}
