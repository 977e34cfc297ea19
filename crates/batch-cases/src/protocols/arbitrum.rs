//! Deposits of ERC20 tokens from Ethereum into Arbitrum One through the
//! canonical gateway router. The L2 side is a retryable ticket, paid for
//! with the ETH attached to the deposit.

use {
    super::erc20::{self, Token},
    crate::{
        domain::{
            Error,
            eth::{PreviewTx, Tx},
        },
        infra::blockchain::Node,
    },
    alloy::{
        primitives::{Address, Bytes, U256},
        sol_types::SolValue,
    },
    contracts::{
        ArbitrumERC20Gateway,
        ArbitrumGatewayRouter,
        ArbitrumInbox,
        addresses::ethereum,
    },
};

pub const NAME: &str = "Arbitrum One";

/// Gas limit of the L2 execution.
const MAX_GAS: u64 = 200_000;
/// L2 gas price bid, in wei.
const GAS_PRICE_BID: u64 = 300_000_000;

pub fn bridge_preview(token: &Token) -> PreviewTx {
    PreviewTx::new(
        "Bridge",
        format!("{} to {NAME}", token.symbol),
        ethereum::ARBITRUM_GATEWAY_ROUTER,
    )
    .highlight(NAME)
}

/// Bridges `amount` of `token` to `to` on Arbitrum. The token has to be
/// approved for the ERC20 gateway.
pub async fn bridge(
    node: &dyn Node,
    token: &Token,
    to: Address,
    amount: U256,
) -> Result<Tx, Error> {
    let outbound = node
        .read(
            ethereum::ARBITRUM_ERC20_GATEWAY,
            ArbitrumERC20Gateway::getOutboundCalldataCall {
                token: token.address,
                from: ethereum::ARBITRUM_GATEWAY_ROUTER,
                to,
                amount,
                data: Bytes::new(),
            },
        )
        .await?;
    let submission_fee = node
        .read(
            ethereum::ARBITRUM_INBOX,
            ArbitrumInbox::calculateRetryableSubmissionFeeCall {
                dataLength: U256::from(outbound.len()),
                baseFee: U256::ZERO,
            },
        )
        .await?;
    // 20% headroom on the quoted fee.
    let max_submission_cost = submission_fee * U256::from(12) / U256::from(10);
    let value = U256::from(MAX_GAS) * U256::from(GAS_PRICE_BID) + max_submission_cost;
    tracing::debug!(%submission_fee, %value, "retryable ticket cost");

    Ok(Tx::call(
        "Bridge",
        format!("{} into {NAME}", token.format(amount)),
        ethereum::ARBITRUM_GATEWAY_ROUTER,
        &ArbitrumGatewayRouter::outboundTransferCall {
            token: token.address,
            to,
            amount,
            maxGas: U256::from(MAX_GAS),
            gasPriceBid: U256::from(GAS_PRICE_BID),
            data: (max_submission_cost, Bytes::new()).abi_encode_params().into(),
        },
    )
    .with_value(value)
    .highlight(NAME))
}

/// Approves the gateway that escrows bridged tokens.
pub fn approve_gateway(token: &Token, amount: U256, spender_name: &str) -> Tx {
    erc20::approve(token, ethereum::ARBITRUM_ERC20_GATEWAY, spender_name, amount)
}

#[cfg(test)]
mod tests {
    use {super::*, crate::infra::blockchain::MockNode, alloy::sol_types::SolCall};

    #[tokio::test]
    async fn pays_for_the_retryable_ticket() {
        let mut node = MockNode::new();
        node.expect_call().returning(|call| {
            Ok(if call.to == ethereum::ARBITRUM_ERC20_GATEWAY {
                Bytes::from(vec![0xab; 100]).abi_encode()
            } else {
                let fee = ArbitrumInbox::calculateRetryableSubmissionFeeCall::abi_decode(&call.data)
                    .unwrap();
                assert_eq!(fee.dataLength, U256::from(100));
                U256::from(1_000).abi_encode()
            }
            .into())
        });

        let weeth = Token::new(ethereum::ETHER_FI_WEETH, "weETH", 18);
        let to = Address::repeat_byte(4);
        let tx = bridge(&node, &weeth, to, U256::from(10).pow(U256::from(18)))
            .await
            .unwrap();

        assert_eq!(tx.value, U256::from(60_000_000_001_200u64));
        assert_eq!(tx.description, "1 weETH into Arbitrum One");
        let call = ArbitrumGatewayRouter::outboundTransferCall::abi_decode(&tx.data).unwrap();
        assert_eq!(call.to, to);
        let (cost, extra) = <(U256, Bytes)>::abi_decode_params(&call.data).unwrap();
        assert_eq!(cost, U256::from(1_200));
        assert!(extra.is_empty());
    }
}
