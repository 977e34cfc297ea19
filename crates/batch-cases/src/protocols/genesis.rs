//! GenesisLRT restaking: ETH is staked for genETH.

use {
    super::erc20::Token,
    crate::{
        domain::{
            Error,
            eth::{PreviewTx, Tx},
        },
        infra::blockchain::Node,
    },
    alloy::primitives::{B256, U256},
    contracts::{
        GenETH,
        GenesisRestakingPool,
        addresses::{REFERRAL, ethereum},
    },
    number::units::format_ether,
};

pub const NAME: &str = "Genesis";

pub const GENETH: Token = Token::new(ethereum::GENESIS_GENETH, "genETH", 18);

pub fn stake_preview() -> PreviewTx {
    PreviewTx::new(
        "Stake",
        "ETH and receive genETH on Genesis",
        ethereum::GENESIS_RESTAKING_POOL,
    )
    .highlight(NAME)
}

/// Stakes `amount` ETH, which is expected to mint `geneth`.
pub fn stake(amount: U256, geneth: U256) -> Tx {
    Tx::call(
        "Stake",
        format!(
            "{} ETH and receive {} genETH on Genesis",
            format_ether(amount),
            format_ether(geneth)
        ),
        ethereum::GENESIS_RESTAKING_POOL,
        &GenesisRestakingPool::stakeCall {
            referral: B256::left_padding_from(REFERRAL.as_slice()),
        },
    )
    .with_value(amount)
    .highlight(NAME)
}

/// genETH minted for staking `assets` ETH.
pub async fn convert_to_shares(node: &dyn Node, assets: U256) -> Result<U256, Error> {
    Ok(node
        .read(GENETH.address, GenETH::convertToSharesCall { assets })
        .await?)
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::sol_types::SolCall};

    #[test]
    fn referral_is_left_padded() {
        let tx = stake(U256::from(5), U256::from(4));
        let call = GenesisRestakingPool::stakeCall::abi_decode(&tx.data).unwrap();
        assert_eq!(call.referral[..12], [0; 12]);
        assert_eq!(call.referral[12..], REFERRAL[..]);
        assert_eq!(tx.value, U256::from(5));
    }
}
