//! Aave v3 on Ethereum: collateral supply, E-Mode and ETH borrowing through
//! the wrapped token gateway.

use {
    super::erc20::{self, Token},
    crate::{
        domain::{
            Error,
            eth::{PreviewTx, Tx},
        },
        infra::blockchain::Node,
    },
    alloy::primitives::{Address, U256},
    contracts::{AaveDebtToken, AavePool, AaveWrappedTokenGateway, PriceFeed, addresses::ethereum},
    number::units::format_ether,
};

pub const NAME: &str = "AAVE";

/// E-Mode category for ETH correlated assets.
const ETH_CORRELATED: u8 = 1;
const VARIABLE_RATE: u64 = 2;

pub fn supply_preview(token: &Token) -> PreviewTx {
    PreviewTx::new(
        "Supply",
        format!("{} to AAVE as collateral", token.symbol),
        ethereum::AAVE_POOL,
    )
    .highlight(NAME)
}

pub fn supply(token: &Token, amount: U256, on_behalf_of: Address) -> Tx {
    Tx::call(
        "Supply",
        format!("{} to AAVE as collateral", token.format(amount)),
        ethereum::AAVE_POOL,
        &AavePool::supplyCall {
            asset: token.address,
            amount,
            onBehalfOf: on_behalf_of,
            referralCode: 0,
        },
    )
    .highlight(NAME)
}

pub fn supply_eth_preview() -> PreviewTx {
    PreviewTx::new("Supply", "ETH to AAVE as collateral", ethereum::AAVE_WETH_GATEWAY)
        .highlight(NAME)
}

/// Supplies ETH through the gateway, which wraps it into WETH first.
pub fn supply_eth(amount: U256, on_behalf_of: Address) -> Tx {
    Tx::call(
        "Supply",
        format!("{} ETH to AAVE as collateral", format_ether(amount)),
        ethereum::AAVE_WETH_GATEWAY,
        &AaveWrappedTokenGateway::depositETHCall {
            pool: ethereum::AAVE_POOL,
            onBehalfOf: on_behalf_of,
            referralCode: 0,
        },
    )
    .with_value(amount)
    .highlight(NAME)
}

pub fn approve_preview(token: &Token) -> PreviewTx {
    erc20::approve_preview(token, NAME)
}

pub async fn approve_if_needed(
    node: &dyn Node,
    owner: Address,
    token: &Token,
    amount: U256,
) -> Result<Option<Tx>, Error> {
    erc20::approve_if_needed(node, owner, token, ethereum::AAVE_POOL, NAME, amount).await
}

/// Whether `user` has the ETH correlated E-Mode enabled.
pub async fn emode_enabled(node: &dyn Node, user: Address) -> Result<bool, Error> {
    let category = node
        .read(ethereum::AAVE_POOL, AavePool::getUserEModeCall { user })
        .await?;
    Ok(category == U256::from(ETH_CORRELATED))
}

pub fn enable_emode_preview() -> PreviewTx {
    PreviewTx::new("Enable", "AAVE E-Mode if it is disabled", ethereum::AAVE_POOL).highlight(NAME)
}

pub fn enable_emode() -> Tx {
    set_emode("Enable", ETH_CORRELATED)
}

pub fn disable_emode_preview() -> PreviewTx {
    PreviewTx::new("Disable", "AAVE E-Mode if it is enabled", ethereum::AAVE_POOL).highlight(NAME)
}

pub fn disable_emode() -> Tx {
    set_emode("Disable", 0)
}

fn set_emode(name: &str, category: u8) -> Tx {
    Tx::call(
        name,
        "AAVE E-Mode",
        ethereum::AAVE_POOL,
        &AavePool::setUserEModeCall {
            categoryId: category,
        },
    )
    .highlight(NAME)
}

pub fn delegate_preview() -> PreviewTx {
    PreviewTx::new(
        "Delegate",
        "borrowing power on the debt WETH if needed",
        ethereum::AAVE_VARIABLE_DEBT_WETH,
    )
    .highlight(NAME)
}

/// Lets the gateway borrow WETH on behalf of the user, so that borrows are
/// paid out in ETH.
pub fn delegate(amount: U256) -> Tx {
    Tx::call(
        "Delegate",
        "borrowing power on the debt WETH",
        ethereum::AAVE_VARIABLE_DEBT_WETH,
        &AaveDebtToken::approveDelegationCall {
            delegatee: ethereum::AAVE_WETH_GATEWAY,
            amount,
        },
    )
}

/// WETH the gateway may currently borrow for `user`.
pub async fn borrow_allowance(node: &dyn Node, user: Address) -> Result<U256, Error> {
    Ok(node
        .read(
            ethereum::AAVE_VARIABLE_DEBT_WETH,
            AaveDebtToken::borrowAllowanceCall {
                fromUser: user,
                toUser: ethereum::AAVE_WETH_GATEWAY,
            },
        )
        .await?)
}

pub fn borrow_eth_preview() -> PreviewTx {
    PreviewTx::new("Borrow", "ETH from AAVE", ethereum::AAVE_WETH_GATEWAY).highlight(NAME)
}

pub fn borrow_eth(amount: U256) -> Tx {
    Tx::call(
        "Borrow",
        format!("{} ETH from AAVE", format_ether(amount)),
        ethereum::AAVE_WETH_GATEWAY,
        &AaveWrappedTokenGateway::borrowETHCall {
            pool: ethereum::AAVE_POOL,
            amount,
            interestRateMode: U256::from(VARIABLE_RATE),
            referralCode: 0,
        },
    )
    .highlight(NAME)
}

/// Latest answer of a Chainlink USD price feed (8 decimals).
pub async fn price(node: &dyn Node, feed: Address) -> Result<U256, Error> {
    let answer = node.read(feed, PriceFeed::latestAnswerCall {}).await?;
    if answer.is_negative() || answer.is_zero() {
        return Err(Error::Invalid(format!("invalid price {answer} from feed {feed}")));
    }
    Ok(answer.into_raw())
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::sol_types::SolCall};

    #[test]
    fn emode_toggles() {
        let enable = AavePool::setUserEModeCall::abi_decode(&enable_emode().data).unwrap();
        assert_eq!(enable.categoryId, 1);
        let disable = AavePool::setUserEModeCall::abi_decode(&disable_emode().data).unwrap();
        assert_eq!(disable.categoryId, 0);
        assert_eq!(disable_emode().name, "Disable");
    }

    #[test]
    fn borrows_at_variable_rate() {
        let tx = borrow_eth(U256::from(10).pow(U256::from(17)));
        assert_eq!(tx.description, "0.1 ETH from AAVE");
        let call = AaveWrappedTokenGateway::borrowETHCall::abi_decode(&tx.data).unwrap();
        assert_eq!(call.interestRateMode, U256::from(2));
        assert_eq!(call.pool, ethereum::AAVE_POOL);
        assert_eq!(tx.to, ethereum::AAVE_WETH_GATEWAY);
    }

    #[test]
    fn supplies_eth_through_gateway() {
        let user = Address::repeat_byte(7);
        let tx = supply_eth(U256::from(10).pow(U256::from(18)), user);
        assert_eq!(tx.description, "1 ETH to AAVE as collateral");
        assert_eq!(tx.value, U256::from(10).pow(U256::from(18)));
        let call = AaveWrappedTokenGateway::depositETHCall::abi_decode(&tx.data).unwrap();
        assert_eq!(call.pool, ethereum::AAVE_POOL);
        assert_eq!(call.onBehalfOf, user);
    }
}
