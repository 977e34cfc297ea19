//! Swaps and staking on Scroll: SyncSwap and SpaceFi are called directly,
//! KyberSwap through its aggregator API.

use {
    super::erc20::{self, Token},
    crate::{
        domain::{
            Context,
            Error,
            eth::{PreviewTx, Tx},
        },
        infra::{blockchain::Node, dex::kyberswap},
    },
    alloy::{
        primitives::{Address, Bytes, U256},
        sol_types::SolValue,
    },
    chrono::{DateTime, Duration, Utc},
    contracts::{
        PenpadStaking,
        SyncSwapPool,
        SyncSwapPoolFactory,
        SyncSwapRouter,
        UniswapV2Router,
        addresses::{NATIVE_TOKEN, scroll},
    },
    number::units::format_ether,
};

pub const USDC: Token = Token::new(scroll::USDC, "USDC", 6);

/// How long swaps stay valid.
const DEADLINE: Duration = Duration::minutes(5);

/// SyncSwap withdraw mode unwrapping the output to native ETH.
const WITHDRAW_UNWRAPPED: U256 = U256::from_limbs([1, 0, 0, 0]);

fn deadline(now: DateTime<Utc>) -> U256 {
    U256::from((now + DEADLINE).timestamp().max(0))
}

pub mod syncswap {
    use super::*;

    pub const NAME: &str = "Syncswap";

    pub fn swap_eth_to_usdc_preview() -> PreviewTx {
        PreviewTx::new(
            "Swap",
            "ETH to USDC on Scroll using Syncswap",
            scroll::SYNCSWAP_ROUTER,
        )
        .highlight(NAME)
    }

    /// Swaps `amount` ETH for USDC in the classic pool, accepting 2%
    /// slippage. Returns the minimum USDC the swap yields.
    pub async fn swap_eth_to_usdc(
        node: &dyn Node,
        account: Address,
        amount: U256,
        now: DateTime<Utc>,
    ) -> Result<(Tx, U256), Error> {
        let pool = node
            .read(
                scroll::SYNCSWAP_CLASSIC_POOL_FACTORY,
                SyncSwapPoolFactory::getPoolCall {
                    tokenA: scroll::WETH,
                    tokenB: scroll::USDC,
                },
            )
            .await?;
        if pool.is_zero() {
            return Err(Error::Invalid("Pool does not exist".to_owned()));
        }

        let quoted = node
            .read(
                pool,
                SyncSwapPool::getAmountOutCall {
                    tokenIn: Address::ZERO,
                    amountIn: amount,
                    sender: account,
                },
            )
            .await?;
        let amount_out_min = quoted * U256::from(980) / U256::from(1000);

        let step = SyncSwapRouter::SwapStep {
            pool,
            data: (scroll::WETH, account, WITHDRAW_UNWRAPPED)
                .abi_encode_params()
                .into(),
            callback: Address::ZERO,
            callbackData: Bytes::new(),
        };
        let tx = Tx::call(
            "Swap",
            format!(
                "{} ETH to at least {} on Scroll using Syncswap",
                format_ether(amount),
                USDC.format(amount_out_min)
            ),
            scroll::SYNCSWAP_ROUTER,
            &SyncSwapRouter::swapCall {
                paths: vec![SyncSwapRouter::SwapPath {
                    steps: vec![step],
                    tokenIn: Address::ZERO,
                    amountIn: amount,
                }],
                amountOutMin: amount_out_min,
                deadline: deadline(now),
            },
        )
        .with_value(amount)
        .highlight(NAME);
        Ok((tx, amount_out_min))
    }
}

pub mod kyber {
    use super::*;

    pub const NAME: &str = "KyberSwap";

    /// Tolerated slippage, in basis points.
    const SLIPPAGE: u32 = 150;

    pub fn approve_preview() -> PreviewTx {
        PreviewTx::new("Approve", "USDC to KyberSwap", USDC.address).highlight(NAME)
    }

    pub fn swap_preview() -> PreviewTx {
        PreviewTx::new(
            "Swap",
            "50% USDC to ETH on KyberSwap",
            scroll::KYBERSWAP_ROUTER,
        )
        .highlight(NAME)
    }

    /// Routes `amount` USDC to ETH. Returns the approval of the router the
    /// route goes through, followed by the swap.
    pub async fn swap_usdc_to_eth(ctx: &Context, amount: U256) -> Result<[Tx; 2], Error> {
        let route = ctx
            .dexes
            .kyberswap
            .swap(&kyberswap::Order {
                chain_id: ctx.chain_id,
                token_in: USDC.address,
                token_out: NATIVE_TOKEN,
                amount_in: amount,
                account: ctx.account,
                deadline: ctx.now + DEADLINE,
                slippage: SLIPPAGE,
            })
            .await?;

        let approve = Tx::call(
            "Approve",
            format!("{} to KyberSwap", USDC.format(route.amount_in)),
            USDC.address,
            &contracts::IERC20::approveCall {
                spender: route.router_address,
                amount: route.amount_in,
            },
        )
        .highlight(NAME);
        let swap = Tx::raw(
            "Swap",
            format!(
                "{} to {} ETH on KyberSwap",
                USDC.format(route.amount_in),
                format_ether(route.amount_out)
            ),
            route.router_address,
            route.data,
        )
        .highlight(NAME);
        Ok([approve, swap])
    }
}

pub mod spacefi {
    use super::*;

    pub const NAME: &str = "SpaceFi";

    pub fn approve_preview() -> PreviewTx {
        PreviewTx::new("Approve", "USDC to SpaceFi", USDC.address).highlight(NAME)
    }

    pub fn approve(amount: U256) -> Tx {
        Tx::call(
            "Approve",
            format!("{} to SpaceFi", USDC.format(amount)),
            USDC.address,
            &contracts::IERC20::approveCall {
                spender: scroll::SPACEFI_ROUTER,
                amount,
            },
        )
        .highlight(NAME)
    }

    pub fn swap_preview() -> PreviewTx {
        PreviewTx::new(
            "Swap",
            "50% USDC to ETH on Scroll using SpaceFi",
            scroll::SPACEFI_ROUTER,
        )
        .highlight(NAME)
    }

    /// Sells `amount` USDC for ETH, accepting 10% slippage. The pool is
    /// shallow.
    pub async fn swap_usdc_to_eth(
        node: &dyn Node,
        account: Address,
        amount: U256,
        now: DateTime<Utc>,
    ) -> Result<Tx, Error> {
        let path = vec![USDC.address, scroll::WETH];
        let amounts = node
            .read(
                scroll::SPACEFI_ROUTER,
                UniswapV2Router::getAmountsOutCall {
                    amountIn: amount,
                    path: path.clone(),
                },
            )
            .await?;
        let quoted = amounts
            .last()
            .copied()
            .ok_or_else(|| Error::Invalid("Failed to get amount out on SpaceFi".to_owned()))?;
        let amount_out_min = quoted * U256::from(9) / U256::from(10);

        Ok(Tx::call(
            "Swap",
            format!("{} to ETH on Scroll using SpaceFi", USDC.format(amount)),
            scroll::SPACEFI_ROUTER,
            &UniswapV2Router::swapExactTokensForETHCall {
                amountIn: amount,
                amountOutMin: amount_out_min,
                path,
                to: account,
                deadline: deadline(now),
            },
        )
        .highlight(NAME))
    }
}

pub mod penpad {
    use super::*;

    pub const NAME: &str = "Penpad";

    pub fn stake_preview() -> PreviewTx {
        PreviewTx::new("Deposit", "ETH to Penpad", scroll::PENPAD_STAKING).highlight(NAME)
    }

    pub fn stake(amount: U256) -> Tx {
        Tx::call(
            "Deposit",
            format!("{} ETH to Penpad", format_ether(amount)),
            scroll::PENPAD_STAKING,
            &PenpadStaking::stakeCall {},
        )
        .with_value(amount)
        .highlight(NAME)
    }
}

/// Fails unless `account` holds at least `amount` ETH.
pub async fn ensure_balance(node: &dyn Node, account: Address, amount: U256) -> Result<(), Error> {
    if node.balance(account).await? < amount {
        return Err(Error::Invalid("Total amount is insufficient".to_owned()));
    }
    Ok(())
}
