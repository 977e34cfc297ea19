//! Uniswap V3 liquidity positions, minted through the position manager.

use {
    super::erc20::{self, Token},
    crate::{
        domain::{
            Error,
            eth::{PreviewTx, Tx},
            uniswap_v3::Position,
        },
        infra::blockchain::Node,
    },
    alloy::primitives::{
        Address,
        U256,
        aliases::{I24, U24},
    },
    chrono::{DateTime, Duration, Utc},
    contracts::{NonfungiblePositionManager, UniswapV3Pool, addresses::ethereum},
    number::units::format_ether,
};

pub const NAME: &str = "UniswapV3";

/// How long a mint stays valid.
const DEADLINE: Duration = Duration::minutes(10);

/// Current price and tick spacing of a pool.
#[derive(Debug, Clone, Copy)]
pub struct PoolState {
    pub sqrt_price_x96: U256,
    pub tick_spacing: i32,
}

impl PoolState {
    /// Reads the pool. Fails for pools that have no price yet or report a
    /// spacing positions can't be aligned to.
    pub async fn read(node: &dyn Node, pool: Address) -> Result<Self, Error> {
        let (slot0, tick_spacing) = futures::try_join!(
            node.read(pool, UniswapV3Pool::slot0Call {}),
            node.read(pool, UniswapV3Pool::tickSpacingCall {}),
        )?;
        let sqrt_price_x96 = U256::from(slot0.sqrtPriceX96);
        if sqrt_price_x96.is_zero() {
            return Err(Error::Invalid(format!("pool {pool} is not initialized")));
        }
        let tick_spacing = i32::try_from(tick_spacing).map_err(|_| Error::Overflow)?;
        if tick_spacing <= 0 {
            return Err(Error::Invalid(format!(
                "pool {pool} has an invalid tick spacing of {tick_spacing}"
            )));
        }
        Ok(Self {
            sqrt_price_x96,
            tick_spacing,
        })
    }

    /// A position around the current price, sized for `amount`.
    pub fn position(&self, amount: U256) -> Position {
        Position::around(self.sqrt_price_x96, self.tick_spacing, amount)
    }
}

pub fn approve_preview(token: &Token) -> PreviewTx {
    PreviewTx::new(
        "Approve",
        format!("{} to be added to the {NAME} liquidity pool", token.symbol),
        token.address,
    )
    .highlight(NAME)
}

/// Approves the position manager for `amount` of `token` unless it already
/// may spend that much.
pub async fn approve_if_needed(
    node: &dyn Node,
    owner: Address,
    token: &Token,
    amount: U256,
    description: String,
) -> Result<Option<Tx>, Error> {
    let allowance = erc20::allowance(
        node,
        token.address,
        owner,
        ethereum::UNISWAP_V3_POSITION_MANAGER,
    )
    .await?;
    Ok((allowance < amount).then(|| {
        Tx::call(
            "Approve",
            description,
            token.address,
            &contracts::IERC20::approveCall {
                spender: ethereum::UNISWAP_V3_POSITION_MANAGER,
                amount,
            },
        )
        .highlight(NAME)
    }))
}

pub fn mint_preview(token0: &Token, token1: &Token) -> PreviewTx {
    PreviewTx::new(
        "Add",
        format!(
            "{} and {} to the {NAME} liquidity pool",
            token0.symbol, token1.symbol
        ),
        ethereum::UNISWAP_V3_POSITION_MANAGER,
    )
    .highlight(NAME)
}

/// A pool of the position manager, identified by its tokens and fee tier.
#[derive(Debug, Clone, Copy)]
pub struct Pool {
    pub token0: Token,
    pub token1: Token,
    /// In hundredths of a bip.
    pub fee: u32,
}

/// Mints a position between `tick_lower` and `tick_upper` for `recipient`.
/// Minimum amounts are left at zero.
pub fn mint(
    pool: &Pool,
    (tick_lower, tick_upper): (i32, i32),
    (amount0, amount1): (U256, U256),
    recipient: Address,
    now: DateTime<Utc>,
) -> Result<Tx, Error> {
    let tick = |tick: i32| I24::try_from(tick).map_err(|_| Error::Overflow);
    let params = NonfungiblePositionManager::MintParams {
        token0: pool.token0.address,
        token1: pool.token1.address,
        fee: U24::from(pool.fee),
        tickLower: tick(tick_lower)?,
        tickUpper: tick(tick_upper)?,
        amount0Desired: amount0,
        amount1Desired: amount1,
        amount0Min: U256::ZERO,
        amount1Min: U256::ZERO,
        recipient,
        deadline: U256::from((now + DEADLINE).timestamp().max(0)),
    };
    Ok(Tx::call(
        "Add",
        format!(
            "{} {} and {} {} to the {NAME} liquidity pool",
            format_ether(amount0),
            pool.token0.symbol,
            format_ether(amount1),
            pool.token1.symbol
        ),
        ethereum::UNISWAP_V3_POSITION_MANAGER,
        &NonfungiblePositionManager::mintCall { params },
    )
    .highlight(NAME))
}
