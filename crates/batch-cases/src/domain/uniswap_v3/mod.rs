//! Uniswap V3 tick and square root price math, used to size concentrated
//! liquidity positions.

pub mod position;
pub mod tick_math;

pub use self::{position::Position, tick_math::sqrt_ratio_at_tick};
