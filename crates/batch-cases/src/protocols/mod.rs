//! Building blocks shared by cases: preview and transaction builders for the
//! protocols cases interact with, plus the reads needed to size them.

pub mod aave;
pub mod arbitrum;
pub mod erc20;
pub mod etherfi;
pub mod gamma;
pub mod genesis;
pub mod lido;
pub mod morpho;
pub mod oneinch;
pub mod pendle;
pub mod scroll;
pub mod uniswap;
pub mod yearn;
pub mod zircuit;
pub mod zora;

pub use self::erc20::Token;
