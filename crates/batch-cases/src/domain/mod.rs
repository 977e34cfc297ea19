pub mod case;
pub mod eth;
pub mod gamma;
pub mod leverage;
pub mod uniswap_v3;
pub mod validate;
pub mod vault;

pub use self::{
    case::{Case, Context, Error},
    eth::{PreviewTx, Tx},
};
