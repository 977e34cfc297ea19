pub mod blockchain;
pub mod cli;
pub mod config;
pub mod dex;

pub use self::{
    blockchain::{Ethereum, Node},
    config::Config,
};
