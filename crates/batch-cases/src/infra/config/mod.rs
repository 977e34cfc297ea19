use {
    crate::infra::dex::{kyberswap, oneinch, pendle},
    std::collections::HashMap,
    url::Url,
};

pub mod file;

/// Everything needed to talk to nodes and aggregator APIs.
#[derive(Debug, Clone)]
pub struct Config {
    /// RPC endpoint per chain ID.
    pub nodes: HashMap<u64, Url>,
    pub oneinch: oneinch::Config,
    pub pendle: pendle::Config,
    pub kyberswap: kyberswap::Config,
}

