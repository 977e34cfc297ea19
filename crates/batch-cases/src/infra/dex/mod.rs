//! Clients for the aggregator APIs cases delegate routing and pricing to.

pub mod kyberswap;
pub mod oneinch;
pub mod pendle;

pub use self::{kyberswap::KyberSwap, oneinch::OneInch, pendle::Pendle};

/// All aggregator clients, shared by every case render.
pub struct Dexes {
    pub oneinch: OneInch,
    pub pendle: Pendle,
    pub kyberswap: KyberSwap,
}

impl Dexes {
    pub fn new(config: &crate::infra::Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            oneinch: OneInch::new(config.oneinch.clone())?,
            pendle: Pendle::new(config.pendle.clone())?,
            kyberswap: KyberSwap::new(config.kyberswap.clone())?,
        })
    }
}

/// Tags each outgoing request with a process-wide ID so that the trace logs
/// of one API round trip can be correlated.
fn request_id() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    static ID: AtomicU64 = AtomicU64::new(0);
    ID.fetch_add(1, Ordering::Relaxed)
}
