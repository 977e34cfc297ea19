//! Fixtures for rendering cases against a mocked node and mocked aggregator
//! APIs.

use {
    crate::{
        domain::Context,
        infra::{blockchain::MockNode, config, dex::Dexes},
    },
    alloy::primitives::{Address, address},
    chrono::{DateTime, TimeZone, Utc},
    std::{net::SocketAddr, sync::Arc},
};

pub mod mock;

/// The account cases are rendered for.
pub const ACCOUNT: Address = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

/// Fixed render time.
pub fn now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

/// A mainnet render context. Aggregator APIs are not reachable.
pub fn context(node: MockNode, inputs: &[&str]) -> Context {
    build(node, config::file::from_str("").unwrap(), inputs)
}

/// A mainnet render context with all aggregator APIs served by the mock at
/// `api`, each under its own path prefix.
pub fn context_with_api(node: MockNode, api: SocketAddr, inputs: &[&str]) -> Context {
    build(node, config(api), inputs)
}

/// Configuration pointing the aggregator clients at the mock API.
pub fn config(api: SocketAddr) -> config::Config {
    config::file::from_str(&format!(
        r#"
        [oneinch]
        endpoint = "http://{api}/oneinch/"

        [pendle]
        endpoint = "http://{api}/pendle/"

        [kyberswap]
        endpoint = "http://{api}/kyberswap/"
        client-id = "tests"
        "#
    ))
    .unwrap()
}

fn build(node: MockNode, config: config::Config, inputs: &[&str]) -> Context {
    observe::tracing::initialize_reentrant("batch_cases=trace");
    Context {
        account: ACCOUNT,
        chain_id: contracts::networks::MAINNET,
        inputs: inputs.iter().map(|input| Some(input.to_string())).collect(),
        node: Arc::new(node),
        dexes: Arc::new(Dexes::new(&config).unwrap()),
        now: now(),
    }
}
