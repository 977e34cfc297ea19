//! The catalog: every batch case that can be previewed and rendered.

use crate::domain::case::{Case, Link, Metadata, WalletType};

mod aave;
mod ether_fi;
mod gamma_yearn;
mod genesis_liquidity;
mod lido_multiplier;
mod morpho;
mod multi_sender;
mod pendle;
mod penpad;
mod yearn;
mod zircuit;
mod zora;

/// All cases, in the order they are listed.
pub fn all() -> Vec<Box<dyn Case>> {
    let mut cases: Vec<Box<dyn Case>> = vec![
        Box::new(zircuit::ZircuitEtherFi),
        Box::new(ether_fi::Liquid),
        Box::new(ether_fi::ArbitrumBridge),
        Box::new(lido_multiplier::LidoMultiplier),
        Box::new(aave::BorrowEth::usdc()),
        Box::new(aave::BorrowEth::usdt()),
        Box::new(aave::BorrowEthWithEth),
    ];
    cases.extend(
        morpho::all()
            .into_iter()
            .map(|case| Box::new(case) as Box<dyn Case>),
    );
    cases.push(Box::new(genesis_liquidity::GenesisLiquidity));
    cases.extend(
        yearn::all()
            .into_iter()
            .map(|case| Box::new(case) as Box<dyn Case>),
    );
    cases.extend([
        Box::new(yearn::Withdrawal) as Box<dyn Case>,
        Box::new(gamma_yearn::GammaYearn),
        Box::new(multi_sender::MultiSender),
        Box::new(pendle::Usde),
        Box::new(pendle::Points),
        Box::new(zora::MostMinted),
        Box::new(penpad::AirdropHunting),
    ]);
    cases
}

/// The case with the given ID.
pub fn find(id: &str) -> Option<Box<dyn Case>> {
    all().into_iter().find(|case| case.metadata().id == id)
}

/// Metadata every case starts from: curated by Bento Batch, atomic and
/// supported by both wallet types.
fn metadata(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    website: Link,
    network_id: u64,
) -> Metadata {
    Metadata {
        id,
        name,
        description,
        website,
        tags: vec![],
        curator_twitter: Metadata::curator(),
        protocols: vec![],
        attributes: vec![],
        network_id,
        atomic: true,
        render_expiry: None,
        supported_wallet_types: vec![WalletType::Aa, WalletType::Eoa],
        inputs: vec![],
    }
}
