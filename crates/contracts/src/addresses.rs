//! Well-known deployments, grouped by protocol.

use {
    crate::networks::*,
    alloy::primitives::{Address, address},
    std::{collections::HashMap, sync::LazyLock},
};

/// Sentinel used by aggregators for the chain's native token.
pub const NATIVE_TOKEN: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Account credited in protocol referral programs.
pub const REFERRAL: Address = address!("80011844928B469EAc5E4bC7e6EBA9b3C2Fa1b41");

pub mod oneinch {
    use super::*;

    /// Aggregation router v6, deployed at the same address on most chains.
    pub const ROUTER_V6: Address = address!("111111125421ca6dc452d289314280a0f8842a65");

    static ROUTERS: LazyLock<HashMap<u64, Address>> = LazyLock::new(|| {
        let mut routers = maplit::hashmap! {
            ZKSYNC_ERA => address!("6fd4383cb451173d5f9304f041c7bcbf27d561ff"),
        };
        for chain in [
            MAINNET,
            ARBITRUM_ONE,
            AVALANCHE,
            BASE,
            BNB,
            OPTIMISM,
            POLYGON,
            FANTOM,
            GNOSIS,
            KLAYTN,
            AURORA,
        ] {
            routers.insert(chain, ROUTER_V6);
        }
        routers
    });

    /// The aggregation router for a chain, `None` where 1inch is not
    /// deployed.
    pub fn router(chain_id: u64) -> Option<Address> {
        ROUTERS.get(&chain_id).copied()
    }
}

pub mod ethereum {
    use super::*;

    pub const USDC: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
    pub const USDT: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");
    pub const DAI: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");

    pub const LIDO_STETH: Address = address!("ae7ab96520DE3A18E5e111B5EaAb095312D7fE84");
    pub const LIDO_WSTETH: Address = address!("7f39C581F595B53c5cb19bD0b3f8dA6c935E2Ca0");

    pub const ETHER_FI_LIQUIDITY_POOL: Address =
        address!("308861A430be4cce5502d0A12724771Fc6DaF216");
    pub const ETHER_FI_EETH: Address = address!("35fA164735182de50811E8e2E824cFb9B6118ac2");
    pub const ETHER_FI_WEETH: Address = address!("Cd5fE23C85820F7B72D0926FC9b05b43E359b7ee");
    pub const ETHER_FI_LIQUID_VAULT: Address =
        address!("eA1A6307D9b18F8d1cbf1c3Dd6aad8416C06a221");

    pub const ZIRCUIT_RESTAKING_POOL: Address =
        address!("F047ab4c75cebf0eB9ed34Ae2c186f3611aEAfa6");

    pub const AAVE_POOL: Address = address!("87870Bca3F3fD6335C3F4ce8392D69350B4fA4E2");
    pub const AAVE_WETH_GATEWAY: Address = address!("893411580e590D62dDBca8a703d61Cc4A8c7b2b9");
    pub const AAVE_VARIABLE_DEBT_WETH: Address =
        address!("eA51d7853EEFb32b6ee06b1C12E6dcCA88Be0fFE");

    pub const CHAINLINK_ETH_USD: Address = address!("5f4eC3Df9cbd43714FE2740f5E3616155c5b8419");
    pub const CHAINLINK_USDC_USD: Address = address!("736bF902680e68989886e9807CD7Db4B3E015d3C");
    pub const CHAINLINK_USDT_USD: Address = address!("C26D4a1c46d884cfF6dE9800B6aE7A8Cf48B4Ff8");

    pub const MORPHO_BUNDLER: Address = address!("4095F064B8d3c3548A3bebfd0Bbfd04750E30077");
    pub const MORPHO_GAUNTLET_WETH_PRIME: Address =
        address!("2371e134e3455e0593363cBF89d3b6cf53740618");
    pub const MORPHO_RE7_WETH: Address = address!("78Fc2c2eD1A4cDb5402365934aE5648aDAd094d0");
    pub const MORPHO_GAUNTLET_LRT_CORE: Address =
        address!("4881Ef0BF6d2365D3dd6499ccd7532bcdBCE0658");
    pub const MORPHO_GAUNTLET_USDT_PRIME: Address =
        address!("8CB3649114051cA5119141a34C200D65dc0Faa73");
    pub const MORPHO_GAUNTLET_DAI_CORE: Address =
        address!("500331c9fF24D9d11aee6B07734Aa72343EA74a5");
    pub const MORPHO_LEADBLOCK_USDC_RWA: Address =
        address!("4cA0E178c94f039d7F202E09d8d1a655Ed3fb6b6");

    pub const GENESIS_GENETH: Address = address!("f073bAC22DAb7FaF4a3Dd6c6189a70D54110525C");
    pub const GENESIS_RESTAKING_POOL: Address =
        address!("46199caa0e453971cedf97f926368d9e5415831a");
    pub const UNISWAP_V3_POSITION_MANAGER: Address =
        address!("c36442b4a4522e871399cd717abdd847ab11fe88");
    pub const UNISWAP_V3_WSTETH_GENETH_POOL: Address =
        address!("3c0a1a9e0e22b9acc9248d9f358286e9e9205b0a");

    pub const ARBITRUM_GATEWAY_ROUTER: Address =
        address!("72Ce9c846789fdB6fC1f34aC4AD25Dd9ef7031ef");
    pub const ARBITRUM_ERC20_GATEWAY: Address =
        address!("a3A7B6F88361F48403514059F1F16C8E78d60EeC");
    pub const ARBITRUM_INBOX: Address = address!("5aed5f8a1e3607476f1f81c3d8fe126deb0afe94");
}

pub mod polygon {
    use super::*;

    pub const USDT: Address = address!("c2132D05D31c914a87C6611C10748AEb04B58e8F");
    pub const USDC_E: Address = address!("2791Bca1f2de4661ED88A30C99A7a9449Aa84174");
    pub const DAI: Address = address!("8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063");
    pub const WETH: Address = address!("7ceB23fD6bC0adD59E62ac25578270cFf1b9f619");

    pub const YEARN_V3_DAI_A: Address = address!("90b2f54C6aDDAD41b8f6c4fCCd555197BC0F773B");
    pub const YEARN_V3_WETH: Address = address!("305F25377d0a39091e99B975558b1bdfC3975654");
    pub const YEARN_V3_USDC_E: Address = address!("A013Fbd4b711f9ded6fB09C1c0d358E2FbC2EAA0");
    pub const YEARN_V3_USDT: Address = address!("Bb287E6017d3DEb0e2E65061e8684eab21060123");
    pub const YEARN_V3_GAMMA_USDC_WETH_COMPOUNDER: Address =
        address!("54303F18161d9870b0fc66B88B0B129e8e5fF505");

    pub const GAMMA_UNI_PROXY: Address = address!("A42d55074869491D60Ac05490376B74cF19B00e6");
    pub const GAMMA_USDC_WETH_HYPERVISOR: Address =
        address!("3Cc20A6795c4b57d9817399F68E83e71C8626580");
}

pub mod arbitrum {
    use super::*;

    pub const USDE: Address = address!("5d3a1Ff2b6BAb83b63cd9AD0787074081a52ef34");
    pub const PENDLE_ROUTER: Address = address!("888888888889758F76e7103c6CbF23ABbF58F946");
    pub const PENDLE_SY_USDE: Address = address!("b3c24d9dccc2ec5f778742389ffe448e295b84e0");
    pub const PENDLE_SY_RSETH: Address = address!("f176fb51f4eb826136a54fdc71c50fcd2202e272");
    pub const PENDLE_SY_EZETH: Address = address!("0de802e3d6cc9145a150bbdc8da9f988a98c5202");
    pub const RSETH: Address = address!("4186BFC76E2E237523CBC30FD220FE055156b41F");
    pub const EZETH: Address = address!("2416092f143378750bb29b79eD961ab195CcEea5");
}

pub mod zora {
    use super::*;

    pub const FIXED_PRICE_SALE_STRATEGY: Address =
        address!("04E2516A2c207E84a1839755675dfd8eF6302F0a");
    pub const ELEVEN_ELEVEN: Address = address!("051580e8a6da31c4bb48d02f3c22f1e99080b0f3");
    pub const ITS_A_FEELING: Address = address!("0bd0e83cbb9fb191daef14702a8c9fc3575a6ea8");
}

pub mod scroll {
    use super::*;

    pub const USDC: Address = address!("06eFdBFf2a14a7c8E15944D1F4A48F9F95F663A4");
    pub const WETH: Address = address!("5300000000000000000000000000000000000004");
    pub const SYNCSWAP_CLASSIC_POOL_FACTORY: Address =
        address!("37BAc764494c8db4e54BDE72f6965beA9fa0AC2d");
    pub const SYNCSWAP_ROUTER: Address = address!("80e38291e06339d10AAB483C65695D004dBD5C69");
    pub const SPACEFI_ROUTER: Address = address!("18b71386418A9FCa5Ae7165E31c385a5130011b6");
    pub const PENPAD_STAKING: Address = address!("8F53fA7928305Fd4f78c12BA9d9DE6B2420A2188");
    pub const KYBERSWAP_ROUTER: Address = address!("6131B5fae19EA4f9D964eAc0408E4408b66337b5");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oneinch_router_per_chain() {
        assert_eq!(
            oneinch::router(MAINNET),
            Some(address!("111111125421ca6dc452d289314280a0f8842a65"))
        );
        assert_eq!(
            oneinch::router(ZKSYNC_ERA),
            Some(address!("6fd4383cb451173d5f9304f041c7bcbf27d561ff"))
        );
        assert_eq!(oneinch::router(SCROLL), None);
    }
}
