//! Solidity interfaces and well-known deployments of every contract that a
//! batch reads from or encodes calls for.
//!
//! Only the functions that are actually used are declared; the generated
//! `*Call` types provide selectors, ABI encoding of arguments and decoding of
//! return data.

pub mod addresses;
pub mod networks;

#[macro_export]
macro_rules! bindings {
    ($contract:ident { $($body:tt)* }) => {
        // Generate the interface in a nested module of the same name so that
        // all call types can be re-exported next to it.
        #[allow(non_snake_case)]
        pub mod $contract {
            alloy::sol! {
                #[allow(missing_docs)]
                #[sol(all_derives)]
                interface $contract {
                    $($body)*
                }
            }

            pub use self::$contract::*;
        }
    };
}

// Tokens

crate::bindings!(IERC20 {
    function name() external view returns (string);
    function symbol() external view returns (string);
    function decimals() external view returns (uint8);
    function totalSupply() external view returns (uint256);
    function balanceOf(address owner) external view returns (uint256);
    function allowance(address owner, address spender) external view returns (uint256);
    function approve(address spender, uint256 amount) external returns (bool);
    function transfer(address to, uint256 amount) external returns (bool);
});

// Liquid staking

crate::bindings!(Lido {
    function submit(address referral) external payable returns (uint256);
});

crate::bindings!(WstETH {
    function wrap(uint256 stETHAmount) external returns (uint256);
    function getWstETHByStETH(uint256 stETHAmount) external view returns (uint256);
});

crate::bindings!(EtherFiLiquidityPool {
    function deposit() external payable returns (uint256);
    function deposit(address referral) external payable returns (uint256);
    function amountForShare(uint256 share) external view returns (uint256);
});

crate::bindings!(WeETH {
    function wrap(uint256 eETHAmount) external returns (uint256);
    function getWeETHByeETH(uint256 eETHAmount) external view returns (uint256);
});

crate::bindings!(EtherFiLiquidVault {
    function multiAssetDeposit(address asset, uint256 amount, address receiver) external returns (uint256);
});

crate::bindings!(ZircuitRestakingPool {
    function depositFor(address token, address receiver, uint256 amount) external;
});

crate::bindings!(GenesisRestakingPool {
    function stake(bytes32 referral) external payable;
});

crate::bindings!(GenETH {
    function convertToShares(uint256 assets) external view returns (uint256);
});

// Lending

crate::bindings!(AavePool {
    function supply(address asset, uint256 amount, address onBehalfOf, uint16 referralCode) external;
    function getUserEMode(address user) external view returns (uint256);
    function setUserEMode(uint8 categoryId) external;
});

crate::bindings!(AaveWrappedTokenGateway {
    function depositETH(address pool, address onBehalfOf, uint16 referralCode) external payable;
    function borrowETH(address pool, uint256 amount, uint256 interestRateMode, uint16 referralCode) external;
});

crate::bindings!(AaveDebtToken {
    function approveDelegation(address delegatee, uint256 amount) external;
    function borrowAllowance(address fromUser, address toUser) external view returns (uint256);
});

crate::bindings!(PriceFeed {
    function latestAnswer() external view returns (int256);
});

// Vaults

crate::bindings!(MorphoBundler {
    function multicall(bytes[] data) external payable;
    function wrapNative(uint256 amount) external payable;
    function erc4626Deposit(address vault, uint256 assets, uint256 minShares, address receiver) external payable;
});

crate::bindings!(MetaMorpho {
    function asset() external view returns (address);
    function totalSupply() external view returns (uint256);
    function totalAssets() external view returns (uint256);
    function DECIMALS_OFFSET() external view returns (uint8);
});

crate::bindings!(YearnVault {
    function deposit(uint256 assets, address receiver) external returns (uint256);
    function redeem(uint256 shares, address receiver, address owner, uint256 max_loss) external returns (uint256);
    function pricePerShare() external view returns (uint256);
});

// Concentrated liquidity

crate::bindings!(UniswapV3Pool {
    function slot0() external view returns (
        uint160 sqrtPriceX96,
        int24 tick,
        uint16 observationIndex,
        uint16 observationCardinality,
        uint16 observationCardinalityNext,
        uint8 feeProtocol,
        bool unlocked
    );
    function tickSpacing() external view returns (int24);
});

crate::bindings!(NonfungiblePositionManager {
    struct MintParams {
        address token0;
        address token1;
        uint24 fee;
        int24 tickLower;
        int24 tickUpper;
        uint256 amount0Desired;
        uint256 amount1Desired;
        uint256 amount0Min;
        uint256 amount1Min;
        address recipient;
        uint256 deadline;
    }

    function mint(MintParams params) external payable returns (
        uint256 tokenId,
        uint128 liquidity,
        uint256 amount0,
        uint256 amount1
    );
});

crate::bindings!(GammaUniProxy {
    function getDepositAmount(address pos, address token, uint256 deposit) external view returns (
        uint256 amountStart,
        uint256 amountEnd
    );
    function deposit(uint256 deposit0, uint256 deposit1, address to, address pos, uint256[4] minIn) external returns (uint256 shares);
});

crate::bindings!(GammaHypervisor {
    function token0() external view returns (address);
    function token1() external view returns (address);
    function currentTick() external view returns (int24 tick);
    function PRECISION() external view returns (uint256);
    function getTotalAmounts() external view returns (uint256 total0, uint256 total1);
    function totalSupply() external view returns (uint256);
    function decimals() external view returns (uint8);
});

// Bridges

crate::bindings!(ArbitrumGatewayRouter {
    function outboundTransfer(
        address token,
        address to,
        uint256 amount,
        uint256 maxGas,
        uint256 gasPriceBid,
        bytes data
    ) external payable returns (bytes);
});

crate::bindings!(ArbitrumERC20Gateway {
    function getOutboundCalldata(
        address token,
        address from,
        address to,
        uint256 amount,
        bytes data
    ) external view returns (bytes);
});

crate::bindings!(ArbitrumInbox {
    function calculateRetryableSubmissionFee(uint256 dataLength, uint256 baseFee) external view returns (uint256);
});

// NFTs

crate::bindings!(ZoraCreator1155 {
    function mintWithRewards(
        address minter,
        uint256 tokenId,
        uint256 quantity,
        bytes minterArguments,
        address mintReferral
    ) external payable;
});

crate::bindings!(ZoraFixedPriceSaleStrategy {
    struct SalesConfig {
        uint64 saleStart;
        uint64 saleEnd;
        uint64 maxTokensPerAddress;
        uint96 pricePerToken;
        address fundsRecipient;
    }

    function sale(address tokenContract, uint256 tokenId) external view returns (SalesConfig);
});

// Scroll DEXs

crate::bindings!(SyncSwapPoolFactory {
    function getPool(address tokenA, address tokenB) external view returns (address);
});

crate::bindings!(SyncSwapPool {
    function getAmountOut(address tokenIn, uint256 amountIn, address sender) external view returns (uint256);
});

crate::bindings!(SyncSwapRouter {
    struct SwapStep {
        address pool;
        bytes data;
        address callback;
        bytes callbackData;
    }

    struct SwapPath {
        SwapStep[] steps;
        address tokenIn;
        uint256 amountIn;
    }

    function swap(SwapPath[] paths, uint256 amountOutMin, uint256 deadline) external payable;
});

crate::bindings!(UniswapV2Router {
    function getAmountsOut(uint256 amountIn, address[] path) external view returns (uint256[] amounts);
    function swapExactTokensForETH(
        uint256 amountIn,
        uint256 amountOutMin,
        address[] path,
        address to,
        uint256 deadline
    ) external returns (uint256[] amounts);
});

crate::bindings!(PenpadStaking {
    function stake() external payable;
});

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::{
            primitives::{Address, U256},
            sol_types::SolCall,
        },
        hex_literal::hex,
    };

    #[test]
    fn selectors() {
        assert_eq!(IERC20::approveCall::SELECTOR, hex!("095ea7b3"));
        assert_eq!(IERC20::transferCall::SELECTOR, hex!("a9059cbb"));
        assert_eq!(IERC20::allowanceCall::SELECTOR, hex!("dd62ed3e"));
        assert_eq!(IERC20::balanceOfCall::SELECTOR, hex!("70a08231"));
        assert_eq!(Lido::submitCall::SELECTOR, hex!("a1903eab"));
        assert_eq!(WstETH::wrapCall::SELECTOR, hex!("ea598cb0"));
        assert_eq!(EtherFiLiquidityPool::deposit_0Call::SELECTOR, hex!("d0e30db0"));
        assert_eq!(UniswapV3Pool::slot0Call::SELECTOR, hex!("3850c7bd"));
        assert_eq!(NonfungiblePositionManager::mintCall::SELECTOR, hex!("88316456"));
        assert_eq!(MorphoBundler::multicallCall::SELECTOR, hex!("ac9650d8"));
        assert_eq!(
            UniswapV2Router::swapExactTokensForETHCall::SELECTOR,
            hex!("18cbafe5")
        );
    }

    #[test]
    fn encodes_arguments_in_order() {
        let spender = Address::repeat_byte(0x11);
        let data = IERC20::approveCall {
            spender,
            amount: U256::from(42),
        }
        .abi_encode();

        assert_eq!(data.len(), 4 + 32 * 2);
        assert_eq!(&data[..4], IERC20::approveCall::SELECTOR.as_slice());
        assert_eq!(&data[16..36], spender.as_slice());
        assert_eq!(U256::from_be_slice(&data[36..68]), U256::from(42));
    }
}
