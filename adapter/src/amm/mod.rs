//! AMM (Automated Market Maker) adapters
//!
//! This module builds calldata for providing and removing liquidity on
//! Uniswap V2 style pools, after checking the pool against its factory.

mod registry;
mod uniswapv2;

#[cfg(test)]
mod test_node;

pub use registry::{InMemoryPoolRegistry, PoolRegistry, Web3PoolRegistry};
pub use uniswapv2::{
    AmmAdapterError, CalldataPayload, UniswapAmmAdapter, ADD_LIQUIDITY_SIGNATURE,
    REMOVE_LIQUIDITY_SIGNATURE, UNISWAP_V2_FACTORY_ADDRESS, UNISWAP_V2_ROUTER_ADDRESS,
    WETH_CONTRACT_ADDRESS,
};
