//! Calldata builder for Uniswap V2 liquidity
//!
//! `UniswapAmmAdapter` never sends anything. It checks the pool against the
//! factory, then encodes a Router02 `addLiquidity` or `removeLiquidity` call
//! for the caller to submit. All pricing and reserve accounting stays with
//! the router at execution time.

use super::registry::{PoolRegistry, Web3PoolRegistry};
use crate::client::Web3;
use crate::config::AdapterConfig;
use crate::jsonrpc::error::Web3Error;
use amm_codec::abi::{encode_call, AbiToken};
use amm_codec::{Address, Error as CodecError, Uint256};
use std::collections::BTreeSet;
use std::fmt;

lazy_static! {
    /// Uniswap V2's Router02 interface for swapping tokens, from prod Ethereum
    pub static ref UNISWAP_V2_ROUTER_ADDRESS: Address =
        Address::parse_and_validate("0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D").unwrap();
    /// Uniswap V2's Factory, which deploys and indexes every pair
    pub static ref UNISWAP_V2_FACTORY_ADDRESS: Address =
        Address::parse_and_validate("0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f").unwrap();
    /// The Wrapped Ether's address, on prod Ethereum
    pub static ref WETH_CONTRACT_ADDRESS: Address =
        Address::parse_and_validate("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2").unwrap();
}

pub const ADD_LIQUIDITY_SIGNATURE: &str =
    "addLiquidity(address,address,uint256,uint256,uint256,uint256,address,uint256)";
pub const REMOVE_LIQUIDITY_SIGNATURE: &str =
    "removeLiquidity(address,address,uint256,uint256,uint256,address,uint256)";

/// A call ready to be submitted, always addressed to the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalldataPayload {
    pub target: Address,
    /// Ether to attach, zero for every call this adapter builds
    pub value: Uint256,
    pub data: Vec<u8>,
}

/// Errors returned by `UniswapAmmAdapter`, any of them means no transaction
/// should be submitted
#[derive(Debug)]
pub enum AmmAdapterError {
    /// The address is not a pair deployed by the configured factory
    InvalidPool(Address),
    /// The pool is genuine but holds a different pair of tokens
    PairMismatch {
        pool: Address,
        expected: [Address; 2],
        found: (Address, Address),
    },
    /// This adapter can not build the requested kind of call
    UnsupportedOperation(&'static str),
    /// The ledger could not be queried
    Registry(Web3Error),
    Codec(CodecError),
}

impl fmt::Display for AmmAdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmmAdapterError::InvalidPool(pool) => write!(f, "{pool} is not a valid pool"),
            AmmAdapterError::PairMismatch {
                pool,
                expected,
                found,
            } => write!(
                f,
                "Pool {pool} holds {} and {}, expected {} and {}",
                found.0, found.1, expected[0], expected[1]
            ),
            AmmAdapterError::UnsupportedOperation(op) => {
                write!(f, "Unsupported operation: {op}")
            }
            AmmAdapterError::Registry(e) => write!(f, "Failed to query pool registry {e}"),
            AmmAdapterError::Codec(e) => write!(f, "Failed to encode calldata {e}"),
        }
    }
}

impl std::error::Error for AmmAdapterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AmmAdapterError::Registry(inner) => Some(inner),
            AmmAdapterError::Codec(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<Web3Error> for AmmAdapterError {
    fn from(e: Web3Error) -> Self {
        AmmAdapterError::Registry(e)
    }
}

impl From<CodecError> for AmmAdapterError {
    fn from(e: CodecError) -> Self {
        AmmAdapterError::Codec(e)
    }
}

/// Builds Router02 liquidity calls for pools of one Uniswap V2 deployment
#[derive(Clone)]
pub struct UniswapAmmAdapter<R: PoolRegistry = Web3PoolRegistry> {
    config: AdapterConfig,
    registry: R,
}

impl UniswapAmmAdapter<Web3PoolRegistry> {
    /// Creates an adapter that reads pools from the chain `web3` is connected to
    pub fn connect(web3: Web3, config: AdapterConfig) -> Self {
        let registry = Web3PoolRegistry::new(web3, config.factory);
        Self::new(config, registry)
    }
}

impl<R: PoolRegistry> UniswapAmmAdapter<R> {
    pub fn new(config: AdapterConfig, registry: R) -> Self {
        UniswapAmmAdapter { config, registry }
    }

    pub fn get_config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn get_registry(&self) -> &R {
        &self.registry
    }

    pub fn get_router(&self) -> Address {
        self.config.router
    }

    pub fn get_factory(&self) -> Address {
        self.config.factory
    }

    /// The address that must be approved to pull tokens, which for Uniswap V2
    /// is the router no matter the token. The token argument is kept for
    /// adapters whose spender varies by asset
    pub fn get_spender_address(&self, _token: Address) -> Address {
        self.config.router
    }

    /// True if `pool` is a pair deployed by the configured factory. Does not
    /// look at which tokens the pool holds
    pub async fn is_valid_pool(&self, pool: Address) -> Result<bool, AmmAdapterError> {
        Ok(self.get_factory_pool_tokens(pool).await?.is_some())
    }

    /// Returns `(token0, token1)` of `pool` if and only if the factory
    /// reports `pool` as the pair for exactly those tokens
    async fn get_factory_pool_tokens(
        &self,
        pool: Address,
    ) -> Result<Option<(Address, Address)>, AmmAdapterError> {
        let tokens = match self.registry.get_pool_tokens(pool).await? {
            Some(tokens) => tokens,
            None => return Ok(None),
        };
        let pair = self.registry.get_pair(tokens.0, tokens.1).await?;
        trace!("factory pair for {:?} is {:?}", tokens, pair);
        if pair == Some(pool) {
            Ok(Some(tokens))
        } else {
            Ok(None)
        }
    }

    /// Rejects `pool` unless it is a factory pair holding exactly `assets`,
    /// in any order
    async fn check_pool(
        &self,
        pool: Address,
        assets: [Address; 2],
    ) -> Result<(), AmmAdapterError> {
        let found = match self.get_factory_pool_tokens(pool).await? {
            Some(tokens) => tokens,
            None => {
                info!("Rejecting {}, not a pool of factory {}", pool, self.config.factory);
                return Err(AmmAdapterError::InvalidPool(pool));
            }
        };
        let requested: BTreeSet<Address> = assets.iter().copied().collect();
        let held: BTreeSet<Address> = [found.0, found.1].iter().copied().collect();
        if requested != held {
            info!("Rejecting {}, holds {:?} not {:?}", pool, found, assets);
            return Err(AmmAdapterError::PairMismatch {
                pool,
                expected: assets,
                found,
            });
        }
        Ok(())
    }

    /// Encodes `addLiquidity` for the given tokens and desired amounts without
    /// checking the pool
    pub fn encode_add_liquidity(
        &self,
        assets: [Address; 2],
        amounts: [Uint256; 2],
    ) -> Result<CalldataPayload, AmmAdapterError> {
        let tokens = [
            AbiToken::Address(assets[0]),
            AbiToken::Address(assets[1]),
            AbiToken::Uint(amounts[0]),
            AbiToken::Uint(amounts[1]),
            // minimum amounts, the pool's current ratio decides what is taken
            AbiToken::Uint(0u8.into()),
            AbiToken::Uint(0u8.into()),
            AbiToken::Address(self.config.recipient),
            AbiToken::Uint(self.config.deadline),
        ];
        self.router_call(ADD_LIQUIDITY_SIGNATURE, &tokens)
    }

    /// Encodes `removeLiquidity` burning `liquidity` pool tokens for at least
    /// `min_amounts` of each asset, without checking the pool
    pub fn encode_remove_liquidity(
        &self,
        assets: [Address; 2],
        min_amounts: [Uint256; 2],
        liquidity: Uint256,
    ) -> Result<CalldataPayload, AmmAdapterError> {
        let tokens = [
            AbiToken::Address(assets[0]),
            AbiToken::Address(assets[1]),
            AbiToken::Uint(liquidity),
            AbiToken::Uint(min_amounts[0]),
            AbiToken::Uint(min_amounts[1]),
            AbiToken::Address(self.config.recipient),
            AbiToken::Uint(self.config.deadline),
        ];
        self.router_call(REMOVE_LIQUIDITY_SIGNATURE, &tokens)
    }

    fn router_call(
        &self,
        signature: &str,
        tokens: &[AbiToken],
    ) -> Result<CalldataPayload, AmmAdapterError> {
        let data = encode_call(signature, tokens)?;
        trace!("payload is {:02X?}", data);
        Ok(CalldataPayload {
            target: self.config.router,
            value: 0u8.into(),
            data,
        })
    }

    /// Builds the router call depositing `amounts` of `assets` into `pool`
    ///
    /// # Arguments
    ///
    /// * `pool` - The pair to provide to, must be deployed by the configured factory
    /// * `assets` - The two tokens of the pair, in any order
    /// * `amounts` - The desired deposit of each token, in the same order as `assets`
    /// * `min_liquidity_out` - The liquidity the caller expects in return. Router02
    ///   has no argument for it, so it is only logged and never enforced
    ///
    /// The encoded `amountAMin` and `amountBMin` are both zero, so the returned
    /// call carries no minimum amount protection. Whatever ratio the pool has
    /// when the transaction executes decides how much of each token is taken.
    pub async fn get_provide_liquidity_calldata(
        &self,
        pool: Address,
        assets: [Address; 2],
        amounts: [Uint256; 2],
        min_liquidity_out: Uint256,
    ) -> Result<CalldataPayload, AmmAdapterError> {
        self.check_pool(pool, assets).await?;
        debug!(
            "Providing {} {} and {} {} to {}, expecting at least {} liquidity",
            amounts[0], assets[0], amounts[1], assets[1], pool, min_liquidity_out
        );
        self.encode_add_liquidity(assets, amounts)
    }

    /// Builds the router call burning `liquidity` pool tokens of `pool`
    ///
    /// # Arguments
    ///
    /// * `pool` - The pair to withdraw from, must be deployed by the configured factory
    /// * `assets` - The two tokens of the pair, in any order
    /// * `amounts` - The minimum of each token to receive, in the same order as `assets`
    /// * `liquidity` - The amount of pool tokens to burn
    pub async fn get_remove_liquidity_calldata(
        &self,
        pool: Address,
        assets: [Address; 2],
        amounts: [Uint256; 2],
        liquidity: Uint256,
    ) -> Result<CalldataPayload, AmmAdapterError> {
        self.check_pool(pool, assets).await?;
        debug!(
            "Removing {} liquidity from {}, expecting at least {} {} and {} {}",
            liquidity, pool, amounts[0], assets[0], amounts[1], assets[1]
        );
        self.encode_remove_liquidity(assets, amounts, liquidity)
    }

    /// Uniswap V2 pairs only accept both tokens at once
    pub fn get_provide_liquidity_single_asset_calldata(
        &self,
        _pool: Address,
        _asset: Address,
        _amount: Uint256,
        _min_liquidity_out: Uint256,
    ) -> Result<CalldataPayload, AmmAdapterError> {
        Err(AmmAdapterError::UnsupportedOperation(
            "single asset liquidity provision",
        ))
    }

    /// Uniswap V2 pairs always return both tokens on withdrawal
    pub fn get_remove_liquidity_single_asset_calldata(
        &self,
        _pool: Address,
        _asset: Address,
        _liquidity: Uint256,
        _min_amount_out: Uint256,
    ) -> Result<CalldataPayload, AmmAdapterError> {
        Err(AmmAdapterError::UnsupportedOperation(
            "single asset liquidity removal",
        ))
    }
}
