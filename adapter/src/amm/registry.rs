//! Where the adapter learns about pools
//!
//! The factory and the pair contracts are external state the adapter can only
//! read. `PoolRegistry` is the seam between the two, `Web3PoolRegistry` asks a
//! node while `InMemoryPoolRegistry` answers from a fixed table.

use crate::client::Web3;
use crate::jsonrpc::error::Web3Error;
use crate::types::TransactionRequest;
use amm_codec::abi::{decode_address, encode_call, get_word, AbiToken};
use amm_codec::Address;
use futures::future::join;
use std::collections::HashMap;

/// Read access to a Uniswap V2 style factory and the pairs it deployed
#[allow(async_fn_in_trait)]
pub trait PoolRegistry {
    /// Looks up the pair the factory deployed for two tokens, in either order.
    /// `None` if the factory has no such pair
    async fn get_pair(&self, token_a: Address, token_b: Address)
        -> Result<Option<Address>, Web3Error>;

    /// Reads `(token0, token1)` from a pair contract. `None` if the address
    /// does not behave like a pair at all, for example a wallet
    async fn get_pool_tokens(&self, pool: Address)
        -> Result<Option<(Address, Address)>, Web3Error>;
}

/// A `PoolRegistry` backed by `eth_call` against a live node
#[derive(Clone)]
pub struct Web3PoolRegistry {
    web3: Web3,
    factory: Address,
    caller: Option<Address>,
}

impl Web3PoolRegistry {
    pub fn new(web3: Web3, factory: Address) -> Self {
        Web3PoolRegistry {
            web3,
            factory,
            caller: None,
        }
    }

    /// Sets the `from` of every call, some nodes refuse calls without one
    pub fn with_caller(mut self, caller: Address) -> Self {
        self.caller = Some(caller);
        self
    }

    pub fn get_factory(&self) -> Address {
        self.factory
    }

    /// Returns either token0 or token1 from a pair, depending on input
    async fn get_pool_token(
        &self,
        pool: Address,
        get_token_0: bool,
    ) -> Result<Option<Address>, Web3Error> {
        let token_name = if get_token_0 { "token0" } else { "token1" };
        let payload = encode_call(&format!("{token_name}()"), &[])?;
        let result = self
            .web3
            .eth_call(TransactionRequest::quick_tx(self.caller, pool, payload))
            .await;
        let token_result = match result {
            Ok(data) => data,
            Err(e) if e.is_execution_error() => {
                debug!("{} {}() reverted: {}", pool, token_name, e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        trace!("{} result: {:X?}", token_name, token_result.0);
        match get_word(&token_result, 0) {
            Ok(word) => Ok(Some(decode_address(word)?)),
            Err(_) => Ok(None),
        }
    }
}

impl PoolRegistry for Web3PoolRegistry {
    async fn get_pair(
        &self,
        token_a: Address,
        token_b: Address,
    ) -> Result<Option<Address>, Web3Error> {
        let tokens = [AbiToken::Address(token_a), AbiToken::Address(token_b)];
        let payload = encode_call("getPair(address,address)", &tokens)?;
        let pair_result = self
            .web3
            .eth_call(TransactionRequest::quick_tx(
                self.caller,
                self.factory,
                payload,
            ))
            .await?;
        trace!("getPair result is {:X?}", pair_result.0);
        let word = get_word(&pair_result, 0).map_err(|_| {
            Web3Error::BadResponse(format!(
                "Unexpected getPair response length {}",
                pair_result.len()
            ))
        })?;
        let pair = decode_address(word)?;
        if pair.is_zero() {
            Ok(None)
        } else {
            Ok(Some(pair))
        }
    }

    async fn get_pool_tokens(
        &self,
        pool: Address,
    ) -> Result<Option<(Address, Address)>, Web3Error> {
        if !self.web3.check_if_address_is_contract(pool).await? {
            debug!("{} has no code, not a pool", pool);
            return Ok(None);
        }
        let (token0, token1) = join(
            self.get_pool_token(pool, true),
            self.get_pool_token(pool, false),
        )
        .await;
        match (token0?, token1?) {
            (Some(token0), Some(token1)) => Ok(Some((token0, token1))),
            _ => Ok(None),
        }
    }
}

/// A `PoolRegistry` over a fixed set of pairs
#[derive(Debug, Default, Clone)]
pub struct InMemoryPoolRegistry {
    pairs: HashMap<(Address, Address), Address>,
    pools: HashMap<Address, (Address, Address)>,
}

/// Orders two tokens the way the factory does when it creates a pair
fn sort_tokens(token_a: Address, token_b: Address) -> (Address, Address) {
    if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

impl InMemoryPoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `pool` as the factory pair for the two tokens
    pub fn with_pair(mut self, token_a: Address, token_b: Address, pool: Address) -> Self {
        let tokens = sort_tokens(token_a, token_b);
        self.pairs.insert(tokens, pool);
        self.pools.insert(pool, tokens);
        self
    }

    /// Registers a contract that answers token0/token1 but was not deployed
    /// by the factory, such as a fork of the pair contract
    pub fn with_foreign_pool(mut self, token_a: Address, token_b: Address, pool: Address) -> Self {
        self.pools.insert(pool, sort_tokens(token_a, token_b));
        self
    }
}

impl PoolRegistry for InMemoryPoolRegistry {
    async fn get_pair(
        &self,
        token_a: Address,
        token_b: Address,
    ) -> Result<Option<Address>, Web3Error> {
        Ok(self.pairs.get(&sort_tokens(token_a, token_b)).copied())
    }

    async fn get_pool_tokens(
        &self,
        pool: Address,
    ) -> Result<Option<(Address, Address)>, Web3Error> {
        Ok(self.pools.get(&pool).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::test_node::{
        address_result, StubNode, ANY_CALL, GET_PAIR, POOL_CODE, TOKEN0, TOKEN1,
    };
    use actix::System;
    use std::time::Duration;

    fn address(last: u8) -> Address {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        Address::from(bytes)
    }

    #[test]
    fn in_memory_pairs_are_order_insensitive() {
        let registry = InMemoryPoolRegistry::new().with_pair(address(2), address(1), address(9));
        let runner = System::new();
        runner.block_on(async move {
            assert_eq!(
                registry.get_pair(address(1), address(2)).await.unwrap(),
                Some(address(9))
            );
            assert_eq!(
                registry.get_pair(address(2), address(1)).await.unwrap(),
                Some(address(9))
            );
            assert_eq!(registry.get_pair(address(1), address(3)).await.unwrap(), None);
            assert_eq!(
                registry.get_pool_tokens(address(9)).await.unwrap(),
                Some((address(1), address(2)))
            );
            assert_eq!(registry.get_pool_tokens(address(1)).await.unwrap(), None);
        })
    }

    #[test]
    fn foreign_pools_have_tokens_but_no_pair() {
        let registry =
            InMemoryPoolRegistry::new().with_foreign_pool(address(1), address(2), address(7));
        let runner = System::new();
        runner.block_on(async move {
            assert!(registry.get_pool_tokens(address(7)).await.unwrap().is_some());
            assert_eq!(registry.get_pair(address(1), address(2)).await.unwrap(), None);
        })
    }

    fn web3_registry(url: &str) -> Web3PoolRegistry {
        Web3PoolRegistry::new(Web3::new(url, Duration::from_secs(5)), address(100))
    }

    #[test]
    fn web3_registry_reads_pool_tokens() {
        let node = StubNode::new()
            .with_code(POOL_CODE)
            .with_call(TOKEN0, &address_result(address(1)))
            .with_call(TOKEN1, &address_result(address(2)));
        let url = node.url();
        let runner = System::new();
        runner.block_on(async move {
            let registry = web3_registry(&url);
            assert_eq!(
                registry.get_pool_tokens(address(9)).await.unwrap(),
                Some((address(1), address(2)))
            );
        })
    }

    #[test]
    fn web3_registry_address_without_code_is_not_a_pool() {
        let node = StubNode::new().with_code("0x");
        let url = node.url();
        let runner = System::new();
        runner.block_on(async move {
            let registry = web3_registry(&url);
            assert_eq!(registry.get_pool_tokens(address(9)).await.unwrap(), None);
        })
    }

    #[test]
    fn web3_registry_revert_is_not_a_pool() {
        let node = StubNode::new()
            .with_code(POOL_CODE)
            .with_call_error(ANY_CALL, 3, "execution reverted");
        let url = node.url();
        let runner = System::new();
        runner.block_on(async move {
            let registry = web3_registry(&url);
            assert_eq!(registry.get_pool_tokens(address(9)).await.unwrap(), None);
        })
    }

    #[test]
    fn web3_registry_short_result_is_not_a_pool() {
        let node = StubNode::new()
            .with_code(POOL_CODE)
            .with_call(TOKEN0, "0x")
            .with_call(TOKEN1, "0x0000");
        let url = node.url();
        let runner = System::new();
        runner.block_on(async move {
            let registry = web3_registry(&url);
            assert_eq!(registry.get_pool_tokens(address(9)).await.unwrap(), None);
        })
    }

    #[test]
    fn web3_registry_zero_pair_is_none() {
        let node = StubNode::new().with_call(GET_PAIR, &address_result(Address::default()));
        let url = node.url();
        let runner = System::new();
        runner.block_on(async move {
            let registry = web3_registry(&url);
            assert_eq!(registry.get_pair(address(1), address(2)).await.unwrap(), None);
        })
    }

    #[test]
    fn web3_registry_reads_pair() {
        let node = StubNode::new().with_call(GET_PAIR, &address_result(address(9)));
        let url = node.url();
        let runner = System::new();
        runner.block_on(async move {
            let registry = web3_registry(&url);
            assert_eq!(
                registry.get_pair(address(1), address(2)).await.unwrap(),
                Some(address(9))
            );
        })
    }

    #[test]
    fn web3_registry_short_pair_result_is_an_error() {
        let node = StubNode::new().with_call(GET_PAIR, "0x");
        let url = node.url();
        let runner = System::new();
        runner.block_on(async move {
            let registry = web3_registry(&url);
            assert!(matches!(
                registry.get_pair(address(1), address(2)).await,
                Err(Web3Error::BadResponse(_))
            ));
        })
    }

    #[test]
    fn web3_registry_rate_limit_is_an_error() {
        let node = StubNode::new()
            .with_code(POOL_CODE)
            .with_call_error(ANY_CALL, -32005, "request rate limited");
        let url = node.url();
        let runner = System::new();
        runner.block_on(async move {
            let registry = web3_registry(&url);
            assert!(matches!(
                registry.get_pool_tokens(address(9)).await,
                Err(Web3Error::JsonRpcError { code: -32005, .. })
            ));
            assert!(matches!(
                registry.get_pair(address(1), address(2)).await,
                Err(Web3Error::JsonRpcError { code: -32005, .. })
            ));
        })
    }

    #[test]
    fn web3_registry_code_lookup_failure_is_an_error() {
        let node = StubNode::new().with_code_error(-32000, "header not found");
        let url = node.url();
        let runner = System::new();
        runner.block_on(async move {
            let registry = web3_registry(&url);
            assert!(matches!(
                registry.get_pool_tokens(address(9)).await,
                Err(Web3Error::JsonRpcError { code: -32000, .. })
            ));
        })
    }

    #[test]
    fn web3_registry_unreachable_node_is_an_error() {
        let runner = System::new();
        runner.block_on(async move {
            let registry = web3_registry("http://127.0.0.1:1");
            assert!(matches!(
                registry.get_pool_tokens(address(9)).await,
                Err(Web3Error::FailedToSend(_))
            ));
        })
    }
}
