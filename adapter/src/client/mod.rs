//! Byte-order safe and lightweight Web3 client.
//!
//! Only the read only part of the "eth" namespace is covered, the adapter
//! never signs or broadcasts anything. Requests are crafted by hand on top
//! of `jsonrpc::client::HttpClient`.

pub mod core;
pub mod query;

// The actual Web3 client is defined in core.rs, export here
pub use self::core::Web3;

#[test]
#[ignore]
fn test_chain_id() {
    use actix::System;
    use std::time::Duration;
    let runner = System::new();
    // a mainnet fork started with `npx hardhat node --fork <mainnet rpc>`
    let web3 = Web3::new("http://localhost:8545", Duration::from_secs(30));
    runner.block_on(async move {
        assert!(web3.eth_chainid().await.unwrap() > 0);
        assert!(!web3.eth_syncing().await.unwrap());
    })
}
