use crate::jsonrpc::error::Web3Error;
use crate::types::{Data, SyncingStatus, TransactionRequest};
use amm_codec::Address;

use super::core::Web3;

// The query-only part of the "eth" namespace of the Web3 API

impl Web3 {
    /// Returns the EIP155 chain ID of the connected node
    pub async fn eth_chainid(&self) -> Result<u64, Web3Error> {
        let ret: String = self
            .jsonrpc_client
            .request_method("eth_chainId", Vec::<String>::new(), self.timeout)
            .await?;
        // there is no actually specified maximum chain id, but u64 is much easier to handle
        Ok(u64::from_str_radix(ret.trim_start_matches("0x"), 16)?)
    }

    /// Returns a bool indicating whether our eth node is currently syncing or not
    pub async fn eth_syncing(&self) -> Result<bool, Web3Error> {
        let res: SyncingStatus = self
            .jsonrpc_client
            .request_method("eth_syncing", Vec::<String>::new(), self.timeout)
            .await?;
        match res {
            SyncingStatus::Syncing { .. } => Ok(true),
            SyncingStatus::NotSyncing(..) => Ok(false),
        }
    }

    /// Executes a read only call against the latest block. A node that is still
    /// syncing would answer with stale state, so the call is refused instead
    pub async fn eth_call(&self, transaction: TransactionRequest) -> Result<Data, Web3Error> {
        match self.eth_syncing().await? {
            false => {
                self.jsonrpc_client
                    .request_method("eth_call", (transaction, "latest"), self.timeout)
                    .await
            }
            true => Err(Web3Error::SyncingNode(
                "Cannot perform eth_call".to_string(),
            )),
        }
    }

    /// Returns the code at a given address on the latest block
    /// If there is no code at the address, will return an empty Vec
    pub async fn eth_get_code(&self, address: Address) -> Result<Vec<u8>, Web3Error> {
        let res: Data = self
            .jsonrpc_client
            .request_method(
                "eth_getCode",
                vec![address.to_string(), "latest".to_string()],
                self.timeout,
            )
            .await?;
        Ok(res.0)
    }

    /// Checks if the provided address is a contract by checking if there is code at the address
    /// If there is code at the address it is a contract, if there is no code it is not a contract
    pub async fn check_if_address_is_contract(&self, address: Address) -> Result<bool, Web3Error> {
        let code = self.eth_get_code(address).await?;
        Ok(!code.is_empty())
    }
}
