//! Static configuration of a `UniswapAmmAdapter`
//!
//! An adapter is bound to exactly one router/factory deployment. The config
//! also carries the two values the V2 router needs on every liquidity call
//! which the adapter's operations do not take as arguments: who receives the
//! output and until when the call is valid.

use crate::amm::{UNISWAP_V2_FACTORY_ADDRESS, UNISWAP_V2_ROUTER_ADDRESS};
use amm_codec::{Address, Uint256};
use num_traits::Bounded;

fn no_deadline() -> Uint256 {
    Uint256::max_value()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Router the calldata is built for, also the spender tokens must be approved to
    pub router: Address,
    /// Factory used to decide whether a pool is genuine
    pub factory: Address,
    /// Receives liquidity tokens on provide and the underlying tokens on remove
    pub recipient: Address,
    /// Unix timestamp after which the router rejects the call, defaults to never
    #[serde(default = "no_deadline")]
    pub deadline: Uint256,
}

impl AdapterConfig {
    pub fn new(router: Address, factory: Address, recipient: Address) -> Self {
        AdapterConfig {
            router,
            factory,
            recipient,
            deadline: no_deadline(),
        }
    }

    /// The canonical Uniswap V2 deployment on Ethereum mainnet
    pub fn mainnet(recipient: Address) -> Self {
        Self::new(
            *UNISWAP_V2_ROUTER_ADDRESS,
            *UNISWAP_V2_FACTORY_ADDRESS,
            recipient,
        )
    }

    pub fn with_deadline(mut self, deadline: Uint256) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}
