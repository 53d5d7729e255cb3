use amm_codec::utils::{bytes_to_hex_str, hex_str_to_bytes};
use amm_codec::Address;
use num256::Uint256;
use serde::{Deserialize, Deserializer, Serializer};
use std::ops::Deref;

/// Serializes slice of data as "UNFORMATTED DATA" format required
/// by Ethereum JSONRPC API.
///
/// See more https://ethereum.org/en/developers/docs/apis/json-rpc/#hex-encoding
pub fn data_serialize<S>(x: &[u8], s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&format!("0x{}", bytes_to_hex_str(x)))
}

/// Deserializes slice of data as "UNFORMATTED DATA" format required
/// by Ethereum JSONRPC API. Every byte is two hex digits, so odd length
/// input is rejected.
pub fn data_deserialize<'de, D>(d: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    let digits = s.strip_prefix("0x").unwrap_or(&s);
    if digits.len() % 2 != 0 {
        return Err(serde::de::Error::custom(format!(
            "Odd number of hex digits in {s}"
        )));
    }
    hex_str_to_bytes(digits).map_err(serde::de::Error::custom)
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Data(
    #[serde(
        serialize_with = "data_serialize",
        deserialize_with = "data_deserialize"
    )]
    pub Vec<u8>,
);

impl Deref for Data {
    type Target = Vec<u8>;
    fn deref(&self) -> &Vec<u8> {
        &self.0
    }
}

impl From<Vec<u8>> for Data {
    fn from(v: Vec<u8>) -> Self {
        Data(v)
    }
}

/// A read only call against the chain, as accepted by eth_call. Only the
/// fields the adapter needs are modeled, omitted fields are left for the
/// node to fill in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    pub to: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Data>,
}

impl TransactionRequest {
    /// Creates a call request with mostly blank parameters, useful for quick simulations
    pub fn quick_tx(from: Option<Address>, to: Address, payload: Vec<u8>) -> TransactionRequest {
        TransactionRequest {
            from,
            to,
            data: Some(payload.into()),
        }
    }
}

/// Status of the node's sync process, a plain false when synced or an object
/// describing which blocks are syncing
#[derive(Serialize, Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum SyncingStatus {
    NotSyncing(bool),
    #[serde(rename_all = "camelCase")]
    Syncing {
        starting_block: Uint256,
        current_block: Uint256,
        highest_block: Uint256,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_request_serialization() {
        let to: Address = "0x5c69bee701ef814a2b6a3edd4b1652cb9cc5aa6f".parse().unwrap();
        let request = TransactionRequest::quick_tx(None, to, vec![0xe6, 0xa4, 0x39, 0x05]);
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"to":"0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f","data":"0xe6a43905"}"#
        );
    }

    #[test]
    fn data_roundtrip() {
        let data: Data = serde_json::from_str(r#""0xdeadbeef""#).unwrap();
        assert_eq!(*data, vec![0xde, 0xad, 0xbe, 0xef]);
        let empty: Data = serde_json::from_str(r#""0x""#).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn data_rejects_odd_length() {
        assert!(serde_json::from_str::<Data>(r#""0x123""#).is_err());
        assert!(serde_json::from_str::<Data>(r#""0x0""#).is_err());
        assert!(serde_json::from_str::<Data>(r#""0x0123""#).is_ok());
    }

    #[test]
    fn syncing_status() {
        let status: SyncingStatus = serde_json::from_str("false").unwrap();
        assert_eq!(status, SyncingStatus::NotSyncing(false));
        let status: SyncingStatus = serde_json::from_str(
            r#"{"startingBlock": "0x1", "currentBlock": "0x2", "highestBlock": "0x3"}"#,
        )
        .unwrap();
        assert!(matches!(status, SyncingStatus::Syncing { .. }));
    }
}
