use crate::utils::{bytes_to_hex_str, hex_str_to_bytes};
use crate::Error;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// Length of an Ethereum address in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// Representation of an Ethereum address.
///
/// Used both for token contracts and for pools, the adapter does not
/// distinguish between the two until a pool has been validated on chain.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Get raw bytes of the address.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Creates an address from a slice, which must be exactly 20 bytes long
    pub fn from_slice(data: &[u8]) -> Result<Address, Error> {
        if data.len() != ADDRESS_LENGTH {
            return Err(Error::InvalidAddressLength {
                got: data.len(),
                expected: ADDRESS_LENGTH,
            });
        }
        let mut result = [0u8; ADDRESS_LENGTH];
        result.copy_from_slice(data);
        Ok(Address(result))
    }

    /// Returns true if this is the all zero address
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LENGTH]
    }

    /// Parses an address and, if the input is mixed case, checks it against
    /// the EIP-55 checksum. All lowercase or all uppercase input carries no
    /// checksum and is accepted as is.
    pub fn parse_and_validate(input: &str) -> Result<Address, Error> {
        let address: Address = input.parse()?;
        let hex = input.strip_prefix("0x").unwrap_or(input);
        let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && hex != address.to_eip55_hex() {
            return Err(Error::InvalidEip55);
        }
        Ok(address)
    }

    /// The EIP-55 checksummed hex form of this address without the 0x prefix
    fn to_eip55_hex(self) -> String {
        let lower = bytes_to_hex_str(&self.0);
        let digest = Keccak256::digest(lower.as_bytes());
        lower
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let nibble = if i % 2 == 0 {
                    digest[i / 2] >> 4
                } else {
                    digest[i / 2] & 0x0f
                };
                if c.is_ascii_alphabetic() && nibble >= 8 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect()
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(val: [u8; ADDRESS_LENGTH]) -> Address {
        Address(val)
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Parses a string into an Ethereum address, with or without the 0x
    /// prefix. No checksum validation is done here, see `parse_and_validate`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() != ADDRESS_LENGTH * 2 {
            return Err(Error::InvalidAddressLength {
                got: s.len() / 2,
                expected: ADDRESS_LENGTH,
            });
        }
        Address::from_slice(&hex_str_to_bytes(s)?)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_eip55_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::parse_and_validate(&s).map_err(serde::de::Error::custom)
    }
}
