//! # Introduction
//! Low-level Ethereum primitives for building AMM adapter calldata.
//!
//! ## Features
//! * 20 byte addresses with EIP-55 checksum parsing and display
//! * ABI encoding for the static types used by Uniswap V2 style routers
//!   (see `abi::AbiToken` variants)
//! * Word decoders for reading `address` call results
//!
//! ## Getting started
//! ```rust
//! use amm_codec::abi::{encode_call, AbiToken};
//! use amm_codec::Address;
//!
//! let token_a =
//!     Address::parse_and_validate("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2").unwrap();
//! let token_b: Address = "0x0aacfbec6a24756c20d41914f2caba817c0d8521".parse().unwrap();
//! let payload = encode_call(
//!     "getPair(address,address)",
//!     &[AbiToken::Address(token_a), AbiToken::Address(token_b)],
//! )
//! .unwrap();
//! assert_eq!(payload.len(), 4 + 2 * 32);
//! ```

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

extern crate num256;
extern crate serde;
extern crate sha3;

pub mod abi;
pub mod address;
pub mod error;
pub mod utils;

pub use address::Address;
pub use error::Error;
pub use num256::Uint256;
