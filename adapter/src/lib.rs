#![warn(clippy::all)]
#![allow(clippy::pedantic)]

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

pub mod amm;
pub mod client;
pub mod config;
pub mod jsonrpc;
pub mod types;

pub use amm::{AmmAdapterError, CalldataPayload, UniswapAmmAdapter};
pub use config::AdapterConfig;
