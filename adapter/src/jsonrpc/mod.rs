//! Minimal JSON-RPC 2.0 plumbing used to reach the ledger

pub mod client;
pub mod error;
pub mod request;
pub mod response;
