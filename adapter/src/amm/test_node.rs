//! A canned JSON-RPC node for tests, answering by method and call selector

use amm_codec::utils::bytes_to_hex_str;
use amm_codec::Address;
use mockito::{Matcher, Mock, Server, ServerGuard};

pub const TOKEN0: &str = "0dfe1681";
pub const TOKEN1: &str = "d21220a7";
pub const GET_PAIR: &str = "e6a43905";
/// Matches every eth_call
pub const ANY_CALL: &str = "";

/// Some bytecode, enough for an address to count as a contract
pub const POOL_CODE: &str = "0x6080604052";

/// The ABI word returned by a function returning `address`
pub fn address_result(address: Address) -> String {
    format!("0x{:0>64}", bytes_to_hex_str(address.as_bytes()))
}

/// Must be created outside of the actix system, the mock server runs its own
/// runtime
pub struct StubNode {
    server: ServerGuard,
    // mocks are unregistered on drop
    mocks: Vec<Mock>,
}

impl StubNode {
    /// A synced node, with nothing else answered yet
    pub fn new() -> Self {
        let mut node = StubNode {
            server: Server::new(),
            mocks: Vec::new(),
        };
        node.respond("eth_syncing", None, r#""result":false"#.to_string());
        node
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    fn respond(&mut self, method: &str, selector: Option<&str>, answer: String) {
        let mut matchers = vec![Matcher::Regex(format!(r#""method":"{method}""#))];
        if let Some(selector) = selector {
            matchers.push(Matcher::Regex(format!(r#""data":"0x{selector}"#)));
        }
        let mock = self
            .server
            .mock("POST", "/")
            .match_body(Matcher::AllOf(matchers))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"jsonrpc":"2.0","id":1,{answer}}}"#))
            .create();
        self.mocks.push(mock);
    }

    /// Every address has `code`, "0x" for none
    pub fn with_code(mut self, code: &str) -> Self {
        self.respond("eth_getCode", None, format!(r#""result":"{code}""#));
        self
    }

    pub fn with_code_error(mut self, code: i64, message: &str) -> Self {
        self.respond("eth_getCode", None, error_answer(code, message));
        self
    }

    /// Calls starting with `selector` return `result`
    pub fn with_call(mut self, selector: &str, result: &str) -> Self {
        self.respond("eth_call", Some(selector), format!(r#""result":"{result}""#));
        self
    }

    /// Calls starting with `selector` fail with a JSON-RPC error
    pub fn with_call_error(mut self, selector: &str, code: i64, message: &str) -> Self {
        self.respond("eth_call", Some(selector), error_answer(code, message));
        self
    }
}

fn error_answer(code: i64, message: &str) -> String {
    format!(r#""error":{{"code":{code},"message":"{message}"}}"#)
}
