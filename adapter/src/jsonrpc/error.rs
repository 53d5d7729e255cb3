use amm_codec::Error as CodecError;
use awc::error::SendRequestError as ActixError;
use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;
use std::num::ParseIntError;

#[derive(Debug)]
pub enum Web3Error {
    BadResponse(String),
    FailedToSend(ActixError),
    JsonRpcError {
        code: i64,
        message: String,
        data: String,
    },
    CodecError(CodecError),
    SyncingNode(String),
}

impl Web3Error {
    /// True if the node executed the call and the contract reverted. Rate
    /// limits, missing blocks and other node side failures are not reverts
    pub fn is_execution_error(&self) -> bool {
        match self {
            Web3Error::JsonRpcError { code, message, .. } => match *code {
                // geth with revert data, anvil
                3 => true,
                // geth without revert data
                -32000 => message.starts_with("execution reverted"),
                // hardhat
                -32603 => message.contains("VM Exception") || message.contains("reverted"),
                _ => false,
            },
            _ => false,
        }
    }
}

impl From<ParseIntError> for Web3Error {
    fn from(error: ParseIntError) -> Self {
        Web3Error::BadResponse(format!("{error}"))
    }
}

impl From<CodecError> for Web3Error {
    fn from(error: CodecError) -> Self {
        Web3Error::CodecError(error)
    }
}

impl Display for Web3Error {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Web3Error::BadResponse(val) => write!(f, "Web3 bad response {val}"),
            Web3Error::FailedToSend(val) => write!(f, "Web3 Failed to send {val}"),
            Web3Error::CodecError(val) => write!(f, "CodecError {val}"),
            Web3Error::JsonRpcError {
                code,
                message,
                data,
            } => write!(
                f,
                "Web3 Response error code {code} message {message} data {data:?}"
            ),
            Web3Error::SyncingNode(val) => {
                write!(f, "Web3 Node is syncing {val}")
            }
        }
    }
}

impl Error for Web3Error {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Web3Error::FailedToSend(inner) => Some(inner),
            Web3Error::CodecError(inner) => Some(inner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rpc_error(code: i64, message: &str) -> Web3Error {
        Web3Error::JsonRpcError {
            code,
            message: message.to_string(),
            data: "None".to_string(),
        }
    }

    #[test]
    fn reverts_are_execution_errors() {
        assert!(rpc_error(3, "execution reverted").is_execution_error());
        assert!(rpc_error(-32000, "execution reverted").is_execution_error());
        assert!(rpc_error(
            -32603,
            "Error: Transaction reverted: function selector was not recognized"
        )
        .is_execution_error());
    }

    #[test]
    fn node_failures_are_not_execution_errors() {
        assert!(!rpc_error(-32005, "daily request count exceeded, request rate limited")
            .is_execution_error());
        assert!(!rpc_error(-32000, "header not found").is_execution_error());
        assert!(!rpc_error(-32601, "the method eth_call does not exist").is_execution_error());
        assert!(!rpc_error(-32603, "internal error").is_execution_error());
        assert!(!Web3Error::BadResponse("timeout".to_string()).is_execution_error());
        assert!(!Web3Error::SyncingNode("syncing".to_string()).is_execution_error());
    }
}
