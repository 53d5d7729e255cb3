use crate::jsonrpc::error::Web3Error;
use crate::jsonrpc::request::Request;
use crate::jsonrpc::response::Response;
use awc::http::header;
use awc::Client;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Upper bound on a response body. The adapter only ever reads contract code
/// and a handful of ABI words, so this is generous.
pub const RESPONSE_SIZE_LIMIT: usize = 16 * 1024 * 1024;

#[derive(Clone)]
pub struct HttpClient {
    id_counter: Arc<Mutex<u64>>,
    url: String,
    client: Client,
}

impl HttpClient {
    pub fn new(url: &str) -> Self {
        Self {
            id_counter: Arc::new(Mutex::new(0u64)),
            url: url.to_string(),
            client: Client::default(),
        }
    }

    fn next_id(&self) -> u64 {
        // a poisoned counter is still a usable counter
        let mut value = self
            .id_counter
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *value += 1;
        *value
    }

    pub async fn request_method<T, R>(
        &self,
        method: &str,
        params: T,
        timeout: Duration,
    ) -> Result<R, Web3Error>
    where
        R: 'static,
        for<'de> R: Deserialize<'de>,
        T: Serialize,
        T: std::fmt::Debug,
        R: std::fmt::Debug,
    {
        trace!("Making request {} {:?}", method, params);
        let payload = Request::new(self.next_id(), method, params);
        let res = self
            .client
            .post(&self.url)
            .append_header((header::CONTENT_TYPE, "application/json"))
            .timeout(timeout)
            .send_json(&payload)
            .await;
        let mut res = match res {
            Ok(val) => val,
            Err(e) => return Err(Web3Error::FailedToSend(e)),
        };

        trace!("response headers {:?}", res.headers());

        let body_bytes = match res.body().limit(RESPONSE_SIZE_LIMIT).await {
            Ok(val) => val,
            Err(e) => {
                return Err(Web3Error::BadResponse(format!(
                    "Size Limit {RESPONSE_SIZE_LIMIT} Web3 Error {e}"
                )))
            }
        };

        let decoded: Response<R> = match serde_json::from_slice(&body_bytes) {
            Ok(val) => val,
            Err(e) => {
                let body_str = String::from_utf8_lossy(&body_bytes);
                return Err(Web3Error::BadResponse(format!(
                    "Failed to parse response: {e}\nRaw response: {body_str}"
                )));
            }
        };
        trace!("got web3 response {:#?}", decoded);
        match decoded.into_result() {
            Ok(r) => Ok(r),
            Err(e) => Err(Web3Error::JsonRpcError {
                code: e.code,
                message: e.message,
                data: format!("{:?}", e.data),
            }),
        }
    }
}

#[test]
fn ids_are_monotonic_across_clones() {
    use actix::System;
    let runner = System::new();
    runner.block_on(async move {
        let client = HttpClient::new("http://localhost:8545");
        let clone = client.clone();
        assert_eq!(client.next_id(), 1);
        assert_eq!(clone.next_id(), 2);
        assert_eq!(client.next_id(), 3);
    })
}
