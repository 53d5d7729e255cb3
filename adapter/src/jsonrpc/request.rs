/// A JSON-RPC 2.0 request body, borrowed for the duration of the send
#[derive(Serialize, Debug)]
pub struct Request<'a, T> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: T,
}

impl<'a, T> Request<'a, T> {
    pub fn new(id: u64, method: &'a str, params: T) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[test]
fn serialize_request() {
    let req = Request::new(7, "eth_getCode", ("0x00", "latest"));
    assert_eq!(
        serde_json::to_string(&req).unwrap(),
        r#"{"jsonrpc":"2.0","id":7,"method":"eth_getCode","params":["0x00","latest"]}"#
    );
}
