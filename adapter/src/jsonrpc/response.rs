use serde_json::Value;

/// The error object of a failed call. Reverts put the revert data in `data`
#[derive(Deserialize, Debug, Clone)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ResponseData<R> {
    Error { error: JsonRpcError },
    Success { result: R },
}

#[derive(Deserialize, Debug, Clone)]
pub struct Response<R> {
    pub id: Value,
    #[serde(flatten)]
    pub data: ResponseData<R>,
}

impl<R> Response<R> {
    /// Consume response and return value
    pub fn into_result(self) -> Result<R, JsonRpcError> {
        match self.data {
            ResponseData::Success { result } => Ok(result),
            ResponseData::Error { error } => Err(error),
        }
    }
}
