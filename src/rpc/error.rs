use serde::{Deserialize, Serialize};

/// Error object as it appears on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

/// Builds the reply a host sends when it rejects request `id`.
///
/// The client never sends error replies itself; this is for fake
/// [`NativeMessaging`](crate::transport::NativeMessaging) hosts in tests and
/// mock setups.
pub fn create_error_response(
    code: i32,
    message: &str,
    id: impl Into<String>,
) -> super::request::RpcResponse {
    super::request::RpcResponse {
        result: None,
        error: Some(JsonRpcError {
            code,
            message: message.to_string(),
        }),
        id: Some(id.into()),
    }
}

/// Failure explicitly reported by the native application, tagged with the id
/// of the request it answers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("native RPC error {code} for request {json_rpc_id}: {message}")]
pub struct RpcError {
    pub json_rpc_id: String,
    pub code: i32,
    pub message: String,
}

impl RpcError {
    pub fn new(json_rpc_id: impl Into<String>, code: i32, message: impl Into<String>) -> Self {
        Self {
            json_rpc_id: json_rpc_id.into(),
            code,
            message: message.into(),
        }
    }

    pub fn from_response(id: &str, error: JsonRpcError) -> Self {
        Self::new(id, error.code, error.message)
    }
}

// Standard JSON-RPC error codes, for matching against `RpcError::code`.
pub const PARSE_ERROR_CODE: i32 = -32700;
pub const INVALID_REQUEST_CODE: i32 = -32600;
pub const METHOD_NOT_FOUND_CODE: i32 = -32601;
pub const INVALID_PARAMS_CODE: i32 = -32602;
pub const INTERNAL_ERROR_CODE: i32 = -32603;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_error_keeps_correlation_id() {
        let response = create_error_response(METHOD_NOT_FOUND_CODE, "Method not Found", "abc");
        let id = response.id.clone().unwrap();
        let err = RpcError::from_response(&id, response.error.unwrap());
        assert_eq!(err.json_rpc_id, "abc");
        assert_eq!(err.code, -32601);
        assert_eq!(err.message, "Method not Found");
        assert_eq!(
            err.to_string(),
            "native RPC error -32601 for request abc: Method not Found"
        );
    }
}
