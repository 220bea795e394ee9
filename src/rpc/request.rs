use serde::{Deserialize, Serialize};

pub const JSONRPC_VERSION: &str = "2.0";

/// Envelope sent to the native application.
///
/// `params` is an opaque JSON document already serialized to a string; it is
/// written as `null` when absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Option<String>,
    pub id: String,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Option<String>, id: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: id.into(),
        }
    }
}

/// Reply from the native application. Exactly one of `result` or `error` is
/// expected to be set.
///
/// `id` is `None` when the host answers with `"id": null` or omits it, as
/// hosts do for requests they could not parse.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RpcResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<super::error::JsonRpcError>,
    #[serde(default)]
    pub id: Option<String>,
}

impl RpcResponse {
    pub fn success(result: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            result: Some(result.into()),
            error: None,
            id: Some(id.into()),
        }
    }
}
