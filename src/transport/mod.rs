pub mod native_host;

pub use native_host::NativeHostProcess;

use std::future::Future;
use tracing::{error, info};

use crate::rpc::request::{RpcRequest, RpcResponse};

#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("native host I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid native message JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("native message of {len} bytes exceeds the {limit} byte limit")]
    MessageTooLarge { len: usize, limit: usize },

    #[error("native host closed the channel before replying")]
    HostClosed,
}

/// The host's native-messaging primitive: one request out, one reply back.
pub trait NativeMessaging {
    fn send_native_message(
        &self,
        request: &RpcRequest,
    ) -> impl Future<Output = Result<RpcResponse, TransportError>> + Send;
}

/// Wraps `method`, `params` and `id` in a JSON-RPC 2.0 envelope and relays it.
///
/// The reply is returned untouched; interpreting `result`/`error` is up to
/// the caller. Transport failures are returned with their original cause.
pub async fn send_native_rpc_request<T: NativeMessaging>(
    transport: &T,
    method: &str,
    params: Option<String>,
    id: String,
) -> Result<RpcResponse, TransportError> {
    let request = RpcRequest::new(method, params, id);
    info!("Sending native RPC request: method={}, id={}", request.method, request.id);

    transport
        .send_native_message(&request)
        .await
        .inspect_err(|e| error!("RPC request failed: {}", e))
}
