use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{info, warn};
use uuid::Uuid;

use super::error::RpcError;
use super::request::RpcResponse;
use crate::error::{Error, Result};
use crate::transport::{NativeMessaging, TransportError, send_native_rpc_request};
use crate::types::{
    Base58EncodedAddress, Base64EncodedAddress, Base64EncodedPayload, Base64EncodedSignedPayload,
};

pub const NATIVE_GET_ACCOUNTS_RPC_METHOD: &str = "NATIVE_GET_ACCOUNTS_METHOD";
pub const NATIVE_SIGN_PAYLOADS_RPC_METHOD: &str = "NATIVE_SIGN_PAYLOADS_METHOD";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GetAccountsResult {
    pub addresses: Vec<Base58EncodedAddress>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SignPayloadsParams {
    pub address: Base64EncodedAddress,
    pub payloads: Vec<Base64EncodedPayload>,
}

/// Signed payloads, in the same order as the payloads that were sent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SignPayloadsResult {
    pub signed_payloads: Vec<Base64EncodedSignedPayload>,
}

fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Asks the native application for the accounts it manages.
pub async fn send_native_get_accounts_request<T: NativeMessaging>(
    transport: &T,
    id: Option<String>,
) -> Result<GetAccountsResult> {
    let id = id.unwrap_or_else(new_request_id);
    let response =
        send_native_rpc_request(transport, NATIVE_GET_ACCOUNTS_RPC_METHOD, None, id.clone()).await?;

    let result: GetAccountsResult = decode_response(response, &id, "NativeGetAccountsResult")?;
    info!("Received {} account(s) for request {}", result.addresses.len(), id);
    Ok(result)
}

/// Asks the native application to sign `params.payloads` with the key behind
/// `params.address`.
pub async fn send_native_sign_payloads_request<T: NativeMessaging>(
    transport: &T,
    params: SignPayloadsParams,
    id: Option<String>,
) -> Result<SignPayloadsResult> {
    if params.payloads.is_empty() {
        return Err(Error::EmptyPayloads);
    }

    let id = id.unwrap_or_else(new_request_id);
    let params = encode_params(&params)?;
    let response = send_native_rpc_request(
        transport,
        NATIVE_SIGN_PAYLOADS_RPC_METHOD,
        Some(params),
        id.clone(),
    )
    .await?;

    let result: SignPayloadsResult = decode_response(response, &id, "NativeSignPayloadsResult")?;
    info!("Received {} signed payload(s) for request {}", result.signed_payloads.len(), id);
    Ok(result)
}

/// Serializes operation params into the envelope's `params` string. A failure
/// here never reached the host, so it is reported as a transport error.
fn encode_params<P: Serialize>(params: &P) -> Result<String> {
    serde_json::to_string(params).map_err(|e| Error::Transport(TransportError::Json(e)))
}

/// Turns a raw reply into either the decoded result or a typed failure.
///
/// `result` wins over `error` when both are set. The nested JSON string is
/// decoded into `R`, so a reply with the wrong structure never reaches the
/// caller. Only a `result` must carry the request's id; a declared error is
/// always surfaced as [`RpcError`], falling back to the request id when the
/// host sent none.
fn decode_response<R: DeserializeOwned>(
    response: RpcResponse,
    request_id: &str,
    expected: &'static str,
) -> Result<R> {
    match (response.result, response.error) {
        (Some(result), _) => {
            if response.id.as_deref() != Some(request_id) {
                warn!("Response id {:?} does not match request id {}", response.id, request_id);
                return Err(Error::IdMismatch {
                    expected: request_id.to_string(),
                    actual: response.id,
                });
            }
            serde_json::from_str(&result).map_err(|source| {
                warn!("Response does not match the {} structure: {}", expected, source);
                Error::Shape { expected, source }
            })
        }
        (None, Some(error)) => {
            warn!("Native RPC error: code={}, message={}", error.code, error.message);
            let id = response.id.as_deref().unwrap_or(request_id);
            Err(RpcError::from_response(id, error).into())
        }
        (None, None) => {
            warn!("Unexpected response format for request {}", request_id);
            Err(Error::UnexpectedResponse)
        }
    }
}
