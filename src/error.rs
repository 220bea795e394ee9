use crate::rpc::error::RpcError;
use crate::transport::TransportError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("native messaging transport failed")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("response does not match the {expected} structure")]
    Shape {
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("received an unexpected response format")]
    UnexpectedResponse,

    #[error("response id {actual:?} does not match request id {expected:?}")]
    IdMismatch {
        expected: String,
        actual: Option<String>,
    },

    #[error("at least one payload is required")]
    EmptyPayloads,
}

impl Error {
    /// The typed RPC error, if the native application reported one.
    pub fn as_rpc(&self) -> Option<&RpcError> {
        match self {
            Error::Rpc(err) => Some(err),
            _ => None,
        }
    }
}
