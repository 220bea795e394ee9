//! Client side of a JSON-RPC 2.0 exchange with a native wallet application
//! over native messaging.
//!
//! Each call sends one request through a [`NativeMessaging`] implementation
//! and decodes the single reply:
//!
//! ```no_run
//! use walletlib_native_rpc::{NativeHostProcess, send_native_get_accounts_request};
//!
//! # async fn run() -> walletlib_native_rpc::Result<()> {
//! let host = NativeHostProcess::new("/opt/wallet/native-host");
//! let accounts = send_native_get_accounts_request(&host, None).await?;
//! println!("{:?}", accounts.addresses);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod rpc;
pub mod transport;
pub mod types;

pub use config::{ConfigError, HostConfig, HostManifest};
pub use error::{Error, Result};
pub use rpc::error::RpcError;
pub use rpc::methods::{
    GetAccountsResult, NATIVE_GET_ACCOUNTS_RPC_METHOD, NATIVE_SIGN_PAYLOADS_RPC_METHOD,
    SignPayloadsParams, SignPayloadsResult, send_native_get_accounts_request,
    send_native_sign_payloads_request,
};
pub use rpc::request::{RpcRequest, RpcResponse};
pub use transport::{NativeHostProcess, NativeMessaging, TransportError, send_native_rpc_request};
