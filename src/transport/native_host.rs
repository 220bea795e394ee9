use futures_util::future::try_join;
use serde::{Serialize, de::DeserializeOwned};
use std::{io, path::PathBuf, process::Stdio};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    process::Command,
};
use tracing::{debug, warn};

use super::{NativeMessaging, TransportError};
use crate::config::HostConfig;
use crate::rpc::request::{RpcRequest, RpcResponse};

/// Largest message the extension side may send to a host.
pub const MAX_OUTGOING_MESSAGE_LEN: usize = 64 * 1024 * 1024;
/// Largest message a host may send back.
pub const MAX_INCOMING_MESSAGE_LEN: usize = 1024 * 1024;

/// Encodes `message` as a native-messaging frame: a 4-byte length in native
/// byte order followed by the UTF-8 JSON body.
pub fn encode_message<T: Serialize>(message: &T) -> Result<Vec<u8>, TransportError> {
    let body = serde_json::to_vec(message)?;
    if body.len() > MAX_OUTGOING_MESSAGE_LEN {
        return Err(TransportError::MessageTooLarge {
            len: body.len(),
            limit: MAX_OUTGOING_MESSAGE_LEN,
        });
    }

    let mut frame = Vec::with_capacity(4 + body.len());
    frame.extend_from_slice(&(body.len() as u32).to_ne_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

pub async fn write_message<W, T>(writer: &mut W, message: &T) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let frame = encode_message(message)?;
    debug!("Writing native message frame: {} bytes", frame.len());
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

pub async fn read_message<R, T>(reader: &mut R) -> Result<T, TransportError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut len_bytes = [0u8; 4];
    read_full(reader, &mut len_bytes).await?;

    let len = u32::from_ne_bytes(len_bytes) as usize;
    if len > MAX_INCOMING_MESSAGE_LEN {
        return Err(TransportError::MessageTooLarge {
            len,
            limit: MAX_INCOMING_MESSAGE_LEN,
        });
    }
    debug!("Reading native message frame: {} bytes", len);

    let mut body = vec![0u8; len];
    read_full(reader, &mut body).await?;
    Ok(serde_json::from_slice(&body)?)
}

async fn read_full<R: AsyncRead + Unpin>(reader: &mut R, buf: &mut [u8]) -> Result<(), TransportError> {
    match reader.read_exact(buf).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(TransportError::HostClosed),
        Err(e) => Err(e.into()),
    }
}

/// Talks to a native application the way a browser does: every message
/// launches the host with piped stdio, sends one frame and reads one frame.
#[derive(Debug, Clone)]
pub struct NativeHostProcess {
    program: PathBuf,
    args: Vec<String>,
}

impl NativeHostProcess {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn from_config(config: &HostConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }
}

impl NativeMessaging for NativeHostProcess {
    async fn send_native_message(&self, request: &RpcRequest) -> Result<RpcResponse, TransportError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()?;
        debug!("Spawned native host {}", self.program.display());

        let mut stdin = child.stdin.take().ok_or(TransportError::HostClosed)?;
        let mut stdout = child.stdout.take().ok_or(TransportError::HostClosed)?;

        // stdin is dropped, and so closed, once the frame is written.
        let send = async move {
            match write_message(&mut stdin, request).await {
                Err(TransportError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                    warn!("Native host stopped reading its input: {}", e);
                    Ok(())
                }
                other => other,
            }
        };
        let receive = read_message::<_, RpcResponse>(&mut stdout);

        let ((), response) = try_join(send, receive).await?;

        match child.try_wait() {
            Ok(Some(status)) => debug!("Native host exited with {}", status),
            Ok(None) => {
                if let Err(e) = child.start_kill() {
                    warn!("Failed to stop native host: {}", e);
                } else if let Err(e) = child.wait().await {
                    warn!("Failed to reap native host: {}", e);
                }
            }
            Err(e) => warn!("Failed to poll native host: {}", e),
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn frame_is_length_prefixed_json() {
        let frame = encode_message(&json!({"a": 1})).unwrap();
        let body = br#"{"a":1}"#;
        assert_eq!(&frame[..4], &(body.len() as u32).to_ne_bytes());
        assert_eq!(&frame[4..], body);
    }

    #[tokio::test]
    async fn reads_back_written_message() {
        let (mut client, mut host) = tokio::io::duplex(1024);
        let request = RpcRequest::new("NATIVE_GET_ACCOUNTS_METHOD", None, "1");

        write_message(&mut client, &request).await.unwrap();
        let received: RpcRequest = read_message(&mut host).await.unwrap();
        assert_eq!(received, request);
    }

    #[tokio::test]
    async fn eof_before_frame_is_host_closed() {
        let (client, mut host) = tokio::io::duplex(64);
        drop(client);

        let err = read_message::<_, Value>(&mut host).await.unwrap_err();
        assert!(matches!(err, TransportError::HostClosed));
    }

    #[tokio::test]
    async fn truncated_body_is_host_closed() {
        let (mut client, mut host) = tokio::io::duplex(64);
        client.write_all(&10u32.to_ne_bytes()).await.unwrap();
        client.write_all(b"{}").await.unwrap();
        drop(client);

        let err = read_message::<_, Value>(&mut host).await.unwrap_err();
        assert!(matches!(err, TransportError::HostClosed));
    }

    #[tokio::test]
    async fn oversized_reply_is_rejected() {
        let (mut client, mut host) = tokio::io::duplex(64);
        let len = (MAX_INCOMING_MESSAGE_LEN + 1) as u32;
        client.write_all(&len.to_ne_bytes()).await.unwrap();

        let err = read_message::<_, Value>(&mut host).await.unwrap_err();
        match err {
            TransportError::MessageTooLarge { len, limit } => {
                assert_eq!(len, MAX_INCOMING_MESSAGE_LEN + 1);
                assert_eq!(limit, MAX_INCOMING_MESSAGE_LEN);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_reply_keeps_json_error() {
        let (mut client, mut host) = tokio::io::duplex(64);
        client.write_all(&3u32.to_ne_bytes()).await.unwrap();
        client.write_all(b"{x}").await.unwrap();

        let err = read_message::<_, RpcResponse>(&mut host).await.unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));
    }
}
