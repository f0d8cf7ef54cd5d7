//! Control socket client

use std::path::Path;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;

use crate::error::ClientError;
use crate::protocol::{ControlRequest, ControlResponse};

/// Send one request to the daemon and wait for its response
pub async fn call(
    socket_path: &Path,
    request: &ControlRequest,
) -> Result<ControlResponse, ClientError> {
    let request_json = serde_json::to_string(request)?;
    call_raw(socket_path, &request_json).await
}

/// Send an already-encoded JSON request line to the daemon
///
/// The daemon validates the request; malformed input comes back as a
/// `FAILURE_ARGS_INVALID` response rather than a client error.
pub async fn call_raw(
    socket_path: &Path,
    request_json: &str,
) -> Result<ControlResponse, ClientError> {
    if request_json.contains('\n') {
        return Err(ClientError::Protocol(
            "request must be a single line of JSON".to_string(),
        ));
    }

    let stream = UnixStream::connect(socket_path).await.map_err(|e| {
        ClientError::DaemonConnection(format!("{}: {}", socket_path.display(), e))
    })?;
    let (reader, mut writer) = stream.into_split();

    writer.write_all(request_json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.shutdown().await?;

    let mut reader = BufReader::new(reader);
    let mut line = String::new();
    if reader.read_line(&mut line).await? == 0 {
        return Err(ClientError::Protocol(
            "daemon closed the connection without responding".to_string(),
        ));
    }

    Ok(serde_json::from_str(line.trim())?)
}
