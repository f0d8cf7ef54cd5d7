//! Control socket server for handling client requests
//!
//! This module handles the Unix domain socket that clients connect to. Each
//! connection carries one JSON request line, answered with one JSON response
//! line built from the network object's `(status, value)` pair.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

use supplicant_p2p::{
    P2pNetworkCallback, StatusAnd, Supplicant, SupplicantStatus, SupplicantStatusCode,
};
use supplicant_p2p_client::{ControlRequest, ControlResponse};

/// Longest request line read from a client; anything past it is discarded
pub const MAX_REQUEST_LEN: u64 = 64 * 1024;

/// Bind the control socket, replacing a stale one left by a previous run
pub async fn bind(socket_path: &Path) -> eyre::Result<UnixListener> {
    if socket_path.exists() {
        tokio::fs::remove_file(socket_path).await?;
    }

    let listener = UnixListener::bind(socket_path)?;
    tracing::info!(path = %socket_path.display(), "control socket listening");
    Ok(listener)
}

/// Accept clients forever, one task per connection
///
/// Successful `remove-network` requests are written back to the
/// configuration file in `home`.
pub async fn serve(
    listener: UnixListener,
    supplicant: Arc<Supplicant>,
    home: PathBuf,
) -> eyre::Result<()> {
    let home: Arc<Path> = home.into();
    loop {
        match listener.accept().await {
            Ok((stream, _addr)) => {
                let supplicant = supplicant.clone();
                let home = home.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_client(stream, &supplicant, &home).await {
                        tracing::warn!(error = %e, "error handling client");
                    }
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "error accepting connection");
            }
        }
    }
}

async fn handle_client(stream: UnixStream, supplicant: &Supplicant, home: &Path) -> eyre::Result<()> {
    let (reader, mut writer) = stream.into_split();

    let Some(line) = read_request(reader).await? else {
        tracing::debug!("client disconnected without a request");
        return Ok(());
    };

    let request_json = line.trim();
    tracing::debug!(request = request_json, "client request");

    let response = match serde_json::from_str::<ControlRequest>(request_json) {
        Ok(request) => {
            let response = dispatch(supplicant, &request);
            if response.is_success() && changes_config(&request) {
                persist(supplicant, home).await;
            }
            response
        }
        Err(e) => malformed(e),
    };

    let mut response_json = serde_json::to_string(&response)?;
    response_json.push('\n');
    writer.write_all(response_json.as_bytes()).await?;

    tracing::debug!(code = %response.status.code, "request handled");
    Ok(())
}

/// Read one request line of at most [`MAX_REQUEST_LEN`] bytes
///
/// Returns `None` if the client sent nothing. An over-long line comes back
/// truncated and fails to parse.
async fn read_request<R: AsyncRead + Unpin>(reader: R) -> std::io::Result<Option<String>> {
    let mut reader = BufReader::new(reader.take(MAX_REQUEST_LEN));
    let mut line = String::new();

    if reader.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn changes_config(request: &ControlRequest) -> bool {
    matches!(request, ControlRequest::RemoveNetwork { .. })
}

async fn persist(supplicant: &Supplicant, home: &Path) {
    match supplicant.to_config().save_to_dir(home).await {
        Ok(()) => tracing::debug!(home = %home.display(), "configuration saved"),
        Err(e) => tracing::warn!(error = %e, "could not save configuration"),
    }
}

/// Parse and dispatch one request line
pub fn dispatch_line(supplicant: &Supplicant, request_json: &str) -> ControlResponse {
    match serde_json::from_str::<ControlRequest>(request_json) {
        Ok(request) => dispatch(supplicant, &request),
        Err(e) => malformed(e),
    }
}

fn malformed(e: serde_json::Error) -> ControlResponse {
    respond((
        SupplicantStatus::with_message(
            SupplicantStatusCode::FailureArgsInvalid,
            format!("malformed request: {e}"),
        ),
        (),
    ))
}

/// Route a request to the addressed network object or to the supplicant
pub fn dispatch(supplicant: &Supplicant, request: &ControlRequest) -> ControlResponse {
    let Some((ifname, network_id)) = request.network_key() else {
        return dispatch_management(supplicant, request);
    };

    let Some(network) = supplicant.p2p_network(ifname, network_id) else {
        return respond((
            SupplicantStatus::with_message(
                SupplicantStatusCode::FailureNetworkUnknown,
                format!("no P2P network {network_id} on {ifname}"),
            ),
            (),
        ));
    };

    match request {
        ControlRequest::GetId { .. } => respond(network.get_id()),
        ControlRequest::GetInterfaceName { .. } => respond(network.get_interface_name()),
        ControlRequest::GetType { .. } => respond(network.get_type()),
        ControlRequest::GetSsid { .. } => respond(network.get_ssid()),
        ControlRequest::GetBssid { .. } => respond(network.get_bssid()),
        ControlRequest::IsCurrent { .. } => respond(network.is_current()),
        ControlRequest::IsPersistent { .. } => respond(network.is_persistent()),
        ControlRequest::IsGo { .. } => respond(network.is_go()),
        ControlRequest::GetClientList { .. } => respond(network.get_client_list()),
        ControlRequest::RegisterCallback { name, .. } => {
            let callback = Arc::new(LoggingCallback { name: name.clone() });
            respond((network.register_callback(callback), ()))
        }
        ControlRequest::ListNetworks { .. } | ControlRequest::RemoveNetwork { .. } => {
            dispatch_management(supplicant, request)
        }
    }
}

fn dispatch_management(supplicant: &Supplicant, request: &ControlRequest) -> ControlResponse {
    match request {
        ControlRequest::ListNetworks { ifname } => match supplicant.network_ids(ifname) {
            Some(ids) => respond((SupplicantStatus::ok(), ids)),
            None => respond((
                SupplicantStatus::with_message(
                    SupplicantStatusCode::FailureIfaceUnknown,
                    format!("interface {ifname} not found"),
                ),
                Vec::<u32>::new(),
            )),
        },
        ControlRequest::RemoveNetwork { ifname, network_id } => {
            match supplicant.remove_network(ifname, *network_id) {
                Ok(()) => respond((SupplicantStatus::ok(), ())),
                Err(e) => respond((SupplicantStatus::with_message(e.status_code(), e.to_string()), ())),
            }
        }
        _ => respond((
            SupplicantStatus::with_message(
                SupplicantStatusCode::FailureArgsInvalid,
                "not a management request",
            ),
            (),
        )),
    }
}

fn respond<T: serde::Serialize>((status, value): StatusAnd<T>) -> ControlResponse {
    ControlResponse {
        status: status.into(),
        value: serde_json::to_value(value).unwrap_or_default(),
    }
}

/// Daemon-side observer registered on behalf of a control socket client
struct LoggingCallback {
    name: String,
}

impl P2pNetworkCallback for LoggingCallback {
    fn on_network_removed(&self, ifname: &str, network_id: u32) {
        tracing::info!(callback = %self.name, ifname, network_id, "network removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supplicant_p2p::{IfaceType, MacAddr, NetworkConfig, NetworkMode, SupplicantConfig};

    const P2P: &str = "p2p-dev-wlan0";

    fn supplicant() -> Arc<Supplicant> {
        let supplicant = Supplicant::new();
        supplicant.add_interface(P2P, IfaceType::P2p).unwrap();
        supplicant
            .add_network(
                P2P,
                NetworkConfig::new("DIRECT-xy")
                    .with_bssid(MacAddr::new([2, 0, 0, 0, 0, 1]))
                    .with_mode(NetworkMode::P2pGroupOwner),
            )
            .unwrap();
        supplicant
    }

    fn get_id(network_id: u32) -> ControlRequest {
        ControlRequest::GetId {
            ifname: P2P.to_string(),
            network_id,
        }
    }

    #[test]
    fn test_getters() {
        let supplicant = supplicant();

        let response = dispatch(&supplicant, &get_id(0));
        assert!(response.is_success());
        assert_eq!(response.value, serde_json::json!(0));

        let response = dispatch_line(
            &supplicant,
            r#"{"type":"get-type","ifname":"p2p-dev-wlan0","network_id":0}"#,
        );
        assert_eq!(response.value, serde_json::json!("p2p"));

        let response = dispatch_line(
            &supplicant,
            r#"{"type":"get-bssid","ifname":"p2p-dev-wlan0","network_id":0}"#,
        );
        assert_eq!(response.value, serde_json::json!("02:00:00:00:00:01"));

        let response = dispatch_line(
            &supplicant,
            r#"{"type":"is-go","ifname":"p2p-dev-wlan0","network_id":0}"#,
        );
        assert_eq!(response.value, serde_json::json!(true));
    }

    #[test]
    fn test_unknown_network_and_bad_input() {
        let supplicant = supplicant();

        let response = dispatch(&supplicant, &get_id(42));
        assert_eq!(response.status.code, "FAILURE_NETWORK_UNKNOWN");

        let response = dispatch_line(&supplicant, "not json");
        assert_eq!(response.status.code, "FAILURE_ARGS_INVALID");

        let response = dispatch(
            &supplicant,
            &ControlRequest::ListNetworks {
                ifname: "wlan9".to_string(),
            },
        );
        assert_eq!(response.status.code, "FAILURE_IFACE_UNKNOWN");
        assert_eq!(response.value, serde_json::json!([]));
    }

    #[test]
    fn test_silently_removed_network_reports_invalid() {
        let supplicant = supplicant();
        supplicant
            .update_interface(P2P, |iface| iface.remove_network(0))
            .unwrap();

        let response = dispatch(&supplicant, &get_id(0));
        assert_eq!(response.status.code, "FAILURE_NETWORK_INVALID");
        assert_eq!(response.value, serde_json::json!(0));
    }

    #[test]
    fn test_register_then_remove() {
        let supplicant = supplicant();

        let response = dispatch(
            &supplicant,
            &ControlRequest::RegisterCallback {
                ifname: P2P.to_string(),
                network_id: 0,
                name: "ui".to_string(),
            },
        );
        assert!(response.is_success());
        assert_eq!(supplicant.callback_count(P2P, 0), 1);

        let remove = ControlRequest::RemoveNetwork {
            ifname: P2P.to_string(),
            network_id: 0,
        };
        assert!(dispatch(&supplicant, &remove).is_success());
        assert_eq!(supplicant.callback_count(P2P, 0), 0);

        let response = dispatch(&supplicant, &remove);
        assert_eq!(response.status.code, "FAILURE_NETWORK_UNKNOWN");

        let response = dispatch(&supplicant, &get_id(0));
        assert_eq!(response.status.code, "FAILURE_NETWORK_UNKNOWN");
    }

    #[tokio::test]
    async fn test_socket_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join(supplicant_p2p_client::CONTROL_SOCKET);
        std::fs::write(&socket_path, b"stale").unwrap();

        let listener = bind(&socket_path).await.unwrap();
        let server = tokio::spawn(serve(listener, supplicant(), dir.path().to_path_buf()));

        let response = supplicant_p2p_client::call(&socket_path, &get_id(0)).await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.value, serde_json::json!(0));

        let response = supplicant_p2p_client::call(
            &socket_path,
            &ControlRequest::GetSsid {
                ifname: P2P.to_string(),
                network_id: 0,
            },
        )
        .await
        .unwrap();
        assert_eq!(response.value, serde_json::json!(b"DIRECT-xy".to_vec()));

        // Only configuration changes touch the file
        assert!(!dir.path().join(SupplicantConfig::FILE_NAME).exists());

        server.abort();
    }

    #[tokio::test]
    async fn test_remove_network_saves_config() {
        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join(supplicant_p2p_client::CONTROL_SOCKET);

        let supplicant = supplicant();
        supplicant
            .add_network(P2P, NetworkConfig::new("DIRECT-zz"))
            .unwrap();

        let listener = bind(&socket_path).await.unwrap();
        let server = tokio::spawn(serve(listener, supplicant, dir.path().to_path_buf()));

        let remove = ControlRequest::RemoveNetwork {
            ifname: P2P.to_string(),
            network_id: 0,
        };
        let response = supplicant_p2p_client::call(&socket_path, &remove).await.unwrap();
        assert!(response.is_success());

        let saved = SupplicantConfig::load_from_dir(dir.path()).await.unwrap();
        assert_eq!(saved.interfaces.len(), 1);
        assert_eq!(saved.interfaces[0].networks, vec![NetworkConfig::new("DIRECT-zz")]);

        // A failed removal leaves the saved file alone
        std::fs::remove_file(dir.path().join(SupplicantConfig::FILE_NAME)).unwrap();
        let response = supplicant_p2p_client::call(&socket_path, &remove).await.unwrap();
        assert_eq!(response.status.code, "FAILURE_NETWORK_UNKNOWN");
        assert!(!dir.path().join(SupplicantConfig::FILE_NAME).exists());

        server.abort();
    }

    #[tokio::test]
    async fn test_request_length_is_capped() {
        let request = format!("{}\n", "x".repeat(MAX_REQUEST_LEN as usize * 2));
        let line = read_request(request.as_bytes()).await.unwrap().unwrap();
        assert_eq!(line.len(), MAX_REQUEST_LEN as usize);

        let response = dispatch_line(&supplicant(), line.trim());
        assert_eq!(response.status.code, "FAILURE_ARGS_INVALID");

        let line = read_request(&b"{}\nmore"[..]).await.unwrap().unwrap();
        assert_eq!(line, "{}\n");
        assert!(read_request(&b""[..]).await.unwrap().is_none());
    }
}
