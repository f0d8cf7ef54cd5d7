//! Client functionality for supplicant-p2p

use std::path::PathBuf;

/// Send a raw JSON request to the daemon and print its response to stdout
pub async fn call(home: PathBuf, request: String) -> eyre::Result<()> {
    let socket_path = home.join(supplicant_p2p_client::CONTROL_SOCKET);

    if !socket_path.exists() {
        tracing::error!(path = %socket_path.display(), "daemon not running, control socket not found");
        eyre::bail!("Daemon not available; start it with: supplicant-p2p daemon");
    }

    let response = supplicant_p2p_client::call_raw(&socket_path, request.trim()).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_success() {
        eyre::bail!("{} {}", response.status.code, response.status.debug_message);
    }
    Ok(())
}
