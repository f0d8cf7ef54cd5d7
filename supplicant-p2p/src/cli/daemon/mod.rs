//! Daemon functionality for supplicant-p2p
//!
//! The daemon loads `supplicant.json`, builds the owning [`Supplicant`], and
//! serves its P2P network objects over the control socket until Ctrl-C.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use supplicant_p2p::{Supplicant, SupplicantConfig};

pub mod control;

/// Run the daemon in the foreground
pub async fn run(home: PathBuf) -> eyre::Result<()> {
    let supplicant = initialize_daemon(&home).await?;

    let socket_path = home.join(supplicant_p2p_client::CONTROL_SOCKET);
    let listener = control::bind(&socket_path).await?;

    tokio::select! {
        result = control::serve(listener, supplicant, home.clone()) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("shutdown requested");
        }
    }

    if let Err(e) = tokio::fs::remove_file(&socket_path).await {
        tracing::warn!(path = %socket_path.display(), error = %e, "could not remove control socket");
    }
    Ok(())
}

/// Create the home directory and build the supplicant from its configuration
async fn initialize_daemon(home: &Path) -> eyre::Result<Arc<Supplicant>> {
    tokio::fs::create_dir_all(home).await?;

    let config = SupplicantConfig::load_from_dir(home).await?;
    let supplicant = Supplicant::from_config(&config)?;

    for ifname in supplicant.interface_names() {
        let networks = supplicant.network_ids(&ifname).unwrap_or_default();
        tracing::info!(%ifname, ?networks, "interface ready");
    }

    Ok(supplicant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        tokio::fs::create_dir_all(&home).await.unwrap();
        tokio::fs::write(
            home.join(SupplicantConfig::FILE_NAME),
            r#"{"interfaces":[{"name":"p2p-dev-wlan0","type":"p2p","networks":[{"ssid":"a"},{"ssid":"b"}]}]}"#,
        )
        .await
        .unwrap();

        let supplicant = initialize_daemon(&home).await.unwrap();
        assert_eq!(supplicant.network_ids("p2p-dev-wlan0"), Some(vec![0, 1]));
        assert!(supplicant.p2p_network("p2p-dev-wlan0", 1).is_some());
    }

    #[tokio::test]
    async fn test_initialize_creates_home() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("fresh");

        let supplicant = initialize_daemon(&home).await.unwrap();
        assert!(home.is_dir());
        assert!(supplicant.interface_names().is_empty());
    }
}
