//! Network records and the on-disk supplicant configuration
//!
//! The daemon seeds its interface table from `<home>/supplicant.json`:
//!
//! ```json
//! {
//!   "interfaces": [
//!     {
//!       "name": "p2p-dev-wlan0",
//!       "type": "p2p",
//!       "current_network": 0,
//!       "networks": [
//!         {
//!           "ssid": "DIRECT-xy-printer",
//!           "bssid": "02:1a:ff:00:9c:01",
//!           "mode": "p2p_group_owner",
//!           "persistent": true,
//!           "p2p_client_list": ["02:1a:ff:00:9c:02"]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mac::MacAddr;
use crate::status::IfaceType;

/// Operating mode of a configured network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkMode {
    #[default]
    Infrastructure,
    P2pGroupOwner,
    P2pGroupFormation,
}

/// One configured network record, owned by its interface's network table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    #[serde(with = "ssid_format")]
    pub ssid: Vec<u8>,
    pub bssid: Option<MacAddr>,
    pub mode: NetworkMode,
    /// Saved persistent P2P group
    pub persistent: bool,
    /// Peers that joined this persistent group before
    pub p2p_client_list: Vec<MacAddr>,
}

impl NetworkConfig {
    pub fn new(ssid: impl Into<Vec<u8>>) -> Self {
        Self {
            ssid: ssid.into(),
            ..Self::default()
        }
    }

    pub fn with_bssid(mut self, bssid: MacAddr) -> Self {
        self.bssid = Some(bssid);
        self
    }

    pub fn with_mode(mut self, mode: NetworkMode) -> Self {
        self.mode = mode;
        self
    }

    /// Mark this record as a persistent group with the given client history
    pub fn persistent_group(mut self, clients: Vec<MacAddr>) -> Self {
        self.persistent = true;
        self.p2p_client_list = clients;
        self
    }

    pub fn is_go(&self) -> bool {
        self.mode == NetworkMode::P2pGroupOwner
    }
}

/// Interface entry in the configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceConfig {
    pub name: String,
    #[serde(rename = "type", default)]
    pub iface_type: IfaceType,
    /// Networks in file order; they receive ids 0, 1, 2, ...
    #[serde(default)]
    pub networks: Vec<NetworkConfig>,
    #[serde(default)]
    pub current_network: Option<u32>,
}

/// Whole-daemon configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupplicantConfig {
    #[serde(default)]
    pub interfaces: Vec<InterfaceConfig>,
}

impl SupplicantConfig {
    /// Configuration file name inside the daemon home directory
    pub const FILE_NAME: &'static str = "supplicant.json";

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load `supplicant.json` from `home`
    ///
    /// A missing file yields an empty configuration.
    pub async fn load_from_dir(home: &Path) -> Result<Self, ConfigError> {
        let path = home.join(Self::FILE_NAME);

        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "no configuration file, starting empty");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        let config = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            interfaces = config.interfaces.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Save this configuration as `supplicant.json` in `home`
    pub async fn save_to_dir(&self, home: &Path) -> Result<(), ConfigError> {
        let path = home.join(Self::FILE_NAME);
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|source| ConfigError::Io { path, source })
    }
}

/// SSIDs are written as text when they are UTF-8 and as a byte array otherwise
mod ssid_format {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Ssid {
        Text(String),
        Bytes(Vec<u8>),
    }

    pub fn serialize<S, T>(ssid: T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<[u8]>,
    {
        let ssid = ssid.as_ref();
        match std::str::from_utf8(ssid) {
            Ok(text) => text.serialize(serializer),
            Err(_) => ssid.serialize(serializer),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        Ok(match Ssid::deserialize(deserializer)? {
            Ssid::Text(text) => text.into_bytes(),
            Ssid::Bytes(bytes) => bytes,
        })
    }
}
