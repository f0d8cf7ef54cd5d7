//! Error types for supplicant-p2p
//!
//! None of these cross the RPC boundary as-is. RPC objects fold them into a
//! [`SupplicantStatus`](crate::SupplicantStatus) and log the detail.

use std::path::PathBuf;

use crate::status::SupplicantStatusCode;

/// Why an RPC object failed its validity check
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidNetwork {
    #[error("network object was invalidated by its owner")]
    Invalidated,

    #[error("owning supplicant is gone")]
    OwnerGone,

    #[error("interface {ifname} not found")]
    InterfaceMissing { ifname: String },

    #[error("network {network_id} not found on interface {ifname}")]
    NetworkMissing { ifname: String, network_id: u32 },
}

/// Callback registration failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("owning supplicant is gone")]
    OwnerGone,

    #[error("no P2P network object registered for {ifname}/{network_id}")]
    UnknownNetwork { ifname: String, network_id: u32 },
}

/// Failures of structural changes to the supplicant's interface table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SupplicantError {
    #[error("interface {0} already exists")]
    InterfaceExists(String),

    #[error("interface {0} not found")]
    UnknownInterface(String),

    #[error("network {network_id} not found on interface {ifname}")]
    UnknownNetwork { ifname: String, network_id: u32 },
}

impl SupplicantError {
    /// Status code reported to RPC callers for this failure
    pub fn status_code(&self) -> SupplicantStatusCode {
        match self {
            SupplicantError::InterfaceExists(_) => SupplicantStatusCode::FailureIfaceExists,
            SupplicantError::UnknownInterface(_) => SupplicantStatusCode::FailureIfaceUnknown,
            SupplicantError::UnknownNetwork { .. } => SupplicantStatusCode::FailureNetworkUnknown,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid configuration: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}
