//! Error types for supplicant-p2p-client

/// Client operation errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Daemon connection failed: {0}")]
    DaemonConnection(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
