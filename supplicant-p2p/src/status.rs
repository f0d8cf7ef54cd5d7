//! Status vocabulary returned by every RPC-facing operation

use serde::{Deserialize, Serialize};

/// Status codes shared by all supplicant RPC objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplicantStatusCode {
    Success,
    FailureUnknown,
    FailureArgsInvalid,
    FailureIfaceInvalid,
    FailureIfaceUnknown,
    FailureIfaceExists,
    FailureIfaceDisabled,
    FailureIfaceNotDisconnected,
    FailureNetworkInvalid,
    FailureNetworkUnknown,
}

impl SupplicantStatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplicantStatusCode::Success => "SUCCESS",
            SupplicantStatusCode::FailureUnknown => "FAILURE_UNKNOWN",
            SupplicantStatusCode::FailureArgsInvalid => "FAILURE_ARGS_INVALID",
            SupplicantStatusCode::FailureIfaceInvalid => "FAILURE_IFACE_INVALID",
            SupplicantStatusCode::FailureIfaceUnknown => "FAILURE_IFACE_UNKNOWN",
            SupplicantStatusCode::FailureIfaceExists => "FAILURE_IFACE_EXISTS",
            SupplicantStatusCode::FailureIfaceDisabled => "FAILURE_IFACE_DISABLED",
            SupplicantStatusCode::FailureIfaceNotDisconnected => "FAILURE_IFACE_NOT_DISCONNECTED",
            SupplicantStatusCode::FailureNetworkInvalid => "FAILURE_NETWORK_INVALID",
            SupplicantStatusCode::FailureNetworkUnknown => "FAILURE_NETWORK_UNKNOWN",
        }
    }
}

impl std::fmt::Display for SupplicantStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status half of every RPC reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplicantStatus {
    pub code: SupplicantStatusCode,
    /// Free-form detail for logs; empty on the common paths
    #[serde(default)]
    pub debug_message: String,
}

impl SupplicantStatus {
    pub fn ok() -> Self {
        Self::new(SupplicantStatusCode::Success)
    }

    pub fn new(code: SupplicantStatusCode) -> Self {
        Self {
            code,
            debug_message: String::new(),
        }
    }

    pub fn with_message(code: SupplicantStatusCode, debug_message: impl Into<String>) -> Self {
        Self {
            code,
            debug_message: debug_message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SupplicantStatusCode::Success
    }
}

impl From<SupplicantStatusCode> for SupplicantStatus {
    fn from(code: SupplicantStatusCode) -> Self {
        Self::new(code)
    }
}

impl From<SupplicantStatus> for supplicant_p2p_client::WireStatus {
    fn from(status: SupplicantStatus) -> Self {
        Self {
            code: status.code.as_str().to_string(),
            debug_message: status.debug_message,
        }
    }
}

/// A status paired with the operation's value
///
/// On failure the value is the default of its type.
pub type StatusAnd<T> = (SupplicantStatus, T);

/// Kind of interface an RPC object belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IfaceType {
    #[default]
    Sta,
    P2p,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_names_match_serde() {
        for code in [
            SupplicantStatusCode::Success,
            SupplicantStatusCode::FailureUnknown,
            SupplicantStatusCode::FailureIfaceNotDisconnected,
            SupplicantStatusCode::FailureNetworkInvalid,
            SupplicantStatusCode::FailureNetworkUnknown,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, serde_json::Value::String(code.as_str().to_string()));
        }
    }

    #[test]
    fn test_wire_status_conversion() {
        let status = SupplicantStatus::with_message(
            SupplicantStatusCode::FailureIfaceUnknown,
            "no such interface",
        );
        let wire: supplicant_p2p_client::WireStatus = status.into();
        assert_eq!(wire.code, "FAILURE_IFACE_UNKNOWN");
        assert_eq!(wire.debug_message, "no such interface");
    }

    #[test]
    fn test_iface_type_default_is_sta() {
        assert_eq!(IfaceType::default(), IfaceType::Sta);
        assert_eq!(serde_json::to_string(&IfaceType::P2p).unwrap(), "\"p2p\"");
    }
}
