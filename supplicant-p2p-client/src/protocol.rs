//! Control socket wire format
//!
//! Every connection carries exactly one exchange: the client writes a single
//! newline-terminated JSON [`ControlRequest`], the daemon answers with a single
//! newline-terminated JSON [`ControlResponse`].
//!
//! ```text
//! -> {"type":"get-id","ifname":"p2p-dev-wlan0","network_id":3}
//! <- {"status":{"code":"SUCCESS","debug_message":""},"value":3}
//! ```

use serde::{Deserialize, Serialize};

/// Socket file name inside the daemon home directory
pub const CONTROL_SOCKET: &str = "control.sock";

/// Status code carried by a successful response
pub const SUCCESS: &str = "SUCCESS";

/// Requests understood by the daemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ControlRequest {
    GetId { ifname: String, network_id: u32 },
    GetInterfaceName { ifname: String, network_id: u32 },
    GetType { ifname: String, network_id: u32 },
    GetSsid { ifname: String, network_id: u32 },
    GetBssid { ifname: String, network_id: u32 },
    IsCurrent { ifname: String, network_id: u32 },
    IsPersistent { ifname: String, network_id: u32 },
    IsGo { ifname: String, network_id: u32 },
    GetClientList { ifname: String, network_id: u32 },
    /// Register a daemon-side callback under `name` for the network
    RegisterCallback {
        ifname: String,
        network_id: u32,
        name: String,
    },

    // Management requests, answered by the owning context directly
    ListNetworks { ifname: String },
    RemoveNetwork { ifname: String, network_id: u32 },
}

impl ControlRequest {
    /// The `(ifname, network_id)` a network-object request is addressed to
    ///
    /// Returns `None` for management requests.
    pub fn network_key(&self) -> Option<(&str, u32)> {
        match self {
            ControlRequest::GetId { ifname, network_id }
            | ControlRequest::GetInterfaceName { ifname, network_id }
            | ControlRequest::GetType { ifname, network_id }
            | ControlRequest::GetSsid { ifname, network_id }
            | ControlRequest::GetBssid { ifname, network_id }
            | ControlRequest::IsCurrent { ifname, network_id }
            | ControlRequest::IsPersistent { ifname, network_id }
            | ControlRequest::IsGo { ifname, network_id }
            | ControlRequest::GetClientList { ifname, network_id }
            | ControlRequest::RegisterCallback {
                ifname, network_id, ..
            } => Some((ifname, *network_id)),
            ControlRequest::ListNetworks { .. } | ControlRequest::RemoveNetwork { .. } => None,
        }
    }
}

/// Status half of a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireStatus {
    /// Status code name, e.g. `SUCCESS` or `FAILURE_NETWORK_INVALID`
    pub code: String,
    #[serde(default)]
    pub debug_message: String,
}

/// JSON response format to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlResponse {
    pub status: WireStatus,
    /// Operation result; the default value of the result type on failure
    #[serde(default)]
    pub value: serde_json::Value,
}

impl ControlResponse {
    pub fn is_success(&self) -> bool {
        self.status.code == SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_tagging() {
        let request = ControlRequest::RegisterCallback {
            ifname: "p2p-dev-wlan0".to_string(),
            network_id: 3,
            name: "ui".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "register-callback");
        assert_eq!(json["network_id"], 3);

        let parsed: ControlRequest =
            serde_json::from_str(r#"{"type":"is-go","ifname":"wlan0","network_id":1}"#).unwrap();
        assert_eq!(parsed.network_key(), Some(("wlan0", 1)));
    }

    #[test]
    fn test_management_requests_have_no_network_key() {
        let request = ControlRequest::ListNetworks {
            ifname: "wlan0".to_string(),
        };
        assert_eq!(request.network_key(), None);
    }

    #[test]
    fn test_response_defaults() {
        let response: ControlResponse =
            serde_json::from_str(r#"{"status":{"code":"FAILURE_UNKNOWN"}}"#).unwrap();
        assert!(!response.is_success());
        assert_eq!(response.status.debug_message, "");
        assert!(response.value.is_null());
    }
}
