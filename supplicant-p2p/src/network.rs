//! RPC object for one network on a P2P interface
//!
//! A [`P2pNetwork`] names a network record by `(ifname, network_id)` and never
//! holds on to the record itself. Every call re-resolves the key through the
//! owning [`NetworkRegistry`]. If the owner removed the network, removed its
//! interface, or called [`P2pNetwork::invalidate`], every call fails with
//! `FAILURE_NETWORK_INVALID`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use crate::callback::P2pNetworkCallback;
use crate::config::NetworkConfig;
use crate::error::InvalidNetwork;
use crate::interface::Interface;
use crate::mac::MacAddr;
use crate::registry::NetworkRegistry;
use crate::status::{IfaceType, StatusAnd, SupplicantStatus, SupplicantStatusCode};
use crate::validate::{Validate, validate_and_call};

const INVALID: SupplicantStatusCode = SupplicantStatusCode::FailureNetworkInvalid;

pub struct P2pNetwork {
    owner: Weak<dyn NetworkRegistry>,
    ifname: String,
    network_id: u32,
    is_valid: AtomicBool,
}

impl std::fmt::Debug for P2pNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("P2pNetwork")
            .field("ifname", &self.ifname)
            .field("network_id", &self.network_id)
            .field("is_valid", &self.is_valid.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl P2pNetwork {
    /// Create an RPC object for an existing record; touches nothing in `owner`
    pub fn new(owner: Weak<dyn NetworkRegistry>, ifname: impl Into<String>, network_id: u32) -> Self {
        Self {
            owner,
            ifname: ifname.into(),
            network_id,
            is_valid: AtomicBool::new(true),
        }
    }

    pub fn ifname(&self) -> &str {
        &self.ifname
    }

    pub fn network_id(&self) -> u32 {
        self.network_id
    }

    /// Permanently mark this object invalid
    ///
    /// Only the owning supplicant calls this, when the network or its interface
    /// is torn down. Repeated calls are no-ops.
    pub fn invalidate(&self) {
        if self.is_valid.swap(false, Ordering::AcqRel) {
            tracing::debug!(ifname = %self.ifname, network_id = self.network_id, "network object invalidated");
        }
    }

    /// Resolve the backing record without reading it
    pub fn resolve(&self) -> Result<(), InvalidNetwork> {
        self.with_network(|_, _| ())
    }

    /// Look up the record and run `f` on it while the owner's read guard is held
    fn with_network<R>(
        &self,
        f: impl FnOnce(&Interface, &NetworkConfig) -> R,
    ) -> Result<R, InvalidNetwork> {
        let owner = self.owner.upgrade().ok_or(InvalidNetwork::OwnerGone)?;
        let iface = owner
            .find_interface(&self.ifname)
            .ok_or_else(|| InvalidNetwork::InterfaceMissing {
                ifname: self.ifname.clone(),
            })?;
        let network = iface
            .network(self.network_id)
            .ok_or_else(|| InvalidNetwork::NetworkMissing {
                ifname: self.ifname.clone(),
                network_id: self.network_id,
            })?;
        let result = f(&iface, network);
        Ok(result)
    }

    /// Read from the record, failing with the invalid status if it vanished
    /// after the validity check
    fn read_network<T: Default>(
        &self,
        f: impl FnOnce(&Interface, &NetworkConfig) -> StatusAnd<T>,
    ) -> StatusAnd<T> {
        self.with_network(f).unwrap_or_else(|reason| {
            tracing::debug!(%reason, "network disappeared during call");
            (SupplicantStatus::new(INVALID), T::default())
        })
    }

    pub fn get_id(&self) -> StatusAnd<u32> {
        validate_and_call(self, INVALID, Self::get_id_internal)
    }

    pub fn get_interface_name(&self) -> StatusAnd<String> {
        validate_and_call(self, INVALID, Self::get_interface_name_internal)
    }

    pub fn get_type(&self) -> StatusAnd<IfaceType> {
        validate_and_call(self, INVALID, Self::get_type_internal)
    }

    pub fn register_callback(&self, callback: Arc<dyn P2pNetworkCallback>) -> SupplicantStatus {
        let (status, ()) = validate_and_call(self, INVALID, |this| {
            (this.register_callback_internal(callback), ())
        });
        status
    }

    pub fn get_ssid(&self) -> StatusAnd<Vec<u8>> {
        validate_and_call(self, INVALID, Self::get_ssid_internal)
    }

    /// All-zero when the record has no BSSID
    pub fn get_bssid(&self) -> StatusAnd<MacAddr> {
        validate_and_call(self, INVALID, Self::get_bssid_internal)
    }

    pub fn is_current(&self) -> StatusAnd<bool> {
        validate_and_call(self, INVALID, Self::is_current_internal)
    }

    pub fn is_persistent(&self) -> StatusAnd<bool> {
        validate_and_call(self, INVALID, Self::is_persistent_internal)
    }

    pub fn is_go(&self) -> StatusAnd<bool> {
        validate_and_call(self, INVALID, Self::is_go_internal)
    }

    pub fn get_client_list(&self) -> StatusAnd<Vec<MacAddr>> {
        validate_and_call(self, INVALID, Self::get_client_list_internal)
    }

    fn get_id_internal(&self) -> StatusAnd<u32> {
        (SupplicantStatus::ok(), self.network_id)
    }

    fn get_interface_name_internal(&self) -> StatusAnd<String> {
        (SupplicantStatus::ok(), self.ifname.clone())
    }

    fn get_type_internal(&self) -> StatusAnd<IfaceType> {
        (SupplicantStatus::ok(), IfaceType::P2p)
    }

    fn register_callback_internal(&self, callback: Arc<dyn P2pNetworkCallback>) -> SupplicantStatus {
        let Some(owner) = self.owner.upgrade() else {
            tracing::warn!(ifname = %self.ifname, network_id = self.network_id, "owner gone, callback dropped");
            return SupplicantStatus::new(SupplicantStatusCode::FailureUnknown);
        };

        match owner.add_p2p_network_callback(&self.ifname, self.network_id, callback) {
            Ok(()) => SupplicantStatus::ok(),
            Err(e) => {
                tracing::warn!(error = %e, "callback registration rejected");
                SupplicantStatus::new(SupplicantStatusCode::FailureUnknown)
            }
        }
    }

    fn get_ssid_internal(&self) -> StatusAnd<Vec<u8>> {
        self.read_network(|_, network| (SupplicantStatus::ok(), network.ssid.clone()))
    }

    fn get_bssid_internal(&self) -> StatusAnd<MacAddr> {
        self.read_network(|_, network| {
            (SupplicantStatus::ok(), network.bssid.unwrap_or(MacAddr::ZERO))
        })
    }

    fn is_current_internal(&self) -> StatusAnd<bool> {
        self.read_network(|iface, _| {
            (SupplicantStatus::ok(), iface.current_network() == Some(self.network_id))
        })
    }

    fn is_persistent_internal(&self) -> StatusAnd<bool> {
        self.read_network(|_, network| (SupplicantStatus::ok(), network.persistent))
    }

    fn is_go_internal(&self) -> StatusAnd<bool> {
        self.read_network(|_, network| (SupplicantStatus::ok(), network.is_go()))
    }

    fn get_client_list_internal(&self) -> StatusAnd<Vec<MacAddr>> {
        self.read_network(|_, network| {
            if network.p2p_client_list.is_empty() {
                return (
                    SupplicantStatus::with_message(
                        SupplicantStatusCode::FailureUnknown,
                        "network has no P2P client list",
                    ),
                    Vec::new(),
                );
            }
            (SupplicantStatus::ok(), network.p2p_client_list.clone())
        })
    }
}

impl Validate for P2pNetwork {
    fn check_validity(&self) -> Result<(), InvalidNetwork> {
        if !self.is_valid.load(Ordering::Acquire) {
            return Err(InvalidNetwork::Invalidated);
        }
        self.resolve()
    }
}
