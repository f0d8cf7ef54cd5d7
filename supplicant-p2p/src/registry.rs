//! Capability the owning supplicant exposes to its RPC objects
//!
//! An RPC object holds only a weak handle to a [`NetworkRegistry`] plus the
//! key of the record it represents. It re-resolves that key on every call.

use std::sync::Arc;

use crate::callback::P2pNetworkCallback;
use crate::error::RegistryError;
use crate::interface::Interface;

/// Read access to one interface, held only for the duration of a lookup
///
/// Implementations hand out a guard on their owner-side lock, so structural
/// changes to the interface table wait until the guard is dropped.
pub type InterfaceRef<'a> = parking_lot::MappedRwLockReadGuard<'a, Interface>;

/// Lookup and observer registration, as seen from an RPC object
///
/// Implementors are the single authority for mutating their interface table and
/// must serialize those mutations against outstanding [`InterfaceRef`]s.
pub trait NetworkRegistry: Send + Sync {
    /// Find an interface by name
    fn find_interface(&self, ifname: &str) -> Option<InterfaceRef<'_>>;

    /// Register `callback` as an observer of network `network_id` on `ifname`
    fn add_p2p_network_callback(
        &self,
        ifname: &str,
        network_id: u32,
        callback: Arc<dyn P2pNetworkCallback>,
    ) -> Result<(), RegistryError>;
}
