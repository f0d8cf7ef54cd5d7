//! Observer handles registered against P2P network objects

/// Client-supplied observer for one P2P network
///
/// Network objects never inspect callbacks; they only hand them to the owning
/// supplicant together with the network's `(ifname, network_id)`.
pub trait P2pNetworkCallback: Send + Sync {
    /// Called once when the network this callback was registered for is removed
    fn on_network_removed(&self, _ifname: &str, _network_id: u32) {}
}
