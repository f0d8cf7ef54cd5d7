//! Per-interface network table

use std::collections::BTreeMap;

use crate::config::NetworkConfig;
use crate::status::IfaceType;

/// One supplicant interface and the networks configured on it
#[derive(Debug, Clone)]
pub struct Interface {
    name: String,
    iface_type: IfaceType,
    networks: BTreeMap<u32, NetworkConfig>,
    current_network: Option<u32>,
}

impl Interface {
    pub fn new(name: impl Into<String>, iface_type: IfaceType) -> Self {
        Self {
            name: name.into(),
            iface_type,
            networks: BTreeMap::new(),
            current_network: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn iface_type(&self) -> IfaceType {
        self.iface_type
    }

    pub fn network(&self, network_id: u32) -> Option<&NetworkConfig> {
        self.networks.get(&network_id)
    }

    /// Configured networks in ascending id order
    pub fn networks(&self) -> impl Iterator<Item = (u32, &NetworkConfig)> {
        self.networks.iter().map(|(&id, config)| (id, config))
    }

    /// Configured network ids in ascending order
    pub fn network_ids(&self) -> Vec<u32> {
        self.networks.keys().copied().collect()
    }

    /// Store a new network and return its id
    ///
    /// The id is one past the highest id in use, so ids of removed networks
    /// are only reused once every higher id is gone too.
    pub fn add_network(&mut self, config: NetworkConfig) -> u32 {
        let id = self
            .networks
            .last_key_value()
            .map_or(0, |(&last, _)| last + 1);
        self.networks.insert(id, config);
        id
    }

    /// Remove a network; clears the current network if it was this one
    pub fn remove_network(&mut self, network_id: u32) -> Option<NetworkConfig> {
        let removed = self.networks.remove(&network_id)?;
        if self.current_network == Some(network_id) {
            self.current_network = None;
        }
        Some(removed)
    }

    pub fn current_network(&self) -> Option<u32> {
        self.current_network
    }

    /// Returns false, leaving the current network unchanged, if `network_id`
    /// is not configured
    pub fn set_current_network(&mut self, network_id: Option<u32>) -> bool {
        if let Some(id) = network_id {
            if !self.networks.contains_key(&id) {
                return false;
            }
        }
        self.current_network = network_id;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_highest() {
        let mut iface = Interface::new("p2p-dev-wlan0", IfaceType::P2p);
        assert_eq!(iface.add_network(NetworkConfig::new("a")), 0);
        assert_eq!(iface.add_network(NetworkConfig::new("b")), 1);
        assert_eq!(iface.add_network(NetworkConfig::new("c")), 2);

        iface.remove_network(1);
        assert_eq!(iface.add_network(NetworkConfig::new("d")), 3);
        assert_eq!(iface.network_ids(), vec![0, 2, 3]);

        iface.remove_network(3);
        iface.remove_network(2);
        assert_eq!(iface.add_network(NetworkConfig::new("e")), 1);

        let ssids: Vec<_> = iface
            .networks()
            .map(|(id, network)| (id, network.ssid.clone()))
            .collect();
        assert_eq!(ssids, vec![(0, b"a".to_vec()), (1, b"e".to_vec())]);
    }

    #[test]
    fn test_current_network_tracking() {
        let mut iface = Interface::new("wlan0", IfaceType::Sta);
        let id = iface.add_network(NetworkConfig::new("home"));

        assert!(!iface.set_current_network(Some(id + 1)));
        assert_eq!(iface.current_network(), None);

        assert!(iface.set_current_network(Some(id)));
        assert_eq!(iface.current_network(), Some(id));

        iface.remove_network(id);
        assert_eq!(iface.current_network(), None);
        assert!(iface.remove_network(id).is_none());
    }
}
