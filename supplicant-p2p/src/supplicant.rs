//! The owning context: interface table plus the RPC objects built over it
//!
//! [`Supplicant`] is the single authority for structural changes. It creates a
//! [`P2pNetwork`] for every network added to a P2P interface, invalidates it
//! when the network or its interface goes away, and keeps the callbacks
//! clients registered for each network.
//!
//! All state sits behind one `parking_lot::RwLock`. RPC lookups take the read
//! side through [`NetworkRegistry::find_interface`]; every mutation takes the
//! write side. Callbacks are notified after the lock is released.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::{RwLock, RwLockReadGuard};

use crate::callback::P2pNetworkCallback;
use crate::config::{InterfaceConfig, NetworkConfig, SupplicantConfig};
use crate::error::{RegistryError, SupplicantError};
use crate::interface::Interface;
use crate::network::P2pNetwork;
use crate::registry::{InterfaceRef, NetworkRegistry};
use crate::status::IfaceType;

type NetworkKey = (String, u32);

#[derive(Default)]
struct State {
    interfaces: HashMap<String, Interface>,
    networks: HashMap<NetworkKey, Arc<P2pNetwork>>,
    callbacks: HashMap<NetworkKey, Vec<Arc<dyn P2pNetworkCallback>>>,
}

/// What a removal took out of the tables, handled once the lock is dropped
#[derive(Default)]
struct Removed {
    networks: Vec<Arc<P2pNetwork>>,
    callbacks: Vec<(NetworkKey, Vec<Arc<dyn P2pNetworkCallback>>)>,
}

impl State {
    fn take_network(&mut self, key: &NetworkKey, removed: &mut Removed) {
        if let Some(network) = self.networks.remove(key) {
            removed.networks.push(network);
        }
        if let Some(callbacks) = self.callbacks.remove(key) {
            removed.callbacks.push((key.clone(), callbacks));
        }
    }
}

impl Removed {
    fn finish(self) {
        for network in &self.networks {
            network.invalidate();
        }
        for ((ifname, network_id), callbacks) in self.callbacks {
            tracing::debug!(%ifname, network_id, count = callbacks.len(), "notifying callbacks of removal");
            for callback in callbacks {
                callback.on_network_removed(&ifname, network_id);
            }
        }
    }
}

pub struct Supplicant {
    me: Weak<Supplicant>,
    state: RwLock<State>,
}

impl std::fmt::Debug for Supplicant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("Supplicant")
            .field("interfaces", &state.interfaces.len())
            .field("p2p_networks", &state.networks.len())
            .finish_non_exhaustive()
    }
}

impl Supplicant {
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            state: RwLock::new(State::default()),
        })
    }

    /// Build a supplicant holding every interface and network in `config`
    pub fn from_config(config: &SupplicantConfig) -> Result<Arc<Self>, SupplicantError> {
        let supplicant = Self::new();

        for iface in &config.interfaces {
            supplicant.add_interface(&iface.name, iface.iface_type)?;
            for network in &iface.networks {
                supplicant.add_network(&iface.name, network.clone())?;
            }
            if iface.current_network.is_some() {
                supplicant.set_current_network(&iface.name, iface.current_network)?;
            }
        }

        Ok(supplicant)
    }

    pub fn add_interface(&self, name: &str, iface_type: IfaceType) -> Result<(), SupplicantError> {
        let mut state = self.state.write();
        if state.interfaces.contains_key(name) {
            return Err(SupplicantError::InterfaceExists(name.to_string()));
        }
        state
            .interfaces
            .insert(name.to_string(), Interface::new(name, iface_type));
        drop(state);

        tracing::info!(ifname = name, ?iface_type, "interface added");
        Ok(())
    }

    /// Remove an interface, invalidating every network object on it
    pub fn remove_interface(&self, name: &str) -> Result<(), SupplicantError> {
        let removed = {
            let mut guard = self.state.write();
            let state = &mut *guard;
            if state.interfaces.remove(name).is_none() {
                return Err(SupplicantError::UnknownInterface(name.to_string()));
            }

            // Keys come from the tables rather than the record, which may have
            // lost networks through the event loop
            let mut keys: Vec<NetworkKey> = state
                .networks
                .keys()
                .chain(state.callbacks.keys())
                .filter(|(ifname, _)| ifname == name)
                .cloned()
                .collect();
            keys.sort();
            keys.dedup();

            let mut removed = Removed::default();
            for key in &keys {
                state.take_network(key, &mut removed);
            }
            removed
        };

        tracing::info!(ifname = name, networks = removed.networks.len(), "interface removed");
        removed.finish();
        Ok(())
    }

    /// Store a network on `ifname` and return its id
    ///
    /// Networks on P2P interfaces get an RPC object, reachable through
    /// [`Supplicant::p2p_network`].
    pub fn add_network(&self, ifname: &str, config: NetworkConfig) -> Result<u32, SupplicantError> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let iface = state
            .interfaces
            .get_mut(ifname)
            .ok_or_else(|| SupplicantError::UnknownInterface(ifname.to_string()))?;

        let network_id = iface.add_network(config);
        let is_p2p = iface.iface_type() == IfaceType::P2p;

        // An event-loop removal can leave the previous holder of this id behind
        let key = (ifname.to_string(), network_id);
        let mut removed = Removed::default();
        state.take_network(&key, &mut removed);

        if is_p2p {
            let owner: Weak<dyn NetworkRegistry> = self.me.clone();
            let network = Arc::new(P2pNetwork::new(owner, ifname, network_id));
            state.networks.insert(key, network);
        }
        drop(guard);

        removed.finish();
        tracing::info!(ifname, network_id, "network added");
        Ok(network_id)
    }

    /// Remove a network, invalidating its RPC object and dropping its callbacks
    ///
    /// A record already removed through [`Supplicant::update_interface`] still
    /// has its RPC object and callbacks released here, but the call reports
    /// the network as unknown.
    pub fn remove_network(&self, ifname: &str, network_id: u32) -> Result<(), SupplicantError> {
        let (found, removed) = {
            let mut guard = self.state.write();
            let state = &mut *guard;
            let iface = state
                .interfaces
                .get_mut(ifname)
                .ok_or_else(|| SupplicantError::UnknownInterface(ifname.to_string()))?;
            let found = iface.remove_network(network_id).is_some();

            let mut removed = Removed::default();
            state.take_network(&(ifname.to_string(), network_id), &mut removed);
            (found, removed)
        };

        removed.finish();
        if !found {
            return Err(SupplicantError::UnknownNetwork {
                ifname: ifname.to_string(),
                network_id,
            });
        }

        tracing::info!(ifname, network_id, "network removed");
        Ok(())
    }

    pub fn set_current_network(
        &self,
        ifname: &str,
        network_id: Option<u32>,
    ) -> Result<(), SupplicantError> {
        let mut state = self.state.write();
        let iface = state
            .interfaces
            .get_mut(ifname)
            .ok_or_else(|| SupplicantError::UnknownInterface(ifname.to_string()))?;

        if !iface.set_current_network(network_id) {
            return Err(SupplicantError::UnknownNetwork {
                ifname: ifname.to_string(),
                network_id: network_id.unwrap_or_default(),
            });
        }
        Ok(())
    }

    /// Mutate an interface in place under the write lock
    ///
    /// This is the event-loop path. Records removed here disappear without
    /// their RPC objects being invalidated; those objects start failing their
    /// validity check on the next call.
    pub fn update_interface<R>(&self, ifname: &str, f: impl FnOnce(&mut Interface) -> R) -> Option<R> {
        let mut state = self.state.write();
        state.interfaces.get_mut(ifname).map(f)
    }

    /// RPC object for a network on a P2P interface
    pub fn p2p_network(&self, ifname: &str, network_id: u32) -> Option<Arc<P2pNetwork>> {
        self.state
            .read()
            .networks
            .get(&(ifname.to_string(), network_id))
            .cloned()
    }

    /// Snapshot of every interface in configuration file form
    ///
    /// Networks are written in id order, so a reload numbers them 0, 1, 2, ...
    /// again. The current network follows its record.
    pub fn to_config(&self) -> SupplicantConfig {
        let state = self.state.read();
        let mut interfaces: Vec<InterfaceConfig> = state
            .interfaces
            .values()
            .map(|iface| {
                let mut networks = Vec::new();
                let mut current_network = None;
                for (id, network) in iface.networks() {
                    if iface.current_network() == Some(id) {
                        current_network = Some(networks.len() as u32);
                    }
                    networks.push(network.clone());
                }
                InterfaceConfig {
                    name: iface.name().to_string(),
                    iface_type: iface.iface_type(),
                    networks,
                    current_network,
                }
            })
            .collect();
        drop(state);

        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        SupplicantConfig { interfaces }
    }

    pub fn interface_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state.read().interfaces.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn network_ids(&self, ifname: &str) -> Option<Vec<u32>> {
        self.state
            .read()
            .interfaces
            .get(ifname)
            .map(Interface::network_ids)
    }

    pub fn callback_count(&self, ifname: &str, network_id: u32) -> usize {
        self.state
            .read()
            .callbacks
            .get(&(ifname.to_string(), network_id))
            .map_or(0, Vec::len)
    }
}

impl NetworkRegistry for Supplicant {
    fn find_interface(&self, ifname: &str) -> Option<InterfaceRef<'_>> {
        RwLockReadGuard::try_map(self.state.read(), |state| state.interfaces.get(ifname)).ok()
    }

    fn add_p2p_network_callback(
        &self,
        ifname: &str,
        network_id: u32,
        callback: Arc<dyn P2pNetworkCallback>,
    ) -> Result<(), RegistryError> {
        let key = (ifname.to_string(), network_id);
        let mut guard = self.state.write();
        let state = &mut *guard;

        if !state.networks.contains_key(&key) {
            return Err(RegistryError::UnknownNetwork {
                ifname: ifname.to_string(),
                network_id,
            });
        }
        state.callbacks.entry(key).or_default().push(callback);

        tracing::debug!(ifname, network_id, "callback registered");
        Ok(())
    }
}
