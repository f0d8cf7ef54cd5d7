//! # supplicant-p2p
//!
//! RPC-facing objects for the networks of a Wi-Fi supplicant's P2P interfaces.
//!
//! The supplicant owns its interface and network tables. Clients never touch
//! those tables; they hold a [`P2pNetwork`], a handle that names one network by
//! `(ifname, network_id)`. Every call on the handle goes through
//! [`validate_and_call`], which re-resolves the name in the owning
//! [`Supplicant`] and answers with a [`SupplicantStatus`] and a value.
//!
//! A handle stops working in two ways:
//!
//! - the supplicant tears the network (or its interface) down and calls
//!   [`P2pNetwork::invalidate`];
//! - the record disappears from the table without anyone telling the handle.
//!
//! Callers see `FAILURE_NETWORK_INVALID` in both cases. The cause is logged
//! through `tracing` as an [`InvalidNetwork`].
//!
//! ## Quick Start
//!
//! ```
//! use supplicant_p2p::{IfaceType, NetworkConfig, Supplicant, SupplicantStatusCode};
//!
//! let supplicant = Supplicant::new();
//! supplicant.add_interface("p2p-dev-wlan0", IfaceType::P2p)?;
//! let id = supplicant.add_network("p2p-dev-wlan0", NetworkConfig::new("DIRECT-xy"))?;
//!
//! let network = supplicant.p2p_network("p2p-dev-wlan0", id).unwrap();
//! let (status, value) = network.get_id();
//! assert!(status.is_success());
//! assert_eq!(value, id);
//!
//! supplicant.remove_network("p2p-dev-wlan0", id)?;
//! let (status, _) = network.get_interface_name();
//! assert_eq!(status.code, SupplicantStatusCode::FailureNetworkInvalid);
//! # Ok::<(), supplicant_p2p::SupplicantError>(())
//! ```
//!
//! ## Concurrency
//!
//! Handle calls are synchronous in-memory lookups. The supplicant serializes
//! structural changes against lookups with a single owner-side lock, so
//! handles can be shared across threads and tasks.

mod callback;
mod config;
mod error;
mod interface;
mod mac;
mod network;
mod registry;
mod status;
mod supplicant;
mod validate;

pub use callback::P2pNetworkCallback;
pub use config::{InterfaceConfig, NetworkConfig, NetworkMode, SupplicantConfig};
pub use error::{ConfigError, InvalidNetwork, RegistryError, SupplicantError};
pub use interface::Interface;
pub use mac::{MacAddr, ParseMacAddrError};
pub use network::P2pNetwork;
pub use registry::{InterfaceRef, NetworkRegistry};
pub use status::{IfaceType, StatusAnd, SupplicantStatus, SupplicantStatusCode};
pub use supplicant::Supplicant;
pub use validate::{Validate, validate_and_call};
