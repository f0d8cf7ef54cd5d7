//! # supplicant-p2p-client: Lightweight Control Socket Client
//!
//! This crate talks to a running `supplicant-p2p daemon` over its Unix control
//! socket. It carries only the wire types and has no supplicant state of its own.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────┐    Unix Socket     ┌───────────────────────┐
//! │ supplicant-p2p-client │◄──────────────────►│ supplicant-p2p daemon │
//! │     (lightweight)     │                    │  (P2P network objects)│
//! └───────────────────────┘                    └───────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use supplicant_p2p_client::{ControlRequest, call};
//!
//! # async fn example() -> Result<(), supplicant_p2p_client::ClientError> {
//! let socket = std::path::Path::new("/home/me/.supplicant-p2p/control.sock");
//! let response = call(socket, &ControlRequest::GetId {
//!     ifname: "p2p-dev-wlan0".to_string(),
//!     network_id: 3,
//! }).await?;
//! println!("{}: {}", response.status.code, response.value);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod protocol;

pub use client::{call, call_raw};
pub use error::ClientError;
pub use protocol::{CONTROL_SOCKET, ControlRequest, ControlResponse, WireStatus};
