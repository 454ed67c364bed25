//! Aeroport: list nearby wireless networks and join them with saved credentials.
//!
//! This library discovers the networks visible to a wireless adapter, filters
//! them by SSID pattern or BSSID, and joins a chosen one using the password
//! the host already has on file for it.
//!
//! # Modules
//!
//! - [`backend`] - The adapter and credential store capabilities the core relies on
//! - [`config`] - Optional TOML configuration
//! - [`connection`] - Joining a network (credential lookup + association)
//! - [`credential`] - Saved secret lookup with "absent" vs "failed" semantics
//! - [`error`] - Custom error types for the library
//! - [`filter`] - SSID pattern and BSSID selection over scan results
//! - [`interface`] - Wireless interface discovery and resolution
//! - [`nmcli`] - NetworkManager implementation of the backend traits
//! - [`render`] - Display records and template rendering
//! - [`scan`] - Live and cached network scanning
//!
//! # Example Usage
//!
//! ```no_run
//! use aeroport::{filter, interface, scan, Nmcli};
//!
//! let nmcli = Nmcli::default();
//! let iface = interface::resolve_interface(&nmcli, None).expect("No wireless interface");
//!
//! let pattern = filter::compile_pattern(Some("Ho.*")).expect("Bad pattern");
//! let result = scan::find_networks(&nmcli, &iface, pattern.as_ref(), true).expect("Scan failed");
//! for net in &result.networks {
//!     println!("{} {:?}", net.bssid, net.ssid);
//! }
//! ```

/// Backend module declaring the `WirelessAdapter` and `SecretStore` traits.
pub mod backend;

/// Configuration module for the optional settings file.
pub mod config;

/// Connection module: resolves the credential and associates with a network.
pub mod connection;

/// Credential module wrapping the host's secure store.
pub mod credential;

/// Error module defining custom error types for the library.
/// Uses `thiserror` for ergonomic error handling.
pub mod error;

/// Filter module selecting networks by SSID regex or BSSID.
pub mod filter;

/// Interface module for wireless adapter discovery and resolution.
pub mod interface;

/// NetworkManager backend driven through `nmcli`.
pub mod nmcli;

/// Render module producing the human-readable and JSON listings.
pub mod render;

/// Scan module for discovering available wireless networks.
pub mod scan;

pub use backend::{SecretStore, WirelessAdapter};

pub use connection::{find_target, join, join_bssid, JoinRequest};

pub use credential::{Credential, StoreError};

pub use error::{AeroportError, Result};

pub use interface::{list_interface_names, resolve_interface, WirelessInterface};

pub use nmcli::Nmcli;

pub use scan::{find_networks, NetworkDescriptor, Provenance, ScanResult};
