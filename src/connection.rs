//! Joining a discovered network.
//!
//! The controller looks up the saved secret for the target's SSID, then asks
//! the adapter to associate. There is no retry: a failed association is
//! reported once and the caller decides what to do next.
//!
//! # Example
//!
//! ```no_run
//! use aeroport::{connection, interface, nmcli::Nmcli};
//!
//! let nmcli = Nmcli::default();
//! let iface = interface::resolve_interface(&nmcli, None).expect("No interface");
//! connection::join_bssid(&nmcli, &nmcli, &iface, "AA:BB:CC:DD:EE:FF").expect("Join failed");
//! ```

use log::debug;

use crate::backend::{SecretStore, WirelessAdapter};
use crate::credential::{self, Credential};
use crate::error::{AeroportError, Result};
use crate::filter;
use crate::interface::WirelessInterface;
use crate::scan::{self, NetworkDescriptor};

/// Everything the adapter needs to associate with one network.
///
/// Passed by value to [`WirelessAdapter::associate`], so each request is
/// used exactly once.
#[derive(Debug)]
pub struct JoinRequest<'a> {
    pub interface: &'a WirelessInterface,
    pub target: &'a NetworkDescriptor,
    pub credential: Option<Credential>,
}

/// Associates `interface` with `target`.
///
/// The credential is looked up by the target's SSID. Hidden networks have no
/// name to key on, so they are joined without one and the store is never
/// consulted.
///
/// # Returns
/// - `Ok(())` once the adapter reports success
/// - `Err(AeroportError::CredentialStoreError)` if the store lookup fails
/// - `Err(AeroportError::AssociationFailed)` if the adapter rejects the join or times out
pub fn join(
    adapter: &impl WirelessAdapter,
    store: &impl SecretStore,
    interface: &WirelessInterface,
    target: &NetworkDescriptor,
) -> Result<()> {
    let credential = match target.ssid.as_deref() {
        Some(ssid) => credential::resolve(store, ssid)?,
        None => {
            debug!("{} is hidden, joining without a credential", target.bssid);
            None
        }
    };

    let request = JoinRequest {
        interface,
        target,
        credential,
    };

    adapter.associate(request)?;
    debug!("Associated {} with {}", interface.name, target.bssid);

    Ok(())
}

/// Runs a live scan and picks the network whose BSSID is `bssid`.
///
/// # Returns
/// - `Ok(NetworkDescriptor)` for the matching network
/// - `Err(AeroportError::NetworkNotFound)` if the scan did not see that BSSID
pub fn find_target(
    adapter: &impl WirelessAdapter,
    interface: &WirelessInterface,
    bssid: &str,
) -> Result<NetworkDescriptor> {
    let result = scan::scan(adapter, interface, None, false)?;

    filter::by_bssid(&result.networks, bssid)
        .cloned()
        .ok_or_else(|| AeroportError::NetworkNotFound(bssid.to_string()))
}

/// [`find_target`] followed by [`join`]. Nothing is associated when the
/// BSSID is unknown.
pub fn join_bssid(
    adapter: &impl WirelessAdapter,
    store: &impl SecretStore,
    interface: &WirelessInterface,
    bssid: &str,
) -> Result<NetworkDescriptor> {
    let target = find_target(adapter, interface, bssid)?;
    join(adapter, store, interface, &target)?;

    Ok(target)
}
