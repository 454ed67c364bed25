//! Platform capabilities consumed by the core pipeline.
//!
//! The registry, scanner and association controller only ever talk to the
//! host through [`WirelessAdapter`], and the credential resolver only through
//! [`SecretStore`]. [`crate::nmcli::Nmcli`] implements both on Linux; tests
//! plug in in-memory fakes.

use crate::connection::JoinRequest;
use crate::credential::{Credential, StoreError};
use crate::error::Result;
use crate::interface::WirelessInterface;
use crate::scan::NetworkDescriptor;

/// Abstraction over the host's wireless control interface.
///
/// Every call is blocking. Timeouts are whatever the host imposes.
pub trait WirelessAdapter {
    /// All wireless adapters on the host, in the order the host reports them.
    fn interfaces(&self) -> Result<Vec<WirelessInterface>>;

    /// Return the networks visible to `interface`.
    ///
    /// With `use_cache` the adapter's last snapshot is returned without
    /// touching the radio; an adapter that never scanned yields an empty list.
    /// Otherwise a live scan runs first. `name_hint` may narrow a live scan
    /// request but callers must not rely on it to filter results.
    fn scan(
        &self,
        interface: &WirelessInterface,
        name_hint: Option<&str>,
        use_cache: bool,
    ) -> Result<Vec<NetworkDescriptor>>;

    /// Associate with the request's target network.
    fn associate(&self, request: JoinRequest<'_>) -> Result<()>;
}

/// Read-only access to the host's secure credential store.
pub trait SecretStore {
    /// Look up the secret stored under `key`.
    ///
    /// `Ok(None)` means the store has no such item.
    fn lookup(&self, key: &str) -> std::result::Result<Option<Credential>, StoreError>;
}
