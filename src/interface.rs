use log::debug;

use crate::backend::WirelessAdapter;
use crate::error::{AeroportError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WirelessInterface {
    pub name: String,
    pub state: String,
}

/// Names of all wireless interfaces on the system
pub fn list_interface_names(adapter: &impl WirelessAdapter) -> Result<Vec<String>> {
    Ok(adapter
        .interfaces()?
        .into_iter()
        .map(|i| i.name)
        .collect())
}

/// Get a specific interface by name
pub fn get_interface(adapter: &impl WirelessAdapter, name: &str) -> Result<WirelessInterface> {
    adapter
        .interfaces()?
        .into_iter()
        .find(|i| i.name == name)
        .ok_or_else(|| AeroportError::InterfaceNotFound(name.to_string()))
}

/// Find the first wireless interface the host reports
pub fn first_interface(adapter: &impl WirelessAdapter) -> Result<WirelessInterface> {
    adapter
        .interfaces()?
        .into_iter()
        .next()
        .ok_or(AeroportError::NoInterfaceAvailable)
}

/// Resolve interface: use provided name or fall back to the first one
pub fn resolve_interface(
    adapter: &impl WirelessAdapter,
    interface: Option<&str>,
) -> Result<WirelessInterface> {
    let iface = match interface {
        Some(name) => get_interface(adapter, name)?,
        None => first_interface(adapter)?,
    };
    debug!("Resolved interface {} ({})", iface.name, iface.state);
    Ok(iface)
}
