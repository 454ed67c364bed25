//! Wireless network discovery.
//!
//! A scan either reads the adapter's last snapshot (cheap, possibly stale)
//! or asks the radio for a fresh one. Results keep the order the adapter
//! reported them in; nothing is sorted or deduplicated here, since two
//! access points may legitimately share an SSID.
//!
//! # Example
//!
//! ```no_run
//! use aeroport::{interface, nmcli::Nmcli, scan};
//!
//! let nmcli = Nmcli::default();
//! let iface = interface::resolve_interface(&nmcli, Some("wlan0")).expect("No interface");
//! let result = scan::scan(&nmcli, &iface, None, false).expect("Scan failed");
//! println!("{} networks ({})", result.networks.len(), result.provenance);
//! ```

use log::debug;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::backend::WirelessAdapter;
use crate::error::Result;
use crate::filter;
use crate::interface::WirelessInterface;

/// Immutable snapshot of one discovered network.
///
/// Two descriptors denote the same network only when their `bssid` matches;
/// `ssid` is neither unique nor always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkDescriptor {
    /// Hardware address of the access point, e.g. "AA:BB:CC:DD:EE:FF".
    pub bssid: String,

    /// Network name. `None` for hidden networks.
    pub ssid: Option<String>,

    /// Signal strength as reported by the adapter.
    pub signal: i32,

    /// Noise level in dBm, when the adapter measures it.
    pub noise: Option<i32>,

    /// Channel number.
    pub channel: u32,

    /// Security type (e.g. "WPA2"). Empty for open networks.
    pub security: String,
}

/// Where the descriptors of a [`ScanResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// A scan was triggered for this request.
    Live,
    /// The adapter's previous snapshot was reused.
    Cached,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Live => write!(f, "live"),
            Provenance::Cached => write!(f, "cached"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanResult {
    pub interface: String,
    pub provenance: Provenance,
    pub networks: Vec<NetworkDescriptor>,
}

/// Scans for networks visible to `interface`.
///
/// # Arguments
/// * `name_hint` - Advisory network name; may narrow a live scan, never filters
/// * `use_cache` - Reuse the adapter's last snapshot instead of scanning
///
/// # Returns
/// - `Ok(ScanResult)` in discovery order; empty when nothing was ever scanned
/// - `Err(AeroportError::ScanFailed)` if the adapter rejects the request
pub fn scan(
    adapter: &impl WirelessAdapter,
    interface: &WirelessInterface,
    name_hint: Option<&str>,
    use_cache: bool,
) -> Result<ScanResult> {
    let provenance = if use_cache {
        Provenance::Cached
    } else {
        Provenance::Live
    };

    let networks = adapter.scan(interface, name_hint, use_cache)?;
    debug!(
        "Scanned {} networks on {} ({})",
        networks.len(),
        interface.name,
        provenance
    );

    Ok(ScanResult {
        interface: interface.name.clone(),
        provenance,
        networks,
    })
}

/// Scans and keeps only networks whose SSID matches `pattern`.
///
/// A pattern without regex metacharacters is an exact network name, so it
/// doubles as the scan's name hint.
pub fn find_networks(
    adapter: &impl WirelessAdapter,
    interface: &WirelessInterface,
    pattern: Option<&Regex>,
    use_cache: bool,
) -> Result<ScanResult> {
    let hint = pattern
        .map(Regex::as_str)
        .filter(|p| !p.is_empty() && regex::escape(p) == *p);

    let mut result = scan(adapter, interface, hint, use_cache)?;
    result.networks = filter::by_pattern(&result.networks, pattern);
    debug!("{} networks left after filtering", result.networks.len());

    Ok(result)
}
