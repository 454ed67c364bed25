//! Selection of scan results by SSID pattern or by BSSID.
//!
//! Both filters are pure: they never reorder their input.

use regex::Regex;

use crate::error::{AeroportError, Result};
use crate::scan::NetworkDescriptor;

/// Compile a user-supplied SSID pattern. An empty pattern means "no filter".
pub fn compile_pattern(pattern: Option<&str>) -> Result<Option<Regex>> {
    match pattern {
        None | Some("") => Ok(None),
        Some(p) => Regex::new(p)
            .map(Some)
            .map_err(|e| AeroportError::InvalidPattern(e.to_string())),
    }
}

/// Keep networks whose SSID matches `pattern` anywhere in the name.
///
/// Without a pattern every network is kept. With one, hidden networks
/// (no SSID) are always dropped.
pub fn by_pattern(
    networks: &[NetworkDescriptor],
    pattern: Option<&Regex>,
) -> Vec<NetworkDescriptor> {
    match pattern {
        None => networks.to_vec(),
        Some(regex) => networks
            .iter()
            .filter(|n| n.ssid.as_deref().is_some_and(|ssid| regex.is_match(ssid)))
            .cloned()
            .collect(),
    }
}

/// The network with exactly this BSSID, if the scan saw it.
pub fn by_bssid<'a>(
    networks: &'a [NetworkDescriptor],
    bssid: &str,
) -> Option<&'a NetworkDescriptor> {
    networks.iter().find(|n| n.bssid == bssid)
}
