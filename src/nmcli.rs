//! NetworkManager backend.
//!
//! Implements both [`WirelessAdapter`] and [`SecretStore`] by running the
//! `nmcli` command-line tool. Saved connection profiles double as the
//! credential store: a profile is named after its SSID and holds the PSK.
//!
//! # Requirements
//!
//! - NetworkManager must be installed and running
//! - The `nmcli` command must be available in PATH (or configured explicitly)
//! - Reading saved secrets requires permission to see them (`nmcli -s`)
//!
//! # Commands Executed
//! ```bash
//! nmcli -t -f DEVICE,TYPE,STATE device
//! nmcli -t -f BSSID,SSID,CHAN,SIGNAL,SECURITY device wifi list --rescan <yes|no> ifname <interface>
//! nmcli device wifi rescan ifname <interface> ssid <name>
//! nmcli device wifi connect <bssid> [password <secret>] ifname <interface>
//! nmcli -s -g 802-11-wireless-security.psk connection show id <ssid>
//! ```

use log::debug;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::backend::{SecretStore, WirelessAdapter};
use crate::connection::JoinRequest;
use crate::credential::{Credential, StoreError};
use crate::error::{AeroportError, Result};
use crate::interface::WirelessInterface;
use crate::scan::NetworkDescriptor;

/// nmcli exit status when the `--wait` timeout expired.
const EXIT_TIMEOUT: i32 = 3;

/// nmcli exit status for a connection, device or access point that does not exist.
const EXIT_NOT_FOUND: i32 = 10;

const SCAN_FIELDS: &str = "BSSID,SSID,CHAN,SIGNAL,SECURITY";

#[derive(Debug, Clone)]
pub struct Nmcli {
    program: PathBuf,
}

impl Default for Nmcli {
    fn default() -> Self {
        Nmcli {
            program: PathBuf::from("nmcli"),
        }
    }
}

impl Nmcli {
    /// Use a specific `nmcli` executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Nmcli {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn run(&self, args: &[&str]) -> std::io::Result<Output> {
        Command::new(&self.program).args(args).output()
    }

    fn list_networks(&self, interface: &str, rescan: bool) -> Result<Vec<NetworkDescriptor>> {
        let rescan = if rescan { "yes" } else { "no" };
        debug!("Listing networks on {} (rescan {})", interface, rescan);

        let output = self
            .run(&[
                "-t", "-f", SCAN_FIELDS, "device", "wifi", "list", "--rescan", rescan, "ifname",
                interface,
            ])
            .map_err(|e| AeroportError::ScanFailed(format!("Failed to execute nmcli: {}", e)))?;

        if !output.status.success() {
            return Err(AeroportError::ScanFailed(failure_message(&output)));
        }

        Ok(parse_networks(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl WirelessAdapter for Nmcli {
    fn interfaces(&self) -> Result<Vec<WirelessInterface>> {
        let output = self
            .run(&["-t", "-f", "DEVICE,TYPE,STATE", "device"])
            .map_err(|e| {
                AeroportError::AdapterUnavailable(format!("Failed to execute nmcli: {}", e))
            })?;

        if !output.status.success() {
            return Err(AeroportError::AdapterUnavailable(failure_message(&output)));
        }

        Ok(parse_interfaces(&String::from_utf8_lossy(&output.stdout)))
    }

    fn scan(
        &self,
        interface: &WirelessInterface,
        name_hint: Option<&str>,
        use_cache: bool,
    ) -> Result<Vec<NetworkDescriptor>> {
        if use_cache {
            return self.list_networks(&interface.name, false);
        }

        let Some(hint) = name_hint else {
            return self.list_networks(&interface.name, true);
        };

        // The hinted rescan is the live scan, so the listing after it must
        // not trigger another, unhinted one
        debug!("Requesting scan for '{}' on {}", hint, interface.name);
        let output = self
            .run(&[
                "device",
                "wifi",
                "rescan",
                "ifname",
                interface.name.as_str(),
                "ssid",
                hint,
            ])
            .map_err(|e| AeroportError::ScanFailed(format!("Failed to execute nmcli: {}", e)))?;

        if !output.status.success() {
            return Err(AeroportError::ScanFailed(failure_message(&output)));
        }

        self.list_networks(&interface.name, false)
    }

    fn associate(&self, request: JoinRequest<'_>) -> Result<()> {
        let JoinRequest {
            interface,
            target,
            credential,
        } = request;

        debug!(
            "Connecting {} to {} ({} credential)",
            interface.name,
            target.bssid,
            if credential.is_some() { "with" } else { "without" }
        );

        let mut args: Vec<&str> = vec!["device", "wifi", "connect", target.bssid.as_str()];
        if let Some(credential) = credential.as_ref() {
            args.extend(["password", credential.expose()]);
        }
        args.extend(["ifname", interface.name.as_str()]);

        let output = self
            .run(&args)
            .map_err(|e| {
                AeroportError::AssociationFailed(format!("Failed to execute nmcli: {}", e))
            })?;

        match output.status.code() {
            Some(0) => Ok(()),
            Some(EXIT_TIMEOUT) => Err(AeroportError::AssociationFailed(format!(
                "timed out joining {}",
                target.bssid
            ))),
            _ => Err(AeroportError::AssociationFailed(failure_message(&output))),
        }
    }
}

impl SecretStore for Nmcli {
    fn lookup(&self, key: &str) -> std::result::Result<Option<Credential>, StoreError> {
        let output = self
            .run(&[
                "-s",
                "-g",
                "802-11-wireless-security.psk",
                "connection",
                "show",
                "id",
                key,
            ])
            .map_err(|e| StoreError::Unavailable(format!("Failed to execute nmcli: {}", e)))?;

        match output.status.code() {
            Some(0) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let secret = stdout.trim_end_matches(['\n', '\r']);
                if secret.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Credential::new(secret)))
                }
            }
            Some(EXIT_NOT_FOUND) => Ok(None),
            code => Err(StoreError::Backend {
                status: code.unwrap_or(-1),
                message: failure_message(&output),
            }),
        }
    }
}

/// Extract error message from stderr (preferred) or stdout
fn failure_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout)
    } else {
        stderr
    };
    message.trim().to_string()
}

/// Split one line of terse (`-t`) output into fields.
///
/// nmcli escapes `:` and `\` inside values with a backslash, which matters
/// for BSSIDs.
fn split_terse(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

/// Parse `DEVICE:TYPE:STATE` rows, keeping Wi-Fi devices only.
fn parse_interfaces(stdout: &str) -> Vec<WirelessInterface> {
    stdout
        .lines()
        .map(split_terse)
        .filter(|fields| fields.len() >= 3 && fields[1] == "wifi")
        .map(|fields| WirelessInterface {
            name: fields[0].clone(),
            state: fields[2].clone(),
        })
        .collect()
}

/// Parse `BSSID:SSID:CHAN:SIGNAL:SECURITY` rows in the order nmcli printed them.
fn parse_networks(stdout: &str) -> Vec<NetworkDescriptor> {
    let mut networks = Vec::new();

    for line in stdout.lines() {
        let fields = split_terse(line);
        if fields.len() < 5 || fields[0].is_empty() {
            continue;
        }

        let ssid = Some(fields[1].clone()).filter(|s| !s.is_empty());

        networks.push(NetworkDescriptor {
            bssid: fields[0].clone(),
            ssid,
            signal: fields[3].parse().unwrap_or(0),
            // NetworkManager does not report per-BSS noise
            noise: None,
            channel: fields[2].parse().unwrap_or(0),
            security: fields[4].clone(),
        });
    }

    networks
}
