//! End-to-end tests of the scan / filter / join pipeline.
//!
//! The host is replaced by in-memory fakes of `WirelessAdapter` and
//! `SecretStore` that record every call they receive.

use std::cell::RefCell;
use std::collections::HashMap;

use aeroport::{
    connection, filter, interface, scan, AeroportError, Credential, JoinRequest,
    NetworkDescriptor, Provenance, SecretStore, StoreError, WirelessAdapter, WirelessInterface,
};

#[derive(Debug, Clone, PartialEq)]
struct ScanCall {
    interface: String,
    hint: Option<String>,
    use_cache: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct AssociateCall {
    interface: String,
    bssid: String,
    secret: Option<String>,
}

/// Adapter whose radio "sees" `visible`. A live scan refreshes the cached
/// snapshot, which starts out empty.
#[derive(Default)]
struct FakeAdapter {
    interfaces: Vec<WirelessInterface>,
    visible: Vec<NetworkDescriptor>,
    snapshot: RefCell<Vec<NetworkDescriptor>>,
    scan_error: Option<AeroportError>,
    associate_error: Option<AeroportError>,
    scans: RefCell<Vec<ScanCall>>,
    associations: RefCell<Vec<AssociateCall>>,
}

impl FakeAdapter {
    fn with_networks(networks: Vec<NetworkDescriptor>) -> Self {
        FakeAdapter {
            interfaces: vec![iface("en0"), iface("en1")],
            visible: networks,
            ..Default::default()
        }
    }
}

impl WirelessAdapter for FakeAdapter {
    fn interfaces(&self) -> aeroport::Result<Vec<WirelessInterface>> {
        Ok(self.interfaces.clone())
    }

    fn scan(
        &self,
        interface: &WirelessInterface,
        name_hint: Option<&str>,
        use_cache: bool,
    ) -> aeroport::Result<Vec<NetworkDescriptor>> {
        self.scans.borrow_mut().push(ScanCall {
            interface: interface.name.clone(),
            hint: name_hint.map(String::from),
            use_cache,
        });

        if let Some(err) = &self.scan_error {
            return Err(err.clone());
        }

        if !use_cache {
            *self.snapshot.borrow_mut() = self.visible.clone();
        }
        Ok(self.snapshot.borrow().clone())
    }

    fn associate(&self, request: JoinRequest<'_>) -> aeroport::Result<()> {
        self.associations.borrow_mut().push(AssociateCall {
            interface: request.interface.name.clone(),
            bssid: request.target.bssid.clone(),
            secret: request.credential.as_ref().map(|c| c.expose().to_string()),
        });

        match &self.associate_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
struct FakeStore {
    secrets: HashMap<String, String>,
    error: Option<StoreError>,
    lookups: RefCell<Vec<String>>,
}

impl SecretStore for FakeStore {
    fn lookup(&self, key: &str) -> Result<Option<Credential>, StoreError> {
        self.lookups.borrow_mut().push(key.to_string());

        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        Ok(self.secrets.get(key).map(Credential::new))
    }
}

fn iface(name: &str) -> WirelessInterface {
    WirelessInterface {
        name: name.to_string(),
        state: "disconnected".to_string(),
    }
}

fn net(bssid: &str, ssid: Option<&str>) -> NetworkDescriptor {
    NetworkDescriptor {
        bssid: bssid.to_string(),
        ssid: ssid.map(String::from),
        signal: 60,
        noise: None,
        channel: 11,
        security: "WPA2".to_string(),
    }
}

fn home_and_guest() -> Vec<NetworkDescriptor> {
    vec![net("AA:BB", Some("Home")), net("CC:DD", Some("Guest"))]
}

// ==================== Interface Registry ====================

#[test]
fn test_default_interface_is_first() {
    let adapter = FakeAdapter::with_networks(Vec::new());

    let resolved = interface::resolve_interface(&adapter, None).unwrap();
    assert_eq!(resolved.name, "en0");
    assert_eq!(
        interface::list_interface_names(&adapter).unwrap(),
        vec!["en0", "en1"]
    );
}

#[test]
fn test_named_interface() {
    let adapter = FakeAdapter::with_networks(Vec::new());
    assert_eq!(
        interface::resolve_interface(&adapter, Some("en1")).unwrap().name,
        "en1"
    );
}

#[test]
fn test_unknown_interface() {
    let adapter = FakeAdapter::with_networks(Vec::new());
    assert_eq!(
        interface::resolve_interface(&adapter, Some("wlan7")),
        Err(AeroportError::InterfaceNotFound("wlan7".to_string()))
    );
}

#[test]
fn test_no_interface_available() {
    let adapter = FakeAdapter::default();
    assert!(interface::list_interface_names(&adapter).unwrap().is_empty());
    assert_eq!(
        interface::resolve_interface(&adapter, None),
        Err(AeroportError::NoInterfaceAvailable)
    );
}

// ==================== Network Scanner ====================

#[test]
fn test_cached_scan_without_snapshot_is_empty() {
    let adapter = FakeAdapter::with_networks(home_and_guest());
    let en0 = iface("en0");

    let result = scan::scan(&adapter, &en0, None, true).unwrap();
    assert!(result.networks.is_empty());
    assert_eq!(result.provenance, Provenance::Cached);
    assert_eq!(result.interface, "en0");
}

#[test]
fn test_live_scan_then_cached_scan() {
    let adapter = FakeAdapter::with_networks(home_and_guest());
    let en0 = iface("en0");

    let live = scan::scan(&adapter, &en0, None, false).unwrap();
    assert_eq!(live.provenance, Provenance::Live);
    assert_eq!(live.networks, home_and_guest());

    let cached = scan::scan(&adapter, &en0, None, true).unwrap();
    assert_eq!(cached.provenance, Provenance::Cached);
    assert_eq!(cached.networks, home_and_guest());
}

#[test]
fn test_scan_failure_propagates() {
    let adapter = FakeAdapter {
        scan_error: Some(AeroportError::ScanFailed("radio disabled".to_string())),
        ..FakeAdapter::with_networks(home_and_guest())
    };

    let err = scan::scan(&adapter, &iface("en0"), None, false).unwrap_err();
    assert_eq!(err, AeroportError::ScanFailed("radio disabled".to_string()));
}

#[test]
fn test_find_networks_with_pattern() {
    let adapter = FakeAdapter::with_networks(home_and_guest());
    let pattern = filter::compile_pattern(Some("Ho.*")).unwrap();

    let result = scan::find_networks(&adapter, &iface("en0"), pattern.as_ref(), false).unwrap();
    assert_eq!(result.networks, vec![net("AA:BB", Some("Home"))]);

    // A regex is never handed to the adapter as a network name
    assert_eq!(adapter.scans.borrow()[0].hint, None);
}

#[test]
fn test_literal_pattern_is_used_as_hint() {
    let adapter = FakeAdapter::with_networks(home_and_guest());
    let pattern = filter::compile_pattern(Some("Guest")).unwrap();

    let result = scan::find_networks(&adapter, &iface("en0"), pattern.as_ref(), false).unwrap();
    assert_eq!(result.networks, vec![net("CC:DD", Some("Guest"))]);
    assert_eq!(
        adapter.scans.borrow()[0],
        ScanCall {
            interface: "en0".to_string(),
            hint: Some("Guest".to_string()),
            use_cache: false,
        }
    );
}

#[test]
fn test_hint_does_not_replace_filtering() {
    // The adapter ignores the hint and returns everything it sees
    let adapter = FakeAdapter::with_networks(vec![
        net("AA:BB", Some("Home")),
        net("CC:DD", Some("Guest")),
        net("EE:FF", None),
    ]);
    let pattern = filter::compile_pattern(Some("Home")).unwrap();

    let result = scan::find_networks(&adapter, &iface("en0"), pattern.as_ref(), false).unwrap();
    assert_eq!(result.networks, vec![net("AA:BB", Some("Home"))]);
}

#[test]
fn test_find_networks_without_pattern_keeps_hidden() {
    let networks = vec![net("AA:BB", Some("Home")), net("11:22", None)];
    let adapter = FakeAdapter::with_networks(networks.clone());

    let result = scan::find_networks(&adapter, &iface("en0"), None, false).unwrap();
    assert_eq!(result.networks, networks);
}

// ==================== Association Controller ====================

#[test]
fn test_join_unknown_bssid() {
    let adapter = FakeAdapter::with_networks(home_and_guest());
    let store = FakeStore::default();

    let err = connection::join_bssid(&adapter, &store, &iface("en0"), "EE:FF").unwrap_err();

    assert_eq!(err, AeroportError::NetworkNotFound("EE:FF".to_string()));
    assert!(adapter.associations.borrow().is_empty());
    assert!(store.lookups.borrow().is_empty());
}

#[test]
fn test_join_uses_live_scan() {
    let adapter = FakeAdapter::with_networks(home_and_guest());
    let store = FakeStore::default();

    connection::join_bssid(&adapter, &store, &iface("en0"), "CC:DD").unwrap();

    let scans = adapter.scans.borrow();
    assert_eq!(scans.len(), 1);
    assert!(!scans[0].use_cache);
}

#[test]
fn test_join_with_saved_secret() {
    let adapter = FakeAdapter::with_networks(home_and_guest());
    let store = FakeStore {
        secrets: HashMap::from([("Home".to_string(), "hunter22".to_string())]),
        ..Default::default()
    };

    let target = connection::join_bssid(&adapter, &store, &iface("en0"), "AA:BB").unwrap();

    assert_eq!(target.ssid.as_deref(), Some("Home"));
    assert_eq!(*store.lookups.borrow(), vec!["Home".to_string()]);
    assert_eq!(
        *adapter.associations.borrow(),
        vec![AssociateCall {
            interface: "en0".to_string(),
            bssid: "AA:BB".to_string(),
            secret: Some("hunter22".to_string()),
        }]
    );
}

#[test]
fn test_join_store_miss_proceeds_without_secret() {
    let adapter = FakeAdapter::with_networks(home_and_guest());
    let store = FakeStore::default();

    connection::join_bssid(&adapter, &store, &iface("en0"), "AA:BB").unwrap();

    assert_eq!(*store.lookups.borrow(), vec!["Home".to_string()]);
    let associations = adapter.associations.borrow();
    assert_eq!(associations.len(), 1);
    assert_eq!(associations[0].secret, None);
}

#[test]
fn test_join_hidden_network_skips_store() {
    let hidden = net("11:22", None);
    let adapter = FakeAdapter::with_networks(vec![hidden.clone()]);
    let store = FakeStore {
        secrets: HashMap::from([(String::new(), "should-not-be-used".to_string())]),
        ..Default::default()
    };

    connection::join(&adapter, &store, &iface("en0"), &hidden).unwrap();

    assert!(store.lookups.borrow().is_empty());
    assert_eq!(adapter.associations.borrow()[0].secret, None);
}

#[test]
fn test_join_store_error_aborts() {
    let adapter = FakeAdapter::with_networks(home_and_guest());
    let store = FakeStore {
        error: Some(StoreError::Backend {
            status: 8,
            message: "Error: access denied".to_string(),
        }),
        ..Default::default()
    };

    let err = connection::join_bssid(&adapter, &store, &iface("en0"), "AA:BB").unwrap_err();

    assert!(matches!(err, AeroportError::CredentialStoreError(_)));
    assert!(adapter.associations.borrow().is_empty());
}

#[test]
fn test_association_failure_is_reported_once() {
    let adapter = FakeAdapter {
        associate_error: Some(AeroportError::AssociationFailed("wrong password".to_string())),
        ..FakeAdapter::with_networks(home_and_guest())
    };
    let store = FakeStore::default();

    let err = connection::join_bssid(&adapter, &store, &iface("en0"), "CC:DD").unwrap_err();

    assert_eq!(
        err,
        AeroportError::AssociationFailed("wrong password".to_string())
    );
    assert_eq!(adapter.associations.borrow().len(), 1);
    assert_eq!(err.exit_code(), 8);
}

#[test]
fn test_find_target_matches_exact_bssid() {
    let adapter = FakeAdapter::with_networks(home_and_guest());

    let target = connection::find_target(&adapter, &iface("en1"), "CC:DD").unwrap();
    assert_eq!(target, net("CC:DD", Some("Guest")));
    assert_eq!(adapter.scans.borrow()[0].interface, "en1");
    assert!(adapter.associations.borrow().is_empty());
}
