//! Saved network credentials.
//!
//! Secrets are only ever read from the host's store and handed straight to
//! the adapter. They are never written anywhere and never logged: the
//! [`Credential`] type redacts itself in `Debug` output.

use log::debug;
use std::fmt;
use thiserror::Error;

use crate::backend::SecretStore;
use crate::error::{AeroportError, Result};

/// A secret fetched from the credential store.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Credential(secret.into())
    }

    /// The secret itself. Only the adapter's associate call should need this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// A credential store failure other than "item not found".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{message} (status {status})")]
    Backend { status: i32, message: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Looks up the stored secret for `network_name`.
///
/// # Returns
/// - `Ok(Some(credential))` if the store has a secret for this network
/// - `Ok(None)` if it has none; the join then proceeds without a password
/// - `Err(AeroportError::CredentialStoreError)` for any other store failure
pub fn resolve(store: &impl SecretStore, network_name: &str) -> Result<Option<Credential>> {
    match store.lookup(network_name) {
        Ok(credential) => {
            debug!(
                "Credential for '{}': {}",
                network_name,
                if credential.is_some() { "found" } else { "absent" }
            );
            Ok(credential)
        }
        Err(e) => Err(AeroportError::CredentialStoreError(format!(
            "Getting password for {} failed: {}",
            network_name, e
        ))),
    }
}
