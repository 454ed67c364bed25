use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AeroportError {
    #[error("No wireless interface available")]
    NoInterfaceAvailable,

    #[error("Unable to get {0} interface")]
    InterfaceNotFound(String),

    #[error("Scan failed: {0}")]
    ScanFailed(String),

    #[error("{0}: Unknown network")]
    NetworkNotFound(String),

    #[error("Credential store error: {0}")]
    CredentialStoreError(String),

    #[error("Association failed: {0}")]
    AssociationFailed(String),

    #[error("Invalid ssid pattern: {0}")]
    InvalidPattern(String),

    #[error("Wireless backend unavailable: {0}")]
    AdapterUnavailable(String),
}

impl AeroportError {
    /// Process exit status for this failure kind. Never 0, 1 (failures
    /// outside the taxonomy) or 2 (command-line usage errors).
    pub fn exit_code(&self) -> u8 {
        match self {
            AeroportError::InvalidPattern(_) => 10,
            AeroportError::NoInterfaceAvailable => 3,
            AeroportError::InterfaceNotFound(_) => 4,
            AeroportError::ScanFailed(_) => 5,
            AeroportError::NetworkNotFound(_) => 6,
            AeroportError::CredentialStoreError(_) => 7,
            AeroportError::AssociationFailed(_) => 8,
            AeroportError::AdapterUnavailable(_) => 9,
        }
    }
}

pub type Result<T> = std::result::Result<T, AeroportError>;
