//! Durable key-value storage for the wallet record.

use crate::credential::Credential;
use crate::error::VaultError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// The one key the wallet record lives under, shared with the web wallet.
pub const WALLET_RECORD_KEY: &str = "wallet-data";

/// A minimal durable string store, the shape of browser `localStorage`.
///
/// Only one record is ever stored, but the interface stays generic so test
/// doubles and alternative backends are trivial.
pub trait CredentialStore: Send + Sync {
    fn put(&self, key: &str, value: &str) -> Result<(), VaultError>;
    fn get(&self, key: &str) -> Result<Option<String>, VaultError>;
    fn remove(&self, key: &str) -> Result<(), VaultError>;
}

/// Serialize and persist the credential under [`WALLET_RECORD_KEY`].
pub fn save_credential(
    store: &dyn CredentialStore,
    credential: &Credential,
) -> Result<(), VaultError> {
    let json = serde_json::to_string(credential)?;
    store.put(WALLET_RECORD_KEY, &json)
}

/// Load the persisted credential, if any.
pub fn load_credential(store: &dyn CredentialStore) -> Result<Option<Credential>, VaultError> {
    match store.get(WALLET_RECORD_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Remove the persisted credential. Idempotent.
pub fn clear_credential(store: &dyn CredentialStore) -> Result<(), VaultError> {
    store.remove(WALLET_RECORD_KEY)
}

/// File-backed store: each key becomes `<dir>/<key>.json`.
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, VaultError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CredentialStore for FileCredentialStore {
    fn put(&self, key: &str, value: &str) -> Result<(), VaultError> {
        // Write-then-rename so a crash never leaves a half-written record.
        let path = self.record_path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, VaultError> {
        match fs::read_to_string(self.record_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&self, key: &str) -> Result<(), VaultError> {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
