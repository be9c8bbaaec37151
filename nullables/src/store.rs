//! Nullable credential store: thread-safe in-memory storage for testing.

use bgeo_vault::{CredentialStore, VaultError};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory credential store.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullCredentialStore {
    records: Mutex<HashMap<String, String>>,
}

impl NullCredentialStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

impl Default for NullCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for NullCredentialStore {
    fn put(&self, key: &str, value: &str) -> Result<(), VaultError> {
        self.records
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, VaultError> {
        Ok(self.records.lock().unwrap().get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<(), VaultError> {
        self.records.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bgeo_types::Address;
    use bgeo_vault::{clear_credential, load_credential, save_credential, Credential};

    #[test]
    fn put_get_remove_roundtrip() {
        let store = NullCredentialStore::new();
        store.put("wallet-data", "value").unwrap();
        assert_eq!(store.get("wallet-data").unwrap().as_deref(), Some("value"));

        store.remove("wallet-data").unwrap();
        assert!(store.get("wallet-data").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn works_with_credential_helpers() {
        let store = NullCredentialStore::new();
        let credential = Credential::new(
            "v1$aa$bb".to_string(),
            Address::parse("bgeo1abc").unwrap(),
        );

        save_credential(&store, &credential).unwrap();
        assert_eq!(load_credential(&store).unwrap().unwrap(), credential);

        clear_credential(&store).unwrap();
        assert!(load_credential(&store).unwrap().is_none());
    }
}
