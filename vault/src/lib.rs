//! Encrypted wallet credential storage.
//!
//! A connected wallet is persisted as one record: the private key encrypted
//! under the user's password, next to the plaintext address. The cipher is
//! password-as-key AES-256-CBC with no key stretching and no authentication,
//! matching the wire format this tool shares with the web wallet. The
//! plaintext key only ever exists as a transient in-memory value.

pub mod cipher;
pub mod credential;
pub mod error;
pub mod store;

pub use cipher::{open, seal};
pub use credential::Credential;
pub use error::VaultError;
pub use store::{
    clear_credential, load_credential, save_credential, CredentialStore, FileCredentialStore,
    WALLET_RECORD_KEY,
};
