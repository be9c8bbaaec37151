use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("cipher error: {0}")]
    Cipher(String),

    #[error("malformed key envelope")]
    MalformedEnvelope,

    #[error("unsupported envelope version: {0}")]
    UnsupportedVersion(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
