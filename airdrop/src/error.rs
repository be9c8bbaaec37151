use thiserror::Error;

/// Errors surfaced by the session and batch pipeline.
///
/// Submission rejections and confirmation timeouts are not errors here: they
/// come back inside an [`AirdropReport`](crate::AirdropReport) so the caller
/// still gets the per-recipient outcomes.
#[derive(Debug, Error)]
pub enum AirdropError {
    /// Wallet derivation, credential encryption, or persistence failed
    /// while connecting.
    #[error("wallet connection failed: {0}")]
    WalletConnection(String),

    /// The stored credential would not decrypt with the given password.
    #[error("invalid password")]
    InvalidPassword,

    /// The operation needs a connected wallet and the session has none.
    #[error("no wallet connected")]
    NotConnected,

    /// The recipient set resolved to nothing sendable.
    #[error("recipient list is empty")]
    NoRecipients,

    /// A batch is already running on this session.
    #[error("an airdrop is already in flight")]
    AlreadyInFlight,

    /// Credential storage failed outside the connect path.
    #[error("credential store error: {0}")]
    Vault(#[from] bgeo_vault::VaultError),
}
