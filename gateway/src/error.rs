use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway unreachable: {0}")]
    Unreachable(String),

    #[error("HTTP request to gateway failed: {0}")]
    RequestFailed(String),

    #[error("invalid response from gateway: {0}")]
    InvalidResponse(String),

    /// The gateway processed the request and reported its own error.
    /// The message is surfaced to the user verbatim.
    #[error("{0}")]
    Service(String),
}
