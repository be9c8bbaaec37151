//! `reqwest` implementation of the gateway service traits.

use async_trait::async_trait;
use bgeo_types::{Address, Amount, RecipientEntry, TxHash};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use zeroize::Zeroizing;

use crate::api::{BalanceService, DerivedWallet, WalletSigner};
use crate::error::GatewayError;

/// Default timeout for gateway requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the BGEO gateway's REST surface.
///
/// Routes:
/// - `GET  /api/balance/{address}` returns `{"balance": "<decimal>"}`
/// - `POST /api/transaction` returns `{"success": true, "txHash": ...}`
///   or `{"success": false, "error": "..."}`
/// - `POST /api/wallet/derive` returns `{"address": ..., "privateKey": ...}`
/// - `POST /api/gateway` proxies JSON-RPC: `{"result": ...}` or
///   `{"error": {"message": ...}}`
///
/// When an API key is configured it is attached to every request as the
/// `x-api-key` header.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GatewayClient {
    /// Create a client targeting the given base URL (e.g.
    /// `https://gateway.bgeo.app`).
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::RequestFailed(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key,
        })
    }

    /// The configured gateway base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.with_api_key(self.http.get(self.url(path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.with_api_key(self.http.post(self.url(path)))
    }

    fn with_api_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("x-api-key", key),
            None => request,
        }
    }

    /// Send a raw JSON-RPC call through the gateway proxy and return its
    /// `result` field.
    pub async fn rpc(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError> {
        let response = self
            .post("/api/gateway")
            .json(&RpcRequest { method, params })
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            return Err(GatewayError::RequestFailed(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            GatewayError::InvalidResponse(format!("failed to parse gateway response: {e}"))
        })?;

        if let Some(error) = json.get("error").filter(|e| !e.is_null()) {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(GatewayError::Service(message));
        }

        Ok(json.get("result").cloned().unwrap_or(serde_json::Value::Null))
    }
}

#[async_trait]
impl BalanceService for GatewayClient {
    async fn balance(&self, address: &Address) -> Result<Amount, GatewayError> {
        let response = self
            .get(&format!("/api/balance/{address}"))
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            return Err(GatewayError::RequestFailed(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let body: BalanceResponse = response.json().await.map_err(|e| {
            GatewayError::InvalidResponse(format!("failed to parse balance response: {e}"))
        })?;

        Amount::parse(&body.balance)
            .map_err(|e| GatewayError::InvalidResponse(format!("balance is not a number: {e}")))
    }
}

#[async_trait]
impl WalletSigner for GatewayClient {
    async fn derive_wallet(&self, mnemonic: &str) -> Result<DerivedWallet, GatewayError> {
        let response = self
            .post("/api/wallet/derive")
            .json(&DeriveRequest { mnemonic })
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            return Err(GatewayError::RequestFailed(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let body: DeriveResponse = response.json().await.map_err(|e| {
            GatewayError::InvalidResponse(format!("failed to parse derive response: {e}"))
        })?;

        let address = Address::parse(&body.address)
            .map_err(|e| GatewayError::InvalidResponse(format!("derived address invalid: {e}")))?;

        Ok(DerivedWallet {
            address,
            private_key: Zeroizing::new(body.private_key),
        })
    }

    async fn submit_batch(
        &self,
        from: &Address,
        recipients: &[RecipientEntry],
        private_key: &str,
    ) -> Result<TxHash, GatewayError> {
        let request = BatchRequest {
            from_address: from,
            recipients,
            private_key,
        };

        let response = self
            .post("/api/transaction")
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        // A rejected batch comes back as a non-2xx status that still
        // carries `{"success": false, "error": ...}`, so parse the body
        // before giving up on the status code.
        let status = response.status();
        let body: BatchResponse = response.json().await.map_err(|e| {
            if status.is_success() {
                GatewayError::InvalidResponse(format!("failed to parse transaction response: {e}"))
            } else {
                GatewayError::RequestFailed(format!("HTTP status {status}"))
            }
        })?;

        if !body.success {
            return Err(GatewayError::Service(
                body.error.unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }

        match body.tx_hash {
            Some(hash) => Ok(TxHash::new(hash)),
            None => Err(GatewayError::InvalidResponse(
                "transaction response missing txHash".to_string(),
            )),
        }
    }
}

fn map_send_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Unreachable(format!("request timed out: {e}"))
    } else if e.is_connect() {
        GatewayError::Unreachable(format!("connection failed: {e}"))
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

/// `GET /api/balance/{address}` response body.
#[derive(Debug, Deserialize)]
struct BalanceResponse {
    balance: String,
}

/// `POST /api/transaction` request body. Carries the plaintext private key
/// across the trust boundary exactly once; deliberately not `Debug`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchRequest<'a> {
    from_address: &'a Address,
    recipients: &'a [RecipientEntry],
    private_key: &'a str,
}

/// `POST /api/transaction` response body.
#[derive(Debug, Deserialize)]
struct BatchResponse {
    success: bool,
    #[serde(rename = "txHash")]
    tx_hash: Option<String>,
    error: Option<String>,
}

/// `POST /api/wallet/derive` request body.
#[derive(Serialize)]
struct DeriveRequest<'a> {
    mnemonic: &'a str,
}

/// `POST /api/wallet/derive` response body. Not `Debug`: holds the key.
#[derive(Deserialize)]
struct DeriveResponse {
    address: String,
    #[serde(rename = "privateKey")]
    private_key: String,
}

/// `POST /api/gateway` request body.
#[derive(Serialize)]
struct RpcRequest<'a> {
    method: &'a str,
    params: serde_json::Value,
}
