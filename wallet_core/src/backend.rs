//! Backend endpoints that hand out unsigned transactions and accept signed ones.

use bridge_types::{BridgeError, PrepareRequest, PreparedTransaction, TxSubmission};

#[cfg(not(target_arch = "wasm32"))]
use bridge_types::EncodedTransaction;
#[cfg(not(target_arch = "wasm32"))]
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use crate::config::BridgeConfig;

/// The server side of both signing flows.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Post a signed transaction; returns the HTML fragment to show in the modal.
    async fn submit_transaction(&self, submission: &TxSubmission) -> Result<String, BridgeError>;

    /// Ask `endpoint` to build an unsigned transaction for `request.public_key`.
    async fn prepare_transaction(
        &self,
        endpoint: &str,
        request: &PrepareRequest,
    ) -> Result<PreparedTransaction, BridgeError>;
}

// ── HttpBackend ─────────────────────────────────────────────────────────

/// HTTP client for the page's own backend.
///
/// Wraps `reqwest::Client` with the base URL relative endpoints resolve
/// against.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: reqwest::Url,
    submit_path: String,
}

/// Preparation response before the payload is validated.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPrepared {
    encoded_tx: String,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpBackend {
    /// Create a backend client targeting `base_url` (e.g. `http://127.0.0.1:3000`).
    pub fn new(
        base_url: &str,
        submit_path: impl Into<String>,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, BridgeError> {
        let base_url = reqwest::Url::parse(base_url)
            .map_err(|e| BridgeError::Config(format!("invalid backend URL {base_url}: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| BridgeError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url,
            submit_path: submit_path.into(),
        })
    }

    pub fn from_config(config: &BridgeConfig) -> Result<Self, BridgeError> {
        Self::new(
            &config.backend_url,
            config.submit_path.clone(),
            Duration::from_secs(config.request_timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Resolve an endpoint path (or absolute URL) against the base URL.
    pub fn resolve(&self, endpoint: &str) -> Result<reqwest::Url, BridgeError> {
        self.base_url
            .join(endpoint)
            .map_err(|e| BridgeError::Config(format!("invalid endpoint {endpoint}: {e}")))
    }

    async fn checked(response: reqwest::Response) -> Result<reqwest::Response, BridgeError> {
        if !response.status().is_success() {
            return Err(BridgeError::Network(format!(
                "backend returned HTTP {}",
                response.status()
            )));
        }
        Ok(response)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Backend for HttpBackend {
    async fn submit_transaction(&self, submission: &TxSubmission) -> Result<String, BridgeError> {
        let url = self.resolve(&self.submit_path)?;
        tracing::debug!(%url, tx_id = %submission.tx_id, "submitting signed transaction");

        let response = self
            .http
            .post(url)
            .form(submission)
            .send()
            .await
            .map_err(|e| BridgeError::Network(format!("request failed: {e}")))?;

        Self::checked(response)
            .await?
            .text()
            .await
            .map_err(|e| BridgeError::Network(format!("failed to read response: {e}")))
    }

    async fn prepare_transaction(
        &self,
        endpoint: &str,
        request: &PrepareRequest,
    ) -> Result<PreparedTransaction, BridgeError> {
        let url = self.resolve(endpoint)?;
        tracing::debug!(%url, "requesting unsigned transaction");

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| BridgeError::Network(format!("request failed: {e}")))?;

        let body: RawPrepared = Self::checked(response)
            .await?
            .json()
            .await
            .map_err(|e| BridgeError::Network(format!("invalid JSON response: {e}")))?;

        Ok(PreparedTransaction {
            encoded_tx: EncodedTransaction::parse(body.encoded_tx)?,
        })
    }
}
