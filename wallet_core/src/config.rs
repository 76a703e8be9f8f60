//! Bridge configuration with TOML file support.

use serde::{Deserialize, Serialize};

use bridge_types::BridgeError;

/// Configuration for a wallet bridge.
///
/// Can be loaded from a TOML file via [`BridgeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Base URL that relative backend endpoints resolve against.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Path receiving signed transactions.
    #[serde(default = "default_submit_path")]
    pub submit_path: String,

    /// Whole-request timeout for backend calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Element ids, classes and attribute names the page uses.
    #[serde(default)]
    pub dom: DomConfig,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Names shared with the page templates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomConfig {
    #[serde(default = "default_connect_button_id")]
    pub connect_button_id: String,

    #[serde(default = "default_disconnect_button_id")]
    pub disconnect_button_id: String,

    /// Class of elements shown only while connected.
    #[serde(default = "default_gated_class")]
    pub gated_class: String,

    #[serde(default = "default_modal_selector")]
    pub modal_selector: String,

    /// Swap target for submission responses.
    #[serde(default = "default_modal_content_selector")]
    pub modal_content_selector: String,

    #[serde(default = "default_encoded_tx_attr")]
    pub encoded_tx_attr: String,

    #[serde(default = "default_tx_id_attr")]
    pub tx_id_attr: String,

    #[serde(default = "default_endpoint_attr")]
    pub endpoint_attr: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_backend_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_submit_path() -> String {
    "/tx-submit".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_connect_button_id() -> String {
    "connect-button".to_string()
}

fn default_disconnect_button_id() -> String {
    "disconnect-button".to_string()
}

fn default_gated_class() -> String {
    "button-tx-modal".to_string()
}

fn default_modal_selector() -> String {
    "#tx-modal".to_string()
}

fn default_modal_content_selector() -> String {
    ".modal-content".to_string()
}

fn default_encoded_tx_attr() -> String {
    "encoded-tx".to_string()
}

fn default_tx_id_attr() -> String {
    "tx-id".to_string()
}

fn default_endpoint_attr() -> String {
    "data-endpoint".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl BridgeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, BridgeError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| BridgeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, BridgeError> {
        toml::from_str(s).map_err(|e| BridgeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("BridgeConfig is always serializable to TOML")
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            submit_path: default_submit_path(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            dom: DomConfig::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            connect_button_id: default_connect_button_id(),
            disconnect_button_id: default_disconnect_button_id(),
            gated_class: default_gated_class(),
            modal_selector: default_modal_selector(),
            modal_content_selector: default_modal_content_selector(),
            encoded_tx_attr: default_encoded_tx_attr(),
            tx_id_attr: default_tx_id_attr(),
            endpoint_attr: default_endpoint_attr(),
        }
    }
}

impl DomConfig {
    /// Modal buttons that prepare a transaction server-side.
    pub fn action_button_selector(&self) -> String {
        format!(
            "{} button[{}]",
            self.modal_content_selector, self.endpoint_attr
        )
    }

    /// Elements carrying an unsigned transaction to sign locally.
    pub fn sign_trigger_selector(&self) -> String {
        format!("[{}]", self.encoded_tx_attr)
    }

    pub fn gated_selector(&self) -> String {
        format!(".{}", self.gated_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = BridgeConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = BridgeConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = BridgeConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.submit_path, "/tx-submit");
        assert_eq!(config.dom.connect_button_id, "connect-button");
        assert_eq!(config.dom.gated_class, "button-tx-modal");
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            backend_url = "https://vault.example"
            request_timeout_secs = 5

            [dom]
            gated_class = "needs-wallet"
        "#;
        let config = BridgeConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.backend_url, "https://vault.example");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.dom.gated_class, "needs-wallet");
        assert_eq!(config.dom.modal_selector, "#tx-modal"); // default
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = BridgeConfig::from_toml_file("/nonexistent/bridge.toml");
        assert!(matches!(result, Err(BridgeError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.toml");
        std::fs::write(&path, "submit_path = \"/submit\"\n").unwrap();
        let config = BridgeConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.submit_path, "/submit");
    }

    #[test]
    fn derived_selectors() {
        let dom = DomConfig::default();
        assert_eq!(
            dom.action_button_selector(),
            ".modal-content button[data-endpoint]"
        );
        assert_eq!(dom.sign_trigger_selector(), "[encoded-tx]");
        assert_eq!(dom.gated_selector(), ".button-tx-modal");
    }
}
