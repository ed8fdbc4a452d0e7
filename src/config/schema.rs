//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::message::{Intent, DEFAULT_INTENT};

/// Process the stock configuration sends to.
pub const DEFAULT_PROCESS: &str = "drHuWPvnhCknt7ubyhv40Ad0fnb0adXodS5bXJfyays";

/// Root configuration for a dispatch run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Target process id (base64url transaction id).
    pub process: String,

    /// Path to the Arweave JWK wallet, relative to the working directory.
    pub wallet_path: PathBuf,

    /// Name of the intent to send.
    pub intent: String,

    /// Optional 32-byte anchor for the message.
    pub anchor: Option<String>,

    /// Network endpoints.
    pub network: NetworkConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Additional or overriding intents, keyed by name.
    pub intents: BTreeMap<String, Intent>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            process: DEFAULT_PROCESS.to_string(),
            wallet_path: PathBuf::from("./wallet.json"),
            intent: DEFAULT_INTENT.to_string(),
            anchor: None,
            network: NetworkConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            intents: BTreeMap::new(),
        }
    }
}

/// ao unit endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Messenger unit: receives signed messages.
    pub mu_url: String,

    /// Compute unit: serves evaluation results.
    pub cu_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            mu_url: "https://mu.ao-testnet.xyz".to_string(),
            cu_url: "https://cu.ao-testnet.xyz".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Tag;

    #[test]
    fn test_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.process, DEFAULT_PROCESS);
        assert_eq!(config.wallet_path, PathBuf::from("./wallet.json"));
        assert_eq!(config.intent, "debug-send");
        assert_eq!(config.network.mu_url, "https://mu.ao-testnet.xyz");
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(config.intents.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: DispatchConfig = toml::from_str(
            r#"
            intent = "withdraw"

            [network]
            mu_url = "http://localhost:4002"
            "#,
        )
        .unwrap();

        assert_eq!(config.intent, "withdraw");
        assert_eq!(config.network.mu_url, "http://localhost:4002");
        assert_eq!(config.network.cu_url, "https://cu.ao-testnet.xyz");
        assert_eq!(config.process, DEFAULT_PROCESS);
    }

    #[test]
    fn test_custom_intents_table() {
        let config: DispatchConfig = toml::from_str(
            r#"
            [intents.withdraw-all]
            tags = [
                { name = "Action", value = "Withdraw" },
                { name = "Transfer-All", value = "true" },
            ]
            data = "any data"
            "#,
        )
        .unwrap();

        let intent = &config.intents["withdraw-all"];
        assert_eq!(intent.tags[1], Tag::new("Transfer-All", "true"));
        assert_eq!(intent.data.as_deref(), Some("any data"));
    }
}
