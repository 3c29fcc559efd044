//! Domain types for webhost configuration.
//!
//! Pure functions only — no I/O, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::network::NetworkContext;

pub const DEFAULT_STACK_NAME: &str = "WebServerStack";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `webhost.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WebhostConfig {
    /// CloudFormation stack name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_name: Option<String>,
    /// Stack description written into the template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Stage identifier, e.g. `Dev`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Name of an existing EC2 key pair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    /// VPC to place the instance in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<NetworkContext>,
}

/// Values given on the command line; each one wins over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub stack_name: Option<String>,
    pub identifier: Option<String>,
    pub key_name: Option<String>,
}

/// Fully resolved inputs for one synthesis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSettings {
    pub stack_name: String,
    pub description: Option<String>,
    pub identifier: String,
    pub key_name: String,
    pub network: NetworkContext,
}

impl WebhostConfig {
    /// Merge command-line overrides into the file values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the identifier, key name or network is
    /// missing from both sources.
    pub fn resolve(&self, overrides: &ConfigOverrides) -> Result<StackSettings> {
        let identifier = overrides
            .identifier
            .clone()
            .or_else(|| self.identifier.clone())
            .ok_or(ConfigError::Missing {
                key: "identifier",
                flag: "--id",
            })?;
        let key_name = overrides
            .key_name
            .clone()
            .or_else(|| self.key_name.clone())
            .ok_or(ConfigError::Missing {
                key: "key_name",
                flag: "--key-name",
            })?;
        let network = self.network.clone().ok_or(ConfigError::MissingNetwork)?;
        let stack_name = overrides
            .stack_name
            .clone()
            .or_else(|| self.stack_name.clone())
            .unwrap_or_else(|| DEFAULT_STACK_NAME.to_string());
        Ok(StackSettings {
            stack_name,
            description: self.description.clone(),
            identifier,
            key_name,
            network,
        })
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
