//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::application::ports::ConfigStore;
use crate::domain::config::WebhostConfig;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "WEBHOST_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "webhost.yaml";

/// Production implementation of `ConfigStore` that reads a YAML file.
///
/// Path precedence: explicit path, then `WEBHOST_CONFIG`, then `./webhost.yaml`.
#[derive(Debug, Default)]
pub struct YamlConfigStore {
    explicit: Option<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<WebhostConfig> {
        let path = self.path()?;
        if !path.exists() {
            if self.explicit.is_some() {
                anyhow::bail!("config file {} does not exist", path.display());
            }
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(WebhostConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn path(&self) -> Result<PathBuf> {
        Ok(resolve_path(
            self.explicit.as_deref(),
            std::env::var(CONFIG_ENV).ok(),
        ))
    }
}

/// Explicit path wins over the environment value, which wins over the default.
fn resolve_path(explicit: Option<&Path>, env_value: Option<String>) -> PathBuf {
    match (explicit, env_value) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(val)) if !val.is_empty() => PathBuf::from(val),
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}
