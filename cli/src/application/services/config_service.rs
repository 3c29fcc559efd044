//! Application service — configuration use-cases.

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::domain::config::{ConfigOverrides, StackSettings, WebhostConfig};

/// Load configuration.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed.
pub fn load_config(store: &impl ConfigStore) -> Result<WebhostConfig> {
    store.load()
}

/// Load configuration and apply command-line overrides.
///
/// # Errors
///
/// Returns an error if loading fails or a required value is missing.
pub fn resolve_settings(
    store: &impl ConfigStore,
    overrides: &ConfigOverrides,
) -> Result<StackSettings> {
    let config = load_config(store)?;
    let settings = config.resolve(overrides).with_context(|| {
        store.path().map_or_else(
            |_| "incomplete configuration".to_string(),
            |p| format!("incomplete configuration in {}", p.display()),
        )
    })?;
    tracing::debug!(
        stack = %settings.stack_name,
        identifier = %settings.identifier,
        vpc = %settings.network.vpc_id,
        "resolved settings"
    );
    Ok(settings)
}
