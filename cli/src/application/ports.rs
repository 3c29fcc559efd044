//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::domain::config::WebhostConfig;
use crate::domain::instance::BootstrapScript;

// ── Bootstrap Script Port ─────────────────────────────────────────────────────

/// Loads bootstrap scripts by path relative to the project root.
pub trait ScriptSource {
    /// Read the whole script as text.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::BootstrapScript` if the file is missing or
    /// unreadable.
    fn load(&self, relative: &Path) -> Result<BootstrapScript>;
}

impl<T: ScriptSource + ?Sized> ScriptSource for &T {
    fn load(&self, relative: &Path) -> Result<BootstrapScript> {
        (**self).load(relative)
    }
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration file access.
pub trait ConfigStore {
    /// Load the configuration, or defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<WebhostConfig>;
    /// Path the configuration is read from.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}

// ── Template Output Port ──────────────────────────────────────────────────────

/// Persists rendered templates.
pub trait TemplateWriter {
    /// Write `contents` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}
