//! Filesystem infrastructure — implements `ScriptSource` and `TemplateWriter`.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{ScriptSource, TemplateWriter};
use crate::domain::error::ProvisionError;
use crate::domain::instance::BootstrapScript;

/// Reads bootstrap scripts from a project directory.
pub struct LocalScriptSource {
    root: PathBuf,
}

impl LocalScriptSource {
    /// Resolve script paths against `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ScriptSource for LocalScriptSource {
    fn load(&self, relative: &Path) -> Result<BootstrapScript> {
        let path = self.root.join(relative);
        let text = read_script(&path).map_err(|source| ProvisionError::BootstrapScript {
            path: path.clone(),
            source,
        })?;
        Ok(BootstrapScript::new(&path, text))
    }
}

/// The handle is dropped at the end of this function on every path.
fn read_script(path: &Path) -> std::io::Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    Ok(text)
}

/// Writes files through a temp file in the target directory, then renames.
pub struct AtomicFileWriter;

impl TemplateWriter for AtomicFileWriter {
    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating directory {}", dir.display()))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)
            .with_context(|| format!("creating temp file in {}", dir.display()))?;
        tmp.write_all(contents.as_bytes())
            .with_context(|| format!("writing {}", tmp.path().display()))?;
        tmp.persist(path)
            .with_context(|| format!("writing template {}", path.display()))?;
        Ok(())
    }
}
