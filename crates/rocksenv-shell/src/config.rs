use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::PathBuf;
use thiserror::Error;

use crate::backup::{self, BackupNaming};
use crate::block::{EnvBlock, REQUIRED_VARS, ShellDialect};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to back up {} to {}: {source}", .path.display(), .backup_path.display())]
    Backup {
        path: PathBuf,
        backup_path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to append to {}: {source}", .path.display())]
    Append {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub struct ShellConfig {
    pub config_path: PathBuf,
    pub exists: bool,
    pub content: String,
}

impl ShellConfig {
    /// Read a shell file. A missing file loads as empty rather than failing.
    pub fn load(config_path: PathBuf) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Ok(Self {
                config_path,
                exists: false,
                content: String::new(),
            });
        }

        let bytes = fs::read(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;

        Ok(Self {
            config_path,
            exists: true,
            content: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// Plain substring match; a name inside a comment counts.
    #[must_use]
    pub fn has_var(&self, name: &str) -> bool {
        self.content.contains(name)
    }

    #[must_use]
    pub fn missing_vars(&self) -> Vec<&'static str> {
        REQUIRED_VARS
            .into_iter()
            .filter(|name| !self.has_var(name))
            .collect()
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.missing_vars().is_empty()
    }

    /// Prepare appending `block`. Yields an edit without changes when every
    /// required variable is already present.
    #[must_use]
    pub fn add_exports(&self, block: &EnvBlock, dialect: ShellDialect) -> ShellConfigEdit {
        let missing = self.missing_vars();
        if missing.is_empty() {
            return ShellConfigEdit {
                original: self.content.clone(),
                addition: String::new(),
                changes: vec![],
            };
        }

        let changes = block
            .values(dialect)
            .into_iter()
            .map(|(name, value)| format!("Add {name}={value}"))
            .collect();

        ShellConfigEdit {
            original: self.content.clone(),
            addition: block.render(dialect),
            changes,
        }
    }

    /// Back up the file if it exists, then append the edit.
    ///
    /// The existing bytes are never rewritten. A failed append leaves whatever
    /// the operating system managed to write, with the backup as the only copy
    /// of the previous content.
    pub fn apply_edit(
        &mut self,
        edit: &ShellConfigEdit,
        naming: BackupNaming,
    ) -> Result<AppliedEdit, ConfigError> {
        if !edit.has_changes() {
            return Ok(AppliedEdit { backup_path: None });
        }

        let backup_path = if self.config_path.exists() {
            let backup_path = backup::backup_path(&self.config_path, naming);
            backup::copy_preserving_metadata(&self.config_path, &backup_path).map_err(
                |source| ConfigError::Backup {
                    path: self.config_path.clone(),
                    backup_path: backup_path.clone(),
                    source,
                },
            )?;
            log::info!("Created backup: {}", backup_path.display());
            Some(backup_path)
        } else {
            None
        };

        self.append(&edit.addition)
            .map_err(|source| ConfigError::Append {
                path: self.config_path.clone(),
                source,
            })?;
        log::info!("Appended RocksDB exports to {}", self.config_path.display());

        self.content.push_str(&edit.addition);
        self.exists = true;

        Ok(AppliedEdit { backup_path })
    }

    fn append(&self, addition: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config_path)?;
        file.write_all(addition.as_bytes())?;
        file.flush()
    }
}

pub struct ShellConfigEdit {
    pub original: String,
    pub addition: String,
    pub changes: Vec<String>,
}

impl ShellConfigEdit {
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    #[must_use]
    pub fn diff_preview(&self) -> String {
        if !self.has_changes() {
            return "No changes needed.".to_string();
        }

        let mut preview = String::new();

        for change in &self.changes {
            let _ = writeln!(preview, "+ {change}");
        }

        preview
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEdit {
    pub backup_path: Option<PathBuf>,
}
