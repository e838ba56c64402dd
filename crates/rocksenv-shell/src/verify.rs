use std::path::Path;

use crate::block::REQUIRED_VARS;
use crate::config::{ConfigError, ShellConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    Configured,
    /// The file exists but lacks some names, listed in canonical order.
    Incomplete { missing: Vec<&'static str> },
    ConfigFileNotFound,
}

impl VerificationResult {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured)
    }

    #[must_use]
    pub fn missing_vars(&self) -> Vec<&'static str> {
        match self {
            Self::Configured => Vec::new(),
            Self::Incomplete { missing } => missing.clone(),
            Self::ConfigFileNotFound => REQUIRED_VARS.to_vec(),
        }
    }
}

/// Check whether a shell file already exports the RocksDB variables.
///
/// A missing file is reported, not raised; only a read failure on an existing
/// file is an error.
pub fn verify_shell_config(config_path: &Path) -> Result<VerificationResult, ConfigError> {
    let config = ShellConfig::load(config_path.to_path_buf())?;
    if !config.exists {
        log::debug!("Shell config not found: {}", config_path.display());
        return Ok(VerificationResult::ConfigFileNotFound);
    }

    let missing = config.missing_vars();
    log::debug!(
        "Shell config {} is missing {:?}",
        config_path.display(),
        missing
    );

    if missing.is_empty() {
        Ok(VerificationResult::Configured)
    } else {
        Ok(VerificationResult::Incomplete { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::{VerificationResult, verify_shell_config};

    #[test]
    fn missing_file_is_not_configured() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");

        let result =
            verify_shell_config(&temp_dir.path().join(".zshrc")).expect("missing file is fine");

        assert_eq!(result, VerificationResult::ConfigFileNotFound);
        assert!(!result.is_configured());
        assert_eq!(
            result.missing_vars(),
            vec!["LIBROCKSDB_STATIC", "ROCKSDB_LIB_DIR", "ROCKSDB_INCLUDE_DIR"]
        );
    }

    #[test]
    fn partial_file_lists_missing_names() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join(".bashrc");
        std::fs::write(&path, "export LIBROCKSDB_STATIC=1\n").expect("write config");

        let result = verify_shell_config(&path).expect("verify");

        assert_eq!(
            result,
            VerificationResult::Incomplete {
                missing: vec!["ROCKSDB_LIB_DIR", "ROCKSDB_INCLUDE_DIR"]
            }
        );
    }

    #[test]
    fn complete_file_is_configured() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join(".bashrc");
        std::fs::write(
            &path,
            "LIBROCKSDB_STATIC=1 ROCKSDB_LIB_DIR=/a ROCKSDB_INCLUDE_DIR=/b",
        )
        .expect("write config");

        let result = verify_shell_config(&path).expect("verify");

        assert!(result.is_configured());
        assert!(result.missing_vars().is_empty());
    }
}
