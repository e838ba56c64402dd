use thiserror::Error;

use rocksenv_shell::ConfigError;

/// Failures that end a run without a clean outcome.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Could not determine the home directory")]
    HomeDirUnavailable,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Terminal I/O failed: {0}")]
    Console(#[from] std::io::Error),
}
