#![allow(clippy::missing_errors_doc)]

mod backup;
mod block;
mod config;
mod verify;

pub use backup::{BackupNaming, backup_path};
pub use block::{
    EnvBlock, INCLUDE_DIR_VAR, LIB_DIR_VAR, REQUIRED_VARS, STATIC_FLAG_VALUE, STATIC_FLAG_VAR,
    ShellDialect,
};
pub use config::{AppliedEdit, ConfigError, ShellConfig, ShellConfigEdit};
pub use verify::{VerificationResult, verify_shell_config};
