//! Configure shell startup files so `librocksdb-sys` links a system RocksDB.
//!
//! Each binary wraps [`main_for`] with its target platform. A run discovers the
//! RocksDB library and include directories, checks the target shell file for
//! `LIBROCKSDB_STATIC`, `ROCKSDB_LIB_DIR` and `ROCKSDB_INCLUDE_DIR`, and with the
//! user's consent backs the file up and appends the missing exports.
#![allow(clippy::missing_errors_doc)]

mod console;
mod error;
mod logging;
mod patcher;
mod profile;
mod settings;

use std::process::ExitCode;

use rocksenv_detect::SystemRunner;

pub use console::Console;
pub use error::AppError;
pub use logging::{init_logging, set_logging_enabled};
pub use patcher::{AbortReason, EXIT_CANCELLED, EXIT_FAILURE, Outcome, Patcher};
pub use profile::TargetProfile;
pub use rocksenv_platform::{HostContext, TargetPlatform};
pub use settings::{AppSettings, DebianSettings, MacOsSettings, Msys2Settings};

/// Entry point shared by the per-platform binaries.
#[must_use]
pub fn main_for(target: TargetPlatform) -> ExitCode {
    let settings = AppSettings::load();
    if let Some(log_path) = init_logging(settings.debug_logging, settings.max_log_size_bytes) {
        log::debug!("Logging to {}", log_path.display());
    }

    let host = HostContext::current();
    log::debug!("Starting {} setup with {host:?}", target.display_name());

    let patcher = Patcher::new(target, &host, &settings, &SystemRunner);
    let mut console = Console::stdio();

    match patcher.run(&mut console) {
        Ok(outcome) => {
            log::info!("{} setup finished: {outcome:?}", target.display_name());
            ExitCode::from(outcome.exit_code())
        }
        Err(error) => {
            log::error!("{} setup failed: {error}", target.display_name());
            eprintln!("Error: {error}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
