use std::path::PathBuf;
use thiserror::Error;

pub(crate) const MSYS2_INSTALL_HINT: &str = "pacman -S mingw-w64-x86_64-rocksdb";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    #[error("{program} is not installed or not on PATH")]
    ToolMissing { program: String },

    #[error("Failed to run {program}: {details}")]
    Spawn { program: String, details: String },

    #[error("{program} exited unsuccessfully: {stderr}")]
    CommandFailed { program: String, stderr: String },

    #[error("{program} printed no output")]
    EmptyOutput { program: String },

    #[error("No file matching {pattern} under {}", .root.display())]
    NoMatch { pattern: String, root: PathBuf },

    #[error("RocksDB header not found: {}", .0.display())]
    HeaderMissing(PathBuf),

    #[error("RocksDB library not found, expected in: {}", .0.display())]
    LibraryMissing(PathBuf),
}

impl DetectError {
    /// Command the user can run to fix a missing installation.
    #[must_use]
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::HeaderMissing(_) | Self::LibraryMissing(_) => Some(MSYS2_INSTALL_HINT),
            _ => None,
        }
    }

    pub(crate) fn command_failed(program: &str, stderr: &str) -> Self {
        let stderr = stderr.trim();
        Self::CommandFailed {
            program: program.to_string(),
            stderr: if stderr.is_empty() {
                "command exited unsuccessfully".to_string()
            } else {
                stderr.to_string()
            },
        }
    }
}
