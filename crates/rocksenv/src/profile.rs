use std::path::{Path, PathBuf};

use rocksenv_detect::{DiscoveryStrategy, UserRoot};
use rocksenv_platform::{HostContext, TargetPlatform};
use rocksenv_shell::{BackupNaming, ShellDialect};

use crate::error::AppError;
use crate::settings::AppSettings;

/// Per-target parameters of the patch flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetProfile {
    pub target: TargetPlatform,
    pub dialect: ShellDialect,
    pub backup_naming: BackupNaming,
}

impl TargetProfile {
    #[must_use]
    pub fn for_target(target: TargetPlatform) -> Self {
        match target {
            TargetPlatform::Debian | TargetPlatform::MacOs => Self {
                target,
                dialect: ShellDialect::Posix,
                backup_naming: BackupNaming::AppendSuffix,
            },
            TargetPlatform::Msys2 => Self {
                target,
                dialect: ShellDialect::Msys,
                backup_naming: BackupNaming::ReplaceExtension,
            },
        }
    }

    /// `root` is the MSYS2 installation root and is ignored elsewhere.
    #[must_use]
    pub fn strategy(&self, settings: &AppSettings, root: Option<&Path>) -> DiscoveryStrategy {
        match (self.target, root) {
            (TargetPlatform::Debian, _) => DiscoveryStrategy::FileSearch(settings.file_search()),
            (TargetPlatform::MacOs, _) => {
                DiscoveryStrategy::PackageManager(settings.package_manager())
            }
            (TargetPlatform::Msys2, root) => DiscoveryStrategy::UserRoot(UserRoot::new(
                root.unwrap_or(settings.msys2.default_root.as_path()),
            )),
        }
    }

    pub fn config_path(
        &self,
        host: &HostContext,
        root: Option<&Path>,
    ) -> Result<PathBuf, AppError> {
        match (self.target, root) {
            (TargetPlatform::Msys2, Some(root)) => Ok(host.msys2_profile(root)),
            (target, _) => host
                .home_shell_file(target)
                .ok_or(AppError::HomeDirUnavailable),
        }
    }

    /// Label for the evidence behind a successful discovery.
    #[must_use]
    pub fn detected_label(&self) -> &'static str {
        match self.target {
            TargetPlatform::Debian | TargetPlatform::Msys2 => "Found RocksDB library",
            TargetPlatform::MacOs => "Homebrew prefix",
        }
    }

    /// Command that makes the new exports visible in the current shell.
    #[must_use]
    pub fn source_hint(&self, config_path: &Path) -> String {
        match self.target {
            // Written from inside MSYS2, where the profile is in `~`.
            TargetPlatform::Msys2 => "source ~/.bash_profile".to_string(),
            TargetPlatform::Debian | TargetPlatform::MacOs => {
                format!("source {}", config_path.display())
            }
        }
    }
}
