use std::path::PathBuf;

use crate::error::DetectError;
use crate::msys2::UserRoot;
use crate::package::PackageManager;
use crate::runner::CommandRunner;
use crate::search::FileSearch;

/// Where a discovered pair of directories came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOrigin {
    /// Found on disk; `evidence` is the library file or prefix that proved it.
    Detected { evidence: PathBuf },
    /// Discovery failed softly and the platform defaults were substituted.
    Fallback { reason: DetectError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub lib_dir: PathBuf,
    pub include_dir: PathBuf,
    pub origin: PathOrigin,
}

impl Discovery {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, PathOrigin::Fallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryStrategy {
    FileSearch(FileSearch),
    PackageManager(PackageManager),
    UserRoot(UserRoot),
}

impl DiscoveryStrategy {
    /// Locate the RocksDB library and include directories.
    ///
    /// Search and package-manager failures fall back to defaults; only a
    /// user-supplied root missing its artifacts is an error.
    pub fn discover(&self, runner: &dyn CommandRunner) -> Result<Discovery, DetectError> {
        match self {
            DiscoveryStrategy::FileSearch(search) => Ok(search.discover(runner)),
            DiscoveryStrategy::PackageManager(manager) => Ok(manager.discover(runner)),
            DiscoveryStrategy::UserRoot(root) => root.discover(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{DiscoveryStrategy, PathOrigin};
    use crate::error::DetectError;
    use crate::msys2::UserRoot;
    use crate::package::PackageManager;
    use crate::runner::{CommandOutput, CommandRunner};

    struct NothingInstalled;

    impl CommandRunner for NothingInstalled {
        fn resolve(&self, _program: &str) -> Option<PathBuf> {
            None
        }

        fn run(&self, program: &Path, _args: &[&str]) -> std::io::Result<CommandOutput> {
            panic!("{} should not be spawned", program.display());
        }
    }

    #[test]
    fn package_manager_strategy_never_errors() {
        let strategy = DiscoveryStrategy::PackageManager(PackageManager::homebrew());

        let discovery = strategy
            .discover(&NothingInstalled)
            .expect("package manager discovery falls back");

        assert!(discovery.is_fallback());
        assert_eq!(discovery.lib_dir, Path::new("/opt/homebrew/lib"));
    }

    #[test]
    fn user_root_strategy_propagates_missing_header() {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let strategy = DiscoveryStrategy::UserRoot(UserRoot::new(temp_dir.path()));

        let error = strategy
            .discover(&NothingInstalled)
            .expect_err("empty root has no header");

        assert!(matches!(error, DetectError::HeaderMissing(_)));
    }

    #[test]
    fn fallback_origin_keeps_reason() {
        let strategy = DiscoveryStrategy::PackageManager(PackageManager::homebrew());
        let discovery = strategy.discover(&NothingInstalled).expect("fallback");

        assert_eq!(
            discovery.origin,
            PathOrigin::Fallback {
                reason: DetectError::ToolMissing {
                    program: "brew".to_string()
                }
            }
        );
    }
}
