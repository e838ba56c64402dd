use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::DetectError;
use crate::strategy::{Discovery, PathOrigin};

pub const DEFAULT_MSYS2_ROOT: &str = r"C:\msys64";

/// Library file names accepted under `mingw64/lib`, in order of preference.
pub const LIBRARY_CANDIDATES: [&str; 2] = ["librocksdb.dll.a", "librocksdb.a"];

/// A rejected installation root. The caller may ask again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RootError {
    #[error("Path {} does not exist", .0.display())]
    NotFound(PathBuf),
}

/// Turn a line typed at the root prompt into an existing directory.
///
/// Blank input selects `default`.
pub fn validate_root(
    input: &str,
    default: &Path,
    exists: impl Fn(&Path) -> bool,
) -> Result<PathBuf, RootError> {
    let input = input.trim();
    let root = if input.is_empty() {
        default.to_path_buf()
    } else {
        PathBuf::from(input)
    };

    if exists(&root) {
        Ok(root)
    } else {
        Err(RootError::NotFound(root))
    }
}

/// An MSYS2 installation root chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRoot {
    pub root: PathBuf,
}

impl UserRoot {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn lib_dir(&self) -> PathBuf {
        self.root.join("mingw64").join("lib")
    }

    #[must_use]
    pub fn include_dir(&self) -> PathBuf {
        self.root.join("mingw64").join("include")
    }

    #[must_use]
    pub fn header_path(&self) -> PathBuf {
        self.include_dir().join("rocksdb").join("c.h")
    }

    #[must_use]
    pub fn library_candidates(&self) -> Vec<PathBuf> {
        let lib_dir = self.lib_dir();
        LIBRARY_CANDIDATES
            .iter()
            .map(|name| lib_dir.join(name))
            .collect()
    }

    pub(crate) fn discover(&self) -> Result<Discovery, DetectError> {
        let header = self.header_path();
        if !header.exists() {
            log::warn!("RocksDB header missing: {}", header.display());
            return Err(DetectError::HeaderMissing(header));
        }

        let library = self
            .library_candidates()
            .into_iter()
            .find(|candidate| candidate.exists())
            .ok_or_else(|| DetectError::LibraryMissing(self.lib_dir()))?;

        log::info!("Found RocksDB library at {}", library.display());

        Ok(Discovery {
            lib_dir: self.lib_dir(),
            include_dir: self.include_dir(),
            origin: PathOrigin::Detected { evidence: library },
        })
    }
}
