use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use rocksenv_detect::{DEFAULT_MSYS2_ROOT, FileSearch, PackageManager};
use rocksenv_platform::AppPaths;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,

    #[serde(default)]
    pub debian: DebianSettings,

    #[serde(default)]
    pub macos: MacOsSettings,

    #[serde(default)]
    pub msys2: Msys2Settings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebianSettings {
    pub search_root: PathBuf,
    pub library_pattern: String,
    pub include_dir: PathBuf,
    pub fallback_lib_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacOsSettings {
    pub brew_program: String,
    pub fallback_prefix: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Msys2Settings {
    pub default_root: PathBuf,
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
            debian: DebianSettings::default(),
            macos: MacOsSettings::default(),
            msys2: Msys2Settings::default(),
        }
    }
}

impl Default for DebianSettings {
    fn default() -> Self {
        let search = FileSearch::debian();
        Self {
            search_root: search.root,
            library_pattern: search.pattern,
            include_dir: search.include_dir,
            fallback_lib_dir: search.fallback_lib_dir,
        }
    }
}

impl Default for MacOsSettings {
    fn default() -> Self {
        let brew = PackageManager::homebrew();
        Self {
            brew_program: brew.program,
            fallback_prefix: brew.fallback_prefix,
        }
    }
}

impl Default for Msys2Settings {
    fn default() -> Self {
        Self {
            default_root: PathBuf::from(DEFAULT_MSYS2_ROOT),
        }
    }
}

impl AppSettings {
    /// Load `settings.json` from the application config directory, falling back
    /// to defaults when it is absent or unreadable.
    #[must_use]
    pub fn load() -> Self {
        let Ok(paths) = AppPaths::new() else {
            return Self::default();
        };
        Self::load_from(&paths.settings_file())
    }

    #[must_use]
    pub fn load_from(settings_path: &Path) -> Self {
        if !settings_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(settings_path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    #[must_use]
    pub fn file_search(&self) -> FileSearch {
        FileSearch {
            root: self.debian.search_root.clone(),
            pattern: self.debian.library_pattern.clone(),
            include_dir: self.debian.include_dir.clone(),
            fallback_lib_dir: self.debian.fallback_lib_dir.clone(),
        }
    }

    #[must_use]
    pub fn package_manager(&self) -> PackageManager {
        PackageManager {
            program: self.macos.brew_program.clone(),
            fallback_prefix: self.macos.fallback_prefix.clone(),
        }
    }
}
