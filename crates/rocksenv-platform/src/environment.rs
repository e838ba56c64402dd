use std::path::PathBuf;

/// The environments a patcher executable can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPlatform {
    Debian,
    MacOs,
    Msys2,
}

impl TargetPlatform {
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            TargetPlatform::Debian => "Debian",
            TargetPlatform::MacOs => "macOS",
            TargetPlatform::Msys2 => "MSYS2",
        }
    }

    /// File name of the startup script this target patches.
    #[must_use]
    pub fn shell_file_name(self) -> &'static str {
        match self {
            TargetPlatform::Debian => ".bashrc",
            TargetPlatform::MacOs => ".zshrc",
            TargetPlatform::Msys2 => ".bash_profile",
        }
    }

    /// The CPU architecture the target is restricted to, if any.
    #[must_use]
    pub fn required_arch(self) -> Option<&'static str> {
        match self {
            TargetPlatform::MacOs => Some("aarch64"),
            TargetPlatform::Debian | TargetPlatform::Msys2 => None,
        }
    }
}

/// Ambient process state, captured once at start-up so the patcher itself never
/// reads environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    pub home_dir: Option<PathBuf>,
    pub user_name: String,
    pub arch: String,
}

impl HostContext {
    #[must_use]
    pub fn current() -> Self {
        Self {
            home_dir: dirs::home_dir(),
            user_name: resolve_user_name(
                std::env::var("USERNAME").ok(),
                std::env::var("USER").ok(),
            ),
            arch: std::env::consts::ARCH.to_string(),
        }
    }

    /// Shell file location for targets that live under the user's home.
    ///
    /// MSYS2 keeps its own home tree under the installation root, see
    /// [`HostContext::msys2_profile`].
    #[must_use]
    pub fn home_shell_file(&self, target: TargetPlatform) -> Option<PathBuf> {
        self.home_dir
            .as_ref()
            .map(|home| home.join(target.shell_file_name()))
    }

    #[must_use]
    pub fn msys2_profile(&self, root: &std::path::Path) -> PathBuf {
        root.join("home")
            .join(&self.user_name)
            .join(TargetPlatform::Msys2.shell_file_name())
    }

    #[must_use]
    pub fn supports(&self, target: TargetPlatform) -> bool {
        target.required_arch().is_none_or(|arch| self.arch == arch)
    }
}

fn resolve_user_name(username: Option<String>, user: Option<String>) -> String {
    username
        .filter(|name| !name.is_empty())
        .or_else(|| user.filter(|name| !name.is_empty()))
        .unwrap_or_else(|| "default".to_string())
}
