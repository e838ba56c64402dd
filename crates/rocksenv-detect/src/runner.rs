use std::path::{Path, PathBuf};
use std::process::Command;

use rocksenv_platform::HideWindow;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Boundary between discovery and the external programs it consults.
pub trait CommandRunner {
    /// Resolve a program name to an executable path.
    fn resolve(&self, program: &str) -> Option<PathBuf>;

    /// Run a program to completion and capture its output.
    fn run(&self, program: &Path, args: &[&str]) -> std::io::Result<CommandOutput>;
}

/// Runs real processes, looking programs up on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn resolve(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn run(&self, program: &Path, args: &[&str]) -> std::io::Result<CommandOutput> {
        log::debug!("Running {} {}", program.display(), args.join(" "));

        let output = Command::new(program).args(args).hide_window().output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
