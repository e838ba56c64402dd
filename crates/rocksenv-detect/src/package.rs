use std::path::PathBuf;

use crate::error::DetectError;
use crate::runner::CommandRunner;
use crate::strategy::{Discovery, PathOrigin};

/// Derives library and include directories from a package manager prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    pub program: String,
    pub fallback_prefix: PathBuf,
}

impl PackageManager {
    /// Homebrew on Apple Silicon, which installs under `/opt/homebrew`.
    #[must_use]
    pub fn homebrew() -> Self {
        Self {
            program: "brew".to_string(),
            fallback_prefix: PathBuf::from("/opt/homebrew"),
        }
    }

    pub(crate) fn discover(&self, runner: &dyn CommandRunner) -> Discovery {
        let (prefix, origin) = match self.query_prefix(runner) {
            Ok(prefix) => {
                log::info!("{} prefix: {}", self.program, prefix.display());
                (
                    prefix.clone(),
                    PathOrigin::Detected { evidence: prefix },
                )
            }
            Err(reason) => {
                log::info!(
                    "Could not query {} prefix, using {}: {reason}",
                    self.program,
                    self.fallback_prefix.display()
                );
                (self.fallback_prefix.clone(), PathOrigin::Fallback { reason })
            }
        };

        Discovery {
            lib_dir: prefix.join("lib"),
            include_dir: prefix.join("include"),
            origin,
        }
    }

    fn query_prefix(&self, runner: &dyn CommandRunner) -> Result<PathBuf, DetectError> {
        let program = runner
            .resolve(&self.program)
            .ok_or_else(|| DetectError::ToolMissing {
                program: self.program.clone(),
            })?;

        let output = runner
            .run(&program, &["--prefix"])
            .map_err(|error| DetectError::Spawn {
                program: self.program.clone(),
                details: error.to_string(),
            })?;

        if !output.success {
            return Err(DetectError::command_failed(&self.program, &output.stderr));
        }

        let prefix = output.stdout.trim();
        if prefix.is_empty() {
            return Err(DetectError::EmptyOutput {
                program: self.program.clone(),
            });
        }

        Ok(PathBuf::from(prefix))
    }
}
