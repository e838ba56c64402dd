use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use rocksenv_detect::{CommandRunner, DetectError, Discovery, PathOrigin, RootError, validate_root};
use rocksenv_platform::{HostContext, TargetPlatform};
use rocksenv_shell::{EnvBlock, ShellConfig, VerificationResult, verify_shell_config};

use crate::console::Console;
use crate::error::AppError;
use crate::profile::TargetProfile;
use crate::settings::AppSettings;

const RULE_WIDTH: usize = 40;

/// Exit status for a run the user cancelled at the confirmation prompt.
pub const EXIT_CANCELLED: u8 = 2;
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    UnsupportedArch { arch: String },
    NoInstallRoot,
    MissingArtifact(DetectError),
}

/// How a run ended, short of an I/O failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    AlreadyConfigured {
        config_path: PathBuf,
    },
    Patched {
        config_path: PathBuf,
        backup_path: Option<PathBuf>,
        values: Vec<(&'static str, String)>,
    },
    Cancelled,
    Aborted(AbortReason),
}

impl Outcome {
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::AlreadyConfigured { .. } | Outcome::Patched { .. } => 0,
            Outcome::Cancelled => EXIT_CANCELLED,
            Outcome::Aborted(_) => EXIT_FAILURE,
        }
    }
}

/// Everything a run needs besides the terminal.
pub struct Patcher<'a> {
    pub profile: TargetProfile,
    pub host: &'a HostContext,
    pub settings: &'a AppSettings,
    pub runner: &'a dyn CommandRunner,
}

impl<'a> Patcher<'a> {
    #[must_use]
    pub fn new(
        target: TargetPlatform,
        host: &'a HostContext,
        settings: &'a AppSettings,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            profile: TargetProfile::for_target(target),
            host,
            settings,
            runner,
        }
    }

    /// Discover, check, ask, then back up and append. At most one write.
    pub fn run<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<Outcome, AppError> {
        let target = self.profile.target;
        console.say(format!("{} RocksDB environment setup", target.display_name()))?;
        console.say("=".repeat(RULE_WIDTH))?;

        if !self.host.supports(target) {
            log::warn!("Refusing to run {} setup on {}", target.display_name(), self.host.arch);
            console.say(format!(
                "Error: this tool only supports {} {}",
                target.required_arch().unwrap_or_default(),
                target.display_name()
            ))?;
            return Ok(Outcome::Aborted(AbortReason::UnsupportedArch {
                arch: self.host.arch.clone(),
            }));
        }

        let root = if target == TargetPlatform::Msys2 {
            let Some(root) = self.prompt_root(console)? else {
                console.say("Error: no valid MSYS2 path found")?;
                return Ok(Outcome::Aborted(AbortReason::NoInstallRoot));
            };
            console.say(format!("Using MSYS2 path: {}", root.display()))?;
            Some(root)
        } else {
            None
        };

        let discovery = match self
            .profile
            .strategy(self.settings, root.as_deref())
            .discover(self.runner)
        {
            Ok(discovery) => discovery,
            Err(error) => {
                log::error!("RocksDB installation check failed: {error}");
                console.say(format!("Error: {error}"))?;
                if let Some(hint) = error.remediation() {
                    console.say("Install RocksDB from an MSYS2 shell with:")?;
                    console.say(format!("  {hint}"))?;
                }
                return Ok(Outcome::Aborted(AbortReason::MissingArtifact(error)));
            }
        };
        report_discovery(console, &self.profile, &discovery)?;

        let config_path = self.profile.config_path(self.host, root.as_deref())?;
        let file_name = target.shell_file_name();
        match verify_shell_config(&config_path)? {
            VerificationResult::Configured => {
                console.say(format!("{file_name} already contains all required variables"))?;
                console.blank()?;
                console.say("Configuration already complete, nothing to change")?;
                return Ok(Outcome::AlreadyConfigured { config_path });
            }
            VerificationResult::Incomplete { missing } => {
                console.say(format!("{file_name} is missing: {}", missing.join(", ")))?;
            }
            VerificationResult::ConfigFileNotFound => {
                console.say(format!(
                    "{file_name} does not exist: {}",
                    config_path.display()
                ))?;
            }
        }

        console.blank()?;
        console.say(format!("{file_name} needs the RocksDB environment variables"))?;
        if !console.confirm("Add them now? (y/n): ")? {
            log::info!("User declined to patch {}", config_path.display());
            console.say("Configuration cancelled")?;
            return Ok(Outcome::Cancelled);
        }

        self.patch(console, config_path, &discovery)
    }

    fn prompt_root<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<Option<PathBuf>, AppError> {
        let default = &self.settings.msys2.default_root;
        let prompt = format!(
            "Enter the MSYS2 installation path (default: {}): ",
            default.display()
        );

        loop {
            let Some(input) = console.ask(&prompt)? else {
                return Ok(None);
            };

            match validate_root(&input, default, Path::exists) {
                Ok(root) => return Ok(Some(root)),
                Err(RootError::NotFound(path)) => {
                    console.say(format!("Error: path {} does not exist", path.display()))?;
                    if !console.confirm("Retry? (y/n): ")? {
                        return Ok(None);
                    }
                }
            }
        }
    }

    fn patch<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        config_path: PathBuf,
        discovery: &Discovery,
    ) -> Result<Outcome, AppError> {
        let block = EnvBlock::new(&discovery.lib_dir, &discovery.include_dir);
        let mut config = ShellConfig::load(config_path)?;
        let edit = config.add_exports(&block, self.profile.dialect);
        log::debug!("Planned shell edit:\n{}", edit.diff_preview());

        let applied = config.apply_edit(&edit, self.profile.backup_naming)?;
        if let Some(backup_path) = &applied.backup_path {
            console.say(format!("Created backup: {}", backup_path.display()))?;
        }

        let values = block.values(self.profile.dialect).to_vec();
        console.say(format!(
            "Environment variables added to: {}",
            config.config_path.display()
        ))?;
        console.blank()?;
        console.say("Environment variables:")?;
        for (name, value) in &values {
            console.say(format!("  {name}={value}"))?;
        }
        if discovery.is_fallback() {
            console.say("These are default paths; check them against your RocksDB install.")?;
        }
        console.blank()?;
        console.say("Restart the terminal or run the following to apply them:")?;
        console.say(format!("  {}", self.profile.source_hint(&config.config_path)))?;
        console.blank()?;
        console.say("Configuration complete!")?;

        Ok(Outcome::Patched {
            config_path: config.config_path,
            backup_path: applied.backup_path,
            values,
        })
    }
}

fn report_discovery<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    profile: &TargetProfile,
    discovery: &Discovery,
) -> Result<(), AppError> {
    match &discovery.origin {
        PathOrigin::Detected { evidence } => {
            console.say(format!(
                "{}: {}",
                profile.detected_label(),
                evidence.display()
            ))?;
        }
        PathOrigin::Fallback { reason } => {
            console.say(format!(
                "Could not locate RocksDB automatically ({reason}), using default paths"
            ))?;
        }
    }
    Ok(())
}
