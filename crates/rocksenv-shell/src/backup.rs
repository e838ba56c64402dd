use std::ffi::OsString;
use std::fs::{self, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

const BACKUP_SUFFIX: &str = "backup";

/// How the backup file name is derived from the shell file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupNaming {
    /// `.bashrc` -> `.bashrc.backup`
    AppendSuffix,
    /// `profile.sh` -> `profile.backup`; a dotfile with no extension keeps its
    /// whole name, so `.bash_profile` -> `.bash_profile.backup`.
    ReplaceExtension,
}

#[must_use]
pub fn backup_path(config_path: &Path, naming: BackupNaming) -> PathBuf {
    match naming {
        BackupNaming::AppendSuffix => {
            let mut name = OsString::from(config_path.as_os_str());
            name.push(".");
            name.push(BACKUP_SUFFIX);
            PathBuf::from(name)
        }
        BackupNaming::ReplaceExtension => config_path.with_extension(BACKUP_SUFFIX),
    }
}

/// Copy `source` to `dest`, carrying over permissions and timestamps.
pub(crate) fn copy_preserving_metadata(source: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(source, dest)?;

    let metadata = fs::metadata(source)?;
    let mut times = FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    // A read-only source yields a read-only copy; its timestamps stay as copied.
    match fs::OpenOptions::new().write(true).open(dest) {
        Ok(file) => file.set_times(times),
        Err(error) => {
            log::debug!("Could not carry timestamps to {}: {error}", dest.display());
            Ok(())
        }
    }
}
