#[cfg(debug_assertions)]
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use simplelog::{CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, WriteLogger};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use rocksenv_platform::AppPaths;

/// Route `log` records to `debug.log` in the data directory, and to stderr in
/// debug builds. Status lines meant for the user never go through here.
///
/// Returns the log file in use, if one could be opened.
pub fn init_logging(debug_enabled: bool, max_log_size: u64) -> Option<PathBuf> {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("rocksenv")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    let log_path = AppPaths::new()
        .ok()
        .filter(|paths| paths.ensure_dirs().is_ok())
        .map(|paths| paths.log_file());
    let log_path = log_path.and_then(|path| match open_log_file(&path, max_log_size) {
        Ok(file) => {
            loggers.push(WriteLogger::new(LevelFilter::Debug, config.clone(), file));
            Some(path)
        }
        Err(error) => {
            eprintln!("Warning: could not open {}: {error}", path.display());
            None
        }
    });

    #[cfg(debug_assertions)]
    loggers.push(TermLogger::new(
        LevelFilter::Debug,
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
    set_logging_enabled(debug_enabled);

    log_path
}

/// Open the log for appending. A run writes a few dozen lines, so the file is
/// only trimmed here, once per start-up.
fn open_log_file(log_path: &Path, max_log_size: u64) -> io::Result<File> {
    keep_recent_half(log_path, max_log_size);
    OpenOptions::new().create(true).append(true).open(log_path)
}

/// Drop the older half of an oversized log, cutting at a line boundary.
fn keep_recent_half(log_path: &Path, max_log_size: u64) {
    let oversized = std::fs::metadata(log_path).is_ok_and(|metadata| metadata.len() > max_log_size);
    if !oversized {
        return;
    }

    let Ok(contents) = std::fs::read(log_path) else {
        return;
    };
    let (_, recent) = contents.split_at(contents.len() / 2);
    let recent = recent
        .iter()
        .position(|&b| b == b'\n')
        .map_or(recent, |newline| &recent[newline + 1..]);
    let _ = std::fs::write(log_path, recent);
}

pub fn set_logging_enabled(enabled: bool) {
    if enabled {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Off);
    }
}
