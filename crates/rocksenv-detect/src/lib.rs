//! Locating an installed RocksDB.
//!
//! Each target platform has one way of finding the library and include
//! directories:
//! - Debian searches the filesystem with `find`.
//! - macOS asks Homebrew for its prefix.
//! - MSYS2 takes an installation root from the user and checks the expected
//!   artifacts under it.
//!
//! External programs are reached only through [`CommandRunner`] so tests can
//! script their output.
#![allow(clippy::missing_errors_doc)]

mod error;
mod msys2;
mod package;
mod runner;
mod search;
mod strategy;

pub use error::DetectError;
pub use msys2::{DEFAULT_MSYS2_ROOT, LIBRARY_CANDIDATES, RootError, UserRoot, validate_root};
pub use package::PackageManager;
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use search::FileSearch;
pub use strategy::{Discovery, DiscoveryStrategy, PathOrigin};
