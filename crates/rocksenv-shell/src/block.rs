use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub const STATIC_FLAG_VAR: &str = "LIBROCKSDB_STATIC";
pub const LIB_DIR_VAR: &str = "ROCKSDB_LIB_DIR";
pub const INCLUDE_DIR_VAR: &str = "ROCKSDB_INCLUDE_DIR";

/// Every name must appear in a shell file for it to count as configured.
pub const REQUIRED_VARS: [&str; 3] = [STATIC_FLAG_VAR, LIB_DIR_VAR, INCLUDE_DIR_VAR];

pub const STATIC_FLAG_VALUE: &str = "1";

/// How paths and the surrounding block are written for a given shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellDialect {
    /// bash/zsh with native forward-slash paths.
    Posix,
    /// MSYS2 bash, where the native build expects Windows-style paths.
    Msys,
}

impl ShellDialect {
    #[must_use]
    pub fn format_path(self, path: &Path) -> String {
        let path = path.to_string_lossy();
        match self {
            ShellDialect::Posix => path.into_owned(),
            ShellDialect::Msys => path.replace('/', "\\"),
        }
    }

    fn header(self) -> &'static str {
        match self {
            ShellDialect::Posix => "# RocksDB build environment",
            ShellDialect::Msys => "# RocksDB build environment (added by rocksenv)",
        }
    }
}

/// The three exports that point a `librocksdb-sys` build at a system RocksDB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvBlock {
    pub lib_dir: PathBuf,
    pub include_dir: PathBuf,
}

impl EnvBlock {
    #[must_use]
    pub fn new(lib_dir: impl Into<PathBuf>, include_dir: impl Into<PathBuf>) -> Self {
        Self {
            lib_dir: lib_dir.into(),
            include_dir: include_dir.into(),
        }
    }

    /// Variable names paired with the values written for `dialect`.
    #[must_use]
    pub fn values(&self, dialect: ShellDialect) -> [(&'static str, String); 3] {
        [
            (STATIC_FLAG_VAR, STATIC_FLAG_VALUE.to_string()),
            (LIB_DIR_VAR, dialect.format_path(&self.lib_dir)),
            (INCLUDE_DIR_VAR, dialect.format_path(&self.include_dir)),
        ]
    }

    /// Render the block as appended to a shell file. Starts with a newline so it
    /// never joins an unterminated last line.
    #[must_use]
    pub fn render(&self, dialect: ShellDialect) -> String {
        let mut block = format!("\n{}\n", dialect.header());
        for (name, value) in self.values(dialect) {
            let _ = writeln!(block, "export {name}=\"{}\"", quote(&value));
        }
        if dialect == ShellDialect::Msys {
            block.push('\n');
        }
        block
    }
}

/// Escape `value` for a double-quoted bash word. A backslash stays literal
/// unless bash would otherwise read it as an escape, so Windows paths such as
/// `C:\msys64\mingw64\lib` are written unchanged.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' | '$' | '`' => quoted.push('\\'),
            '\\' if chars
                .peek()
                .is_none_or(|next| matches!(next, '"' | '$' | '`' | '\\')) =>
            {
                quoted.push('\\');
            }
            _ => {}
        }
        quoted.push(ch);
    }
    quoted
}
