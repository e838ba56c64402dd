use std::path::PathBuf;

use crate::error::DetectError;
use crate::runner::CommandRunner;
use crate::strategy::{Discovery, PathOrigin};

const FIND: &str = "find";

/// Searches a directory tree for the shared library with `find`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSearch {
    pub root: PathBuf,
    pub pattern: String,
    pub include_dir: PathBuf,
    pub fallback_lib_dir: PathBuf,
}

impl FileSearch {
    #[must_use]
    pub fn debian() -> Self {
        Self {
            root: PathBuf::from("/usr"),
            pattern: "librocksdb.so*".to_string(),
            include_dir: PathBuf::from("/usr/include"),
            fallback_lib_dir: PathBuf::from("/usr/lib/x86_64-linux-gnu"),
        }
    }

    pub(crate) fn discover(&self, runner: &dyn CommandRunner) -> Discovery {
        match self.locate_library(runner) {
            Ok(library) => {
                log::info!("Found RocksDB library at {}", library.display());
                let lib_dir = library
                    .parent()
                    .map_or_else(|| self.fallback_lib_dir.clone(), PathBuf::from);
                Discovery {
                    lib_dir,
                    include_dir: self.include_dir.clone(),
                    origin: PathOrigin::Detected { evidence: library },
                }
            }
            Err(reason) => {
                log::info!("Could not locate RocksDB automatically: {reason}");
                Discovery {
                    lib_dir: self.fallback_lib_dir.clone(),
                    include_dir: self.include_dir.clone(),
                    origin: PathOrigin::Fallback { reason },
                }
            }
        }
    }

    fn locate_library(&self, runner: &dyn CommandRunner) -> Result<PathBuf, DetectError> {
        let program = runner.resolve(FIND).ok_or_else(|| DetectError::ToolMissing {
            program: FIND.to_string(),
        })?;

        let root = self.root.to_string_lossy();
        let output = runner
            .run(&program, &[&*root, "-name", &self.pattern])
            .map_err(|error| DetectError::Spawn {
                program: FIND.to_string(),
                details: error.to_string(),
            })?;

        if !output.success {
            return Err(DetectError::command_failed(FIND, &output.stderr));
        }

        output
            .stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(PathBuf::from)
            .filter(|library| library.parent().is_some_and(|dir| !dir.as_os_str().is_empty()))
            .ok_or_else(|| DetectError::NoMatch {
                pattern: self.pattern.clone(),
                root: self.root.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    use super::FileSearch;
    use crate::error::DetectError;
    use crate::runner::{CommandOutput, CommandRunner};
    use crate::strategy::PathOrigin;

    struct FakeFind {
        output: std::io::Result<CommandOutput>,
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl FakeFind {
        fn printing(stdout: &str) -> Self {
            Self {
                output: Ok(CommandOutput {
                    success: true,
                    stdout: stdout.to_string(),
                    stderr: String::new(),
                }),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing(stderr: &str) -> Self {
            Self {
                output: Ok(CommandOutput {
                    success: false,
                    stdout: String::new(),
                    stderr: stderr.to_string(),
                }),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for FakeFind {
        fn resolve(&self, program: &str) -> Option<PathBuf> {
            Some(Path::new("/usr/bin").join(program))
        }

        fn run(&self, _program: &Path, args: &[&str]) -> std::io::Result<CommandOutput> {
            self.calls
                .borrow_mut()
                .push(args.iter().map(ToString::to_string).collect());
            match &self.output {
                Ok(output) => Ok(output.clone()),
                Err(error) => Err(std::io::Error::new(error.kind(), error.to_string())),
            }
        }
    }

    #[test]
    fn first_match_directory_becomes_lib_dir() {
        let runner = FakeFind::printing(
            "/usr/lib/aarch64-linux-gnu/librocksdb.so.8\n/usr/local/lib/librocksdb.so\n",
        );

        let discovery = FileSearch::debian().discover(&runner);

        assert_eq!(discovery.lib_dir, Path::new("/usr/lib/aarch64-linux-gnu"));
        assert_eq!(discovery.include_dir, Path::new("/usr/include"));
        assert_eq!(
            discovery.origin,
            PathOrigin::Detected {
                evidence: PathBuf::from("/usr/lib/aarch64-linux-gnu/librocksdb.so.8")
            }
        );
    }

    #[test]
    fn search_passes_root_and_pattern() {
        let runner = FakeFind::printing("/usr/lib/librocksdb.so\n");

        let _ = FileSearch::debian().discover(&runner);

        assert_eq!(
            runner.calls.borrow().as_slice(),
            &[vec![
                "/usr".to_string(),
                "-name".to_string(),
                "librocksdb.so*".to_string()
            ]]
        );
    }

    #[test]
    fn no_matches_falls_back_to_defaults() {
        let runner = FakeFind::printing("\n");

        let discovery = FileSearch::debian().discover(&runner);

        assert_eq!(discovery.lib_dir, Path::new("/usr/lib/x86_64-linux-gnu"));
        assert!(matches!(
            discovery.origin,
            PathOrigin::Fallback {
                reason: DetectError::NoMatch { .. }
            }
        ));
    }

    #[test]
    fn non_zero_exit_falls_back_to_defaults() {
        let runner = FakeFind::failing("find: '/usr/lost+found': Permission denied");

        let discovery = FileSearch::debian().discover(&runner);

        assert!(discovery.is_fallback());
        assert_eq!(discovery.lib_dir, Path::new("/usr/lib/x86_64-linux-gnu"));
        assert_eq!(discovery.include_dir, Path::new("/usr/include"));
    }

    #[test]
    fn spawn_error_falls_back_to_defaults() {
        let runner = FakeFind {
            output: Err(std::io::Error::other("exec format error")),
            calls: RefCell::new(Vec::new()),
        };

        let discovery = FileSearch::debian().discover(&runner);

        assert!(matches!(
            discovery.origin,
            PathOrigin::Fallback {
                reason: DetectError::Spawn { .. }
            }
        ));
    }

    #[test]
    fn bare_file_name_is_not_a_match() {
        let runner = FakeFind::printing("librocksdb.so\n");

        let discovery = FileSearch::debian().discover(&runner);

        assert!(discovery.is_fallback());
    }
}
