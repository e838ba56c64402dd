use rocksenv_shell::{
    BackupNaming, EnvBlock, ShellConfig, ShellDialect, VerificationResult, backup_path,
    verify_shell_config,
};
use tempfile::tempdir;

fn block() -> EnvBlock {
    EnvBlock::new("/usr/lib/x86_64-linux-gnu", "/usr/include")
}

fn patch(path: &std::path::Path, naming: BackupNaming) -> Option<std::path::PathBuf> {
    let mut config = ShellConfig::load(path.to_path_buf()).expect("load config");
    let edit = config.add_exports(&block(), ShellDialect::Posix);
    config
        .apply_edit(&edit, naming)
        .expect("apply edit")
        .backup_path
}

#[test]
fn missing_file_gets_one_block_and_no_backup() {
    let temp_dir = tempdir().expect("create temp dir");
    let config_path = temp_dir.path().join(".bashrc");

    let before = verify_shell_config(&config_path).expect("verify");
    assert_eq!(before.missing_vars().len(), 3);

    let backup = patch(&config_path, BackupNaming::AppendSuffix);

    assert!(backup.is_none());
    assert!(!backup_path(&config_path, BackupNaming::AppendSuffix).exists());
    let content = std::fs::read_to_string(&config_path).expect("read patched config");
    assert_eq!(content.matches("export LIBROCKSDB_STATIC=").count(), 1);
    assert_eq!(content.matches("export ROCKSDB_LIB_DIR=").count(), 1);
    assert_eq!(content.matches("export ROCKSDB_INCLUDE_DIR=").count(), 1);
}

#[test]
fn partial_file_is_appended_and_backed_up() {
    let temp_dir = tempdir().expect("create temp dir");
    let config_path = temp_dir.path().join(".bashrc");
    let original = "alias ll='ls -l'\nexport ROCKSDB_LIB_DIR=/opt/rocksdb/lib";
    std::fs::write(&config_path, original).expect("write config");

    assert_eq!(
        verify_shell_config(&config_path).expect("verify"),
        VerificationResult::Incomplete {
            missing: vec!["LIBROCKSDB_STATIC", "ROCKSDB_INCLUDE_DIR"]
        }
    );

    let backup = patch(&config_path, BackupNaming::AppendSuffix).expect("backup created");

    let content = std::fs::read_to_string(&config_path).expect("read patched config");
    assert!(content.starts_with(original));
    assert_eq!(content, format!("{original}{}", block().render(ShellDialect::Posix)));
    assert_eq!(
        std::fs::read_to_string(&backup).expect("read backup"),
        original
    );
    assert_eq!(backup, temp_dir.path().join(".bashrc.backup"));
}

#[test]
fn empty_file_is_prefix_of_result() {
    let temp_dir = tempdir().expect("create temp dir");
    let config_path = temp_dir.path().join(".zshrc");
    std::fs::write(&config_path, "").expect("write empty config");

    let backup = patch(&config_path, BackupNaming::AppendSuffix).expect("backup created");

    assert_eq!(std::fs::read(&backup).expect("read backup"), b"");
    let content = std::fs::read_to_string(&config_path).expect("read patched config");
    assert_eq!(content, block().render(ShellDialect::Posix));
}

#[test]
fn second_run_finds_file_configured_and_writes_nothing() {
    let temp_dir = tempdir().expect("create temp dir");
    let config_path = temp_dir.path().join(".bashrc");
    std::fs::write(&config_path, "export PATH=$PATH:/usr/local/bin\n").expect("write config");

    patch(&config_path, BackupNaming::AppendSuffix);
    let after_first = std::fs::read(&config_path).expect("read after first run");

    assert!(verify_shell_config(&config_path).expect("verify").is_configured());
    let config = ShellConfig::load(config_path.clone()).expect("reload config");
    let edit = config.add_exports(&block(), ShellDialect::Posix);
    assert!(!edit.has_changes());

    let mut config = config;
    let applied = config
        .apply_edit(&edit, BackupNaming::AppendSuffix)
        .expect("no-op apply");
    assert!(applied.backup_path.is_none());
    assert_eq!(std::fs::read(&config_path).expect("read after second run"), after_first);
}

#[test]
fn msys_profile_backup_replaces_extension() {
    let temp_dir = tempdir().expect("create temp dir");
    let home = temp_dir.path().join("home").join("dev");
    std::fs::create_dir_all(&home).expect("create home");
    let profile = home.join(".bash_profile");
    std::fs::write(&profile, "# msys profile\n").expect("write profile");

    let mut config = ShellConfig::load(profile.clone()).expect("load profile");
    let edit = config.add_exports(
        &EnvBlock::new("C:/msys64/mingw64/lib", "C:/msys64/mingw64/include"),
        ShellDialect::Msys,
    );
    let applied = config
        .apply_edit(&edit, BackupNaming::ReplaceExtension)
        .expect("apply edit");

    assert_eq!(applied.backup_path, Some(home.join(".bash_profile.backup")));
    let content = std::fs::read_to_string(&profile).expect("read profile");
    assert!(content.starts_with("# msys profile\n"));
    assert!(content.contains(r#"export ROCKSDB_LIB_DIR="C:\msys64\mingw64\lib""#));
}

#[test]
fn missing_parent_directory_is_created() {
    let temp_dir = tempdir().expect("create temp dir");
    let profile = temp_dir.path().join("home").join("new-user").join(".bash_profile");

    let backup = patch(&profile, BackupNaming::ReplaceExtension);

    assert!(backup.is_none());
    assert!(verify_shell_config(&profile).expect("verify").is_configured());
}
