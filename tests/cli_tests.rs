use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("kodegen_bundler_squirrel").expect("binary");
    cmd.env_remove("SQUIRREL_VENDOR_DIR");
    cmd
}

#[test]
fn test_src_and_dest_are_required() {
    cli()
        .args(["--dest", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--src"));
}

#[test]
fn test_help_mentions_config() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--remote-releases"));
}

#[test]
fn test_missing_metadata_exits_with_error() {
    let tmp = TempDir::new().expect("tempdir");
    let src = tmp.path().join("app");
    std::fs::create_dir_all(&src).expect("mkdir");

    cli()
        .arg("--src")
        .arg(&src)
        .arg("--dest")
        .arg(tmp.path().join("out"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Creating package (this may take a while)"))
        .stderr(predicate::str::contains("Error reading package metadata"));

    assert!(!tmp.path().join("out").exists());
}

#[test]
fn test_unreadable_config_exits_with_error() {
    let tmp = TempDir::new().expect("tempdir");

    cli()
        .arg("--src")
        .arg(tmp.path().join("app"))
        .arg("--dest")
        .arg(tmp.path().join("out"))
        .arg("--config")
        .arg(tmp.path().join("missing.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn test_version_flag_prints_tool_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_password_alone_is_not_rejected_up_front() {
    let tmp = TempDir::new().expect("tempdir");
    let src = tmp.path().join("app");
    std::fs::create_dir_all(&src).expect("mkdir");

    // Fails later on missing metadata, not on argument validation
    cli()
        .arg("--src")
        .arg(&src)
        .arg("--dest")
        .arg(tmp.path().join("out"))
        .args(["--certificatePassword", "pw"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error reading package metadata"));
}
