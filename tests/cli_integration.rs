//! Integration tests for the envseal CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`
//! against a throwaway project directory.

use std::fs;

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the envseal binary.
fn envseal() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("envseal").expect("binary should exist")
}

/// Helper: envseal with `--project-dir` set to `dir`.
fn envseal_in(dir: &TempDir) -> Command {
    let mut cmd = envseal();
    cmd.arg("--project-dir").arg(dir.path());
    cmd
}

fn write_uat(dir: &TempDir, content: &str) {
    let env_dir = dir.path().join("environments");
    fs::create_dir_all(&env_dir).unwrap();
    fs::write(env_dir.join(".env.uat"), content).unwrap();
}

fn read_env(dir: &TempDir, file: &str) -> String {
    fs::read_to_string(dir.path().join("environments").join(file)).unwrap()
}

#[test]
fn help_flag_shows_usage() {
    envseal()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Encrypts credentials stored in environment files",
        ))
        .stdout(predicate::str::contains("keygen"))
        .stdout(predicate::str::contains("encrypt"))
        .stdout(predicate::str::contains("decrypt"));
}

#[test]
fn no_args_shows_help() {
    envseal()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn keygen_writes_key_into_base_file() {
    let tmp = TempDir::new().unwrap();

    envseal_in(&tmp)
        .args(["keygen", "UAT"])
        .assert()
        .success()
        .stdout(predicate::str::contains("UAT_SECRET_KEY"));

    let base = read_env(&tmp, ".env");
    let line = base
        .lines()
        .find(|l| l.starts_with("UAT_SECRET_KEY="))
        .expect("key line");
    // 32 bytes of base64 is 44 characters.
    assert_eq!(line.len(), "UAT_SECRET_KEY=".len() + 44);
}

#[test]
fn keygen_refuses_to_replace_key_without_force() {
    let tmp = TempDir::new().unwrap();
    envseal_in(&tmp).args(["keygen", "UAT"]).assert().success();
    let original = read_env(&tmp, ".env");

    // No terminal to confirm on, so the prompt fails and nothing changes.
    envseal_in(&tmp).args(["keygen", "UAT"]).assert().failure();
    assert_eq!(read_env(&tmp, ".env"), original);

    envseal_in(&tmp)
        .args(["keygen", "UAT", "--force"])
        .assert()
        .success();
    assert_ne!(read_env(&tmp, ".env"), original);
}

#[test]
fn encrypt_then_decrypt_roundtrip() {
    let tmp = TempDir::new().unwrap();
    envseal_in(&tmp).args(["keygen", "UAT"]).assert().success();
    write_uat(
        &tmp,
        "# UAT portal\nPORTAL_URL=https://uat.example\nPORTAL_USERNAME=admin\nPORTAL_PASSWORD=hunter2\n",
    );

    envseal_in(&tmp)
        .args(["encrypt", "UAT", "PORTAL_USERNAME", "PORTAL_PASSWORD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted 2 variable(s)"));

    let content = read_env(&tmp, ".env.uat");
    assert!(content.starts_with("# UAT portal\nPORTAL_URL=https://uat.example\n"));
    assert!(!content.contains("admin"));
    assert!(!content.contains("hunter2"));

    envseal_in(&tmp)
        .args(["decrypt", "UAT", "PORTAL_PASSWORD", "PORTAL_USERNAME"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "PORTAL_PASSWORD=hunter2\nPORTAL_USERNAME=admin\n",
        ));

    envseal_in(&tmp)
        .args(["decrypt", "UAT", "PORTAL_PASSWORD", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"PORTAL_PASSWORD\": \"hunter2\""));
}

#[test]
fn decrypt_plaintext_value_fails() {
    let tmp = TempDir::new().unwrap();
    envseal_in(&tmp).args(["keygen", "UAT"]).assert().success();
    write_uat(&tmp, "PORTAL_PASSWORD=hunter2\n");

    envseal_in(&tmp)
        .args(["decrypt", "UAT", "PORTAL_PASSWORD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PORTAL_PASSWORD"))
        .stdout(predicate::str::contains("hunter2").not());
}

#[test]
fn encrypt_without_key_fails() {
    let tmp = TempDir::new().unwrap();
    write_uat(&tmp, "PORTAL_PASSWORD=hunter2\n");

    envseal_in(&tmp)
        .args(["encrypt", "UAT", "PORTAL_PASSWORD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UAT_SECRET_KEY"));

    assert_eq!(read_env(&tmp, ".env.uat"), "PORTAL_PASSWORD=hunter2\n");
}

#[test]
fn encrypt_missing_environment_file_fails() {
    let tmp = TempDir::new().unwrap();
    envseal_in(&tmp).args(["keygen", "UAT"]).assert().success();

    envseal_in(&tmp)
        .args(["encrypt", "UAT", "PORTAL_PASSWORD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no environment file"));
}

#[test]
fn invalid_alias_rejected() {
    let tmp = TempDir::new().unwrap();
    envseal_in(&tmp)
        .args(["keygen", "../etc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn unknown_decrypt_format_rejected() {
    let tmp = TempDir::new().unwrap();
    envseal_in(&tmp)
        .args(["decrypt", "UAT", "A", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown output format"));
}

#[test]
fn settings_file_redirects_paths_and_key_names() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".envseal.toml"),
        "env_dir = \"resources\"\n\n[files]\nBASE = \"base.env\"\nUAT = \"uat.env\"\n\n[secret_keys]\nUAT = \"UAT_KEY\"\n",
    )
    .unwrap();

    envseal_in(&tmp).args(["keygen", "UAT"]).assert().success();
    let base = fs::read_to_string(tmp.path().join("resources").join("base.env")).unwrap();
    assert!(base.starts_with("UAT_KEY="));

    fs::write(tmp.path().join("resources").join("uat.env"), "TOKEN=abc\n").unwrap();
    envseal_in(&tmp)
        .args(["encrypt", "UAT", "TOKEN"])
        .assert()
        .success();
    envseal_in(&tmp)
        .args(["decrypt", "UAT", "TOKEN"])
        .assert()
        .success()
        .stdout(predicate::eq("TOKEN=abc\n"));
}
