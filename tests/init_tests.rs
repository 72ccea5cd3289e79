//! Integration tests for init, login and config commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{init_logged_in, sirup_cmd, sirup_in};

#[test]
fn test_init_creates_data_directory() {
    let temp = TempDir::new().unwrap();

    sirup_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized sirup data directory"))
        .stdout(predicate::str::contains("Warning: admin password is 'admin'"));

    let data_dir = temp.path().join(".sirup");
    assert!(data_dir.join("config.toml").exists());

    let data = fs::read_to_string(data_dir.join("data.json")).unwrap();
    assert!(data.contains("\"username\": \"admin\""));
    assert!(data.contains("\"ta\": \"2026\""));

    let config = fs::read_to_string(data_dir.join("config.toml")).unwrap();
    assert!(config.contains("region = \"NTB\""));
    assert!(config.contains("page_size = 10"));
}

#[test]
fn test_init_with_fiscal_year_and_password() {
    let temp = TempDir::new().unwrap();

    sirup_cmd()
        .args(["init", "--fiscal-year", "2027"])
        .arg(temp.path())
        .env("SIRUP_ADMIN_PASSWORD", "rahasia")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fiscal year: 2027"))
        .stdout(predicate::str::contains("Warning").not());

    sirup_in(temp.path())
        .args(["settings", "ta"])
        .assert()
        .success()
        .stdout("2027\n");

    sirup_in(temp.path())
        .args(["login", "admin"])
        .env("SIRUP_PASSWORD", "rahasia")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as admin (admin)"));
}

#[test]
fn test_init_rejects_bad_fiscal_year() {
    let temp = TempDir::new().unwrap();

    sirup_cmd()
        .args(["init", "--fiscal-year", "26"])
        .arg(temp.path())
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("four digits"));

    assert!(!temp.path().join(".sirup").exists());
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = TempDir::new().unwrap();

    sirup_cmd().arg("init").arg(temp.path()).assert().success();
    sirup_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_uninitialized_directory_exit_code() {
    let temp = TempDir::new().unwrap();

    sirup_in(temp.path())
        .arg("recap")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("sirup init"));
}

#[test]
fn test_sirup_root_env_var() {
    let data = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    sirup_cmd().arg("init").arg(data.path()).assert().success();

    sirup_in(elsewhere.path())
        .env("SIRUP_ROOT", data.path())
        .args(["config", "region"])
        .assert()
        .success()
        .stdout("NTB\n");
}

#[test]
fn test_discovery_from_subdirectory() {
    let temp = TempDir::new().unwrap();
    sirup_cmd().arg("init").arg(temp.path()).assert().success();
    let nested = temp.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    sirup_in(&nested)
        .args(["config", "city"])
        .assert()
        .success()
        .stdout("Mataram\n");
}

#[test]
fn test_login_logout_whoami() {
    let temp = TempDir::new().unwrap();
    init_logged_in(temp.path());

    sirup_in(temp.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("admin (admin) - Administrator"));

    sirup_in(temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout("Logged out\n");

    sirup_in(temp.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout("Not logged in\n");
}

#[test]
fn test_login_wrong_password() {
    let temp = TempDir::new().unwrap();
    sirup_cmd().arg("init").arg(temp.path()).assert().success();

    sirup_in(temp.path())
        .args(["login", "admin", "--password", "nope"])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("Invalid username or password"));
}

#[test]
fn test_config_set_and_list() {
    let temp = TempDir::new().unwrap();
    sirup_cmd().arg("init").arg(temp.path()).assert().success();

    sirup_in(temp.path())
        .args(["config", "page_size", "25"])
        .assert()
        .success()
        .stdout("Set page_size = 25\n");

    sirup_in(temp.path())
        .args(["config", "contact.phone", "0370-123"])
        .assert()
        .success();

    sirup_in(temp.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page_size = 25"))
        .stdout(predicate::str::contains("contact.phone = 0370-123"))
        .stdout(predicate::str::contains("timezone_label = WITA"));
}

#[test]
fn test_config_rejects_bad_values() {
    let temp = TempDir::new().unwrap();
    sirup_cmd().arg("init").arg(temp.path()).assert().success();

    sirup_in(temp.path())
        .args(["config", "page_size", "many"])
        .assert()
        .failure();

    sirup_in(temp.path())
        .args(["config", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}
