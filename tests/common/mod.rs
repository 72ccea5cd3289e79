#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn sirup_cmd() -> Command {
    let mut cmd = Command::cargo_bin("sirup").unwrap();
    cmd.env_remove("SIRUP_ROOT");
    cmd.env_remove("SIRUP_PASSWORD");
    cmd.env_remove("SIRUP_ADMIN_PASSWORD");
    cmd.env_remove("SIRUP_LOG");
    cmd
}

/// `sirup` running inside `dir`
pub fn sirup_in(dir: &Path) -> Command {
    let mut cmd = sirup_cmd();
    cmd.current_dir(dir);
    cmd
}

/// Initialize `dir` with admin password `pw` and log the admin in
pub fn init_logged_in(dir: &Path) {
    sirup_cmd()
        .args(["init", "--admin-password", "pw"])
        .arg(dir)
        .assert()
        .success();
    sirup_in(dir)
        .args(["login", "admin", "--password", "pw"])
        .assert()
        .success();
}

/// Add two OPDs: opd-001 Dinas Kesehatan (1000) and opd-002 Biro Umum (200)
pub fn add_sample_opds(dir: &Path) {
    sirup_in(dir)
        .args(["opd", "add", "--name", "Dinas Kesehatan", "--pagu", "1000"])
        .assert()
        .success();
    sirup_in(dir)
        .args(["opd", "add", "--name", "Biro Umum", "--pagu", "200"])
        .assert()
        .success();
}
