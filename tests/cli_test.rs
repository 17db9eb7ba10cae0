//! Integration tests for the meerkat binary.
//!
//! Each test runs with `PATH` pointing at a temp dir holding a fake
//! `dpkg-query`, so results do not depend on the host's packages.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]
#![cfg(unix)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Host {
    temp: TempDir,
}

impl Host {
    /// A host where `foo` is installed at `foo_version`.
    fn new(foo_version: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        fs::create_dir_all(&bin).unwrap();

        let script = format!(
            "#!/bin/sh\nprintf 'foo\\t{}\\tinstalled\\nbar\\t1.0\\tinstalled\\nold\\t0.1\\tdeinstall\\n'\n",
            foo_version
        );
        let fake = bin.join("dpkg-query");
        fs::write(&fake, script).unwrap();
        fs::set_permissions(&fake, fs::Permissions::from_mode(0o755)).unwrap();

        Self { temp }
    }

    fn config_path(&self) -> PathBuf {
        self.temp.path().join("meerkat.yml")
    }

    fn snapshot_path(&self) -> PathBuf {
        self.temp.path().join("versions.yml")
    }

    fn write_config(&self, webhook_url: &str) {
        let config = format!(
            "general:\n  selected_notifications:\n  - Discord Webhook\n  watched_packages:\n  - foo\n  watcher_file_path: {}\nnotifications:\n  discord_webhook:\n    url: '{}'\n",
            self.snapshot_path().display(),
            webhook_url
        );
        fs::write(self.config_path(), config).unwrap();
    }

    fn write_snapshot(&self, content: &str) {
        fs::write(self.snapshot_path(), content).unwrap();
    }

    fn meerkat(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("meerkat"));
        cmd.env("PATH", self.temp.path().join("bin"))
            .env_remove("MEERKAT_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--config-file")
            .arg(self.config_path());
        cmd
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("meerkat"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--notify"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--config-file"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("meerkat"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_unknown_flag() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("meerkat"));
    cmd.arg("--frobnicate");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn no_flags_prints_help() -> Result<(), Box<dyn std::error::Error>> {
    let host = Host::new("1.0");
    host.write_config("");
    host.write_snapshot("foo: '1.0'\n");

    host.meerkat()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn dry_run_prints_changes_and_keeps_snapshot() -> Result<(), Box<dyn std::error::Error>> {
    let host = Host::new("2.0");
    host.write_config("");
    host.write_snapshot("foo: '1.0'\n");

    host.meerkat()
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes on "))
        .stdout(predicate::str::contains(" host: \nfoo: 1.0 -> 2.0"));

    assert_eq!(read(&host.snapshot_path()), "foo: '1.0'\n");
    Ok(())
}

#[test]
fn notify_without_changes() -> Result<(), Box<dyn std::error::Error>> {
    let host = Host::new("1.0");
    host.write_config("http://127.0.0.1:9/unused");
    host.write_snapshot("foo: '1.0'\n");

    host.meerkat()
        .arg("--notify")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes in watched packages."));

    assert_eq!(read(&host.snapshot_path()), "foo: '1.0'\n");
    Ok(())
}

#[test]
fn notify_posts_to_webhook_and_updates_snapshot() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/hook")
            .header("content-type", "application/json")
            .body_includes("foo: 1.0 -> 2.0");
        then.status(204);
    });

    let host = Host::new("2.0");
    host.write_config(&server.url("/hook"));
    host.write_snapshot("foo: '1.0'\n");

    host.meerkat().arg("-n").assert().success();

    mock.assert_calls(1);
    assert!(read(&host.snapshot_path()).contains("2.0"));
    Ok(())
}

#[test]
fn rejected_webhook_fails_and_keeps_snapshot() -> Result<(), Box<dyn std::error::Error>> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/hook");
        then.status(404).json_body(json!({"message": "Unknown Webhook"}));
    });

    let host = Host::new("2.0");
    host.write_config(&server.url("/hook"));
    host.write_snapshot("foo: '1.0'\n");

    host.meerkat()
        .arg("--notify")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("404"));

    assert_eq!(read(&host.snapshot_path()), "foo: '1.0'\n");
    Ok(())
}

#[test]
fn missing_webhook_url_fails() -> Result<(), Box<dyn std::error::Error>> {
    let host = Host::new("2.0");
    host.write_config("");
    host.write_snapshot("foo: '1.0'\n");

    host.meerkat()
        .arg("--notify")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Discord Webhook"));
    Ok(())
}

#[test]
fn missing_snapshot_tells_user_to_run_setup() -> Result<(), Box<dyn std::error::Error>> {
    let host = Host::new("1.0");
    host.write_config("");

    host.meerkat()
        .arg("--dry-run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No version file found"))
        .stderr(predicate::str::contains("meerkat --config"));
    Ok(())
}

#[test]
fn vanished_package_fails() -> Result<(), Box<dyn std::error::Error>> {
    let host = Host::new("1.0");
    host.write_config("");
    host.write_snapshot("foo: '1.0'\nold: '0.1'\n");

    host.meerkat()
        .arg("--dry-run")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("old"));
    Ok(())
}

#[test]
fn corrupt_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let host = Host::new("1.0");
    fs::write(host.config_path(), "general: [unclosed")?;

    host.meerkat()
        .arg("--notify")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}

#[test]
fn missing_config_runs_setup_from_prompt_variables() -> Result<(), Box<dyn std::error::Error>> {
    let host = Host::new("1.0");

    host.meerkat()
        .arg("--notify")
        .env(
            "MEERKAT_PROMPT_WATCHER_FILE_PATH",
            host.snapshot_path().as_os_str(),
        )
        .env("MEERKAT_PROMPT_WATCHED_PACKAGES", "foo,bar")
        .env("MEERKAT_PROMPT_NOTIFICATIONS", "Discord Webhook")
        .env(
            "MEERKAT_PROMPT_DISCORD_WEBHOOK_URL",
            "https://discord.test/api/webhooks/1/abc",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("No configuration found"))
        .stdout(predicate::str::contains("No changes").not());

    let config = read(&host.config_path());
    assert!(config.contains("Discord Webhook"));
    assert!(config.contains("https://discord.test/api/webhooks/1/abc"));

    let snapshot = read(&host.snapshot_path());
    assert!(snapshot.contains("foo"));
    assert!(snapshot.contains("bar"));
    Ok(())
}

#[test]
fn missing_config_without_answers_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let host = Host::new("1.0");

    host.meerkat().arg("--dry-run").assert().code(1);

    assert!(!host.config_path().exists());
    assert!(!host.snapshot_path().exists());
    Ok(())
}

#[test]
fn config_path_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let host = Host::new("1.0");
    host.write_config("");

    let mut cmd = Command::new(cargo_bin("meerkat"));
    cmd.env("PATH", host.temp.path().join("bin"))
        .env("MEERKAT_CONFIG", host.config_path())
        .arg("--dry-run");

    // Config found, so the missing version file is reported.
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("No version file found"));
    Ok(())
}
