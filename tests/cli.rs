//! End-to-end tests driving the `stoic-journal` binary.
//!
//! Every test runs offline against a database and home directory inside a
//! temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempdir().expect("Failed to create temp directory"),
        }
    }

    fn db_path(&self) -> PathBuf {
        self.dir.path().join("data").join("journal.sqlite3")
    }

    fn home(&self) -> &Path {
        self.dir.path()
    }

    /// The binary with an isolated home, the sandbox database and no network.
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("stoic-journal").unwrap();
        cmd.env("HOME", self.home());
        cmd.env_remove("STOIC_JOURNAL_DB");
        cmd.env_remove("STOIC_JOURNAL_OFFLINE");
        cmd.env_remove("RUST_LOG");
        cmd.env("NO_COLOR", "1");
        cmd.arg("--offline").arg("--db-path").arg(self.db_path());
        cmd
    }

    fn write(&self, date: &str, force: bool, stdin: &str) -> assert_cmd::assert::Assert {
        let mut cmd = self.cmd();
        cmd.args(["write", "--date", date]);
        if force {
            cmd.arg("--force");
        }
        cmd.write_stdin(stdin).assert()
    }

    fn list_json(&self) -> serde_json::Value {
        let output = self
            .cmd()
            .args(["list", "--format", "json", "--limit", "20"])
            .output()
            .expect("Failed to run list");
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).expect("list should print JSON")
    }
}

#[test]
fn test_write_saves_entry() {
    let sandbox = Sandbox::new();

    sandbox
        .write("2025-11-05", false, "A quiet morning.\n\n")
        .success()
        .stdout(predicate::str::contains("Today's Stoic quote:"))
        .stdout(predicate::str::contains("Entry saved for 2025-11-05."));

    assert!(sandbox.db_path().exists(), "Database should be created");

    let entries = sandbox.list_json();
    assert_eq!(entries[0]["entry_date"], "2025-11-05");
    assert_eq!(entries[0]["response"], "A quiet morning.");
}

#[test]
fn test_write_duplicate_exits_1() {
    let sandbox = Sandbox::new();
    sandbox.write("2025-11-05", false, "First.\n\n").success();

    sandbox
        .write("2025-11-05", false, "Second.\n\n")
        .code(1)
        .stdout(predicate::str::contains(
            "An entry already exists for 2025-11-05. Use --force to overwrite.",
        ));

    let entries = sandbox.list_json();
    assert_eq!(entries[0]["response"], "First.");
}

#[test]
fn test_write_empty_response_exits_2() {
    let sandbox = Sandbox::new();

    sandbox
        .write("2025-11-05", false, "\n")
        .code(2)
        .stdout(predicate::str::contains("No response captured. Entry skipped."));

    assert_eq!(sandbox.list_json().as_array().map(Vec::len), Some(0));
}

#[test]
fn test_write_force_overwrites() {
    let sandbox = Sandbox::new();
    sandbox.write("2025-11-05", false, "First.\n\n").success();

    sandbox.write("2025-11-05", true, "Rewritten.\n\n").success();

    let entries = sandbox.list_json();
    assert_eq!(entries.as_array().map(Vec::len), Some(1));
    assert_eq!(entries[0]["response"], "Rewritten.");
}

#[test]
fn test_no_command_writes_today() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .write_stdin("Default command note.\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry saved for"));

    let entries = sandbox.list_json();
    assert_eq!(entries[0]["response"], "Default command note.");
}

#[test]
fn test_list_text_output() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No journal entries found yet."));

    sandbox.write("2025-11-04", false, "First note\n\n").success();
    sandbox.write("2025-11-05", false, "Second note\n\n").success();

    let output = sandbox
        .cmd()
        .args(["list", "--limit", "1"])
        .output()
        .expect("Failed to run list");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("2025-11-05:"));
    assert!(stdout.contains("Reflection: Second note"));
    assert!(!stdout.contains("2025-11-04:"), "Limit should drop older entries");
}

#[test]
fn test_show_entry() {
    let sandbox = Sandbox::new();
    sandbox.write("2025-11-04", false, "Shown note\n\n").success();

    sandbox
        .cmd()
        .args(["show", "--date", "2025-11-04"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shown note"));

    sandbox
        .cmd()
        .args(["show", "--date", "2025-11-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entry for 2025-11-03."));
}

#[test]
fn test_invalid_date_is_rejected() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["write", "--date", "11/05/2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_db_path_from_environment() {
    let sandbox = Sandbox::new();
    let env_db = sandbox.home().join("env").join("journal.sqlite3");

    let mut cmd = Command::cargo_bin("stoic-journal").unwrap();
    cmd.env("HOME", sandbox.home())
        .env("STOIC_JOURNAL_DB", &env_db)
        .env("STOIC_JOURNAL_OFFLINE", "1")
        .args(["write", "--date", "2025-11-05"])
        .write_stdin("From env.\n\n")
        .assert()
        .success();

    assert!(env_db.exists(), "Database should live at STOIC_JOURNAL_DB");
}

#[test]
fn test_config_init_and_show() {
    let sandbox = Sandbox::new();

    sandbox.cmd().args(["config", "init"]).assert().success();
    assert!(sandbox.home().join(".stoic_journal").join("config.yaml").exists());

    sandbox
        .cmd()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    sandbox
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offline (built-in list)"));
}

#[test]
fn test_config_init_force_replaces_broken_file() {
    let sandbox = Sandbox::new();
    let config_dir = sandbox.home().join(".stoic_journal");
    let config_file = config_dir.join("config.yaml");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(&config_file, "quote_timeout_secs: [not, a, number\n").unwrap();

    sandbox
        .cmd()
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.yaml"));

    sandbox
        .cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));

    sandbox
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["config", "init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let contents = std::fs::read_to_string(&config_file).unwrap();
    assert!(!contents.contains("[not, a, number"));

    sandbox
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offline (built-in list)"));
}

#[test]
fn test_config_prompt_is_used() {
    let sandbox = Sandbox::new();
    let config_dir = sandbox.home().join(".stoic_journal");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.yaml"), "prompt: What did you endure today?\n").unwrap();

    sandbox
        .write("2025-11-05", false, "Traffic.\n\n")
        .success()
        .stdout(predicate::str::contains("What did you endure today?"));

    let entries = sandbox.list_json();
    assert_eq!(entries[0]["prompt"], "What did you endure today?");
}
