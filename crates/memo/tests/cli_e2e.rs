#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

struct Env {
    temp: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("memo"));
        cmd.env("XDG_CONFIG_HOME", self.temp.path().join("config"))
            .env_remove("MEMO_LOG")
            .arg("--data-dir")
            .arg(self.temp.path().join("data"));
        cmd
    }

    fn json(&self, args: &[&str]) -> Value {
        let output = self.cmd().args(args).arg("--json").output().unwrap();
        assert!(output.status.success(), "memo {:?} failed", args);
        serde_json::from_slice(&output.stdout).unwrap()
    }

    fn data_file(&self) -> std::path::PathBuf {
        self.temp.path().join("data").join("memo_data.json")
    }
}

#[test]
fn test_init_creates_data_file() {
    let env = Env::new();
    env.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Memo data ready"));

    assert!(env.data_file().exists());

    let folders = env.json(&["folders"]);
    assert_eq!(folders[0]["name"], "General");
    assert_eq!(folders[0]["memoCount"], 0);
    assert_eq!(folders[0]["current"], true);
}

#[test]
fn test_new_then_edit_open_memo() {
    let env = Env::new();
    let memo = env.json(&["new"]);
    assert_eq!(memo["title"], "Untitled");
    let id = memo["id"].as_str().unwrap().to_string();

    // No id: edits the memo that `new` opened
    env.cmd()
        .args(["edit", "--title", "Groceries", "--content", "milk, eggs"])
        .assert()
        .success();

    env.cmd()
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("milk, eggs"))
        .stdout(predicate::str::contains("Characters: 10"));
}

#[test]
fn test_memo_short_handle_resolution() {
    let env = Env::new();
    // Created back to back, so the ids share their timestamp prefix
    let first = env.json(&["new", "--title", "First"]);
    let second = env.json(&["new", "--title", "Second"]);
    let first_id = first["id"].as_str().unwrap();
    let second_id = second["id"].as_str().unwrap();
    let first_handle = &first_id[first_id.len() - 8..];
    let second_handle = &second_id[second_id.len() - 8..];

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(first_handle))
        .stdout(predicate::str::contains(second_handle));

    assert_eq!(env.json(&["show", first_handle])["title"], "First");
    assert_eq!(env.json(&["show", second_handle])["title"], "Second");

    env.cmd()
        .args(["show", "not-an-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no memo matches"));
}

#[test]
fn test_search_is_case_insensitive() {
    let env = Env::new();
    env.json(&["new", "--title", "Shopping", "--content", "Buy MILK"]);
    env.json(&["new", "--title", "Work"]);

    let results = env.json(&["search", "milk"]);
    assert_eq!(results.as_array().unwrap().len(), 1);
    assert_eq!(results[0]["title"], "Shopping");

    env.cmd()
        .args(["search", "nothing", "here"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No memos match \"nothing here\""));
}

#[test]
fn test_folder_delete_cascades() {
    let env = Env::new();
    env.json(&["folder", "new", "Work"]);
    env.json(&["new", "--title", "In work"]);

    env.cmd()
        .args(["folder", "delete", "Work"])
        .assert()
        .success();

    let folders = env.json(&["folders"]);
    assert_eq!(folders.as_array().unwrap().len(), 1);
    assert_eq!(env.json(&["search", ""]).as_array().unwrap().len(), 0);
}

#[test]
fn test_last_folder_cannot_be_deleted() {
    let env = Env::new();
    env.cmd()
        .args(["folder", "delete", "General"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("last remaining folder"));

    assert_eq!(env.json(&["folders"]).as_array().unwrap().len(), 1);
}

#[test]
fn test_mv_follows_memo() {
    let env = Env::new();
    let memo = env.json(&["new", "--title", "Traveler"]);
    let id = memo["id"].as_str().unwrap();
    env.json(&["folder", "new", "Archive"]);
    env.json(&["folder", "select", "General"]);

    env.json(&["mv", id, "Archive"]);

    let listed = env.json(&["list"]);
    assert_eq!(listed[0]["id"], id);
}

#[test]
fn test_export_import_round_trip() {
    let env = Env::new();
    env.json(&["new", "--title", "Keep me"]);
    let backup = env.temp.path().join("backup.json");

    env.cmd()
        .arg("export")
        .arg(&backup)
        .assert()
        .success();

    env.cmd().arg("clear").assert().success();
    assert_eq!(env.json(&["search", ""]).as_array().unwrap().len(), 0);

    env.cmd().arg("import").arg(&backup).assert().success();
    let results = env.json(&["search", "keep"]);
    assert_eq!(results[0]["title"], "Keep me");
}

#[test]
fn test_bad_import_leaves_data_untouched() {
    let env = Env::new();
    env.json(&["new", "--title", "Precious"]);
    let before = fs::read_to_string(env.data_file()).unwrap();

    let bad = env.temp.path().join("bad.json");
    fs::write(&bad, r#"{"folders": "nope", "memos": []}"#).unwrap();

    env.cmd()
        .arg("import")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("import from"));

    assert_eq!(fs::read_to_string(env.data_file()).unwrap(), before);
}

#[test]
fn test_export_to_stdout() {
    let env = Env::new();
    env.cmd()
        .args(["export", "-"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"folders\""))
        .stdout(predicate::str::contains("\"currentFolderId\""));
}

#[test]
fn test_corrupt_data_file_starts_fresh() {
    let env = Env::new();
    fs::create_dir_all(env.data_file().parent().unwrap()).unwrap();
    fs::write(env.data_file(), "{{{ not json").unwrap();

    let folders = env.json(&["folders"]);
    assert_eq!(folders[0]["name"], "General");
}
