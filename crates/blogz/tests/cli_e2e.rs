#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn blogz_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("blogz"));
    cmd.current_dir(temp.path())
        .env("NO_COLOR", "1")
        .env("BLOGZ_CONNECTION", "path=site;items=blogsitems")
        .env("BLOGZ_EXTENSION", "json")
        .env_remove("RUST_LOG")
        .arg("--root")
        .arg(temp.path());
    cmd
}

fn created_id(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    let line = text
        .lines()
        .find(|l| l.starts_with("Entry created:"))
        .expect("create output");
    line.split_whitespace().nth(2).expect("id").to_string()
}

#[test]
fn test_create_list_delete_workflow() {
    let temp = TempDir::new().unwrap();

    // 1. Init lays out the store
    blogz_cmd(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));
    assert!(temp.path().join("site").join("index.json").exists());

    // 2. Create an entry
    let output = blogz_cmd(&temp)
        .args(["create", "Hello World", "-a", "ann", "-t", "rust"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = created_id(&output.stdout);
    assert_eq!(id.len(), 11);
    assert!(temp
        .path()
        .join("site")
        .join("blogsitems")
        .join(format!("{}.json", id))
        .exists());

    // 3. It is listed
    blogz_cmd(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World"))
        .stdout(predicate::str::contains(id.as_str()));

    // 4. Tag filter excludes it when the tag does not match
    blogz_cmd(&temp)
        .args(["list", "-t", "cooking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found."));

    // 5. Publish then show
    blogz_cmd(&temp)
        .args(["publish", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry published"));
    blogz_cmd(&temp)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("State:   published"));

    // 6. Delete hides it from the default listing
    blogz_cmd(&temp)
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry deleted"));
    blogz_cmd(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found."));

    // 7. But not from the full listing
    blogz_cmd(&temp)
        .args(["list", "--deleted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World"))
        .stdout(predicate::str::contains("deleted"));
}

#[test]
fn test_show_rejects_malformed_id() {
    let temp = TempDir::new().unwrap();
    blogz_cmd(&temp).arg("init").assert().success();

    blogz_cmd(&temp).args(["show", "nope"]).assert().failure();
}

#[test]
fn test_show_unknown_id_fails() {
    let temp = TempDir::new().unwrap();
    blogz_cmd(&temp).arg("init").assert().success();

    let output = blogz_cmd(&temp).args(["encode", "42"]).output().unwrap();
    let id = String::from_utf8_lossy(&output.stdout).trim().to_string();

    blogz_cmd(&temp).args(["show", &id]).assert().failure();
}

#[test]
fn test_encode_decode() {
    let temp = TempDir::new().unwrap();

    let output = blogz_cmd(&temp).args(["encode", "7"]).output().unwrap();
    assert!(output.status.success());
    let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
    assert_eq!(id.len(), 11);

    blogz_cmd(&temp)
        .args(["decode", &id])
        .assert()
        .success()
        .stdout(predicate::str::diff("7\n"));

    // Encoding does not touch the store
    assert!(!temp.path().join("site").exists());
}

#[test]
fn test_encode_ignores_store_configuration() {
    let temp = TempDir::new().unwrap();

    blogz_cmd(&temp)
        .env("BLOGZ_CONNECTION", "items=only")
        .args(["encode", "5"])
        .assert()
        .success();

    // The same connection string breaks commands that open the store.
    blogz_cmd(&temp)
        .env("BLOGZ_CONNECTION", "items=only")
        .arg("list")
        .assert()
        .failure();
}
