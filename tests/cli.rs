//! End-to-end tests for the `checker` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn checker(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("checker").unwrap();
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

fn build_reference(dir: &TempDir) {
    let corpus = dir.path().join("corpus.txt");
    std::fs::write(&corpus, "Hello, world! Hello ICOG.").unwrap();

    checker(dir.path())
        .args(["build-reference", "-k", "2"])
        .arg(&corpus)
        .assert()
        .success()
        .stdout(predicate::str::contains("Vocab size    : 3"))
        .stdout(predicate::str::contains("Unique hashes : 3"));

    checker(dir.path())
        .arg("build-trie")
        .arg(&corpus)
        .assert()
        .success()
        .stdout(predicate::str::contains("Trie built with 3 words"));
}

#[test]
fn test_build_then_scan() {
    let dir = TempDir::new().unwrap();
    build_reference(&dir);

    checker(dir.path())
        .args(["scan", "-k", "2", "--text", "hello world icog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total n-grams   : 2"))
        .stdout(predicate::str::contains("Matched n-grams : 1"))
        .stdout(predicate::str::contains("50.00%"));
}

#[test]
fn test_scan_json_output() {
    let dir = TempDir::new().unwrap();
    build_reference(&dir);

    let output = checker(dir.path())
        .args(["scan", "-k", "2", "--json", "--text", "hello world icog"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["ngrams_total"], 2);
    assert_eq!(value["ngrams_matched"], 1);
    assert_eq!(value["score_percent"], 50.0);
    assert_eq!(value["window"], 2);
    assert_eq!(value["matches"][0]["start"], 0);
}

#[test]
fn test_scan_with_synonym_table() {
    let dir = TempDir::new().unwrap();
    build_reference(&dir);
    let table = dir.path().join("synonyms.json");
    std::fs::write(&table, r#"{"globe": "world"}"#).unwrap();

    checker(dir.path())
        .args(["scan", "-k", "2", "--synonyms", "--text", "hello globe"])
        .arg("--synonym-table")
        .arg(&table)
        .assert()
        .success()
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn test_suggest() {
    let dir = TempDir::new().unwrap();
    build_reference(&dir);

    checker(dir.path())
        .args(["suggest", "he"])
        .assert()
        .success()
        .stdout("hello\n");
}

#[test]
fn test_scan_without_reference_fails() {
    let dir = TempDir::new().unwrap();

    checker(dir.path())
        .args(["scan", "--text", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_scan_requires_input() {
    let dir = TempDir::new().unwrap();
    build_reference(&dir);

    checker(dir.path())
        .arg("scan")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--text or --file"));
}
