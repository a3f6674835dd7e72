use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn lf_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lf-cli"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_list(dir: &Path, contents: &str) -> String {
    let path = dir.join("list.txt");
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn verbose_stdout_is_only_the_list() {
    let dir = tempfile::tempdir().unwrap();
    let list = write_list(dir.path(), "ads.example.com\n.example.com\nsafe.org\n");

    let out = lf_cli(&["reconcile", "-i", &list, "-v"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), ".example.com\nsafe.org\n");
    assert!(!out.stderr.is_empty());
}

#[test]
fn quiet_stdout_is_only_the_list() {
    let dir = tempfile::tempdir().unwrap();
    let list = write_list(dir.path(), "ads.example.com\n.example.com\nsafe.org\n");

    let out = lf_cli(&["reconcile", "-i", &list]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), ".example.com\nsafe.org\n");
}

#[test]
fn check_normalizes_entry() {
    let dir = tempfile::tempdir().unwrap();
    let list = write_list(dir.path(), ".example.com\n");

    let out = lf_cli(&["check", "Example.COM.", "-i", &list]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "example.com [exact]: removed (subsumed)\n"
    );
}

#[test]
fn check_rejects_malformed_entry() {
    let dir = tempfile::tempdir().unwrap();
    let list = write_list(dir.path(), ".example.com\n");

    let out = lf_cli(&["check", "bad host", "-i", &list]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8(out.stderr).unwrap().contains("Malformed entry"));
}
