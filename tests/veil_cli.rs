//! Snapshot tests for the `veil` command-line tool.

use std::io::Write;
use std::process::{Command, Output, Stdio};

/// Run `veil` with `args`, feeding `stdin` to it.
fn veil(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_veil"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute veil");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for veil")
}

/// Run `veil` expecting success and return trimmed stdout.
fn veil_ok(args: &[&str], stdin: &str) -> String {
    let output = veil(args, stdin);
    assert!(
        output.status.success(),
        "veil failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn inspect_prints_segments() {
    let out = veil_ok(&["inspect"], "ab{{cd}}ef");
    insta::assert_snapshot!(out, @r#"[[{"text":"ab","hidden":false},{"text":"cd","hidden":true},{"text":"ef","hidden":false}]]"#);
}

#[test]
fn inspect_keeps_empty_lines() {
    let out = veil_ok(&["inspect", "-"], "see {{note\n");
    insta::assert_snapshot!(out, @r#"[[{"text":"see","hidden":false},{"text":" ","hidden":false},{"text":"note","hidden":true}],[{"text":"","hidden":false}]]"#);
}

#[test]
fn strip_removes_markers() {
    let out = veil_ok(&["strip"], "The {{capital}} of {{France");
    insta::assert_snapshot!(out, @"The capital of France");
}

#[test]
fn stats_counts_segments() {
    let out = veil_ok(&["stats"], "a {{b}}\nc d");
    insta::assert_snapshot!(out, @r"
    lines: 2
    segments: 6
    hidden: 1
    ");
}

#[test]
fn hide_expands_to_whole_words() {
    let out = veil_ok(&["hide", "0", "4", "7"], "The capital of France");
    insta::assert_snapshot!(out, @"The {{capital}} of France");

    let out = veil_ok(&["hide", "1", "8", "0"], "first\n광합성의 원리, 2024");
    insta::assert_snapshot!(out, @r"
    first
    {{광합성의}} {{원리}}, 2024
    ");
}

#[test]
fn hide_rejects_missing_line() {
    let output = veil(&["hide", "3", "0", "1"], "only one line");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("out of range"));
}

#[test]
fn usage_errors_exit_with_two() {
    let output = veil(&["hide", "0", "zero", "1"], "");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid <START>"));

    let output = veil(&["export"], "");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn help_lists_commands() {
    let out = veil_ok(&["--help"], "");
    for command in ["inspect", "strip", "stats", "hide", "list", "export", "import"] {
        assert!(out.contains(command), "help is missing {command}");
    }
}

#[test]
fn store_import_list_export() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();
    let backup = r#"[
        {"id": "f1", "name": "Notes", "content": "x {{y}}",
         "createdAt": "2026-01-01T00:00:00.000Z", "updatedAt": "2026-01-01T00:00:00.000Z"},
        {"id": "", "name": "Broken", "content": "skipped"}
    ]"#;

    let out = veil_ok(&["--store", root, "--session", "s1", "import"], backup);
    insta::assert_snapshot!(out, @"imported 1 file(s) into documents/s1/files");

    let out = veil_ok(&["--store", root, "--session", "s1", "list"], "");
    let columns: Vec<&str> = out.split('\t').collect();
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[0], "f1");
    assert_eq!(columns[2], "Notes");

    let out = veil_ok(&["--store", root, "--session", "s1", "export"], "");
    let files: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(files[0]["content"], "x {{y}}");
    assert!(files[0].get("isAiGenerated").is_none());

    // Another user's namespace is empty.
    let out = veil_ok(&["--store", root, "--user", "u1", "list"], "");
    assert_eq!(out, "");
}

#[test]
fn export_writes_dated_backup_into_directory() {
    let store = tempfile::tempdir().unwrap();
    let backups = tempfile::tempdir().unwrap();
    let root = store.path().to_str().unwrap();
    let backup = r#"[{"id": "f1", "name": "Notes", "content": "x {{y}}"}]"#;
    veil_ok(&["--store", root, "--session", "s1", "import"], backup);

    let out = veil_ok(
        &["--store", root, "--session", "s1", "export", backups.path().to_str().unwrap()],
        "",
    );
    let path = std::path::PathBuf::from(&out);
    assert_eq!(path.parent(), Some(backups.path()));
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("veil-backup-"), "unexpected name {name}");
    assert!(name.ends_with(".json"), "unexpected name {name}");

    let files: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(files[0]["id"], "f1");
}
