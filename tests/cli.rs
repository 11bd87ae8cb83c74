use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn inkpad(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("inkpad").unwrap();
    cmd.env_remove("INKPAD_LOG")
        .env_remove("INKPAD_HOME")
        .env("NO_COLOR", "1")
        .arg("--home")
        .arg(home);
    cmd
}

const SESSION: &str = r#"
{"type":"key","key":"t"}
{"type":"text","text":"नमस्ते"}
{"type":"key","key":"Escape"}
{"type":"key","key":"d"}
{"type":"pointer_down","client_x":10,"client_y":10}
{"type":"pointer_move","client_x":200,"client_y":60}
{"type":"pointer_up"}
{"type":"key","key":"n","alt":true}
{"type":"key","key":"r","alt":true}
{"type":"text","text":"second page"}
"#;

#[test]
fn empty_home_shows_single_page() {
    let home = tempfile::tempdir().unwrap();
    inkpad(home.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 1"));

    // Looking does not write anything.
    assert!(!home.path().join("hindiNotebookData.json").exists());
}

#[test]
fn replayed_session_is_persisted() {
    let home = tempfile::tempdir().unwrap();
    let events = home.path().join("session.jsonl");
    std::fs::write(&events, SESSION).unwrap();

    inkpad(home.path())
        .arg("replay")
        .arg(&events)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created page 2"))
        .stdout(predicate::str::contains("Page 2 of 2"));

    inkpad(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 2"))
        .stdout(predicate::str::contains("नमस्ते"))
        .stdout(predicate::str::contains("second page"));
}

#[test]
fn replay_reads_stdin() {
    let home = tempfile::tempdir().unwrap();
    inkpad(home.path())
        .arg("replay")
        .write_stdin("{\"type\":\"key\",\"key\":\"n\",\"alt\":true}\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 2 of 2"));
}

#[test]
fn replay_reports_bad_line() {
    let home = tempfile::tempdir().unwrap();
    inkpad(home.path())
        .arg("replay")
        .write_stdin("{\"type\":\"next\"}\n{\"type\":\"teleport\"}\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn export_pdf_writes_named_file() {
    let home = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    inkpad(home.path()).arg("new").assert().success();

    inkpad(home.path())
        .arg("export-pdf")
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 page(s)"));

    let doc = lopdf::Document::load(out.path().join("Hindi_Notebook.pdf")).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}

#[test]
fn export_page_uses_page_number() {
    let home = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    inkpad(home.path()).arg("new").assert().success();

    inkpad(home.path())
        .args(["export-page", "--page", "2", "--out"])
        .arg(out.path())
        .assert()
        .success();
    assert!(out.path().join("Notebook_Page_2.png").exists());
}

#[test]
fn missing_page_is_an_error() {
    let home = tempfile::tempdir().unwrap();
    inkpad(home.path())
        .args(["clear", "--page", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no page 5"));
}

#[test]
fn config_prints_defaults_and_honors_file() {
    let home = tempfile::tempdir().unwrap();
    inkpad(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("hindiNotebookData"));

    std::fs::write(
        home.path().join("config.json"),
        r#"{"storage_key":"otherBook","pdf_file_name":"book.pdf"}"#,
    )
    .unwrap();
    inkpad(home.path()).arg("new").assert().success();
    assert!(home.path().join("otherBook.json").exists());
}

#[test]
fn invalid_config_fails() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("config.json"), r#"{"canvas_width":0}"#).unwrap();
    inkpad(home.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}
