use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Stdio};

fn postref_cmd(fixture: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_postref"));
    cmd.current_dir(Path::new("tests/fixtures").join(fixture));
    cmd
}

#[test]
fn scan_reports_references_in_document_order() {
    let output = postref_cmd("basic").arg("scan").output().unwrap();
    assert!(
        output.status.success(),
        "scan failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "notes.md  path  question=10010000000000060 answer=-",
            "notes.md  path  question=10010000000000060 answer=10020000000000060",
            "notes.md  path  question=D1I2 answer=-",
            "notes.md  hash  question=- answer=10020000000000066",
            "4 references in 1 files",
        ]
    );
}

#[test]
fn scan_respects_config_excludes() {
    let output = postref_cmd("basic").arg("scan").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        !stdout.contains("noise.md"),
        "excluded file was scanned: {stdout}"
    );
}

#[test]
fn scan_json_is_parseable() {
    let output = postref_cmd("basic").args(["scan", "--json"]).output().unwrap();
    assert!(
        output.status.success(),
        "scan --json failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = report.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["file"], "notes.md");

    let references = files[0]["references"].as_array().unwrap();
    assert_eq!(references.len(), 4);
    assert_eq!(references[0]["kind"], "path");
    assert_eq!(references[0]["question_id"], "10010000000000060");
    assert_eq!(references[0]["answer_id"], serde_json::Value::Null);
    assert_eq!(references[3]["kind"], "hash");
    assert_eq!(references[3]["answer_id"], "10020000000000066");
}

#[test]
fn extract_reads_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let post = dir.path().join("post.txt");
    std::fs::write(
        &post,
        "See questions/10010000000000065/10020000000000066 and #D1I2.",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_postref"))
        .arg("extract")
        .arg(&post)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "extract failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "path  question=10010000000000065 answer=10020000000000066",
            "hash  question=D1I2 answer=-",
        ]
    );
}

#[test]
fn extract_reads_stdin_when_no_file_given() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_postref"))
        .arg("extract")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"This is question #10010000000000060")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        "hash  question=10010000000000060 answer=-"
    );
}

#[test]
fn decode_classifies_ids() {
    let valid = Command::new(env!("CARGO_BIN_EXE_postref"))
        .args(["decode", "10020000000000060"])
        .output()
        .unwrap();
    assert!(valid.status.success());
    assert_eq!(
        String::from_utf8_lossy(&valid.stdout).trim(),
        "answer 10020000000000060"
    );

    let short = Command::new(env!("CARGO_BIN_EXE_postref"))
        .args(["decode", "D1I2"])
        .output()
        .unwrap();
    assert!(short.status.success());
    assert_eq!(
        String::from_utf8_lossy(&short.stdout).trim(),
        "question 10010000000000017"
    );

    let invalid = Command::new(env!("CARGO_BIN_EXE_postref"))
        .args(["decode", "hello"])
        .output()
        .unwrap();
    assert!(!invalid.status.success());
    assert_eq!(String::from_utf8_lossy(&invalid.stdout).trim(), "invalid");
}
