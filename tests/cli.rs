use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("plotkit").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("plotkit"));
}

#[test]
fn series_prints_draw_instructions() {
    let mut cmd = Command::cargo_bin("plotkit").unwrap();
    cmd.args([
        "series", "--values", "1,2,3", "--labels", "a;b;c", "--kind", "lines",
    ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
    let ops = json.as_array().expect("array of commands");
    assert!(ops.iter().any(|c| c["op"] == "stroke"));
    assert!(ops.iter().any(|c| c["op"] == "text" && c["text"] == "b"));
}

#[test]
fn demo_writes_svg() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mixed.svg");
    let mut cmd = Command::cargo_bin("plotkit").unwrap();
    cmd.args(["demo", "mixed", "--out"]).arg(&path);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Wrote chart"));
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn demo_json_file_by_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sparkline.json");
    let mut cmd = Command::cargo_bin("plotkit").unwrap();
    cmd.args(["demo", "sparkline", "--out"]).arg(&path);
    cmd.assert().success();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(1));
}

#[test]
fn bad_values_are_rejected() {
    let mut cmd = Command::cargo_bin("plotkit").unwrap();
    cmd.args(["series", "--values", "1,x,3"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn mismatched_labels_are_rejected() {
    let mut cmd = Command::cargo_bin("plotkit").unwrap();
    cmd.args(["series", "--values", "1,2", "--labels", "a"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--labels has 1 entries"));
}

#[test]
fn unreadable_font_data_is_reported() {
    let dir = tempdir().unwrap();
    let font = dir.path().join("not-a-font.ttf");
    std::fs::write(&font, b"definitely not truetype").unwrap();
    let mut cmd = Command::cargo_bin("plotkit").unwrap();
    cmd.args(["demo", "bars", "--out"])
        .arg(dir.path().join("bars.png"))
        .arg("--font")
        .arg(&font);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid font"));
}

#[test]
fn png_with_text_asks_for_a_font() {
    let dir = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("plotkit").unwrap();
    cmd.args(["demo", "bars", "--out"]).arg(dir.path().join("bars.png"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("font error"))
        .stderr(predicate::str::contains("--font"));
}
