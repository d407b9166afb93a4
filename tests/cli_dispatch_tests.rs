mod common;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use common::{fixture_dir, skills, BROKEN, MARCH};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_trailblaze")
}

fn run(args: &[&str]) -> Output {
    Command::new(bin())
        .args(args)
        .env_remove("TRAILBLAZE_DATA_DIR")
        .env_remove("TRAILBLAZE_LANG")
        .env_remove("TRAILBLAZE_FALLBACK_LANG")
        .env_remove("TRAILBLAZE_WORKERS")
        .env_remove("RUST_LOG")
        .output()
        .expect("trailblaze should run")
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn missing_command_prints_usage() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: trailblaze"));
}

#[test]
fn list_command_prints_ids_and_names() {
    let dir = fixture_dir();
    let output = run(&["list", "--data-dir", &path_arg(dir.path())]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["1001\tMarch 7th", "1002\tBroken Bot"]);
}

#[test]
fn extract_command_emits_character_json_by_name() {
    let dir = fixture_dir();
    let output = run(&[
        "extract",
        "march 7th",
        "--data-dir",
        &path_arg(dir.path()),
        "--level",
        "80",
        "--ascension",
        "6",
        "--eidolon",
        "6",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("extract should emit json");
    assert_eq!(payload["id"], MARCH);
    assert_eq!(payload["level_cap"], 80);
    assert_eq!(payload["eidolons"].as_array().map(Vec::len), Some(6));
    assert_eq!(payload["eidolons"][0]["description"], "Increases DMG by 50% for 2 turn(s)");
}

#[test]
fn extract_command_reports_unknown_character() {
    let dir = fixture_dir();
    let output = run(&["extract", "Kafka", "--data-dir", &path_arg(dir.path())]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown character 'Kafka'"));
}

#[test]
fn extract_command_fails_on_data_integrity_error() {
    let dir = fixture_dir();
    let output = run(&["extract", &BROKEN.to_string(), "--data-dir", &path_arg(dir.path())]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("data integrity"));
}

#[test]
fn extract_command_rejects_bad_flag_values() {
    let output = run(&["extract", "1001", "--level", "max"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid level 'max'"));
}

#[test]
fn export_command_writes_files_and_manifest() {
    let dir = fixture_dir();
    let out = tempfile::tempdir().unwrap();
    let output = run(&[
        "export",
        &path_arg(out.path()),
        "--data-dir",
        &path_arg(dir.path()),
        "--lang",
        "jp",
    ]);

    // One of the two fixture characters is broken, so the export is partial.
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("exported=1, failed=1"));

    let exported: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("1001.json")).unwrap()).unwrap();
    assert_eq!(exported["name"], "三月なのか");
    assert!(!out.path().join("1002.json").exists());

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("manifest.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["data_version"], "2.3.51");
    assert_eq!(manifest["language"], "jp");
    assert!(manifest["generated_at"].is_string());
    assert_eq!(manifest["characters"][0]["id"], MARCH);
    assert_eq!(manifest["characters"][0]["status"], "ok");
    assert_eq!(manifest["characters"][1]["id"], BROKEN);
    assert_eq!(manifest["characters"][1]["status"], "failed");
}

#[test]
fn validate_command_flags_skill_without_first_level() {
    let dir = fixture_dir();
    let output = run(&["validate", &path_arg(dir.path())]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[error] skill[100201].levels: no row for level 1 (sub-level 0)"));
    assert!(stderr.contains("validation failed: 1 error(s)"));
}

#[test]
fn validate_command_passes_with_warnings_once_errors_are_gone() {
    let dir = fixture_dir();
    let mut skills = skills();
    skills
        .as_array_mut()
        .unwrap()
        .retain(|skill| skill["id"] != 100201);
    fs::write(
        dir.path().join("skills.json"),
        serde_json::to_string(&skills).unwrap(),
    )
    .unwrap();

    let output = run(&["validate", &path_arg(dir.path())]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("validation passed"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("[warning]"));
}

#[test]
fn validate_command_returns_non_zero_on_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("characters.json"),
        r#"[{"id": 1001, "name": 10, "promotions": []}]"#,
    )
    .unwrap();

    let output = run(&["validate", &path_arg(dir.path())]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed"));
    assert!(stderr.contains("missing ascension 0 row"));
}

#[test]
fn validate_command_fails_without_tables() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(&["validate", &path_arg(dir.path())]);
    assert_eq!(output.status.code(), Some(1));
}
