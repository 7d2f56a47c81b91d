//! Smoke tests for the clapboard CLI
//!
//! Only paths that never reach ffmpeg are exercised here, so the suite runs
//! on machines without it installed.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Get a command for the clapboard binary
fn clapboard() -> Command {
    Command::cargo_bin("clapboard").expect("clapboard binary should exist")
}

fn write_manifest(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("session.json");
    fs::write(&path, json).unwrap();
    path
}

const TWO_SEGMENTS: &str = r#"{
    "segments": [
        {"path": "tts/n1.mp3", "start_time_ms": 0, "duration_ms": 2000, "category": "narration"},
        {"path": "sounds/click.mp3", "start_time_ms": 2500, "duration_ms": 100, "category": "click"}
    ]
}"#;

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    clapboard()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.0"));
}

#[test]
fn test_help_flag() {
    clapboard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("finish"))
        .stdout(predicate::str::contains("plan"));
}

#[test]
fn test_no_args_shows_help() {
    clapboard().assert().failure();
}

#[test]
fn test_unknown_subcommand() {
    clapboard().arg("render").assert().failure();
}

// ============================================================================
// plan
// ============================================================================

#[test]
fn test_plan_prints_mixdown_command() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(dir.path(), TWO_SEGMENTS);

    clapboard()
        .args(["plan", "--manifest"])
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ffmpeg -y -i"))
        .stdout(predicate::str::contains("adelay=2500|2500,volume=0.5"))
        .stdout(predicate::str::contains("amix=inputs=2:normalize=0[out]"));

    assert!(!dir.path().join("combined-audio.wav").exists());
}

#[test]
fn test_plan_applies_offset() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(dir.path(), TWO_SEGMENTS);

    clapboard()
        .args(["plan", "--offset-ms", "100", "-m"])
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("adelay=2400|2400"));
}

#[test]
fn test_plan_verbose_lists_tracks() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(dir.path(), TWO_SEGMENTS);

    clapboard()
        .args(["-v", "plan", "-m"])
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mixdown: 2 tracks"));
}

#[test]
fn test_plan_uses_configured_ffmpeg() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(dir.path(), TWO_SEGMENTS);
    let config = dir.path().join("clapboard.yaml");
    fs::write(&config, "ffmpeg: /opt/media/ffmpeg\n").unwrap();

    clapboard()
        .arg("--config")
        .arg(&config)
        .args(["plan", "-m"])
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/opt/media/ffmpeg -y"));
}

// ============================================================================
// Error paths
// ============================================================================

#[test]
fn test_missing_manifest() {
    clapboard()
        .args(["plan", "-m", "/definitely/not/here.json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Manifest not found"));
}

#[test]
fn test_unknown_category_in_manifest() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"{"segments":[{"path":"a.mp3","start_time_ms":0,"duration_ms":10,"category":"whoosh"}]}"#,
    );

    clapboard()
        .args(["plan", "-m"])
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown sound category: whoosh"));
}

#[test]
fn test_compose_empty_manifest() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(dir.path(), "{}");

    clapboard()
        .args(["compose", "-m"])
        .arg(&manifest)
        .arg("-o")
        .arg(dir.path().join("mix.wav"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No audio segments provided"));
}

#[test]
fn test_finish_without_recording_or_audio() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(dir.path(), "{}");

    clapboard()
        .args(["finish", "-m"])
        .arg(&manifest)
        .arg("-o")
        .arg(dir.path().join("final.mp4"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to finalize"));

    assert!(dir.path().join(".clapboard-work").is_dir());
}

#[test]
fn test_detect_missing_video() {
    clapboard()
        .args(["detect", "/definitely/not/here.webm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Video file not found"));
}

#[test]
fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    let manifest = write_manifest(dir.path(), TWO_SEGMENTS);
    let config = dir.path().join("clapboard.yaml");
    fs::write(&config, "scan_frames: 0\n").unwrap();

    clapboard()
        .arg("--config")
        .arg(&config)
        .args(["plan", "-m"])
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("scan_frames"));
}
