//! Integration tests for the mapfence binary.
//!
//! Every test points the CLI at a config file inside a temporary directory
//! so nothing touches `~/.mapfence`. None of them need network access.
//!
//! Run with: `cargo test -p mapfence-cli --test cli_workflow`

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

/// Writes a config that logs into `dir` and returns its path.
fn write_config(dir: &Path, extra: &str) -> PathBuf {
    let path = dir.join("config.ini");
    let content = format!(
        "[logging]\nfile = {}\n\n{}",
        dir.join("mapfence.log").display(),
        extra
    );
    fs::write(&path, content).unwrap();
    path
}

fn run_cli(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mapfence"))
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("Failed to execute CLI command")
}

fn assert_success(output: &Output, context: &str) {
    if !output.status.success() {
        panic!(
            "{} failed:\nstdout: {}\nstderr: {}",
            context,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// Config commands
// ============================================================================

#[test]
fn test_config_init_then_show() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.ini");

    let output = run_cli(&path, &["config", "init"]);
    assert_success(&output, "config init");
    assert!(stdout(&output).contains("Created"));
    assert!(path.exists());

    // Second init leaves the file alone
    let output = run_cli(&path, &["config", "init"]);
    assert_success(&output, "config init again");
    assert!(stdout(&output).contains("already exists"));

    let output = run_cli(&path, &["config", "show"]);
    assert_success(&output, "config show");
    let shown = stdout(&output);
    assert!(shown.contains("[geofence]"));
    assert!(shown.contains("radius = 400"));
}

#[test]
fn test_config_path_echoes_override() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.ini");

    let output = run_cli(&path, &["config", "path"]);
    assert_success(&output, "config path");
    assert_eq!(stdout(&output).trim(), path.display().to_string());
}

#[test]
fn test_invalid_config_value_fails_with_hint() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "[geofence]\nradius = -3\n");

    let output = run_cli(&config, &["tile", "--lat", "28.6139", "--lon", "77.2090"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("geofence.radius"));
    assert!(stderr.contains("fall back to its default"));
}

// ============================================================================
// One-shot commands
// ============================================================================

#[test]
fn test_tile_for_default_center() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");

    let output = run_cli(&config, &["tile", "--lat", "28.6139", "--lon", "77.2090"]);
    assert_success(&output, "tile");

    let text = stdout(&output);
    assert!(text.contains("x=5852, y=3415, zoom=13"));
    assert!(text.contains("https://a.tile.openstreetmap.org/13/5852/3415.png"));
    assert!(temp.path().join("mapfence.log").exists());
}

#[test]
fn test_tile_rejects_bad_latitude() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");

    let output = run_cli(&config, &["tile", "--lat", "91", "--lon", "0"]);
    assert_eq!(output.status.code(), Some(1));
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn test_replay_session_announces_fence_entry() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "[tracking]\nreplay_interval_ms = 20\n");

    // About 1 km north of the fence center, then about 100 m north
    let track = temp.path().join("walk.txt");
    fs::write(&track, "28.6229,77.2090\n28.6148,77.2090\n").unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_mapfence"))
        .arg("--config")
        .arg(&config)
        .arg("session")
        .arg("--replay")
        .arg(&track)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start session");

    let stdout = child.stdout.take().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in BufReader::new(stdout).lines().map_while(Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut stdin = child.stdin.take().unwrap();
    writeln!(stdin, "fence-at 28.6139,77.2090 400").unwrap();
    writeln!(stdin, "start").unwrap();

    let mut seen = Vec::new();
    while !seen.iter().any(|l: &String| l == "Entered geofence") {
        match rx.recv_timeout(Duration::from_secs(10)) {
            Ok(line) => seen.push(line),
            Err(_) => panic!("no fence entry announced, saw: {:#?}", seen),
        }
    }
    assert!(seen.iter().any(|l| l == "Tracking started"));

    writeln!(stdin, "quit").unwrap();
    drop(stdin);
    let status = child.wait().unwrap();
    assert!(status.success());
}
