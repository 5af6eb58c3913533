//! Integration tests for harmonograph CLI commands.
//!
//! These tests run the actual binary and verify end-to-end behavior.

use std::path::PathBuf;
use std::process::Command;

/// Get the path to the harmonograph binary from the workspace root.
fn binary_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // Go up from harmonograph-cli to crates
    path.pop(); // Go up from crates to the workspace root

    // Try release first, then debug
    let release = path.join("target/release/harmonograph");
    if release.exists() {
        return release;
    }
    path.join("target/debug/harmonograph")
}

/// Some environments run tests without building the binary first.
fn binary_or_skip() -> Option<PathBuf> {
    let path = binary_path();
    if path.exists() {
        Some(path)
    } else {
        eprintln!("Skipping test - binary not found at {:?}", path);
        None
    }
}

#[test]
fn trace_command_produces_svg() {
    let Some(bin) = binary_or_skip() else { return };

    let output = Command::new(bin)
        .args(["trace", "-x", "1,3,1.5708,0", "-y", "1,2,0,0", "-t", "2"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "trace should exit zero");
    let stdout = String::from_utf8_lossy(&output.stdout);

    // Output should be valid SVG
    assert!(stdout.contains("<?xml"), "Should have XML declaration");
    assert!(stdout.contains("<svg"), "Should have SVG element");
    assert!(stdout.contains("<polyline"), "Should have polyline elements");
    assert!(stdout.contains("</svg>"), "Should close SVG element");
}

#[test]
fn trace_command_produces_json() {
    let Some(bin) = binary_or_skip() else { return };

    let output = Command::new(bin)
        .args([
            "trace", "-x", "1,3,1.5708,0", "-y", "1,2,0,0", "-t", "2", "-f", "json",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "trace should exit zero");
    let stdout = String::from_utf8_lossy(&output.stdout);

    // Output should be valid JSON with the trace fields
    assert!(stdout.contains("\"points\""), "Should have points key");
    assert!(stdout.contains("\"x\""), "Should have x coordinate");
    assert!(stdout.contains("\"y\""), "Should have y coordinate");
    assert!(stdout.contains("\"speed\""), "Should record the speed");
    assert!(stdout.contains("\"capped_frames\""), "Should record capped frames");
}

#[test]
fn trace_seeded_random_is_reproducible() {
    let Some(bin) = binary_or_skip() else { return };

    let run = || {
        let output = Command::new(&bin)
            .args(["trace", "--random", "42", "-t", "1", "-f", "json"])
            .output()
            .expect("Failed to execute command");
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout).into_owned()
    };

    assert_eq!(run(), run(), "Same seed should produce identical traces");
}

#[test]
fn trace_rejects_bad_term_spec() {
    let Some(bin) = binary_or_skip() else { return };

    let output = Command::new(bin)
        .args(["trace", "-x", "1,2,3", "-y", "1,2,0,0"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Malformed spec should exit nonzero");
}

#[test]
fn trace_rejects_non_power_of_two_speed() {
    let Some(bin) = binary_or_skip() else { return };

    let output = Command::new(bin)
        .args(["trace", "--speed", "3", "-t", "1"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Speed 3 should exit nonzero");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("power of two"), "Should explain the constraint");
}

#[test]
fn benchmark_command_runs() {
    let Some(bin) = binary_or_skip() else { return };

    let output = Command::new(bin)
        .args(["benchmark", "-n", "500"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let combined = format!("{}{}", stdout, stderr);

    assert!(combined.contains("BENCHMARK"), "Should show benchmark header");
    assert!(combined.contains("Points emitted"), "Should show point count");
    assert!(combined.contains("Time"), "Should show timing info");
}

#[test]
fn presets_round_trip_through_a_book() {
    let Some(bin) = binary_or_skip() else { return };

    let dir = std::env::temp_dir().join("harmonograph-cli-test");
    std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
    let book = dir.join("book.yaml");
    let book = book.to_str().unwrap();
    std::fs::remove_file(book).ok();

    // Save
    let output = Command::new(&bin)
        .args([
            "presets", "save", "circle", "-x", "1,4,1.5708,0", "-y", "1,4,0,0", "-b", book,
        ])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "save should exit zero");

    // List shows it
    let output = Command::new(&bin)
        .args(["presets", "list", "-b", book])
        .output()
        .expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("circle"), "Saved preset should be listed");
    assert!(stdout.contains("[1]"), "First preset gets id 1");

    // Delete it
    let output = Command::new(&bin)
        .args(["presets", "delete", "1", "-b", book])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "delete should exit zero");

    // Gone
    let output = Command::new(&bin)
        .args(["presets", "show", "1", "-b", book])
        .output()
        .expect("Failed to execute command");
    assert!(!output.status.success(), "show of a deleted id should fail");

    std::fs::remove_file(book).ok();
}

#[test]
fn help_command_shows_usage() {
    let Some(bin) = binary_or_skip() else { return };

    let output = Command::new(bin)
        .arg("help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let combined = format!("{}{}", stdout, stderr);

    assert!(combined.contains("trace"), "Should mention trace command");
    assert!(combined.contains("benchmark"), "Should mention benchmark command");
    assert!(combined.contains("presets"), "Should mention presets command");
}

#[test]
fn unknown_command_exits_nonzero() {
    let Some(bin) = binary_or_skip() else { return };

    let output = Command::new(bin)
        .arg("frobnicate")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown command"));
}
