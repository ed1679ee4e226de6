//! CLI integration tests

use std::process::Command;

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "dashboard-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("ML training service"),
        "Should show app description"
    );
    assert!(stdout.contains("train"), "Should show train command");
    assert!(stdout.contains("watch"), "Should show watch command");
    assert!(
        stdout.contains("performance"),
        "Should show performance command"
    );
    assert!(
        stdout.contains("predictions"),
        "Should show predictions command"
    );
    assert!(stdout.contains("info"), "Should show info command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = Command::new("cargo")
        .args(["run", "-p", "dashboard-cli", "--", "--version"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("mldash"), "Should show binary name");
}

/// Test train subcommand help
#[test]
fn test_train_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "dashboard-cli", "--", "train", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Train help should succeed");
    assert!(
        stdout.contains("classification"),
        "Should list classification kind"
    );
    assert!(
        stdout.contains("regression"),
        "Should list regression kind"
    );
    assert!(stdout.contains("--no-watch"), "Should show no-watch option");
}

/// Test predictions subcommand help
#[test]
fn test_predictions_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "dashboard-cli", "--", "predictions", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Predictions help should succeed");
    assert!(stdout.contains("--count"), "Should show count option");
}

/// Test that an invalid model kind is rejected
#[test]
fn test_train_rejects_unknown_kind() {
    let output = Command::new("cargo")
        .args(["run", "-p", "dashboard-cli", "--", "train", "linear"])
        .output()
        .expect("Failed to execute command");

    assert!(
        !output.status.success(),
        "Unknown model kind should be rejected"
    );
}
