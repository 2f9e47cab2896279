//! Integration tests for cleanup-rules.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use cleanup_rules::config::{ConfigManager, EmbeddedDefault};
use cleanup_rules::domain::ConfigError;

const RULES: &str = r#"
services:
  - service_name: spanner
    package_path: cloud.google.com/go/spanner
    creation_functions:
      - NewClient
    cleanup_methods:
      - method: Close
        required: true
        description: Close the client
  - service_name: pubsub
    package_path: cloud.google.com/go/pubsub
    creation_functions:
      - NewClient
    cleanup_methods:
      - method: Close
        required: true
        description: Close the client
package_exceptions:
  - name: short_lived_commands
    pattern: "*/cmd/*"
    condition:
      type: short_lived_program
      description: Command exits quickly
      enabled: true
  - name: cloud_functions
    pattern: "**/function/**"
    condition:
      type: cloud_function
      description: Function runtime reuses clients
      enabled: true
  - name: test_files
    pattern: "**/*_test.go"
    condition:
      type: test_code
      description: Test code
      enabled: false
"#;

fn write_rules(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Helper to run cleanup-rules and return (stdout, stderr, exit_code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_cleanup-rules"))
        .args(args)
        .output()
        .expect("Failed to run cleanup-rules");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

// === Library lifecycle ===

#[test]
fn test_full_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "rules.yaml", RULES);
    let backup = dir.path().join("rules.backup.yaml");
    let edited = dir.path().join("rules.edited.yaml");

    let mut manager = ConfigManager::new();
    manager.load(&rules).unwrap();
    manager.validate().unwrap();
    manager.create_backup(&backup).unwrap();

    manager.update_test_exception(true).unwrap();
    manager.save(&edited).unwrap();
    assert_eq!(manager.history().len(), 1);
    assert_eq!(manager.history()[0].old_value, "false");
    assert_eq!(manager.history()[0].new_value, "true");

    let diff = manager.compare_configurations(&backup).unwrap();
    assert_eq!(
        diff,
        vec!["exception 'test_files': enabled changed from true to false".to_string()]
    );

    ConfigManager::verify_config_change(&edited).unwrap();

    manager.restore_from_backup(&backup).unwrap();
    let config = manager.config().unwrap();
    assert!(!config.find_exception("test_files").unwrap().condition.enabled);
    assert_eq!(manager.state().path, backup);
}

#[test]
fn test_save_load_preserves_rules() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "rules.yaml", RULES);
    let copy = dir.path().join("copy.yaml");

    let mut manager = ConfigManager::new();
    manager.load(&rules).unwrap();
    manager.save(&copy).unwrap();

    let mut reloaded = ConfigManager::new();
    reloaded.load(&copy).unwrap();
    assert_eq!(reloaded.config(), manager.config());
}

#[test]
fn test_unmodified_vs_flipped_copy() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "rules.yaml", RULES);
    let flipped = write_rules(
        dir.path(),
        "flipped.yaml",
        &RULES.replacen("enabled: true", "enabled: false", 1),
    );

    let mut manager = ConfigManager::new();
    manager.load(&rules).unwrap();
    let diff = manager.compare_configurations(&flipped).unwrap();

    assert_eq!(diff.len(), 1);
    assert!(diff[0].contains("short_lived_commands"));
    assert!(diff[0].contains("enabled"));
}

#[test]
fn test_truncated_document_leaves_config_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "rules.yaml", RULES);
    let truncated = write_rules(
        dir.path(),
        "truncated.yaml",
        "services:\n  - service_name: spanner\n    creation_functions: [NewClient, NewCli",
    );
    let corrupted = write_rules(dir.path(), "corrupted.yaml", "services:\n  - [unclosed\n");

    let mut manager = ConfigManager::new();
    manager.load(&rules).unwrap();
    manager.update_test_exception(true).unwrap();
    let before = manager.config().cloned();

    for bad in [&truncated, &corrupted] {
        let err = manager.load(bad).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{:?}", err);
        assert_eq!(manager.config().cloned(), before);
        assert_eq!(manager.state().path, rules);
        assert_eq!(manager.history().len(), 1);
    }
}

#[test]
fn test_exemption_queries_follow_document_order() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "rules.yaml", RULES);

    let mut manager = ConfigManager::new();
    manager.load(&rules).unwrap();
    let config = manager.config().unwrap();

    assert_eq!(
        config.should_exempt_package("github.com/example/project/cmd/function/x"),
        (true, "Command exits quickly")
    );
    assert_eq!(
        config.should_exempt_package("github.com/example/project/internal/function/handler"),
        (true, "Function runtime reuses clients")
    );
    assert_eq!(
        config.should_exempt_package("github.com/example/project/internal/store"),
        (false, "")
    );
    assert_eq!(config.should_exempt_file("pkg/handler_test.go"), (false, ""));
}

#[test]
fn test_verify_does_not_touch_caller() {
    let dir = tempfile::tempdir().unwrap();
    let invalid = write_rules(
        dir.path(),
        "invalid.yaml",
        &RULES.replace("type: cloud_function", "type: batch_job"),
    );

    let mut manager = ConfigManager::new();
    manager.load_default(&EmbeddedDefault::BUNDLED).unwrap();
    manager.update_test_exception(true).unwrap();

    let err = ConfigManager::verify_config_change(&invalid).unwrap_err();
    assert!(err.to_string().contains("cloud_functions"));
    assert_eq!(manager.history().len(), 1);
    assert_eq!(
        manager.state().path,
        PathBuf::from(EmbeddedDefault::BUNDLED.source_label())
    );
}

// === CLI ===

#[test]
fn test_cli_validate() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "rules.yaml", RULES);
    let (stdout, _stderr, exit_code) = run_cli(&["--config", rules.to_str().unwrap(), "validate"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Configuration is valid."), "{}", stdout);
}

#[test]
fn test_cli_validate_reports_first_violation() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "rules.yaml", "services: []\n");
    let (_stdout, stderr, exit_code) = run_cli(&["-c", rules.to_str().unwrap(), "validate"]);

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("at least one service"), "{}", stderr);
}

#[test]
fn test_cli_check_json() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "rules.yaml", RULES);
    let (stdout, _stderr, exit_code) = run_cli(&[
        "-c",
        rules.to_str().unwrap(),
        "--format",
        "json",
        "check",
        "github.com/example/project/cmd/server",
    ]);

    assert_eq!(exit_code, 0);
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["exempt"], true);
    assert_eq!(value["reason"], "Command exits quickly");
}

#[test]
fn test_cli_set_test_exception_and_compare() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "rules.yaml", RULES);
    let original = write_rules(dir.path(), "original.yaml", RULES);

    let (stdout, _stderr, exit_code) = run_cli(&[
        "-c",
        rules.to_str().unwrap(),
        "set-test-exception",
        "true",
    ]);
    assert_eq!(exit_code, 0, "{}", stdout);
    assert!(stdout.contains("test_files.enabled: false -> true"));

    let (stdout, _stderr, exit_code) = run_cli(&[
        "-c",
        rules.to_str().unwrap(),
        "compare",
        original.to_str().unwrap(),
    ]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("1 difference(s)"), "{}", stdout);
    assert!(stdout.contains("test_files"));
}

#[test]
fn test_cli_backup_and_restore() {
    let dir = tempfile::tempdir().unwrap();
    let rules = write_rules(dir.path(), "rules.yaml", RULES);
    let backup = dir.path().join("backup.yaml");

    let (_stdout, _stderr, exit_code) = run_cli(&[
        "-c",
        rules.to_str().unwrap(),
        "backup",
        backup.to_str().unwrap(),
    ]);
    assert_eq!(exit_code, 0);
    assert!(backup.exists());

    run_cli(&["-c", rules.to_str().unwrap(), "set-test-exception", "true"]);
    let (_stdout, stderr, exit_code) = run_cli(&[
        "-c",
        rules.to_str().unwrap(),
        "restore",
        backup.to_str().unwrap(),
    ]);
    assert_eq!(exit_code, 0, "{}", stderr);

    let mut manager = ConfigManager::new();
    manager.load(&rules).unwrap();
    assert!(
        !manager
            .config()
            .unwrap()
            .find_exception("test_files")
            .unwrap()
            .condition
            .enabled
    );
}

#[test]
fn test_cli_verify_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");
    let (_stdout, stderr, exit_code) = run_cli(&["verify", missing.to_str().unwrap()]);

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("does not exist"), "{}", stderr);
}

#[test]
fn test_cli_init_writes_valid_rules() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("rules.yaml");
    let (_stdout, _stderr, exit_code) = run_cli(&["init", "--path", path.to_str().unwrap()]);

    assert_eq!(exit_code, 0);
    let (stdout, _stderr, exit_code) = run_cli(&["verify", path.to_str().unwrap()]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("is valid"));
}

#[test]
fn test_cli_version() {
    let (stdout, _stderr, exit_code) = run_cli(&["version"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with("cleanup-rules "));
}
