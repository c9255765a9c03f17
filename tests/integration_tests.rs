//! Integration tests for the citytour CLI

use std::process::{Command, Output};

fn citytour(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_citytour"))
        .args(args)
        // keep provider keys from the developer's environment out of the run
        .env_remove("CITYTOUR_PLACES__API_KEY")
        .env_remove("CITYTOUR_WEATHER__API_KEY")
        .env_remove("CITYTOUR_REVIEWS__API_KEY")
        .output()
        .expect("Failed to execute command")
}

fn combined(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

/// Test that the CLI shows help with explicit help flag
#[test]
fn test_cli_help() {
    let output = citytour(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("City sightseeing route planner"));
    assert!(stdout.contains("plan"));
    assert!(stdout.contains("serve"));
}

#[test]
fn test_plan_help_lists_options() {
    let output = citytour(&["plan", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--city", "--keyword", "--date", "--optimize", "--details", "--export", "--travellers"] {
        assert!(stdout.contains(flag), "missing {flag}");
    }
}

/// Missing subcommand is a usage error
#[test]
fn test_cli_requires_subcommand() {
    let output = citytour(&[]);
    assert!(!output.status.success());
}

#[test]
fn test_plan_blank_city_is_rejected() {
    let output = citytour(&["plan", "--city", "   "]);
    assert!(!output.status.success());
    assert!(combined(&output).contains("city must not be empty"));
}

#[test]
fn test_plan_invalid_date_is_rejected() {
    let output = citytour(&["plan", "--city", "北京", "--date", "14/10/2026"]);
    assert!(!output.status.success());
    assert!(combined(&output).contains("--date"));
}

/// Without a place search key the search falls back to no hits
#[test]
fn test_plan_without_search_key_finds_nothing() {
    let output = citytour(&["plan", "--city", "北京"]);
    assert!(!output.status.success());
    assert!(combined(&output).contains("No attractions found for '北京'"));
}

#[test]
fn test_custom_config_option() {
    let dir = std::env::temp_dir().join(format!("citytour-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();

    let output = citytour(&["--config", path.to_str().unwrap(), "plan", "--city", "北京"]);
    assert!(!output.status.success());
    assert!(combined(&output).contains("Failed to load configuration"));

    std::fs::remove_dir_all(&dir).ok();
}
