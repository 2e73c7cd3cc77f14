//! The binary's flag handling and config layering.

use std::collections::HashMap;
use std::process::Command;
use std::time::Duration;

use projterm::cli::{parse_args, CliCommand};
use projterm::config::TerminalConfig;

fn args(list: &[&str]) -> Vec<String> {
    std::iter::once("projterm")
        .chain(list.iter().copied())
        .map(String::from)
        .collect()
}

#[test]
fn test_version_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_projterm"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success(), "Version flag should exit with code 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("projterm {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn test_help_flag_prints_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_projterm"))
        .arg("--help")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--session"));
}

#[test]
fn test_bad_flag_exits_with_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_projterm"))
        .arg("--bogus")
        .output()
        .expect("Failed to execute binary");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown argument"));
}

#[test]
fn test_missing_session_exits_before_tui() {
    let output = Command::new(env!("CARGO_BIN_EXE_projterm"))
        .env_remove("PROJTERM_SESSION")
        .output()
        .expect("Failed to execute binary");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no session"));
}

#[test]
fn test_flags_override_environment() {
    let env: HashMap<&str, &str> = [
        ("PROJTERM_API_URL", "http://env:1/api"),
        ("PROJTERM_SESSION", "from-env"),
        ("PROJTERM_TIMEOUT_SECS", "30"),
    ]
    .into_iter()
    .collect();
    let config = TerminalConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));

    let CliCommand::Run(run) = parse_args(args(&["-s", "from-flag", "--timeout=5"]).into_iter()).unwrap() else {
        panic!("expected a run command");
    };
    let config = run.apply(config);

    assert_eq!(config.session_id.as_deref(), Some("from-flag"));
    assert_eq!(config.api_url, "http://env:1/api");
    assert_eq!(config.command_timeout, Duration::from_secs(5));
    assert_eq!(config.session_options().command_timeout, Duration::from_secs(5));
}
