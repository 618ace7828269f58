//! Shared harness for CLI integration tests.
//!
//! Every case runs the real binary in a scrubbed environment with a
//! scratch `HOME`, so no case can observe the developer's credentials
//! or configuration. Output is mirrored to a per-case log file that the
//! assertion messages point at.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};

use tempfile::TempDir;

/// Outcome of one CLI invocation.
pub struct CaseResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub log_path: PathBuf,
    /// Scratch `HOME` the process ran under.
    pub home_path: PathBuf,
    _home: TempDir,
}

/// Run the binary with a scrubbed environment.
pub fn run_cli_case(name: &str, args: &[&str]) -> CaseResult {
    run_cli_case_with_env(name, args, &[])
}

/// Run the binary with a scrubbed environment plus explicit overrides.
pub fn run_cli_case_with_env(name: &str, args: &[&str], envs: &[(&str, &str)]) -> CaseResult {
    let home = TempDir::new().expect("create scratch HOME");
    run_in_home(name, args, envs, home)
}

/// Run the binary with a config file pre-placed at the default location
/// inside the scratch `HOME`.
pub fn run_cli_case_with_home_config(name: &str, args: &[&str], config_toml: &str) -> CaseResult {
    let home = TempDir::new().expect("create scratch HOME");
    let config_dir = home.path().join(".config").join("pibell");
    fs::create_dir_all(&config_dir).expect("create config dir");
    fs::write(config_dir.join("config.toml"), config_toml).expect("write config file");
    run_in_home(name, args, &[], home)
}

fn run_in_home(name: &str, args: &[&str], envs: &[(&str, &str)], home: TempDir) -> CaseResult {
    let mut command = Command::new(env!("CARGO_BIN_EXE_pibell"));
    command
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("PIBELL_TOKEN")
        .env_remove("PIBELL_USER")
        .env_remove("XDG_CONFIG_HOME")
        .env("HOME", home.path())
        .env("NO_COLOR", "1");
    for (key, value) in envs {
        command.env(key, value);
    }
    let output = command.output().expect("spawn pibell binary");
    finish(name, home, &output)
}

fn finish(name: &str, home: TempDir, output: &Output) -> CaseResult {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let log_path = write_case_log(name, output.status, &stdout, &stderr);
    CaseResult {
        status: output.status,
        stdout,
        stderr,
        log_path,
        home_path: home.path().to_path_buf(),
        _home: home,
    }
}

fn write_case_log(name: &str, status: ExitStatus, stdout: &str, stderr: &str) -> PathBuf {
    let log_dir = std::env::temp_dir().join("pibell-cli-tests");
    fs::create_dir_all(&log_dir).expect("create log dir");
    let log_path = log_dir.join(format!("{name}.log"));
    fs::write(
        &log_path,
        format!("status: {status}\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}\n"),
    )
    .expect("write case log");
    log_path
}

/// Write `config_toml` to `dir/config.toml` and return its path.
pub fn write_config(dir: &Path, config_toml: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, config_toml).expect("write config file");
    path
}
