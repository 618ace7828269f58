//! Top-level CLI definition and dispatch.

use std::io;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use log::info;

use crate::core::config::Config;
use crate::core::errors::{BellError, Result};
use crate::daemon::signals::ShutdownFlag;
use crate::notify::pushover::PushoverClient;
use crate::notify::{Notification, Notifier};

/// pibell — doorbell push notifications from a Raspberry Pi GPIO pin.
#[derive(Parser)]
#[command(name = "pibell", version, about)]
pub struct Cli {
    /// Path to the configuration file (otherwise the default search
    /// order applies).
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Watch the doorbell pin and notify on every press (foreground).
    Run,
    /// Send one test notification and exit.
    Ring {
        /// Print the provider response as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show or locate the configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions on stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// `pibell config` subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (secrets redacted).
    Show {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the configuration file path in effect.
    Path,
}

/// Dispatch CLI commands.
///
/// # Errors
/// Returns the first error of the selected subcommand; the binary maps
/// it to a nonzero exit.
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Run => run_monitor(cli.config.as_deref()),
        Command::Ring { json } => ring(cli.config.as_deref(), *json),
        Command::Config { action } => match action {
            ConfigAction::Show { json } => config_show(cli.config.as_deref(), *json),
            ConfigAction::Path => config_path(cli.config.as_deref()),
        },
        Command::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "pibell", &mut io::stdout());
            Ok(())
        }
    }
}

/// `pibell run`: load config, install signal handlers, hand off to the
/// platform monitor.
fn run_monitor(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    config.validate()?;
    let shutdown = ShutdownFlag::new();
    shutdown.install()?;
    run_monitor_platform(&config, shutdown)
}

#[cfg(all(feature = "hardware", target_os = "linux"))]
fn run_monitor_platform(config: &Config, shutdown: ShutdownFlag) -> Result<()> {
    use crate::daemon::loop_main::DoorbellMonitor;
    use crate::gpio::bcm::BellPin;

    let bell = BellPin::configure(config.pin)?;
    info!(
        "watching BCM pin {} (debounce {}s)",
        config.pin, config.debounce_secs
    );
    let monitor = DoorbellMonitor::new(
        bell,
        PushoverClient::new()?,
        config.credentials(),
        config.debounce(),
        shutdown,
    );
    monitor.run()
}

#[cfg(not(all(feature = "hardware", target_os = "linux")))]
fn run_monitor_platform(_config: &Config, _shutdown: ShutdownFlag) -> Result<()> {
    Err(BellError::UnsupportedPlatform {
        details: "GPIO monitoring needs a Linux host and the `hardware` feature".to_string(),
    })
}

/// `pibell ring`: send one real notification with the configured
/// credentials so the operator can verify the whole path end to end.
fn ring(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    config.validate()?;
    let client = PushoverClient::new()?;
    let credentials = config.credentials();
    info!("Sending notification");
    let delivery = client.notify(&Notification::doorbell(&credentials))?;
    if json {
        let payload = serde_json::json!({
            "status": delivery.status,
            "reason": delivery.reason.as_str(),
            "delivered": delivery.is_success(),
        });
        println!("{payload}");
    } else if delivery.is_success() {
        println!("{} {delivery}", "delivered".green());
    } else {
        println!("{} {delivery}", "rejected".red());
    }
    if delivery.is_success() {
        Ok(())
    } else {
        Err(BellError::NotifySend {
            details: delivery.to_string(),
        })
    }
}

/// `pibell config show`: the effective configuration after file and
/// environment are merged. Secrets are reported set/unset, never echoed.
fn config_show(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let file = resolved_path(config_path);
    if json {
        let payload = serde_json::json!({
            "config_file": file.as_ref().map(|p| p.display().to_string()),
            "pin": config.pin,
            "debounce_secs": config.debounce_secs,
            "token_set": !config.token.is_empty(),
            "user_set": !config.user.is_empty(),
        });
        println!("{payload}");
    } else {
        match &file {
            Some(path) => println!("config file: {}", path.display()),
            None => println!("config file: {}", "none (defaults + environment)".yellow()),
        }
        println!("pin: {} (BCM)", config.pin);
        println!("debounce: {}s", config.debounce_secs);
        println!("token: {}", set_or_unset(!config.token.is_empty()));
        println!("user: {}", set_or_unset(!config.user.is_empty()));
    }
    Ok(())
}

/// `pibell config path`: where `load` reads from, if anywhere.
fn config_path(config_path: Option<&Path>) -> Result<()> {
    match resolved_path(config_path) {
        Some(path) => println!("{}", path.display()),
        None => println!("none (defaults + environment)"),
    }
    Ok(())
}

fn resolved_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map_or_else(Config::default_path, |p| Some(p.to_path_buf()))
}

fn set_or_unset(set: bool) -> colored::ColoredString {
    if set { "set".green() } else { "unset".red() }
}
