use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use missions_core::settings::Settings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// `~/.space-missions/`, or `./.space-missions/` without a home directory.
pub fn app_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".space-missions")
}

/// Ensure `~/.space-missions/` and `~/.space-missions/logs/` exist.
pub fn ensure_directories() -> anyhow::Result<()> {
    let app_dir = app_directory();
    std::fs::create_dir_all(app_dir.join("logs"))
        .with_context(|| format!("cannot create {}", app_dir.display()))?;
    Ok(())
}

pub fn default_log_file() -> PathBuf {
    app_directory().join("logs").join("space-missions.log")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// An explicit `--log-file` always wins. Otherwise export runs log to stderr
/// and the dashboard logs to the default file, keeping the screen clean.
pub fn log_target(settings: &Settings) -> LogTarget {
    match &settings.log_file {
        Some(path) => LogTarget::File(path.clone()),
        None if settings.export => LogTarget::Stderr,
        None => LogTarget::File(default_log_file()),
    }
}

/// Map a `--log-level` name onto an `EnvFilter` directive.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Falls back to `"info"` if the level string is not a valid directive.
pub fn setup_logging(log_level: &str, target: &LogTarget) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()?
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
