//! Logging configuration and initialization for autoimport.
//!
//! Stderr output is quiet by default so that the suggested import line is the
//! only thing a caller sees; file logging with rotation is opt-in.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Guard that must be held for the lifetime of the application.
/// When dropped, flushes any pending log writes.
#[must_use = "Dropping this guard will stop logging - keep it alive for the program's lifetime"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
    _stderr_guard: Option<WorkerGuard>,
}

/// Initialize the logging subsystem based on configuration.
///
/// `RUST_LOG` overrides `config.stderr_level` for the stderr layer.
pub fn init_logging(config: &LoggingConfig, project_root: &Path) -> Result<LoggingGuard> {
    let mut file_guard = None;
    let mut stderr_guard = None;

    let file_layer = if config.enabled {
        let log_dir = resolve_log_dir(&config.directory, project_root);
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let rotation = parse_rotation(&config.rotation);
        let file_appender = RollingFileAppender::new(rotation, &log_dir, &config.file_prefix);
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
        file_guard = Some(guard);

        Some(
            fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(parse_level(&config.level)),
        )
    } else {
        None
    };

    let stderr_layer = if config.stderr {
        let stderr_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| parse_level(&config.stderr_level));
        let (non_blocking_stderr, guard) = tracing_appender::non_blocking(std::io::stderr());
        stderr_guard = Some(guard);

        Some(
            fmt::layer()
                .with_writer(non_blocking_stderr)
                .with_target(false)
                .with_filter(stderr_filter),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to initialize logging subscriber")?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
        _stderr_guard: stderr_guard,
    })
}

fn resolve_log_dir(directory: &Path, project_root: &Path) -> PathBuf {
    if directory.is_absolute() {
        directory.to_path_buf()
    } else {
        project_root.join(directory)
    }
}

fn parse_level(level: &str) -> EnvFilter {
    let level_lower = level.to_lowercase();
    let level_str = match level_lower.as_str() {
        "trace" => "autoimport=trace",
        "debug" => "autoimport=debug",
        "info" => "autoimport=info",
        "warn" => "autoimport=warn",
        "error" => "autoimport=error",
        "off" => "off",
        _ => {
            eprintln!(
                "Warning: Unknown log level '{}', defaulting to 'warn'",
                level
            );
            "autoimport=warn"
        }
    };
    EnvFilter::new(level_str)
}

fn parse_rotation(rotation: &str) -> Rotation {
    let rotation_lower = rotation.to_lowercase();
    match rotation_lower.as_str() {
        "hourly" => Rotation::HOURLY,
        "daily" => Rotation::DAILY,
        "minutely" => Rotation::MINUTELY,
        "never" => Rotation::NEVER,
        _ => {
            eprintln!(
                "Warning: Unknown rotation strategy '{}', defaulting to 'daily'",
                rotation
            );
            Rotation::DAILY
        }
    }
}
