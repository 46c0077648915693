//! ---
//! lp_section: "01-core-functionality"
//! lp_subsection: "module"
//! lp_type: "source"
//! lp_scope: "code"
//! lp_description: "Tracing subscriber setup for the probe binary."
//! lp_version: "v0.1.0"
//! lp_owner: "tbd"
//! ---
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::daily;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

const LOG_ENV: &str = "LOADPROBE_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Available log formats for the probe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    StructuredJson,
    #[default]
    Pretty,
}

/// Keeps the file appender flushing until dropped. Hold it for the whole run.
#[must_use = "dropping the guard stops the log file writer"]
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Initialize the tracing subscriber based on configuration and environment variables.
///
/// * `LOADPROBE_LOG` overrides the log filter (e.g. `info`, `debug,loadprobe_harness=trace`).
///   When unset the standard `RUST_LOG` variable is honoured, finally defaulting to `warn`.
/// * Everything is written to stderr. Stdout carries the probed value and nothing else.
/// * When `directory` is configured a daily rolling JSON file is written as well.
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|err| {
            eprintln!(
                "invalid {} directive ({}); defaulting to {} logging",
                LOG_ENV, err, DEFAULT_DIRECTIVE
            );
            EnvFilter::new(DEFAULT_DIRECTIVE)
        }),
        Err(_) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    };

    let fmt_layer = match config.format {
        LogFormat::StructuredJson => fmt::layer()
            .with_target(false)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let mut guard = LoggingGuard::default();
    let file_layer = match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory).with_context(|| {
                format!("unable to create log directory {}", directory.display())
            })?;
            let file_name = match &config.file_prefix {
                Some(prefix) => format!("{}-{}.log", prefix, service_name),
                None => format!("{}.log", service_name),
            };
            let file_appender = daily(directory, file_name);
            let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
            guard._file = Some(file_guard);
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_timer(fmt::time::UtcTime::rfc_3339())
                    .json()
                    .with_writer(file_writer)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(file_layer)
        .try_init()
        .ok();

    debug!(service = %service_name, format = ?config.format, log_dir = ?config.directory, "tracing initialised");
    Ok(guard)
}
