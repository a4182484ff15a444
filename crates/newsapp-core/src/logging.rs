//! Tracing subscriber setup.
//!
//! The TUI owns stdout/stderr while running, so interactive sessions log to a
//! file through a non-blocking appender. Plain CLI commands log to stderr.

use std::{env, fs};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "NEWSAPP_LOG";

/// Where log records are written.
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    let env_directives = env::var(LOG_ENV).ok();
    filter_from(env_directives.as_deref(), &config.level)
}

/// Picks the first usable directive: `env_directives`, then `level`, then
/// `warn`. Blank or unparsable values are skipped.
fn filter_from(env_directives: Option<&str>, level: &str) -> EnvFilter {
    [env_directives.unwrap_or_default(), level]
        .into_iter()
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Installs the global tracing subscriber.
///
/// For file targets the returned guard must be held until exit, otherwise
/// buffered records are dropped.
///
/// # Errors
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn init(config: &LogConfig, target: LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = build_filter(config);

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;
            Ok(None)
        }
        LogTarget::File(path) => {
            let dir = path
                .parent()
                .map_or_else(|| PathBuf::from("."), PathBuf::from);
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path {}", path.display()))?;

            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;
            Ok(Some(guard))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level_is_used_without_env() {
        assert_eq!(filter_from(None, "debug").to_string(), "debug");
        assert_eq!(filter_from(Some("  "), " info ").to_string(), "info");
    }

    #[test]
    fn test_env_directives_override_configured_level() {
        assert_eq!(
            filter_from(Some("newsapp_core=trace"), "debug").to_string(),
            "newsapp_core=trace"
        );
    }

    #[test]
    fn test_invalid_env_falls_back_to_configured_level() {
        assert_eq!(filter_from(Some("newsapp=loud"), "info").to_string(), "info");
    }

    #[test]
    fn test_invalid_level_falls_back_to_warn() {
        assert_eq!(filter_from(None, "newsapp=loud").to_string(), "warn");
        assert_eq!(filter_from(None, "").to_string(), "warn");
    }
}
