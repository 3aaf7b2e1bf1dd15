//! Structured logging setup.
//!
//! Library code emits `tracing` events; the binary installs a `tracing-subscriber` formatter
//! writing to stderr, so log lines never mix with shell output on stdout.
//!
//! The level comes from `--log-level`, then `VFS_TREE_LOG_LEVEL`, then defaults to `warn`.
//! When `RUST_LOG` is set it takes precedence over all of them.

use std::env;
use std::sync::Once;

use anyhow::anyhow;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::Result;

pub const LEVEL_ENV: &str = "VFS_TREE_LOG_LEVEL";

static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for events emitted by this crate
    pub level: Level,

    /// Include the module target (e.g. `vfs_tree::vfs::tree_fs`) in log lines
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Builds the configuration from an optional command-line level, falling back to the
    /// environment.
    pub fn resolve(cli_level: Option<&str>) -> Result<Self> {
        let level = match cli_level {
            Some(level) => parse_level(level)?,
            None => match env::var(LEVEL_ENV) {
                Ok(level) => parse_level(&level)?,
                Err(_) => Self::default().level,
            },
        };
        Ok(Self::with_level(level))
    }
}

/// Parses a log level (case-insensitive).
pub fn parse_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(anyhow!(
            "invalid log level '{}', valid levels: trace, debug, info, warn, error",
            level
        )),
    }
}

/// Installs the global subscriber. Only the first call has an effect.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("vfs_tree={}", config.level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(config.include_target)
                    .with_writer(std::io::stderr),
            )
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() -> Result<()> {
        assert_eq!(parse_level("trace")?, Level::TRACE);
        assert_eq!(parse_level("debug")?, Level::DEBUG);
        assert_eq!(parse_level("info")?, Level::INFO);
        assert_eq!(parse_level("warn")?, Level::WARN);
        assert_eq!(parse_level("error")?, Level::ERROR);
        Ok(())
    }

    #[test]
    fn test_parse_level_case_insensitive() -> Result<()> {
        assert_eq!(parse_level("TRACE")?, Level::TRACE);
        assert_eq!(parse_level("Debug")?, Level::DEBUG);
        Ok(())
    }

    #[test]
    fn test_parse_level_invalid() {
        assert!(parse_level("verbose").is_err());
        assert!(parse_level("").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::WARN);
        assert!(config.include_target);
    }

    #[test]
    fn test_cli_level_wins() -> Result<()> {
        let config = LoggingConfig::resolve(Some("debug"))?;
        assert_eq!(config.level, Level::DEBUG);
        assert!(LoggingConfig::resolve(Some("loud")).is_err());
        Ok(())
    }
}
