use tracing_subscriber::EnvFilter;

use super::config::{ConsoleFormat, LoggingConfig};
use crate::error::LaunchError;

/// Build the console filter; `directives_override` (normally `RUST_LOG`)
/// replaces the configured level when present.
///
/// # Errors
/// Returns `LaunchError::Logging` if the effective directives do not parse.
pub fn log_filter(
    cfg: &LoggingConfig,
    directives_override: Option<&str>,
) -> Result<EnvFilter, LaunchError> {
    let directives = directives_override
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(cfg.level.as_str());
    EnvFilter::try_new(directives)
        .map_err(|e| LaunchError::Logging(format!("invalid log directives '{directives}': {e}")))
}

/// Install the global console subscriber (stderr).
///
/// # Errors
/// Returns `LaunchError::Logging` on invalid directives or when a global
/// subscriber is already installed.
pub fn init_logging(cfg: &LoggingConfig) -> Result<(), LaunchError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(cfg, rust_log.as_deref())?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match cfg.format {
        ConsoleFormat::Text => builder.try_init(),
        ConsoleFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| LaunchError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn configured_level_is_used_without_override() {
        let cfg = LoggingConfig {
            level: "debug".to_owned(),
            format: ConsoleFormat::Text,
        };
        let filter = log_filter(&cfg, None).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn override_wins_over_configured_level() {
        let filter = log_filter(&LoggingConfig::default(), Some("launchkit=trace")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn blank_override_is_ignored() {
        let filter = log_filter(&LoggingConfig::default(), Some("  ")).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn invalid_level_is_reported() {
        let cfg = LoggingConfig {
            level: "launchkit=loud".to_owned(),
            format: ConsoleFormat::Json,
        };
        let err = log_filter(&cfg, None).unwrap_err();
        assert!(matches!(err, LaunchError::Logging(_)));
    }
}
