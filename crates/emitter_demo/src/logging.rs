//! Logging system setup.
//!
//! Registry calls are logged through `tracing`; this module installs the
//! subscriber that renders them, either as compact lines for a terminal or as
//! flattened JSON objects for log collectors.

use crate::config::LoggingSettings;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Output format of the demo's log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    /// JSON wins when either the config file or the `--json-logs` flag asks
    /// for it.
    pub fn select(config: &LoggingSettings, json_flag: bool) -> Self {
        if json_flag || config.json_format {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

/// Filter for the subscriber. `RUST_LOG` takes precedence over `level`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initializes the global tracing subscriber.
///
/// Fails when a global subscriber is already installed.
pub fn setup_logging(
    config: &LoggingSettings,
    json_flag: bool,
) -> Result<LogFormat, Box<dyn std::error::Error>> {
    let format = LogFormat::select(config, json_flag);

    let output = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_ansi(true)
            .with_target(false)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(build_filter(&config.level))
        .with(output)
        .try_init()?;

    info!(level = %config.level, ?format, "🔧 Logging initialized");
    Ok(format)
}

/// Displays the startup banner through the logger.
pub fn display_banner() {
    let version = option_env!("CARGO_PKG_VERSION").unwrap_or("UNK");
    info!("╔══════════════════════════════════════╗");
    info!("║           📣 EMITTER DEMO            ║");
    info!("║               v{:<8}              ║", version);
    info!("║  Synchronous named-event registry    ║");
    info!("╚══════════════════════════════════════╝");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(json_format: bool) -> LoggingSettings {
        LoggingSettings {
            level: "info".to_string(),
            json_format,
        }
    }

    #[test]
    fn test_format_selection() {
        assert_eq!(LogFormat::select(&settings(false), false), LogFormat::Compact);
        assert_eq!(LogFormat::select(&settings(true), false), LogFormat::Json);
        assert_eq!(LogFormat::select(&settings(false), true), LogFormat::Json);
        assert_eq!(LogFormat::select(&settings(true), true), LogFormat::Json);
    }

    #[test]
    fn test_second_setup_is_rejected() {
        // Only one global subscriber per process; whichever call comes second fails.
        let first = setup_logging(&settings(false), false);
        let second = setup_logging(&settings(false), true);
        assert!(first.is_err() || second.is_err());
        if let Ok(format) = first {
            assert_eq!(format, LogFormat::Compact);
        }
    }
}
