//! # Emitter Demo - Main Entry Point
//!
//! Demonstration host for the `emitter` crate. Handles CLI parsing,
//! configuration loading and logging, then runs registry calls against the
//! process-wide default registry.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the built-in demonstration
//! emitter-demo
//!
//! # Run a command script
//! emitter-demo --script commands.toml
//!
//! # Debug logging as JSON
//! emitter-demo --log-level debug --json-logs
//! ```
//!
//! ## Configuration
//!
//! The demo loads configuration from a TOML file (default: `emitter.toml`).
//! If the file doesn't exist, a default configuration will be created.

use tracing::error;

pub mod app;
pub mod cli;
pub mod config;
pub mod listeners;
pub mod logging;

use app::Application;
use cli::CliArgs;
use config::AppConfig;

/// Runs the demo.
///
/// 1. Command-line argument parsing
/// 2. Configuration loading
/// 3. Logging system initialization
/// 4. Application creation and execution
///
/// Exits the process with status 1 when startup or a registry call fails.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let mut logging_settings = AppConfig::load_from_file(&args.config_path)
        .await
        .unwrap_or_default()
        .logging;
    if let Some(level) = &args.log_level {
        logging_settings.level = level.clone();
    }

    if let Err(e) = logging::setup_logging(&logging_settings, args.json_logs) {
        eprintln!("❌ Failed to setup logging: {e}");
        std::process::exit(1);
    }

    match Application::new(args).await {
        Ok(app) => {
            if let Err(e) = app.run().await {
                error!("❌ Application error: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("❌ Failed to start application: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

pub use config::{DemoSettings, LoggingSettings};
