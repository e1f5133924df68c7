//! Main application logic.
//!
//! The `Application` applies CLI overrides to the loaded configuration and
//! then runs either the built-in demonstration or a command script against
//! the process-wide default registry.

use crate::{cli::CliArgs, config::AppConfig, listeners::{log_listener, BuiltinListeners}, logging::display_banner};
use emitter::{Outcome, Script};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main application struct.
pub struct Application {
    /// Loaded application configuration
    config: AppConfig,
    /// Listeners available to scripts
    builtins: BuiltinListeners,
}

impl Application {
    /// Creates a new application instance.
    ///
    /// 1. Load configuration from file (creating default if missing)
    /// 2. Apply command-line argument overrides
    /// 3. Validate merged configuration
    pub async fn new(args: CliArgs) -> Result<Self, Box<dyn std::error::Error>> {
        info!("🔧 Loading configuration from: {}", args.config_path.display());
        let config = AppConfig::load_from_file(&args.config_path).await?;
        let app = Self::with_config(config, args)?;

        display_banner();
        Ok(app)
    }

    /// Builds the application from an already loaded configuration.
    pub fn with_config(mut config: AppConfig, args: CliArgs) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(script_path) = args.script_path {
            config.demo.script = Some(script_path.to_string_lossy().to_string());
        }

        if let Some(log_level) = args.log_level {
            config.logging.level = log_level;
        }

        if args.json_logs {
            config.logging.json_format = true;
        }

        if let Err(e) = config.validate() {
            return Err(format!("Configuration validation failed: {e}").into());
        }
        info!("✅ Configuration loaded and validated successfully");

        Ok(Self {
            config,
            builtins: BuiltinListeners::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn builtins(&self) -> &BuiltinListeners {
        &self.builtins
    }

    /// Runs the configured script, or the built-in demonstration when no
    /// script is set, and returns the outcome of every registry call.
    pub async fn run(&self) -> Result<Vec<Outcome>, Box<dyn std::error::Error>> {
        let outcomes = match &self.config.demo.script {
            Some(path) => self.run_script(&PathBuf::from(path)).await?,
            None => self.run_builtin_demo()?,
        };

        info!("🏁 Finished with {} registry call(s)", outcomes.len());
        Ok(outcomes)
    }

    /// Subscribe, trigger, unsubscribe, trigger again.
    ///
    /// The second trigger reaches no listener.
    pub fn run_builtin_demo(&self) -> Result<Vec<Outcome>, Box<dyn std::error::Error>> {
        let event_name = self.config.demo.event_name.as_str();
        let mut outcomes = Vec::with_capacity(4);

        outcomes.push(Outcome::Count(emitter::on(event_name, log_listener())?));
        outcomes.push(Outcome::Triggered(emitter::trigger(
            event_name,
            &[
                json!("trigger.argument.A"),
                json!("trigger.argument.B"),
                json!("trigger.argument.C"),
            ],
        )?));
        outcomes.push(Outcome::Count(emitter::off_all(event_name)?));

        let triggered = emitter::trigger(event_name, &[json!("trigger.argument.D")])?;
        if !triggered {
            info!("🔕 '{}' has no listeners left", event_name);
        }
        outcomes.push(Outcome::Triggered(triggered));

        Ok(outcomes)
    }

    /// Loads a `.toml` or `.json` command script and runs it.
    pub async fn run_script(&self, path: &Path) -> Result<Vec<Outcome>, Box<dyn std::error::Error>> {
        info!("📜 Running command script: {}", path.display());
        let source = tokio::fs::read_to_string(path).await?;
        let script = parse_script(path, &source)?;

        let mut outcomes = Vec::with_capacity(script.commands.len());
        for (index, command) in script.commands.iter().enumerate() {
            match command.apply(emitter::default_registry(), &self.builtins.table) {
                Ok(outcome) => {
                    info!(index, op = command.operation().as_str(), ?outcome, "✅ Command applied");
                    outcomes.push(outcome);
                }
                Err(e) => {
                    warn!(index, op = command.operation().as_str(), "❌ Command failed: {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(outcomes)
    }
}

/// Picks the script format from the file extension; anything but `.json` is
/// read as TOML.
pub fn parse_script(path: &Path, source: &str) -> Result<Script, emitter::EmitterError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Script::from_json_str(source),
        _ => Script::from_toml_str(source),
    }
}
