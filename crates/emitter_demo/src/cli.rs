//! Command-line interface handling for the emitter demo.
//!
//! This module provides command-line argument parsing using the `clap` crate.

use clap::{Arg, Command};
use std::path::PathBuf;

/// Command line arguments parsed from user input.
///
/// Options here override the matching configuration file settings.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Optional command script to run instead of the built-in demo
    pub script_path: Option<PathBuf>,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON log output
    pub json_logs: bool,
}

impl CliArgs {
    /// Builds the clap command definition.
    pub fn command() -> Command {
        Command::new("Emitter Demo")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Runs named-event scripts against the default emitter registry")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .default_value("emitter.toml"),
            )
            .arg(
                Arg::new("script")
                    .short('s')
                    .long("script")
                    .value_name("FILE")
                    .help("Command script (.toml or .json) to run instead of the built-in demo"),
            )
            .arg(
                Arg::new("log-level")
                    .short('l')
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level (trace, debug, info, warn, error)"),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Output logs in JSON format")
                    .action(clap::ArgAction::SetTrue),
            )
    }

    /// Parses the process arguments.
    ///
    /// Exits the process with clap's usage message on invalid input.
    pub fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    /// Parses an explicit argument list, first element being the binary name.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::from_matches(&Self::command().try_get_matches_from(args)?))
    }

    fn from_matches(matches: &clap::ArgMatches) -> Self {
        Self {
            config_path: matches
                .get_one::<String>("config")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("emitter.toml")),
            script_path: matches.get_one::<String>("script").map(PathBuf::from),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["emitter-demo"]).unwrap();
        assert_eq!(args.config_path, PathBuf::from("emitter.toml"));
        assert!(args.script_path.is_none());
        assert!(args.log_level.is_none());
        assert!(!args.json_logs);
    }

    #[test]
    fn test_all_options() {
        let args = CliArgs::try_parse_from([
            "emitter-demo",
            "-c",
            "custom.toml",
            "--script",
            "commands.json",
            "-l",
            "debug",
            "--json-logs",
        ])
        .unwrap();

        assert_eq!(args.config_path, PathBuf::from("custom.toml"));
        assert_eq!(args.script_path, Some(PathBuf::from("commands.json")));
        assert_eq!(args.log_level, Some("debug".to_string()));
        assert!(args.json_logs);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(CliArgs::try_parse_from(["emitter-demo", "--bogus"]).is_err());
    }
}
