//! CLI command implementations.

pub mod config;
pub mod interactive;
pub mod methods;
pub mod solve;

// Re-export submodules for convenience
pub use config::{ConfigArgs, Settings};
pub use solve::{BracketArgs, FixedPointArgs, ModifiedSecantArgs, NewtonArgs, SecantArgs};

use std::path::PathBuf;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::error::CliResult;
use crate::output::print_warning;

/// Resolved global options shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Output format after applying the `default_format` setting.
    pub format: OutputFormat,
    /// Suppress headers, traces and status lines.
    pub quiet: bool,
    /// Persisted defaults.
    pub settings: Settings,
    /// Location of config.json.
    pub config_path: PathBuf,
}

impl Context {
    /// Loads settings and resolves the global flags against them.
    ///
    /// `config` subcommands fall back to the defaults when the file is
    /// invalid, so they can still repair it.
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let config_path = config::config_path(cli.config_dir.as_deref())?;
        let settings = match Settings::load(&config_path) {
            Ok(settings) => settings,
            Err(e) if matches!(cli.command, Some(Commands::Config(_))) => {
                print_warning(&format!("{}; using defaults", e));
                Settings::default()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            format: cli.format.unwrap_or(settings.format),
            quiet: cli.quiet,
            settings,
            config_path,
        })
    }
}
