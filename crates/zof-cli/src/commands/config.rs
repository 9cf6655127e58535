//! Config command implementation.
//!
//! Manages persisted CLI defaults and loads them as [`Settings`].

use anyhow::Result;
use clap::{Args, Subcommand};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use zof_math::problem::DEFAULT_DELTA;
use zof_math::solvers::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_info, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Default stopping tolerance
    DefaultTolerance,
    /// Default iteration budget
    DefaultMaxIterations,
    /// Default modified secant perturbation
    DefaultDelta,
    /// Precision for decimal output
    DecimalPrecision,
    /// Whether to use colors
    UseColors,
}

impl ConfigKey {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "default_tolerance" | "tolerance" | "tol" => Some(Self::DefaultTolerance),
            "default_max_iterations" | "max_iterations" | "max_iter" => {
                Some(Self::DefaultMaxIterations)
            }
            "default_delta" | "delta" => Some(Self::DefaultDelta),
            "decimal_precision" | "precision" => Some(Self::DecimalPrecision),
            "use_colors" | "colors" => Some(Self::UseColors),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::DefaultTolerance => "default_tolerance",
            Self::DefaultMaxIterations => "default_max_iterations",
            Self::DefaultDelta => "default_delta",
            Self::DecimalPrecision => "decimal_precision",
            Self::UseColors => "use_colors",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DefaultTolerance => "Stopping tolerance when --tol is omitted",
            Self::DefaultMaxIterations => "Iteration budget when --max-iter is omitted",
            Self::DefaultDelta => "Modified secant perturbation when --delta is omitted",
            Self::DecimalPrecision => "Number of decimal places for output (2-16)",
            Self::UseColors => "Enable colored output (true, false)",
        }
    }

    fn default_value(&self) -> String {
        match self {
            Self::DefaultFormat => "table".to_string(),
            Self::DefaultTolerance => DEFAULT_TOLERANCE.to_string(),
            Self::DefaultMaxIterations => DEFAULT_MAX_ITERATIONS.to_string(),
            Self::DefaultDelta => DEFAULT_DELTA.to_string(),
            Self::DecimalPrecision => "6".to_string(),
            Self::UseColors => "true".to_string(),
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::DefaultTolerance,
            Self::DefaultMaxIterations,
            Self::DefaultDelta,
            Self::DecimalPrecision,
            Self::UseColors,
        ]
    }

    fn lookup(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", s))
    }
}

/// Defaults applied when a flag or prompt is left out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    /// Output format.
    pub format: OutputFormat,
    /// Stopping tolerance.
    pub tolerance: f64,
    /// Iteration budget.
    pub max_iterations: u32,
    /// Modified secant perturbation.
    pub delta: f64,
    /// Decimal places in tables.
    pub precision: usize,
    /// Whether status lines are colored.
    pub use_colors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            delta: DEFAULT_DELTA,
            precision: 6,
            use_colors: true,
        }
    }
}

impl Settings {
    /// Loads settings from the config file, falling back to defaults.
    pub fn load(path: &Path) -> CliResult<Self> {
        let config = Config::load(path)?;
        let mut settings = Self::default();

        for key in ConfigKey::all() {
            if let Some(value) = config.get(key.as_str()) {
                settings
                    .apply(*key, value)
                    .map_err(|e| CliError::Config(format!("{} in {}", e, path.display())))?;
            }
        }

        Ok(settings)
    }

    fn apply(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        match key {
            ConfigKey::DefaultFormat => {
                self.format = OutputFormat::from_setting(value).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Invalid format: {}. Use table, json, csv, or minimal.",
                        value
                    )
                })?;
            }
            ConfigKey::DefaultTolerance => {
                let tolerance: f64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid tolerance: {}. Must be a number.", value))?;
                if !(tolerance.is_finite() && tolerance >= 0.0) {
                    return Err(anyhow::anyhow!(
                        "Invalid tolerance: {}. Must be finite and non-negative.",
                        value
                    ));
                }
                self.tolerance = tolerance;
            }
            ConfigKey::DefaultMaxIterations => {
                let max_iterations: u32 = value.parse().map_err(|_| {
                    anyhow::anyhow!("Invalid iteration count: {}. Must be a whole number.", value)
                })?;
                if max_iterations == 0 {
                    return Err(anyhow::anyhow!("Invalid iteration count: must be at least 1."));
                }
                self.max_iterations = max_iterations;
            }
            ConfigKey::DefaultDelta => {
                let delta: f64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid delta: {}. Must be a number.", value))?;
                if !delta.is_finite() || delta == 0.0 {
                    return Err(anyhow::anyhow!(
                        "Invalid delta: {}. Must be finite and non-zero.",
                        value
                    ));
                }
                self.delta = delta;
            }
            ConfigKey::DecimalPrecision => {
                let precision: usize = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid precision: {}. Must be a number.", value))?;
                if !(2..=16).contains(&precision) {
                    return Err(anyhow::anyhow!(
                        "Invalid precision: {}. Must be between 2 and 16.",
                        precision
                    ));
                }
                self.precision = precision;
            }
            ConfigKey::UseColors => {
                self.use_colors = match value.to_lowercase().as_str() {
                    "true" | "1" | "yes" => true,
                    "false" | "0" | "no" => false,
                    _ => {
                        return Err(anyhow::anyhow!(
                            "Invalid boolean: {}. Use true or false.",
                            value
                        ))
                    }
                };
            }
        }
        Ok(())
    }
}

/// Simple config storage.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl Config {
    fn load(path: &Path) -> CliResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)
                .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
        } else {
            Ok(Self::default())
        }
    }

    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Option<&String> {
        self.values.get(key)
    }

    fn value_or_default(&self, key: ConfigKey) -> String {
        self.get(key.as_str())
            .cloned()
            .unwrap_or_else(|| key.default_value())
    }

    fn set(&mut self, key: String, value: String) {
        self.values.insert(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Get the config file path.
pub fn config_path(dir_override: Option<&Path>) -> CliResult<PathBuf> {
    if let Some(dir) = dir_override {
        return Ok(dir.join("config.json"));
    }
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("could not determine config directory".to_string()))?;
    Ok(home.join("zof").join("config.json"))
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Get(get_args) => execute_get(get_args, ctx),
        ConfigCommand::Set(set_args) => execute_set(set_args, ctx),
        ConfigCommand::List => execute_list(ctx),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args, ctx),
        ConfigCommand::Path => execute_path(ctx),
    }
}

/// Show current configuration.
fn execute_show(ctx: &Context) -> Result<()> {
    let config = Config::load(&ctx.config_path)?;

    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|key| KeyValue::new(key.as_str(), config.value_or_default(*key)))
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Current Configuration");
            }
            crate::output::print_output(&results, ctx.format)?;
        }
        OutputFormat::Json => {
            let output: HashMap<&str, String> = ConfigKey::all()
                .iter()
                .map(|key| (key.as_str(), config.value_or_default(*key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            crate::output::print_output(&results, ctx.format)?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}={}", key.as_str(), config.value_or_default(*key));
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(args: GetArgs, ctx: &Context) -> Result<()> {
    let config = Config::load(&ctx.config_path)?;
    let key = ConfigKey::lookup(&args.key)?;
    let value = config.value_or_default(key);

    match ctx.format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{}", value);
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs, ctx: &Context) -> Result<()> {
    let key = ConfigKey::lookup(&args.key)?;

    // Validate value
    Settings::default().apply(key, &args.value)?;

    let mut config = Config::load(&ctx.config_path)?;
    config.set(key.as_str().to_string(), args.value.clone());
    config.save(&ctx.config_path)?;

    if !ctx.quiet {
        print_success(&format!("Set {} = {}", key.as_str(), args.value));
    }
    Ok(())
}

/// List available configuration keys.
fn execute_list(ctx: &Context) -> Result<()> {
    let results: Vec<KeyValue> = ConfigKey::all()
        .iter()
        .map(|key| {
            KeyValue::new(
                key.as_str(),
                format!("{} (default: {})", key.description(), key.default_value()),
            )
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Available Configuration Keys");
            }
            crate::output::print_output(&results, ctx.format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["key", "description", "default"])?;
            for key in ConfigKey::all() {
                wtr.write_record([key.as_str(), key.description(), key.default_value().as_str()])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(args: ResetArgs, ctx: &Context) -> Result<()> {
    if args.all {
        // Overwrite without reading, so an unreadable file is replaced too.
        Config::default().save(&ctx.config_path)?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = ConfigKey::lookup(&key_str)?;
        let mut config = Config::load(&ctx.config_path)?;
        config.remove(key.as_str());
        config.save(&ctx.config_path)?;
        print_success(&format!(
            "Reset {} to default ({})",
            key.as_str(),
            key.default_value()
        ));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(ctx: &Context) -> Result<()> {
    let path = &ctx.config_path;
    if ctx.format == OutputFormat::Minimal {
        println!("{}", path.display());
        return Ok(());
    }
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}
