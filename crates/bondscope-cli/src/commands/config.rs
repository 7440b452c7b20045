//! Config command implementation.
//!
//! Shows, locates, validates and initializes the dashboard configuration file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::cli::{GlobalArgs, OutputFormat};
use crate::commands::load_config;
use crate::output::{
    print_error, print_header, print_info, print_json, print_output, print_success, KeyValue,
};
use bondscope_config::{default_path, DashboardConfig, Validate};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Print as a TOML document
        #[arg(long)]
        toml: bool,
    },

    /// Show the configuration file location
    Path,

    /// Check a configuration file and list every problem
    Validate {
        /// File to check (defaults to --config, then the default location)
        file: Option<PathBuf>,
    },

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, global: &GlobalArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show { toml } => execute_show(global, toml, format),
        ConfigCommand::Path => execute_path(global, format),
        ConfigCommand::Validate { file } => execute_validate(global, file),
        ConfigCommand::Init { force } => execute_init(global, force),
    }
}

/// The file named by `--config`, else the default location.
fn target_path(global: &GlobalArgs) -> Result<PathBuf> {
    match &global.config {
        Some(path) => Ok(path.clone()),
        None => default_path().context("Could not determine config directory"),
    }
}

fn execute_show(global: &GlobalArgs, toml: bool, format: OutputFormat) -> Result<()> {
    let config = load_config(global)?;

    if toml {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_json(&config),
        OutputFormat::Table | OutputFormat::Csv => {
            let mut rows = Vec::new();
            flatten("", &serde_json::to_value(&config)?, &mut rows);
            if format == OutputFormat::Table {
                print_header("Current Configuration");
            }
            print_output(&rows, format)
        }
    }
}

/// Flattens nested sections into dotted keys (`risk.duration.low`).
fn flatten(prefix: &str, value: &serde_json::Value, out: &mut Vec<KeyValue>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&key, child, out);
            }
        }
        serde_json::Value::Array(items) => {
            let joined: Vec<String> = items
                .iter()
                .map(|v| v.as_str().map_or_else(|| v.to_string(), str::to_string))
                .collect();
            out.push(KeyValue::new(prefix, joined.join(", ")));
        }
        serde_json::Value::String(s) => out.push(KeyValue::new(prefix, s.as_str())),
        serde_json::Value::Null => out.push(KeyValue::new(prefix, "-")),
        other => out.push(KeyValue::new(prefix, other.to_string())),
    }
}

fn execute_path(global: &GlobalArgs, format: OutputFormat) -> Result<()> {
    let path = target_path(global)?;
    let exists = path.exists();

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "exists": exists,
        })),
        _ => {
            println!("{}", path.display());
            if !exists && format == OutputFormat::Table {
                print_info(
                    "File does not exist; defaults are in effect. Run `bondscope config init`.",
                );
            }
            Ok(())
        }
    }
}

fn execute_validate(global: &GlobalArgs, file: Option<PathBuf>) -> Result<()> {
    let path = match file {
        Some(path) => path,
        None => target_path(global)?,
    };

    let config = DashboardConfig::from_file(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let errors = config.validate();

    if errors.is_empty() {
        print_success(&format!("{} is valid", path.display()));
        return Ok(());
    }

    for error in &errors {
        print_error(&error.to_string());
    }
    anyhow::bail!("{} has {} problem(s)", path.display(), errors.len())
}

fn execute_init(global: &GlobalArgs, force: bool) -> Result<()> {
    let path = target_path(global)?;
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = DashboardConfig::default().to_toml_string()?;
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    print_success(&format!("Wrote default configuration to {}", path.display()));
    Ok(())
}
