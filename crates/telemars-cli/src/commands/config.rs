//! Config command implementation.
//!
//! View and initialise configuration settings.
//! Config file is located at ~/.config/tm/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use telemars_api::client::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "TM_CONFIG";

/// Minimum token length to apply masking (show first and last N characters).
const TOKEN_MASK_MIN_LENGTH: usize = 8;

/// Number of characters to show at start/end of a masked token.
const TOKEN_MASK_VISIBLE_CHARS: usize = 4;

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# tm - Mediascope TV Index CLI Configuration

# Config schema version (do not modify)
version = 1

# API token (can also use TELEMARS_TOKEN env var)
# token = "your-api-token-here"

# Service endpoint
# base_url = "https://api.mediascope.net/tvindex/api/v1"

# Task polling
[task]
# poll_interval_secs = 2
# timeout_secs = 600
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version; files newer than this build are rejected.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// API token (optional, can use env var instead).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Service endpoint override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Task polling settings.
    #[serde(default)]
    pub task: TaskConfig,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            token: None,
            base_url: None,
            task: TaskConfig::default(),
        }
    }
}

/// Task polling configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Seconds between two state checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_interval_secs: Option<u64>,

    /// Seconds to wait before giving up on a task.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl TaskConfig {
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/tm/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        let path = PathBuf::from(path);
        if let Some(parent) = path.parent() {
            return Ok(parent.to_path_buf());
        }
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("tm"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("tm"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    check_version(config)
}

/// Rejects configs written for a newer schema than this build understands.
fn check_version(config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        return Err(CommandError::Config(format!(
            "config version {} is newer than supported version {}",
            config.version, CONFIG_VERSION
        )));
    }
    Ok(config)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let mut shown = serde_json::to_value(&config)?;
        if let Some(token) = config.token.as_deref() {
            shown["token"] = serde_json::Value::String(mask_token(token));
        }
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": shown,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            if let Some(ref token) = config.token {
                println!("  token: {}", mask_token(token));
            }
            if let Some(ref base_url) = config.base_url {
                println!("  base_url: {}", base_url);
            }

            println!("\n[task]");
            println!("  poll_interval_secs: {}", config.task.poll_interval().as_secs());
            println!("  timeout_secs: {}", config.task.timeout().as_secs());
        } else {
            println!("(No config file exists. Run 'tm config init' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Executes the config init command, writing the default config file.
pub fn execute_init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = get_config_path()?;

    if path.exists() && !force {
        return Err(CommandError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    fs::write(&path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Created default config at: {}", path.display());
    }

    Ok(())
}

/// Masks a token for display, showing only the first and last N characters.
///
/// Uses character-based (not byte-based) indexing to safely handle
/// multi-byte UTF-8 characters.
fn mask_token(token: &str) -> String {
    let char_count = token.chars().count();
    if char_count > TOKEN_MASK_MIN_LENGTH {
        let prefix: String = token.chars().take(TOKEN_MASK_VISIBLE_CHARS).collect();
        let suffix: String = token
            .chars()
            .skip(char_count - TOKEN_MASK_VISIBLE_CHARS)
            .collect();
        format!("{}...{}", prefix, suffix)
    } else {
        "****".to_string()
    }
}
