//! # SimpleBot Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads, merges and validates the configuration for SimpleBot.
//! Configuration decides the bot's name, whether the weather and graph
//! capabilities are available, where the adapters talk to or write to, and
//! which user-defined rules are placed ahead of the built-in rule table.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config` (used exclusively when given)
//! 2. Project-specific `.simplebot.toml` in current directory or ancestors
//! 3. User-specific `<config dir>/simplebot/config.toml`
//! 4. Default values defined in the code
//!
//! ## Merge Rules
//!
//! A project value replaces the user value only when it differs from the
//! built-in default, so a project file cannot reset a user setting back to
//! its default. `enabled` flags are AND-ed: either file can switch a
//! capability off, neither can switch it back on. A non-empty project
//! `[[rules]]` list replaces the user list. Use `--config` to bypass merging.
//!
//! Loading happens once at startup. The result is read-only for the rest of
//! the process lifetime.
//!
//! ## Examples
//!
//! ```toml
//! [bot]
//! name = "Rusty"
//!
//! [weather]
//! enabled = true
//! endpoint = "https://wttr.in/{place}?format=3"
//! timeout_secs = 5
//!
//! [graph]
//! output_dir = "~/graphs"
//!
//! [[rules]]
//! name = "pizza"
//! pattern = "pizza"
//! responses = ["I love pizza!", "Pizza sounds great."]
//! ```
//!
use crate::core::error::{ChatbotError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    /// User-defined rules, tried before the built-in generic rules.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// Identity of the bot.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    #[serde(default = "default_bot_name")]
    pub name: String,
}

/// Settings for the weather lookup service.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct WeatherConfig {
    /// Whether the weather capability is available at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// URL template; `{place}` is replaced by the requested place.
    #[serde(default = "default_weather_endpoint")]
    pub endpoint: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

/// Settings for the graph generation service.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Directory where graph artifacts are written (can use ~). Will be expanded.
    #[serde(default = "default_graph_dir")]
    pub output_dir: String,
}

/// A single user-defined rule.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub name: String,
    pub pattern: String,
    pub responses: Vec<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_weather_endpoint(),
            timeout_secs: default_weather_timeout(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: default_graph_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_bot_name() -> String {
    "SimpleBot".to_string()
}
fn default_weather_endpoint() -> String {
    "https://wttr.in/{place}?format=3".to_string()
}
fn default_weather_timeout() -> u64 {
    10
}
fn default_graph_dir() -> String {
    ".".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".simplebot.toml";

/// Loads the effective configuration.
///
/// When `explicit` is given, only that file is read. Otherwise the user and
/// project files are discovered and merged. The result is path-expanded and
/// validated before it is returned.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "SimpleBot", "simplebot") else {
        debug!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.exists() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path()? {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.simplebot.toml) found.");
        Ok(None)
    }
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let mut path: &Path = &current_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Ok(Some(project_config));
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return Ok(None);
        }
        match path.parent() {
            Some(parent) => path = parent,
            None => return Ok(None),
        }
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Overlays `project` on `user` following the merge rules in the module docs.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = user;
    if project_cfg.bot.name != default_bot_name() {
        merged.bot.name = project_cfg.bot.name;
    }
    // Booleans default to true, so a project file can only switch a capability off.
    merged.weather.enabled = merged.weather.enabled && project_cfg.weather.enabled;
    if project_cfg.weather.endpoint != default_weather_endpoint() {
        merged.weather.endpoint = project_cfg.weather.endpoint;
    }
    if project_cfg.weather.timeout_secs != default_weather_timeout() {
        merged.weather.timeout_secs = project_cfg.weather.timeout_secs;
    }
    merged.graph.enabled = merged.graph.enabled && project_cfg.graph.enabled;
    if project_cfg.graph.output_dir != default_graph_dir() {
        merged.graph.output_dir = project_cfg.graph.output_dir;
    }
    if !project_cfg.rules.is_empty() {
        merged.rules = project_cfg.rules;
    }
    merged
}

fn expand_config_paths(config: &mut Config) {
    config.graph.output_dir = shellexpand::tilde(&config.graph.output_dir).into_owned();
    debug!("Expanded graph output directory: {}", config.graph.output_dir);
}

fn validate_config(config: &Config) -> Result<()> {
    if config.bot.name.trim().is_empty() {
        return Err(anyhow!(ChatbotError::Config(
            "Bot name cannot be empty.".to_string()
        )));
    }
    if !config.weather.endpoint.contains("{place}") {
        return Err(anyhow!(ChatbotError::Config(format!(
            "Weather endpoint '{}' must contain a {{place}} placeholder.",
            config.weather.endpoint
        ))));
    }
    if config.weather.timeout_secs == 0 {
        return Err(anyhow!(ChatbotError::Config(
            "Weather timeout must be at least one second.".to_string()
        )));
    }
    if config.graph.output_dir.is_empty() {
        return Err(anyhow!(ChatbotError::Config(
            "Graph output directory cannot be empty.".to_string()
        )));
    }
    let graph_dir = Path::new(&config.graph.output_dir);
    if graph_dir.exists() && !graph_dir.is_dir() {
        return Err(anyhow!(ChatbotError::Config(format!(
            "Configured graph output path '{}' exists but is not a directory.",
            graph_dir.display()
        ))));
    }
    for rule in &config.rules {
        if rule.name.trim().is_empty() {
            return Err(anyhow!(ChatbotError::Config(format!(
                "Custom rule with pattern '{}' has an empty name.",
                rule.pattern
            ))));
        }
        if rule.responses.is_empty() {
            return Err(anyhow!(ChatbotError::Config(format!(
                "Custom rule '{}' must define at least one response.",
                rule.name
            ))));
        }
    }
    Ok(())
}
