//! # Shared Bot Options
//!
//! File: cli/src/commands/options.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Every subcommand needs a fully assembled resolver. This module holds the
//! options they share (`--config`, `--no-weather`, `--no-graph`,
//! `--graph-dir`) and the startup sequence that turns them into a `Bot`:
//!
//! 1. Load and validate the configuration.
//! 2. Apply command-line overrides.
//! 3. Decide which delegation capabilities are available and build their adapters.
//! 4. Build the rule tables. Any invalid pattern aborts startup here.
//!
use crate::bot::Resolver;
use crate::core::config::{self, Config};
use crate::core::error::Result;
use crate::delegation::{Capability, Delegates, GraphAdapter, WeatherAdapter};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone, Default)]
pub struct BotArgs {
    /// Configuration file to use instead of the user and project files.
    #[arg(long, value_name = "FILE", env = "SIMPLEBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Treat the weather service as unavailable.
    #[arg(long)]
    pub no_weather: bool,

    /// Treat the graph service as unavailable.
    #[arg(long)]
    pub no_graph: bool,

    /// Directory where generated graphs are written.
    #[arg(long, value_name = "DIR")]
    pub graph_dir: Option<PathBuf>,
}

/// A ready-to-use bot: the effective configuration and its resolver.
pub struct Bot {
    pub config: Config,
    pub resolver: Resolver,
}

impl Bot {
    pub fn name(&self) -> &str {
        &self.config.bot.name
    }
}

/// Loads configuration, applies overrides and assembles the resolver.
pub fn build_bot(args: &BotArgs) -> Result<Bot> {
    let mut config = config::load_config(args.config.as_deref())?;
    apply_overrides(&mut config, args);

    let mut delegates = Delegates::none();
    if config.weather.enabled {
        delegates = delegates.with_weather(WeatherAdapter::new(&config.weather));
    }
    if config.graph.enabled {
        delegates = delegates.with_graph(GraphAdapter::new(&config.graph.output_dir));
    }

    let resolver = Resolver::with_builtin_rules(&config.bot.name, &config.rules, delegates)?;
    info!(
        "{} ready: {} rules, weather {}, graph {}",
        config.bot.name,
        resolver.table().rules().len(),
        availability(&resolver, Capability::Weather),
        availability(&resolver, Capability::Graph)
    );
    Ok(Bot { config, resolver })
}

fn apply_overrides(config: &mut Config, args: &BotArgs) {
    if args.no_weather {
        config.weather.enabled = false;
    }
    if args.no_graph {
        config.graph.enabled = false;
    }
    if let Some(dir) = &args.graph_dir {
        config.graph.output_dir = dir.to_string_lossy().into_owned();
    }
}

/// Human-readable availability of a capability.
pub fn availability(resolver: &Resolver, capability: Capability) -> &'static str {
    if resolver.is_available(capability) {
        "available"
    } else {
        "unavailable"
    }
}
