//! # SimpleBot Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the SimpleBot CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the appropriate command handler
//!
//! ## Architecture
//!
//! - `bot`: the dispatcher (rules, resolver, session loop)
//! - `delegation`: adapters for the weather and graph collaborators
//! - `core`: configuration, errors and templating
//! - `commands`: one module per subcommand
//!
//! Logs go to stderr so stdout carries only the conversation.
//!
//! ## Examples
//!
//! ```bash
//! # Chat interactively
//! simplebot chat
//!
//! # One-off question with debug logging
//! simplebot -vv ask "weather in Rome"
//!
//! # Show the rule table without the weather service
//! simplebot rules --no-weather
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod bot;
mod commands;
mod core;
mod delegation;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "simplebot",
    about = "SimpleBot: a pattern-rule chatbot for the terminal",
    long_about = "Chat with a rule-based bot that can also look up the weather\n\
                  and draw simple graphs from inline data.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Start an interactive chat session.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Send a single message and print the reply.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// List the rules in the order they are tried.
    Rules(commands::rules::RulesArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Chat(args) => commands::chat::handle_chat(args),
        Commands::Ask(args) => commands::ask::handle_ask(args),
        Commands::Rules(args) => commands::rules::handle_rules(args),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
