//! # Ask Command
//!
//! File: cli/src/commands/ask.rs
//! Author: Christi Mahu
//!
//! Resolves a single message and prints the bare reply.
//!
//! ```bash
//! simplebot ask what time is it
//! simplebot ask "create pie chart with data cats:3 dogs:5"
//! ```
//!
use crate::bot::ReplySource;
use crate::commands::options::{build_bot, BotArgs};
use crate::core::error::Result;
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The message to send. Multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,

    #[command(flatten)]
    pub bot: BotArgs,
}

pub fn handle_ask(args: AskArgs) -> Result<()> {
    let bot = build_bot(&args.bot)?;
    let message = args.message.join(" ");

    let reply = bot.resolver.respond(&message);
    match &reply.source {
        ReplySource::Rule(id) => debug!("Answered by rule '{}'", id),
        other => debug!("Answered by {:?}", other),
    }
    println!("{}", reply.text);
    Ok(())
}
