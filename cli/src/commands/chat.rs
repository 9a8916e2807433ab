//! # Chat Command
//!
//! File: cli/src/commands/chat.rs
//! Author: Christi Mahu
//!
//! Runs the interactive session on stdin/stdout.
//!
//! ```bash
//! simplebot chat
//! echo "weather in Rome" | simplebot chat --no-prompt
//! ```
//!
use crate::bot::{Session, SessionEnd};
use crate::commands::options::{build_bot, BotArgs};
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::thread;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
pub struct ChatArgs {
    #[command(flatten)]
    pub bot: BotArgs,

    /// Do not print the `You: ` prompt (useful when piping input).
    #[arg(long)]
    pub no_prompt: bool,
}

/// # Handle Chat Command (`handle_chat`)
///
/// Builds the bot and runs the session loop until a termination phrase,
/// end of input or Ctrl-C.
pub fn handle_chat(args: ChatArgs) -> Result<()> {
    debug!("Handling chat command with args: {:?}", args);
    let bot = build_bot(&args.bot)?;

    farewell_on_interrupt(bot.name().to_string())?;

    // Stdout is not held locked so the interrupt farewell can still print.
    let stdin = io::stdin();
    let summary = Session::new(&bot.resolver, bot.name(), stdin.lock(), io::stdout())
        .show_prompt(!args.no_prompt)
        .run()?;

    match summary.ended_by {
        SessionEnd::Farewell => info!("Chat finished with a farewell after {} turns", summary.turns),
        SessionEnd::EndOfInput => info!("Chat finished at end of input after {} turns", summary.turns),
    }
    Ok(())
}

/// The line printed when the session is interrupted with Ctrl-C.
fn interrupt_farewell(bot_name: &str) -> String {
    format!("\n{}: Goodbye!", bot_name)
}

/// # Farewell On Interrupt (`farewell_on_interrupt`)
///
/// Waits for Ctrl-C on a background thread with its own single-threaded
/// Tokio runtime. On interrupt the bot says goodbye and the process exits
/// with status 0.
fn farewell_on_interrupt(bot_name: String) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the interrupt listener")?;

    thread::Builder::new()
        .name("interrupt".to_string())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("Interrupted; ending chat");
                        let mut stdout = io::stdout();
                        let _ = writeln!(stdout, "{}", interrupt_farewell(&bot_name));
                        let _ = stdout.flush();
                        std::process::exit(0);
                    }
                    Err(e) => warn!("Unable to listen for Ctrl-C: {}", e),
                }
            });
        })
        .context("Failed to spawn the interrupt listener")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_farewell_starts_on_a_new_line() {
        assert_eq!(interrupt_farewell("Rusty"), "\nRusty: Goodbye!");
    }
}
