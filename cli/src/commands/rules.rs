//! # Rules Command
//!
//! File: cli/src/commands/rules.rs
//! Author: Christi Mahu
//!
//! Prints the rules in the order the resolver tries them: delegation rules
//! with their availability, then the generic table.
//!
use crate::bot::catalog::TERMINATION_PHRASES;
use crate::bot::rules::FALLBACK;
use crate::commands::options::{availability, build_bot, BotArgs};
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct RulesArgs {
    #[command(flatten)]
    pub bot: BotArgs,
}

pub fn handle_rules(args: RulesArgs) -> Result<()> {
    let bot = build_bot(&args.bot)?;
    let resolver = &bot.resolver;

    println!("Termination phrases: {}", TERMINATION_PHRASES.join(", "));

    println!("\nDelegation rules:");
    for rule in resolver.delegation_rules() {
        println!(
            "  {:<22} [{} {}] {}",
            rule.id(),
            rule.capability(),
            availability(resolver, rule.capability()),
            rule.pattern()
        );
    }

    println!("\nGeneric rules (first match wins):");
    let table = resolver.table();
    for (index, rule) in table.rules().iter().enumerate() {
        let replies = table.responses().get(rule.id()).map_or(0, <[_]>::len);
        println!(
            "  {:>2}. {:<20} {:<40} ({} replies)",
            index + 1,
            rule.id(),
            rule.pattern(),
            replies
        );
    }

    let fallback = table.responses().get(FALLBACK).map_or(0, <[_]>::len);
    println!("\nFallback replies: {}", fallback);
    Ok(())
}
