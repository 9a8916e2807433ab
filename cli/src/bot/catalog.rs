//! # Built-in Rules
//!
//! File: cli/src/bot/catalog.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Declares the rules SimpleBot ships with:
//! - the termination phrases,
//! - the delegation patterns for the weather and graph capabilities,
//! - the generic rule table, in precedence order,
//! - the fallback replies.
//!
//! User-defined rules from the configuration are placed ahead of the
//! built-in generic rules, so they win under first-match-wins.
//!
//! Patterns are written in lower case; matching is case-insensitive.
//!
use crate::bot::resolver::DelegationRule;
use crate::bot::responses::ResponseCandidate;
use crate::bot::rules::RuleTable;
use crate::core::config::RuleConfig;
use crate::core::error::ChatbotError;
use crate::delegation::Capability;
use chrono::Local;

/// Rule whose pool answers termination phrases.
pub const FAREWELL: &str = "farewell";

/// Inputs that end the session, compared against the lower-cased, trimmed line.
pub const TERMINATION_PHRASES: [&str; 4] = ["exit", "quit", "bye", "goodbye"];

const FALLBACK_REPLIES: [&str; 4] = [
    "I'm not sure I understand.",
    "Could you rephrase that?",
    "Interesting. Tell me more.",
    "I don't have a response for that yet.",
];

/// Delegation patterns, tried in this order before the generic table.
///
/// The last capture group of each pattern is the argument handed to the adapter.
pub fn delegation_rules() -> Result<Vec<DelegationRule>, ChatbotError> {
    Ok(vec![
        DelegationRule::new(
            "weather_in",
            Capability::Weather,
            r"\bweather\s+in\s+(.+?)[\s?!.]*$",
        )?,
        DelegationRule::new(
            "weather_forecast_for",
            Capability::Weather,
            r"\bweather\s+forecast\s+for\s+(.+?)[\s?!.]*$",
        )?,
        DelegationRule::new(
            "temperature_in",
            Capability::Weather,
            r"\btemperature\s+in\s+(.+?)[\s?!.]*$",
        )?,
        DelegationRule::new(
            "create_graph",
            Capability::Graph,
            r"\bcreate\s+(?:an?\s+)?(line|bar|pie)\s+(?:graph|chart|plot)\b.*?\bwith\s+data\b[\s:]*(.+)$",
        )?,
    ])
}

/// Builds the generic rule table: custom rules first, then the built-ins.
pub fn generic_rules(bot_name: &str, custom: &[RuleConfig]) -> Result<RuleTable, ChatbotError> {
    let mut builder = RuleTable::builder();
    for rule in custom {
        builder = builder.literals(
            rule.name.as_str(),
            rule.pattern.as_str(),
            rule.responses.as_slice(),
        );
    }

    builder
        .literals(
            "greeting",
            r"\b(hi|hello|hey)\b",
            &["Hello!", "Hi there!", "Hey! How can I help?"],
        )
        .literals(
            "wellbeing",
            r"how are you",
            &["I'm doing well, thanks!", "I'm good. How about you?"],
        )
        .literals(
            "introduction",
            r"\bmy name is (\w+)",
            &["Nice to meet you, {0}!", "Hello {0}, how can I help?"],
        )
        .literals(
            "identity",
            r"your name",
            &[
                format!("I'm {}, nice to meet you!", bot_name),
                format!("You can call me {}.", bot_name),
            ],
        )
        .literals(
            FAREWELL,
            r"\b(bye|goodbye|exit|quit)\b",
            &["Goodbye!", "See you later!", "Bye!"],
        )
        .literals(
            "help",
            r"\bhelp\b",
            &["I can chat about simple topics, tell you the time or the date, \
               look up the weather (try 'weather in Rome') and draw graphs \
               (try 'create bar chart with data 3 5 2'). Type 'exit' to leave."],
        )
        .literals(
            "thanks",
            r"thank you|thanks",
            &["You're welcome!", "No problem!", "Anytime!"],
        )
        .literals(
            "weather",
            r"weather|temperature|forecast",
            &["I can check the weather for a place you name. \
               Try asking 'weather in <city>'."],
        )
        .literals(
            "graph",
            r"\b(graph|chart|plot)\b",
            &["I can draw line, bar or pie graphs from data you give me. \
               Try 'create line graph with data 1,2 2,4 3,8'."],
        )
        .rule(
            "time",
            r"\btime\b",
            vec![ResponseCandidate::producer(|| {
                format!("The current time is {}.", Local::now().format("%H:%M:%S"))
            })],
        )
        .rule(
            "date",
            r"\b(date|today)\b",
            vec![ResponseCandidate::producer(|| {
                format!("Today is {}.", Local::now().format("%A, %B %-d, %Y"))
            })],
        )
        .literals(
            "creator",
            r"who (are|made) you",
            &["I'm a simple chatbot created as a demo."],
        )
        .fallback(&FALLBACK_REPLIES)
        .build()
}
