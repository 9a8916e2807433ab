//! # Input Normalization and Pattern Matching
//!
//! File: cli/src/bot/matcher.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A `Matcher` wraps one compiled regular expression. Matching is a substring
//! search (the pattern does not have to cover the whole line) and is
//! case-insensitive, so it behaves as if the input had been lower-cased while
//! the captured groups keep the casing the user typed.
//!
//! Normalization happens once per line in `NormalizedInput`, not inside each
//! matcher.
//!
use crate::core::error::ChatbotError;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// One input line, trimmed once and lower-cased once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInput {
    text: String,
    folded: String,
}

impl NormalizedInput {
    pub fn new(raw: &str) -> Self {
        let text = raw.trim().to_string();
        let folded = text.to_lowercase();
        Self { text, folded }
    }

    /// The trimmed input with its original casing.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The trimmed, lower-cased input.
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

/// Ordered capture groups from a successful match.
///
/// Groups are kept exactly as captured. Groups that did not take part in the
/// match are kept as empty strings so positions stay stable for `{N}`
/// placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedArgs(Vec<String>);

impl CapturedArgs {
    pub fn new(groups: Vec<String>) -> Self {
        Self(groups)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A compiled, immutable pattern.
#[derive(Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    /// Compiles `pattern` for the rule named `rule`.
    ///
    /// Malformed patterns fail here, when the table is built, never on first use.
    pub fn new(rule: &str, pattern: &str) -> Result<Self, ChatbotError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| ChatbotError::InvalidPattern {
                rule: rule.to_string(),
                source,
            })?;
        Ok(Self { regex })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the captured groups when the pattern occurs anywhere in `input`.
    pub fn captures(&self, input: &NormalizedInput) -> Option<CapturedArgs> {
        let caps = self.regex.captures(input.text())?;
        let groups = caps
            .iter()
            .skip(1)
            .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
            .collect();
        Some(CapturedArgs::new(groups))
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matcher").field(&self.pattern()).finish()
    }
}
