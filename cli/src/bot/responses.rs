//! # Response Pool
//!
//! File: cli/src/bot/responses.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Every rule owns a pool of one or more `ResponseCandidate`s. When a rule
//! wins, one candidate is picked uniformly at random and rendered:
//! - `Literal` text has `{0}`, `{1}`, ... replaced by the captured groups.
//! - `Producer` closures are called with no arguments at reply time, so
//!   clock-based replies always reflect the moment of the call.
//!
//! The pool is built once at startup and only read afterwards.
//!
use crate::bot::matcher::CapturedArgs;
use crate::core::error::ChatbotError;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Zero-argument reply generator.
pub type Producer = Arc<dyn Fn() -> String + Send + Sync>;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\d+)\}").expect("placeholder pattern is valid"));

/// One possible reply for a rule.
#[derive(Clone)]
pub enum ResponseCandidate {
    Literal(String),
    Producer(Producer),
}

impl ResponseCandidate {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn producer<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::Producer(Arc::new(f))
    }

    /// Produces the reply text for this candidate.
    pub fn render(&self, args: &CapturedArgs) -> String {
        match self {
            Self::Literal(text) => substitute(text, args),
            Self::Producer(produce) => produce(),
        }
    }
}

impl fmt::Debug for ResponseCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

impl From<&str> for ResponseCandidate {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for ResponseCandidate {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

/// Replaces positional placeholders with captured groups.
///
/// Placeholders without a matching group are left untouched.
pub fn substitute(template: &str, args: &CapturedArgs) -> String {
    if args.is_empty() {
        return template.to_string();
    }
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
                .map_or_else(|| caps[0].to_string(), str::to_string)
        })
        .into_owned()
}

/// Immutable mapping from rule identity to its candidate replies.
#[derive(Debug, Clone, Default)]
pub struct ResponsePool {
    pools: HashMap<String, Vec<ResponseCandidate>>,
}

impl ResponsePool {
    /// Registers the candidates for `rule`. Empty pools and repeated ids are rejected.
    pub(crate) fn insert(
        &mut self,
        rule: &str,
        candidates: Vec<ResponseCandidate>,
    ) -> Result<(), ChatbotError> {
        if candidates.is_empty() {
            return Err(ChatbotError::EmptyPool {
                rule: rule.to_string(),
            });
        }
        if self.pools.contains_key(rule) {
            return Err(ChatbotError::DuplicateRule {
                rule: rule.to_string(),
            });
        }
        self.pools.insert(rule.to_string(), candidates);
        Ok(())
    }

    pub fn get(&self, rule: &str) -> Option<&[ResponseCandidate]> {
        self.pools.get(rule).map(Vec::as_slice)
    }

    pub fn contains(&self, rule: &str) -> bool {
        self.pools.contains_key(rule)
    }

    /// Picks one candidate of `rule` uniformly at random and renders it.
    pub fn reply<R: Rng + ?Sized>(
        &self,
        rule: &str,
        args: &CapturedArgs,
        rng: &mut R,
    ) -> Option<String> {
        self.get(rule)
            .and_then(|candidates| candidates.choose(rng))
            .map(|candidate| candidate.render(args))
    }
}
