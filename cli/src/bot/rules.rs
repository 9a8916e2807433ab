//! # Rule Table
//!
//! File: cli/src/bot/rules.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The rule table is an ordered list of `(matcher, response pool)` bindings.
//! Declaration order is precedence: `first_match` returns the earliest rule
//! whose pattern occurs in the input, even when a later rule would match more
//! specifically. The order is fixed by the builder and never changes at
//! runtime.
//!
//! A reserved `fallback` pool answers inputs that match nothing.
//!
//! ## Examples
//!
//! ```rust,ignore
//! let table = RuleTable::builder()
//!     .literals("greeting", r"\b(hi|hello)\b", &["Hello!", "Hi there!"])
//!     .literals("weather", r"weather in (.+)", &["I'll check the weather in {0} for you."])
//!     .fallback(&["I'm not sure I understand."])
//!     .build()?;
//! ```
//!
use crate::bot::matcher::{CapturedArgs, Matcher, NormalizedInput};
use crate::bot::responses::{ResponseCandidate, ResponsePool};
use crate::core::error::ChatbotError;
use rand::Rng;

/// Identity of the pool used when no rule matches.
pub const FALLBACK: &str = "fallback";

/// One pattern-to-pool binding.
#[derive(Debug, Clone)]
pub struct Rule {
    id: String,
    matcher: Matcher,
}

impl Rule {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pattern(&self) -> &str {
        self.matcher.pattern()
    }
}

/// The ordered, immutable table consulted by the generic stage.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    responses: ResponsePool,
}

impl RuleTable {
    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::default()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn responses(&self) -> &ResponsePool {
        &self.responses
    }

    /// Returns the earliest rule that matches, with its captured groups.
    pub fn first_match(&self, input: &NormalizedInput) -> Option<(&Rule, CapturedArgs)> {
        self.rules
            .iter()
            .find_map(|rule| rule.matcher.captures(input).map(|args| (rule, args)))
    }

    /// Renders a random candidate from `rule`'s pool.
    pub fn reply<R: Rng + ?Sized>(
        &self,
        rule: &str,
        args: &CapturedArgs,
        rng: &mut R,
    ) -> Option<String> {
        self.responses.reply(rule, args, rng)
    }

    /// Renders a random fallback reply. The builder guarantees the pool exists.
    pub fn fallback_reply<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.responses
            .reply(FALLBACK, &CapturedArgs::default(), rng)
            .unwrap_or_default()
    }
}

/// Collects rule declarations in order and validates them all at once.
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    entries: Vec<(String, String, Vec<ResponseCandidate>)>,
    fallback: Vec<ResponseCandidate>,
}

impl RuleTableBuilder {
    /// Appends a rule with an arbitrary mix of literal and producer candidates.
    pub fn rule(
        mut self,
        id: impl Into<String>,
        pattern: impl Into<String>,
        candidates: Vec<ResponseCandidate>,
    ) -> Self {
        self.entries.push((id.into(), pattern.into(), candidates));
        self
    }

    /// Appends a rule whose candidates are all literal templates.
    pub fn literals<S: AsRef<str>>(
        self,
        id: impl Into<String>,
        pattern: impl Into<String>,
        texts: &[S],
    ) -> Self {
        let candidates = texts
            .iter()
            .map(|text| ResponseCandidate::literal(text.as_ref()))
            .collect();
        self.rule(id, pattern, candidates)
    }

    pub fn fallback<S: AsRef<str>>(mut self, texts: &[S]) -> Self {
        self.fallback = texts
            .iter()
            .map(|text| ResponseCandidate::literal(text.as_ref()))
            .collect();
        self
    }

    /// Compiles every pattern and fills the response pool.
    ///
    /// Fails on the first malformed pattern, empty pool or repeated rule id.
    pub fn build(self) -> Result<RuleTable, ChatbotError> {
        let mut responses = ResponsePool::default();
        responses.insert(FALLBACK, self.fallback)?;

        let mut rules = Vec::with_capacity(self.entries.len());
        for (id, pattern, candidates) in self.entries {
            let matcher = Matcher::new(&id, &pattern)?;
            responses.insert(&id, candidates)?;
            rules.push(Rule { id, matcher });
        }
        Ok(RuleTable { rules, responses })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    fn table() -> RuleTable {
        RuleTable::builder()
            .literals("greeting", r"\b(hi|hello)\b", &["Hello!"])
            .literals("wellbeing", r"how are you", &["I'm good."])
            .literals("weather", r"weather in (.+)", &["I'll check the weather in {0} for you."])
            .fallback(&["Could you rephrase that?"])
            .build()
            .unwrap()
    }

    #[test]
    fn first_match_wins_over_later_rules() {
        let table = table();
        let input = NormalizedInput::new("Hello, how are you?");
        let (rule, _) = table.first_match(&input).unwrap();
        assert_eq!(rule.id(), "greeting");
    }

    #[test]
    fn later_rule_matches_when_earlier_do_not() {
        let table = table();
        let input = NormalizedInput::new("so how are you");
        let (rule, _) = table.first_match(&input).unwrap();
        assert_eq!(rule.id(), "wellbeing");
    }

    #[test]
    fn template_reply_uses_captures() {
        let table = table();
        let input = NormalizedInput::new("weather in Paris");
        let (rule, args) = table.first_match(&input).unwrap();
        let reply = table.reply(rule.id(), &args, &mut thread_rng()).unwrap();
        assert_eq!(reply, "I'll check the weather in Paris for you.");
    }

    #[test]
    fn fallback_when_nothing_matches() {
        let table = table();
        assert!(table.first_match(&NormalizedInput::new("xyzzy")).is_none());
        assert_eq!(
            table.fallback_reply(&mut thread_rng()),
            "Could you rephrase that?"
        );
    }

    #[test]
    fn declaration_order_is_kept() {
        let ids: Vec<_> = table().rules().iter().map(|r| r.id().to_string()).collect();
        assert_eq!(ids, ["greeting", "wellbeing", "weather"]);
    }

    #[test]
    fn build_rejects_bad_tables() {
        let bad_pattern = RuleTable::builder()
            .literals("broken", r"(", &["x"])
            .fallback(&["?"])
            .build();
        assert!(matches!(bad_pattern, Err(ChatbotError::InvalidPattern { .. })));

        let no_fallback = RuleTable::builder().literals("a", "a", &["x"]).build();
        assert!(matches!(no_fallback, Err(ChatbotError::EmptyPool { ref rule }) if rule == FALLBACK));

        let duplicate = RuleTable::builder()
            .literals("a", "a", &["x"])
            .literals("a", "b", &["y"])
            .fallback(&["?"])
            .build();
        assert!(matches!(duplicate, Err(ChatbotError::DuplicateRule { .. })));
    }
}
