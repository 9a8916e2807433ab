//! # Intent Resolver
//!
//! File: cli/src/bot/resolver.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Turns one line of input into one reply. Three stages run in a fixed order
//! and the first stage that produces a reply wins:
//!
//! 1. **Termination**: the lower-cased, trimmed line is exactly one of the
//!    termination phrases. The reply comes from the farewell pool and the
//!    session ends after it. Nothing else is consulted.
//! 2. **Delegation**: the delegation patterns are tried in their own order.
//!    A match whose capability is available is handed to that adapter and
//!    the adapter's text (or an apology naming its error) is the reply. A
//!    match whose capability is unavailable is ignored here.
//! 3. **Generic**: the first rule of the table that matches wins; one of its
//!    candidates is picked at random and rendered. When nothing matches, a
//!    fallback reply is returned.
//!
//! Every line gets a non-empty reply. Delegation errors never escape.
//!
use crate::bot::catalog::{self, FAREWELL, TERMINATION_PHRASES};
use crate::bot::matcher::{CapturedArgs, Matcher, NormalizedInput};
use crate::bot::rules::RuleTable;
use crate::core::config::RuleConfig;
use crate::core::error::ChatbotError;
use crate::delegation::{Capability, DelegationRequest, Delegates};
use rand::thread_rng;
use tracing::{debug, warn};

/// A pattern whose matches are resolved by an external collaborator.
#[derive(Debug, Clone)]
pub struct DelegationRule {
    id: String,
    capability: Capability,
    matcher: Matcher,
}

impl DelegationRule {
    pub fn new(
        id: impl Into<String>,
        capability: Capability,
        pattern: &str,
    ) -> Result<Self, ChatbotError> {
        let id = id.into();
        let matcher = Matcher::new(&id, pattern)?;
        Ok(Self {
            id,
            capability,
            matcher,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn pattern(&self) -> &str {
        self.matcher.pattern()
    }

    fn request_for(&self, input: &NormalizedInput) -> Option<DelegationRequest> {
        let args: CapturedArgs = self.matcher.captures(input)?;
        Some(DelegationRequest {
            capability: self.capability,
            raw_argument: args.last().unwrap_or_default().trim().to_string(),
            original_input: input.text().to_string(),
        })
    }
}

/// Which stage produced a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplySource {
    Termination,
    Delegated(Capability),
    DelegationFailed(Capability),
    Rule(String),
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

impl Reply {
    /// True when the session must end after printing this reply.
    pub fn ends_session(&self) -> bool {
        self.source == ReplySource::Termination
    }
}

pub struct Resolver {
    table: RuleTable,
    delegation: Vec<DelegationRule>,
    delegates: Delegates,
}

impl Resolver {
    /// Assembles a resolver. The table must contain the farewell pool.
    pub fn new(
        table: RuleTable,
        delegation: Vec<DelegationRule>,
        delegates: Delegates,
    ) -> Result<Self, ChatbotError> {
        if !table.responses().contains(FAREWELL) {
            return Err(ChatbotError::MissingTerminationPool {
                rule: FAREWELL.to_string(),
            });
        }
        Ok(Self {
            table,
            delegation,
            delegates,
        })
    }

    /// Resolver over the built-in rules, with `custom` rules ahead of them.
    pub fn with_builtin_rules(
        bot_name: &str,
        custom: &[RuleConfig],
        delegates: Delegates,
    ) -> Result<Self, ChatbotError> {
        Self::new(
            catalog::generic_rules(bot_name, custom)?,
            catalog::delegation_rules()?,
            delegates,
        )
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn delegation_rules(&self) -> &[DelegationRule] {
        &self.delegation
    }

    pub fn is_available(&self, capability: Capability) -> bool {
        self.delegates.is_available(capability)
    }

    /// Resolves one raw input line.
    pub fn respond(&self, line: &str) -> Reply {
        let input = NormalizedInput::new(line);
        let mut rng = thread_rng();

        if TERMINATION_PHRASES.iter().any(|phrase| *phrase == input.folded()) {
            debug!("Termination phrase '{}'", input.folded());
            let text = self
                .table
                .reply(FAREWELL, &CapturedArgs::default(), &mut rng)
                .unwrap_or_default();
            return Reply {
                text,
                source: ReplySource::Termination,
            };
        }

        if let Some(reply) = self.delegate(&input) {
            return reply;
        }

        if let Some((rule, args)) = self.table.first_match(&input) {
            debug!("Rule '{}' matched with args {:?}", rule.id(), args);
            if let Some(text) = self.table.reply(rule.id(), &args, &mut rng) {
                return Reply {
                    text,
                    source: ReplySource::Rule(rule.id().to_string()),
                };
            }
        }

        debug!("No rule matched; using fallback");
        Reply {
            text: self.table.fallback_reply(&mut rng),
            source: ReplySource::Fallback,
        }
    }

    fn delegate(&self, input: &NormalizedInput) -> Option<Reply> {
        for rule in &self.delegation {
            let Some(adapter) = self.delegates.get(rule.capability) else {
                continue;
            };
            let Some(request) = rule.request_for(input) else {
                continue;
            };
            debug!(
                "Delegation rule '{}' matched; forwarding '{}' to the {} adapter",
                rule.id, request.raw_argument, rule.capability
            );
            return Some(match adapter.resolve(&request) {
                Ok(text) => Reply {
                    text,
                    source: ReplySource::Delegated(rule.capability),
                },
                Err(e) => {
                    warn!("The {} adapter failed: {:#}", rule.capability, e);
                    Reply {
                        text: format!(
                            "Sorry, I couldn't complete that {} request: {:#}",
                            rule.capability, e
                        ),
                        source: ReplySource::DelegationFailed(rule.capability),
                    }
                }
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use crate::delegation::DelegationAdapter;
    use anyhow::anyhow;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::thread;
    use std::time::Duration;

    struct FakeWeather;

    impl DelegationAdapter for FakeWeather {
        fn resolve(&self, request: &DelegationRequest) -> Result<String> {
            Ok(format!("Sunny in {}", request.raw_argument))
        }
    }

    struct Failing;

    impl DelegationAdapter for Failing {
        fn resolve(&self, _request: &DelegationRequest) -> Result<String> {
            Err(anyhow!(ChatbotError::Weather("boom".into())))
        }
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<DelegationRequest>>>);

    impl DelegationAdapter for Recorder {
        fn resolve(&self, request: &DelegationRequest) -> Result<String> {
            self.0.borrow_mut().push(request.clone());
            Ok("recorded".into())
        }
    }

    fn resolver(delegates: Delegates) -> Resolver {
        Resolver::with_builtin_rules("SimpleBot", &[], delegates).unwrap()
    }

    fn farewell_texts(resolver: &Resolver) -> Vec<String> {
        resolver
            .table()
            .responses()
            .get(FAREWELL)
            .unwrap()
            .iter()
            .map(|c| c.render(&CapturedArgs::default()))
            .collect()
    }

    #[test]
    fn termination_phrases_end_the_session() {
        let resolver = resolver(Delegates::none());
        let farewells = farewell_texts(&resolver);
        for phrase in ["exit", "QUIT", "  Bye  ", "GoodBye\n"] {
            let reply = resolver.respond(phrase);
            assert!(reply.ends_session(), "'{}' should terminate", phrase);
            assert!(farewells.contains(&reply.text));
        }
    }

    #[test]
    fn farewell_inside_a_sentence_does_not_terminate() {
        let reply = resolver(Delegates::none()).respond("ok bye then");
        assert!(!reply.ends_session());
        assert_eq!(reply.source, ReplySource::Rule(FAREWELL.into()));
    }

    #[test]
    fn available_weather_is_delegated() {
        let resolver = resolver(Delegates::none().with_weather(FakeWeather));
        let reply = resolver.respond("weather in Rome");
        assert_eq!(reply.source, ReplySource::Delegated(Capability::Weather));
        assert_eq!(reply.text, "Sunny in Rome");

        let reply = resolver.respond("What's the weather forecast for New York?");
        assert_eq!(reply.text, "Sunny in New York");

        let reply = resolver.respond("temperature in Cagliari");
        assert_eq!(reply.text, "Sunny in Cagliari");
    }

    #[test]
    fn unavailable_weather_falls_through_to_generic_rule() {
        let reply = resolver(Delegates::none()).respond("weather in Rome");
        assert_eq!(reply.source, ReplySource::Rule("weather".into()));
        assert!(reply.text.starts_with("I can check the weather"));
    }

    #[test]
    fn delegation_runs_before_generic_table_order() {
        let custom = vec![RuleConfig {
            name: "early_weather".into(),
            pattern: "weather".into(),
            responses: vec!["generic".into()],
        }];
        let resolver = Resolver::with_builtin_rules(
            "SimpleBot",
            &custom,
            Delegates::none().with_weather(FakeWeather),
        )
        .unwrap();
        assert_eq!(resolver.respond("weather in Rome").text, "Sunny in Rome");
        assert_eq!(resolver.respond("nice weather").text, "generic");
    }

    #[test]
    fn adapter_errors_become_apologies() {
        let resolver = resolver(Delegates::none().with_weather(Failing));
        let reply = resolver.respond("weather in Rome");
        assert_eq!(
            reply.source,
            ReplySource::DelegationFailed(Capability::Weather)
        );
        assert_eq!(
            reply.text,
            "Sorry, I couldn't complete that weather request: Weather lookup failed: boom"
        );
        assert!(!reply.ends_session());
    }

    #[test]
    fn graph_request_carries_data_and_original_input() {
        let recorder = Recorder::default();
        let resolver = resolver(Delegates::none().with_graph(recorder.clone()));

        let reply = resolver.respond("  Create a BAR chart titled 'Sales' with data Q1:3 Q2:5 ");
        assert_eq!(reply.source, ReplySource::Delegated(Capability::Graph));

        let requests = recorder.0.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].capability, Capability::Graph);
        assert_eq!(requests[0].raw_argument, "Q1:3 Q2:5");
        assert_eq!(
            requests[0].original_input,
            "Create a BAR chart titled 'Sales' with data Q1:3 Q2:5"
        );
    }

    #[test]
    fn unavailable_graph_falls_through() {
        let reply = resolver(Delegates::none()).respond("create line graph with data 1 2 3");
        assert_eq!(reply.source, ReplySource::Rule("graph".into()));
    }

    #[test]
    fn placeholder_substitution_keeps_captured_case() {
        let table = RuleTable::builder()
            .literals(
                "weather_template",
                r"weather in (.+)",
                &["I'll check the weather in {0} for you."],
            )
            .literals(FAREWELL, r"\bbye\b", &["Bye!"])
            .fallback(&["?"])
            .build()
            .unwrap();
        let resolver = Resolver::new(table, vec![], Delegates::none()).unwrap();

        let reply = resolver.respond("weather in Paris");
        assert_eq!(reply.text, "I'll check the weather in Paris for you.");
        assert_eq!(reply.text.matches("Paris").count(), 1);
    }

    #[test]
    fn generic_captures_are_substituted_verbatim() {
        let custom = vec![RuleConfig {
            name: "echo".into(),
            pattern: r"say:(.*)".into(),
            responses: vec!["[{0}]".into()],
        }];
        let resolver =
            Resolver::with_builtin_rules("SimpleBot", &custom, Delegates::none()).unwrap();
        assert_eq!(resolver.respond("say:  two  spaces").text, "[  two  spaces]");
    }

    #[test]
    fn delegation_argument_is_trimmed() {
        let recorder = Recorder::default();
        let table = RuleTable::builder()
            .literals(FAREWELL, r"\bbye\b", &["Bye!"])
            .fallback(&["?"])
            .build()
            .unwrap();
        let delegation =
            vec![DelegationRule::new("forecast", Capability::Weather, r"forecast:(.*)").unwrap()];
        let resolver = Resolver::new(
            table,
            delegation,
            Delegates::none().with_weather(recorder.clone()),
        )
        .unwrap();

        resolver.respond("forecast:   Oslo   now");
        assert_eq!(recorder.0.borrow()[0].raw_argument, "Oslo   now");
    }

    #[test]
    fn introduction_template_uses_capture() {
        let reply = resolver(Delegates::none()).respond("My name is Ada");
        assert!(reply.text.contains("Ada"), "got '{}'", reply.text);
    }

    #[test]
    fn time_replies_are_computed_per_call() {
        let resolver = resolver(Delegates::none());
        let first = resolver.respond("what time is it");
        thread::sleep(Duration::from_millis(1100));
        let second = resolver.respond("what time is it");
        assert_eq!(first.source, ReplySource::Rule("time".into()));
        assert!(first.text.starts_with("The current time is "));
        assert_ne!(first.text, second.text);
    }

    #[test]
    fn unmatched_input_gets_fallback() {
        let resolver = resolver(Delegates::none());
        for input in ["xyzzy", "", "   ", "12345"] {
            let reply = resolver.respond(input);
            assert_eq!(reply.source, ReplySource::Fallback);
            assert!(!reply.text.is_empty());
        }
    }

    #[test]
    fn table_without_farewell_is_rejected() {
        let table = RuleTable::builder()
            .literals("greeting", "hi", &["Hi"])
            .fallback(&["?"])
            .build()
            .unwrap();
        assert!(matches!(
            Resolver::new(table, vec![], Delegates::none()),
            Err(ChatbotError::MissingTerminationPool { .. })
        ));
    }
}
