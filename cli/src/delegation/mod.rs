//! # Delegation Adapters
//!
//! File: cli/src/delegation/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Some intents are not answered from the response pool but handed to an
//! external collaborator:
//! - `weather`: resolves a place name to a weather description over HTTP
//! - `graph`: turns a "create ... graph ... with data ..." command into an SVG file
//!
//! The resolver only knows the `DelegationAdapter` contract. Which adapters
//! exist is decided once at startup and recorded in `Delegates`; a missing
//! adapter means the capability is unavailable and its patterns fall through
//! to the generic rule table.
//!
use crate::core::error::Result;
use std::fmt;

pub mod graph;
pub mod weather;

pub use graph::GraphAdapter;
pub use weather::WeatherAdapter;

/// Intent categories that are resolved by an external collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Weather,
    Graph,
}

impl Capability {
    pub fn label(&self) -> &'static str {
        match self {
            Capability::Weather => "weather",
            Capability::Graph => "graph",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Built per input line when a delegation pattern matches; dropped after the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationRequest {
    pub capability: Capability,
    /// The argument extracted by the dispatcher's own pattern (place name, graph data).
    pub raw_argument: String,
    /// The trimmed input line with its original casing.
    pub original_input: String,
}

/// Contract every external collaborator is wrapped in.
pub trait DelegationAdapter {
    /// Resolves the request to reply text. Errors are rendered by the caller.
    fn resolve(&self, request: &DelegationRequest) -> Result<String>;
}

/// The adapters available to this process, fixed at startup.
#[derive(Default)]
pub struct Delegates {
    weather: Option<Box<dyn DelegationAdapter>>,
    graph: Option<Box<dyn DelegationAdapter>>,
}

impl Delegates {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_weather(mut self, adapter: impl DelegationAdapter + 'static) -> Self {
        self.weather = Some(Box::new(adapter));
        self
    }

    pub fn with_graph(mut self, adapter: impl DelegationAdapter + 'static) -> Self {
        self.graph = Some(Box::new(adapter));
        self
    }

    pub fn get(&self, capability: Capability) -> Option<&dyn DelegationAdapter> {
        match capability {
            Capability::Weather => self.weather.as_deref(),
            Capability::Graph => self.graph.as_deref(),
        }
    }

    pub fn is_available(&self, capability: Capability) -> bool {
        self.get(capability).is_some()
    }
}

impl fmt::Debug for Delegates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegates")
            .field("weather", &self.weather.is_some())
            .field("graph", &self.graph.is_some())
            .finish()
    }
}
