//! # SimpleBot Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout SimpleBot. It follows a
//! two-level approach:
//! - `ChatbotError`: A custom error enum using `thiserror` for the specific
//!   failures the dispatcher and its adapters can report.
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible propagation
//!   with added context.
//!
//! ## Error Classes
//!
//! - Construction errors (bad configuration, invalid rule patterns, empty or
//!   duplicate rules) are fatal and are raised before any input is processed.
//! - Delegation errors (weather, graph) are recoverable: the resolver turns
//!   them into an apology reply and the session keeps going.
//! - A missing match is *not* an error; it is answered from the fallback pool.
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Return a specific error type
//! if responses.is_empty() {
//!     return Err(ChatbotError::EmptyPool { rule: id.to_string() })?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the SimpleBot application.
#[derive(Error, Debug)]
pub enum ChatbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pattern for rule '{rule}': {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("Rule '{rule}' has no candidate responses.")]
    EmptyPool { rule: String },

    #[error("Rule '{rule}' is declared more than once.")]
    DuplicateRule { rule: String },

    #[error("The rule table has no '{rule}' rule to answer termination phrases.")]
    MissingTerminationPool { rule: String },

    #[error("Weather lookup failed: {0}")]
    Weather(String),

    #[error("Graph creation failed: {0}")]
    Graph(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
