//! # SimpleBot Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the SimpleBot CLI. Each
//! command defines its own arguments structure and a handler function that
//! `main.rs` routes to.
//!
//! ## Commands
//!
//! - `chat`: Interactive session on stdin/stdout
//! - `ask`: Resolve one message and print the reply
//! - `rules`: Show the rules in precedence order
//!
//! `options` holds the bot options shared by all three and the startup
//! sequence that builds the resolver.
//!

/// Single-message resolution.
pub mod ask;
/// Interactive read-eval-print session.
pub mod chat;
/// Shared options and bot assembly.
pub mod options;
/// Rule table listing.
pub mod rules;
