//! # SimpleBot Dispatcher
//!
//! File: cli/src/bot/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The conversational command dispatcher, leaf-first:
//! - `matcher`: input normalization and compiled patterns
//! - `responses`: literal and producer replies, grouped per rule
//! - `rules`: the ordered rule table (first match wins)
//! - `catalog`: the built-in rules, delegation patterns and termination phrases
//! - `resolver`: the three-stage intent resolver
//! - `session`: the read-eval-print loop
//!
//! ## Control Flow
//!
//! ```text
//! Session -> Resolver -> { termination | delegation adapters | rule table }
//!         <- reply text <-
//! ```
//!
//! Everything except the per-line `CapturedArgs` and `DelegationRequest` is
//! built once at startup and only read afterwards.
//!
pub mod catalog;
pub mod matcher;
pub mod resolver;
pub mod responses;
pub mod rules;
pub mod session;

pub use resolver::{ReplySource, Resolver};
pub use session::{Session, SessionEnd};
