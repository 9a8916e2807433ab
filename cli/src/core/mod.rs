//! # SimpleBot Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components used by the
//! dispatcher, the delegation adapters and the command handlers:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and error handling utilities
//! - `templating`: Template rendering for generated artifacts
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{ChatbotError, Result}; // For error handling
//! use crate::core::templating; // For rendering graph artifacts
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
