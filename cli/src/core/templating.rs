//! # SimpleBot Template Rendering
//!
//! File: cli/src/core/templating.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Thin wrapper around the Tera engine for rendering a single in-memory
//! template against a serializable context. Graph artifacts are produced this
//! way.
//!
//! Templates whose name ends in one of the autoescape suffixes
//! (`.svg`, `.html`, `.xml`) have every interpolated value escaped, so
//! user-supplied text (graph titles, axis labels) cannot break the markup.
//!
use crate::core::error::{ChatbotError, Result};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

const AUTOESCAPE_SUFFIXES: [&str; 3] = [".svg", ".html", ".xml"];

/// Renders `source` (registered as `name`) with the fields of `data`.
pub fn render_template<T: Serialize>(name: &str, source: &str, data: &T) -> Result<String> {
    let mut tera = Tera::default();
    tera.autoescape_on(AUTOESCAPE_SUFFIXES.to_vec());
    tera.add_raw_template(name, source)
        .map_err(|source| ChatbotError::Template { source })?;

    let context = Context::from_serialize(data).map_err(|source| ChatbotError::Template { source })?;
    let rendered = tera
        .render(name, &context)
        .map_err(|source| ChatbotError::Template { source })?;
    debug!("Rendered template '{}' ({} bytes)", name, rendered.len());
    Ok(rendered)
}
