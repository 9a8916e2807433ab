//! # Graph Adapter
//!
//! File: cli/src/delegation/graph/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Creates graph artifacts from chat commands such as
//! `create bar chart with data jan:80 feb:62 title "Rainfall"`.
//!
//! - `parse`: command text -> `GraphSpec` (kind, points, title, axis labels)
//! - `render`: `GraphSpec` -> SVG document
//!
//! The adapter writes the SVG into its output directory and answers with the
//! path of the new file. Any parse, render or I/O problem is returned as an
//! error and turned into an apology by the resolver.
//!
use crate::core::error::{ChatbotError, Result};
use crate::delegation::{DelegationAdapter, DelegationRequest};
use anyhow::Context;
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub mod parse;
pub mod render;

pub use parse::GraphKind;

/// A graph file written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphArtifact {
    pub path: PathBuf,
    pub kind: GraphKind,
    pub points: usize,
}

pub struct GraphAdapter {
    output_dir: PathBuf,
}

impl GraphAdapter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Parses `command_text`, renders the graph and writes it to the output directory.
    pub fn create_graph(&self, command_text: &str) -> Result<GraphArtifact> {
        let spec = parse::parse_command(command_text)?;
        let svg = render::render_svg(&spec)?;

        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create graph output directory '{}'",
                self.output_dir.display()
            )
        })?;
        let path = self.next_artifact_path(spec.kind)?;
        fs::write(&path, svg)
            .with_context(|| format!("Failed to write graph file '{}'", path.display()))?;

        info!(
            "Created {} graph with {} points at {}",
            spec.kind,
            spec.points.len(),
            path.display()
        );
        Ok(GraphArtifact {
            path,
            kind: spec.kind,
            points: spec.points.len(),
        })
    }

    fn next_artifact_path(&self, kind: GraphKind) -> Result<PathBuf> {
        let stamp = Local::now().format("%Y%m%d%H%M%S%3f").to_string();
        for attempt in 0..100 {
            let name = if attempt == 0 {
                format!("{}_graph_{}.svg", kind, stamp)
            } else {
                format!("{}_graph_{}_{}.svg", kind, stamp, attempt)
            };
            let candidate = self.output_dir.join(name);
            if !candidate.exists() {
                return Ok(candidate);
            }
        }
        Err(ChatbotError::Graph(format!(
            "could not find a free file name in '{}'",
            self.output_dir.display()
        ))
        .into())
    }
}

impl DelegationAdapter for GraphAdapter {
    fn resolve(&self, request: &DelegationRequest) -> Result<String> {
        let artifact = self.create_graph(&request.original_input)?;
        Ok(format!(
            "I've created a {} graph with {} points: {}",
            artifact.kind,
            artifact.points,
            artifact.path.display()
        ))
    }
}
