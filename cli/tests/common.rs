//! # SimpleBot CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every test runs
//! the compiled `simplebot` binary against an isolated configuration file in
//! a temporary directory, so user or project configuration on the machine
//! running the tests cannot change the results.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Replies the built-in farewell rule can produce.
pub const FAREWELLS: [&str; 3] = ["Goodbye!", "See you later!", "Bye!"];

/// Replies the built-in fallback pool can produce.
pub const FALLBACKS: [&str; 4] = [
    "I'm not sure I understand.",
    "Could you rephrase that?",
    "Interesting. Tell me more.",
    "I don't have a response for that yet.",
];

/// # Get SimpleBot Command (`simplebot_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `simplebot` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn simplebot_cmd() -> Command {
    Command::cargo_bin("simplebot").expect("Failed to find simplebot binary for testing")
}

/// A temporary workspace holding a config file and a graph output directory.
pub struct Sandbox {
    pub dir: TempDir,
    pub config: PathBuf,
}

impl Sandbox {
    /// Creates a sandbox whose config contains `toml`.
    pub fn with_config(toml: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = dir.path().join("simplebot.toml");
        fs::write(&config, toml).expect("Failed to write test config");
        Self { dir, config }
    }

    /// Weather disabled (no network in tests), graphs written into the sandbox.
    pub fn offline() -> Self {
        let sandbox = Self::with_config("[weather]\nenabled = false\n");
        fs::create_dir_all(sandbox.graph_dir()).expect("Failed to create graph dir");
        sandbox
    }

    pub fn graph_dir(&self) -> PathBuf {
        self.dir.path().join("graphs")
    }

    /// A command that runs inside the sandbox with its config and graph directory.
    pub fn cmd(&self, subcommand: &str) -> Command {
        let mut cmd = simplebot_cmd();
        cmd.current_dir(self.dir.path())
            .env("SIMPLEBOT_CONFIG", &self.config)
            .env_remove("RUST_LOG")
            .arg(subcommand)
            .arg("--graph-dir")
            .arg(self.graph_dir());
        cmd
    }
}

/// Lists the files written to `dir`.
pub fn files_in(dir: &Path) -> Vec<PathBuf> {
    match fs::read_dir(dir) {
        Ok(entries) => entries.filter_map(|e| e.ok().map(|e| e.path())).collect(),
        Err(_) => Vec::new(),
    }
}
