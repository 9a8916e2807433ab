//! # Session Loop
//!
//! File: cli/src/bot/session.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A single-threaded read-eval-print loop. Each turn reads one line, hands it
//! to the resolver, prints the reply and then either continues or stops:
//! - a termination phrase stops the loop after its farewell reply;
//! - end of input stops the loop silently, without a reply;
//! - a line that is not valid UTF-8 gets a short complaint and the loop goes on.
//!
//! The loop is generic over its reader and writer so it can run against
//! stdin/stdout or in-memory buffers.
//!
use crate::bot::resolver::Resolver;
use crate::core::error::Result;
use anyhow::Context;
use std::io::{BufRead, ErrorKind, Write};
use tracing::{debug, info};

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Farewell,
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Number of replies printed.
    pub turns: usize,
    pub ended_by: SessionEnd,
}

pub struct Session<'a, R, W> {
    resolver: &'a Resolver,
    bot_name: &'a str,
    show_prompt: bool,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(resolver: &'a Resolver, bot_name: &'a str, input: R, output: W) -> Self {
        Self {
            resolver,
            bot_name,
            show_prompt: true,
            input,
            output,
        }
    }

    /// Controls the `You: ` prompt printed before each read.
    pub fn show_prompt(mut self, show: bool) -> Self {
        self.show_prompt = show;
        self
    }

    /// Runs until a termination phrase or end of input.
    pub fn run(mut self) -> Result<SessionSummary> {
        writeln!(
            self.output,
            "{name}: Hello! I'm {name}. Type 'exit' or 'quit' to end our conversation.",
            name = self.bot_name
        )
        .context("Failed to write to output")?;

        let mut turns = 0;
        loop {
            if self.show_prompt {
                write!(self.output, "You: ").context("Failed to write prompt")?;
                self.output.flush().context("Failed to flush output")?;
            }

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    info!("Input closed after {} turns", turns);
                    if self.show_prompt {
                        writeln!(self.output).context("Failed to write to output")?;
                    }
                    return Ok(SessionSummary {
                        turns,
                        ended_by: SessionEnd::EndOfInput,
                    });
                }
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    debug!("Skipping unreadable line: {}", e);
                    writeln!(self.output, "{}: I didn't understand that.", self.bot_name)
                        .context("Failed to write to output")?;
                    turns += 1;
                    continue;
                }
                Err(e) => return Err(e).context("Failed to read input"),
            }

            let reply = self.resolver.respond(&line);
            writeln!(self.output, "{}: {}", self.bot_name, reply.text)
                .context("Failed to write reply")?;
            turns += 1;

            if reply.ends_session() {
                info!("Session ended by farewell after {} turns", turns);
                self.output.flush().context("Failed to flush output")?;
                return Ok(SessionSummary {
                    turns,
                    ended_by: SessionEnd::Farewell,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegation::Delegates;
    use std::io::Cursor;

    fn resolver() -> Resolver {
        Resolver::with_builtin_rules("Rusty", &[], Delegates::none()).unwrap()
    }

    fn run(input: &[u8], show_prompt: bool) -> (SessionSummary, String) {
        let resolver = resolver();
        let mut output = Vec::new();
        let summary = Session::new(&resolver, "Rusty", Cursor::new(input.to_vec()), &mut output)
            .show_prompt(show_prompt)
            .run()
            .unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    #[test]
    fn farewell_ends_after_one_reply() {
        let (summary, out) = run(b"thanks\nQUIT\nhello\n", false);
        assert_eq!(summary.ended_by, SessionEnd::Farewell);
        assert_eq!(summary.turns, 2);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3); // banner + two replies
        assert!(lines[0].starts_with("Rusty: Hello! I'm Rusty."));
        assert!(["Goodbye!", "See you later!", "Bye!"]
            .iter()
            .any(|f| lines[2] == format!("Rusty: {}", f)));
    }

    #[test]
    fn end_of_input_ends_silently() {
        let (summary, out) = run(b"hello\n", false);
        assert_eq!(summary.ended_by, SessionEnd::EndOfInput);
        assert_eq!(summary.turns, 1);
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn last_line_without_newline_is_answered() {
        let (summary, out) = run(b"how are you", false);
        assert_eq!(summary.turns, 1);
        assert!(out.contains("Rusty: I'm"));
    }

    #[test]
    fn prompt_is_printed_before_each_read() {
        let (_, out) = run(b"hi\nexit\n", true);
        assert_eq!(out.matches("You: ").count(), 2);
    }

    #[test]
    fn invalid_utf8_gets_a_complaint() {
        let (summary, out) = run(b"\xff\xfe\nbye\n", false);
        assert!(out.contains("Rusty: I didn't understand that."));
        assert_eq!(summary.ended_by, SessionEnd::Farewell);
    }

    #[test]
    fn empty_line_still_gets_a_reply() {
        let (summary, out) = run(b"\n", false);
        assert_eq!(summary.turns, 1);
        let reply = out.lines().nth(1).unwrap();
        assert!(reply.len() > "Rusty: ".len());
    }
}
