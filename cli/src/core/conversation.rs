//! # CyberChat Conversation Turns
//!
//! File: cli/src/core/conversation.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A `ConversationTurn` records one user submission and the reply it got.
//! Turns belong to whichever front end created them (the `chat` REPL or the
//! HTTP handler); the responder never sees or stores them.
//!
//! `Transcript` is the REPL's in-memory list of turns. It lives for one
//! session and is dropped when the session ends.
//!
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One user input, the reply it received, and when it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationTurn {
    pub input: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Creates a turn stamped with the current time.
    pub fn new(input: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            response: response.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Session-scoped list of turns, oldest first.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Renders the transcript for display, one `[HH:MM:SS]` stamped exchange per turn.
    pub fn render(&self, bot_name: &str) -> String {
        if self.turns.is_empty() {
            return "(no messages yet)".to_string();
        }
        self.turns
            .iter()
            .map(|turn| {
                let time = turn.timestamp.format("%H:%M:%S");
                format!(
                    "[{}] You: {}\n[{}] {}: {}",
                    time, turn.input, time, bot_name, turn.response
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
