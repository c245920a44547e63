//! # CyberChat Chat API
//!
//! File: cli/src/common/api/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Wire schema for the chat endpoint served by `cyberchat srv`, shared by the
//! server handlers and the `client` submodule.
//!
//! ```text
//! POST /api/chat     {"message": "what is phishing?"}
//!                 -> {"reply": "...", "matched_keyword": "phishing", "timestamp": "2025-01-01T12:00:00Z"}
//! GET  /api/health -> {"status": "ok", "triggers": 9}
//! ```
//!
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// HTTP client for a running `cyberchat srv` instance.
pub mod client;

pub use client::ApiClient;

/// Path of the chat endpoint.
pub const CHAT_PATH: &str = "/api/chat";
/// Path of the health endpoint.
pub const HEALTH_PATH: &str = "/api/health";

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    /// Keyword that selected the reply; `None` when the default response was used.
    pub matched_keyword: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    /// Number of keyword triggers in the served table (the default is not counted).
    pub triggers: usize,
}
