//! # CyberChat Common Utilities
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared building blocks used by more than one command:
//! - `api`: the chat endpoint's wire schema and the HTTP client for it
//!

/// Chat API schema (`ChatRequest`, `ChatReply`, `HealthStatus`) and `ApiClient`.
pub mod api;
