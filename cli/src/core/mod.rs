//! # CyberChat Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the core components of CyberChat:
//! - `responder`: The trigger table and the keyword responder
//! - `conversation`: Conversation turns and the session transcript
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and error handling utilities
//!
//! Command handlers build a `TriggerTable` from the loaded configuration once,
//! wrap it in an `Arc`, and hand it to a `KeywordResponder`.
//!
//! ```rust
//! use crate::core::config;
//! use crate::core::error::Result;
//! use crate::core::responder::KeywordResponder;
//!
//! let cfg = config::load_config(None)?;
//! let responder = KeywordResponder::new(Arc::new(cfg.trigger_table()?));
//! ```
//!
pub mod config;
pub mod conversation;
pub mod error;
pub mod responder;
