//! # CyberChat Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the CyberChat CLI. Each
//! command defines its own arguments struct and an async handler that takes
//! those arguments plus the loaded configuration.
//!
//! ## Commands
//!
//! - `ask`: Answer one message and exit
//! - `chat`: Interactive chat session
//! - `triggers`: Show the effective trigger table
//! - `srv`: Serve the demo site and the chat API
//!

/// One-shot question (`cyberchat ask`).
pub mod ask;
/// Interactive REPL (`cyberchat chat`).
pub mod chat;
/// Local-or-remote reply source shared by `ask` and `chat`.
pub mod reply;
/// Demo site and chat API server (`cyberchat srv`).
pub mod srv;
/// Trigger table listing (`cyberchat triggers`).
pub mod triggers;
