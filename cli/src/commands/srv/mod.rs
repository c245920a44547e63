//! # CyberChat Demo Site Server
//!
//! File: cli/src/commands/srv/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `cyberchat srv` serves the cybersecurity demo site's static files and the
//! JSON chat endpoint its chat widget calls. The endpoint is answered by the
//! same keyword responder used by `ask` and `chat`.
//!
//! ## Architecture
//!
//! - `config.rs`: Merges command-line arguments with the `[server]` configuration
//! - `server_logic.rs`: Axum router, handlers, port selection and shutdown
//!
//! ## Examples
//!
//! ```bash
//! # Serve ./site with the chat API on the default port
//! cyberchat srv ./site
//!
//! # Chat API only, custom port, no CORS
//! cyberchat srv --api-only --port 9000 --no-cors
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::responder::KeywordResponder;
use std::sync::Arc;
use tracing::info;

pub use config::SrvArgs;

/// Merges command-line arguments and configuration for the server.
pub mod config;

/// Contains the Axum-based HTTP server implementation.
pub mod server_logic;

/// # Handle Server Command (`handle_srv`)
///
/// Builds the trigger table and server configuration, then runs the server
/// until it is shut down.
pub async fn handle_srv(args: SrvArgs, config: &Config) -> Result<()> {
    info!("Handling srv command with args: {:?}", args);

    let responder = KeywordResponder::new(Arc::new(config.trigger_table()?));
    let server_config = config::build_server_config(args, config).await?;
    info!("Effective server config: {:?}", server_config);

    server_logic::run_server(server_config, responder).await
}
