//! # CyberChat Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module turns `cyberchat srv` arguments and the `[server]` / `[chat]`
//! configuration sections into one validated `ServerConfig`:
//! 1. Command-line arguments (highest priority)
//! 2. The `[server]` section of the loaded configuration
//! 3. Default values (lowest priority)
//!
//! The static site directory is optional. With `--api-only` the server
//! exposes only the `/api` routes.
//!
//! ## Examples
//!
//! ```bash
//! # Serve ./site plus the chat API on port 9000
//! cyberchat srv ./site --port 9000
//!
//! # Chat API only, reachable from the network
//! cyberchat srv --api-only --host 0.0.0.0
//! ```
//!
use crate::core::config::Config;
use crate::core::error::{CyberchatError, Result};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::net::IpAddr;
use std::time::Duration;
use std::{env, path::PathBuf};
use tracing::debug;

/// # Server Command Arguments (`SrvArgs`)
///
/// Command-line arguments accepted by `cyberchat srv`. Anything left unset
/// falls back to the `[server]` configuration section.
#[derive(Parser, Debug)]
pub struct SrvArgs {
    /// Directory holding the demo site's static files.
    /// Defaults to `[server] directory`, then the current directory.
    pub directory: Option<PathBuf>,

    /// Port to listen on (the next free port is used if it is taken).
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Address to bind to. Use `0.0.0.0` to accept connections from other machines.
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Do not send CORS headers.
    #[arg(long)]
    pub no_cors: bool,

    /// Serve only the `/api` routes, no static files.
    #[arg(long, conflicts_with = "directory")]
    pub api_only: bool,
}

/// # Effective Server Configuration (`ServerConfig`)
///
/// Final settings used by `server_logic::run_server`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    /// Absolute, canonical site directory, or `None` in API-only mode.
    pub directory: Option<PathBuf>,
    pub enable_cors: bool,
    /// Presentation delay applied before each `/api/chat` reply.
    pub reply_delay: Duration,
}

/// # Build Server Configuration (`build_server_config`)
///
/// Merges `args` over the loaded configuration and validates the site
/// directory.
///
/// ## Errors
///
/// Returns an error if the chosen site directory does not exist, cannot be
/// accessed, or is not a directory.
pub async fn build_server_config(args: SrvArgs, config: &Config) -> Result<ServerConfig> {
    let directory = if args.api_only {
        None
    } else {
        let chosen = args
            .directory
            .or_else(|| config.server.directory.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        Some(resolve_directory(chosen).await?)
    };

    let server_config = ServerConfig {
        port: args.port.unwrap_or(config.server.port),
        host: args.host.unwrap_or(config.server.host),
        directory,
        enable_cors: !args.no_cors && config.server.enable_cors,
        reply_delay: config.chat.reply_delay(),
    };
    debug!("Built server configuration: {:?}", server_config);
    Ok(server_config)
}

/// Makes `dir_path` absolute and canonical, and checks it is a directory.
async fn resolve_directory(dir_path: PathBuf) -> Result<PathBuf> {
    let absolute_path = if dir_path.is_absolute() {
        dir_path
    } else {
        env::current_dir()
            .context("Failed to get current working directory")?
            .join(dir_path)
    };

    let canonical_path = tokio::fs::canonicalize(&absolute_path)
        .await
        .map_err(|e| {
            anyhow!(CyberchatError::FileSystem(format!(
                "Site directory '{}' could not be found or accessed: {}",
                absolute_path.display(),
                e
            )))
        })?;

    let metadata = tokio::fs::metadata(&canonical_path)
        .await
        .with_context(|| format!("Failed to get metadata for '{}'", canonical_path.display()))?;
    if !metadata.is_dir() {
        return Err(anyhow!(CyberchatError::FileSystem(format!(
            "Site path is not a directory: {}",
            canonical_path.display()
        ))));
    }

    debug!("Resolved site directory to: {}", canonical_path.display());
    Ok(canonical_path)
}
