//! # CyberChat Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file is the entry point for the CyberChat CLI, the keyword chat
//! responder behind the cybersecurity demo site. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the configuration once per run
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Ask one question
//! cyberchat ask "how do I spot phishing?"
//!
//! # Chat interactively with extra logging
//! cyberchat -vv chat
//!
//! # Use a specific configuration file
//! cyberchat --config ./demo.toml triggers
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod common;
mod core;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "cyberchat",
    about = "🛡️ CyberChat: keyword chat responder for the cybersecurity demo site",
    long_about = "Answer chat messages from an ordered keyword table, interactively,\n\
                  one at a time, or over HTTP for the demo site's chat widget.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Read configuration from this file only, skipping the user and project files.
    #[arg(long, global = true, env = "CYBERCHAT_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Answer a single message and exit.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// Start an interactive chat session.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Show the trigger table in matching order.
    #[command(alias = "t")]
    Triggers(commands::triggers::TriggersArgs),
    /// Serve the demo site and the chat API.
    Srv(commands::srv::SrvArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match core::config::load_config(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Ask(args) => commands::ask::handle_ask(args, &config).await,
            Commands::Chat(args) => commands::chat::handle_chat(args, &config).await,
            Commands::Triggers(args) => commands::triggers::handle_triggers(args, &config).await,
            Commands::Srv(args) => commands::srv::handle_srv(args, &config).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
