//! # CyberChat Ask Command
//!
//! File: cli/src/commands/ask.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `cyberchat ask` answers a single question and exits. All positional words
//! are joined with single spaces into one message, so quoting is optional.
//!
//! ## Examples
//!
//! ```bash
//! cyberchat ask what is phishing
//! cyberchat ask --json "is my password strong enough?"
//! cyberchat ask --server http://127.0.0.1:8000 "run a scan"
//! ```
//!
//! Example `--json` output:
//!
//! ```json
//! {"reply":"Use a unique passphrase ...","matched_keyword":"password","timestamp":"2025-01-01T12:00:00Z"}
//! ```
//!
use super::reply::{RemoteOptions, ReplySource};
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use tracing::info;

/// # Ask Arguments (`AskArgs`)
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The message to send. Words are joined with spaces; an empty message gets the default reply.
    #[arg(num_args = 0..)]
    pub message: Vec<String>,

    /// Print the full reply object as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub remote: RemoteOptions,
}

/// # Handle Ask Command (`handle_ask`)
///
/// Sends the joined message to the chosen reply source and prints the reply.
pub async fn handle_ask(args: AskArgs, config: &Config) -> Result<()> {
    let message = args.message.join(" ");
    info!("Handling ask command: {:?}", message);

    let source = ReplySource::from_options(&args.remote, config)?;
    let reply = source.reply(&message).await?;

    if args.json {
        let json = serde_json::to_string(&reply).context("Failed to encode reply as JSON")?;
        println!("{}", json);
    } else {
        println!("{}", reply.reply);
    }
    Ok(())
}
