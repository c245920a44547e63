//! # CyberChat Interactive Chat
//!
//! File: cli/src/commands/chat.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `cyberchat chat` runs a REPL against the keyword responder (or a remote
//! server). The session keeps an in-memory transcript that disappears when
//! the session ends.
//!
//! Session commands:
//! - `bye`, `exit`, `quit`: end the session
//! - `/history`: print every exchange of this session
//! - blank lines are ignored
//!
//! Replies can be held back by `[chat] reply_delay_ms` (or `--delay-ms`) to
//! imitate the widget's "typing" pause. The delay happens here, never in the
//! responder.
//!
//! ## Example
//!
//! ```text
//! Chat with Sentinel! Type 'bye' to quit or '/history' to review this session.
//! You: hello
//! Sentinel: Hello! I'm the security assistant. ...
//! You: bye
//! Sentinel: Goodbye!
//! ```
//!
use super::reply::{RemoteOptions, ReplySource};
use crate::core::config::Config;
use crate::core::conversation::{ConversationTurn, Transcript};
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const EXIT_WORDS: [&str; 3] = ["bye", "exit", "quit"];
const HISTORY_COMMAND: &str = "/history";

/// # Chat Arguments (`ChatArgs`)
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Pause before each reply, in milliseconds (defaults to `[chat] reply_delay_ms`).
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    #[command(flatten)]
    pub remote: RemoteOptions,
}

/// # Handle Chat Command (`handle_chat`)
///
/// Runs an interactive session on stdin/stdout.
pub async fn handle_chat(args: ChatArgs, config: &Config) -> Result<()> {
    let source = ReplySource::from_options(&args.remote, config)?;
    if let ReplySource::Remote(client) = &source {
        match client.health().await {
            Ok(health) => println!(
                "Connected to {} ({} triggers).",
                client.base_url(),
                health.triggers
            ),
            Err(e) => warn!("Health check against {} failed: {:#}", client.base_url(), e),
        }
    }
    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.chat.reply_delay());

    let transcript = run_session(
        &source,
        &config.chat.bot_name,
        delay,
        BufReader::new(tokio::io::stdin()),
        io::stdout(),
    )
    .await?;

    info!("Chat session ended after {} turn(s).", transcript.len());
    Ok(())
}

/// # Run Chat Session (`run_session`)
///
/// Reads lines from `input` until an exit word or end of input, writing
/// prompts and replies to `output`. Returns the session transcript.
/// Input is read asynchronously so the runtime is never blocked waiting on
/// the terminal.
///
/// A failed reply (remote mode only) is reported in the session and does not
/// end it.
pub async fn run_session<R: AsyncBufRead + Unpin, W: Write>(
    source: &ReplySource,
    bot_name: &str,
    delay: Duration,
    mut input: R,
    mut output: W,
) -> Result<Transcript> {
    let mut transcript = Transcript::new();

    writeln!(
        output,
        "Chat with {}! Type 'bye' to quit or '{}' to review this session.",
        bot_name, HISTORY_COMMAND
    )?;

    loop {
        write!(output, "You: ")?;
        output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let bytes_read = input
            .read_line(&mut line)
            .await
            .context("Failed to read chat input")?;
        if bytes_read == 0 {
            writeln!(output)?;
            break;
        }

        let message = line.trim_end_matches(['\r', '\n']);
        let command = message.trim();

        if command.is_empty() {
            continue;
        }
        if EXIT_WORDS.iter().any(|word| command.eq_ignore_ascii_case(word)) {
            writeln!(output, "{}: Goodbye!", bot_name)?;
            break;
        }
        if command.eq_ignore_ascii_case(HISTORY_COMMAND) {
            writeln!(output, "{}", transcript.render(bot_name))?;
            continue;
        }

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match source.reply(message).await {
            Ok(reply) => {
                writeln!(output, "{}: {}", bot_name, reply.reply)?;
                transcript.record(ConversationTurn {
                    input: message.to_string(),
                    response: reply.reply,
                    timestamp: reply.timestamp,
                });
            }
            Err(e) => {
                warn!("Reply failed: {:#}", e);
                writeln!(output, "{} (error): {}", bot_name, e)?;
            }
        }
    }

    Ok(transcript)
}
