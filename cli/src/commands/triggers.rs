//! # CyberChat Triggers Command
//!
//! File: cli/src/commands/triggers.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `cyberchat triggers` prints the effective trigger table in the order the
//! responder checks it, followed by the default response and a list of
//! triggers that can never match because an earlier keyword always wins.
//!
//! ## Example output
//!
//! ```text
//! Trigger table (checked top to bottom, first match wins):
//!
//!  #  | Keyword    | Response
//! ----+------------+--------------------------------------------------
//!  1  | hello      | Hello! I'm the security assistant. Ask me abo...
//!  2  | phishing   | Phishing emails impersonate trusted senders. ...
//!
//! Default response: I'm not sure about that one. ...
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::responder::TriggerTable;
use clap::Parser;
use tracing::info;

const RESPONSE_PREVIEW_CHARS: usize = 50;

/// # Triggers Arguments (`TriggersArgs`)
#[derive(Parser, Debug)]
pub struct TriggersArgs {
    /// Show full responses instead of a one-line preview.
    #[arg(long)]
    pub full: bool,
}

/// # Handle Triggers Command (`handle_triggers`)
pub async fn handle_triggers(args: TriggersArgs, config: &Config) -> Result<()> {
    let table = config.trigger_table()?;
    info!("Listing {} trigger(s).", table.len());
    print!("{}", render_table(&table, args.full));
    Ok(())
}

/// Formats the table, default response and shadowing report.
fn render_table(table: &TriggerTable, full: bool) -> String {
    let mut out = String::from("Trigger table (checked top to bottom, first match wins):\n\n");

    if table.is_empty() {
        out.push_str("  (no keyword triggers; every message gets the default response)\n");
    } else {
        let keyword_width = table
            .triggers()
            .iter()
            .map(|t| t.keyword.chars().count())
            .max()
            .unwrap_or(0)
            .max("Keyword".len());

        out.push_str(&format!(
            " {:<3}| {:<width$} | Response\n",
            "#",
            "Keyword",
            width = keyword_width
        ));
        out.push_str(&format!(
            "----+-{}-+-{}\n",
            "-".repeat(keyword_width),
            "-".repeat(RESPONSE_PREVIEW_CHARS)
        ));
        for (index, trigger) in table.triggers().iter().enumerate() {
            let response = if full {
                trigger.response.clone()
            } else {
                preview(&trigger.response)
            };
            out.push_str(&format!(
                " {:<3}| {:<width$} | {}\n",
                index + 1,
                trigger.keyword,
                response,
                width = keyword_width
            ));
        }
    }

    out.push_str(&format!("\nDefault response: {}\n", table.default_response()));

    let shadowed = table.shadowed();
    if !shadowed.is_empty() {
        out.push_str("\nUnreachable triggers:\n");
        for entry in shadowed {
            out.push_str(&format!(
                "  #{} '{}' is always beaten by #{} '{}'\n",
                entry.index + 1,
                table.triggers()[entry.index].keyword,
                entry.shadowed_by + 1,
                table.triggers()[entry.shadowed_by].keyword
            ));
        }
    }
    out
}

fn preview(text: &str) -> String {
    if text.chars().count() <= RESPONSE_PREVIEW_CHARS {
        text.to_string()
    } else {
        let cut: String = text.chars().take(RESPONSE_PREVIEW_CHARS - 3).collect();
        format!("{}...", cut)
    }
}
