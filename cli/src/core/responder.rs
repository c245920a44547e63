//! # CyberChat Keyword Responder
//!
//! File: cli/src/core/responder.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The chat widget on the demo site answers from a fixed set of canned
//! responses. This module holds that logic:
//! - `TriggerTable`: an ordered list of `(keyword, response)` pairs plus a
//!   single default response
//! - `KeywordResponder`: maps free text to exactly one response
//!
//! ## Matching Rules
//!
//! 1. The input is case-folded with `str::to_lowercase`. Nothing else is
//!    normalized: no trimming, no stemming, no tokenization.
//! 2. Triggers are checked in declaration order. The first keyword that is a
//!    substring of the folded input wins, even if a later keyword is longer or
//!    more specific (`"hello, can you help"` resolves to `"hello"` when it is
//!    declared before `"help"`).
//! 3. If nothing matches, the default response is returned.
//!
//! Case folding here is plain Unicode lowercasing, not full case folding.
//! Context-sensitive mappings still apply: a word-final capital sigma lowers
//! to `ς`, so `"ΟΔΟΣ"` becomes `"οδος"` and only matches a keyword spelled
//! with the final form. Keywords should be written the way lowercasing
//! would produce them.
//!
//! `respond` is total: every input, including the empty string, yields a
//! non-empty response. It performs no I/O and keeps no state between calls.
//!
//! ## Examples
//!
//! ```rust
//! let table = TriggerTable::new(
//!     vec![Trigger::new("hello", "Hi there!"), Trigger::new("help", "Ask me anything.")],
//!     "Sorry, I don't follow.",
//! )?;
//! let responder = KeywordResponder::new(Arc::new(table));
//!
//! assert_eq!(responder.respond("HELLO, can you help?"), "Hi there!");
//! assert_eq!(responder.respond(""), "Sorry, I don't follow.");
//! ```
//!
use crate::core::error::{CyberchatError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single `(keyword, response)` entry of a trigger table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Trigger {
    /// Lowercase text searched for inside the case-folded input.
    pub keyword: String,
    /// Canned reply returned when `keyword` matches.
    pub response: String,
}

impl Trigger {
    pub fn new(keyword: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            response: response.into(),
        }
    }
}

/// # Trigger Table (`TriggerTable`)
///
/// The ordered keyword table consulted by the responder. Entry order is the
/// only tie-break between matching keywords. The default response is held
/// separately, so a table always has exactly one and it is always checked
/// last.
///
/// A table is validated on construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerTable {
    triggers: Vec<Trigger>,
    default_response: String,
}

/// A trigger that can never be selected because an earlier keyword is a
/// substring of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shadowed {
    /// Position of the unreachable trigger.
    pub index: usize,
    /// Position of the earlier trigger that always wins.
    pub shadowed_by: usize,
}

impl TriggerTable {
    /// # Build Trigger Table (`new`)
    ///
    /// Validates and freezes a trigger list.
    ///
    /// ## Errors
    ///
    /// - `InvalidTrigger` if a keyword is empty (it would match every input)
    ///   or contains uppercase characters (it could never match folded input).
    /// - `InvalidTrigger` if a trigger's response is empty.
    /// - `Config` if the default response is empty.
    pub fn new(triggers: Vec<Trigger>, default_response: impl Into<String>) -> Result<Self> {
        let default_response = default_response.into();

        for trigger in &triggers {
            if trigger.keyword.is_empty() {
                return Err(CyberchatError::InvalidTrigger {
                    keyword: trigger.keyword.clone(),
                    reason: "keyword cannot be empty".into(),
                }
                .into());
            }
            if trigger.keyword != trigger.keyword.to_lowercase() {
                return Err(CyberchatError::InvalidTrigger {
                    keyword: trigger.keyword.clone(),
                    reason: format!(
                        "keyword must be lowercase (did you mean '{}'?)",
                        trigger.keyword.to_lowercase()
                    ),
                }
                .into());
            }
            if trigger.response.is_empty() {
                return Err(CyberchatError::InvalidTrigger {
                    keyword: trigger.keyword.clone(),
                    reason: "response cannot be empty".into(),
                }
                .into());
            }
        }

        if default_response.is_empty() {
            return Err(
                CyberchatError::Config("The default response cannot be empty.".into()).into(),
            );
        }

        Ok(Self {
            triggers,
            default_response,
        })
    }

    /// The cybersecurity-themed table used when no configuration supplies triggers.
    pub fn builtin() -> Self {
        let triggers = BUILTIN_TRIGGERS
            .iter()
            .map(|(keyword, response)| Trigger::new(*keyword, *response))
            .collect();
        Self {
            triggers,
            default_response: BUILTIN_DEFAULT_RESPONSE.to_string(),
        }
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    pub fn default_response(&self) -> &str {
        &self.default_response
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Lists triggers that can never fire because an earlier keyword is
    /// contained in theirs (duplicates included). Each entry names the first
    /// earlier trigger responsible.
    pub fn shadowed(&self) -> Vec<Shadowed> {
        self.triggers
            .iter()
            .enumerate()
            .filter_map(|(index, trigger)| {
                self.triggers[..index]
                    .iter()
                    .position(|earlier| trigger.keyword.contains(earlier.keyword.as_str()))
                    .map(|shadowed_by| Shadowed { index, shadowed_by })
            })
            .collect()
    }
}

/// # Keyword Responder (`KeywordResponder`)
///
/// Answers free-text input from a shared, immutable `TriggerTable`.
/// Cloning is cheap; every clone reads the same table.
#[derive(Debug, Clone)]
pub struct KeywordResponder {
    table: Arc<TriggerTable>,
}

impl KeywordResponder {
    pub fn new(table: Arc<TriggerTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TriggerTable {
        &self.table
    }

    /// Returns the first trigger, in table order, whose keyword occurs in the
    /// case-folded input.
    pub fn matched(&self, input: &str) -> Option<&Trigger> {
        let normalized = input.to_lowercase();
        self.table
            .triggers
            .iter()
            .find(|trigger| normalized.contains(trigger.keyword.as_str()))
    }

    /// # Respond (`respond`)
    ///
    /// Returns the canned response for `input`: the response of the first
    /// matching trigger, or the default response when none match.
    /// Never fails and never returns an empty string.
    pub fn respond(&self, input: &str) -> &str {
        self.respond_matched(input).0
    }

    /// Like `respond`, also returning the trigger that fired. Scans the
    /// table once.
    pub fn respond_matched(&self, input: &str) -> (&str, Option<&Trigger>) {
        let trigger = self.matched(input);
        let response = trigger.map_or(self.table.default_response.as_str(), |t| {
            t.response.as_str()
        });
        (response, trigger)
    }
}

const BUILTIN_TRIGGERS: &[(&str, &str)] = &[
    (
        "hello",
        "Hello! I'm the security assistant. Ask me about phishing, malware, passwords or network scans.",
    ),
    (
        "phishing",
        "Phishing emails impersonate trusted senders. Check the sender address, hover over links before clicking, and never enter credentials from an email link.",
    ),
    (
        "ransomware",
        "Ransomware encrypts your files and demands payment. Keep offline backups, patch promptly, and report incidents instead of paying.",
    ),
    (
        "malware",
        "Malware is any software built to harm or exploit a system. Keep your OS and antivirus updated and only install software from trusted sources.",
    ),
    (
        "password",
        "Use a unique passphrase of at least 12 characters for every account, store them in a password manager, and turn on multi-factor authentication.",
    ),
    (
        "firewall",
        "A firewall filters traffic between networks. Deny inbound connections by default and only open the ports your services actually need.",
    ),
    (
        "vpn",
        "A VPN encrypts traffic between your device and the VPN server. It protects you on untrusted Wi-Fi but does not make you anonymous.",
    ),
    (
        "scan",
        "Our vulnerability scan checks a host for open ports, outdated services and common misconfigurations. Enter a URL on the Scanner page to start one.",
    ),
    (
        "help",
        "I can answer questions about phishing, malware, ransomware, passwords, firewalls, VPNs and vulnerability scans.",
    ),
];

const BUILTIN_DEFAULT_RESPONSE: &str =
    "I'm not sure about that one. Try asking about phishing, malware, passwords, firewalls or scans.";
