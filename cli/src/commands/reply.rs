//! # CyberChat Reply Source
//!
//! File: cli/src/commands/reply.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `ask` and `chat` can answer locally, from the trigger table in the loaded
//! configuration, or remotely, by posting to a running `cyberchat srv`.
//! `ReplySource` hides that choice behind one `reply` call.
//!
//! ```bash
//! cyberchat ask "what is phishing"                                # local
//! cyberchat ask --server http://127.0.0.1:8000 "what is phishing" # remote
//! cyberchat ask --remote "what is phishing"                       # remote, [client] base_url
//! ```
//!
use crate::common::api::{ApiClient, ChatReply};
use crate::core::config::Config;
use crate::core::error::{CyberchatError, Result};
use crate::core::responder::KeywordResponder;
use anyhow::anyhow;
use chrono::Utc;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const REMOTE_TARGET: &str = "remote_target";

/// Options shared by commands that can talk to a remote server.
#[derive(Args, Debug, Default, Clone)]
pub struct RemoteOptions {
    /// Send messages to the `cyberchat srv` instance at this URL instead of answering locally.
    #[arg(long, value_name = "URL", group = REMOTE_TARGET)]
    pub server: Option<String>,

    /// Send messages to the server configured in `[client] base_url`.
    #[arg(long, conflicts_with = "server", group = REMOTE_TARGET)]
    pub remote: bool,

    /// Request timeout in seconds for remote mode (defaults to `[client] timeout_secs`).
    /// Only accepted together with `--server` or `--remote`.
    #[arg(long, value_name = "SECS", requires = REMOTE_TARGET)]
    pub timeout: Option<u64>,
}

/// Where replies come from.
#[derive(Debug, Clone)]
pub enum ReplySource {
    Local(KeywordResponder),
    Remote(ApiClient),
}

impl ReplySource {
    /// # Build Reply Source (`from_options`)
    ///
    /// Chooses remote mode when `--server` or `--remote` is given, local mode
    /// otherwise. Local mode builds the trigger table from `config`.
    ///
    /// ## Errors
    ///
    /// - `--remote` without a configured `[client] base_url`.
    /// - A zero `--timeout`, an invalid URL, or an invalid trigger table.
    pub fn from_options(options: &RemoteOptions, config: &Config) -> Result<Self> {
        let base_url = match (&options.server, options.remote) {
            (Some(url), _) => Some(url.clone()),
            (None, true) => Some(config.client.base_url.clone().ok_or_else(|| {
                anyhow!(CyberchatError::Config(
                    "--remote needs [client] base_url to be set in the configuration.".into()
                ))
            })?),
            (None, false) => None,
        };

        match base_url {
            Some(url) => {
                let timeout = match options.timeout {
                    Some(0) => {
                        return Err(anyhow!(CyberchatError::Config(
                            "--timeout must be greater than zero.".into()
                        )))
                    }
                    Some(secs) => Duration::from_secs(secs),
                    None => config.client.timeout(),
                };
                debug!("Using remote reply source at {} (timeout {:?})", url, timeout);
                Ok(Self::Remote(ApiClient::new(&url, timeout)?))
            }
            None => {
                let table = config.trigger_table()?;
                debug!("Using local reply source with {} triggers", table.len());
                Ok(Self::Local(KeywordResponder::new(Arc::new(table))))
            }
        }
    }

    /// Answers `input`, locally or through the chat API.
    pub async fn reply(&self, input: &str) -> Result<ChatReply> {
        match self {
            Self::Local(responder) => {
                let (reply, trigger) = responder.respond_matched(input);
                let matched_keyword = trigger.map(|t| t.keyword.clone());
                debug!("Local reply for {:?} matched {:?}", input, matched_keyword);
                Ok(ChatReply {
                    reply: reply.to_string(),
                    matched_keyword,
                    timestamp: Utc::now(),
                })
            }
            Self::Remote(client) => client.send_message(input).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::responder::Trigger;

    #[tokio::test]
    async fn test_local_source_uses_config_table() -> Result<()> {
        let mut config = Config::default();
        config.responder.triggers = vec![Trigger::new("hello", "A"), Trigger::new("help", "B")];
        config.responder.default_response = Some("D".into());

        let source = ReplySource::from_options(&RemoteOptions::default(), &config)?;
        assert!(matches!(source, ReplySource::Local(_)));

        let reply = source.reply("hello, can you help").await?;
        assert_eq!(reply.reply, "A");
        assert_eq!(reply.matched_keyword.as_deref(), Some("hello"));

        let reply = source.reply("xyz123").await?;
        assert_eq!(reply.reply, "D");
        assert_eq!(reply.matched_keyword, None);
        Ok(())
    }

    #[test]
    fn test_server_option_selects_remote() {
        let options = RemoteOptions {
            server: Some("http://127.0.0.1:8000".into()),
            ..Default::default()
        };
        let source = ReplySource::from_options(&options, &Config::default()).unwrap();
        match source {
            ReplySource::Remote(client) => assert_eq!(client.base_url(), "http://127.0.0.1:8000"),
            other => panic!("expected remote source, got {:?}", other),
        }
    }

    #[test]
    fn test_remote_flag_uses_configured_url() {
        let mut config = Config::default();
        config.client.base_url = Some("http://10.0.0.5:9000".into());
        let options = RemoteOptions {
            remote: true,
            ..Default::default()
        };
        let source = ReplySource::from_options(&options, &config).unwrap();
        assert!(matches!(source, ReplySource::Remote(_)));
    }

    #[test]
    fn test_remote_flag_without_url_fails() {
        let options = RemoteOptions {
            remote: true,
            ..Default::default()
        };
        let err = ReplySource::from_options(&options, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("[client] base_url"));
    }

    #[test]
    fn test_zero_timeout_fails() {
        let options = RemoteOptions {
            server: Some("http://127.0.0.1:8000".into()),
            timeout: Some(0),
            ..Default::default()
        };
        let err = ReplySource::from_options(&options, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("--timeout"));
    }
}
