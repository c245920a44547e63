//! # CyberChat API Client
//!
//! File: cli/src/common/api/client.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A thin `reqwest` client for the chat endpoint of `cyberchat srv`. Each call
//! is a single request with a fixed timeout. There are no retries and no
//! streaming.
//!
//! Failures map onto `CyberchatError`:
//! - `ApiTimeout`: the request did not finish within the timeout
//! - `ApiStatus`: the server answered with a non-2xx status
//! - `Api`: connection, transport or decoding failures
//!
use super::{ChatReply, ChatRequest, HealthStatus, CHAT_PATH, HEALTH_PATH};
use crate::core::error::{CyberchatError, Result};
use anyhow::anyhow;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Client bound to one server base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://127.0.0.1:8000`).
    ///
    /// ## Errors
    ///
    /// Returns `Config` if the URL is not http(s) and `Api` if the underlying
    /// HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow!(CyberchatError::Config(format!(
                "Invalid server URL '{}'. Expected an http:// or https:// URL.",
                base_url
            ))));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CyberchatError::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// # Send Message (`send_message`)
    ///
    /// Posts `message` to `/api/chat` and returns the server's reply.
    pub async fn send_message(&self, message: &str) -> Result<ChatReply> {
        let url = format!("{}{}", self.base_url, CHAT_PATH);
        debug!("POST {}", url);

        let request = ChatRequest {
            message: message.to_string(),
        };
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(&url, e))?;

        self.decode(&url, response).await
    }

    /// Fetches `/api/health`.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(&url, e))?;

        self.decode(&url, response).await
    }

    async fn decode<T: DeserializeOwned>(&self, url: &str, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.classify_transport_error(url, e))?;

        if !status.is_success() {
            return Err(CyberchatError::ApiStatus {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            CyberchatError::Api(format!(
                "Failed to parse response from {}: {} - body: {}",
                url, e, body
            ))
            .into()
        })
    }

    fn classify_transport_error(&self, url: &str, e: reqwest::Error) -> anyhow::Error {
        if e.is_timeout() {
            CyberchatError::ApiTimeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs_f64(),
            }
            .into()
        } else if e.is_connect() {
            CyberchatError::Api(format!("Connection to {} failed: {}", url, e)).into()
        } else {
            CyberchatError::Api(format!("Request to {} failed: {}", url, e)).into()
        }
    }
}
