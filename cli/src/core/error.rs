//! # CyberChat Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout the CyberChat
//! application. Note that the keyword responder itself has no error path:
//! `respond` is total. Errors arise only around it, while loading
//! configuration, building a trigger table, serving HTTP or talking to a
//! remote `cyberchat srv` instance.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `CyberchatError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust
//! // Reject a keyword that could never match case-folded input
//! return Err(CyberchatError::InvalidTrigger {
//!     keyword: keyword.clone(),
//!     reason: "keyword must be lowercase".into(),
//! })?;
//!
//! // Distinguish a timeout from other client failures
//! match client.send_message("hello").await {
//!     Err(e) if matches!(e.downcast_ref::<CyberchatError>(), Some(CyberchatError::ApiTimeout { .. })) => {
//!         println!("Server is slow, try again later.");
//!     }
//!     other => { other?; }
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the CyberChat application.
#[derive(Error, Debug)]
pub enum CyberchatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Invalid trigger '{keyword}': {reason}")]
    InvalidTrigger { keyword: String, reason: String },

    #[error("Chat API request failed: {0}")]
    Api(String),

    #[error("Chat API returned HTTP {status}: {body}")]
    ApiStatus { status: u16, body: String },

    #[error("Chat API request to '{url}' timed out after {timeout_secs:.1}s")]
    ApiTimeout { url: String, timeout_secs: f64 },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = CyberchatError::Config("Missing setting 'foo'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'foo'"
        );

        let invalid = CyberchatError::InvalidTrigger {
            keyword: "".into(),
            reason: "keyword cannot be empty".into(),
        };
        assert_eq!(invalid.to_string(), "Invalid trigger '': keyword cannot be empty");

        let status = CyberchatError::ApiStatus {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(status.to_string(), "Chat API returned HTTP 502: bad gateway");

        let timeout = CyberchatError::ApiTimeout {
            url: "http://127.0.0.1:8000/api/chat".into(),
            timeout_secs: 2.5,
        };
        assert_eq!(
            timeout.to_string(),
            "Chat API request to 'http://127.0.0.1:8000/api/chat' timed out after 2.5s"
        );
    }
}
