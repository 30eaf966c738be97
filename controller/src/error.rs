//! error taxonomy for a generation cycle
//!
//! every variant maps to exactly one user-facing message. nothing here is
//! ever propagated past the controller: it is rendered as a notification
//! and returned to the caller for logging.

use thiserror::Error;

pub const MSG_SELECT_SCRIPT: &str = "Please select a script";
pub const MSG_GENERATE_FAILED: &str = "Failed to generate URL";
pub const MSG_LOAD_SCRIPTS_FAILED: &str = "Failed to load scripts";
pub const MSG_BUSY: &str = "A request is already in progress";
pub const MSG_COPIED: &str = "URL copied to clipboard!";
pub const MSG_COPY_FAILED: &str = "Failed to copy URL";
pub const MSG_COPY_UNSUPPORTED: &str = "Copying is not supported in this browser";
pub const MSG_NOTHING_TO_COPY: &str = "No URL to copy";

/// failure of a submit or catalog request
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// empty selection, no request was sent
    #[error("no script selected")]
    Validation,

    /// a submission for the current cycle is still in flight
    #[error("submission already in progress")]
    Busy,

    /// server answered with a non-success status
    #[error("server rejected request ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },

    /// transport failure before any response arrived
    #[error("network error: {0}")]
    Network(String),

    /// success status but the body was not the expected json
    #[error("malformed response: {0}")]
    Decode(String),

    /// expires_at could not be parsed
    #[error("invalid expiry timestamp: {0}")]
    InvalidExpiry(String),

    /// the form was reset while the request was in flight
    #[error("response arrived after the form was reset")]
    Superseded,
}

impl GenerateError {
    /// message shown in the transient notification
    pub fn user_message(&self) -> String {
        self.message_with_fallback(MSG_GENERATE_FAILED)
    }

    /// same mapping, with a caller-specific generic fallback
    pub fn message_with_fallback(&self, fallback: &str) -> String {
        match self {
            GenerateError::Validation => MSG_SELECT_SCRIPT.to_string(),
            GenerateError::Busy => MSG_BUSY.to_string(),
            GenerateError::Rejected { detail: Some(detail), .. } if !detail.is_empty() => {
                detail.clone()
            }
            // the transport's own text, as a fetch rejection would surface it
            GenerateError::Network(msg) if !msg.is_empty() => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// failure of a copy attempt
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ClipboardError {
    /// the mechanism does not exist in this context
    #[error("clipboard mechanism unavailable")]
    Unavailable,

    /// the mechanism exists but refused the write
    #[error("clipboard write failed")]
    Failed,

    /// no url is currently displayed
    #[error("nothing to copy")]
    Empty,
}

impl ClipboardError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ClipboardError::Unavailable => MSG_COPY_UNSUPPORTED,
            ClipboardError::Failed => MSG_COPY_FAILED,
            ClipboardError::Empty => MSG_NOTHING_TO_COPY,
        }
    }
}

/// inline configuration block could not be read
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

// ==============================================================================
// tests
// ==============================================================================
