//! Error taxonomy for the reputation gate.
//!
//! A not-found lookup is not an error: it yields a failing verdict through
//! [`crate::reputation::Verdict::not_found`].

use thiserror::Error;

/// Errors that stop a gate run or that are downgraded to warnings.
#[derive(Debug, Error)]
pub enum GateError {
    /// Invalid caller input (identifier selection, thresholds, grade spelling).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The rating service answered with a non-success, non-404 status.
    #[error("API error: {status} {reason}")]
    Transport { status: u16, reason: String },

    /// The rating service could not be reached.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be read or decoded.
    #[error("invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Step outputs could not be written.
    #[error("failed to emit step outputs: {0}")]
    Output(String),

    /// Posting the pull-request annotation failed.
    #[error("failed to post PR comment: {0}")]
    Annotation(String),
}

impl GateError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, GateError>;
