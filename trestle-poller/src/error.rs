//! Error types for the pollers
//!
//! Every variant names the phase that failed so a caller can diagnose a
//! poll without looking inside it. `Cancelled` and `TimedOut` are kept
//! apart from the failures so callers can branch on "ran out of time"
//! versus "something broke".

use std::time::Duration;
use thiserror::Error;
use trestle_client::ClientError;

/// Result type alias for poller operations
pub type Result<T> = std::result::Result<T, PollError>;

/// Errors that end a poll
#[derive(Debug, Error)]
pub enum PollError {
    /// Reading the queue item failed
    #[error("failed to get queue item {queue_id}")]
    GetQueueItem {
        queue_id: u64,
        #[source]
        source: ClientError,
    },

    /// The controller cancelled the queued request before it ran
    #[error("queue item {queue_id} was cancelled")]
    TriggerCancelled { queue_id: u64 },

    /// Reading the build state failed
    #[error("failed to get build {job} #{number}")]
    GetBuild {
        job: String,
        number: u64,
        #[source]
        source: ClientError,
    },

    /// Reading console text failed
    #[error("failed to get build logs from offset {offset}")]
    GetLogs {
        offset: u64,
        #[source]
        source: ClientError,
    },

    /// Listing pending input gates failed
    #[error("failed to check if build is paused for input")]
    GetInputActions {
        #[source]
        source: ClientError,
    },

    /// The attached input resolver failed
    #[error("failed to invoke input resolver")]
    InputResolver(#[source] anyhow::Error),

    /// The attached log sink failed
    #[error("failed to invoke log sink")]
    LogSink(#[source] anyhow::Error),

    /// The caller's cancellation token fired
    #[error("polling was cancelled")]
    Cancelled,

    /// The configured timeout elapsed
    #[error("polling timed out after {0:?}")]
    TimedOut(Duration),

    /// A poller was constructed with unusable settings
    #[error("invalid poller configuration: {0}")]
    InvalidConfig(String),
}

impl PollError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
