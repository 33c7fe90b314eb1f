//! Poller configuration
//!
//! Configurations are plain values built once, validated when a poller is
//! constructed, and never changed while a poll runs.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::capability::{InputResolver, LogSink};
use crate::error::{PollError, Result};

/// Queue-item poller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuePollerConfig {
    /// Delay between successive queue queries
    pub polling_interval: Duration,

    /// Upper bound for the whole poll; `None` polls until cancelled
    pub timeout: Option<Duration>,
}

impl QueuePollerConfig {
    pub fn with_polling_interval(mut self, polling_interval: Duration) -> Self {
        self.polling_interval = polling_interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        validate_timing(self.polling_interval, self.timeout)
    }
}

impl Default for QueuePollerConfig {
    fn default() -> Self {
        Self {
            polling_interval: Duration::from_secs(1),
            timeout: None,
        }
    }
}

/// Build poller configuration
///
/// Both capabilities are optional and independent; an absent capability is
/// simply skipped in each iteration.
#[derive(Clone)]
pub struct BuildPollerConfig {
    /// Delay between successive build queries
    pub polling_interval: Duration,

    /// Upper bound for the whole poll; `None` polls until cancelled
    pub timeout: Option<Duration>,

    /// Invoked with the pending input gates while the build is running
    pub on_input: Option<Arc<dyn InputResolver>>,

    /// Invoked with newly available console text once per iteration
    pub on_logs: Option<Arc<dyn LogSink>>,

    /// Keep reading console text after the build stops while the
    /// controller reports more data
    pub drain_logs_on_completion: bool,

    /// Upper bound on the reads made by that trailing drain
    pub max_drain_reads: usize,
}

impl BuildPollerConfig {
    pub fn with_polling_interval(mut self, polling_interval: Duration) -> Self {
        self.polling_interval = polling_interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_input_resolver(mut self, resolver: Arc<dyn InputResolver>) -> Self {
        self.on_input = Some(resolver);
        self
    }

    pub fn with_log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.on_logs = Some(sink);
        self
    }

    pub fn with_drain_logs_on_completion(mut self, drain: bool) -> Self {
        self.drain_logs_on_completion = drain;
        self
    }

    pub fn with_max_drain_reads(mut self, max_drain_reads: usize) -> Self {
        self.max_drain_reads = max_drain_reads;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        validate_timing(self.polling_interval, self.timeout)
    }
}

impl Default for BuildPollerConfig {
    fn default() -> Self {
        Self {
            polling_interval: Duration::from_secs(5),
            timeout: None,
            on_input: None,
            on_logs: None,
            drain_logs_on_completion: true,
            max_drain_reads: 64,
        }
    }
}

impl fmt::Debug for BuildPollerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildPollerConfig")
            .field("polling_interval", &self.polling_interval)
            .field("timeout", &self.timeout)
            .field("on_input", &self.on_input.is_some())
            .field("on_logs", &self.on_logs.is_some())
            .field("drain_logs_on_completion", &self.drain_logs_on_completion)
            .field("max_drain_reads", &self.max_drain_reads)
            .finish()
    }
}

fn validate_timing(polling_interval: Duration, timeout: Option<Duration>) -> Result<()> {
    if polling_interval.is_zero() {
        return Err(PollError::InvalidConfig(
            "polling_interval must be greater than 0".to_string(),
        ));
    }

    if timeout.is_some_and(|t| t.is_zero()) {
        return Err(PollError::InvalidConfig(
            "timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
