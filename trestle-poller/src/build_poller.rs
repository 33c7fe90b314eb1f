//! Build poller
//!
//! Follows a build until it stops running. Each iteration:
//! 1. reads the build state
//! 2. if a log sink is attached, reads new console text and hands it over
//! 3. returns the build if it is no longer running
//! 4. if an input resolver is attached, hands it any pending input gates
//! 5. sleeps for the polling interval
//!
//! A finished build is returned whatever its result; deciding whether the
//! result counts as success is the caller's business.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use trestle_core::domain::build::Build;
use trestle_core::domain::job::JobPath;
use trestle_core::domain::log::{LogChunk, LogCursor};

use crate::config::BuildPollerConfig;
use crate::error::{PollError, Result};
use crate::repository::BuildRepository;
use crate::scope::run_scoped;

/// Drives one build to a terminal state
pub struct BuildPoller {
    repository: Arc<dyn BuildRepository>,
    job: JobPath,
    number: u64,
    config: BuildPollerConfig,
    cursor: LogCursor,
}

impl BuildPoller {
    /// Creates a poller for build `number` of `job`
    ///
    /// The log cursor starts at offset 0, so a new poller re-reads the
    /// whole console from the beginning.
    pub fn new(
        repository: Arc<dyn BuildRepository>,
        job: JobPath,
        number: u64,
        config: BuildPollerConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            repository,
            job,
            number,
            config,
            cursor: LogCursor::new(),
        })
    }

    pub fn job(&self) -> &JobPath {
        &self.job
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    /// How much console text has been consumed so far
    pub fn cursor(&self) -> LogCursor {
        self.cursor
    }

    /// Polls until the build stops running or the poll is stopped
    ///
    /// # Errors
    /// - `GetBuild`, `GetLogs`, `GetInputActions` when a query fails (not retried)
    /// - `LogSink`, `InputResolver` when an attached capability fails
    /// - `Cancelled` / `TimedOut` when `cancel` fires or the timeout elapses
    pub async fn poll(&mut self, cancel: &CancellationToken) -> Result<Build> {
        let timeout = self.config.timeout;
        run_scoped(cancel, timeout, self.run()).await
    }

    async fn run(&mut self) -> Result<Build> {
        loop {
            let build = self
                .repository
                .get_build(&self.job, self.number)
                .await
                .map_err(|source| PollError::GetBuild {
                    job: self.job.to_string(),
                    number: self.number,
                    source,
                })?;

            let chunk = self.tail_logs().await?;

            if build.is_finished() {
                if self.config.drain_logs_on_completion {
                    self.drain_logs(chunk).await?;
                }
                info!(
                    "Build {} #{} finished: {}",
                    self.job,
                    self.number,
                    build
                        .result
                        .as_ref()
                        .map(|r| r.as_str())
                        .unwrap_or("no result")
                );
                return Ok(build);
            }

            self.resolve_inputs().await?;

            debug!(
                "Build {} #{} still running, next check in {:?}",
                self.job, self.number, self.config.polling_interval
            );
            tokio::time::sleep(self.config.polling_interval).await;
        }
    }

    /// Reads console text from the cursor and passes it to the sink
    ///
    /// The cursor moves before the sink runs, so text is never offered twice.
    /// Returns `None` when no sink is attached.
    async fn tail_logs(&mut self) -> Result<Option<LogChunk>> {
        let Some(sink) = self.config.on_logs.clone() else {
            return Ok(None);
        };

        let offset = self.cursor.offset();
        let chunk = self
            .repository
            .get_build_logs(&self.job, self.number, offset)
            .await
            .map_err(|source| PollError::GetLogs { offset, source })?;

        self.cursor.advance(chunk.next_offset);

        if let Err(e) = sink.receive(&chunk.text).await {
            warn!("Log sink failed for {} #{}: {:#}", self.job, self.number, e);
            return Err(PollError::LogSink(e));
        }

        Ok(Some(chunk))
    }

    /// Keeps reading after completion while the controller reports more text
    ///
    /// Stops when the offset stalls or after `max_drain_reads` reads.
    async fn drain_logs(&mut self, mut last: Option<LogChunk>) -> Result<()> {
        let mut reads = 0;
        while last.as_ref().is_some_and(|chunk| chunk.has_more) {
            if reads == self.config.max_drain_reads {
                warn!(
                    "Build {} #{} still reports more console text after {} reads, giving up",
                    self.job, self.number, reads
                );
                break;
            }
            reads += 1;

            let before = self.cursor.offset();
            last = self.tail_logs().await?;
            if self.cursor.offset() == before {
                break;
            }
        }
        Ok(())
    }

    /// Hands pending input gates, if any, to the resolver
    async fn resolve_inputs(&self) -> Result<()> {
        let Some(resolver) = self.config.on_input.as_ref() else {
            return Ok(());
        };

        let actions = self
            .repository
            .get_pending_input_actions(&self.job, self.number)
            .await
            .map_err(|source| PollError::GetInputActions { source })?;

        if actions.is_empty() {
            return Ok(());
        }

        debug!(
            "Build {} #{} paused on {} input(s)",
            self.job,
            self.number,
            actions.len()
        );

        if let Err(e) = resolver.resolve(&self.job, self.number, &actions).await {
            warn!(
                "Input resolver failed for {} #{}: {:#}",
                self.job, self.number, e
            );
            return Err(PollError::InputResolver(e));
        }

        Ok(())
    }
}
