//! Queue-item poller
//!
//! Waits for a queued build request to be scheduled onto an executor and
//! returns the build number it was given.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::QueuePollerConfig;
use crate::error::{PollError, Result};
use crate::repository::BuildRepository;
use crate::scope::run_scoped;

/// Resolves a queue item id to a build number
pub struct QueueItemPoller {
    repository: Arc<dyn BuildRepository>,
    queue_id: u64,
    config: QueuePollerConfig,
}

impl QueueItemPoller {
    /// Creates a poller for `queue_id`
    ///
    /// Fails with `PollError::InvalidConfig` if `config` does not validate.
    pub fn new(
        repository: Arc<dyn BuildRepository>,
        queue_id: u64,
        config: QueuePollerConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            repository,
            queue_id,
            config,
        })
    }

    pub fn queue_id(&self) -> u64 {
        self.queue_id
    }

    pub fn config(&self) -> &QueuePollerConfig {
        &self.config
    }

    /// Polls until the item is scheduled, cancelled, or the poll is stopped
    ///
    /// # Returns
    /// The build number the item was scheduled as
    ///
    /// # Errors
    /// - `GetQueueItem` when a query fails (not retried)
    /// - `TriggerCancelled` when the controller cancelled the item
    /// - `Cancelled` / `TimedOut` when `cancel` fires or the timeout elapses
    pub async fn poll(&self, cancel: &CancellationToken) -> Result<u64> {
        run_scoped(cancel, self.config.timeout, self.run()).await
    }

    async fn run(&self) -> Result<u64> {
        loop {
            let item = self
                .repository
                .get_queue_item(self.queue_id)
                .await
                .map_err(|source| PollError::GetQueueItem {
                    queue_id: self.queue_id,
                    source,
                })?;

            if item.cancelled {
                info!("Queue item {} was cancelled", self.queue_id);
                return Err(PollError::TriggerCancelled {
                    queue_id: self.queue_id,
                });
            }

            let number = item.execution_number();
            if number != 0 {
                info!("Queue item {} scheduled as build #{}", self.queue_id, number);
                return Ok(number);
            }

            debug!(
                "Queue item {} still waiting, next check in {:?}",
                self.queue_id, self.config.polling_interval
            );
            tokio::time::sleep(self.config.polling_interval).await;
        }
    }
}
