//! Input gate resolution

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use trestle_core::domain::input::PendingInputAction;
use trestle_core::domain::job::JobPath;

use crate::repository::BuildRepository;

/// Decides what to do with the input gates a running build is paused on
///
/// Called at most once per poll iteration, with the full set of gates
/// pending at that moment. Returning an error aborts the poll.
#[async_trait]
pub trait InputResolver: Send + Sync {
    async fn resolve(
        &self,
        job: &JobPath,
        number: u64,
        actions: &[PendingInputAction],
    ) -> Result<()>;
}

/// Approves every pending gate without parameters
///
/// Gates are approved one after another. The first failure stops the
/// walk; gates approved before it stay approved, and the next query of the
/// pending set no longer lists them.
pub struct AutoProceed {
    repository: Arc<dyn BuildRepository>,
}

impl AutoProceed {
    pub fn new(repository: Arc<dyn BuildRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl InputResolver for AutoProceed {
    async fn resolve(
        &self,
        job: &JobPath,
        number: u64,
        actions: &[PendingInputAction],
    ) -> Result<()> {
        for action in actions {
            info!("Approving input {} on {} #{}", action.id, job, number);
            self.repository
                .proceed_input(job, number, &action.id)
                .await
                .with_context(|| format!("failed to resolve input gate {}", action.id))?;
        }

        Ok(())
    }
}

/// Leaves gates for someone else to resolve
///
/// Useful when approval happens outside this process but the caller still
/// wants to see the gates in the logs.
pub struct IgnoreInput;

#[async_trait]
impl InputResolver for IgnoreInput {
    async fn resolve(
        &self,
        job: &JobPath,
        number: u64,
        actions: &[PendingInputAction],
    ) -> Result<()> {
        for action in actions {
            info!(
                "{} #{} is waiting for input {}{}",
                job,
                number,
                action.id,
                action
                    .message
                    .as_deref()
                    .map(|m| format!(": {}", m))
                    .unwrap_or_default()
            );
        }

        Ok(())
    }
}
