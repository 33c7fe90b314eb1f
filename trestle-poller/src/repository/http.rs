//! HTTP build repository

use async_trait::async_trait;
use std::collections::HashMap;
use trestle_client::{JenkinsClient, Result};
use trestle_core::domain::build::Build;
use trestle_core::domain::input::PendingInputAction;
use trestle_core::domain::job::JobPath;
use trestle_core::domain::log::LogChunk;
use trestle_core::domain::queue::QueueItem;

use super::BuildRepository;

/// HTTP implementation of BuildRepository
#[derive(Debug, Clone)]
pub struct HttpBuildRepository {
    client: JenkinsClient,
}

impl HttpBuildRepository {
    /// Creates a repository backed by `client`
    pub fn new(client: JenkinsClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &JenkinsClient {
        &self.client
    }
}

#[async_trait]
impl BuildRepository for HttpBuildRepository {
    async fn trigger_build(&self, job: &JobPath) -> Result<u64> {
        self.client.trigger_build(job).await
    }

    async fn trigger_build_with_parameters(
        &self,
        job: &JobPath,
        parameters: &HashMap<String, String>,
    ) -> Result<u64> {
        self.client.trigger_build_with_parameters(job, parameters).await
    }

    async fn get_queue_item(&self, queue_id: u64) -> Result<QueueItem> {
        self.client.get_queue_item(queue_id).await
    }

    async fn get_build(&self, job: &JobPath, number: u64) -> Result<Build> {
        self.client.get_build(job, number).await
    }

    async fn get_build_logs(&self, job: &JobPath, number: u64, start: u64) -> Result<LogChunk> {
        self.client.get_build_logs(job, number, start).await
    }

    async fn get_pending_input_actions(
        &self,
        job: &JobPath,
        number: u64,
    ) -> Result<Vec<PendingInputAction>> {
        self.client.get_pending_input_actions(job, number).await
    }

    async fn proceed_input(&self, job: &JobPath, number: u64, input_id: &str) -> Result<()> {
        self.client.proceed_input(job, number, input_id).await
    }
}
