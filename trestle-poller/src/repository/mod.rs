//! Repository layer
//!
//! The pollers never talk HTTP themselves. They call a `BuildRepository`,
//! which exposes the four queries and the mutations they need. The HTTP
//! implementation delegates to `JenkinsClient`; tests supply scripted
//! in-memory implementations.

mod http;

pub use http::HttpBuildRepository;

use async_trait::async_trait;
use std::collections::HashMap;
use trestle_client::Result;
use trestle_core::domain::build::Build;
use trestle_core::domain::input::PendingInputAction;
use trestle_core::domain::job::JobPath;
use trestle_core::domain::log::LogChunk;
use trestle_core::domain::queue::QueueItem;

/// Query and mutation operations against a Jenkins controller
///
/// Implementations must be safe for concurrent use when several pollers
/// share one repository.
#[async_trait]
pub trait BuildRepository: Send + Sync {
    /// Triggers a build without parameters
    ///
    /// # Returns
    /// The queue item id for the accepted request
    async fn trigger_build(&self, job: &JobPath) -> Result<u64>;

    /// Triggers a build with parameters
    ///
    /// # Returns
    /// The queue item id for the accepted request
    async fn trigger_build_with_parameters(
        &self,
        job: &JobPath,
        parameters: &HashMap<String, String>,
    ) -> Result<u64>;

    /// Fetches the current snapshot of a queue item
    async fn get_queue_item(&self, queue_id: u64) -> Result<QueueItem>;

    /// Fetches the current snapshot of a build
    async fn get_build(&self, job: &JobPath, number: u64) -> Result<Build>;

    /// Fetches console text starting at byte offset `start`
    async fn get_build_logs(&self, job: &JobPath, number: u64, start: u64) -> Result<LogChunk>;

    /// Lists the input gates the build is paused on
    async fn get_pending_input_actions(
        &self,
        job: &JobPath,
        number: u64,
    ) -> Result<Vec<PendingInputAction>>;

    /// Approves one input gate without parameters
    async fn proceed_input(&self, job: &JobPath, number: u64, input_id: &str) -> Result<()>;
}
