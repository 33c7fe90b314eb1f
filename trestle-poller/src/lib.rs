//! Trestle Poller
//!
//! Drives a Jenkins build from trigger to terminal result by repeated state
//! inspection.
//!
//! Architecture:
//! - Repository: the query/mutation seam the pollers call (`BuildRepository`)
//! - Pollers: `QueueItemPoller` turns a queue id into a build number,
//!   `BuildPoller` follows a build until it stops running
//! - Capabilities: optional hooks the build poller invokes mid-loop
//!   (`InputResolver` for paused input gates, `LogSink` for console text)
//!
//! Each poller runs one sequential loop. Nothing is retried: the first
//! failed query, mutation or capability ends the poll with a `PollError`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use trestle_client::JenkinsClient;
//! use trestle_core::domain::job::JobPath;
//! use trestle_poller::{
//!     AutoProceed, BuildPoller, BuildPollerConfig, BuildRepository, HttpBuildRepository,
//!     QueueItemPoller, QueuePollerConfig,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let repository: Arc<dyn BuildRepository> =
//!     Arc::new(HttpBuildRepository::new(JenkinsClient::new("http://localhost:8080")));
//! let cancel = CancellationToken::new();
//! let job = JobPath::parse("my-folder/app");
//!
//! let queue_id = repository.trigger_build(&job).await?;
//! let queue_config = QueuePollerConfig::default();
//! let number = QueueItemPoller::new(Arc::clone(&repository), queue_id, queue_config)?
//!     .poll(&cancel)
//!     .await?;
//!
//! let config = BuildPollerConfig::default()
//!     .with_input_resolver(Arc::new(AutoProceed::new(Arc::clone(&repository))));
//! let build = BuildPoller::new(repository, job, number, config)?
//!     .poll(&cancel)
//!     .await?;
//!
//! println!("finished: {}", build.succeeded());
//! # Ok(())
//! # }
//! ```

pub mod build_poller;
pub mod capability;
pub mod config;
pub mod error;
pub mod queue_poller;
pub mod repository;
mod scope;

pub use build_poller::BuildPoller;
pub use capability::{AutoProceed, IgnoreInput, InputResolver, LogSink, TracingSink, WriterSink};
pub use config::{BuildPollerConfig, QueuePollerConfig};
pub use error::PollError;
pub use queue_poller::QueueItemPoller;
pub use repository::{BuildRepository, HttpBuildRepository};
