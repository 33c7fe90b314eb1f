//! Build command handler
//!
//! Triggers a build, waits for the queue item to be scheduled, then
//! follows the build until it finishes.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use trestle_core::domain::build::Build;
use trestle_core::domain::job::JobPath;
use trestle_poller::{
    AutoProceed, BuildPoller, BuildPollerConfig, BuildRepository, HttpBuildRepository,
    IgnoreInput, QueueItemPoller, QueuePollerConfig, WriterSink,
};

use crate::config::Config;

/// Arguments for `trestle build`
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Job path, e.g. folder/app
    job: String,

    /// Parameters as key=value pairs (e.g., -p branch=main -p env=staging)
    #[arg(short, long, value_parser = parse_key_val)]
    param: Vec<(String, String)>,

    /// Stream console output to stdout while the build runs
    #[arg(short, long)]
    follow: bool,

    /// Approve every input step the build pauses on
    #[arg(long, conflicts_with = "show_inputs")]
    auto_proceed: bool,

    /// Report input steps the build pauses on without approving them
    #[arg(long)]
    show_inputs: bool,

    /// Seconds between build state checks
    #[arg(long, default_value = "5")]
    interval: u64,

    /// Seconds to wait for the build to leave the queue
    #[arg(long)]
    queue_timeout: Option<u64>,

    /// Seconds to wait for the build to finish
    #[arg(long)]
    timeout: Option<u64>,
}

/// Parse a single key=value pair
fn parse_key_val(s: &str) -> Result<(String, String)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Handle `trestle build`
pub async fn handle_build(
    args: BuildArgs,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<()> {
    let repository: Arc<dyn BuildRepository> =
        Arc::new(HttpBuildRepository::new(config.client()?));
    let job = JobPath::parse(&args.job);

    info!("Building job {}", job);
    let triggered = if args.param.is_empty() {
        repository.trigger_build(&job).await
    } else {
        let parameters: HashMap<String, String> = args.param.iter().cloned().collect();
        repository
            .trigger_build_with_parameters(&job, &parameters)
            .await
    };
    let queue_id = triggered.context("Failed to trigger build")?;
    info!("Build enqueued as queue item {}", queue_id);

    let number = QueueItemPoller::new(Arc::clone(&repository), queue_id, queue_config(&args))?
        .poll(cancel)
        .await
        .context("Failed to poll queue item")?;

    let build = repository
        .get_build(&job, number)
        .await
        .context("Failed to get build")?;
    info!("Build started: {}", build.url);

    let mut poller = BuildPoller::new(
        Arc::clone(&repository),
        job,
        number,
        build_config(&args, &repository),
    )?;
    let build = poller.poll(cancel).await.context("Failed to poll build")?;

    print_result(number, &build);

    if !build.succeeded() {
        bail!(
            "build did not succeed: got {}",
            build
                .result
                .as_ref()
                .map(|r| r.as_str())
                .unwrap_or("no result")
        );
    }

    Ok(())
}

fn queue_config(args: &BuildArgs) -> QueuePollerConfig {
    let config = QueuePollerConfig::default();
    match args.queue_timeout {
        Some(secs) => config.with_timeout(Duration::from_secs(secs)),
        None => config,
    }
}

fn build_config(args: &BuildArgs, repository: &Arc<dyn BuildRepository>) -> BuildPollerConfig {
    let mut config =
        BuildPollerConfig::default().with_polling_interval(Duration::from_secs(args.interval));

    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    if args.follow {
        config = config.with_log_sink(Arc::new(WriterSink::stdout()));
    }

    if args.auto_proceed {
        config = config.with_input_resolver(Arc::new(AutoProceed::new(Arc::clone(repository))));
    } else if args.show_inputs {
        config = config.with_input_resolver(Arc::new(IgnoreInput));
    }

    config
}

fn print_result(number: u64, build: &Build) {
    let result = build
        .result
        .as_ref()
        .map(|r| r.as_str().to_string())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    let colored_result = if build.succeeded() {
        result.green().bold()
    } else {
        result.red().bold()
    };

    eprintln!("{} #{} finished: {}", "▸".cyan(), number, colored_result);
}
