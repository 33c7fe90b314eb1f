//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod build;
mod jobs;

pub use build::BuildArgs;

use anyhow::Result;
use clap::Subcommand;
use tokio_util::sync::CancellationToken;
use trestle_client::ClientError;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Trigger a build and wait for it to finish
    Build(BuildArgs),
    /// Show the state of one build
    Status {
        /// Job path, e.g. folder/app
        job: String,

        /// Build number
        number: u64,
    },
    /// List the jobs in a folder
    Jobs {
        /// Folder path; lists top-level jobs when omitted
        #[arg(default_value = "")]
        folder: String,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(
    command: Commands,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<()> {
    let result = match command {
        Commands::Build(args) => build::handle_build(args, config, cancel).await,
        Commands::Status { job, number } => jobs::show_build(config, &job, number).await,
        Commands::Jobs { folder } => jobs::list_jobs(config, &folder).await,
    };

    result.map_err(|e| match hint(&e) {
        Some(hint) => e.context(hint),
        None => e,
    })
}

/// A short pointer for the client failures a user can act on
fn hint(err: &anyhow::Error) -> Option<&'static str> {
    let client_error = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<ClientError>())?;

    if client_error.is_unauthorized() {
        Some("Jenkins rejected the request; check JENKINS_CREDENTIALS (user:api-token)")
    } else if client_error.is_server_error() {
        Some("Jenkins reported an internal error; check the controller logs")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn failing(status: u16) -> anyhow::Error {
        Err::<(), _>(ClientError::api_error(status, "nope"))
            .context("Failed to list jobs")
            .unwrap_err()
    }

    #[test]
    fn test_hint_for_rejected_credentials() {
        assert!(hint(&failing(401)).unwrap().contains("JENKINS_CREDENTIALS"));
        assert!(hint(&failing(403)).unwrap().contains("JENKINS_CREDENTIALS"));
    }

    #[test]
    fn test_hint_for_server_error() {
        assert!(hint(&failing(503)).unwrap().contains("internal error"));
    }

    #[test]
    fn test_no_hint_for_other_failures() {
        assert_eq!(hint(&failing(404)), None);
        assert_eq!(hint(&anyhow::anyhow!("plain")), None);
    }
}
