//! Queue-related API endpoints

use crate::JenkinsClient;
use crate::error::{ClientError, Result};
use reqwest::header::{HeaderMap, LOCATION};
use reqwest::{Method, RequestBuilder, StatusCode};
use std::collections::HashMap;
use trestle_core::domain::job::JobPath;
use trestle_core::domain::queue::QueueItem;

impl JenkinsClient {
    // =============================================================================
    // Triggering
    // =============================================================================

    /// Trigger a build of `job` without parameters
    ///
    /// # Returns
    /// The id of the queue item the controller created for the request
    pub async fn trigger_build(&self, job: &JobPath) -> Result<u64> {
        let response = self.trigger_request(job, None)?.send().await?;

        parse_trigger_response(response.status(), response.headers())
    }

    /// Trigger a build of `job` with form-encoded parameters
    ///
    /// # Arguments
    /// * `job` - The job to build
    /// * `parameters` - Build parameters, sent as `application/x-www-form-urlencoded`
    ///
    /// # Returns
    /// The id of the queue item the controller created for the request
    pub async fn trigger_build_with_parameters(
        &self,
        job: &JobPath,
        parameters: &HashMap<String, String>,
    ) -> Result<u64> {
        let response = self.trigger_request(job, Some(parameters))?.send().await?;

        parse_trigger_response(response.status(), response.headers())
    }

    fn trigger_request(
        &self,
        job: &JobPath,
        parameters: Option<&HashMap<String, String>>,
    ) -> Result<RequestBuilder> {
        let job = job_url_path(job)?;
        let request = match parameters {
            None => self.request(Method::POST, &format!("/job/{}/build", job)),
            Some(parameters) => self
                .request(Method::POST, &format!("/job/{}/buildWithParameters", job))
                .form(parameters),
        };
        Ok(request)
    }

    // =============================================================================
    // Queue Items
    // =============================================================================

    /// Get the current state of a queue item
    pub async fn get_queue_item(&self, queue_id: u64) -> Result<QueueItem> {
        let path = format!("/queue/item/{}/api/json", queue_id);
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await
    }
}

pub(crate) fn job_url_path(job: &JobPath) -> Result<String> {
    if job.is_root() {
        return Err(ClientError::InvalidRequest(
            "job path must name a job".to_string(),
        ));
    }
    Ok(job.to_url_path())
}

/// Accept only `201 Created` and read the queue id from `Location`
fn parse_trigger_response(status: StatusCode, headers: &HeaderMap) -> Result<u64> {
    if status != StatusCode::CREATED {
        return Err(ClientError::api_error(
            status.as_u16(),
            format!("unexpected status code: {}", status),
        ));
    }

    let location = headers
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ClientError::ParseError("missing Location header".to_string()))?;

    parse_queue_location(location)
}

/// Extract the queue item id from a `.../queue/item/<id>/` location
pub(crate) fn parse_queue_location(location: &str) -> Result<u64> {
    let last = location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();

    last.parse().map_err(|e| {
        ClientError::ParseError(format!(
            "failed to parse queue item id from {:?}: {}",
            location, e
        ))
    })
}
