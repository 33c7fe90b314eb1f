//! Build-related API endpoints

use crate::JenkinsClient;
use crate::error::{ClientError, Result};
use crate::queue::job_url_path;
use reqwest::{Method, RequestBuilder, Url};
use reqwest::header::HeaderMap;
use trestle_core::domain::build::Build;
use trestle_core::domain::input::PendingInputAction;
use trestle_core::domain::job::JobPath;
use trestle_core::domain::log::LogChunk;

const TEXT_SIZE_HEADER: &str = "X-Text-Size";
const MORE_DATA_HEADER: &str = "X-More-Data";

impl JenkinsClient {
    // =============================================================================
    // Build State
    // =============================================================================

    /// Get a build by number
    pub async fn get_build(&self, job: &JobPath, number: u64) -> Result<Build> {
        let path = format!("/job/{}/{}/api/json", job_url_path(job)?, number);
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Console Text
    // =============================================================================

    /// Get console text written since byte offset `start`
    ///
    /// # Returns
    /// The new text (trimmed), the offset to request next, and whether the
    /// controller reported more text to be available
    pub async fn get_build_logs(
        &self,
        job: &JobPath,
        number: u64,
        start: u64,
    ) -> Result<LogChunk> {
        let response = self
            .build_logs_request(job, number, start)?
            .send()
            .await?;
        let response = self.check_status(response).await?;

        let (next_offset, has_more) = parse_progress_headers(response.headers())?;
        let text = response.text().await?;

        Ok(LogChunk {
            text: text.trim().to_string(),
            next_offset,
            has_more,
        })
    }

    fn build_logs_request(&self, job: &JobPath, number: u64, start: u64) -> Result<RequestBuilder> {
        let path = format!(
            "/job/{}/{}/logText/progressiveText",
            job_url_path(job)?,
            number
        );
        Ok(self.request(Method::GET, &path).query(&[("start", start)]))
    }

    // =============================================================================
    // Input Gates
    // =============================================================================

    /// List the input gates a pipeline build is currently paused on
    pub async fn get_pending_input_actions(
        &self,
        job: &JobPath,
        number: u64,
    ) -> Result<Vec<PendingInputAction>> {
        let path = format!(
            "/job/{}/{}/wfapi/pendingInputActions",
            job_url_path(job)?,
            number
        );
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await
    }

    /// Approve an input gate without submitting any parameters
    pub async fn proceed_input(&self, job: &JobPath, number: u64, input_id: &str) -> Result<()> {
        let response = self
            .proceed_input_request(job, number, input_id)?
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// The gate id is a single path segment and is percent-encoded as one
    fn proceed_input_request(
        &self,
        job: &JobPath,
        number: u64,
        input_id: &str,
    ) -> Result<RequestBuilder> {
        let base = format!(
            "{}/job/{}/{}/input",
            self.base_url(),
            job_url_path(job)?,
            number
        );
        let mut url = Url::parse(&base)
            .map_err(|e| ClientError::InvalidRequest(format!("invalid URL {:?}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest(format!("invalid URL {:?}", base)))?
            .push(input_id)
            .push("proceedEmpty");

        Ok(self.request_url(Method::POST, url))
    }
}

/// Read `X-Text-Size` (required) and `X-More-Data` (optional)
fn parse_progress_headers(headers: &HeaderMap) -> Result<(u64, bool)> {
    let text_size = headers
        .get(TEXT_SIZE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ClientError::ParseError(format!("missing {} header", TEXT_SIZE_HEADER)))?;
    let next_offset = text_size.trim().parse::<u64>().map_err(|e| {
        ClientError::ParseError(format!("failed to parse {} header: {}", TEXT_SIZE_HEADER, e))
    })?;

    let has_more = match headers.get(MORE_DATA_HEADER) {
        None => false,
        Some(value) => {
            let raw = value.to_str().map_err(|e| {
                ClientError::ParseError(format!(
                    "failed to read {} header: {}",
                    MORE_DATA_HEADER, e
                ))
            })?;
            parse_bool(raw).ok_or_else(|| {
                ClientError::ParseError(format!(
                    "failed to parse {} header: {:?}",
                    MORE_DATA_HEADER, raw
                ))
            })?
        }
    };

    Ok((next_offset, has_more))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "t" => Some(true),
        "false" | "0" | "f" | "" => Some(false),
        _ => None,
    }
}
